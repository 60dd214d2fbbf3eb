//! Configuration module

mod site;

pub use site::NewsConfig;
pub use site::SiteConfig;
