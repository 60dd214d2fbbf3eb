//! Content module - news documents, parsing and markdown conversion

pub mod markdown;
mod news;

pub use markdown::convert;
pub use news::{ContentResource, NewsItem, NewsParser, PatternSet, RawDocument};
