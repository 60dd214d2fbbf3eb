//! CLI entry point for newsbox

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsbox::commands::generate::GenerateOptions;
use newsbox::state::{Language, Theme};

#[derive(Parser)]
#[command(name = "newsbox")]
#[command(version)]
#[command(about = "Renders markdown news snippets into a static site page", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a sample site with a page, config and news documents
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Render the news into the page and write the public directory
    #[command(alias = "g")]
    Generate {
        /// Language to render (zh, en)
        #[arg(short, long)]
        lang: Option<Language>,

        /// Color theme (dark, light)
        #[arg(short, long)]
        theme: Option<Theme>,

        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Fetch and parse the news documents and print them
    List {
        /// Language for placeholder titles (zh, en)
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Language to render (zh, en)
        #[arg(short, long)]
        lang: Option<Language>,

        /// Disable file watching and live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Delete the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "newsbox=debug,info"
    } else {
        "newsbox=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            newsbox::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Generate { lang, theme, watch } => {
            let site = newsbox::Site::new(&base_dir)?;
            let options = GenerateOptions {
                language: lang,
                theme,
            };

            tracing::info!("Generating static files...");
            let report = newsbox::commands::generate::run(&site, &options).await?;
            println!(
                "Generated {} with {} news items",
                report.output.display(),
                report.news_count
            );

            if watch {
                newsbox::commands::generate::watch(&site, &options).await?;
            }
        }

        Commands::List { lang } => {
            let site = newsbox::Site::new(&base_dir)?;
            newsbox::commands::list::run(&site, lang).await?;
        }

        Commands::Server {
            port,
            ip,
            lang,
            r#static,
        } => {
            let site = newsbox::Site::new(&base_dir)?;
            let options = GenerateOptions {
                language: lang,
                theme: None,
            };

            // Generate first; a failed fetch still leaves a page to serve
            tracing::info!("Generating static files...");
            if let Err(e) = newsbox::commands::generate::run(&site, &options).await {
                tracing::error!("Generation failed: {}", e);
            }

            newsbox::server::start(&site, &ip, port, !r#static, options).await?;
        }

        Commands::Clean => {
            let site = newsbox::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            newsbox::commands::clean::run(&site)?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("newsbox version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
