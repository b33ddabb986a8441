use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use traktkit::endpoints::InfoLevel;
use traktkit::{ClientConfig, Trakt};

/// TraktKit - typed, caching client for the Trakt API
#[derive(Parser, Debug)]
#[command(name = "traktkit")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "traktkit.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the trending movies chart
    Trending {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Print one movie's full details
    Movie {
        /// Trakt id of the movie
        id: u64,
    },
    /// Print the page a user logs in on
    OauthUrl {
        #[arg(long, default_value = "urn:ietf:wg:oauth:2.0:oob")]
        redirect_uri: String,
    },
    /// Print the bytes used by the disk cache
    CacheSize,
    /// Remove every cached response
    ClearCache,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ClientConfig::from_file(&args.config)
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    traktkit::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow!("Failed to initialize logging subsystem: {}", e))?;

    tracing::info!(
        config_file = %args.config.display(),
        base_url = %config.base_url,
        disk_cache = config.cache.disk_root().is_some(),
        "Configuration loaded successfully"
    );

    let trakt = Trakt::new(config)?;

    match args.command {
        Command::Trending { page, limit } => {
            let trending = trakt.movies().trending(page, limit, None).await?;
            for item in &trending.value {
                println!(
                    "{:>5} watching  {} ({})",
                    item.watchers,
                    item.movie.title,
                    item.movie
                        .year
                        .map(|y| y.to_string())
                        .unwrap_or_else(|| "?".to_string())
                );
            }
            if let Some(pagination) = trending.pagination {
                println!(
                    "page {} of {}",
                    pagination.current_page, pagination.total_pages
                );
            }
        }
        Command::Movie { id } => {
            let movie = trakt.movies().details(id, InfoLevel::Full).await?;
            println!("{}", serde_json::to_string_pretty(&movie)?);
        }
        Command::OauthUrl { redirect_uri } => {
            println!("{}", trakt.oauth_url(&redirect_uri)?);
        }
        Command::CacheSize => {
            println!("{}", trakt.disk_cache_size().await);
        }
        Command::ClearCache => {
            trakt.clear_caches().await?;
            tracing::info!("Caches cleared");
        }
    }

    Ok(())
}
