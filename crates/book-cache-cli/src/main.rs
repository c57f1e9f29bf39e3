//! Book Cache CLI
//!
//! Inspect and edit cached books in Redis.

mod config;

use std::process::ExitCode;

use anyhow::Result;
use book_cache::{BookCache, CacheConfig, RedisHashStore};
use book_domain::{Book, BookId};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "book-cache")]
#[command(about = "Read, write and delete cached books")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a cached book as JSON
    Get { id: BookId },

    /// Cache a book, replacing any existing entry
    Set {
        id: BookId,

        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        author: Option<String>,

        /// Publication date (YYYY-MM-DD)
        #[arg(long)]
        published_on: Option<NaiveDate>,
    },

    /// Remove a book from the cache
    Delete { id: BookId },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config);

    let args = Args::parse();

    let Some(cache) = open_cache(&config.cache_config()) else {
        return Ok(ExitCode::FAILURE);
    };

    let ok = run(args.command, &cache).await?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Build the cache; the connection itself is made by the first command
fn open_cache(config: &CacheConfig) -> Option<BookCache<RedisHashStore>> {
    match BookCache::open(config) {
        Ok(cache) => {
            info!(url = %config.url, hash = %config.hash_key, "Using Redis book cache");
            Some(cache)
        }
        Err(e) => {
            error!(url = %config.url, error = %e, "Invalid Redis configuration");
            None
        }
    }
}

async fn run(command: Command, cache: &BookCache<RedisHashStore>) -> Result<bool> {
    let ok = match command {
        Command::Get { id } => {
            let mut book = Book::default();
            let hit = cache.get(id, &mut book).await;
            if hit {
                println!("{}", serde_json::to_string_pretty(&book)?);
            } else {
                info!(id, "Book not cached");
            }
            hit
        }

        Command::Set {
            id,
            title,
            author,
            published_on,
        } => {
            let book = Book {
                id,
                title,
                author,
                published_on,
            };
            cache.set(id, &book).await
        }

        Command::Delete { id } => cache.delete(id).await,
    };

    Ok(ok)
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_level.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout carries only command output
    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
