//! CLI administration tool for url-shortener.
//!
//! Creates and inspects links directly against the database, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com
//!
//! # Shorten with a custom code
//! cargo run --bin admin -- shorten https://example.com --code promo
//!
//! # Show one link
//! cargo run --bin admin -- show promo
//!
//! # List recent links
//! cargo run --bin admin -- list --limit 20
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server; see [`url_shortener::config`].

use url_shortener::application::services::LinkService;
use url_shortener::application::services::link_service::short_url;
use url_shortener::config::{self, Config};
use url_shortener::domain::clock::SystemClock;
use url_shortener::domain::entities::Link;
use url_shortener::domain::events::NoopObserver;
use url_shortener::domain::repositories::LinkRepository;
use url_shortener::infrastructure::persistence::{self, MIGRATOR, SqliteLinkRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

/// Base used for printed short URLs when `BASE_URL` is unset.
const FALLBACK_BASE_URL: &str = "http://localhost:3000";

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Target URL
        url: String,

        /// Custom short code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show a link and its visit count
    Show {
        /// Short code
        code: String,
    },

    /// List the most recent links
    List {
        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = persistence::connect(
        &config.database_url,
        config.db_max_connections,
        Duration::from_secs(config.db_connect_timeout),
    )
    .await
    .context("Failed to connect to database")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let repo = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| FALLBACK_BASE_URL.to_string());

    match cli.command {
        Commands::Shorten { url, code } => {
            shorten(repo, config, &base_url, &url, code.as_deref()).await?
        }
        Commands::Show { code } => show(repo, &base_url, &code).await?,
        Commands::List { limit } => list(repo, limit).await?,
        Commands::Db { action } => handle_db_action(action, repo).await?,
    }

    Ok(())
}

async fn shorten(
    repo: Arc<SqliteLinkRepository>,
    config: Config,
    base_url: &str,
    url: &str,
    code: Option<&str>,
) -> Result<()> {
    let service = LinkService::new(
        repo,
        Arc::new(SystemClock),
        Arc::new(NoopObserver),
        config.shortener,
    )
    .context("Invalid shortener configuration")?;

    let allocation = service
        .shorten(url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten: {}", e))?;

    if allocation.created {
        println!("{}", "✅ Link created".green().bold());
    } else {
        println!("{}", "♻️  Existing link reused".yellow().bold());
    }
    println!();
    print_link(&allocation.link, base_url);

    Ok(())
}

async fn show(repo: Arc<SqliteLinkRepository>, base_url: &str, code: &str) -> Result<()> {
    let link = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No link with code '{code}'"))?;

    print_link(&link, base_url);

    Ok(())
}

fn print_link(link: &Link, base_url: &str) {
    println!(
        "  Short URL: {}",
        short_url(base_url, &link.code).bright_yellow().bold()
    );
    println!("  Target:    {}", link.target.cyan());
    println!(
        "  Kind:      {}",
        if link.is_custom { "custom" } else { "generated" }
    );
    println!(
        "  Visits:    {}",
        link.visits.to_string().bright_green().bold()
    );
    println!(
        "  Created:   {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();
}

/// Lists recent links, newest first.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code         Visits  Created           Target
///   ──────────────────────────────────────────────────────────────────
///   promo        12      2026-01-15 10:30  https://example.com
/// ```
async fn list(repo: Arc<SqliteLinkRepository>, limit: i64) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = repo
        .list_recent(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(66).bright_black());

    for link in &links {
        println!(
            "  {:<12} {:<7} {:<17} {}",
            link.code.cyan(),
            link.visits,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target
        );
    }

    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!();
    println!(
        "  Showing {} of {}",
        links.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, repo: Arc<SqliteLinkRepository>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
