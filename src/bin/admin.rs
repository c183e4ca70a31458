//! CLI administration tool for tinylink.
//!
//! Provides schema setup, statistics and link management without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Apply migrations and show the links table layout
//! cargo run --bin admin -- db init
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Manage links
//! cargo run --bin admin -- links list
//! cargo run --bin admin -- links create https://example.com --code promo24
//! cargo run --bin admin -- links delete promo24
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*`), and
//! `BASE_URL` for printing full short links.

use tinylink::application::services::LinkService;
use tinylink::config::{self, Config};
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::server::{connect_pool, run_migrations};
use tinylink::utils::base_url::DEFAULT_BASE_URL;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Create a new link
    Create {
        /// Target URL
        url: String,

        /// Custom code (6-8 alphanumeric characters, generated if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a link
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Apply migrations and show the links table columns
    Init,

    /// Check database connection
    Check,

    /// Show database info
    Info,
}

type AdminLinkService = LinkService<PgLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repo);

    match action {
        LinkAction::List => list_links(&service).await?,
        LinkAction::Create { url, code } => create_link(&service, config, url, code).await?,
        LinkAction::Delete { code, yes } => delete_link(&service, code, yes).await?,
    }

    Ok(())
}

/// Lists all links in a table.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   Code      Clicks  Last clicked      Created           URL
///   ───────────────────────────────────────────────────────────────
///   abc123    3       2025-01-02 10:00  2025-01-01 09:00  https://example.com
/// ```
async fn list_links(service: &AdminLinkService) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<7} {:<17} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Last clicked".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for link in &links {
        let last_clicked = link
            .last_clicked
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<9} {:<7} {:<17} {:<17} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            last_clicked.bright_black(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates a link through the same validation path as the HTTP API.
async fn create_link(
    service: &AdminLinkService,
    config: &Config,
    url: String,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "✨ Create Link".bright_blue().bold());
    println!();

    let link = service
        .create_link(url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  Code:      {}", link.code.bright_yellow().bold());
    println!("  URL:       {}", link.url.cyan());
    println!(
        "  Short URL: {}",
        service.short_url(base_url, &link.code).bright_white()
    );
    println!();

    Ok(())
}

/// Deletes a link after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Shows the link's target and click count before asking
async fn delete_link(service: &AdminLinkService, code: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(&code)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", code, e))?;

    println!("  Code:   {}", link.code.cyan());
    println!("  URL:    {}", link.url);
    println!("  Clicks: {}", link.clicks.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays link statistics.
///
/// Shows:
/// - Total number of links
/// - Total number of clicks
/// - Most clicked link
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM links")
        .fetch_one(pool)
        .await?;

    let top: Option<(String, i32)> = sqlx::query_as(
        "SELECT code, clicks FROM links WHERE clicks > 0 ORDER BY clicks DESC, created_at DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    println!(
        "  Links:        {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:       {}",
        clicks_count.to_string().bright_green().bold()
    );
    match top {
        Some((code, clicks)) => println!(
            "  Most clicked: {} ({} clicks)",
            code.cyan(),
            clicks.to_string().bright_green()
        ),
        None => println!("  Most clicked: {}", "none yet".bright_black()),
    }
    println!();

    Ok(())
}

/// Handles database setup and diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Init => {
            println!("{}", "📦 Applying migrations...".bright_blue());

            run_migrations(pool).await?;

            println!("{}", "✅ Database initialized".green().bold());
            println!();
            println!("{}", "📋 Table structure:".bright_white().bold());

            let columns: Vec<(String, String, String)> = sqlx::query_as(
                r#"
                SELECT column_name::TEXT, data_type::TEXT, is_nullable::TEXT
                FROM information_schema.columns
                WHERE table_name = 'links'
                ORDER BY ordinal_position
                "#,
            )
            .fetch_all(pool)
            .await?;

            for (name, data_type, nullable) in columns {
                let nullable = if nullable == "YES" { " (nullable)" } else { "" };
                println!(
                    "   - {} {}{}",
                    name.cyan(),
                    data_type.bright_black(),
                    nullable.bright_black()
                );
            }
            println!();
        }
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
