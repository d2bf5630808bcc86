//! CLI administration tool for shortgate.
//!
//! Runs the abuse checks and the code numeral system from the terminal and
//! inspects the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Ask the DNS blacklists about a URL, an IP, or every domain in a text
//! cargo run --bin admin -- check url https://example.com/page
//! cargo run --bin admin -- check ip 192.0.2.1
//! cargo run --bin admin -- check text "visit www.example.com today"
//!
//! # Convert between counter values and codes
//! cargo run --bin admin -- code encode 4225
//! cargo run --bin admin -- code decode -LL
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `stats` and `db`): PostgreSQL connection string
//! - `DNSBL_TIMEOUT_MS`, `BLACKLIST_FILE`, `SHORTENERS_FILE`, `BASE_URL`: as for the server

use shortgate::application::services::{BlacklistGate, UrlValidator};
use shortgate::domain::entities::HostLists;
use shortgate::domain::repositories::ShortUrlRepository;
use shortgate::infrastructure::dns::HickoryResolver;
use shortgate::infrastructure::persistence::PgShortUrlRepository;
use shortgate::utils::numeral;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing shortgate.
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
    /// Run the abuse checks
    Check {
        /// Per-provider DNS timeout in milliseconds
        #[arg(long, env = "DNSBL_TIMEOUT_MS", default_value_t = 3000)]
        timeout_ms: u64,

        #[command(subcommand)]
        target: CheckTarget,
    },

    /// Convert between counter values and codes
    Code {
        #[command(subcommand)]
        action: CodeAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// What to run the abuse checks against.
#[derive(Subcommand)]
enum CheckTarget {
    /// Validate a long URL exactly as the server would
    Url {
        url: String,

        /// Local blacklist file
        #[arg(long, env = "BLACKLIST_FILE")]
        blacklist_file: Option<PathBuf>,

        /// Additional known shorteners file
        #[arg(long, env = "SHORTENERS_FILE")]
        shorteners_file: Option<PathBuf>,
    },

    /// Look an IP address up in the IP blacklists
    Ip { ip: String },

    /// Check every domain mentioned in a text
    Text { text: String },
}

/// Numeral system subcommands.
#[derive(Subcommand)]
enum CodeAction {
    /// Encode a counter value
    Encode { value: u64 },

    /// Decode a code back to its counter value
    Decode {
        #[arg(allow_hyphen_values = true)]
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { timeout_ms, target } => {
            handle_check(target, Duration::from_millis(timeout_ms.clamp(1, 30_000))).await?
        }
        Commands::Code { action } => handle_code(action)?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Runs the gate against a URL, an IP, or a text.
async fn handle_check(target: CheckTarget, timeout: Duration) -> Result<()> {
    let resolver = Arc::new(HickoryResolver::from_system_conf()?);
    let gate = Arc::new(BlacklistGate::with_default_providers(resolver, timeout));

    match target {
        CheckTarget::Url {
            url,
            blacklist_file,
            shorteners_file,
        } => {
            println!("{}", "🔍 Checking URL".bright_blue().bold());
            println!();

            let mut lists = HostLists::load(blacklist_file.as_deref(), shorteners_file.as_deref())
                .context("Failed to read host list file")?;
            if let Some(host) = std::env::var("BASE_URL")
                .ok()
                .and_then(|base| url::Url::parse(&base).ok())
                .and_then(|base| base.host_str().map(str::to_string))
            {
                lists = lists.with_shortener(&host);
            }

            let validator = UrlValidator::new(gate, Arc::new(lists));
            match validator.validate(&url).await {
                Ok(canonical) => {
                    println!("  Canonical: {}", canonical.as_str().cyan());
                    println!("{}", "✅ Accepted".green().bold());
                }
                Err(rejection) => {
                    println!("  Reason:    {}", rejection.kind().yellow());
                    println!("{}", format!("❌ {}", rejection).red().bold());
                }
            }
        }
        CheckTarget::Ip { ip } => {
            println!("{}", "🔍 Checking IP".bright_blue().bold());
            println!();

            match gate.classify_ip(&ip).await {
                Some(provider) => {
                    println!("{}", format!("❌ {} is listed on {}", ip, provider).red().bold())
                }
                None => println!("{}", format!("✅ {} is not listed", ip).green().bold()),
            }
        }
        CheckTarget::Text { text } => {
            println!("{}", "🔍 Checking text".bright_blue().bold());
            println!();

            match gate.first_blacklisted_in_text(&text).await {
                Some(domain) => {
                    println!("{}", format!("❌ {} is listed", domain).red().bold())
                }
                None => println!("{}", "✅ No listed domains found".green().bold()),
            }
        }
    }

    println!();
    Ok(())
}

/// Converts between counter values and codes.
fn handle_code(action: CodeAction) -> Result<()> {
    match action {
        CodeAction::Encode { value } => {
            println!("{}", numeral::encode(value).bright_green().bold());
        }
        CodeAction::Decode { code } => {
            let value = numeral::decode(&code)
                .with_context(|| format!("'{}' is not a valid code", code))?;
            println!("{}", value.to_string().bright_green().bold());
        }
    }

    Ok(())
}

/// Displays system statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgShortUrlRepository::new(Arc::new(pool.clone()));
    let count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let last_value: Option<i64> =
        sqlx::query_scalar("SELECT last_value FROM short_url_code_seq WHERE is_called")
            .fetch_optional(pool)
            .await?;

    println!("  Short URLs:    {}", count.to_string().bright_green().bold());
    match last_value {
        Some(value) => println!(
            "  Last counter:  {} ({})",
            value.to_string().bright_green().bold(),
            numeral::encode(value.max(0) as u64).cyan()
        ),
        None => println!("  Last counter:  {}", "unused".bright_black()),
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
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
