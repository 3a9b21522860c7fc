//! CLI for schema maintenance
//!
//! Outputs one JSON object per invocation so scripts can parse the result.

use anyhow::Result;
use clap::{Parser, Subcommand};
use guild_core::config::database_url_from_env;
use guild_core::domains::events::EventMember;
use guild_core::server::{connect_pool, run_migrations};
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema and data maintenance for the guild database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Run,

    /// Number roster rows still at sort_order 0, per event by member id
    BackfillSortOrder {
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Serialize)]
struct Response {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u64>,
}

fn output(resp: Response) {
    match serde_json::to_string(&resp) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize response: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => cmd_run().await,
        Commands::BackfillSortOrder { dry_run } => cmd_backfill_sort_order(dry_run).await,
    };

    if let Err(e) = &result {
        output(Response {
            success: false,
            message: format!("{:#}", e),
            count: None,
        });
    }

    result
}

async fn get_pool() -> Result<SqlitePool> {
    connect_pool(&database_url_from_env()).await
}

async fn cmd_run() -> Result<()> {
    let pool = get_pool().await?;
    run_migrations(&pool).await?;

    output(Response {
        success: true,
        message: "Migrations applied".to_string(),
        count: None,
    });
    Ok(())
}

async fn cmd_backfill_sort_order(dry_run: bool) -> Result<()> {
    let pool = get_pool().await?;
    let count = EventMember::backfill_sort_order(dry_run, &pool).await?;

    let message = if dry_run {
        format!("{} event(s) would be renumbered", count)
    } else {
        format!("{} event(s) renumbered", count)
    };

    output(Response {
        success: true,
        message,
        count: Some(count),
    });
    Ok(())
}
