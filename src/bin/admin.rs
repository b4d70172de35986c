//! Operator CLI for wedding-transport.
//!
//! ```bash
//! admin token create --name "Planner laptop"
//! admin token list
//! admin token revoke "Planner laptop"     # or by numeric id
//! admin transport generate --event 1
//! admin db check
//! admin db info
//! ```
//!
//! Reads the same environment as the server (`DATABASE_URL` or `DB_*`,
//! `TOKEN_SIGNING_SECRET`, ...). Tokens issued here only authenticate against
//! a server configured with the same signing secret.

use wedding_transport::application::services::{GenerationReport, hash_token};
use wedding_transport::config::{self, Config};
use wedding_transport::domain::entities::ApiToken;
use wedding_transport::domain::repositories::TokenRepository;
use wedding_transport::infrastructure::persistence::PgTokenRepository;
use wedding_transport::server::{build_lock, connect_pool};
use wedding_transport::state::AppState;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::PgPool;
use std::sync::Arc;

const TOKEN_LEN: usize = 48;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Tables reported by `db info`, with their display labels.
const COUNTED_TABLES: [(&str, &str); 5] = [
    ("Events", "wedding_events"),
    ("Guests", "guests"),
    ("Travel records", "travel_info"),
    ("Transport groups", "transport_groups"),
    ("Allocations", "transport_allocations"),
];

#[derive(Parser)]
#[command(name = "admin", version, about = "Operator tools for the wedding transport service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Issue, list and revoke API tokens
    #[command(subcommand)]
    Token(TokenCommand),

    /// Shuttle planning
    #[command(subcommand)]
    Transport(TransportCommand),

    /// Database diagnostics
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Subcommand)]
enum TokenCommand {
    /// Issue a token; the raw value is shown once
    Create(CreateTokenArgs),

    /// Show every token with its last use
    List,

    /// Revoke by exact name or numeric id
    Revoke { target: String },
}

#[derive(Args)]
struct CreateTokenArgs {
    /// Label stored with the token; prompted for when omitted
    #[arg(short, long)]
    name: Option<String>,

    /// Use this raw value instead of a random one
    #[arg(long)]
    value: Option<String>,

    /// Do not ask for confirmation
    #[arg(short = 'y', long)]
    yes: bool,
}

#[derive(Subcommand)]
enum TransportCommand {
    /// Build shuttle groups from the event's flight arrivals
    Generate {
        #[arg(short, long)]
        event: i64,
    },
}

#[derive(Subcommand)]
enum DbCommand {
    /// Run a trivial query
    Check,

    /// Server version and row counts
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Command::Token(cmd) => {
            let tokens = PgTokenRepository::new(Arc::new(pool));
            run_token_command(cmd, &tokens, &config.token_signing_secret).await
        }
        Command::Transport(TransportCommand::Generate { event }) => {
            generate_transport(event, pool, &config).await
        }
        Command::Db(cmd) => run_db_command(cmd, &pool).await,
    }
}

async fn run_token_command(
    cmd: TokenCommand,
    tokens: &PgTokenRepository,
    signing_secret: &str,
) -> Result<()> {
    match cmd {
        TokenCommand::Create(args) => create_token(tokens, signing_secret, args).await,
        TokenCommand::List => list_tokens(tokens).await,
        TokenCommand::Revoke { target } => revoke_token(tokens, &target).await,
    }
}

async fn create_token(
    tokens: &PgTokenRepository,
    signing_secret: &str,
    args: CreateTokenArgs,
) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Who is this token for?")
            .interact_text()?,
    };
    if name.trim().is_empty() {
        bail!("Token name must not be empty");
    }

    let raw = match args.value {
        Some(value) => {
            println!("{}", "Using the supplied token value".yellow());
            value
        }
        None => random_token(),
    };

    if !args.yes
        && !Confirm::new()
            .with_prompt(format!("Issue token \"{name}\"?"))
            .default(true)
            .interact()?
    {
        println!("{}", "Nothing created".yellow());
        return Ok(());
    }

    let token = tokens
        .create(&name, &hash_token(signing_secret, &raw))
        .await
        .map_err(|e| anyhow!("Could not store token: {e}"))?;

    println!();
    println!("{} {} (id {})", "Issued".green().bold(), token.name.cyan(), token.id);
    println!();
    println!("  {}", raw.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "Copy it now. Only its digest is stored, it cannot be shown again.".red()
    );
    println!(
        "Try it: curl -H \"Authorization: Bearer {raw}\" http://localhost:3000/api/events"
    );

    Ok(())
}

async fn list_tokens(tokens: &PgTokenRepository) -> Result<()> {
    let all = tokens
        .list()
        .await
        .map_err(|e| anyhow!("Could not load tokens: {e}"))?;

    if all.is_empty() {
        println!("No tokens yet. Issue one with `admin token create`.");
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:>5}  {:<28} {:<17} {:<17} {}",
            "id", "name", "created", "last used", "state"
        )
        .bold()
    );
    for token in &all {
        print_token_row(token);
    }

    let active = all.iter().filter(|t| !t.is_revoked()).count();
    println!();
    println!("{} tokens, {} active", all.len(), active.to_string().green());

    Ok(())
}

fn print_token_row(token: &ApiToken) {
    let last_used = token
        .last_used_at
        .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());
    let state = match token.revoked_at {
        Some(at) => format!("revoked {}", at.format(TIMESTAMP_FORMAT)).red(),
        None => "active".green(),
    };

    println!(
        "{:>5}  {:<28} {:<17} {:<17} {}",
        token.id,
        token.name,
        token.created_at.format(TIMESTAMP_FORMAT).to_string(),
        last_used,
        state
    );
}

async fn revoke_token(tokens: &PgTokenRepository, target: &str) -> Result<()> {
    let found = match target.parse::<i64>() {
        Ok(id) => tokens.find_by_id(id).await,
        Err(_) => tokens.find_by_name(target).await,
    }
    .map_err(|e| anyhow!("Could not look up token: {e}"))?;

    let token = found.with_context(|| format!("No token matches \"{target}\""))?;

    if token.is_revoked() {
        println!("{} is already revoked", token.name.cyan());
        return Ok(());
    }

    if !Confirm::new()
        .with_prompt(format!("Revoke \"{}\" (id {})?", token.name, token.id))
        .default(false)
        .interact()?
    {
        println!("{}", "Left active".yellow());
        return Ok(());
    }

    let revoked = tokens
        .revoke(token.id)
        .await
        .map_err(|e| anyhow!("Could not revoke token: {e}"))?;

    if revoked {
        println!("{} {}", "Revoked".green().bold(), token.name.cyan());
    } else {
        println!("{} was revoked by someone else meanwhile", token.name.cyan());
    }

    Ok(())
}

/// Runs generation against the database directly.
///
/// With Redis configured this takes the same per-event lock as the server.
/// Without it the lock is in-process and only guards this invocation.
async fn generate_transport(event_id: i64, pool: PgPool, config: &Config) -> Result<()> {
    let state = AppState::new(
        Arc::new(pool),
        build_lock(config).await,
        config.token_signing_secret.clone(),
    );

    let report = state
        .transport_service
        .generate_from_flights(event_id)
        .await
        .map_err(|e| anyhow!("Generation for event {event_id} failed: {e}"))?;

    print_report(event_id, &report);
    Ok(())
}

fn print_report(event_id: i64, report: &GenerationReport) {
    println!("{}", format!("Event {event_id}").bold());

    let rows = [
        ("buffer (min)", report.buffer_minutes.to_string()),
        ("guests processed", report.guests_processed.to_string()),
        ("guests grouped", report.guests_grouped.to_string()),
        ("groups created", report.groups_created.to_string()),
        ("groups updated", report.groups_updated.to_string()),
        ("groups removed", report.groups_removed.to_string()),
    ];
    for (label, value) in rows {
        println!("  {label:<17} {}", value.bright_white());
    }

    if !report.skipped.is_empty() {
        let ids: Vec<String> = report.skipped.iter().map(i64::to_string).collect();
        println!("  {:<17} {}", "skipped guests", ids.join(", ").yellow());
    }
}

async fn run_db_command(cmd: DbCommand, pool: &PgPool) -> Result<()> {
    match cmd {
        DbCommand::Check => {
            sqlx::query("SELECT 1")
                .execute(pool)
                .await
                .context("Database is not reachable")?;
            println!("{}", "Database reachable".green());
        }
        DbCommand::Info => {
            let version: String = sqlx::query_scalar("SHOW server_version")
                .fetch_one(pool)
                .await?;
            println!("PostgreSQL {}", version.bold());

            for (label, table) in COUNTED_TABLES {
                let rows: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await?;
                println!("  {label:<17} {rows}");
            }

            let active: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
                    .fetch_one(pool)
                    .await?;
            println!("  {:<17} {active}", "Active tokens");
        }
    }

    Ok(())
}

fn random_token() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
