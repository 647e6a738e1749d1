//! CLI administration tool for login-portal.
//!
//! Checks credentials against the remote auth service and inspects or drops
//! stored sessions without going through the browser.
//!
//! # Usage
//!
//! ```bash
//! # Try a sign-in against AUTH_API_URL
//! cargo run --bin admin -- sign-in --account student01
//!
//! # Show the profile stored for a session cookie value
//! cargo run --bin admin -- session show <sid>
//!
//! # Drop a session
//! cargo run --bin admin -- session clear <sid>
//! ```
//!
//! # Environment Variables
//!
//! - `AUTH_API_URL`: required by `sign-in`
//! - `AUTH_API_TIMEOUT_SECONDS`: optional, default 10
//! - `REDIS_URL` and `SESSION_SECRET`: required by `session`

use login_portal::application::services::SessionManager;
use login_portal::domain::entities::{Credentials, SessionProfile, SignInRequest, grade_text};
use login_portal::infrastructure::auth_api::{AuthApi, HttpAuthApi};
use login_portal::infrastructure::store::RedisStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for operating login-portal.
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
    /// Sign in against the remote auth service and print the profile
    SignIn {
        /// Account identifier (prompted if omitted)
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Inspect stored sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

/// Session subcommands.
#[derive(Subcommand)]
enum SessionAction {
    /// Show the profile stored for a session id
    Show {
        /// Value of the `sid` cookie
        session_id: String,
    },

    /// Delete every key of a session
    Clear {
        /// Value of the `sid` cookie
        session_id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::SignIn { account } => sign_in(account).await?,
        Commands::Session { action } => handle_session_action(action).await?,
    }

    Ok(())
}

/// Runs one sign-in against the configured auth service.
///
/// The password is read without echo and tokens are masked in the output.
async fn sign_in(account: Option<String>) -> Result<()> {
    println!("{}", "Sign in".bright_blue().bold());
    println!();

    let base_url = std::env::var("AUTH_API_URL").context("AUTH_API_URL must be set")?;
    let timeout = std::env::var("AUTH_API_TIMEOUT_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let api = HttpAuthApi::new(&base_url, Duration::from_secs(timeout))?;

    let identifier = match account {
        Some(a) => a,
        None => Input::new().with_prompt("ID").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let credentials = Credentials::new(identifier, password);
    if let Err(errors) = credentials.check() {
        for field in ["identifier", "password"] {
            if let Some(message) = errors.get(field) {
                println!("  {} {}", field.yellow(), message);
            }
        }
        anyhow::bail!("Invalid credentials");
    }

    match api.sign_in(&SignInRequest::from(&credentials)).await {
        Ok(profile) => {
            println!("{}", "Sign-in accepted".green().bold());
            println!();
            print_profile(&profile);
        }
        Err(e) => {
            println!("{}", "Sign-in failed".red().bold());
            println!("  {}", e.to_string().bright_black());
        }
    }

    Ok(())
}

/// Dispatches session commands against Redis.
async fn handle_session_action(action: SessionAction) -> Result<()> {
    let redis_url = std::env::var("REDIS_URL").context("REDIS_URL must be set")?;
    let secret = std::env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?;

    let store = RedisStore::connect(&redis_url)
        .await
        .context("Failed to connect to Redis")?;
    // TTL is irrelevant here: this tool never writes sessions.
    let sessions = SessionManager::new(Arc::new(store), secret, 1);

    match action {
        SessionAction::Show { session_id } => match sessions.read(&session_id).await? {
            Some(profile) => print_profile(&profile),
            None => println!("{}", "  No session found".yellow()),
        },
        SessionAction::Clear { session_id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Clear this session?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "Cancelled".red());
                    return Ok(());
                }
            }

            sessions.clear(&session_id).await?;
            println!("{}", "Session cleared".green().bold());
        }
    }

    Ok(())
}

fn print_profile(profile: &SessionProfile) {
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    let rows = [
        ("Account", profile.account.clone()),
        ("Name", profile.name.clone()),
        ("Nickname", optional(&profile.nickname)),
        ("Gender", optional(&profile.gender)),
        ("Grade", grade_text(&profile.grade)),
        ("Major", optional(&profile.major)),
        ("Minor", optional(&profile.minor)),
        ("Phone", optional(&profile.phone_number)),
        ("Student ID", profile.student_id.clone()),
        ("Kakao", optional(&profile.kakao_account)),
        ("Access token", mask(&profile.access_token)),
        ("Refresh token", mask(&profile.refresh_token)),
    ];

    for (label, value) in rows {
        println!("  {:<14} {}", label.bright_white(), value.cyan());
    }
    println!();
}

/// Keeps the first four characters of a token.
fn mask(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{}***", prefix)
}
