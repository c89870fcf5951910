#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code; a bad token must never panic the tool.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::process::ExitCode;

use auth::{Claim, TokenConfig, TokenManager, TokenParser, bearer_token, encoding};
use clap::{Parser, Subcommand};
use rand::RngCore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Issue and inspect signed authentication tokens.
///
/// `issue` and `verify` read `AUTH_TOKEN_ISSUER`, `AUTH_TOKEN_SIGNING_KEY`,
/// and `AUTH_TOKEN_EXPIRATION_MINUTES` from the environment.
#[derive(Debug, Parser)]
#[command(name = "auth-token", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign a token carrying NAME=VALUE payload claims.
    Issue {
        #[arg(value_parser = parse_claim, value_name = "NAME=VALUE")]
        claims: Vec<Claim>,
        /// Scope the token to one action, e.g. `email_verification`.
        #[arg(long)]
        purpose: Option<String>,
    },
    /// Print a token's claims without checking its signature.
    Inspect {
        /// A token, or an `Authorization` header value.
        token: String,
    },
    /// Check signature, issuer, and expiry, then print the claims.
    Verify {
        /// A token, or an `Authorization` header value.
        token: String,
    },
    /// Print a random base64url signing key.
    Keygen {
        /// Key length in bytes, 1 to 1024.
        #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(1..=1024))]
        bytes: u16,
    },
}

fn parse_claim(raw: &str) -> Result<Claim, String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok(Claim::new(name, value)),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth=info,auth_token=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Issue { claims, purpose } => {
            let Some(manager) = load_manager() else {
                return ExitCode::FAILURE;
            };
            let token = match purpose {
                Some(purpose) => manager.issue_for_purpose(claims, &purpose),
                None => manager.issue(claims),
            };
            tracing::info!(issuer = %manager.builder().issuer(), "issued token");
            println!("{token}");
            ExitCode::SUCCESS
        }
        Command::Inspect { token } => {
            let token = strip_scheme(&token);
            match TokenParser::new().parse(token) {
                Ok(claims) => print_claims(&claims),
                Err(e) => {
                    tracing::warn!("failed to parse token: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Verify { token } => {
            let Some(manager) = load_manager() else {
                return ExitCode::FAILURE;
            };
            match manager.authenticate(strip_scheme(&token)) {
                Ok(claims) => print_claims(&claims),
                Err(e) => {
                    tracing::warn!(rejected = e.is_rejection(), "token not accepted: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Keygen { bytes } => {
            let mut key = vec![0u8; usize::from(bytes)];
            rand::rng().fill_bytes(&mut key);
            println!("{}", encoding::encode_base64url(&key));
            ExitCode::SUCCESS
        }
    }
}

/// Load configuration from the environment and build a manager.
///
/// Configuration errors are fatal; the caller exits without doing any work.
fn load_manager() -> Option<TokenManager> {
    let config = match TokenConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            return None;
        }
    };

    tracing::info!(
        "Loaded configuration: issuer={}, expiration_minutes={}",
        config.issuer,
        config.expiration_minutes
    );

    match TokenManager::new(&config) {
        Ok(manager) => Some(manager),
        Err(e) => {
            tracing::error!("Failed to configure token manager: {e}");
            None
        }
    }
}

fn strip_scheme(token: &str) -> &str {
    bearer_token(token).unwrap_or_else(|| token.trim())
}

fn print_claims(claims: &auth::ClaimSet) -> ExitCode {
    match serde_json::to_string_pretty(claims) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("failed to render claims: {e}");
            ExitCode::FAILURE
        }
    }
}
