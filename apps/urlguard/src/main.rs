//! urlguard - sign and verify URLs from the command line.
//!
//! # Usage
//!
//! ```text
//! URLGUARD_KEY_ID=abc URLGUARD_SECRET=123 urlguard sign http://example.com/foo userId=123
//! URLGUARD_KEY_ID=abc URLGUARD_SECRET=123 urlguard verify 'https://example.com/foo?...&signature=...'
//! urlguard inspect 'https://example.com/foo?...&signature=...'
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `URLGUARD_KEY_ID` | *(unset)* | Key ID embedded in signed URLs |
//! | `URLGUARD_SECRET` | *(unset)* | Shared secret |
//! | `URLGUARD_FRESHNESS_SECS` | `3600` | Maximum accepted URL age |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use urlguard_auth::{Credential, SignedUrl, SystemClock, UrlGuardConfig, sign_url, verify_signed_url};

#[derive(Parser, Debug)]
#[command(name = "urlguard", version, about = "Sign and verify URLs with a shared secret")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Sign a URL, appending any extra name=value parameters
    Sign {
        url: String,
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Verify a signed URL; exits with status 1 when invalid or expired
    Verify { signed_url: String },
    /// Print the key, nonce, timestamp and signature of a signed URL
    Inspect { signed_url: String },
}

/// Parse a `name=value` argument, splitting on the first `=`.
fn parse_param(param: &str) -> Result<(String, String), String> {
    param
        .split_once('=')
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("parameter {param:?} must be name=value"))
}

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn require_credential(config: &UrlGuardConfig) -> Result<Credential> {
    config
        .credential()
        .context("URLGUARD_KEY_ID and URLGUARD_SECRET must both be set")
}

/// Execute a command, returning whether it succeeded.
fn run(command: Command, config: &UrlGuardConfig) -> Result<bool> {
    match command {
        Command::Sign { url, params } => {
            let credential = require_credential(config)?;
            let signed = sign_url(&url, params, &credential, &SystemClock)
                .with_context(|| format!("failed to sign {url}"))?;
            info!(key_id = %credential.key_id(), "signed URL");
            println!("{signed}");
            Ok(true)
        }
        Command::Verify { signed_url } => {
            let credential = require_credential(config)?;
            let valid = verify_signed_url(
                &signed_url,
                &credential,
                &SystemClock,
                config.freshness_window(),
            )
            .context("failed to verify signed URL")?;
            if valid {
                info!(key_id = %credential.key_id(), "signature valid");
                println!("valid");
            } else {
                warn!(key_id = %credential.key_id(), "signature invalid or expired");
                println!("invalid");
            }
            Ok(valid)
        }
        Command::Inspect { signed_url } => {
            let signed = SignedUrl::split(&signed_url).context("failed to inspect signed URL")?;
            debug!(unsigned_part = %signed.unsigned_part(), "inspecting signed URL");
            println!("key: {}", signed.key_id().unwrap_or_default());
            println!("nonce: {}", signed.nonce().unwrap_or_default());
            println!(
                "timestamp: {}",
                signed.timestamp().map(|t| t.to_string()).unwrap_or_default()
            );
            println!("signature: {}", signed.signature());
            Ok(true)
        }
    }
}

fn main() -> Result<()> {
    let config = UrlGuardConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.log_level)?;

    let cli = Cli::parse();
    debug!(command = ?cli.command, ?config, "starting urlguard");

    let ok = run(cli.command, &config)?;
    std::process::exit(i32::from(!ok));
}
