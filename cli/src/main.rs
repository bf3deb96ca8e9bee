// Copyright (c) 2026 Hedera SDK Contributors. Apache-2.0 License.
// See LICENSE for details.

//! # `hedera` Command-Line Tool
//!
//! Entry point for the `hedera` binary. Parses CLI arguments, initializes
//! logging, and runs one offline subcommand:
//!
//! - `keygen`     — generate a secret key and print it with its public key
//! - `pubkey`     — derive the public key of a secret key
//! - `account-id` — validate and normalize an account id
//! - `tx-id`      — generate a transaction id for a payer
//! - `version`    — print build version information

mod cli;
mod logging;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;

use hedera_sdk::config::DEFAULT_VALID_DURATION;
use hedera_sdk::{AccountId, ClientConfig, SecretKey, TransactionId};

use cli::{Commands, HederaCli};

/// Default filter when `RUST_LOG` is unset. Commands print their results to
/// stdout, so logs stay quiet unless asked for.
const DEFAULT_LOG_FILTER: &str = "hedera=warn,hedera_sdk=warn";

fn main() -> Result<()> {
    let cli = HederaCli::parse();
    logging::init_logging(DEFAULT_LOG_FILTER, cli.log_format.into());

    let output = match cli.command {
        Commands::Keygen(args) => keygen(args.json)?,
        Commands::Pubkey(args) => pubkey(&args.secret)?,
        Commands::AccountId(args) => normalize_account_id(&args.id)?,
        Commands::TxId(args) => transaction_id(args)?,
        Commands::Version => version(),
    };
    println!("{output}");
    Ok(())
}

#[derive(Serialize)]
struct KeygenOutput {
    secret_key: String,
    public_key: String,
    public_key_raw: String,
}

/// Generates a key pair and renders it as text or JSON.
fn keygen(json: bool) -> Result<String> {
    let secret = SecretKey::generate();
    let public = secret.public_key();
    tracing::info!(public_key = %public.to_raw_hex(), "generated key pair");

    let out = KeygenOutput {
        secret_key: secret.to_string(),
        public_key: public.to_string(),
        public_key_raw: public.to_raw_hex(),
    };
    if json {
        return serde_json::to_string_pretty(&out).context("failed to encode key pair as JSON");
    }
    Ok(format!(
        "secret key : {}\npublic key : {}",
        out.secret_key, out.public_key
    ))
}

fn pubkey(secret: &str) -> Result<String> {
    let secret: SecretKey = secret.trim().parse().context("could not read secret key")?;
    Ok(secret.public_key().to_string())
}

fn normalize_account_id(id: &str) -> Result<String> {
    let id: AccountId = id.parse()?;
    Ok(id.to_string())
}

/// Builds a transaction id for the payer from `--payer`, or else from the
/// config file's operator.
fn transaction_id(args: cli::TxIdArgs) -> Result<String> {
    let payer = match (args.payer, args.config) {
        (Some(payer), _) => payer.parse::<AccountId>()?,
        (None, Some(path)) => ClientConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?
            .operator
            .ok_or_else(|| anyhow!("{} has no operator", path.display()))?,
        (None, None) => return Err(anyhow!("no payer: pass --payer or a config with an operator")),
    };
    let id = TransactionId::new(payer);
    tracing::debug!(transaction_id = %id, "generated transaction id");
    Ok(id.to_string())
}

fn version() -> String {
    format!(
        "hedera {}\nvalid duration default {}s",
        env!("CARGO_PKG_VERSION"),
        DEFAULT_VALID_DURATION.as_secs()
    )
}
