//! # CLI Interface
//!
//! Command-line argument structure for `hedera` using `clap` derive.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Hedera SDK command-line tool.
///
/// Generates Ed25519 keys and inspects keys and identifiers offline. Nothing
/// here talks to the network.
#[derive(Parser, Debug)]
#[command(
    name = "hedera",
    about = "Key and identifier tooling for the Hedera SDK",
    version,
    propagate_version = true
)]
pub struct HederaCli {
    /// Log output format.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "HEDERA_LOG_FORMAT",
        default_value_t = LogFormatArg::Pretty
    )]
    pub log_format: LogFormatArg,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new Ed25519 secret key and print it with its public key.
    Keygen(KeygenArgs),
    /// Derive the public key of a secret key.
    Pubkey(PubkeyArgs),
    /// Validate an account id and print its canonical form.
    AccountId(AccountIdArgs),
    /// Generate a fresh transaction id for a payer.
    TxId(TxIdArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for `keygen`.
#[derive(Parser, Debug)]
pub struct KeygenArgs {
    /// Print a JSON object instead of plain lines.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `pubkey`.
#[derive(Parser, Debug)]
pub struct PubkeyArgs {
    /// Secret key as PKCS#8 hex (or a bare 32-byte seed).
    ///
    /// Prefer the environment variable: command lines end up in shell history.
    #[arg(long, env = "HEDERA_SECRET_KEY", hide_env_values = true)]
    pub secret: String,
}

/// Arguments for `account-id`.
#[derive(Parser, Debug)]
pub struct AccountIdArgs {
    /// Account id in `shard.realm.account` form.
    pub id: String,
}

/// Arguments for `tx-id`.
#[derive(Parser, Debug)]
pub struct TxIdArgs {
    /// Paying account. Falls back to `operator` in the config file.
    #[arg(long, env = "HEDERA_OPERATOR")]
    pub payer: Option<String>,

    /// Client configuration file (TOML).
    #[arg(long, short = 'c', env = "HEDERA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// `--log-format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
