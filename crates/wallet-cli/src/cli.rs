//! # CLI Interface
//!
//! Defines the command-line argument structure for `bch-wallet` using
//! `clap` derive. Argument validation beyond syntax happens in the command
//! modules so that every rejection is reported the same way.

use std::convert::Infallible;

use chain_bch::fee::DEFAULT_FEE_RATE;
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};
use crypto_utils::zeroizing::SecretString;

/// Bitcoin Cash wallet utility.
///
/// Generates keys and addresses, and signs spends of outputs that have not
/// confirmed yet. It never stores keys and never touches the network.
#[derive(Parser, Debug)]
#[command(
    name = "bch-wallet",
    about = "Bitcoin Cash key generation and transaction signing",
    version,
    propagate_version = true
)]
pub struct WalletCli {
    /// Enable debug logging on stderr (overridden by RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable colored output. Any non-empty NO_COLOR value other than a
    /// false-like word ("0", "false", "no", "off") also disables it.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Print results as a single JSON object.
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new address based on system random seed.
    ///
    /// Prints a WIF private key together with its base58 and cashaddr
    /// addresses. Save the private key yourself: this tool never stores it.
    #[command(name = "newaddress")]
    NewAddress(NewAddressArgs),

    /// Sign a spend of one (possibly unconfirmed) output to one address.
    ///
    /// The whole value minus the fee goes to `--to`. The signed transaction
    /// is printed as hex; nothing is broadcast.
    #[command(name = "spendUnconfirmedUtxo")]
    SpendUnconfirmedUtxo(SpendArgs),
}

/// Arguments for `newaddress`.
#[derive(Parser, Debug)]
pub struct NewAddressArgs {
    /// Network: mainnet, testnet or regtest (case-insensitive).
    #[arg(value_name = "NETWORK", num_args = 0..)]
    pub networks: Vec<String>,
}

/// Arguments for `spendUnconfirmedUtxo`.
#[derive(Parser, Debug)]
pub struct SpendArgs {
    /// WIF private key of the sender.
    #[arg(long, value_parser = parse_secret)]
    pub privkey: Option<SecretString>,

    /// Address of the receiver (legacy or cashaddr).
    #[arg(long)]
    pub to: Option<String>,

    /// Hash of the transaction holding the output to spend.
    #[arg(long)]
    pub hash: Option<String>,

    /// Index of the output within that transaction.
    #[arg(long, default_value_t = 0)]
    pub idx: u32,

    /// Value of the output in satoshis.
    #[arg(long, default_value_t = 0)]
    pub value: u64,

    /// Network the key and addresses belong to.
    #[arg(long, default_value = "testnet")]
    pub network: String,

    /// Fee rate, multiplied by 100000 to give satoshis per byte. A plain
    /// decimal or scientific notation (1e-6) is accepted; negative rates are not.
    #[arg(long, env = "BCH_WALLET_FEE_RATE", default_value = DEFAULT_FEE_RATE)]
    pub fee_rate: String,
}

fn parse_secret(s: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::from(s))
}
