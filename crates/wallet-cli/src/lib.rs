//! # wallet-cli
//!
//! Command handlers behind the `bch-wallet` binary:
//!
//! - `newaddress`: generate a key and its legacy and CashAddr addresses
//! - `spendUnconfirmedUtxo`: sign a one-input, one-output spend of a given output

pub mod cli;
pub mod logging;
pub mod newaddress;
pub mod output;
pub mod spend;

use std::io::Write;

use anyhow::Result;
use chain_bch::capability::{BchAddressCodec, ForkIdSigner, OsKeyGenerator, P2pkhVerifier};

use cli::{Commands, WalletCli};
use output::Console;

/// Execute the parsed command, writing results to `console`.
///
/// Nothing is written to the console's stdout unless the whole command
/// succeeds.
pub fn run<W: Write, E: Write>(cli: &WalletCli, console: &mut Console<W, E>) -> Result<()> {
    match &cli.command {
        Commands::NewAddress(args) => {
            let generated =
                newaddress::generate_address(&args.networks, &OsKeyGenerator, &BchAddressCodec)?;
            if cli.json {
                console.json(&generated)?;
            } else {
                console.field("private key", &generated.private_key)?;
                console.field("base58 encoded address", &generated.legacy_address)?;
                console.field("cashaddr encoded address", &generated.cash_address)?;
            }
        }
        Commands::SpendUnconfirmedUtxo(args) => {
            let signed = spend::spend_unconfirmed_utxo(
                args,
                &BchAddressCodec,
                &ForkIdSigner,
                &P2pkhVerifier::default(),
            )?;
            if cli.json {
                console.json(&signed)?;
            } else {
                console.line(&signed.hex)?;
            }
        }
    }
    Ok(())
}
