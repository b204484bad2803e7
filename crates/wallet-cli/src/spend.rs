//! `spendUnconfirmedUtxo`: sign a transaction that moves one output, minus
//! the fee, to one address.
//!
//! The output is taken on trust from the caller. It may still be in the
//! mempool; nothing here queries a node or broadcasts.

use anyhow::{bail, Context, Result};
use chain_bch::address::Address;
use chain_bch::capability::{AddressCodec, ScriptVerifier, TransactionSigner};
use chain_bch::fee::FeeRate;
use chain_bch::keys::{decode_wif, pubkey_hash};
use chain_bch::transaction::{self, AssemblyConfig, UnspentOutput};
use chain_bch::BchNetwork;
use serde::Serialize;
use tracing::debug;

use crate::cli::SpendArgs;

pub const NOT_ENOUGH_ARGUMENTS: &str = "arguments are not enough (privkey/to/hash/value required)";

/// A signed, self-verified spend ready for broadcast.
#[derive(Debug, Clone, Serialize)]
pub struct SignedSpend {
    pub txid: String,
    /// Fee in satoshis.
    pub fee: u64,
    /// Value paid to the destination in satoshis.
    pub output_value: u64,
    /// Wire-format transaction.
    pub hex: String,
}

/// Run the spend pipeline for `args`.
///
/// Any failure aborts before a transaction is returned, so a signature that
/// does not verify is never handed back to the caller.
pub fn spend_unconfirmed_utxo<C, S, V>(
    args: &SpendArgs,
    codec: &C,
    signer: &S,
    verifier: &V,
) -> Result<SignedSpend>
where
    C: AddressCodec,
    S: TransactionSigner,
    V: ScriptVerifier,
{
    let privkey = args.privkey.as_deref().unwrap_or_default();
    let to = args.to.as_deref().unwrap_or_default();
    let hash = args.hash.as_deref().unwrap_or_default();
    if privkey.is_empty() || to.is_empty() || hash.is_empty() || args.value == 0 {
        bail!(NOT_ENOUGH_ARGUMENTS);
    }

    let network = BchNetwork::from_name(&args.network)?;
    let fee_rate: FeeRate = args.fee_rate.parse().context("invalid fee rate")?;

    let utxo = UnspentOutput::parse(hash, args.idx, args.value)
        .context("not a valid transaction hash")?;
    let key = decode_wif(privkey, network).context("private key format error")?;

    let sender = Address::p2pkh(pubkey_hash(&key), network);
    let sender_script = sender.script_pubkey();
    debug!(%sender, txid = %utxo.txid, vout = utxo.vout, "spending output");

    let destination = codec
        .decode(to, network)
        .context("invalid destination address")?;
    debug!(%destination, "resolved destination");

    let config = AssemblyConfig::new(fee_rate);
    let mut unsigned = transaction::assemble(&utxo, &destination.script_pubkey(), &config)
        .context("assemble transaction failed")?;

    signer
        .sign_input(&mut unsigned.tx, 0, &sender_script, utxo.value, &key)
        .context("sign transaction failed")?;
    verifier
        .verify_input(&unsigned.tx, 0, &sender_script, utxo.value)
        .context("verify transaction failed")?;

    let txid = unsigned.tx.compute_txid().to_string();
    debug!(%txid, fee = unsigned.fee.to_sat(), "transaction signed and verified");

    Ok(SignedSpend {
        txid,
        fee: unsigned.fee.to_sat(),
        output_value: unsigned.tx.output[0].value.to_sat(),
        hex: transaction::to_hex(&unsigned.tx),
    })
}
