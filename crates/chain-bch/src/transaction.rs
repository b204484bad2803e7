use std::str::FromStr;

use bitcoin::absolute::LockTime;
use bitcoin::consensus::encode::{serialize, serialize_hex};
use bitcoin::script::{Builder, PushBytesBuf, Script};
use bitcoin::secp256k1::{Message, Secp256k1};
use bitcoin::transaction::Version;
use bitcoin::{
    Amount, CompressedPublicKey, OutPoint, PrivateKey, ScriptBuf, Sequence, Transaction, TxIn,
    TxOut, Txid, Witness,
};
use tracing::debug;

use crate::error::BchError;
use crate::fee::FeeRate;
use crate::keys::compressed_public_key;
use crate::sighash::{forkid_signature_hash, SIGHASH_ALL_FORKID};

/// Assumed scriptSig length when sizing an unsigned transaction: a typical
/// DER signature plus sighash byte and a compressed-key push.
pub const PLACEHOLDER_SCRIPT_SIG_LEN: usize = 107;

/// Knobs for `assemble`, passed explicitly rather than read from globals.
#[derive(Debug, Clone)]
pub struct AssemblyConfig {
    /// Bytes added to the unsigned size to account for the unlocking script.
    pub placeholder_script_sig_len: usize,
    /// Sequence number of the single input.
    pub sequence: Sequence,
    pub fee_rate: FeeRate,
}

impl AssemblyConfig {
    pub fn new(fee_rate: FeeRate) -> Self {
        Self {
            placeholder_script_sig_len: PLACEHOLDER_SCRIPT_SIG_LEN,
            sequence: Sequence::MAX,
            fee_rate,
        }
    }
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self::new(FeeRate::default())
    }
}

/// A caller-described output to spend. Nothing checks that it exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnspentOutput {
    pub txid: Txid,
    pub vout: u32,
    pub value: Amount,
}

impl UnspentOutput {
    /// Parse a txid in display (big-endian hex) order.
    pub fn parse(txid: &str, vout: u32, value_sat: u64) -> Result<Self, BchError> {
        let txid = Txid::from_str(txid.trim())
            .map_err(|e| BchError::InvalidTxid(format!("{txid}: {e}")))?;
        Ok(Self {
            txid,
            vout,
            value: Amount::from_sat(value_sat),
        })
    }

    pub fn outpoint(&self) -> OutPoint {
        OutPoint::new(self.txid, self.vout)
    }
}

/// A one-input, one-output transaction with its fee settled but no signature.
#[derive(Debug, Clone)]
pub struct UnsignedSpend {
    pub tx: Transaction,
    pub input_value: Amount,
    pub fee: Amount,
    /// Size the fee was computed from.
    pub estimated_size: usize,
}

/// Serialized size of `tx` plus the placeholder unlocking script.
pub fn estimated_size(tx: &Transaction, placeholder_script_sig_len: usize) -> usize {
    serialize(tx).len() + placeholder_script_sig_len
}

/// Build the unsigned spend of `utxo` to `destination`.
///
/// The output pays `utxo.value - fee`. Fails with `InsufficientValue` when
/// the fee would consume the whole input.
pub fn assemble(
    utxo: &UnspentOutput,
    destination: &Script,
    config: &AssemblyConfig,
) -> Result<UnsignedSpend, BchError> {
    let mut tx = Transaction {
        version: Version::ONE,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: utxo.outpoint(),
            script_sig: ScriptBuf::new(),
            sequence: config.sequence,
            witness: Witness::default(),
        }],
        output: vec![TxOut {
            value: Amount::ZERO,
            script_pubkey: destination.to_owned(),
        }],
    };

    let size = estimated_size(&tx, config.placeholder_script_sig_len);
    let fee = config.fee_rate.fee_for_size(size)?;
    let value = utxo.value.to_sat();
    if fee >= value {
        return Err(BchError::InsufficientValue { value, fee });
    }

    tx.output[0].value = Amount::from_sat(value - fee);
    debug!(size, fee, output = value - fee, "assembled unsigned spend");

    Ok(UnsignedSpend {
        tx,
        input_value: utxo.value,
        fee: Amount::from_sat(fee),
        estimated_size: size,
    })
}

/// `<signature> <pubkey>` unlocking script for a P2PKH input.
pub fn p2pkh_script_sig(
    signature: Vec<u8>,
    pubkey: &CompressedPublicKey,
) -> Result<ScriptBuf, BchError> {
    let sig = PushBytesBuf::try_from(signature)
        .map_err(|e| BchError::SigningError(format!("signature push too large: {e}")))?;
    let key = PushBytesBuf::try_from(pubkey.to_bytes().to_vec())
        .map_err(|e| BchError::SigningError(format!("public key push too large: {e}")))?;
    Ok(Builder::new().push_slice(sig).push_slice(key).into_script())
}

/// Sign `input_index` with `SIGHASH_ALL | SIGHASH_FORKID` and install the
/// P2PKH unlocking script.
///
/// `script_code` is the locking script of the output being spent and
/// `value` its amount; both are committed to by the digest.
pub fn sign_p2pkh_input(
    tx: &mut Transaction,
    input_index: usize,
    script_code: &Script,
    value: Amount,
    key: &PrivateKey,
) -> Result<(), BchError> {
    let digest = forkid_signature_hash(tx, input_index, script_code, value, SIGHASH_ALL_FORKID)?;

    let secp = Secp256k1::signing_only();
    let signature = secp.sign_ecdsa(&Message::from_digest(digest), &key.inner);

    let mut sig_bytes = signature.serialize_der().to_vec();
    sig_bytes.push(SIGHASH_ALL_FORKID as u8);

    let script_sig = p2pkh_script_sig(sig_bytes, &compressed_public_key(key))?;
    tx.input[input_index].script_sig = script_sig;
    Ok(())
}

/// Wire-format hex of a (signed) transaction.
pub fn to_hex(tx: &Transaction) -> String {
    serialize_hex(tx)
}
