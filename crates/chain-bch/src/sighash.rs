//! Replay-protected signature digest (`SIGHASH_FORKID`).
//!
//! Bitcoin Cash signs a BIP143-shaped preimage for every input type, with
//! the FORKID bit set in the sighash type and the fork id (zero) in its
//! upper 24 bits:
//!
//! ```text
//! version || hashPrevouts || hashSequence || outpoint || scriptCode ||
//! value || nSequence || hashOutputs || nLockTime || sighashType
//! ```

use bitcoin::consensus::encode::serialize;
use bitcoin::script::Script;
use bitcoin::{Amount, Transaction};
use crypto_utils::hash::sha256d;

use crate::error::BchError;

pub const SIGHASH_ALL: u32 = 0x01;
pub const SIGHASH_FORKID: u32 = 0x40;
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// The only sighash type this wallet produces.
pub const SIGHASH_ALL_FORKID: u32 = SIGHASH_ALL | SIGHASH_FORKID;

/// Compute the FORKID digest for `input_index`.
///
/// Only the `ALL` base type (without `ANYONECANPAY`) is supported. The
/// FORKID bit is not enforced here so the digest can be cross-checked
/// against plain BIP143; the verifier enforces it.
pub fn forkid_signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    value: Amount,
    sighash_type: u32,
) -> Result<[u8; 32], BchError> {
    if sighash_type & 0x1f != SIGHASH_ALL || sighash_type & SIGHASH_ANYONECANPAY != 0 {
        return Err(BchError::SigningError(format!(
            "unsupported sighash type 0x{sighash_type:02x}"
        )));
    }

    let input = tx.input.get(input_index).ok_or_else(|| {
        BchError::SigningError(format!(
            "input index {input_index} out of range ({} inputs)",
            tx.input.len()
        ))
    })?;

    let mut prevouts = Vec::with_capacity(36 * tx.input.len());
    let mut sequences = Vec::with_capacity(4 * tx.input.len());
    for txin in &tx.input {
        prevouts.extend_from_slice(&serialize(&txin.previous_output));
        sequences.extend_from_slice(&txin.sequence.0.to_le_bytes());
    }

    let mut outputs = Vec::new();
    for txout in &tx.output {
        outputs.extend_from_slice(&serialize(txout));
    }

    let mut preimage = Vec::with_capacity(160 + script_code.len());
    preimage.extend_from_slice(&tx.version.0.to_le_bytes());
    preimage.extend_from_slice(&sha256d(&prevouts));
    preimage.extend_from_slice(&sha256d(&sequences));
    preimage.extend_from_slice(&serialize(&input.previous_output));
    preimage.extend_from_slice(&serialize(&script_code.to_bytes()));
    preimage.extend_from_slice(&value.to_sat().to_le_bytes());
    preimage.extend_from_slice(&input.sequence.0.to_le_bytes());
    preimage.extend_from_slice(&sha256d(&outputs));
    preimage.extend_from_slice(&tx.lock_time.to_consensus_u32().to_le_bytes());
    preimage.extend_from_slice(&sighash_type.to_le_bytes());

    Ok(sha256d(&preimage))
}
