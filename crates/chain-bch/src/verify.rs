//! Verification of a signed P2PKH input.
//!
//! Runs the fixed P2PKH program
//! `<sig> <pubkey> | OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
//! against the unlocking script of one input, with the standardness checks
//! selected by `VerifyFlags`.

use std::ops::BitOr;

use bitcoin::script::{Instruction, Script};
use bitcoin::secp256k1::ecdsa::Signature;
use bitcoin::secp256k1::{Message, PublicKey, Secp256k1};
use bitcoin::{Amount, Transaction};
use crypto_utils::hash::hash160;
use tracing::debug;

use crate::error::BchError;
use crate::sighash::{forkid_signature_hash, SIGHASH_FORKID};

/// Script verification flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyFlags(u32);

impl VerifyFlags {
    pub const NONE: Self = Self(0);
    /// Signatures must be strict DER.
    pub const STRICT_DER: Self = Self(1 << 0);
    /// Signatures must have S in the lower half of the curve order.
    pub const LOW_S: Self = Self(1 << 1);
    /// Public keys must be 33-byte compressed or 65-byte uncompressed SEC1.
    pub const STRICT_PUBKEY: Self = Self(1 << 2);
    /// Signatures must carry `SIGHASH_FORKID`.
    pub const FORKID: Self = Self(1 << 3);
    /// The unlocking script may contain only data pushes.
    pub const SIG_PUSH_ONLY: Self = Self(1 << 4);
    /// Exactly the two P2PKH items may be on the stack.
    pub const CLEAN_STACK: Self = Self(1 << 5);

    pub const STANDARD: Self = Self(
        Self::STRICT_DER.0
            | Self::LOW_S.0
            | Self::STRICT_PUBKEY.0
            | Self::FORKID.0
            | Self::SIG_PUSH_ONLY.0
            | Self::CLEAN_STACK.0,
    );

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for VerifyFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

fn fail(reason: impl Into<String>) -> BchError {
    BchError::VerificationFailed(reason.into())
}

/// Verify that input `input_index` of `tx` validly spends an output locked
/// by the P2PKH `script_pubkey` holding `value`.
pub fn verify_p2pkh_input(
    tx: &Transaction,
    input_index: usize,
    script_pubkey: &Script,
    value: Amount,
    flags: VerifyFlags,
) -> Result<(), BchError> {
    let input = tx
        .input
        .get(input_index)
        .ok_or_else(|| fail(format!("input index {input_index} out of range")))?;

    if !script_pubkey.is_p2pkh() {
        return Err(fail("locking script is not P2PKH"));
    }
    let expected_hash = &script_pubkey.as_bytes()[3..23];

    let mut stack: Vec<&[u8]> = Vec::new();
    for instruction in input.script_sig.instructions() {
        match instruction.map_err(|e| fail(format!("malformed unlocking script: {e}")))? {
            Instruction::PushBytes(bytes) => stack.push(bytes.as_bytes()),
            Instruction::Op(op) if flags.contains(VerifyFlags::SIG_PUSH_ONLY) => {
                return Err(fail(format!("unlocking script is not push-only ({op})")));
            }
            Instruction::Op(op) => {
                return Err(fail(format!("unsupported opcode {op} in unlocking script")));
            }
        }
    }

    if stack.len() < 2 {
        return Err(fail(format!("stack underflow ({} items)", stack.len())));
    }
    if flags.contains(VerifyFlags::CLEAN_STACK) && stack.len() != 2 {
        return Err(fail(format!("stack not clean ({} items)", stack.len())));
    }
    let pubkey_bytes = stack[stack.len() - 1];
    let sig_bytes = stack[stack.len() - 2];

    // OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY
    if hash160(pubkey_bytes).as_slice() != expected_hash {
        return Err(fail("public key does not match locking script hash"));
    }

    // OP_CHECKSIG
    if flags.contains(VerifyFlags::STRICT_PUBKEY) {
        let well_formed = match pubkey_bytes.len() {
            33 => matches!(pubkey_bytes[0], 0x02 | 0x03),
            65 => pubkey_bytes[0] == 0x04,
            _ => false,
        };
        if !well_formed {
            return Err(fail("non-canonical public key encoding"));
        }
    }
    let pubkey = PublicKey::from_slice(pubkey_bytes)
        .map_err(|e| fail(format!("invalid public key: {e}")))?;

    let (&sighash_byte, der) = sig_bytes
        .split_last()
        .ok_or_else(|| fail("empty signature"))?;
    let sighash_type = u32::from(sighash_byte);

    let has_forkid = sighash_type & SIGHASH_FORKID != 0;
    if flags.contains(VerifyFlags::FORKID) && !has_forkid {
        return Err(fail("signature lacks SIGHASH_FORKID"));
    }
    if !has_forkid {
        return Err(fail("legacy (non-FORKID) signatures are not supported"));
    }

    let mut signature = if flags.contains(VerifyFlags::STRICT_DER) {
        Signature::from_der(der)
    } else {
        Signature::from_der_lax(der)
    }
    .map_err(|e| fail(format!("invalid signature encoding: {e}")))?;

    let mut normalized = signature;
    normalized.normalize_s();
    if normalized != signature {
        if flags.contains(VerifyFlags::LOW_S) {
            return Err(fail("signature S value is not low"));
        }
        signature = normalized;
    }

    let digest = forkid_signature_hash(tx, input_index, script_pubkey, value, sighash_type)
        .map_err(|e| fail(e.to_string()))?;

    let secp = Secp256k1::verification_only();
    secp.verify_ecdsa(&Message::from_digest(digest), &signature, &pubkey)
        .map_err(|e| fail(format!("signature check failed: {e}")))?;

    debug!(input_index, "input signature verified");
    Ok(())
}
