//! CashAddr codec.
//!
//! CashAddr is a bech32-family encoding: `prefix:payload`, where the payload
//! is base32 over `version || hash` followed by an 8-character (40-bit) BCH
//! checksum. Unlike bech32 the prefix contributes only the low 5 bits of each
//! character to the checksum, and the separator is `:`.

use bech32::{ByteIterExt, Fe32, Fe32IterExt};

use crate::error::BchError;

const CHECKSUM_LEN: usize = 8;

/// Version byte type bits for a P2PKH payload.
pub const TYPE_P2PKH: u8 = 0;
/// Version byte type bits for a P2SH payload.
pub const TYPE_P2SH: u8 = 1;

/// Size bits of a 160-bit hash in the version byte.
const SIZE_160: u8 = 0;

/// A decoded CashAddr string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashAddrPayload {
    pub prefix: String,
    pub address_type: u8,
    pub hash: [u8; 20],
}

/// Encode a 20-byte hash under `prefix` with the given type bits.
pub fn encode(prefix: &str, address_type: u8, hash: &[u8; 20]) -> String {
    let version = (address_type << 3) | SIZE_160;
    let payload: Vec<Fe32> = std::iter::once(version)
        .chain(hash.iter().copied())
        .bytes_to_fes()
        .collect();

    let checksum = polymod(
        prefix_expand(prefix)
            .chain(payload.iter().map(|fe| fe.to_u8()))
            .chain([0u8; CHECKSUM_LEN]),
    );
    // 40 checksum bits are exactly five bytes, so they regroup without padding.
    let checksum_bytes = checksum.to_be_bytes();
    let checksum_fes = checksum_bytes[3..].iter().copied().bytes_to_fes();

    let mut out = String::with_capacity(prefix.len() + 1 + payload.len() + CHECKSUM_LEN);
    out.push_str(prefix);
    out.push(':');
    out.extend(payload.iter().copied().chain(checksum_fes).map(Fe32::to_char));
    out
}

/// Decode a CashAddr string.
///
/// When the string carries no `prefix:` part, `default_prefix` is assumed
/// for the checksum. Mixed-case input is rejected.
pub fn decode(address: &str, default_prefix: &str) -> Result<CashAddrPayload, BchError> {
    let has_lower = address.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = address.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(BchError::InvalidAddress("mixed-case cashaddr".into()));
    }
    let lower = address.to_ascii_lowercase();

    let (prefix, body) = match lower.rsplit_once(':') {
        Some((p, b)) => (p.to_string(), b),
        None => (default_prefix.to_string(), lower.as_str()),
    };
    if prefix.is_empty() {
        return Err(BchError::InvalidAddress("empty cashaddr prefix".into()));
    }
    if body.len() <= CHECKSUM_LEN {
        return Err(BchError::InvalidAddress("cashaddr payload too short".into()));
    }

    let values = body
        .chars()
        .map(|c| {
            Fe32::from_char(c)
                .map_err(|e| BchError::InvalidAddress(format!("invalid cashaddr character: {e}")))
        })
        .collect::<Result<Vec<Fe32>, _>>()?;

    if polymod(prefix_expand(&prefix).chain(values.iter().map(|fe| fe.to_u8()))) != 0 {
        return Err(BchError::InvalidAddress("cashaddr checksum mismatch".into()));
    }

    let data = &values[..values.len() - CHECKSUM_LEN];
    if !padding_is_canonical(data) {
        return Err(BchError::InvalidAddress("invalid cashaddr padding".into()));
    }
    let raw: Vec<u8> = data.iter().copied().fes_to_bytes().collect();

    let (&version, hash) = raw
        .split_first()
        .ok_or_else(|| BchError::InvalidAddress("empty cashaddr payload".into()))?;
    if version & 0x80 != 0 {
        return Err(BchError::InvalidAddress("reserved version bit set".into()));
    }
    if version & 0x07 != SIZE_160 || hash.len() != 20 {
        return Err(BchError::InvalidAddress(format!(
            "unsupported cashaddr hash size ({} bytes)",
            hash.len()
        )));
    }

    let mut out = [0u8; 20];
    out.copy_from_slice(hash);
    Ok(CashAddrPayload {
        prefix,
        address_type: version >> 3,
        hash: out,
    })
}

/// `fes_to_bytes` drops trailing bits; they must be fewer than five and zero.
fn padding_is_canonical(data: &[Fe32]) -> bool {
    let spare = (data.len() * 5) % 8;
    match data.last() {
        _ if spare == 0 => true,
        Some(last) => spare < 5 && last.to_u8() & ((1 << spare) - 1) == 0,
        None => true,
    }
}

fn prefix_expand(prefix: &str) -> impl Iterator<Item = u8> + '_ {
    prefix.bytes().map(|b| b & 0x1f).chain(std::iter::once(0))
}

fn polymod<I: IntoIterator<Item = u8>>(values: I) -> u64 {
    let mut c: u64 = 1;
    for d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        if c0 & 0x01 != 0 {
            c ^= 0x98_f2bc_8e61;
        }
        if c0 & 0x02 != 0 {
            c ^= 0x79_b76d_99e2;
        }
        if c0 & 0x04 != 0 {
            c ^= 0xf3_3e5f_b3c4;
        }
        if c0 & 0x08 != 0 {
            c ^= 0xae_2eab_e2a8;
        }
        if c0 & 0x10 != 0 {
            c ^= 0x1e_4f43_e470;
        }
    }
    c ^ 1
}
