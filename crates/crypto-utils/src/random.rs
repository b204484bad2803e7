use rand::RngCore;
use rand_core::OsRng;

use crate::error::CryptoError;
use crate::zeroizing::SecretKeyBytes;

/// Upper bound on rejection-sampling draws for a secret scalar.
///
/// For secp256k1 a uniformly random 32-byte string is out of range with
/// probability below 2^-127, so hitting this bound means the source is broken.
pub const MAX_SCALAR_DRAWS: usize = 16;

/// Fills a fixed-size array from the OS random source.
///
/// Fails instead of panicking when the source is unavailable.
pub fn try_random_bytes_fixed<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut buf = [0u8; N];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| CryptoError::RandomUnavailable(e.to_string()))?;
    Ok(buf)
}

/// Draws 32 random bytes until `is_valid` accepts them.
///
/// `is_valid` encodes the curve's scalar range check; rejected draws are
/// wiped before the next attempt.
pub fn random_scalar_bytes<F>(is_valid: F) -> Result<SecretKeyBytes, CryptoError>
where
    F: Fn(&[u8; 32]) -> bool,
{
    for _ in 0..MAX_SCALAR_DRAWS {
        let candidate = SecretKeyBytes::new(try_random_bytes_fixed::<32>()?);
        if is_valid(&candidate) {
            return Ok(candidate);
        }
    }
    Err(CryptoError::ScalarRejected(MAX_SCALAR_DRAWS))
}
