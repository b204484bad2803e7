use bitcoin::hashes::Hash;
use bitcoin::secp256k1::{Secp256k1, SecretKey};
use bitcoin::{CompressedPublicKey, PrivateKey, PubkeyHash};
use crypto_utils::hash::hash160;
use crypto_utils::random::random_scalar_bytes;
use crypto_utils::zeroizing::SecretString;

use crate::error::BchError;
use crate::network::BchNetwork;

/// Generate a fresh private key for `network` from the OS random source.
///
/// The returned key always uses the compressed-public-key convention.
pub fn generate_private_key(network: BchNetwork) -> Result<PrivateKey, BchError> {
    let bytes = random_scalar_bytes(|candidate| SecretKey::from_slice(candidate).is_ok())?;
    let inner = SecretKey::from_slice(&bytes[..])
        .map_err(|e| BchError::KeyGeneration(format!("invalid secret scalar: {e}")))?;
    Ok(PrivateKey::new(inner, network.params().wif_kind))
}

/// Encode a private key as WIF for `network`, always with the compression flag.
pub fn encode_wif(key: &PrivateKey, network: BchNetwork) -> SecretString {
    let compressed = PrivateKey::new(key.inner, network.params().wif_kind);
    SecretString::new(compressed.to_wif())
}

/// Decode a WIF private key and check that it belongs to `network`.
///
/// Testnet and regtest share the same WIF prefix, so a testnet key is
/// accepted on regtest and vice versa.
pub fn decode_wif(wif: &str, network: BchNetwork) -> Result<PrivateKey, BchError> {
    let key = PrivateKey::from_wif(wif.trim())
        .map_err(|e| BchError::InvalidPrivateKey(format!("failed to decode WIF: {e}")))?;

    if key.network != network.params().wif_kind {
        return Err(BchError::InvalidPrivateKey(format!(
            "WIF key does not belong to {network}"
        )));
    }
    Ok(key)
}

/// Derive the compressed public key regardless of the WIF compression flag.
pub fn compressed_public_key(key: &PrivateKey) -> CompressedPublicKey {
    let secp = Secp256k1::signing_only();
    CompressedPublicKey(key.inner.public_key(&secp))
}

/// Hash160 of the compressed public key: the P2PKH address payload.
pub fn pubkey_hash(key: &PrivateKey) -> PubkeyHash {
    let pubkey = compressed_public_key(key);
    PubkeyHash::from_byte_array(hash160(&pubkey.to_bytes()))
}
