//! `newaddress`: draw a fresh key and render its addresses.

use anyhow::{bail, Context, Result};
use chain_bch::address::Address;
use chain_bch::capability::{AddressCodec, KeyGenerator};
use chain_bch::keys::{encode_wif, pubkey_hash};
use chain_bch::BchNetwork;
use crypto_utils::zeroizing::SecretString;
use serde::{Serialize, Serializer};
use tracing::debug;

pub const USAGE: &str = "Usage: newaddress mainnet/testnet/regtest";

/// A generated key and the two encodings of its P2PKH address.
#[derive(Debug, Serialize)]
pub struct GeneratedAddress {
    pub network: String,
    #[serde(serialize_with = "expose_secret")]
    pub private_key: SecretString,
    pub legacy_address: String,
    pub cash_address: String,
}

fn expose_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret)
}

/// Generate a key for the single network named in `args`.
///
/// Exactly one network name is accepted. The key is returned as
/// compressed WIF; it is not stored anywhere.
pub fn generate_address<K: KeyGenerator, C: AddressCodec>(
    args: &[String],
    keys: &K,
    codec: &C,
) -> Result<GeneratedAddress> {
    let [name] = args else {
        bail!(USAGE);
    };
    let network = BchNetwork::from_name(name)?;

    let key = keys
        .generate(network)
        .context("create private key failed")?;
    let address = Address::p2pkh(pubkey_hash(&key), network);
    debug!(%network, "generated new key");

    Ok(GeneratedAddress {
        network: network.to_string(),
        private_key: encode_wif(&key, network),
        legacy_address: codec.encode_legacy(&address),
        cash_address: codec.encode_cashaddr(&address),
    })
}
