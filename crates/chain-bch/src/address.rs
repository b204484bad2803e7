use std::fmt;

use bitcoin::hashes::Hash;
use bitcoin::{PubkeyHash, ScriptBuf, ScriptHash};

use crate::cashaddr;
use crate::error::BchError;
use crate::network::BchNetwork;

/// Locking-script template an address pays to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    P2pkh,
    P2sh,
}

/// A Bitcoin Cash address: a 20-byte hash, its script template, and the
/// network it belongs to.
///
/// The legacy and CashAddr strings are two renderings of the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub kind: AddressKind,
    pub hash: [u8; 20],
    pub network: BchNetwork,
}

impl Address {
    /// Pay-to-public-key-hash address for `hash` on `network`.
    pub fn p2pkh(hash: PubkeyHash, network: BchNetwork) -> Self {
        Self {
            kind: AddressKind::P2pkh,
            hash: hash.to_byte_array(),
            network,
        }
    }

    /// Legacy base58check encoding.
    pub fn to_legacy(&self) -> String {
        let params = self.network.params();
        let version = match self.kind {
            AddressKind::P2pkh => params.pubkey_hash_version,
            AddressKind::P2sh => params.script_hash_version,
        };
        let mut payload = Vec::with_capacity(21);
        payload.push(version);
        payload.extend_from_slice(&self.hash);
        bs58::encode(payload).with_check().into_string()
    }

    /// CashAddr encoding with the network's prefix.
    pub fn to_cashaddr(&self) -> String {
        let address_type = match self.kind {
            AddressKind::P2pkh => cashaddr::TYPE_P2PKH,
            AddressKind::P2sh => cashaddr::TYPE_P2SH,
        };
        cashaddr::encode(self.network.params().cashaddr_prefix, address_type, &self.hash)
    }

    /// The locking script paying to this address.
    pub fn script_pubkey(&self) -> ScriptBuf {
        match self.kind {
            AddressKind::P2pkh => ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array(self.hash)),
            AddressKind::P2sh => ScriptBuf::new_p2sh(&ScriptHash::from_byte_array(self.hash)),
        }
    }

    /// Decode either encoding and require it to belong to `network`.
    ///
    /// Strings with a `prefix:` part, or starting with the CashAddr type
    /// characters `q`/`p`, are treated as CashAddr; everything else as
    /// base58check.
    pub fn decode(text: &str, network: BchNetwork) -> Result<Self, BchError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BchError::InvalidAddress("empty address".into()));
        }

        let looks_cashaddr =
            text.contains(':') || matches!(text.as_bytes()[0], b'q' | b'p' | b'Q' | b'P');
        if looks_cashaddr {
            Self::from_cashaddr(text, network)
        } else {
            Self::from_legacy(text, network)
        }
    }

    fn from_cashaddr(text: &str, network: BchNetwork) -> Result<Self, BchError> {
        let expected_prefix = network.params().cashaddr_prefix;
        let decoded = cashaddr::decode(text, expected_prefix)?;

        if decoded.prefix != expected_prefix {
            let owner = BchNetwork::from_cashaddr_prefix(&decoded.prefix)
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("unknown prefix '{}'", decoded.prefix));
            return Err(BchError::InvalidAddress(format!(
                "address is for {owner}, expected {network}"
            )));
        }

        let kind = match decoded.address_type {
            cashaddr::TYPE_P2PKH => AddressKind::P2pkh,
            cashaddr::TYPE_P2SH => AddressKind::P2sh,
            other => {
                return Err(BchError::InvalidAddress(format!(
                    "unsupported cashaddr type {other}"
                )))
            }
        };

        Ok(Self {
            kind,
            hash: decoded.hash,
            network,
        })
    }

    fn from_legacy(text: &str, network: BchNetwork) -> Result<Self, BchError> {
        let raw = bs58::decode(text)
            .with_check(None)
            .into_vec()
            .map_err(|e| BchError::InvalidAddress(format!("invalid base58check: {e}")))?;

        if raw.len() != 21 {
            return Err(BchError::InvalidAddress(format!(
                "expected 21 payload bytes, got {}",
                raw.len()
            )));
        }

        let params = network.params();
        let kind = if raw[0] == params.pubkey_hash_version {
            AddressKind::P2pkh
        } else if raw[0] == params.script_hash_version {
            AddressKind::P2sh
        } else {
            return Err(BchError::InvalidAddress(format!(
                "version byte 0x{:02x} does not belong to {network}",
                raw[0]
            )));
        };

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&raw[1..]);
        Ok(Self {
            kind,
            hash,
            network,
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cashaddr())
    }
}
