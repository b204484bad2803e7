use std::fmt;
use std::str::FromStr;

use bitcoin::NetworkKind;

use crate::error::BchError;

/// Encoding parameters for one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkParams {
    /// Lowercase network name accepted on the command line.
    pub name: &'static str,
    /// Base58check version byte of P2PKH addresses.
    pub pubkey_hash_version: u8,
    /// Base58check version byte of P2SH addresses.
    pub script_hash_version: u8,
    /// WIF prefix family (0x80 for main, 0xef for test).
    pub wif_kind: NetworkKind,
    /// CashAddr human-readable prefix.
    pub cashaddr_prefix: &'static str,
}

static NETWORKS: [NetworkParams; 3] = [
    NetworkParams {
        name: "mainnet",
        pubkey_hash_version: 0x00,
        script_hash_version: 0x05,
        wif_kind: NetworkKind::Main,
        cashaddr_prefix: "bitcoincash",
    },
    NetworkParams {
        name: "testnet",
        pubkey_hash_version: 0x6f,
        script_hash_version: 0xc4,
        wif_kind: NetworkKind::Test,
        cashaddr_prefix: "bchtest",
    },
    NetworkParams {
        name: "regtest",
        pubkey_hash_version: 0x6f,
        script_hash_version: 0xc4,
        wif_kind: NetworkKind::Test,
        cashaddr_prefix: "bchreg",
    },
];

/// Supported Bitcoin Cash networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BchNetwork {
    Mainnet,
    Testnet,
    Regtest,
}

impl BchNetwork {
    pub const ALL: [BchNetwork; 3] = [BchNetwork::Mainnet, BchNetwork::Testnet, BchNetwork::Regtest];

    /// Return the static encoding parameters for this network.
    pub fn params(self) -> &'static NetworkParams {
        match self {
            BchNetwork::Mainnet => &NETWORKS[0],
            BchNetwork::Testnet => &NETWORKS[1],
            BchNetwork::Regtest => &NETWORKS[2],
        }
    }

    /// Look up a network by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<Self, BchError> {
        let lower = name.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|n| n.params().name == lower)
            .ok_or_else(|| {
                BchError::UnknownNetwork(format!(
                    "'{name}', should select from mainnet/testnet/regtest"
                ))
            })
    }

    /// Find the network owning a CashAddr prefix.
    pub fn from_cashaddr_prefix(prefix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.params().cashaddr_prefix == prefix)
    }
}

impl FromStr for BchNetwork {
    type Err = BchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for BchNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.params().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_names_case_insensitively() {
        assert_eq!("mainnet".parse::<BchNetwork>().unwrap(), BchNetwork::Mainnet);
        assert_eq!("TestNet".parse::<BchNetwork>().unwrap(), BchNetwork::Testnet);
        assert_eq!("REGTEST".parse::<BchNetwork>().unwrap(), BchNetwork::Regtest);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "signet".parse::<BchNetwork>().unwrap_err();
        assert!(matches!(err, BchError::UnknownNetwork(_)));
        assert!(err.to_string().contains("mainnet/testnet/regtest"));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(BchNetwork::from_name("").is_err());
    }

    #[test]
    fn mainnet_versions() {
        let p = BchNetwork::Mainnet.params();
        assert_eq!(p.pubkey_hash_version, 0x00);
        assert_eq!(p.script_hash_version, 0x05);
        assert_eq!(p.wif_kind, NetworkKind::Main);
    }

    #[test]
    fn testnet_and_regtest_share_legacy_versions() {
        let t = BchNetwork::Testnet.params();
        let r = BchNetwork::Regtest.params();
        assert_eq!(t.pubkey_hash_version, r.pubkey_hash_version);
        assert_eq!(t.wif_kind, r.wif_kind);
        assert_ne!(t.cashaddr_prefix, r.cashaddr_prefix);
    }

    #[test]
    fn prefix_lookup() {
        assert_eq!(
            BchNetwork::from_cashaddr_prefix("bchtest"),
            Some(BchNetwork::Testnet)
        );
        assert_eq!(BchNetwork::from_cashaddr_prefix("bc"), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(BchNetwork::Mainnet.to_string(), "mainnet");
        assert_eq!(BchNetwork::Testnet.to_string(), "testnet");
        assert_eq!(BchNetwork::Regtest.to_string(), "regtest");
    }
}
