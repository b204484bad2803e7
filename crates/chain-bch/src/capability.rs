//! Trait seams over the cryptographic operations, so command flows can be
//! driven by fakes in tests.

use bitcoin::script::Script;
use bitcoin::{Amount, PrivateKey, Transaction};

use crate::address::Address;
use crate::error::BchError;
use crate::keys;
use crate::network::BchNetwork;
use crate::transaction;
use crate::verify::{self, VerifyFlags};

/// Produces fresh private keys.
pub trait KeyGenerator {
    fn generate(&self, network: BchNetwork) -> Result<PrivateKey, BchError>;
}

/// Renders and parses address strings.
pub trait AddressCodec {
    fn encode_legacy(&self, address: &Address) -> String;
    fn encode_cashaddr(&self, address: &Address) -> String;
    fn decode(&self, text: &str, network: BchNetwork) -> Result<Address, BchError>;
}

/// Signs one input of a transaction in place.
pub trait TransactionSigner {
    fn sign_input(
        &self,
        tx: &mut Transaction,
        input_index: usize,
        script_code: &Script,
        value: Amount,
        key: &PrivateKey,
    ) -> Result<(), BchError>;
}

/// Checks that a signed input satisfies its locking script.
pub trait ScriptVerifier {
    fn verify_input(
        &self,
        tx: &Transaction,
        input_index: usize,
        script_pubkey: &Script,
        value: Amount,
    ) -> Result<(), BchError>;
}

/// Keys drawn from the operating system's random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsKeyGenerator;

impl KeyGenerator for OsKeyGenerator {
    fn generate(&self, network: BchNetwork) -> Result<PrivateKey, BchError> {
        keys::generate_private_key(network)
    }
}

/// Legacy base58check and CashAddr codecs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BchAddressCodec;

impl AddressCodec for BchAddressCodec {
    fn encode_legacy(&self, address: &Address) -> String {
        address.to_legacy()
    }

    fn encode_cashaddr(&self, address: &Address) -> String {
        address.to_cashaddr()
    }

    fn decode(&self, text: &str, network: BchNetwork) -> Result<Address, BchError> {
        Address::decode(text, network)
    }
}

/// `SIGHASH_ALL | SIGHASH_FORKID` P2PKH signer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForkIdSigner;

impl TransactionSigner for ForkIdSigner {
    fn sign_input(
        &self,
        tx: &mut Transaction,
        input_index: usize,
        script_code: &Script,
        value: Amount,
        key: &PrivateKey,
    ) -> Result<(), BchError> {
        transaction::sign_p2pkh_input(tx, input_index, script_code, value, key)
    }
}

/// P2PKH verifier with configurable flags.
#[derive(Debug, Clone, Copy)]
pub struct P2pkhVerifier {
    pub flags: VerifyFlags,
}

impl Default for P2pkhVerifier {
    fn default() -> Self {
        Self {
            flags: VerifyFlags::STANDARD,
        }
    }
}

impl ScriptVerifier for P2pkhVerifier {
    fn verify_input(
        &self,
        tx: &Transaction,
        input_index: usize,
        script_pubkey: &Script,
        value: Amount,
    ) -> Result<(), BchError> {
        verify::verify_p2pkh_input(tx, input_index, script_pubkey, value, self.flags)
    }
}
