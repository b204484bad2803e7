//! Bitcoin Cash chain support for the wallet CLI.
//!
//! Provides the network parameter table, WIF key handling, legacy and
//! CashAddr address codecs, fee estimation, single-input P2PKH transaction
//! assembly, SIGHASH_FORKID signing, and a P2PKH script verifier. The
//! `capability` module exposes each of these behind a trait so callers can
//! swap in fakes.

pub mod address;
pub mod capability;
pub mod cashaddr;
pub mod error;
pub mod fee;
pub mod keys;
pub mod network;
pub mod sighash;
pub mod transaction;
pub mod verify;

pub use error::BchError;
pub use network::BchNetwork;
