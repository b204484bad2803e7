//! # crypto-utils
//!
//! Secure random generation, zeroizing secret holders, and the two hash
//! compositions (hash160, double SHA-256) used by the wallet.

pub mod error;
pub mod hash;
pub mod random;
pub mod zeroizing;

pub use error::CryptoError;
