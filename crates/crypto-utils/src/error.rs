use thiserror::Error;

/// Cryptographic utility errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("random source unavailable: {0}")]
    RandomUnavailable(String),

    #[error("no valid scalar after {0} draws")]
    ScalarRejected(usize),
}
