use thiserror::Error;

/// Bitcoin Cash chain operation errors.
#[derive(Debug, Error)]
pub enum BchError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("key generation error: {0}")]
    KeyGeneration(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid transaction hash: {0}")]
    InvalidTxid(String),

    #[error("invalid fee rate: {0}")]
    InvalidFeeRate(String),

    #[error("fee {fee} sat is not below input value {value} sat")]
    InsufficientValue { value: u64, fee: u64 },

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("script verification failed: {0}")]
    VerificationFailed(String),
}

impl From<crypto_utils::CryptoError> for BchError {
    fn from(e: crypto_utils::CryptoError) -> Self {
        BchError::KeyGeneration(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_network() {
        let err = BchError::UnknownNetwork("signet".into());
        assert_eq!(err.to_string(), "unknown network: signet");
    }

    #[test]
    fn display_invalid_private_key() {
        let err = BchError::InvalidPrivateKey("bad checksum".into());
        assert_eq!(err.to_string(), "invalid private key: bad checksum");
    }

    #[test]
    fn display_insufficient_value() {
        let err = BchError::InsufficientValue { value: 10, fee: 19 };
        assert_eq!(err.to_string(), "fee 19 sat is not below input value 10 sat");
    }

    #[test]
    fn display_verification_failed() {
        let err = BchError::VerificationFailed("signature mismatch".into());
        assert_eq!(
            err.to_string(),
            "script verification failed: signature mismatch"
        );
    }

    #[test]
    fn crypto_error_maps_to_key_generation() {
        let err: BchError =
            crypto_utils::CryptoError::RandomUnavailable("no entropy".into()).into();
        assert!(matches!(err, BchError::KeyGeneration(_)));
        assert!(err.to_string().contains("no entropy"));
    }

    #[test]
    fn debug_format_works() {
        let err = BchError::SigningError("fail".into());
        let debug = format!("{:?}", err);
        assert!(debug.contains("SigningError"));
    }
}
