use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive, Zero};

use crate::error::BchError;

/// Fixed factor applied to the fee rate before multiplying by the byte size.
///
/// A rate of `r` charges `trunc(r * FEE_RATE_SCALE * size)` satoshis.
pub const FEE_RATE_SCALE: u64 = 100_000;

/// Default fee rate, as accepted on the command line.
pub const DEFAULT_FEE_RATE: &str = "0.000001";

/// Non-negative decimal fee rate.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeRate(BigDecimal);

impl FeeRate {
    /// Fee in satoshis for a transaction of `size` bytes, truncated toward zero.
    pub fn fee_for_size(&self, size: usize) -> Result<u64, BchError> {
        let fee = self.0.clone() * BigDecimal::from(FEE_RATE_SCALE) * BigDecimal::from(size as u64);
        fee.with_scale(0)
            .to_u64()
            .ok_or_else(|| BchError::InvalidFeeRate(format!("fee for {size} bytes overflows")))
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        // 1e-6
        Self(BigDecimal::new(1.into(), 6))
    }
}

impl FromStr for FeeRate {
    type Err = BchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigDecimal::from_str(s.trim())
            .map_err(|e| BchError::InvalidFeeRate(format!("{s}: {e}")))?;
        if value < BigDecimal::zero() {
            return Err(BchError::InvalidFeeRate(format!("{s}: must not be negative")));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
