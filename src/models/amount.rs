use crate::error::{PayloadError, Result};
use std::fmt;
use std::str::FromStr;

/// Multiples of 1/8 below this scale to centavos without leaving u64
const MAX_EXACT_EIGHTHS: f64 = (1u64 << 53) as f64;

/// Transaction amount in centavos (1/100 of a peso)
///
/// Stored as an integer so the rendered amount field is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(u64);

impl Amount {
    /// Zero pesos
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from centavos
    pub fn from_centavos(centavos: u64) -> Self {
        Self(centavos)
    }

    /// Create an amount from whole pesos, `None` on overflow
    pub fn from_pesos(pesos: u64) -> Option<Self> {
        pesos.checked_mul(100).map(Self)
    }

    /// Create an amount from a value in major units (pesos)
    ///
    /// Rounds the exact binary value to two fraction digits, the way
    /// fixed-point formatting does: `2.675` is stored as 2.67499.. and gives
    /// `2.67`. Exact ties such as `0.125` round up. Negative, NaN and
    /// infinite values are rejected.
    pub fn from_major(value: f64) -> Result<Self> {
        let invalid = || PayloadError::InvalidAmount(value.to_string());
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        if value == 0.0 {
            return Ok(Self::ZERO);
        }

        // Only odd multiples of 1/8 sit exactly halfway between centavos
        let eighths = value * 8.0;
        if eighths.fract() == 0.0 && eighths < MAX_EXACT_EIGHTHS && eighths % 2.0 == 1.0 {
            let eighths = eighths as u64;
            return Ok(Self((eighths * 25).div_ceil(2)));
        }

        format!("{value:.2}").parse::<Amount>().map_err(|_| invalid())
    }

    /// Amount in centavos
    pub fn centavos(&self) -> u64 {
        self.0
    }

    /// Whole-peso part
    pub fn pesos(&self) -> u64 {
        self.0 / 100
    }

    /// Half of this amount, rounding a split centavo up
    pub fn half(&self) -> Self {
        Self(self.0.div_ceil(2))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Amount {
    type Err = PayloadError;

    /// Parse `1250`, `1250.5`, `1,250.50` or `₱1,250.50`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PayloadError::InvalidAmount(s.to_string());

        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('₱').unwrap_or(trimmed).trim_start();
        let cleaned: String = trimmed.chars().filter(|&c| c != ',').collect();

        let (whole, frac) = match cleaned.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (cleaned.as_str(), ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let pesos: u64 = whole.parse().map_err(|_| invalid())?;
        let centavos = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse::<u64>().map_err(|_| invalid())?,
        };

        pesos
            .checked_mul(100)
            .and_then(|v| v.checked_add(centavos))
            .map(Self)
            .ok_or_else(invalid)
    }
}
