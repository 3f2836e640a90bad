//! Money and rate values backed by rust_decimal.
//!
//! Computed amounts stay at full precision; rounding only happens when a
//! value is rendered for display.

use rust_decimal::{Decimal as RustDecimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency symbol used for every rendered monetary amount.
pub const NAIRA: &str = "₦";

/// Exact decimal for amounts, fees and percentage rates.
///
/// Serializes to a JSON number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    /// Build a value from an integer mantissa and a scale, e.g. `(15, 1)` is 1.5.
    pub fn from_parts(mantissa: i64, scale: u32) -> Self {
        Decimal(RustDecimal::new(mantissa, scale))
    }

    /// Parse a Decimal from a string losslessly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// Normalized form without trailing zeros or exponent: 2000 stays "2000",
    /// 1500.50 becomes "1500.5".
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    /// Round half away from zero to `dp` places.
    pub fn round_dp(&self, dp: u32) -> Self {
        Decimal(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Render with exactly `dp` decimal places ("51.5" -> "51.50").
    ///
    /// Pads with zeros instead of rescaling, since values near the 28-digit
    /// limit cannot hold extra scale.
    pub fn to_fixed(&self, dp: u32) -> String {
        let mut text = self.round_dp(dp).0.to_string();
        let places = text.find('.').map_or(0, |dot| text.len() - dot - 1);
        if dp > 0 && !text.contains('.') {
            text.push('.');
        }
        for _ in places..dp as usize {
            text.push('0');
        }
        text
    }

    /// Currency rendering used for computed outputs: "₦51.50".
    pub fn to_naira(&self) -> String {
        format!("{}{}", NAIRA, self.to_fixed(2))
    }

    /// Largest representable value with the sign of `negative`.
    pub fn saturated(negative: bool) -> Self {
        if negative {
            Decimal(RustDecimal::MIN)
        } else {
            Decimal(RustDecimal::MAX)
        }
    }

    /// Multiply by `10^exp`. `None` when the result leaves the representable range.
    pub fn checked_mul_pow10(&self, exp: i64) -> Option<Self> {
        if self.is_zero() {
            return Some(*self);
        }
        let mut value = self.0;
        if exp >= 0 {
            for _ in 0..exp {
                value = value.checked_mul(RustDecimal::TEN)?;
            }
        } else {
            // Past this many divisions every value has rounded to zero.
            for _ in 0..exp.unsigned_abs().min(64) {
                value = value.checked_div(RustDecimal::TEN)?;
            }
        }
        Some(Decimal(value))
    }

    pub fn inner(&self) -> RustDecimal {
        self.0
    }

    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    pub fn hundred() -> Self {
        Decimal(RustDecimal::ONE_HUNDRED)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    pub fn abs(&self) -> Self {
        Decimal(self.0.abs())
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 * rhs.0)
    }
}

impl std::ops::Div for Decimal {
    type Output = Decimal;

    fn div(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 / rhs.0)
    }
}
