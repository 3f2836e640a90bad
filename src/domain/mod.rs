//! Domain types for the merchant commission calculator.
//!
//! This module provides:
//! - Exact money handling via the Decimal wrapper
//! - Key primitives: TierKey, PaymentMethodKey
//! - The static, validated tiered RateTable

pub mod decimal;
pub mod primitives;
pub mod rate_table;

pub use decimal::{Decimal, NAIRA};
pub use primitives::{PaymentMethodKey, TierKey};
pub use rate_table::{RateEntry, RateTable, RateTableError, Tier};
