pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod form;

pub use config::Config;
pub use domain::{Decimal, PaymentMethodKey, RateEntry, RateTable, RateTableError, Tier, TierKey};
pub use engine::{evaluate, parse_amount, CalculationResult, CommissionBreakdown, CommissionError};
pub use error::AppError;
pub use form::CalculatorForm;
