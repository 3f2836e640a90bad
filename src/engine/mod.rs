//! Pure commission computation.

pub mod commission;

pub use commission::{
    evaluate, parse_amount, CalculationResult, CommissionBreakdown, CommissionError,
    MINIMUM_AMOUNT,
};
