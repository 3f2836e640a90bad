use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::{Decimal, PaymentMethodKey, TierKey};
use crate::engine::{evaluate, parse_amount, CalculationResult, CommissionBreakdown};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionQuery {
    /// Raw form input; coerced like a numeric field, so junk becomes 0.
    pub amount: Option<String>,
    pub tier: Option<String>,
    pub payment_method: Option<String>,
}

/// Evaluation outcome. Validation errors are a normal result, not an HTTP error.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CommissionResponse {
    Error {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Ok {
        tier: String,
        payment_method: String,
        amount: String,
        percentage_commission: String,
        base_commission: String,
        commission_fee: String,
        merchant_earnings: String,
        display: BreakdownDisplay,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownDisplay {
    pub percentage_commission: String,
    pub base_commission: String,
    pub commission_fee: String,
    pub merchant_earnings: String,
}

impl CommissionResponse {
    fn from_result(result: CalculationResult, tier: &TierKey, method: &PaymentMethodKey) -> Self {
        match result {
            CalculationResult::Error(err) => CommissionResponse::Error {
                message: err.to_string(),
            },
            CalculationResult::Ok(breakdown) => ok_response(&breakdown, tier, method),
        }
    }
}

fn ok_response(
    breakdown: &CommissionBreakdown,
    tier: &TierKey,
    method: &PaymentMethodKey,
) -> CommissionResponse {
    CommissionResponse::Ok {
        tier: tier.to_string(),
        payment_method: method.to_string(),
        amount: breakdown.amount.to_canonical_string(),
        percentage_commission: breakdown.percentage_commission.inner().to_string(),
        base_commission: breakdown.base_commission.to_canonical_string(),
        commission_fee: breakdown.commission_fee.to_fixed(2),
        merchant_earnings: breakdown.merchant_earnings.to_fixed(2),
        display: BreakdownDisplay {
            percentage_commission: breakdown.percentage_display(),
            base_commission: breakdown.base_commission_display(),
            commission_fee: breakdown.commission_fee_display(),
            merchant_earnings: breakdown.merchant_earnings_display(),
        },
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Evaluate one form submission. Missing tier and method fall back to the
/// table's first entries, mirroring the form's initial selection.
pub async fn get_commission(
    Query(params): Query<CommissionQuery>,
    State(state): State<AppState>,
) -> Result<Json<CommissionResponse>, AppError> {
    let table = state.table.as_ref();

    let tier = match non_empty(params.tier.as_deref()) {
        Some(t) => TierKey::new(t),
        None => table.first_tier_key().clone(),
    };
    let method = match non_empty(params.payment_method.as_deref()) {
        Some(m) => PaymentMethodKey::new(m),
        None => table.first_payment_method_key(&tier)?.clone(),
    };
    let amount = params
        .amount
        .as_deref()
        .map(parse_amount)
        .unwrap_or_else(Decimal::zero);

    // Reject unknown keys even when the minimum-amount rule would short-circuit.
    table.entry(&tier, &method)?;

    let result = evaluate(amount, &tier, &method, table)?;
    Ok(Json(CommissionResponse::from_result(result, &tier, &method)))
}
