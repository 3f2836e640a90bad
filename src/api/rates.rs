use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::AppState;
use crate::domain::{Decimal, Tier};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesResponse {
    pub tiers: Vec<TierDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDto {
    pub key: String,
    pub name: String,
    pub description: String,
    pub payment_methods: Vec<PaymentMethodDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodDto {
    pub key: String,
    pub label: String,
    pub percentage_commission: Decimal,
    pub base_commission: Decimal,
    pub cap_amount: Option<Decimal>,
}

impl From<&Tier> for TierDto {
    fn from(tier: &Tier) -> Self {
        TierDto {
            key: tier.key.to_string(),
            name: tier.name.clone(),
            description: tier.description.clone(),
            payment_methods: tier
                .payment_methods
                .iter()
                .map(|(key, entry)| PaymentMethodDto {
                    key: key.to_string(),
                    label: key.label(),
                    percentage_commission: entry.percentage_commission,
                    base_commission: entry.base_commission,
                    cap_amount: entry.cap_amount,
                })
                .collect(),
        }
    }
}

/// The full rate schedule in table order, for populating tier and method selects.
pub async fn get_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    Json(RatesResponse {
        tiers: state.table.tiers().iter().map(TierDto::from).collect(),
    })
}
