//! Calculator form state.
//!
//! Holds the latest input and re-derives the result synchronously on every
//! change. There is no cached or deferred computation.

use crate::domain::{Decimal, PaymentMethodKey, RateTable, RateTableError, TierKey};
use crate::engine::{evaluate, parse_amount, CalculationResult};

/// Amount shown when the form first opens.
pub const DEFAULT_AMOUNT: i64 = 100;

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct CalculatorForm<'a> {
    table: &'a RateTable,
    amount: Decimal,
    tier: TierKey,
    payment_method: PaymentMethodKey,
    result: CalculationResult,
}

impl<'a> CalculatorForm<'a> {
    /// Open the form on the table's first tier and that tier's first method.
    pub fn new(table: &'a RateTable) -> Result<Self, RateTableError> {
        let tier = table.first_tier_key().clone();
        let payment_method = table.first_payment_method_key(&tier)?.clone();
        let amount = Decimal::from(DEFAULT_AMOUNT);
        let result = evaluate(amount, &tier, &payment_method, table)?;
        Ok(Self {
            table,
            amount,
            tier,
            payment_method,
            result,
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn tier(&self) -> &TierKey {
        &self.tier
    }

    pub fn payment_method(&self) -> &PaymentMethodKey {
        &self.payment_method
    }

    pub fn result(&self) -> &CalculationResult {
        &self.result
    }

    /// Apply raw amount input. Non-numeric input counts as 0.
    pub fn set_amount(&mut self, raw: &str) -> Result<&CalculationResult, RateTableError> {
        self.amount = parse_amount(raw);
        self.recompute()
    }

    /// Switch tier; the payment method resets to the new tier's first one.
    pub fn select_tier(&mut self, tier: &TierKey) -> Result<&CalculationResult, RateTableError> {
        let payment_method = self.table.first_payment_method_key(tier)?.clone();
        self.tier = tier.clone();
        self.payment_method = payment_method;
        self.recompute()
    }

    pub fn select_payment_method(
        &mut self,
        method: &PaymentMethodKey,
    ) -> Result<&CalculationResult, RateTableError> {
        self.table.entry(&self.tier, method)?;
        self.payment_method = method.clone();
        self.recompute()
    }

    pub fn tier_options(&self) -> Vec<SelectOption> {
        self.table
            .tiers()
            .iter()
            .map(|tier| SelectOption {
                value: tier.key.to_string(),
                label: tier.name.clone(),
            })
            .collect()
    }

    pub fn payment_method_options(&self) -> Vec<SelectOption> {
        self.table
            .tier(&self.tier)
            .map(|tier| {
                tier.payment_method_keys()
                    .map(|key| SelectOption {
                        value: key.to_string(),
                        label: key.label(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Text rendering of the breakdown panel.
    pub fn render(&self) -> String {
        match &self.result {
            CalculationResult::Error(err) => err.to_string(),
            CalculationResult::Ok(breakdown) => [
                format!("Percentage Commission: {}", breakdown.percentage_display()),
                format!("Base Commission: {}", breakdown.base_commission_display()),
                format!("Commission Fee: {}", breakdown.commission_fee_display()),
                format!(
                    "Amount Merchant Earns: {}",
                    breakdown.merchant_earnings_display()
                ),
            ]
            .join("\n"),
        }
    }

    fn recompute(&mut self) -> Result<&CalculationResult, RateTableError> {
        self.result = evaluate(self.amount, &self.tier, &self.payment_method, self.table)?;
        Ok(&self.result)
    }
}
