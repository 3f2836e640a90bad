//! Static tiered commission rate table.
//!
//! The table is an ordered mapping tier -> payment method -> [`RateEntry`].
//! Every tier must offer the same payment methods in the same order, so any
//! (tier, method) pair produced by enumerating the table resolves.

use crate::domain::{Decimal, PaymentMethodKey, TierKey};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

/// Rate schedule for one tier and payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEntry {
    /// Percent units: 1.5 means 1.5% of the amount.
    pub percentage_commission: Decimal,
    /// Flat fee in naira added to every transaction.
    pub base_commission: Decimal,
    /// Largest accepted amount; `None` means unlimited.
    pub cap_amount: Option<Decimal>,
}

impl RateEntry {
    pub const fn new(
        percentage_commission: Decimal,
        base_commission: Decimal,
        cap_amount: Option<Decimal>,
    ) -> Self {
        Self {
            percentage_commission,
            base_commission,
            cap_amount,
        }
    }
}

/// A merchant tier and its per-method rates, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub key: TierKey,
    pub name: String,
    pub description: String,
    pub payment_methods: Vec<(PaymentMethodKey, RateEntry)>,
}

impl Tier {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        payment_methods: Vec<(PaymentMethodKey, RateEntry)>,
    ) -> Self {
        Self {
            key: TierKey::new(key),
            name: name.into(),
            description: description.into(),
            payment_methods,
        }
    }

    pub fn payment_method_keys(&self) -> impl Iterator<Item = &PaymentMethodKey> {
        self.payment_methods.iter().map(|(key, _)| key)
    }

    pub fn entry(&self, method: &PaymentMethodKey) -> Option<&RateEntry> {
        self.payment_methods
            .iter()
            .find(|(key, _)| key == method)
            .map(|(_, entry)| entry)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateTableError {
    #[error("Unknown merchant tier: {0}")]
    UnknownTier(String),
    #[error("Unknown payment method {method} for tier {tier}")]
    UnknownPaymentMethod { tier: String, method: String },
    #[error("Rate table has no tiers")]
    Empty,
    #[error("Duplicate tier: {0}")]
    DuplicateTier(String),
    #[error("Duplicate payment method {method} in tier {tier}")]
    DuplicatePaymentMethod { tier: String, method: String },
    #[error("Tier {0} has no payment methods")]
    NoPaymentMethods(String),
    #[error("Tier {tier} payment methods differ from tier {reference}")]
    MismatchedPaymentMethods { tier: String, reference: String },
    #[error("Invalid rate for {tier}/{method}: {reason}")]
    InvalidRate {
        tier: String,
        method: String,
        reason: String,
    },
}

/// Immutable, validated rate table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    tiers: Vec<Tier>,
}

impl RateTable {
    /// Validate and build a table.
    ///
    /// # Errors
    /// Fails if the table is empty, has duplicate keys, tiers with differing
    /// payment-method sets, negative rates or fees, or non-positive caps.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, RateTableError> {
        let reference = tiers.first().ok_or(RateTableError::Empty)?;
        let reference_methods: Vec<&PaymentMethodKey> = reference.payment_method_keys().collect();

        let mut seen_tiers = HashSet::new();
        for tier in &tiers {
            if !seen_tiers.insert(&tier.key) {
                return Err(RateTableError::DuplicateTier(tier.key.to_string()));
            }
            if tier.payment_methods.is_empty() {
                return Err(RateTableError::NoPaymentMethods(tier.key.to_string()));
            }

            let mut seen_methods = HashSet::new();
            for (method, entry) in &tier.payment_methods {
                if !seen_methods.insert(method) {
                    return Err(RateTableError::DuplicatePaymentMethod {
                        tier: tier.key.to_string(),
                        method: method.to_string(),
                    });
                }
                validate_entry(&tier.key, method, entry)?;
            }

            if !tier.payment_method_keys().eq(reference_methods.iter().copied()) {
                return Err(RateTableError::MismatchedPaymentMethods {
                    tier: tier.key.to_string(),
                    reference: reference.key.to_string(),
                });
            }
        }

        Ok(Self { tiers })
    }

    /// The built-in merchant rate schedule, shared for the life of the process.
    pub fn standard() -> &'static RateTable {
        static TABLE: OnceLock<RateTable> = OnceLock::new();
        TABLE.get_or_init(|| RateTable { tiers: standard_tiers() })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn tier_keys(&self) -> impl Iterator<Item = &TierKey> {
        self.tiers.iter().map(|tier| &tier.key)
    }

    pub fn tier(&self, key: &TierKey) -> Result<&Tier, RateTableError> {
        self.tiers
            .iter()
            .find(|tier| &tier.key == key)
            .ok_or_else(|| RateTableError::UnknownTier(key.to_string()))
    }

    pub fn payment_method_keys(
        &self,
        tier: &TierKey,
    ) -> Result<impl Iterator<Item = &PaymentMethodKey>, RateTableError> {
        Ok(self.tier(tier)?.payment_method_keys())
    }

    pub fn first_tier_key(&self) -> &TierKey {
        // Non-empty by construction.
        &self.tiers[0].key
    }

    pub fn first_payment_method_key(
        &self,
        tier: &TierKey,
    ) -> Result<&PaymentMethodKey, RateTableError> {
        // Every validated tier has at least one method.
        Ok(&self.tier(tier)?.payment_methods[0].0)
    }

    pub fn entry(
        &self,
        tier: &TierKey,
        method: &PaymentMethodKey,
    ) -> Result<&RateEntry, RateTableError> {
        self.tier(tier)?
            .entry(method)
            .ok_or_else(|| RateTableError::UnknownPaymentMethod {
                tier: tier.to_string(),
                method: method.to_string(),
            })
    }
}

fn validate_entry(
    tier: &TierKey,
    method: &PaymentMethodKey,
    entry: &RateEntry,
) -> Result<(), RateTableError> {
    let invalid = |reason: &str| RateTableError::InvalidRate {
        tier: tier.to_string(),
        method: method.to_string(),
        reason: reason.to_string(),
    };

    if entry.percentage_commission.is_negative() {
        return Err(invalid("percentage commission must be non-negative"));
    }
    if entry.base_commission.is_negative() {
        return Err(invalid("base commission must be non-negative"));
    }
    if let Some(cap) = entry.cap_amount {
        if cap.is_negative() || cap.is_zero() {
            return Err(invalid("cap amount must be positive"));
        }
    }
    Ok(())
}

fn rate(percent_tenths: i64, base: i64, cap: Option<i64>) -> RateEntry {
    RateEntry::new(
        Decimal::from_parts(percent_tenths, 1),
        Decimal::from_parts(base, 0),
        cap.map(|cap| Decimal::from_parts(cap, 0)),
    )
}

fn methods(
    card: RateEntry,
    bank_transfer: RateEntry,
    ussd: RateEntry,
    wallet: RateEntry,
) -> Vec<(PaymentMethodKey, RateEntry)> {
    vec![
        (PaymentMethodKey::new("card"), card),
        (PaymentMethodKey::new("bankTransfer"), bank_transfer),
        (PaymentMethodKey::new("ussd"), ussd),
        (PaymentMethodKey::new("wallet"), wallet),
    ]
}

fn standard_tiers() -> Vec<Tier> {
    vec![
        Tier::new(
            "standard",
            "Standard",
            "For new merchants",
            methods(
                rate(15, 50, None),
                rate(10, 30, Some(2000)),
                rate(8, 40, None),
                rate(5, 20, Some(1000)),
            ),
        ),
        Tier::new(
            "silver",
            "Silver",
            "For merchants processing ₦5M+ monthly",
            methods(
                rate(13, 50, None),
                rate(8, 25, Some(1500)),
                rate(6, 35, None),
                rate(4, 15, Some(800)),
            ),
        ),
        Tier::new(
            "gold",
            "Gold",
            "For merchants processing ₦20M+ monthly",
            methods(
                rate(11, 40, None),
                rate(6, 20, Some(1000)),
                rate(5, 30, None),
                rate(3, 10, Some(500)),
            ),
        ),
        Tier::new(
            "platinum",
            "Platinum",
            "For enterprise merchants processing ₦100M+ monthly",
            methods(
                rate(9, 30, None),
                rate(4, 15, Some(800)),
                rate(4, 25, None),
                rate(2, 10, Some(300)),
            ),
        ),
    ]
}
