//! Domain primitives: TierKey, PaymentMethodKey.

use serde::{Deserialize, Serialize};

/// Merchant tier identifier (e.g. "standard", "gold").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TierKey(pub String);

impl TierKey {
    pub fn new(key: impl Into<String>) -> Self {
        TierKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TierKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payment channel identifier (e.g. "card", "bankTransfer").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PaymentMethodKey(pub String);

impl PaymentMethodKey {
    pub fn new(key: impl Into<String>) -> Self {
        PaymentMethodKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human label derived from the camelCase key: "bankTransfer" -> "Bank Transfer".
    pub fn label(&self) -> String {
        let mut label = String::with_capacity(self.0.len() + 4);
        for (i, c) in self.0.chars().enumerate() {
            if i == 0 {
                label.extend(c.to_uppercase());
            } else if c.is_ascii_uppercase() {
                label.push(' ');
                label.push(c);
            } else {
                label.push(c);
            }
        }
        label
    }
}

impl std::fmt::Display for PaymentMethodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
