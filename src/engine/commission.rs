//! Commission evaluation over the rate table.
//!
//! Rules apply in order and the first match wins:
//! 1. amounts below [`MINIMUM_AMOUNT`] are rejected,
//! 2. amounts above the selected method's cap (if any) are rejected,
//! 3. otherwise fee = percent/100 * amount + base, earnings = amount - fee.

use crate::domain::{Decimal, PaymentMethodKey, RateTable, RateTableError, TierKey};
use thiserror::Error;

/// Smallest accepted transaction amount, in naira.
pub const MINIMUM_AMOUNT: i64 = 100;

/// User-correctable validation failures. Both are fixed by changing the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommissionError {
    #[error("Transaction amount must be at least ₦{minimum}.")]
    BelowMinimum { minimum: Decimal },
    /// The cap renders as its bare stored value ("₦1000"), not as currency.
    #[error("Amount for this payment method cannot exceed ₦{cap}.")]
    ExceedsCap { cap: Decimal },
}

/// Computed fee breakdown. Fee and earnings keep full precision; the
/// `*_display` helpers round to two places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionBreakdown {
    pub amount: Decimal,
    pub percentage_commission: Decimal,
    pub base_commission: Decimal,
    pub commission_fee: Decimal,
    pub merchant_earnings: Decimal,
}

impl CommissionBreakdown {
    pub fn commission_fee_rounded(&self) -> Decimal {
        self.commission_fee.round_dp(2)
    }

    pub fn merchant_earnings_rounded(&self) -> Decimal {
        self.merchant_earnings.round_dp(2)
    }

    /// "1.5%", keeping the stored scale.
    pub fn percentage_display(&self) -> String {
        format!("{}%", self.percentage_commission.inner())
    }

    pub fn base_commission_display(&self) -> String {
        self.base_commission.to_naira()
    }

    pub fn commission_fee_display(&self) -> String {
        self.commission_fee.to_naira()
    }

    pub fn merchant_earnings_display(&self) -> String {
        self.merchant_earnings.to_naira()
    }
}

/// Outcome of one evaluation: exactly one of a breakdown or a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationResult {
    Error(CommissionError),
    Ok(CommissionBreakdown),
}

impl CalculationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, CalculationResult::Ok(_))
    }

    pub fn breakdown(&self) -> Option<&CommissionBreakdown> {
        match self {
            CalculationResult::Ok(breakdown) => Some(breakdown),
            CalculationResult::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&CommissionError> {
        match self {
            CalculationResult::Error(err) => Some(err),
            CalculationResult::Ok(_) => None,
        }
    }
}

/// Evaluate the commission for `amount` under `tier` / `method`.
///
/// # Errors
/// Returns `RateTableError` only when a key is not in `table`; keys taken
/// from the table's own enumeration always resolve.
pub fn evaluate(
    amount: Decimal,
    tier: &TierKey,
    method: &PaymentMethodKey,
    table: &RateTable,
) -> Result<CalculationResult, RateTableError> {
    let minimum = Decimal::from(MINIMUM_AMOUNT);
    if amount < minimum {
        tracing::debug!(%amount, %tier, %method, "amount below minimum");
        return Ok(CalculationResult::Error(CommissionError::BelowMinimum {
            minimum,
        }));
    }

    let entry = table.entry(tier, method)?;
    if let Some(cap) = entry.cap_amount {
        if amount > cap {
            tracing::debug!(%amount, %cap, %tier, %method, "amount exceeds cap");
            return Ok(CalculationResult::Error(CommissionError::ExceedsCap { cap }));
        }
    }

    let commission_fee =
        entry.percentage_commission / Decimal::hundred() * amount + entry.base_commission;
    let merchant_earnings = amount - commission_fee;

    tracing::debug!(%amount, %tier, %method, %commission_fee, "commission evaluated");

    Ok(CalculationResult::Ok(CommissionBreakdown {
        amount,
        percentage_commission: entry.percentage_commission,
        base_commission: entry.base_commission,
        commission_fee,
        merchant_earnings,
    }))
}

/// Coerce a raw amount field the way a numeric form input does: the longest
/// leading number, with optional exponent, is used ("150abc" is 150, "1.5e3"
/// is 1500) and anything without one becomes 0. Numbers too large to
/// represent saturate instead of wrapping to 0.
pub fn parse_amount(input: &str) -> Decimal {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let scan_digits = |from: usize| {
        let mut end = from;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        end
    };

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let int_end = scan_digits(pos);
    let int_digits = &trimmed[pos..int_end];
    let mut frac_digits = "";
    let mut end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = scan_digits(end + 1);
        frac_digits = &trimmed[end + 1..frac_end];
        end = frac_end;
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return Decimal::zero();
    }

    // An exponent only counts when at least one digit follows the marker.
    let mut exponent: i64 = 0;
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_start = end + 1;
        let exp_negative = bytes.get(exp_start) == Some(&b'-');
        if matches!(bytes.get(exp_start), Some(b'+') | Some(b'-')) {
            exp_start += 1;
        }
        let exp_end = scan_digits(exp_start);
        if exp_end > exp_start {
            // Anything beyond 9999 already over- or underflows.
            let magnitude = trimmed[exp_start..exp_end].parse::<i64>().unwrap_or(i64::MAX);
            let magnitude = magnitude.min(9999);
            exponent = if exp_negative { -magnitude } else { magnitude };
        }
    }

    let mantissa = match parse_mantissa(negative, int_digits, frac_digits) {
        Some(mantissa) => mantissa,
        None => return Decimal::saturated(negative),
    };
    mantissa
        .checked_mul_pow10(exponent)
        .unwrap_or_else(|| Decimal::saturated(negative))
}

/// `None` when the integer part alone is out of range. Fraction digits beyond
/// the 28 significant digits rust_decimal can hold are dropped.
fn parse_mantissa(negative: bool, int_digits: &str, frac_digits: &str) -> Option<Decimal> {
    let significant = int_digits.trim_start_matches('0');
    let keep = 28usize.saturating_sub(significant.len()).min(frac_digits.len());
    let int_digits = if significant.is_empty() { "0" } else { significant };
    let sign = if negative { "-" } else { "" };

    let number = if keep == 0 {
        format!("{sign}{int_digits}")
    } else {
        format!("{sign}{int_digits}.{}", &frac_digits[..keep])
    };
    Decimal::from_str_canonical(&number).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn eval(amount: &str, tier: &str, method: &str) -> CalculationResult {
        evaluate(
            d(amount),
            &TierKey::new(tier),
            &PaymentMethodKey::new(method),
            RateTable::standard(),
        )
        .expect("known keys")
    }

    fn eval_amount(amount: Decimal, tier: &str, method: &str) -> CalculationResult {
        evaluate(
            amount,
            &TierKey::new(tier),
            &PaymentMethodKey::new(method),
            RateTable::standard(),
        )
        .expect("known keys")
    }

    #[test]
    fn test_standard_card_at_minimum() {
        let result = eval("100", "standard", "card");
        let breakdown = result.breakdown().expect("ok result");
        assert_eq!(breakdown.percentage_commission, d("1.5"));
        assert_eq!(breakdown.base_commission, d("50"));
        assert_eq!(breakdown.commission_fee_rounded(), d("51.50"));
        assert_eq!(breakdown.merchant_earnings_rounded(), d("48.50"));
        assert_eq!(breakdown.percentage_display(), "1.5%");
        assert_eq!(breakdown.base_commission_display(), "₦50.00");
        assert_eq!(breakdown.commission_fee_display(), "₦51.50");
        assert_eq!(breakdown.merchant_earnings_display(), "₦48.50");
    }

    #[test]
    fn test_gold_card() {
        let breakdown = *eval("1000", "gold", "card").breakdown().unwrap();
        assert_eq!(breakdown.percentage_commission, d("1.1"));
        assert_eq!(breakdown.base_commission, d("40"));
        assert_eq!(breakdown.commission_fee_display(), "₦51.00");
        assert_eq!(breakdown.merchant_earnings_display(), "₦949.00");
    }

    #[test]
    fn test_standard_bank_transfer() {
        let breakdown = *eval("1000", "standard", "bankTransfer").breakdown().unwrap();
        assert_eq!(breakdown.percentage_display(), "1.0%");
        assert_eq!(breakdown.base_commission_display(), "₦30.00");
        assert_eq!(breakdown.commission_fee, d("40"));
        assert_eq!(breakdown.merchant_earnings, d("960"));
    }

    #[test]
    fn test_below_minimum() {
        let result = eval("99", "standard", "card");
        assert_eq!(
            result.error().unwrap().to_string(),
            "Transaction amount must be at least ₦100."
        );
        assert_eq!(
            eval("99.99", "platinum", "wallet"),
            CalculationResult::Error(CommissionError::BelowMinimum { minimum: d("100") })
        );
    }

    #[test]
    fn test_minimum_checked_before_lookup() {
        let result = evaluate(
            d("0"),
            &TierKey::new("diamond"),
            &PaymentMethodKey::new("crypto"),
            RateTable::standard(),
        );
        assert!(matches!(
            result,
            Ok(CalculationResult::Error(CommissionError::BelowMinimum { .. }))
        ));
    }

    #[test]
    fn test_exceeds_cap_message_uses_bare_cap() {
        let result = eval("1001", "standard", "wallet");
        assert_eq!(
            result.error().unwrap().to_string(),
            "Amount for this payment method cannot exceed ₦1000."
        );
        assert_eq!(
            eval("2000.01", "standard", "bankTransfer").error().unwrap().to_string(),
            "Amount for this payment method cannot exceed ₦2000."
        );
    }

    #[test]
    fn test_amount_equal_to_cap_is_allowed() {
        let breakdown = *eval("1000", "standard", "wallet").breakdown().unwrap();
        assert_eq!(breakdown.commission_fee, d("25"));
        assert_eq!(breakdown.merchant_earnings, d("975"));
    }

    #[test]
    fn test_uncapped_methods_accept_large_amounts() {
        let breakdown = *eval("50000000", "standard", "ussd").breakdown().unwrap();
        assert_eq!(breakdown.commission_fee, d("400040"));
    }

    #[test]
    fn test_fee_keeps_full_precision() {
        let breakdown = *eval("123.45", "silver", "card").breakdown().unwrap();
        // 1.3% of 123.45 = 1.60485
        assert_eq!(breakdown.commission_fee, d("51.60485"));
        assert_eq!(breakdown.commission_fee_display(), "₦51.60");
        assert_eq!(breakdown.merchant_earnings, d("71.84515"));
        assert_eq!(breakdown.merchant_earnings_display(), "₦71.85");
    }

    #[test]
    fn test_unknown_keys_are_lookup_errors() {
        let result = evaluate(
            d("500"),
            &TierKey::new("diamond"),
            &PaymentMethodKey::new("card"),
            RateTable::standard(),
        );
        assert_eq!(result, Err(RateTableError::UnknownTier("diamond".to_string())));
    }

    #[test]
    fn test_every_pair_accepts_the_minimum() {
        let table = RateTable::standard();
        for tier in table.tier_keys() {
            for method in table.payment_method_keys(tier).unwrap() {
                let result = evaluate(d("100"), tier, method, table).unwrap();
                assert!(result.is_ok(), "{}/{}", tier, method);
            }
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), d("100"));
        assert_eq!(parse_amount("  250.75"), d("250.75"));
        assert_eq!(parse_amount("150abc"), d("150"));
        assert_eq!(parse_amount("-20"), d("-20"));
        assert_eq!(parse_amount("+7.5"), d("7.5"));
        assert_eq!(parse_amount(".5"), d("0.5"));
        assert_eq!(parse_amount("12."), d("12"));
        assert_eq!(parse_amount(""), Decimal::zero());
        assert_eq!(parse_amount("abc"), Decimal::zero());
        assert_eq!(parse_amount("-"), Decimal::zero());
        assert_eq!(parse_amount("."), Decimal::zero());
    }

    #[test]
    fn test_parse_amount_exponent() {
        assert_eq!(parse_amount("1e3"), d("1000"));
        assert_eq!(parse_amount("1.5E3"), d("1500"));
        assert_eq!(parse_amount("2.5e+2"), d("250"));
        assert_eq!(parse_amount("15e-1"), d("1.5"));
        assert_eq!(parse_amount("-1e2"), d("-100"));
        // A marker without digits ends the number.
        assert_eq!(parse_amount("7e"), d("7"));
        assert_eq!(parse_amount("7e+x"), d("7"));
        assert_eq!(parse_amount("e5"), Decimal::zero());
    }

    #[test]
    fn test_exponent_amount_is_evaluated_at_full_value() {
        let breakdown = *evaluate(
            parse_amount("1e3"),
            &TierKey::new("gold"),
            &PaymentMethodKey::new("card"),
            RateTable::standard(),
        )
        .unwrap()
        .breakdown()
        .unwrap();
        assert_eq!(breakdown.commission_fee_display(), "₦51.00");
        assert_eq!(breakdown.merchant_earnings_display(), "₦949.00");
    }

    #[test]
    fn test_parse_amount_saturates_out_of_range_numbers() {
        let max = Decimal::saturated(false);
        assert_eq!(parse_amount("100000000000000000000000000000"), max);
        assert_eq!(parse_amount("1e40"), max);
        assert_eq!(parse_amount("-1e40"), Decimal::saturated(true));
        assert_eq!(
            parse_amount("0.1234567890123456789012345678901"),
            d("0.1234567890123456789012345678")
        );
        assert_eq!(parse_amount("1e-9999"), Decimal::zero());
    }

    #[test]
    fn test_huge_amount_is_not_reported_below_minimum() {
        let amount = parse_amount("100000000000000000000000000000");

        let card = eval_amount(amount, "standard", "card");
        let breakdown = card.breakdown().expect("uncapped method accepts any amount");
        for shown in [
            breakdown.commission_fee_display(),
            breakdown.merchant_earnings_display(),
        ] {
            let places = shown.split('.').nth(1).map(str::len);
            assert_eq!(places, Some(2), "{}", shown);
        }

        let wallet = eval_amount(amount, "standard", "wallet");
        assert_eq!(
            wallet.error().unwrap().to_string(),
            "Amount for this payment method cannot exceed ₦1000."
        );

        let below = eval_amount(parse_amount("-1e40"), "standard", "card");
        assert!(matches!(
            below,
            CalculationResult::Error(CommissionError::BelowMinimum { .. })
        ));
    }
}
