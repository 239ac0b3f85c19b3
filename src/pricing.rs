//! Pricing
//!
//! Derived amounts: per-line totals, the cart grand total, and the fixed
//! display format for prices.

use num_format::{Locale, ToFormattedString};
use rusty_money::{Money, MoneyError, iso::Currency};

use crate::cart::CartLine;

/// Currency word appended to every formatted amount.
const PRICE_SUFFIX: &str = "تومان";

/// Calculates the total for one cart line (unit price × quantity).
#[must_use]
pub fn line_total(unit_price: Money<'static, Currency>, quantity: u32) -> Money<'static, Currency> {
    let minor = unit_price
        .to_minor_units()
        .saturating_mul(i64::from(quantity));

    Money::from_minor(minor, unit_price.currency())
}

/// Calculates the grand total of a list of cart lines.
///
/// An empty list totals to zero in the given currency.
///
/// # Errors
///
/// Returns a [`MoneyError`] on a money arithmetic or currency mismatch error.
pub fn cart_total(
    lines: &[CartLine],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, MoneyError> {
    lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            acc.add(line_total(line.unit_price(), line.quantity()))
        })
}

/// Formats an amount per the single fixed display convention: minor units
/// with grouped digits, followed by the currency word.
///
/// A pure function of the numeric amount — no locale negotiation.
#[must_use]
pub fn format_price(amount: Money<'static, Currency>) -> String {
    let grouped = amount.to_minor_units().to_formatted_string(&Locale::en);

    format!("{grouped} {PRICE_SUFFIX}")
}
