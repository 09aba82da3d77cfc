//! Amount formatting for the console and editor views.
//!
//! Amounts follow en-US grouping: thousands separated by `,`, at most three
//! fraction digits, trailing zeros dropped (`1,500`, `12.5`, `0.125`).

use crate::domain::TransactionType;

const SYMBOL: &str = "$";
const MAX_FRACTION_DIGITS: usize = 3;
const GROUPING_SEPARATOR: char = ',';

/// Formats a number with grouping and trimmed fraction digits.
pub fn format_number(value: f64) -> String {
    let mut body = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    if body.contains('.') {
        let trimmed = body.trim_end_matches('0').trim_end_matches('.').len();
        body.truncate(trimmed);
    }
    let (int_part, fraction) = match body.find('.') {
        Some(pos) => (&body[..pos], &body[pos..]),
        None => (body.as_str(), ""),
    };
    let grouped = group_digits(int_part, GROUPING_SEPARATOR);
    let sign = if value < 0.0 && (grouped != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}{fraction}")
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// `$1,500`, or `$-300` for negative balances.
pub fn format_currency_value(amount: f64) -> String {
    format!("{SYMBOL}{}", format_number(amount))
}

/// Amount prefixed with the sign implied by its transaction type: `+ $1,500`.
pub fn format_signed_amount(kind: TransactionType, amount: f64) -> String {
    format!("{} {SYMBOL}{}", kind.sign(), format_number(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_trims_zeros() {
        assert_eq!(format_number(1500.0), "1,500");
        assert_eq!(format_number(1234567.25), "1,234,567.25");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn rounds_to_three_fraction_digits() {
        assert_eq!(format_number(1.23456), "1.235");
        assert_eq!(format_number(2.0004), "2");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(format_number(-1200.0), "-1,200");
        assert_eq!(format_currency_value(-1200.0), "$-1,200");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn signed_amount_uses_type() {
        assert_eq!(
            format_signed_amount(TransactionType::Income, 1500.0),
            "+ $1,500"
        );
        assert_eq!(format_signed_amount(TransactionType::Expense, 300.0), "- $300");
    }
}
