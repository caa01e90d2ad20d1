use rust_decimal::prelude::*;

/// Decimal places carried by every externally visible monetary value (USD)
pub const MONEY_SCALE: u32 = 2;

/// Currency symbol used by `format`
pub const CURRENCY_SYMBOL: &str = "$";

/// Rounds a monetary value to cents using round-half-up on the magnitude
///
/// Every multiplication or division in the pricing pipeline is followed by
/// a call to this function, so rounding never compounds across steps.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the smallest representable monetary unit (one cent)
pub fn smallest_unit() -> Decimal {
    Decimal::new(1, MONEY_SCALE)
}

/// Formats an amount for display, e.g. `$1,082.50` or `-$15.00`
pub fn format(amount: Decimal) -> String {
    let rounded = round2(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let plain = format!("{:.width$}", rounded.abs(), width = MONEY_SCALE as usize);
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!("{}{}{}.{}", sign, CURRENCY_SYMBOL, group_thousands(whole), cents)
}

/// Recovers an amount from a formatted or loosely typed string
///
/// Everything except ASCII digits, `.` and `-` is stripped before parsing.
/// Unparseable input yields zero so half-typed form fields never fail.
pub fn parse(input: &str) -> Decimal {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
