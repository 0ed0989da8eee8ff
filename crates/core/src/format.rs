//! Price formatting

use rust_decimal::Decimal;

/// Locale-specific price renderer.
///
/// The pricing and validation core works in plain [`Decimal`] BDT amounts;
/// anything user-visible goes through one of these.
pub trait PriceFormatter {
    /// Render an amount in BDT for display.
    fn format(&self, amount: Decimal) -> String;
}

/// Formats prices the way the storefront shows them: taka sign, Bengali
/// digits and Indian-style digit grouping, e.g. `৳ ১,৩৮০`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BanglaTakaFormatter;

impl PriceFormatter for BanglaTakaFormatter {
    fn format(&self, amount: Decimal) -> String {
        let amount = amount.normalize();
        let unsigned = amount.abs();
        let sign = if amount.is_sign_negative() { "-" } else { "" };

        let integer = group_indian(&unsigned.trunc().to_string());
        let fraction = unsigned.fract();

        let rendered = if fraction.is_zero() {
            integer
        } else {
            let digits = fraction
                .to_string()
                .chars()
                .skip(2) // "0."
                .collect::<String>();
            format!("{integer}.{digits}")
        };

        format!("৳ {sign}{}", bengali_digits(&rendered))
    }
}

/// Truncate text for card display, appending an ellipsis when shortened.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars).collect();
    format!("{kept}...")
}

/// Group an ASCII digit string Indian-style: the last three digits, then
/// pairs, e.g. `1300000` → `13,00,000`.
fn group_indian(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    if chars.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = chars.split_at(chars.len() - 3);
    let mut groups: Vec<String> = vec![tail.iter().collect()];

    let mut rest = head;
    while rest.len() > 2 {
        let (next, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair.iter().collect());
        rest = next;
    }

    if !rest.is_empty() {
        groups.push(rest.iter().collect());
    }

    groups.reverse();
    groups.join(",")
}

/// Replace ASCII digits with Bengali ones, leaving everything else alone.
fn bengali_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '0'..='9' => char::from_u32('০' as u32 + (c as u32 - '0' as u32)).unwrap_or(c),
            other => other,
        })
        .collect()
}
