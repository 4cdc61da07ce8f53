//! Display formatting for money, dates, and service names.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Currency prefix used throughout the UI.
pub const CURRENCY: &str = "KES";

/// `1500.0` -> `"KES 1,500"`; fractional cents are shown only when present.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let cents = (amount * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents as u64;
    let whole = group_thousands(cents / 100);
    let sign = if negative { "-" } else { "" };
    match cents % 100 {
        0 => format!("{CURRENCY} {sign}{whole}"),
        fraction => format!("{CURRENCY} {sign}{whole}.{fraction:02}"),
    }
}

/// Whole-unit amount, as charged to members.
pub fn format_whole(amount: u64) -> String {
    format!("{CURRENCY} {}", group_thousands(amount))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Date part of an ISO-8601 timestamp (`2024-03-01T10:00:00Z` -> `2024-03-01`).
pub fn format_date(timestamp: &str) -> &str {
    timestamp.split(['T', ' ']).next().unwrap_or(timestamp)
}

/// Mask all but the last three digits of a phone number.
pub fn mask_phone(phone: &str) -> String {
    let visible = 3;
    let count = phone.chars().count();
    if count <= visible {
        return phone.to_owned();
    }
    let hidden = "•".repeat(count - visible);
    let tail: String = phone.chars().skip(count - visible).collect();
    format!("{hidden}{tail}")
}
