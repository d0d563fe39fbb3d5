//! Display formatting for account data and chat messages.
//!
//! Every formatter accepts missing or malformed input and returns a
//! placeholder instead of failing. The string formatters, except
//! [`truncate_text`], return their own output unchanged.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::constants::NOT_AVAILABLE;

const MASK_LIMIT: usize = 8;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Mask all but the last four characters, e.g. `XXXXXXXX-0123`.
pub fn format_account_number(account_number: Option<&str>) -> String {
    let Some(raw) = account_number.map(str::trim).filter(|s| !s.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    if is_masked(raw) {
        return raw.to_string();
    }

    let chars: Vec<char> = raw.chars().collect();
    if chars.len() <= 4 {
        return raw.to_string();
    }

    let last_four: String = chars[chars.len() - 4..].iter().collect();
    let masked = "X".repeat((chars.len() - 4).min(MASK_LIMIT));
    format!("{masked}-{last_four}")
}

fn is_masked(value: &str) -> bool {
    match value.split_once('-') {
        Some((mask, tail)) => {
            !mask.is_empty() && mask.chars().all(|c| c == 'X') && tail.chars().count() == 4
        }
        None => false,
    }
}

/// Format a backend date as `Jan 15, 2024`.
///
/// Accepts ISO dates, RFC 3339 / RFC 2822 timestamps and already formatted
/// dates. Anything unparseable is returned as given.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date.map(str::trim) else {
        return NOT_AVAILABLE.to_string();
    };
    if raw.is_empty() || raw == NOT_AVAILABLE || raw == "None" {
        return NOT_AVAILABLE.to_string();
    }

    match parse_date(raw) {
        Some(parsed) => parsed.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Format a message timestamp as `2:30 PM`.
pub fn format_message_time<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%-I:%M %p").to_string()
}

/// Format a 10-digit number as `(123) 456-7890`; other input is returned as given.
pub fn format_mobile_number(mobile: Option<&str>) -> String {
    let Some(raw) = mobile.filter(|s| !s.trim().is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        raw.to_string()
    }
}

/// Capitalize the first letter of each space-separated word.
pub fn capitalize_words(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    text.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => std::iter::once(title_char(first)).chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase form of `c`, or `c` itself when uppercasing would expand it
/// (`ß` to `SS`) and change the word on a second pass.
fn title_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Format a dollar amount as `$1,234.56`.
///
/// Amounts too large to count in cents render as the placeholder.
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|a| a.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };

    let scaled = (amount.abs() * 100.0).round();
    if scaled >= u128::MAX as f64 {
        return NOT_AVAILABLE.to_string();
    }
    let cents = scaled as u128;
    let dollars = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${dollars}.{:02}", cents % 100)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Cut `text` to `max_length` characters and append an ellipsis.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_length).collect();
    cut.push_str("...");
    cut
}
