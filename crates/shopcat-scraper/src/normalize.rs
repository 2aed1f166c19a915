//! Locale-aware number parsing for card labels.
//!
//! Indonesian storefronts group digits with `.` (`"1.234"`) and abbreviate
//! thousands with a marker word using `,` as the decimal separator
//! (`"1,2RB"` = 1200). Every function here is total: malformed input
//! yields `0`, never an error.

/// Converts an "items sold" label into a count.
///
/// Only the first whitespace-separated token is read, so trailing words
/// such as `"Terjual"` are ignored, and `+` signs are dropped. When the
/// token contains `thousands_marker` (case-insensitive) the remaining
/// number is a decimal with `,` as separator, scaled by 1000; otherwise
/// `.` grouping separators are removed and the token parsed as an integer.
#[must_use]
pub fn normalize_sales_count(text: &str, thousands_marker: &str) -> u64 {
    let Some(token) = text.split_whitespace().next() else {
        return 0;
    };
    let token = token.replace('+', "");
    let token = token.trim();

    let marker = thousands_marker.to_uppercase();
    let upper = token.to_uppercase();
    if !marker.is_empty() && upper.contains(&marker) {
        let value = upper.replace(',', ".").replace(&marker, "");
        return scale_thousands(&value);
    }

    token.replace('.', "").parse::<u64>().unwrap_or(0)
}

/// Parses `value` as a decimal and multiplies by 1000, rounding to the
/// nearest unit so `"0,57"` gives 570 rather than 569.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_thousands(value: &str) -> u64 {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => (v * 1000.0).round() as u64,
        _ => 0,
    }
}

/// Parses a displayed price such as `"15.000"` into whole currency units.
///
/// Both `.` and `,` are treated as grouping characters and removed.
/// Anything else left over (currency symbols, ranges) makes the parse fail
/// and yields `0`.
#[must_use]
pub fn parse_price(text: &str) -> u64 {
    text.trim().replace(['.', ','], "").parse::<u64>().unwrap_or(0)
}
