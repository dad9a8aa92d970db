//! Numeric literal formatting for the wire format.
//!
//! Rust's float formatting is stable across platforms, but a rounded
//! negative value near zero prints as `-0.000`. Both helpers strip that sign
//! so equal programs always serialize to equal bytes.

/// Format with exactly three decimal places.
pub fn fixed3(value: f64) -> String {
    strip_negative_zero(format!("{value:.3}"))
}

/// Format with exactly one decimal place.
pub fn fixed1(value: f64) -> String {
    strip_negative_zero(format!("{value:.1}"))
}

fn strip_negative_zero(s: String) -> String {
    match s.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => s,
    }
}
