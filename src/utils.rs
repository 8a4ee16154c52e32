//! Utility functions.

/// Parses a `0x`-prefixed hex string into an integer.
/// Returns `None` when the digits are invalid or overflow a `u64`.
pub fn parse_hex(raw: &str) -> Option<u64> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    u64::from_str_radix(digits, 16).ok()
}

/// Returns the file name part of a path-like symbol: everything after the
/// last `/` or `\`, whichever comes later. Text without a separator is
/// returned whole.
pub fn object_name(symbol: &str) -> &str {
    match symbol.rfind(['/', '\\']) {
        Some(idx) => &symbol[idx + 1..],
        None => symbol,
    }
}
