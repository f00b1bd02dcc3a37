//! Hex plumbing shared by the adapter and the vendor wire shapes.

use crate::error::Result;

/// Drop a leading `0x`/`0X` if present.
pub fn strip_hex_prefix(hex: &str) -> &str {
    if hex.len() >= 2 && (hex.starts_with("0x") || hex.starts_with("0X")) {
        &hex[2..]
    } else {
        hex
    }
}

/// Canonicalize a hex string: `0x` prefix, even number of digits.
pub fn sanitize_hex(hex: &str) -> String {
    let bare = strip_hex_prefix(hex);
    if bare.len() % 2 == 1 {
        format!("0x0{}", bare)
    } else {
        format!("0x{}", bare)
    }
}

/// Decode a hex string (prefixed or not, odd lengths padded) into bytes.
pub fn buffer_from_hex(hex: &str) -> Result<Vec<u8>> {
    let sanitized = sanitize_hex(hex.trim());
    Ok(hex::decode(strip_hex_prefix(&sanitized))?)
}
