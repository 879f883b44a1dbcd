//! Flower color shading.

/// Returned for anything that is not a `#RRGGBB` color.
pub const FALLBACK_COLOR: &str = "#cccccc";

/// Shift every channel of a `#RRGGBB` color by `amount`.
///
/// Positive amounts lighten, negative amounts darken. Channels clamp to
/// `0..=255` and are re-encoded as two lowercase hex digits each.
/// Malformed input yields [`FALLBACK_COLOR`].
pub fn shade(color: &str, amount: i32) -> String {
    match parse_rgb(color) {
        Some([r, g, b]) => {
            let shift = |channel: u8| (channel as i32 + amount).clamp(0, 255);
            format!("#{:02x}{:02x}{:02x}", shift(r), shift(g), shift(b))
        }
        None => FALLBACK_COLOR.to_owned(),
    }
}

/// Parse `#RRGGBB` into its three channels.
fn parse_rgb(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
