//! 8-bit brightness math.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0).
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[must_use]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// The "video" variant of [`scale8`]: the result is zero only when an input
/// is zero.
///
/// If both inputs are non-zero the result is at least 1, so a dim-but-lit
/// channel never rounds down to a dark LED. Costs a slight upward bias.
#[inline]
#[must_use]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8_video(value: u8, scale: u8) -> u8 {
    let scaled = ((value as u16 * scale as u16) >> 8) as u8;
    if value != 0 && scale != 0 { scaled + 1 } else { scaled }
}
