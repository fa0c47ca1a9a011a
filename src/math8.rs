// src/math8.rs

//! 8-bit fixed-point helpers shared by the color and noise pipelines.
//!
//! An 8-bit value is read as a fraction of 255 when used as a multiplier, so
//! `scale8(x, 255) == x` and `scale8(x, 0) == 0`. Rounding is round-to-nearest
//! of `a * b / 255`; ties cannot occur because 255 is odd.
//!
//! Wrapping and saturating additions are kept as separate named functions so
//! every call site states which overflow model it relies on.

/// Multiplies `value` by `fraction / 255`, rounding to nearest.
#[inline]
pub fn scale8(value: u8, fraction: u8) -> u8 {
    ((value as u16 * fraction as u16 + 127) / 255) as u8
}

/// Composes brightness with a color-correction and a temperature-correction
/// multiplier into a single per-channel coefficient.
#[inline]
pub fn coeff8(brightness: u8, color_correction: u8, temp_correction: u8) -> u8 {
    scale8(scale8(brightness, color_correction), temp_correction)
}

/// Saturating add, clamps at 255.
#[inline]
pub fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Modulo-256 add. Used where overflow is part of the numeric model.
#[inline]
pub fn wrapping_add8(a: u8, b: u8) -> u8 {
    a.wrapping_add(b)
}

/// Modulo-256 subtract. Used where underflow is part of the numeric model.
#[inline]
pub fn wrapping_sub8(a: u8, b: u8) -> u8 {
    a.wrapping_sub(b)
}

/// Symmetric quadratic ease-in/ease-out over 0..=255.
pub fn ease8_in_out_quad(i: u8) -> u8 {
    let j = if i & 0x80 != 0 { 255 - i } else { i };
    // j <= 127 so j*j/255 <= 63 and the doubling never overflows.
    let jj2 = scale8(j, j) << 1;
    if i & 0x80 != 0 {
        255 - jj2
    } else {
        jj2
    }
}

/// Linear interpolation between two signed 7-bit values by an 8-bit fraction.
///
/// The distance is always taken as a positive magnitude so the result is the
/// same whichever operand is larger.
pub fn lerp7by8(a: i8, b: i8, frac: u8) -> i8 {
    let (a16, b16) = (a as i16, b as i16);
    if b16 > a16 {
        let delta = (b16 - a16) as u8;
        (a16 + scale8(delta, frac) as i16) as i8
    } else {
        let delta = (a16 - b16) as u8;
        (a16 - scale8(delta, frac) as i16) as i8
    }
}

/// Average of two signed values, rounding up when `i` is odd.
#[inline]
pub fn avg7(i: i8, j: i8) -> i8 {
    let (i, j) = (i as i16, j as i16);
    (((i + j) >> 1) + (i & 1)) as i8
}
