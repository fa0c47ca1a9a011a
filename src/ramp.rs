// src/ramp.rs

//! Black-body style heat to color mapping, computed without a lookup table.

use crate::color::Rgb;

/// Maps a heat value onto a black → red → yellow → white ramp.
///
/// Heat is first compressed to 0..=192 so the spectrum splits into three
/// 64-step thirds: the low six bits give the ramp within a third and the
/// top two bits pick which channel is ramping.
pub fn heat_to_color(heat: u8) -> Rgb {
    // Nonzero heat never maps to 0, so the faintest embers still glow.
    let t192 = ((heat as u16 * 192) >> 8) as u8 + (heat != 0) as u8;

    // 0..63 scaled up to 0..252.
    let ramp = (t192 & 0x3F) << 2;

    if t192 & 0x80 != 0 {
        Rgb::new(255, 255, ramp)
    } else if t192 & 0x40 != 0 {
        Rgb::new(255, ramp, 0)
    } else {
        Rgb::new(ramp, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn spot_checks_across_the_thirds() {
        assert_eq!(heat_to_color(0), Rgb::new(0, 0, 0));
        assert_eq!(heat_to_color(1), Rgb::new(4, 0, 0));
        assert_eq!(heat_to_color(64), Rgb::new(196, 0, 0));
        assert_eq!(heat_to_color(128), Rgb::new(255, 132, 0));
        assert_eq!(heat_to_color(191), Rgb::new(255, 255, 64));
        assert_eq!(heat_to_color(192), Rgb::new(255, 255, 68));
        assert_eq!(heat_to_color(255), Rgb::new(255, 255, 0));
    }

    #[test]
    fn red_never_decreases_with_heat() {
        let mut last = 0;
        for heat in 0..=255u8 {
            let c = heat_to_color(heat);
            assert!(c.r >= last, "red dropped at heat {}", heat);
            last = c.r;
        }
    }

    #[test]
    fn mapping_is_pure() {
        for heat in 0..=255u8 {
            assert_eq!(heat_to_color(heat), heat_to_color(heat));
        }
    }
}
