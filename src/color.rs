// src/color.rs

//! Defines the `Rgb` LED color and the named correction presets that are
//! composed with brightness before a frame is written.

use serde::{Deserialize, Serialize};

use crate::math8::scale8;

/// One LED's color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` code.
    pub const fn from_hex(code: u32) -> Self {
        Self {
            r: (code >> 16) as u8,
            g: (code >> 8) as u8,
            b: code as u8,
        }
    }

    /// Scales every channel by `fraction / 255`.
    pub fn scaled(self, fraction: u8) -> Self {
        Self {
            r: scale8(self.r, fraction),
            g: scale8(self.g, fraction),
            b: scale8(self.b, fraction),
        }
    }
}

/// Per-channel multipliers that compensate for the LED package's native
/// white point. Values follow the common addressable-LED presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorCorrection {
    /// WS2812-style SMD strips.
    TypicalLedStrip,
    /// Through-hole 8mm pixels.
    TypicalPixel,
    #[default]
    Uncorrected,
}

impl ColorCorrection {
    pub fn to_rgb(self) -> Rgb {
        match self {
            ColorCorrection::TypicalLedStrip => Rgb::from_hex(0xFFB0F0),
            ColorCorrection::TypicalPixel => Rgb::from_hex(0xFFE08C),
            ColorCorrection::Uncorrected => Rgb::WHITE,
        }
    }
}

/// Black-body style tints applied on top of color correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTemperature {
    Candle,
    #[serde(rename = "tungsten_40w")]
    Tungsten40W,
    #[serde(rename = "tungsten_100w")]
    Tungsten100W,
    Halogen,
    CarbonArc,
    HighNoonSun,
    DirectSunlight,
    OvercastSky,
    ClearBlueSky,
    #[default]
    Uncorrected,
}

impl ColorTemperature {
    pub fn to_rgb(self) -> Rgb {
        match self {
            ColorTemperature::Candle => Rgb::from_hex(0xFF9329),         // 1900 K
            ColorTemperature::Tungsten40W => Rgb::from_hex(0xFFC58F),    // 2600 K
            ColorTemperature::Tungsten100W => Rgb::from_hex(0xFFD6AA),   // 2850 K
            ColorTemperature::Halogen => Rgb::from_hex(0xFFF1E0),        // 3200 K
            ColorTemperature::CarbonArc => Rgb::from_hex(0xFFFAF4),      // 5200 K
            ColorTemperature::HighNoonSun => Rgb::from_hex(0xFFFFFB),    // 5400 K
            ColorTemperature::DirectSunlight => Rgb::from_hex(0xFFFFFF), // 6000 K
            ColorTemperature::OvercastSky => Rgb::from_hex(0xC9E2FF),    // 7000 K
            ColorTemperature::ClearBlueSky => Rgb::from_hex(0x409CFF),   // 20000 K
            ColorTemperature::Uncorrected => Rgb::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn from_hex_splits_channels() {
        assert_eq!(Rgb::from_hex(0x123456), Rgb::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn scaled_by_full_fraction_is_identity() {
        let c = Rgb::new(10, 200, 255);
        assert_eq!(c.scaled(255), c);
        assert_eq!(c.scaled(0), Rgb::BLACK);
    }

    #[test]
    fn uncorrected_presets_are_white() {
        assert_eq!(ColorCorrection::default().to_rgb(), Rgb::WHITE);
        assert_eq!(ColorTemperature::default().to_rgb(), Rgb::WHITE);
        assert_eq!(ColorCorrection::TypicalLedStrip.to_rgb(), Rgb::new(255, 0xB0, 0xF0));
    }

    #[test]
    fn presets_use_snake_case_names() {
        let c: ColorCorrection = serde_json::from_str("\"typical_led_strip\"").unwrap();
        assert_eq!(c, ColorCorrection::TypicalLedStrip);
        let t: ColorTemperature = serde_json::from_str("\"clear_blue_sky\"").unwrap();
        assert_eq!(t, ColorTemperature::ClearBlueSky);
    }

    #[test]
    fn tungsten_names_keep_the_wattage_together() {
        assert_eq!(
            serde_json::to_string(&ColorTemperature::Tungsten40W).unwrap(),
            "\"tungsten_40w\""
        );
        let t: ColorTemperature = serde_json::from_str("\"tungsten_100w\"").unwrap();
        assert_eq!(t, ColorTemperature::Tungsten100W);
        assert!(serde_json::from_str::<ColorTemperature>("\"tungsten40_w\"").is_err());
    }
}
