// src/palette.rs

//! Palette lookup for the noise effect.
//!
//! The RGB conversion only needs "color for this palette id, value and
//! brightness". That capability is the `PaletteLookup` trait; callers can
//! plug in their own palette storage or use the built-in gradients below.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::math8::{qadd8, scale8};

/// Identifies a palette. `PaletteId::INVALID` means none is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteId(pub u8);

impl PaletteId {
    /// Reserved id: no palette selected yet.
    pub const INVALID: PaletteId = PaletteId(u8::MAX);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for PaletteId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Resolves a palette color for an 8-bit value at a given brightness.
pub trait PaletteLookup {
    fn palette_color(&self, id: PaletteId, value: u8, brightness: u8) -> Rgb;
}

impl<F> PaletteLookup for F
where
    F: Fn(PaletteId, u8, u8) -> Rgb,
{
    fn palette_color(&self, id: PaletteId, value: u8, brightness: u8) -> Rgb {
        self(id, value, brightness)
    }
}

/// Sixteen evenly spaced gradient stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette16(pub [Rgb; 16]);

impl Palette16 {
    pub const fn from_hex(codes: [u32; 16]) -> Self {
        let mut entries = [Rgb::BLACK; 16];
        let mut i = 0;
        while i < 16 {
            entries[i] = Rgb::from_hex(codes[i]);
            i += 1;
        }
        Self(entries)
    }

    /// Color at `value`, blended linearly between neighbouring stops and
    /// scaled by `brightness`.
    ///
    /// The high nibble selects the stop; the low nibble is the blend weight
    /// toward the next one. The last stop blends back into the first.
    pub fn color_at(&self, value: u8, brightness: u8) -> Rgb {
        let hi = (value >> 4) as usize;
        let lo = value & 0x0F;

        let from = self.0[hi];
        let to = self.0[(hi + 1) % 16];

        let color = if lo == 0 {
            from
        } else {
            let to_weight = lo << 4;
            let from_weight = 255 - to_weight;
            Rgb::new(
                qadd8(scale8(from.r, from_weight), scale8(to.r, to_weight)),
                qadd8(scale8(from.g, from_weight), scale8(to.g, to_weight)),
                qadd8(scale8(from.b, from_weight), scale8(to.b, to_weight)),
            )
        };

        if brightness == 255 {
            color
        } else {
            color.scaled(brightness)
        }
    }
}

/// Built-in gradients, addressable by name or by `PaletteId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinPalette {
    Heat,
    Lava,
    Ocean,
    Forest,
    Cloud,
    Party,
    Rainbow,
}

impl BuiltinPalette {
    pub const ALL: [BuiltinPalette; 7] = [
        BuiltinPalette::Heat,
        BuiltinPalette::Lava,
        BuiltinPalette::Ocean,
        BuiltinPalette::Forest,
        BuiltinPalette::Cloud,
        BuiltinPalette::Party,
        BuiltinPalette::Rainbow,
    ];

    pub fn id(self) -> PaletteId {
        PaletteId(self as u8)
    }

    pub fn from_id(id: PaletteId) -> Option<Self> {
        Self::ALL.get(id.0 as usize).copied()
    }

    pub fn palette(self) -> &'static Palette16 {
        match self {
            BuiltinPalette::Heat => &HEAT,
            BuiltinPalette::Lava => &LAVA,
            BuiltinPalette::Ocean => &OCEAN,
            BuiltinPalette::Forest => &FOREST,
            BuiltinPalette::Cloud => &CLOUD,
            BuiltinPalette::Party => &PARTY,
            BuiltinPalette::Rainbow => &RAINBOW,
        }
    }
}

/// `PaletteLookup` over the built-in gradients. Unknown ids resolve to black.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPalettes;

impl PaletteLookup for BuiltinPalettes {
    fn palette_color(&self, id: PaletteId, value: u8, brightness: u8) -> Rgb {
        match BuiltinPalette::from_id(id) {
            Some(builtin) => builtin.palette().color_at(value, brightness),
            None => Rgb::BLACK,
        }
    }
}

static HEAT: Palette16 = Palette16::from_hex([
    0x000000, 0x330000, 0x660000, 0x990000, 0xCC0000, 0xFF0000, 0xFF3300, 0xFF6600, //
    0xFF9900, 0xFFCC00, 0xFFFF00, 0xFFFF33, 0xFFFF66, 0xFFFF99, 0xFFFFCC, 0xFFFFFF,
]);

static LAVA: Palette16 = Palette16::from_hex([
    0x000000, 0x800000, 0x000000, 0x800000, 0x8B0000, 0x8B0000, 0x800000, 0x8B0000, //
    0x8B0000, 0x8B0000, 0xFF0000, 0xFFA500, 0xFFFFFF, 0xFFA500, 0xFF0000, 0x8B0000,
]);

static OCEAN: Palette16 = Palette16::from_hex([
    0x191970, 0x00008B, 0x191970, 0x000080, 0x00008B, 0x0000CD, 0x2E8B57, 0x008080, //
    0x5F9EA0, 0x0000FF, 0x008B8B, 0x6495ED, 0x7FFFD4, 0x2E8B57, 0x00FFFF, 0x87CEFA,
]);

static FOREST: Palette16 = Palette16::from_hex([
    0x006400, 0x006400, 0x556B2F, 0x006400, 0x008000, 0x228B22, 0x6B8E23, 0x008000, //
    0x2E8B57, 0x66CDAA, 0x32CD32, 0x9ACD32, 0x90EE90, 0x7CFC00, 0x66CDAA, 0x228B22,
]);

static CLOUD: Palette16 = Palette16::from_hex([
    0x0000FF, 0x00008B, 0x00008B, 0x00008B, 0x00008B, 0x00008B, 0x00008B, 0x00008B, //
    0x0000FF, 0x00008B, 0x87CEEB, 0x87CEEB, 0xADD8E6, 0xFFFFFF, 0xADD8E6, 0x87CEEB,
]);

static PARTY: Palette16 = Palette16::from_hex([
    0x5500AB, 0x84007C, 0xB5004B, 0xE5001B, 0xE81700, 0xB84700, 0xAB7700, 0xABAB00, //
    0xAB5500, 0xDD2200, 0xF2000E, 0xC2003E, 0x8F0071, 0x5F00A1, 0x2F00D0, 0x0007F9,
]);

static RAINBOW: Palette16 = Palette16::from_hex([
    0xFF0000, 0xD52A00, 0xAB5500, 0xAB7F00, 0xABAB00, 0x56D500, 0x00FF00, 0x00D52A, //
    0x00AB55, 0x0056AA, 0x0000FF, 0x2A00D5, 0x5500AB, 0x7F0081, 0xAB0055, 0xD5002B,
]);
