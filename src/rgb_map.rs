// src/rgb_map.rs

//! The LED output buffer and the two conversions that fill it: heat through
//! the color ramp, and noise energy through a palette.
//!
//! Cells of the source map and the LED grid are paired in row-major logical
//! order, so the two only need the same number of cells, not the same
//! shape (a 16x16 heat map can drive a 256-LED strip). Pairing stops at the
//! shorter of the two; stride padding is never written.

use log::trace;

use crate::color::Rgb;
use crate::energy::NoiseEnergyMap;
use crate::grid::{Geometry, Grid};
use crate::heat::HeatMap;
use crate::math8::{coeff8, scale8};
use crate::palette::{PaletteId, PaletteLookup};
use crate::ramp::heat_to_color;

/// LED colors plus the output adjustments applied when they are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbMap {
    pub grid: Grid<Rgb>,
    /// Global brightness, 255 is full.
    pub brightness: u8,
    /// Per-channel correction for the LED package.
    pub color_correction: Rgb,
    /// Per-channel white-point tint.
    pub temp_correction: Rgb,
    /// Palette for noise output; `PaletteId::INVALID` suppresses it.
    pub palette: PaletteId,
}

impl RgbMap {
    /// A dark map at full brightness with no correction and no palette.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            grid: Grid::new(geometry),
            brightness: 255,
            color_correction: Rgb::WHITE,
            temp_correction: Rgb::WHITE,
            palette: PaletteId::INVALID,
        }
    }

    /// Brightness, color correction and temperature folded into one
    /// multiplier per channel.
    pub fn coefficients(&self) -> Rgb {
        Rgb::new(
            coeff8(self.brightness, self.color_correction.r, self.temp_correction.r),
            coeff8(self.brightness, self.color_correction.g, self.temp_correction.g),
            coeff8(self.brightness, self.color_correction.b, self.temp_correction.b),
        )
    }
}

/// Writes the fire colors for `heat_map` into `rgb_map`.
pub fn update_rgb_map_from_heat(rgb_map: &mut RgbMap, heat_map: &HeatMap) {
    let coeff = rgb_map.coefficients();

    for (led, &heat) in rgb_map.grid.cells_mut().zip(heat_map.cells()) {
        let color = heat_to_color(heat);
        *led = Rgb::new(
            scale8(color.r, coeff.r),
            scale8(color.g, coeff.g),
            scale8(color.b, coeff.b),
        );
    }
}

/// Writes palette colors for `energy_map` into `rgb_map`.
///
/// With no palette assigned the LED buffer is left exactly as it was; that
/// is the normal state before a palette has been chosen, not an error.
pub fn update_rgb_map_from_noise(
    rgb_map: &mut RgbMap,
    energy_map: &NoiseEnergyMap,
    palettes: &impl PaletteLookup,
) {
    if !rgb_map.palette.is_valid() {
        trace!("update_rgb_map_from_noise: no palette assigned, leaving LEDs unchanged");
        return;
    }

    let id = rgb_map.palette;
    let brightness = rgb_map.brightness;
    for (led, &energy) in rgb_map.grid.cells_mut().zip(energy_map.grid.cells()) {
        *led = palettes.palette_color(id, energy, brightness);
    }
}
