// src/config.rs

//! Defines the configuration structures for `ledfx`.
//!
//! Every section deserializes from JSON with `#[serde(default)]`, so a config
//! file only needs the fields it wants to change. The process-wide `CONFIG`
//! is loaded lazily from the file named by `LEDFX_CONFIG`, falling back to
//! defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::animation::EffectKind;
use crate::color::{ColorCorrection, ColorTemperature};
use crate::energy::{DEFAULT_SCALE, DEFAULT_SPEED_STEP};
use crate::grid::Geometry;
use crate::palette::{BuiltinPalette, PaletteId};
use crate::rgb_map::RgbMap;
use crate::rng::DEFAULT_SEED;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV_VAR: &str = "LEDFX_CONFIG";

/// Configuration loaded on first use.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Which effect drives the LEDs.
    pub effect: EffectKind,
    /// LED layout.
    pub grid: GridConfig,
    /// Brightness, correction and palette applied on output.
    pub output: OutputConfig,
    pub fire: FireConfig,
    pub noise: NoiseConfig,
    /// Settings for the headless preview binary.
    pub preview: PreviewConfig,
}

impl Config {
    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads the file named by `LEDFX_CONFIG`, or returns defaults when the
    /// variable is unset or the file cannot be used.
    pub fn load_or_default() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)).unwrap_or_else(|e| {
                warn!("{:#}. Using default configuration.", e);
                Config::default()
            }),
            None => {
                debug!("{} not set, using default configuration", CONFIG_ENV_VAR);
                Config::default()
            }
        }
    }
}

// --- Grid Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    /// Row pitch; `None` means rows are packed.
    pub stride: Option<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            width: 16,
            height: 16,
            stride: None,
        }
    }
}

impl GridConfig {
    pub fn geometry(&self) -> Result<Geometry> {
        Geometry::new(self.width, self.height, self.stride.unwrap_or(self.width))
    }
}

// --- Output Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub brightness: u8,
    pub color_correction: ColorCorrection,
    pub temperature: ColorTemperature,
    /// Palette for the noise effect. `None` leaves noise output dark.
    pub palette: Option<BuiltinPalette>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            brightness: 255,
            color_correction: ColorCorrection::Uncorrected,
            temperature: ColorTemperature::Uncorrected,
            palette: Some(BuiltinPalette::Lava),
        }
    }
}

impl OutputConfig {
    pub fn palette_id(&self) -> PaletteId {
        self.palette.map_or(PaletteId::INVALID, BuiltinPalette::id)
    }

    /// Copies these settings onto an LED map.
    pub fn apply(&self, rgb_map: &mut RgbMap) {
        rgb_map.brightness = self.brightness;
        rgb_map.color_correction = self.color_correction.to_rgb();
        rgb_map.temp_correction = self.temperature.to_rgb();
        rgb_map.palette = self.palette_id();
    }
}

// --- Effect Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Initial state of the fire's 8-bit generator.
    pub seed: u16,
}

impl Default for FireConfig {
    fn default() -> Self {
        FireConfig { seed: DEFAULT_SEED }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub scale: u16,
    pub speed_step: u16,
    /// Seed for the generator that places the noise window. `None` seeds
    /// from OS entropy, so every run starts somewhere new.
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            scale: DEFAULT_SCALE,
            speed_step: DEFAULT_SPEED_STEP,
            seed: None,
        }
    }
}

// --- Preview Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Ticks to run before the frame is printed.
    pub frames: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig { frames: 60 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_log::test;

    #[test]
    fn empty_document_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config: Config = serde_json::from_str(
            r#"{
                "effect": "noise",
                "grid": { "width": 30, "stride": 32 },
                "output": { "brightness": 64, "color_correction": "typical_led_strip", "palette": "ocean" },
                "noise": { "seed": 7 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.effect, EffectKind::Noise);
        assert_eq!(config.grid.width, 30);
        assert_eq!(config.grid.height, 16);
        assert_eq!(config.grid.geometry().unwrap(), Geometry::new(30, 16, 32).unwrap());
        assert_eq!(config.output.brightness, 64);
        assert_eq!(config.output.temperature, ColorTemperature::Uncorrected);
        assert_eq!(config.output.palette_id(), BuiltinPalette::Ocean.id());
        assert_eq!(config.noise.seed, Some(7));
        assert_eq!(config.noise.scale, DEFAULT_SCALE);
        assert_eq!(config.fire.seed, DEFAULT_SEED);
    }

    #[test]
    fn null_palette_is_the_invalid_id() {
        let output: OutputConfig = serde_json::from_str(r#"{ "palette": null }"#).unwrap();
        assert_eq!(output.palette_id(), PaletteId::INVALID);
    }

    #[test]
    fn defaults_survive_a_round_trip() {
        let text = serde_json::to_string(&Config::default()).unwrap();
        let back: Config = serde_json::from_str(&text).unwrap();
        assert_eq!(back, Config::default());
    }

    #[test]
    fn bad_stride_is_an_error() {
        let grid = GridConfig {
            width: 10,
            height: 2,
            stride: Some(4),
        };
        assert!(grid.geometry().is_err());
    }

    #[test]
    fn output_settings_land_on_the_led_map() {
        let output = OutputConfig {
            brightness: 40,
            color_correction: ColorCorrection::TypicalPixel,
            temperature: ColorTemperature::Candle,
            palette: None,
        };
        let mut rgb = RgbMap::new(Geometry::packed(1, 1));
        output.apply(&mut rgb);
        assert_eq!(rgb.brightness, 40);
        assert_eq!(rgb.color_correction, ColorCorrection::TypicalPixel.to_rgb());
        assert_eq!(rgb.temp_correction, ColorTemperature::Candle.to_rgb());
        assert_eq!(rgb.palette, PaletteId::INVALID);
    }

    #[test]
    fn load_reads_a_file_and_reports_missing_ones() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("ledfx-config-test-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{ "preview": {{ "frames": 3 }} }}"#).unwrap();
        drop(file);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.preview.frames, 3);
        fs::remove_file(&path).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
