// src/animation.rs

//! Ties one effect's source map and its LED map together.
//!
//! An `Animation` owns everything a single effect mutates between ticks:
//! the heat or energy grid, the generator state that drives it, and the
//! `RgbMap` written for the LEDs. `tick()` advances the effect by exactly
//! one frame. When to call it is up to the caller.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::config::Config;
use crate::energy::{update_noise_energy_map, NoiseEnergyMap};
use crate::grid::{Geometry, Grid};
use crate::heat::{update_heat_map, HeatMap};
use crate::palette::{BuiltinPalettes, PaletteLookup};
use crate::rgb_map::{update_rgb_map_from_heat, update_rgb_map_from_noise, RgbMap};
use crate::rng::{Rand16, Rand8};

/// The effects an `Animation` can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    #[default]
    Fire,
    Noise,
}

/// Per-effect simulation state.
#[derive(Debug, Clone)]
pub enum Source {
    Fire { heat: HeatMap, rng: Rand8 },
    Noise { energy: NoiseEnergyMap },
}

impl Source {
    pub fn kind(&self) -> EffectKind {
        match self {
            Source::Fire { .. } => EffectKind::Fire,
            Source::Noise { .. } => EffectKind::Noise,
        }
    }
}

/// One running effect and the LED frame it produces.
#[derive(Debug, Clone)]
pub struct Animation<P = BuiltinPalettes> {
    source: Source,
    rgb: RgbMap,
    palettes: P,
    ticks: u64,
}

impl Animation<BuiltinPalettes> {
    /// Fire over `rgb`'s geometry, driven by a `Rand8` seeded with `seed`.
    pub fn fire(rgb: RgbMap, seed: u16) -> Self {
        let heat = HeatMap::cold(rgb.grid.geometry());
        Self::with_source(
            Source::Fire {
                heat,
                rng: Rand8::new(seed),
            },
            rgb,
        )
    }

    /// Noise over `rgb`'s geometry with its window placed by `rand16`.
    pub fn noise(rgb: RgbMap, rand16: &mut impl Rand16) -> Self {
        let energy = NoiseEnergyMap::seeded(rgb.grid.geometry(), rand16);
        Self::with_source(Source::Noise { energy }, rgb)
    }

    pub fn with_source(source: Source, rgb: RgbMap) -> Self {
        Self {
            source,
            rgb,
            palettes: BuiltinPalettes,
            ticks: 0,
        }
    }

    /// Builds the animation a `Config` describes.
    pub fn from_config(config: &Config) -> Result<Self> {
        let geometry: Geometry = config
            .grid
            .geometry()
            .context("Invalid grid configuration")?;
        let mut rgb = RgbMap::new(geometry);
        config.output.apply(&mut rgb);

        let animation = match config.effect {
            EffectKind::Fire => Self::fire(rgb, config.fire.seed),
            EffectKind::Noise => {
                let mut rand16 = match config.noise.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let mut animation = Self::noise(rgb, &mut rand16);
                if let Source::Noise { energy } = &mut animation.source {
                    energy.param.scale = config.noise.scale;
                    energy.param.speed_step = config.noise.speed_step;
                    debug!("Noise window: {:?}", energy.param);
                }
                animation
            }
        };

        info!(
            "{:?} animation on a {}x{} grid (stride {})",
            config.effect,
            geometry.width(),
            geometry.height(),
            geometry.stride()
        );
        Ok(animation)
    }
}

impl<P: PaletteLookup> Animation<P> {
    /// Swaps in a different palette source.
    pub fn with_palettes<Q: PaletteLookup>(self, palettes: Q) -> Animation<Q> {
        Animation {
            source: self.source,
            rgb: self.rgb,
            palettes,
            ticks: self.ticks,
        }
    }

    /// Advances the effect one frame and rewrites the LED map.
    pub fn tick(&mut self) {
        match &mut self.source {
            Source::Fire { heat, rng } => {
                update_heat_map(heat, rng);
                update_rgb_map_from_heat(&mut self.rgb, heat);
            }
            Source::Noise { energy } => {
                update_noise_energy_map(energy);
                update_rgb_map_from_noise(&mut self.rgb, energy, &self.palettes);
            }
        }
        self.ticks += 1;
    }

    /// The most recent LED frame.
    pub fn frame(&self) -> &Grid<Rgb> {
        &self.rgb.grid
    }

    pub fn rgb_map(&self) -> &RgbMap {
        &self.rgb
    }

    /// Output settings can be changed between ticks.
    pub fn rgb_map_mut(&mut self) -> &mut RgbMap {
        &mut self.rgb
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn kind(&self) -> EffectKind {
        self.source.kind()
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteId;
    use test_log::test;

    #[test]
    fn fire_ticks_match_driving_the_engines_by_hand() {
        let geometry = Geometry::packed(8, 6);
        let mut animation = Animation::fire(RgbMap::new(geometry), 99);

        let mut heat = HeatMap::cold(geometry);
        let mut rng = Rand8::new(99);
        let mut rgb = RgbMap::new(geometry);

        for _ in 0..10 {
            animation.tick();
            update_heat_map(&mut heat, &mut rng);
            update_rgb_map_from_heat(&mut rgb, &heat);
        }
        assert_eq!(animation.frame(), &rgb.grid);
        assert_eq!(animation.ticks(), 10);
    }

    #[test]
    fn noise_without_palette_stays_dark() {
        let mut rgb = RgbMap::new(Geometry::packed(4, 4));
        rgb.palette = PaletteId::INVALID;
        let mut animation = Animation::noise(rgb, &mut StdRng::seed_from_u64(1));
        animation.tick();
        assert!(animation.frame().cells().all(|&c| c == Rgb::BLACK));
        // The energy field still moves.
        match animation.source() {
            Source::Noise { energy } => assert!(energy.grid.cells().any(|&e| e != 0)),
            Source::Fire { .. } => panic!("expected a noise source"),
        }
    }

    #[test]
    fn custom_palettes_are_used() {
        let mut rgb = RgbMap::new(Geometry::packed(3, 3));
        rgb.palette = PaletteId(0);
        let mut animation = Animation::noise(rgb, &mut StdRng::seed_from_u64(5))
            .with_palettes(|_: PaletteId, value: u8, _: u8| Rgb::new(value, 0, 0));
        animation.tick();
        match animation.source() {
            Source::Noise { energy } => {
                let expected: Vec<Rgb> = energy.grid.cells().map(|&e| Rgb::new(e, 0, 0)).collect();
                let got: Vec<Rgb> = animation.frame().cells().copied().collect();
                assert_eq!(got, expected);
            }
            Source::Fire { .. } => panic!("expected a noise source"),
        }
    }

    #[test]
    fn config_selects_effect_and_noise_pacing() {
        let mut config = Config::default();
        config.effect = EffectKind::Noise;
        config.noise.seed = Some(3);
        config.noise.scale = 50;
        config.noise.speed_step = 7;

        let mut animation = Animation::from_config(&config).unwrap();
        assert_eq!(animation.kind(), EffectKind::Noise);
        let start = match animation.source() {
            Source::Noise { energy } => {
                assert_eq!(energy.param.scale, 50);
                energy.param.speed
            }
            Source::Fire { .. } => panic!("expected a noise source"),
        };
        animation.tick();
        match animation.source() {
            Source::Noise { energy } => assert_eq!(energy.param.speed, start.wrapping_add(7)),
            Source::Fire { .. } => panic!("expected a noise source"),
        }
    }

    #[test]
    fn config_with_bad_geometry_fails() {
        let mut config = Config::default();
        config.grid.stride = Some(1);
        assert!(Animation::from_config(&config).is_err());
    }
}
