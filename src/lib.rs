// src/lib.rs

//! Procedural color fields for addressable LED grids and strips.
//!
//! Two effects are provided, both written into a caller-owned `RgbMap`
//! once per tick:
//!
//! - fire: a cellular heat automaton (`heat`) mapped through a black-body
//!   ramp (`ramp`) with brightness and color correction (`rgb_map`);
//! - noise: a scrolling 3D Perlin field (`noise`, `energy`) mapped through a
//!   palette (`palette`, `rgb_map`).
//!
//! All arithmetic is 8/16-bit fixed point (`math8`). Updates do not
//! allocate, do no I/O and never fail.

pub mod animation;
pub mod color;
pub mod config;
pub mod energy;
pub mod grid;
pub mod heat;
pub mod math8;
pub mod noise;
pub mod palette;
pub mod preview;
pub mod ramp;
pub mod rgb_map;
pub mod rng;

pub use animation::{Animation, EffectKind, Source};
pub use color::{ColorCorrection, ColorTemperature, Rgb};
pub use config::{Config, CONFIG};
pub use energy::{init_noise_params, update_noise_energy_map, NoiseEnergyMap, NoiseParam};
pub use grid::{Geometry, Grid};
pub use heat::{update_heat_map, HeatMap};
pub use noise::{noise8, sample_noise};
pub use palette::{BuiltinPalette, BuiltinPalettes, Palette16, PaletteId, PaletteLookup};
pub use ramp::heat_to_color;
pub use rgb_map::{update_rgb_map_from_heat, update_rgb_map_from_noise, RgbMap};
pub use rng::{Rand16, Rand8};
