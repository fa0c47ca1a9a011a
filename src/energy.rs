// src/energy.rs

//! Scrolling Perlin-noise energy field.
//!
//! Each tick samples a fixed x/y window of the noise volume at depth
//! `speed`, then moves `speed` forward. Only the depth axis moves, so the
//! pattern morphs in place instead of sliding. `speed` wraps at 65536,
//! which the 8.8 fixed-point lattice turns into a seamless loop.

use serde::{Deserialize, Serialize};

use crate::grid::{Geometry, Grid};
use crate::noise::noise8;
use crate::rng::Rand16;

/// Default depth advance per tick.
pub const DEFAULT_SPEED_STEP: u16 = 20;
/// Default distance between neighbouring cells in noise space.
pub const DEFAULT_SCALE: u16 = 30;

/// Position and pacing of the sampled noise window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoiseParam {
    /// Horizontal origin of the window. Fixed once seeded.
    pub rx: u16,
    /// Vertical origin of the window. Fixed once seeded.
    pub ry: u16,
    /// Current depth; advances by `speed_step` every tick.
    pub speed: u16,
    /// Spatial frequency: noise-space distance between adjacent cells.
    pub scale: u16,
    pub speed_step: u16,
}

/// An energy grid together with the noise window that fills it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseEnergyMap {
    pub grid: Grid<u8>,
    pub param: NoiseParam,
}

impl NoiseEnergyMap {
    pub fn new(geometry: Geometry, param: NoiseParam) -> Self {
        Self {
            grid: Grid::new(geometry),
            param,
        }
    }

    /// Builds a map whose window is seeded from `rand16`.
    pub fn seeded(geometry: Geometry, rand16: &mut impl Rand16) -> Self {
        let mut param = NoiseParam::default();
        init_noise_params(&mut param, rand16);
        Self::new(geometry, param)
    }
}

/// Places the window at a random origin and depth with default pacing.
///
/// Draws `rx`, `ry` and `speed` in that order.
pub fn init_noise_params(param: &mut NoiseParam, rand16: &mut impl Rand16) {
    param.rx = rand16.rand16();
    param.ry = rand16.rand16();
    param.speed = rand16.rand16();
    param.speed_step = DEFAULT_SPEED_STEP;
    param.scale = DEFAULT_SCALE;
}

/// Fills every cell from the noise volume, then advances the depth.
pub fn update_noise_energy_map(map: &mut NoiseEnergyMap) {
    let NoiseParam {
        rx,
        ry,
        speed,
        scale,
        speed_step,
    } = map.param;
    let geometry = map.grid.geometry();
    let data = map.grid.as_mut_slice();

    for y in 0..geometry.height() {
        let y_offset = scale.wrapping_mul(y as u16);
        for x in 0..geometry.width() {
            let x_offset = scale.wrapping_mul(x as u16);
            data[geometry.index(x, y)] =
                noise8(rx.wrapping_add(x_offset), ry.wrapping_add(y_offset), speed);
        }
    }

    map.param.speed = speed.wrapping_add(speed_step);
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    /// Replays a fixed list of values.
    struct Sequence(std::vec::IntoIter<u16>);

    impl Rand16 for Sequence {
        fn rand16(&mut self) -> u16 {
            self.0.next().expect("sequence exhausted")
        }
    }

    fn window(rx: u16, ry: u16, speed: u16) -> NoiseParam {
        NoiseParam {
            rx,
            ry,
            speed,
            scale: DEFAULT_SCALE,
            speed_step: DEFAULT_SPEED_STEP,
        }
    }

    #[test]
    fn init_draws_origin_then_depth_and_sets_pacing() {
        let mut param = NoiseParam::default();
        init_noise_params(&mut param, &mut Sequence(vec![11, 22, 33].into_iter()));
        assert_eq!(param, window(11, 22, 33));
    }

    #[test]
    fn update_advances_only_the_depth() {
        let mut map = NoiseEnergyMap::new(Geometry::packed(5, 4), window(100, 200, 300));
        update_noise_energy_map(&mut map);
        assert_eq!(map.param.speed, 320);
        assert_eq!(map.param.rx, 100);
        assert_eq!(map.param.ry, 200);
    }

    #[test]
    fn depth_wraps_around() {
        let mut map = NoiseEnergyMap::new(Geometry::packed(2, 2), window(0, 0, 65530));
        update_noise_energy_map(&mut map);
        assert_eq!(map.param.speed, 14);
    }

    #[test]
    fn cells_sample_the_scaled_window() {
        let mut map = NoiseEnergyMap::new(Geometry::packed(3, 2), window(100, 200, 300));
        update_noise_energy_map(&mut map);
        assert_eq!(map.grid.as_slice(), &[110, 130, 150, 120, 136, 146]);
        assert_eq!(map.grid.get(2, 1), Some(noise8(100 + 60, 200 + 30, 300)));
    }

    #[test]
    fn padding_is_not_written() {
        let geometry = Geometry::new(2, 2, 3).unwrap();
        let mut map = NoiseEnergyMap {
            grid: Grid::filled(geometry, 7),
            param: window(1, 2, 3),
        };
        update_noise_energy_map(&mut map);
        assert_eq!(map.grid.as_slice()[2], 7);
    }

    #[test]
    fn seeded_map_takes_its_window_from_the_generator() {
        let map = NoiseEnergyMap::seeded(
            Geometry::packed(1, 1),
            &mut Sequence(vec![5, 6, 7].into_iter()),
        );
        assert_eq!(map.param, window(5, 6, 7));
    }
}
