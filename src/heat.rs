// src/heat.rs

//! Fire simulation over a heat map.
//!
//! Row 0 is the heat source. Every tick runs three whole-grid phases in
//! order, each reading what the previous phase wrote:
//!
//! 1. cooling: every cell loses a random amount, more the farther its row
//!    is from the source;
//! 2. diffusion: each row above the source is recomputed from the row
//!    beneath it, so heat drifts away from row 0;
//! 3. sparking: a random number of new sparks land on row 0.
//!
//! All randomness comes from the caller's `Rand8`, so a tick is fully
//! determined by the map contents and the generator seed.

use log::trace;

use crate::grid::{Geometry, Grid};
use crate::math8::{wrapping_add8, wrapping_sub8};
use crate::rng::Rand8;

/// Upper bound on the per-tick cooling offset.
const MAX_COOLING_OFFSET: u8 = 16;
/// Exclusive bound the cooling offset is drawn from.
const COOLING_OFFSET_RANGE: u8 = 128;
/// Extra cooling ceiling per row away from the source.
const COOLING_PER_ROW: usize = 8;
/// Sparks add at most enough heat to approach this level.
const SPARK_CEILING: u8 = 240;

/// A grid of 8-bit heat values.
pub type HeatMap = Grid<u8>;

impl HeatMap {
    /// A cold (all zero) heat map.
    pub fn cold(geometry: Geometry) -> Self {
        Grid::new(geometry)
    }
}

/// Advances the fire simulation by one tick, in place.
///
/// Does nothing for a map without cells.
pub fn update_heat_map(map: &mut HeatMap, rng: &mut Rand8) {
    if map.is_empty() {
        trace!("update_heat_map: empty map, skipping tick");
        return;
    }

    cool(map, rng);
    diffuse(map);
    spark(map, rng);
}

/// Clamps a count into the 8-bit bound `rand8_bdry` accepts.
fn bound8(n: usize) -> u8 {
    u8::try_from(n).unwrap_or(u8::MAX)
}

fn cool(map: &mut HeatMap, rng: &mut Rand8) {
    let geometry = map.geometry();
    let cooling_offset = rng.rand8_bdry(COOLING_OFFSET_RANGE).min(MAX_COOLING_OFFSET);
    let data = map.as_mut_slice();

    for y in 0..geometry.height() {
        let row_ceiling = cooling_offset as usize + y * COOLING_PER_ROW;
        for x in 0..geometry.width() {
            let idx = geometry.index(x, y);
            let value = data[idx];
            // 3/4 of the current heat, rounded down per term.
            let three_quarters = (value >> 2) as usize + (value >> 1) as usize;
            let delta = rng.rand8_bdry(row_ceiling.min(three_quarters) as u8);
            // The cap keeps delta <= value, so this never actually wraps; the
            // wrapping subtraction is the numeric model either way.
            data[idx] = wrapping_sub8(value, delta);
        }
    }
}

/// Recomputes rows `1..height` from the row beneath: half of the cell below
/// plus a quarter of each of its horizontal neighbours.
///
/// Runs column by column, top of each column last, in place. Column `x`
/// therefore sees column `x - 1` already rewritten and column `x + 1` not
/// yet; the output depends on this order.
fn diffuse(map: &mut HeatMap) {
    let geometry = map.geometry();
    let data = map.as_mut_slice();

    for x in 0..geometry.width() {
        let left = geometry.wrap_x(x as isize - 1);
        let right = geometry.wrap_x(x as isize + 1);
        for y in 1..geometry.height() {
            let below = data[geometry.index(x, y - 1)];
            let below_left = data[geometry.index(left, y - 1)];
            let below_right = data[geometry.index(right, y - 1)];
            data[geometry.index(x, y)] = (below >> 1) + (below_left >> 2) + (below_right >> 2);
        }
    }
}

fn spark(map: &mut HeatMap, rng: &mut Rand8) {
    let geometry = map.geometry();
    let data = map.as_mut_slice();

    let sparks = rng.rand8_bdry(bound8(geometry.width() / 2));
    for _ in 0..sparks {
        let x = rng.rand8_bdry(bound8(geometry.width())) as usize;
        let idx = geometry.index(x, 0);
        let value = data[idx];
        // Cells already above the ceiling wrap to a large headroom here and
        // can overflow past 255; both wraps are intended.
        let delta = rng.rand8_bdry(wrapping_sub8(SPARK_CEILING, value));
        data[idx] = wrapping_add8(value, delta);
    }
}
