// src/grid.rs

//! Row-major 2D buffers with an explicit row pitch.
//!
//! Every map in the crate (heat, energy, LED colors) is a `Grid`. A grid is
//! sized once from its `Geometry` and never resized; engines rewrite the
//! logical cells in place each tick and leave stride padding untouched.

use anyhow::{bail, Result};

/// Width, height and row pitch of a 2D buffer.
///
/// Cell `(x, y)` lives at `y * stride + x`. `stride` may exceed `width` to
/// leave padding at the end of each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    width: usize,
    height: usize,
    stride: usize,
}

impl Geometry {
    /// Creates a geometry, rejecting a stride narrower than the width.
    pub fn new(width: usize, height: usize, stride: usize) -> Result<Self> {
        if stride < width {
            bail!(
                "grid stride {} is smaller than its width {}",
                stride,
                width
            );
        }
        Ok(Self {
            width,
            height,
            stride,
        })
    }

    /// A geometry without row padding.
    pub fn packed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            stride: width,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Buffer distance between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// True when the grid has no logical cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of logical cells (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Minimum backing buffer length. The last row carries no padding.
    pub fn buffer_len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.stride * (self.height - 1) + self.width
        }
    }

    /// Buffer offset of `(x, y)`. Does not check bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    /// Maps a signed column onto the grid as if its edges were joined,
    /// so `-1` is the last column and `width` is column 0.
    #[inline]
    pub fn wrap_x(&self, x: isize) -> usize {
        x.rem_euclid(self.width as isize) as usize
    }

    /// True if `(x, y)` is a logical cell of this geometry.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }
}

/// A 2D buffer laid out according to a `Geometry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    geometry: Geometry,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Allocates a grid with every cell (padding included) set to `T::default()`.
    pub fn new(geometry: Geometry) -> Self {
        Self::filled(geometry, T::default())
    }

    /// Allocates a grid with every cell set to `value`.
    pub fn filled(geometry: Geometry, value: T) -> Self {
        Self {
            geometry,
            data: vec![value; geometry.buffer_len()],
        }
    }
}

impl<T: Copy> Grid<T> {
    /// Wraps a caller-allocated buffer. The buffer may be longer than the
    /// geometry needs; extra cells are kept but never touched.
    pub fn from_vec(geometry: Geometry, data: Vec<T>) -> Result<Self> {
        let needed = geometry.buffer_len();
        if data.len() < needed {
            bail!(
                "buffer holds {} cells but a {}x{} grid with stride {} needs {}",
                data.len(),
                geometry.width,
                geometry.height,
                geometry.stride,
                needed
            );
        }
        Ok(Self { geometry, data })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn width(&self) -> usize {
        self.geometry.width
    }

    pub fn height(&self) -> usize {
        self.geometry.height
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Value at `(x, y)`, or `None` outside the logical area.
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if self.geometry.contains(x, y) {
            Some(self.data[self.geometry.index(x, y)])
        } else {
            None
        }
    }

    /// Mutable cell at `(x, y)`, or `None` outside the logical area.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if self.geometry.contains(x, y) {
            let idx = self.geometry.index(x, y);
            Some(&mut self.data[idx])
        } else {
            None
        }
    }

    /// Writes `value` at `(x, y)`. Returns false if the cell is outside the
    /// logical area.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
        match self.get_mut(x, y) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Sets every logical cell to `value`; padding is left alone.
    pub fn fill(&mut self, value: T) {
        for cell in self.cells_mut() {
            *cell = value;
        }
    }

    /// Logical cells in row-major order, skipping stride padding.
    pub fn cells(&self) -> impl Iterator<Item = &T> + '_ {
        let Geometry { width, stride, .. } = self.geometry;
        self.rows_range()
            .flat_map(move |y| self.data[y * stride..y * stride + width].iter())
    }

    /// Mutable logical cells in row-major order, skipping stride padding.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        let Geometry {
            width,
            height,
            stride,
        } = self.geometry;
        let rows = if self.geometry.is_empty() { 0 } else { height };
        // One chunk per row; the last chunk is the unpadded final row.
        self.data
            .chunks_mut(stride.max(1))
            .take(rows)
            .flat_map(move |row| row.iter_mut().take(width))
    }

    /// The whole backing buffer, padding included.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Gives the backing buffer back to the caller.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn rows_range(&self) -> std::ops::Range<usize> {
        if self.geometry.is_empty() {
            0..0
        } else {
            0..self.geometry.height
        }
    }
}
