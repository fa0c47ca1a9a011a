// src/noise.rs

//! 8-bit fixed-point 3D Perlin noise.
//!
//! Coordinates are 8.8 fixed point: the high byte selects the lattice cell
//! and the low byte is the position inside it. Everything is integer math
//! over a constant permutation table, so sampling is pure and can run from
//! any thread.

use crate::math8::{avg7, ease8_in_out_quad, lerp7by8, qadd8};

/// Ken Perlin's reference permutation, with the first entry repeated at the
/// end so `PERMUTATION[i + 1]` is valid for every byte `i`.
pub static PERMUTATION: [u8; 257] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, //
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, //
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32, //
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175, //
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, //
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, //
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169, //
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64, //
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, //
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, //
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, //
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104, //
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241, //
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, //
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, //
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180, //
    151,
];

/// Offset from a cell's near corner to its far corner in relative coordinates.
const FAR: i16 = 0x80;

#[inline]
fn perm(i: usize) -> u8 {
    PERMUTATION[i]
}

/// Signed position inside the cell measured from the near corner, 0..=127.
#[inline]
fn near(frac: u8) -> i8 {
    ((frac >> 1) & 0x7F) as i8
}

/// The same position measured from the far corner, -128..=-1.
#[inline]
fn far(rel: i8) -> i8 {
    (rel as i16 - FAR) as i8
}

/// Pseudo dot product of one of 16 gradient directions with the relative
/// position, picked by the low nibble of `hash`.
///
/// Two of the three components are selected, sign-flipped by hash bits 0
/// and 1, and averaged.
fn grad8(hash: u8, x: i8, y: i8, z: i8) -> i8 {
    let hash = hash & 0x0F;

    let mut u = if hash & 0x08 != 0 { y } else { x };
    let mut v = if hash < 4 {
        y
    } else if hash == 12 || hash == 14 {
        x
    } else {
        z
    };

    if hash & 1 != 0 {
        u = u.wrapping_neg();
    }
    if hash & 2 != 0 {
        v = v.wrapping_neg();
    }

    avg7(u, v)
}

/// Samples 3D noise at an 8.8 fixed-point coordinate.
///
/// Returns roughly -64..=64, and exactly 0 on lattice points.
pub fn sample_noise(x: u16, y: u16, z: u16) -> i8 {
    let [fx, cx] = x.to_le_bytes();
    let [fy, cy] = y.to_le_bytes();
    let [fz, cz] = z.to_le_bytes();

    // Corner hashes.
    let a = perm(cx as usize).wrapping_add(cy) as usize;
    let aa = perm(a).wrapping_add(cz) as usize;
    let ab = perm(a + 1).wrapping_add(cz) as usize;
    let b = perm(cx as usize + 1).wrapping_add(cy) as usize;
    let ba = perm(b).wrapping_add(cz) as usize;
    let bb = perm(b + 1).wrapping_add(cz) as usize;

    let (xx, yy, zz) = (near(fx), near(fy), near(fz));
    let (xf, yf, zf) = (far(xx), far(yy), far(zz));

    let u = ease8_in_out_quad(fx);
    let v = ease8_in_out_quad(fy);
    let w = ease8_in_out_quad(fz);

    let x1 = lerp7by8(grad8(perm(aa), xx, yy, zz), grad8(perm(ba), xf, yy, zz), u);
    let x2 = lerp7by8(grad8(perm(ab), xx, yf, zz), grad8(perm(bb), xf, yf, zz), u);
    let x3 = lerp7by8(
        grad8(perm(aa + 1), xx, yy, zf),
        grad8(perm(ba + 1), xf, yy, zf),
        u,
    );
    let x4 = lerp7by8(
        grad8(perm(ab + 1), xx, yf, zf),
        grad8(perm(bb + 1), xf, yf, zf),
        u,
    );

    let y1 = lerp7by8(x1, x2, v);
    let y2 = lerp7by8(x3, x4, v);

    lerp7by8(y1, y2, w)
}

/// Noise remapped to the full byte range with doubled contrast.
///
/// The centered sample is shifted up by 64 and then doubled with a
/// saturating add, so peaks clip at 255 instead of wrapping.
pub fn noise8(x: u16, y: u16, z: u16) -> u8 {
    let n = (sample_noise(x, y, z) as i16 + 64) as u8;
    qadd8(n, n)
}
