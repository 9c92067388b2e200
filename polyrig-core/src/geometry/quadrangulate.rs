//! Fan quadrangulation for quad-only destinations
//!
//! Poly-mesh consumers only accept 4-corner polygons, so every face becomes
//! `ceil((k - 2) / 2)` quads anchored at corner 0. When `k - 2` is odd the
//! last quad covers a single triangle and repeats its final corner.

use smallvec::SmallVec;

use crate::obj::{Corner, Face};

/// Four full corners, in source winding order.
pub type Quad = [Corner; 4];

/// Quads a face of `corners` corners decomposes into.
pub fn quad_count(corners: usize) -> usize {
    corners.saturating_sub(2).div_ceil(2)
}

pub fn quadrangulate_face(face: &Face) -> SmallVec<[Quad; 2]> {
    let c = face.corners();
    let k = c.len();
    let mut quads = SmallVec::with_capacity(quad_count(k));

    let mut j = 0;
    while j + 2 < k {
        if j + 3 == k {
            quads.push([c[0], c[j + 1], c[j + 2], c[j + 2]]);
        } else {
            quads.push([c[0], c[j + 1], c[j + 2], c[j + 3]]);
        }
        j += 2;
    }

    quads
}

/// Quadrangulate faces in order into a freshly allocated list.
pub fn quadrangulate_faces<'a>(faces: impl IntoIterator<Item = &'a Face>) -> Vec<Quad> {
    faces.into_iter().flat_map(quadrangulate_face).collect()
}
