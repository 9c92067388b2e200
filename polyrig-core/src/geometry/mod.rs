//! Fan decomposition of parsed faces
//!
//! Both decompositions anchor every generated polygon at corner 0 and keep
//! the source winding. Faces are assumed convex and planar; anything else
//! still produces structurally valid output.

mod quadrangulate;
mod triangulate;

pub use quadrangulate::{Quad, quad_count, quadrangulate_face, quadrangulate_faces};
pub use triangulate::{RenderArrays, triangulate_face};
