//! Sub-mesh export
//!
//! Faces are quadrangulated, their attribute streams compacted to what they
//! reference, and positions mirrored into the destination's handedness.

mod compact;
mod poly_mesh;


pub use compact::{CompactedMesh, compact_quads};
pub use poly_mesh::{PolyMesh, export_faces, export_groups, export_model};
