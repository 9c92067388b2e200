//! polyrig-core
//!
//! Reads Wavefront OBJ text into attribute streams and indexed faces,
//! partitions faces into object/group ranges, and exports arbitrary face
//! subsets as compacted quad meshes.

pub mod error;
pub mod export;
pub mod geometry;
pub mod obj;
pub mod skeleton;

pub use error::{MeshError, MeshResult, Stream};
pub use export::{PolyMesh, export_faces, export_groups, export_model};
pub use geometry::{Quad, RenderArrays};
pub use obj::{Corner, Diagnostic, DiagnosticKind, Face, MeshGroup, MeshObject, ObjModel};
pub use skeleton::{Bone, default_humanoid_bones};
