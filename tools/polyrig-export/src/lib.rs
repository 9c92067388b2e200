//! polyrig-export library
//!
//! Manifest-driven rig builds and single-part exports, shared by the
//! `polyrig-export` binary and its tests.

pub mod geometry;
pub mod inspect;
pub mod manifest;

pub use geometry::{Description, GeometryFile, build_geometry, write_json};
pub use manifest::{Manifest, build_all, load_manifest, validate};
