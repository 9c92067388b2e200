//! Wavefront OBJ model data
//!
//! Attribute streams, indexed polygonal faces and the object/group tree
//! built from `o` and `g` directives.
//!
//! All indices are 0-based once parsed (the text format is 1-based).
//! Ranges are expressed both in face units and in logical vertices, which
//! count the corners a fan triangulation of the faces would emit
//! (`(corners - 2) * 3` per face).

mod parse;
mod ranges;


use std::fmt;
use std::ops::Range;
use std::path::Path;

use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use crate::error::{MeshError, MeshResult, Stream};

pub use parse::parse_obj;

/// Display name used for objects without a name.
pub const DEFAULT_OBJECT_NAME: &str = "<default>";

/// One (position, uv, normal) index triple of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corner {
    pub position: u32,
    pub uv: u32,
    pub normal: u32,
}

impl Corner {
    pub const fn new(position: u32, uv: u32, normal: u32) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }

    /// Index into the given attribute stream.
    pub fn index(&self, stream: Stream) -> u32 {
        match stream {
            Stream::Position => self.position,
            Stream::Uv => self.uv,
            Stream::Normal => self.normal,
        }
    }

    pub fn index_mut(&mut self, stream: Stream) -> &mut u32 {
        match stream {
            Stream::Position => &mut self.position,
            Stream::Uv => &mut self.uv,
            Stream::Normal => &mut self.normal,
        }
    }
}

/// Corners serialize as `[position, normal, uv]`, the order poly-mesh
/// consumers expect.
impl Serialize for Corner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.position, self.normal, self.uv].serialize(serializer)
    }
}

/// Ordered corners of one polygon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Face {
    corners: SmallVec<[Corner; 4]>,
}

impl Face {
    pub fn new(corners: impl IntoIterator<Item = Corner>) -> Self {
        Self {
            corners: corners.into_iter().collect(),
        }
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    pub fn len(&self) -> usize {
        self.corners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    /// Triangles a fan triangulation emits (0 for faces under 3 corners).
    pub fn triangle_count(&self) -> usize {
        self.corners.len().saturating_sub(2)
    }

    /// Logical vertices this face contributes to range accounting.
    pub fn logical_vertex_count(&self) -> usize {
        self.triangle_count() * 3
    }
}

/// A contiguous run of faces belonging to one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshGroup {
    /// Name from the `g` directive; empty for synthesized default groups.
    pub name: String,
    /// `object/group`, or the object's display name for unnamed groups.
    pub display_name: String,
    pub faces: Range<usize>,
    /// Logical-vertex range; also the slice of [`crate::geometry::RenderArrays`]
    /// to draw when highlighting this group.
    pub vertices: Range<usize>,
}

/// A named collection of groups. Always holds at least one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshObject {
    /// Name from the `o` directive; empty for synthesized default objects.
    pub name: String,
    pub faces: Range<usize>,
    pub vertices: Range<usize>,
    pub groups: Vec<MeshGroup>,
}

impl MeshObject {
    pub fn display_name(&self) -> &str {
        object_display_name(&self.name)
    }
}

pub(crate) fn object_display_name(name: &str) -> &str {
    if name.is_empty() {
        DEFAULT_OBJECT_NAME
    } else {
        name
    }
}

pub(crate) fn group_display_name(object: &str, group: &str) -> String {
    let object = object_display_name(object);
    if group.is_empty() {
        object.to_string()
    } else {
        format!("{}/{}", object, group)
    }
}

/// Something the parser skipped or repaired while reading a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line.
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Leading token is not one of `v`, `vn`, `vt`, `o`, `g`, `f`.
    UnknownDirective(String),
    /// Face corner that is not three `/`-separated integers.
    MalformedCorner(String),
    /// Face corner with an empty index, e.g. `1//1` (no uv).
    MissingIndex(String),
    /// Zero or negative (relative) face index.
    UnsupportedIndex(String),
    /// Token that does not parse as a float; 0.0 was stored instead.
    InvalidNumber(String),
    /// Attribute line with too few components; missing ones were zeroed.
    MissingComponents { expected: usize, found: usize },
    /// Face left with fewer than three corners.
    DegenerateFace { corners: usize },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnknownDirective(token) => {
                write!(f, "unexpected directive '{}'", token)
            }
            DiagnosticKind::MalformedCorner(corner) => {
                write!(f, "unsupported face corner '{}' (expected v/vt/vn)", corner)
            }
            DiagnosticKind::MissingIndex(corner) => {
                write!(f, "face corner '{}' has an empty index", corner)
            }
            DiagnosticKind::UnsupportedIndex(corner) => {
                write!(f, "relative or zero index in face corner '{}'", corner)
            }
            DiagnosticKind::InvalidNumber(token) => write!(f, "invalid number '{}'", token),
            DiagnosticKind::MissingComponents { expected, found } => {
                write!(f, "expected {} components, found {}", expected, found)
            }
            DiagnosticKind::DegenerateFace { corners } => {
                write!(f, "face has only {} usable corners", corners)
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

/// A parsed OBJ model with completed object/group ranges.
#[derive(Debug, Clone, Default)]
pub struct ObjModel {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub faces: Vec<Face>,
    pub objects: Vec<MeshObject>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ObjModel {
    /// Parse OBJ text. Never fails; problems land in `diagnostics`.
    pub fn parse(text: &str) -> Self {
        parse_obj(text)
    }

    /// Read and parse an OBJ file.
    pub fn load(path: &Path) -> MeshResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let model = parse_obj(&text);
        tracing::debug!(
            "Loaded {:?}: {} positions, {} faces, {} objects, {} diagnostics",
            path,
            model.positions.len(),
            model.faces.len(),
            model.objects.len(),
            model.diagnostics.len()
        );
        Ok(model)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Total logical vertices (what a full fan triangulation emits).
    pub fn logical_vertex_count(&self) -> usize {
        self.faces.iter().map(Face::logical_vertex_count).sum()
    }

    /// All groups in source order.
    pub fn groups(&self) -> impl Iterator<Item = &MeshGroup> {
        self.objects.iter().flat_map(|object| object.groups.iter())
    }

    /// Every group record with this display name. A group reopened later
    /// in the file yields one record per run.
    pub fn groups_named<'a>(&'a self, display_name: &str) -> impl Iterator<Item = &'a MeshGroup> {
        self.groups().filter(move |group| group.display_name == display_name)
    }

    /// First group record with this display name.
    pub fn find_group(&self, display_name: &str) -> Option<&MeshGroup> {
        self.groups_named(display_name).next()
    }

    /// Ascending, de-duplicated face indices covered by the named groups,
    /// including every run of a reopened group.
    pub fn select_groups<S: AsRef<str>>(&self, display_names: &[S]) -> MeshResult<Vec<usize>> {
        let mut faces = Vec::new();
        for name in display_names {
            let name = name.as_ref();
            let mut found = false;
            for group in self.groups_named(name) {
                found = true;
                faces.extend(group.faces.clone());
            }
            if !found {
                return Err(MeshError::UnknownGroup(name.to_string()));
            }
        }
        faces.sort_unstable();
        faces.dedup();
        Ok(faces)
    }
}
