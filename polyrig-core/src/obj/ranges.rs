//! Object/group range fix-up
//!
//! The parser only knows where an object or group starts. Once the whole
//! file has been read, a single backward sweep turns every start into a
//! complete `[start, end)` range, in face and logical-vertex units. Ranges
//! follow directive order in the source text, never geometry.

use super::{MeshGroup, MeshObject, group_display_name};

/// Position in the face stream, in both units ranges are kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Offset {
    pub face: usize,
    pub vertex: usize,
}

impl Offset {
    pub const ZERO: Offset = Offset { face: 0, vertex: 0 };
}

/// Start-only record of an `o` directive.
#[derive(Debug)]
pub(crate) struct ObjectMarker {
    pub name: String,
    pub start: Offset,
    pub groups: Vec<GroupMarker>,
}

/// Start-only record of a `g` directive.
#[derive(Debug)]
pub(crate) struct GroupMarker {
    pub name: String,
    pub display_name: String,
    pub start: Offset,
}

/// Complete start-only markers into contiguous object and group ranges.
///
/// Concatenating the returned objects (and, within each object, its groups)
/// covers `[0, total)` exactly.
pub(crate) fn resolve_ranges(markers: Vec<ObjectMarker>, total: Offset) -> Vec<MeshObject> {
    if markers.is_empty() {
        return vec![default_object(Offset::ZERO, total)];
    }

    let mut objects = Vec::with_capacity(markers.len() + 1);
    let mut end = total;

    for marker in markers.into_iter().rev() {
        let start = marker.start;
        let mut groups = Vec::with_capacity(marker.groups.len() + 1);
        let mut group_end = end;

        for group in marker.groups.into_iter().rev() {
            groups.push(MeshGroup {
                name: group.name,
                display_name: group.display_name,
                faces: group.start.face..group_end.face,
                vertices: group.start.vertex..group_end.vertex,
            });
            group_end = group.start;
        }

        // Faces between `o` and its first `g` (or an object with no groups)
        if groups.is_empty() || group_end.face > start.face {
            groups.push(default_group(&marker.name, start, group_end));
        }
        groups.reverse();

        objects.push(MeshObject {
            name: marker.name,
            faces: start.face..end.face,
            vertices: start.vertex..end.vertex,
            groups,
        });
        end = start;
    }

    if end.face > 0 {
        objects.push(default_object(Offset::ZERO, end));
    }
    objects.reverse();

    tracing::debug!(
        "Resolved {} objects over {} faces",
        objects.len(),
        total.face
    );
    objects
}

fn default_group(object_name: &str, start: Offset, end: Offset) -> MeshGroup {
    MeshGroup {
        name: String::new(),
        display_name: group_display_name(object_name, ""),
        faces: start.face..end.face,
        vertices: start.vertex..end.vertex,
    }
}

fn default_object(start: Offset, end: Offset) -> MeshObject {
    MeshObject {
        name: String::new(),
        faces: start.face..end.face,
        vertices: start.vertex..end.vertex,
        groups: vec![default_group("", start, end)],
    }
}
