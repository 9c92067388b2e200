//! Poly-mesh export of face subsets

use serde::Serialize;

use crate::error::{MeshError, MeshResult, Stream, lookup};
use crate::geometry::{Quad, quadrangulate_faces};
use crate::obj::ObjModel;

use super::compact::compact_quads;

/// Quad mesh in destination form.
///
/// Positions are mirrored along X; normals and uvs are exported as parsed.
/// Uvs are already in `[0, 1]`, which `normalized_uvs` declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolyMesh {
    pub normalized_uvs: bool,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub polys: Vec<Quad>,
}

impl PolyMesh {
    pub fn poly_count(&self) -> usize {
        self.polys.len()
    }
}

/// Export every face of the model. `None` for a model without faces.
pub fn export_model(model: &ObjModel) -> MeshResult<Option<PolyMesh>> {
    let all: Vec<usize> = (0..model.face_count()).collect();
    export_faces(model, &all)
}

/// Export the faces at `faces`, in the given order.
///
/// Returns `Ok(None)` for an empty selection. Selecting the whole model in
/// order keeps the full attribute arrays; any other selection is compacted
/// to the entries it references.
pub fn export_faces(model: &ObjModel, faces: &[usize]) -> MeshResult<Option<PolyMesh>> {
    if faces.is_empty() {
        return Ok(None);
    }

    let face_count = model.face_count();
    if let Some(&face) = faces.iter().find(|&&face| face >= face_count) {
        return Err(MeshError::FaceOutOfRange { face, face_count });
    }

    let quads = quadrangulate_faces(faces.iter().map(|&face| &model.faces[face]));

    let mesh = if faces.iter().copied().eq(0..face_count) {
        check_indices(&quads, model)?;
        PolyMesh {
            normalized_uvs: true,
            positions: model.positions.iter().copied().map(mirror_x).collect(),
            normals: model.normals.clone(),
            uvs: model.uvs.clone(),
            polys: quads,
        }
    } else {
        let compacted = compact_quads(&quads, &model.positions, &model.normals, &model.uvs)?;
        PolyMesh {
            normalized_uvs: true,
            positions: compacted.positions.into_iter().map(mirror_x).collect(),
            normals: compacted.normals,
            uvs: compacted.uvs,
            polys: compacted.quads,
        }
    };

    tracing::debug!(
        "Exported {} faces as {} polys ({} positions)",
        faces.len(),
        mesh.polys.len(),
        mesh.positions.len()
    );
    Ok(Some(mesh))
}

/// Export the faces of the named groups (display names).
pub fn export_groups<S: AsRef<str>>(
    model: &ObjModel,
    display_names: &[S],
) -> MeshResult<Option<PolyMesh>> {
    let faces = model.select_groups(display_names)?;
    export_faces(model, &faces)
}

fn mirror_x([x, y, z]: [f32; 3]) -> [f32; 3] {
    [-x, y, z]
}

fn check_indices(quads: &[Quad], model: &ObjModel) -> MeshResult<()> {
    for corner in quads.iter().flatten() {
        lookup(Stream::Position, &model.positions, corner.position)?;
        lookup(Stream::Normal, &model.normals, corner.normal)?;
        lookup(Stream::Uv, &model.uvs, corner.uv)?;
    }
    Ok(())
}
