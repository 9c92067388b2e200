//! Rigged geometry documents
//!
//! A geometry document lists the skeleton's bones; bones with parts
//! assigned carry the poly mesh exported from those parts' faces.

use anyhow::{Context, Result};
use polyrig_core::{Bone, ObjModel, PolyMesh, export_faces};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Geometry format version that supports poly meshes.
pub const FORMAT_VERSION: &str = "1.12.0";

#[derive(Debug, Serialize)]
pub struct GeometryFile {
    pub format_version: String,
    #[serde(rename = "minecraft:geometry")]
    pub geometry: Vec<Geometry>,
}

#[derive(Debug, Serialize)]
pub struct Geometry {
    pub description: Description,
    pub bones: Vec<GeometryBone>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Description {
    pub identifier: String,
    pub texture_width: u32,
    pub texture_height: u32,
}

#[derive(Debug, Serialize)]
pub struct GeometryBone {
    #[serde(flatten)]
    pub bone: Bone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poly_mesh: Option<PolyMesh>,
}

/// Build a geometry document, exporting each bone's assigned groups.
///
/// `parts` maps bone names to group display names. Bones without parts,
/// or whose parts select no faces, are emitted without a poly mesh.
pub fn build_geometry(
    model: &ObjModel,
    bones: &[Bone],
    parts: &BTreeMap<String, Vec<String>>,
    description: Description,
) -> Result<GeometryFile> {
    let mut out = Vec::with_capacity(bones.len());

    for bone in bones {
        let poly_mesh = match parts.get(&bone.name) {
            Some(groups) => {
                let faces = model
                    .select_groups(groups.as_slice())
                    .with_context(|| format!("Bone '{}' references an unknown group", bone.name))?;
                let mesh = export_faces(model, &faces)
                    .with_context(|| format!("Failed to export mesh for bone '{}'", bone.name))?;
                if let Some(mesh) = &mesh {
                    tracing::info!(
                        "Bone {}: {} faces -> {} polys, {} positions",
                        bone.name,
                        faces.len(),
                        mesh.poly_count(),
                        mesh.positions.len()
                    );
                }
                mesh
            }
            None => None,
        };

        out.push(GeometryBone {
            bone: bone.clone(),
            poly_mesh,
        });
    }

    Ok(GeometryFile {
        format_version: FORMAT_VERSION.to_string(),
        geometry: vec![Geometry {
            description,
            bones: out,
        }],
    })
}

/// Write any serializable export as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize geometry")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    std::fs::write(path, json).with_context(|| format!("Failed to write output: {:?}", path))?;
    Ok(())
}
