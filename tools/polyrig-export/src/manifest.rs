//! Manifest parsing and build orchestration
//!
//! Parses rig.toml and turns one OBJ model into a rigged geometry file.

use anyhow::{Context, Result};
use polyrig_core::skeleton::{dangling_parents, find_bone};
use polyrig_core::{Bone, ObjModel, default_humanoid_bones};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::geometry::{Description, build_geometry, write_json};

/// Extension appended to the model's stem when no output path is given.
pub const GEOMETRY_EXT: &str = "geo.json";

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub model: ModelSection,
    #[serde(default)]
    pub output: OutputSection,
    /// Custom skeleton. Empty means the default humanoid skeleton.
    #[serde(default)]
    pub bones: Vec<Bone>,
    /// Bone name -> group display names assigned to it.
    #[serde(default)]
    pub parts: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ModelSection {
    /// OBJ source, relative to the manifest
    pub obj: PathBuf,
    #[serde(default = "default_identifier")]
    pub identifier: String,
    #[serde(default = "default_texture_size")]
    pub texture_width: u32,
    #[serde(default = "default_texture_size")]
    pub texture_height: u32,
}

fn default_identifier() -> String {
    "geometry.unknown".to_string()
}

fn default_texture_size() -> u32 {
    64
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Geometry file, relative to the manifest
    pub path: Option<PathBuf>,
}

impl Manifest {
    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse rig manifest")
    }

    pub fn bones(&self) -> Vec<Bone> {
        if self.bones.is_empty() {
            default_humanoid_bones()
        } else {
            self.bones.clone()
        }
    }

    pub fn description(&self) -> Description {
        Description {
            identifier: self.model.identifier.clone(),
            texture_width: self.model.texture_width,
            texture_height: self.model.texture_height,
        }
    }

    pub fn obj_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.model.obj)
    }

    /// Output path: override, then `[output].path`, then `<obj>.geo.json`.
    pub fn output_path(&self, base_dir: &Path, output_override: Option<&Path>) -> PathBuf {
        if let Some(path) = output_override {
            return path.to_path_buf();
        }
        match &self.output.path {
            Some(path) => base_dir.join(path),
            None => self.obj_path(base_dir).with_extension(GEOMETRY_EXT),
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    Manifest::parse(&content).with_context(|| format!("Failed to parse manifest: {:?}", path))
}

/// Directory manifest-relative paths resolve against.
pub fn manifest_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new("."))
}

fn load_model(manifest: &Manifest, base_dir: &Path) -> Result<ObjModel> {
    let obj = manifest.obj_path(base_dir);
    if !obj.exists() {
        anyhow::bail!("Model source not found: {:?}", obj);
    }
    let model = ObjModel::load(&obj).with_context(|| format!("Failed to load OBJ: {:?}", obj))?;
    if !model.diagnostics.is_empty() {
        tracing::warn!(
            "{:?}: {} lines skipped or repaired while parsing",
            obj,
            model.diagnostics.len()
        );
    }
    Ok(model)
}

/// Check the manifest against its model without writing anything.
pub fn validate(manifest: &Manifest, base_dir: &Path) -> Result<()> {
    let model = load_model(manifest, base_dir)?;
    check_parts(manifest, &manifest.bones(), &model)
}

fn check_parts(manifest: &Manifest, bones: &[Bone], model: &ObjModel) -> Result<()> {
    let dangling = dangling_parents(bones);
    if !dangling.is_empty() {
        anyhow::bail!("Bones with unknown parents: {}", dangling.join(", "));
    }

    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
    for (bone, groups) in &manifest.parts {
        if find_bone(bones, bone).is_none() {
            anyhow::bail!("Part assigned to unknown bone '{}'", bone);
        }
        for group in groups {
            if model.find_group(group).is_none() {
                anyhow::bail!("Bone '{}' references unknown group '{}'", bone, group);
            }
            if let Some(previous) = owners.insert(group.as_str(), bone.as_str()) {
                tracing::warn!(
                    "Group '{}' is assigned to both '{}' and '{}'",
                    group,
                    previous,
                    bone
                );
            }
        }
    }

    let unassigned = model
        .groups()
        .filter(|group| !group.faces.is_empty())
        .filter(|group| !owners.contains_key(group.display_name.as_str()))
        .count();
    if unassigned > 0 {
        tracing::warn!("{} non-empty groups are not assigned to any bone", unassigned);
    }

    Ok(())
}

/// Build the geometry file described by a manifest. Returns the written path.
pub fn build_all(
    manifest: &Manifest,
    base_dir: &Path,
    output_override: Option<&Path>,
) -> Result<PathBuf> {
    let model = load_model(manifest, base_dir)?;
    let bones = manifest.bones();
    check_parts(manifest, &bones, &model)?;

    let output = manifest.output_path(base_dir, output_override);
    tracing::info!("Building geometry: {:?} -> {:?}", manifest.model.obj, output);

    let file = build_geometry(&model, &bones, &manifest.parts, manifest.description())?;
    write_json(&output, &file)?;

    Ok(output)
}
