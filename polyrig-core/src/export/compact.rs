//! Index compaction for sub-mesh export
//!
//! A subset of faces usually touches a sparse slice of each attribute
//! stream. Compaction keeps only the referenced entries and renumbers them
//! densely, one stream at a time. Source arrays are only read; corners are
//! rewritten on a private copy of the quad list.

use hashbrown::{HashMap, HashSet};

use crate::error::{MeshResult, Stream, lookup};
use crate::geometry::Quad;

/// Trimmed attribute streams and the quads renumbered against them.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactedMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub quads: Vec<Quad>,
}

/// Compact every stream referenced by `quads`.
///
/// Fails if a corner points past the end of its stream.
pub fn compact_quads(
    quads: &[Quad],
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    uvs: &[[f32; 2]],
) -> MeshResult<CompactedMesh> {
    let mut quads = quads.to_vec();

    let positions = compact_stream(Stream::Position, positions, &mut quads)?;
    let normals = compact_stream(Stream::Normal, normals, &mut quads)?;
    let uvs = compact_stream(Stream::Uv, uvs, &mut quads)?;

    tracing::debug!(
        "Compacted {} quads: {} positions, {} normals, {} uvs",
        quads.len(),
        positions.len(),
        normals.len(),
        uvs.len()
    );

    Ok(CompactedMesh {
        positions,
        normals,
        uvs,
        quads,
    })
}

/// Gather the referenced entries of one stream in ascending index order
/// and rewrite that stream's corner indices to match.
fn compact_stream<T: Copy>(
    stream: Stream,
    source: &[T],
    quads: &mut [Quad],
) -> MeshResult<Vec<T>> {
    let used: HashSet<u32> = quads
        .iter()
        .flatten()
        .map(|corner| corner.index(stream))
        .collect();
    let mut sorted: Vec<u32> = used.into_iter().collect();
    sorted.sort_unstable();

    let mut remap = HashMap::with_capacity(sorted.len());
    let mut filtered = Vec::with_capacity(sorted.len());
    for (new_index, &old_index) in sorted.iter().enumerate() {
        filtered.push(lookup(stream, source, old_index)?);
        remap.insert(old_index, new_index as u32);
    }

    for corner in quads.iter_mut().flatten() {
        let index = corner.index_mut(stream);
        *index = remap[&*index];
    }

    Ok(filtered)
}
