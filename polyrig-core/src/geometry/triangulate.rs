//! Fan triangulation and flat render arrays

use crate::error::{MeshResult, Stream, lookup};
use crate::obj::{Corner, Face, ObjModel};

/// Fan-triangulate a face: `(c0, c[i+1], c[i+2])` for `i in 0..k-2`.
pub fn triangulate_face(face: &Face) -> impl Iterator<Item = [Corner; 3]> + '_ {
    let corners = face.corners();
    (0..face.triangle_count()).map(move |i| [corners[0], corners[i + 1], corners[i + 2]])
}

/// Flat, non-indexed triangle arrays for drawing the whole model.
///
/// Vertex `n` of these arrays is logical vertex `n`, so a group's
/// `vertices` range selects exactly that group's triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderArrays {
    /// xyz per vertex
    pub positions: Vec<f32>,
    /// uv per vertex, V flipped (`1 - v`)
    pub uvs: Vec<f32>,
    pub vertex_count: usize,
}

impl RenderArrays {
    /// Triangulate every face of the model.
    ///
    /// Fails on the first corner whose position or uv index does not
    /// address an existing entry.
    pub fn build(model: &ObjModel) -> MeshResult<Self> {
        let vertex_count = model.logical_vertex_count();
        let mut positions = Vec::with_capacity(vertex_count * 3);
        let mut uvs = Vec::with_capacity(vertex_count * 2);

        for face in &model.faces {
            for corner in triangulate_face(face).flatten() {
                let position = lookup(Stream::Position, &model.positions, corner.position)?;
                let uv = lookup(Stream::Uv, &model.uvs, corner.uv)?;
                positions.extend_from_slice(&position);
                uvs.extend_from_slice(&[uv[0], 1.0 - uv[1]]);
            }
        }

        Ok(Self {
            positions,
            uvs,
            vertex_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;

    fn fan(k: u32) -> Face {
        Face::new((0..k).map(|i| Corner::new(i, i, 0)))
    }

    #[test]
    fn test_triangle_count_is_k_minus_two() {
        for k in 3..10 {
            assert_eq!(triangulate_face(&fan(k)).count(), k as usize - 2);
        }
        assert_eq!(triangulate_face(&fan(2)).count(), 0);
        assert_eq!(triangulate_face(&Face::default()).count(), 0);
    }

    #[test]
    fn test_fan_is_anchored_at_first_corner() {
        let positions: Vec<[u32; 3]> = triangulate_face(&fan(5))
            .map(|tri| tri.map(|c| c.position))
            .collect();
        assert_eq!(positions, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }

    #[test]
    fn test_render_arrays_flip_v() {
        let model = ObjModel::parse(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nvt 1 0.25\nvt 1 1\nvt 0 1\n\
             f 1/1/1 2/2/1 3/3/1 4/4/1\n",
        );
        let arrays = RenderArrays::build(&model).unwrap();

        assert_eq!(arrays.vertex_count, 6);
        assert_eq!(arrays.positions.len(), 18);
        assert_eq!(arrays.uvs.len(), 12);
        assert_eq!(&arrays.positions[0..9], &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        assert_eq!(&arrays.uvs[0..6], &[0.0, 1.0, 1.0, 0.75, 1.0, 0.0]);
    }

    #[test]
    fn test_group_vertex_range_selects_its_triangles() {
        let model = ObjModel::parse(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 5 5 5\nv 6 5 5\nv 6 6 5\nvt 0 0\n\
             o Part\ng base\nf 1/1/1 2/1/1 3/1/1 4/1/1\ng tip\nf 5/1/1 6/1/1 7/1/1\n",
        );
        let arrays = RenderArrays::build(&model).unwrap();
        let tip = model.find_group("Part/tip").unwrap();

        assert_eq!(tip.vertices, 6..9);
        assert_eq!(
            &arrays.positions[tip.vertices.start * 3..tip.vertices.end * 3],
            &[5.0, 5.0, 5.0, 6.0, 5.0, 5.0, 6.0, 6.0, 5.0]
        );

        let base = model.find_group("Part/base").unwrap();
        let base_positions = &arrays.positions[base.vertices.start * 3..base.vertices.end * 3];
        assert_eq!(base_positions.len(), 18);
        assert!(base_positions.iter().all(|&x| x <= 1.0));
    }

    #[test]
    fn test_render_arrays_reject_missing_uv() {
        let model = ObjModel::parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1/1/1 2/1/1 3/1/1\n");
        assert!(matches!(
            RenderArrays::build(&model),
            Err(MeshError::IndexOutOfRange {
                stream: Stream::Uv,
                index: 0,
                len: 0
            })
        ));
    }
}
