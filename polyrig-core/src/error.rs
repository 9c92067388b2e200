//! Error types for mesh parsing and export

use std::fmt;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Attribute stream a corner index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Position,
    Uv,
    Normal,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Position => write!(f, "position"),
            Stream::Uv => write!(f, "uv"),
            Stream::Normal => write!(f, "normal"),
        }
    }
}

/// Errors raised while emitting or exporting parsed mesh data.
///
/// Parsing itself never fails on content; see [`crate::obj::Diagnostic`].
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("{stream} index {index} out of range ({len} entries)")]
    IndexOutOfRange {
        stream: Stream,
        index: u32,
        len: usize,
    },

    #[error("face {face} out of range ({face_count} faces)")]
    FaceOutOfRange { face: usize, face_count: usize },

    #[error("unknown group: {0}")]
    UnknownGroup(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetch `values[index]`, failing with [`MeshError::IndexOutOfRange`].
pub(crate) fn lookup<T: Copy>(stream: Stream, values: &[T], index: u32) -> MeshResult<T> {
    values
        .get(index as usize)
        .copied()
        .ok_or(MeshError::IndexOutOfRange {
            stream,
            index,
            len: values.len(),
        })
}
