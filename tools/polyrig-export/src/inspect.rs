//! Human-readable model summaries

use polyrig_core::ObjModel;
use std::fmt::Write;

/// One line per group with its face and logical-vertex ranges, followed by
/// stream totals and any parse diagnostics.
pub fn summarize(model: &ObjModel) -> String {
    let mut out = String::new();

    for object in &model.objects {
        let _ = writeln!(
            out,
            "{}  faces {}..{}  vertices {}..{}",
            object.display_name(),
            object.faces.start,
            object.faces.end,
            object.vertices.start,
            object.vertices.end
        );
        for group in &object.groups {
            let _ = writeln!(
                out,
                "  {}  faces {}..{}  vertices {}..{}",
                group.display_name,
                group.faces.start,
                group.faces.end,
                group.vertices.start,
                group.vertices.end
            );
        }
    }

    let _ = writeln!(
        out,
        "{} positions, {} normals, {} uvs, {} faces",
        model.positions.len(),
        model.normals.len(),
        model.uvs.len(),
        model.face_count()
    );
    for diagnostic in &model.diagnostics {
        let _ = writeln!(out, "warning: {}", diagnostic);
    }

    out
}
