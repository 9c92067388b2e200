//! Line-oriented OBJ text parser

use std::str::SplitWhitespace;

use super::ranges::{GroupMarker, ObjectMarker, Offset, resolve_ranges};
use super::{Corner, Diagnostic, DiagnosticKind, Face, ObjModel, group_display_name};

/// Parse OBJ text into attribute streams, faces and object/group ranges.
///
/// Unknown directives and malformed corners are reported as diagnostics
/// and skipped; parsing always reaches the end of the input.
pub fn parse_obj(text: &str) -> ObjModel {
    let mut parser = Parser::default();
    for (index, line) in text.lines().enumerate() {
        parser.parse_line(index + 1, line);
    }
    parser.finish()
}

#[derive(Default)]
struct Parser {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    faces: Vec<Face>,
    logical_vertices: usize,
    markers: Vec<ObjectMarker>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    fn parse_line(&mut self, line_no: usize, raw: &str) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return;
        };
        let rest = line[keyword.len()..].trim();

        match keyword {
            "v" => {
                let position = self.read_floats::<3>(line_no, &mut tokens);
                self.positions.push(position);
            }
            "vn" => {
                let normal = self.read_floats::<3>(line_no, &mut tokens);
                self.normals.push(normal);
            }
            // Only u and v; an optional w is ignored
            "vt" => {
                let uv = self.read_floats::<2>(line_no, &mut tokens);
                self.uvs.push(uv);
            }
            "o" => self.begin_object(rest),
            "g" => self.begin_group(rest),
            "f" => self.push_face(line_no, tokens),
            other => self.diagnose(line_no, DiagnosticKind::UnknownDirective(other.to_string())),
        }
    }

    fn offset(&self) -> Offset {
        Offset {
            face: self.faces.len(),
            vertex: self.logical_vertices,
        }
    }

    fn begin_object(&mut self, name: &str) {
        self.markers.push(ObjectMarker {
            name: name.to_string(),
            start: self.offset(),
            groups: Vec::new(),
        });
    }

    fn begin_group(&mut self, name: &str) {
        let start = self.offset();
        if self.markers.is_empty() {
            // Groups ahead of any `o` live in an unnamed object covering the
            // leading faces too.
            self.markers.push(ObjectMarker {
                name: String::new(),
                start: Offset::ZERO,
                groups: Vec::new(),
            });
        }
        if let Some(object) = self.markers.last_mut() {
            object.groups.push(GroupMarker {
                name: name.to_string(),
                display_name: group_display_name(&object.name, name),
                start,
            });
        }
    }

    fn push_face(&mut self, line_no: usize, tokens: SplitWhitespace<'_>) {
        let mut face = Face::default();
        for token in tokens {
            match parse_corner(token) {
                Ok(corner) => face.corners.push(corner),
                Err(kind) => self.diagnose(line_no, kind),
            }
        }

        if face.len() < 3 {
            self.diagnose(
                line_no,
                DiagnosticKind::DegenerateFace {
                    corners: face.len(),
                },
            );
        }

        self.logical_vertices += face.logical_vertex_count();
        self.faces.push(face);
    }

    fn read_floats<const N: usize>(
        &mut self,
        line_no: usize,
        tokens: &mut SplitWhitespace<'_>,
    ) -> [f32; N] {
        let mut values = [0.0; N];
        for (found, value) in values.iter_mut().enumerate() {
            let Some(token) = tokens.next() else {
                self.diagnose(
                    line_no,
                    DiagnosticKind::MissingComponents { expected: N, found },
                );
                break;
            };
            match token.parse::<f32>() {
                Ok(parsed) => *value = parsed,
                Err(_) => self.diagnose(line_no, DiagnosticKind::InvalidNumber(token.to_string())),
            }
        }
        values
    }

    fn diagnose(&mut self, line: usize, kind: DiagnosticKind) {
        tracing::warn!("OBJ line {}: {}", line, kind);
        self.diagnostics.push(Diagnostic { line, kind });
    }

    fn finish(self) -> ObjModel {
        let total = self.offset();
        let objects = resolve_ranges(self.markers, total);
        tracing::debug!(
            "Parsed OBJ: {} positions, {} normals, {} uvs, {} faces ({} vertices), {} objects",
            self.positions.len(),
            self.normals.len(),
            self.uvs.len(),
            total.face,
            total.vertex,
            objects.len()
        );

        ObjModel {
            positions: self.positions,
            normals: self.normals,
            uvs: self.uvs,
            faces: self.faces,
            objects,
            diagnostics: self.diagnostics,
        }
    }
}

/// Parse a `v/vt/vn` corner into 0-based indices.
fn parse_corner(token: &str) -> Result<Corner, DiagnosticKind> {
    let mut parts = token.split('/');
    let (Some(v), Some(vt), Some(vn), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(DiagnosticKind::MalformedCorner(token.to_string()));
    };

    Ok(Corner {
        position: parse_index(token, v)?,
        uv: parse_index(token, vt)?,
        normal: parse_index(token, vn)?,
    })
}

fn parse_index(token: &str, part: &str) -> Result<u32, DiagnosticKind> {
    if part.is_empty() {
        return Err(DiagnosticKind::MissingIndex(token.to_string()));
    }
    let index: i64 = part
        .parse()
        .map_err(|_| DiagnosticKind::MalformedCorner(token.to_string()))?;
    if index < 1 {
        return Err(DiagnosticKind::UnsupportedIndex(token.to_string()));
    }
    u32::try_from(index - 1).map_err(|_| DiagnosticKind::UnsupportedIndex(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corner_is_zero_based() {
        assert_eq!(parse_corner("3/2/1"), Ok(Corner::new(2, 1, 0)));
    }

    #[test]
    fn test_parse_corner_requires_three_parts() {
        assert!(matches!(
            parse_corner("1/2"),
            Err(DiagnosticKind::MalformedCorner(_))
        ));
        assert!(matches!(
            parse_corner("1/2/3/4"),
            Err(DiagnosticKind::MalformedCorner(_))
        ));
    }

    #[test]
    fn test_parse_corner_rejects_empty_index() {
        assert_eq!(
            parse_corner("1//3"),
            Err(DiagnosticKind::MissingIndex("1//3".to_string()))
        );
        assert_eq!(
            parse_corner("/1/1"),
            Err(DiagnosticKind::MissingIndex("/1/1".to_string()))
        );
    }

    #[test]
    fn test_parse_corner_rejects_relative_indices() {
        assert_eq!(
            parse_corner("-1/1/1"),
            Err(DiagnosticKind::UnsupportedIndex("-1/1/1".to_string()))
        );
        assert_eq!(
            parse_corner("1/0/1"),
            Err(DiagnosticKind::UnsupportedIndex("1/0/1".to_string()))
        );
    }
}
