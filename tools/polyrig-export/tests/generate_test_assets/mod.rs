//! Test asset generators

use std::io;
use std::path::Path;

/// A two-part figure: a head cube face set with a hat group, and a body.
pub const FIGURE_OBJ: &str = "\
# test figure
v -4 24 -4
v 4 24 -4
v 4 32 -4
v -4 32 -4
v -5 31 -5
v 5 31 -5
v 5 33 -5
v -5 33 -5
v -4 12 -2
v 4 12 -2
v 4 24 -2
v -4 24 -2
vn 0 0 -1
vn 0 1 0
vt 0 0
vt 0.5 0
vt 0.5 0.5
vt 0 0.5
o Head
f 1/1/1 2/2/1 3/3/1 4/4/1
g Hat
f 5/1/2 6/2/2 7/3/2 8/4/2
o Body
f 9/1/1 10/2/1 11/3/1
f 9/1/1 11/3/1 12/4/1
";

pub fn generate_figure_obj(path: &Path) -> io::Result<()> {
    std::fs::write(path, FIGURE_OBJ)
}

/// Manifest assigning the figure's groups to default skeleton bones.
pub fn generate_rig_manifest(path: &Path, obj_name: &str) -> io::Result<()> {
    let manifest = format!(
        "[model]\nobj = \"{}\"\nidentifier = \"geometry.figure\"\n\n\
         [output]\npath = \"out/figure.geo.json\"\n\n\
         [parts]\nhead = [\"Head\"]\nhat = [\"Head/Hat\"]\nbody = [\"Body\"]\n",
        obj_name
    );
    std::fs::write(path, manifest)
}
