//! Mesh writer.
//!
//! Emits the same four-section text format the loader reads. Floats use
//! Rust's shortest round-trip formatting, so a written mesh loads back
//! bit-identical.

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;

use umbra_mesh::MeshTopology;
use umbra_types::UmbraResult;

/// Renders a mesh into the text format.
pub fn mesh_to_string(mesh: &MeshTopology) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", mesh.vertex_count());
    for v in &mesh.vertices {
        let _ = writeln!(out, "{} {} {}", v.x, v.y, v.z);
    }

    let _ = writeln!(out, "{}", mesh.corner_count());
    for c in &mesh.corners {
        let _ = writeln!(out, "{} {} {} {}", c.vertex, c.normal.x, c.normal.y, c.normal.z);
    }

    let _ = writeln!(out, "{}", mesh.triangle_count());
    for tri in mesh.indices.chunks_exact(3) {
        let _ = writeln!(out, "{} {} {}", tri[0], tri[1], tri[2]);
    }

    let _ = writeln!(out, "{}", mesh.edge_count());
    for e in &mesh.edges {
        match e.tri_b {
            Some(b) => {
                let _ = writeln!(out, "{} {} {} {}", e.v0, e.v1, e.tri_a, b);
            }
            None => {
                let _ = writeln!(out, "{} {} {}", e.v0, e.v1, e.tri_a);
            }
        }
    }

    out
}

/// Writes a mesh to any writer.
pub fn write_mesh<W: Write>(mesh: &MeshTopology, mut writer: W) -> UmbraResult<()> {
    writer.write_all(mesh_to_string(mesh).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Writes a mesh to a file, replacing it if present.
pub fn save_mesh(mesh: &MeshTopology, path: impl AsRef<Path>) -> UmbraResult<()> {
    fs::write(path, mesh_to_string(mesh))?;
    Ok(())
}
