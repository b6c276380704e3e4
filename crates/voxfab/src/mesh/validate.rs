//! Mesh topology audit.

use crate::mesh::MeshD;
use std::collections::HashMap;

/// True when the mesh is a closed orientable surface: every undirected edge
/// is used by exactly two triangles, with opposite directions, and no
/// triangle has zero area.
///
/// Quantize-welded meshes have degenerate triangles removed beforehand, so
/// the zero-area rejection only fires on raw input.
pub fn is_closed_manifold(mesh: &MeshD) -> bool {
    if mesh.triangles.is_empty() {
        return false;
    }

    // (directed edge) -> use count
    let mut directed: HashMap<(u32, u32), u32> = HashMap::new();
    for tri in &mesh.triangles {
        let [a, b, c] = *tri;
        if a == b || b == c || a == c {
            return false;
        }
        if mesh.triangle_normal(*tri) == glam::DVec3::ZERO {
            return false;
        }
        for (from, to) in [(a, b), (b, c), (c, a)] {
            *directed.entry((from, to)).or_insert(0) += 1;
        }
    }

    // Each directed edge used once, and its reverse exactly once: closed
    // and consistently oriented.
    directed
        .iter()
        .all(|(&(from, to), &count)| count == 1 && directed.get(&(to, from)) == Some(&1))
}
