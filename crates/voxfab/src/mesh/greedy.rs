//! Boundary-face meshing with greedy rectangle merging.
//!
//! Faces are grouped by oriented plane `(axis, k, sign)`, laid out on a
//! per-plane bitmap, and merged into maximal rectangles: extend the width
//! along `a` first, then grow full-width rows along `b`. Every rectangle
//! becomes two triangles; winding follows the face's outward side so the
//! whole surface is consistently oriented.

use crate::axis::Axis;
use crate::core::VoxelSolid;
use crate::error::Result;
use crate::mesh::MeshD;
use std::collections::HashMap;

/// Extract the boundary mesh of a solid. Output is deterministic for a
/// given cell set regardless of internal set order.
pub fn extract_mesh(solid: &VoxelSolid) -> Result<MeshD> {
    // Group boundary faces by oriented plane.
    let mut planes: HashMap<(Axis, i32, bool), Vec<(i32, i32)>> = HashMap::new();
    for face in solid.boundary_faces() {
        let outward_positive = solid.face_filled_on_negative_side(face)?;
        planes
            .entry((face.axis, face.k, outward_positive))
            .or_default()
            .push((face.a, face.b));
    }

    let mut keys: Vec<_> = planes.keys().copied().collect();
    keys.sort();

    let mut mesh = MeshD::new();
    let mut vertex_ids: HashMap<(i32, i32, i32), u32> = HashMap::new();
    for key in keys {
        let mut faces = planes.remove(&key).unwrap_or_default();
        faces.sort();
        merge_plane(key, &faces, &mut mesh, &mut vertex_ids);
    }
    Ok(mesh)
}

/// Greedy quad merge of one oriented plane's faces.
fn merge_plane(
    (axis, k, outward_positive): (Axis, i32, bool),
    faces: &[(i32, i32)],
    mesh: &mut MeshD,
    vertex_ids: &mut HashMap<(i32, i32, i32), u32>,
) {
    if faces.is_empty() {
        return;
    }
    let min_a = faces.iter().map(|f| f.0).min().unwrap_or(0);
    let min_b = faces.iter().map(|f| f.1).min().unwrap_or(0);
    let max_a = faces.iter().map(|f| f.0).max().unwrap_or(0);
    let max_b = faces.iter().map(|f| f.1).max().unwrap_or(0);
    let width = (max_a - min_a + 1) as usize;
    let height = (max_b - min_b + 1) as usize;

    let mut filled = vec![false; width * height];
    for &(a, b) in faces {
        filled[(b - min_b) as usize * width + (a - min_a) as usize] = true;
    }
    let mut visited = vec![false; width * height];

    for row in 0..height {
        for col in 0..width {
            let at = row * width + col;
            if !filled[at] || visited[at] {
                continue;
            }
            // Extend width along `a`.
            let mut w = 1;
            while col + w < width && filled[at + w] && !visited[at + w] {
                w += 1;
            }
            // Extend height along `b` while whole rows fit.
            let mut h = 1;
            'grow: while row + h < height {
                let row_at = (row + h) * width + col;
                for i in 0..w {
                    if !filled[row_at + i] || visited[row_at + i] {
                        break 'grow;
                    }
                }
                h += 1;
            }
            for r in 0..h {
                for c in 0..w {
                    visited[(row + r) * width + col + c] = true;
                }
            }

            let a0 = min_a + col as i32;
            let b0 = min_b + row as i32;
            emit_rect(
                mesh,
                vertex_ids,
                axis,
                k,
                outward_positive,
                (a0, a0 + w as i32),
                (b0, b0 + h as i32),
            );
        }
    }
}

/// Lattice position of a plane corner at `(a, b)`.
#[inline]
fn corner(axis: Axis, k: i32, a: i32, b: i32) -> (i32, i32, i32) {
    match axis {
        Axis::X => (k, a, b),
        Axis::Y => (a, k, b),
        Axis::Z => (a, b, k),
    }
}

/// Append one merged rectangle as two triangles, wound so the outward
/// normal points along +axis when `outward_positive` holds.
fn emit_rect(
    mesh: &mut MeshD,
    vertex_ids: &mut HashMap<(i32, i32, i32), u32>,
    axis: Axis,
    k: i32,
    outward_positive: bool,
    (a0, a1): (i32, i32),
    (b0, b1): (i32, i32),
) {
    // Quad corners ordered counterclockwise as seen from the +axis side.
    let corners = match axis {
        Axis::X => [
            corner(axis, k, a0, b0),
            corner(axis, k, a1, b0),
            corner(axis, k, a1, b1),
            corner(axis, k, a0, b1),
        ],
        Axis::Y => [
            corner(axis, k, a0, b0),
            corner(axis, k, a0, b1),
            corner(axis, k, a1, b1),
            corner(axis, k, a1, b0),
        ],
        Axis::Z => [
            corner(axis, k, a0, b0),
            corner(axis, k, a1, b0),
            corner(axis, k, a1, b1),
            corner(axis, k, a0, b1),
        ],
    };
    let ids: Vec<u32> = corners
        .iter()
        .map(|&p| intern_vertex(mesh, vertex_ids, p))
        .collect();
    let (p0, p1, p2, p3) = (ids[0], ids[1], ids[2], ids[3]);
    if outward_positive {
        mesh.triangles.push([p0, p1, p2]);
        mesh.triangles.push([p0, p2, p3]);
    } else {
        mesh.triangles.push([p2, p1, p0]);
        mesh.triangles.push([p3, p2, p0]);
    }
}

#[inline]
fn intern_vertex(
    mesh: &mut MeshD,
    vertex_ids: &mut HashMap<(i32, i32, i32), u32>,
    p: (i32, i32, i32),
) -> u32 {
    *vertex_ids.entry(p).or_insert_with(|| {
        let id = mesh.vertices.len() as u32;
        mesh.vertices
            .push(glam::DVec3::new(f64::from(p.0), f64::from(p.1), f64::from(p.2)));
        id
    })
}
