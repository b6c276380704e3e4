//! Triangle mesh extraction and post-processing.
//!
//! Meshes here are short-lived: extracted from a solid's boundary faces,
//! optionally quantize-welded, reoriented outward, then serialized to STL.

pub mod greedy;
pub mod validate;
pub mod weld;

pub use greedy::extract_mesh;
pub use validate::is_closed_manifold;

use crate::config::{ExportOptions, MeshEngine};
use crate::core::VoxelSolid;
use crate::error::{Error, Result};
use glam::DVec3;

/// Run the configured export pipeline: extract, optionally quantize-weld,
/// and reorient outward. The Surface Nets engine is declared but not built.
pub fn build_mesh(
    solid: &VoxelSolid,
    options: &ExportOptions,
    voxels_per_unit: u32,
) -> Result<MeshD> {
    match options.engine {
        MeshEngine::VoxelFaces => {}
        MeshEngine::SurfaceNets => {
            return Err(Error::NotImplemented("surface nets mesh engine"));
        }
    }
    let mut mesh = extract_mesh(solid)?;
    if options.quantize_step_units > 0.0 {
        let spacing = options.quantize_step_units * f64::from(voxels_per_unit);
        mesh.quantize_weld(spacing)?;
    }
    mesh.ensure_outward_normals();
    Ok(mesh)
}

/// Triangle as three vertex indices.
pub type TriIdx = [u32; 3];

/// Indexed triangle mesh with double-precision vertices.
#[derive(Debug, Clone, Default)]
pub struct MeshD {
    pub vertices: Vec<DVec3>,
    pub triangles: Vec<TriIdx>,
}

impl MeshD {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Signed enclosed volume: `(1/6) * sum of dot(cross(a, b), c)` over all
    /// triangles. Positive when triangle winding faces outward.
    pub fn signed_volume(&self) -> f64 {
        let mut six_v = 0.0;
        for tri in &self.triangles {
            let a = self.vertices[tri[0] as usize];
            let b = self.vertices[tri[1] as usize];
            let c = self.vertices[tri[2] as usize];
            six_v += a.cross(b).dot(c);
        }
        six_v / 6.0
    }

    /// Flip winding so the signed volume is positive. A mesh that encloses
    /// nothing is left untouched.
    pub fn ensure_outward_normals(&mut self) {
        if self.signed_volume() < 0.0 {
            for tri in &mut self.triangles {
                tri.swap(1, 2);
            }
        }
    }

    /// Invert the winding of every triangle.
    pub fn flip(&mut self) {
        for tri in &mut self.triangles {
            tri.swap(1, 2);
        }
    }

    /// Unit normal of one triangle, zero for degenerate triangles.
    pub fn triangle_normal(&self, tri: TriIdx) -> DVec3 {
        let a = self.vertices[tri[0] as usize];
        let b = self.vertices[tri[1] as usize];
        let c = self.vertices[tri[2] as usize];
        let n = (b - a).cross(c - a);
        let len = n.length();
        if len > 0.0 {
            n / len
        } else {
            DVec3::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A unit cube triangulated with outward winding.
    fn unit_cube() -> MeshD {
        let vertices = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
        ];
        let triangles = vec![
            [0, 2, 1],
            [0, 3, 2], // bottom, normal -Z
            [4, 5, 6],
            [4, 6, 7], // top, normal +Z
            [0, 1, 5],
            [0, 5, 4], // front, normal -Y
            [2, 3, 7],
            [2, 7, 6], // back, normal +Y
            [0, 4, 7],
            [0, 7, 3], // left, normal -X
            [1, 2, 6],
            [1, 6, 5], // right, normal +X
        ];
        MeshD { vertices, triangles }
    }

    #[test]
    fn test_unit_cube_volume() {
        let mesh = unit_cube();
        assert!((mesh.signed_volume() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flip_negates_volume() {
        let mut mesh = unit_cube();
        mesh.flip();
        assert!((mesh.signed_volume() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ensure_outward_restores() {
        let mut mesh = unit_cube();
        mesh.flip();
        mesh.ensure_outward_normals();
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn test_triangle_normal() {
        let mesh = unit_cube();
        let n = mesh.triangle_normal([4, 5, 6]);
        assert!((n - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let mesh = MeshD {
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, 0.0)],
            triangles: vec![[0, 1, 2]],
        };
        assert_eq!(mesh.triangle_normal([0, 1, 2]), DVec3::ZERO);
    }
}
