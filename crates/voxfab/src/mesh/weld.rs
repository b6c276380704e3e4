//! Quantize-and-weld mesh cleanup.
//!
//! Vertices snap to a regular grid and collocated vertices merge into one.
//! Triangles that collapse (repeated indices) or duplicate an existing
//! triangle (same unordered index triple) are dropped, so downstream
//! manifold checks never see zero-area geometry.

use crate::error::{Error, Result};
use crate::mesh::{MeshD, TriIdx};
use glam::DVec3;
use std::collections::{HashMap, HashSet};

impl MeshD {
    /// Snap vertices to a grid of the given spacing (in lattice units) and
    /// merge everything that lands on the same point. Spacing zero disables
    /// the pass; negative spacing is an error.
    pub fn quantize_weld(&mut self, spacing: f64) -> Result<()> {
        if spacing == 0.0 {
            return Ok(());
        }
        if !(spacing > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "quantize spacing must be non-negative, got {spacing}"
            )));
        }

        let mut remap: Vec<u32> = Vec::with_capacity(self.vertices.len());
        let mut merged: Vec<DVec3> = Vec::new();
        let mut ids: HashMap<(i64, i64, i64), u32> = HashMap::new();
        for v in &self.vertices {
            let snapped = DVec3::new(
                (v.x / spacing).round() * spacing,
                (v.y / spacing).round() * spacing,
                (v.z / spacing).round() * spacing,
            );
            let key = (
                (snapped.x / spacing).round() as i64,
                (snapped.y / spacing).round() as i64,
                (snapped.z / spacing).round() as i64,
            );
            let id = *ids.entry(key).or_insert_with(|| {
                merged.push(snapped);
                (merged.len() - 1) as u32
            });
            remap.push(id);
        }

        let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(self.triangles.len());
        let mut kept: Vec<TriIdx> = Vec::with_capacity(self.triangles.len());
        for tri in &self.triangles {
            let mapped = [
                remap[tri[0] as usize],
                remap[tri[1] as usize],
                remap[tri[2] as usize],
            ];
            if mapped[0] == mapped[1] || mapped[1] == mapped[2] || mapped[0] == mapped[2] {
                continue;
            }
            let mut unordered = mapped;
            unordered.sort_unstable();
            if seen.insert(unordered) {
                kept.push(mapped);
            }
        }

        self.vertices = merged;
        self.triangles = kept;
        Ok(())
    }
}
