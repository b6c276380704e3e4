//! Morphological operators over lattice solids.
//!
//! Dilation is the Minkowski sum with a structuring element, erosion its
//! dual; open and close are the usual compositions. Elements are balls of
//! radius `r` under the chosen metric.

use crate::core::VoxelSolid;
use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Distance metric for structuring elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// L-infinity: a cube of side `2r + 1`.
    Chebyshev,
    /// L1: an octahedron.
    Manhattan,
    /// L2: a discrete ball, `|delta|^2 <= r^2`.
    Euclidean,
}

/// Offsets of the ball `{ delta : ||delta||_metric <= r }`. Radius zero or
/// below yields just the origin.
pub fn structuring_element(r: i32, metric: Metric) -> Vec<IVec3> {
    if r <= 0 {
        return vec![IVec3::ZERO];
    }
    let rr = i64::from(r) * i64::from(r);
    let mut element = Vec::new();
    for z in -r..=r {
        for y in -r..=r {
            for x in -r..=r {
                let inside = match metric {
                    Metric::Chebyshev => true,
                    Metric::Manhattan => x.abs() + y.abs() + z.abs() <= r,
                    Metric::Euclidean => {
                        i64::from(x) * i64::from(x)
                            + i64::from(y) * i64::from(y)
                            + i64::from(z) * i64::from(z)
                            <= rr
                    }
                };
                if inside {
                    element.push(IVec3::new(x, y, z));
                }
            }
        }
    }
    element
}

impl VoxelSolid {
    /// Minkowski sum with the radius-`r` ball. `r <= 0` is the identity.
    pub fn dilate(&self, r: i32, metric: Metric) -> VoxelSolid {
        if r <= 0 {
            return self.clone();
        }
        let element = structuring_element(r, metric);
        let mut out = VoxelSolid::new();
        for c in self.cells() {
            for &delta in &element {
                out.add(c + delta);
            }
        }
        out
    }

    /// Keep cells whose whole radius-`r` neighborhood is occupied.
    /// `r <= 0` is the identity.
    pub fn erode(&self, r: i32, metric: Metric) -> VoxelSolid {
        if r <= 0 {
            return self.clone();
        }
        let element = structuring_element(r, metric);
        let mut out = VoxelSolid::new();
        for c in self.cells() {
            if element.iter().all(|&delta| self.contains(c + delta)) {
                out.add(c);
            }
        }
        out
    }

    /// Erode then dilate: removes protrusions thinner than the element.
    pub fn open(&self, r: i32, metric: Metric) -> VoxelSolid {
        self.erode(r, metric).dilate(r, metric)
    }

    /// Dilate then erode: fills gaps narrower than the element.
    pub fn close(&self, r: i32, metric: Metric) -> VoxelSolid {
        self.dilate(r, metric).erode(r, metric)
    }
}
