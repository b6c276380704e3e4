//! Face and edge identity in the canonical global frame.
//!
//! A voxel-cube face is keyed by its plane axis, the plane coordinate along
//! that axis, and the lower corner of the unit square within the plane. The
//! in-plane coordinates `(a, b)` follow one fixed convention everywhere:
//! `(Y, Z)` for X faces, `(X, Z)` for Y faces, `(X, Y)` for Z faces. The
//! kernel's watertightness check and the mesher both consume this key, so the
//! ordering must never diverge between them.

use crate::axis::Axis;
use crate::core::cell::{Cell, CellExt};
use glam::IVec3;

/// Identity of an axis-aligned unit face in the global lattice frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceKey {
    /// Axis perpendicular to the face.
    pub axis: Axis,
    /// Plane coordinate along `axis`.
    pub k: i32,
    /// First in-plane coordinate of the lower corner.
    pub a: i32,
    /// Second in-plane coordinate of the lower corner.
    pub b: i32,
}

impl FaceKey {
    /// Key of the face between `cell` and its neighbor on the given side.
    /// `positive` selects the +axis side of the cell.
    #[inline]
    pub fn between(cell: Cell, axis: Axis, positive: bool) -> Self {
        let k = if positive {
            cell.axis(axis) + 1
        } else {
            cell.axis(axis)
        };
        let (ua, ub) = axis.plane_axes();
        FaceKey {
            axis,
            k,
            a: cell.axis(ua),
            b: cell.axis(ub),
        }
    }

    /// The two cells adjacent to this face, `(negative side, positive side)`.
    /// Exactly one of them is occupied whenever the face is a boundary face.
    #[inline]
    pub fn adjacent_cells(&self) -> (Cell, Cell) {
        let neg = self.lower_corner().with_axis(self.axis, self.k - 1);
        let pos = self.lower_corner().with_axis(self.axis, self.k);
        (neg, pos)
    }

    /// Lattice point at the face's lower corner.
    #[inline]
    pub fn lower_corner(&self) -> IVec3 {
        let (ua, ub) = self.axis.plane_axes();
        IVec3::ZERO
            .with_axis(self.axis, self.k)
            .with_axis(ua, self.a)
            .with_axis(ub, self.b)
    }

    /// The four lattice edges bounding this face.
    ///
    /// Edges are identified globally so that faces from different plane axes
    /// that share an edge produce equal keys; this is what makes the
    /// every-edge-twice watertightness count work.
    pub fn edges(&self) -> [EdgeKey; 4] {
        let (ua, ub) = self.axis.plane_axes();
        let corner = self.lower_corner();
        [
            // Two edges running along `ua`, at b and b+1.
            EdgeKey {
                axis: ua,
                origin: corner,
            },
            EdgeKey {
                axis: ua,
                origin: corner.with_axis(ub, self.b + 1),
            },
            // Two edges running along `ub`, at a and a+1.
            EdgeKey {
                axis: ub,
                origin: corner,
            },
            EdgeKey {
                axis: ub,
                origin: corner.with_axis(ua, self.a + 1),
            },
        ]
    }
}

/// Identity of an axis-aligned unit lattice edge: the segment from `origin`
/// to `origin + axis.unit()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub axis: Axis,
    pub origin: IVec3,
}
