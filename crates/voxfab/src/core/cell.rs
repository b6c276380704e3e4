use crate::axis::Axis;
use glam::IVec3;

/// An occupied lattice cell: the unit cube `[x, x+1) x [y, y+1) x [z, z+1)`.
pub type Cell = IVec3;

/// The six face-adjacent neighbor offsets, one per axis direction.
/// Order: +X, -X, +Y, -Y, +Z, -Z.
pub const NEIGHBOR_OFFSETS: [IVec3; 6] = [
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(0, 0, -1),
];

/// Extension trait adding lattice helpers to `IVec3` cells.
pub trait CellExt {
    /// Component along an axis.
    fn axis(self, axis: Axis) -> i32;

    /// Copy with the component along `axis` replaced.
    fn with_axis(self, axis: Axis, value: i32) -> Self;

    /// The six face-adjacent neighbors together with their direction:
    /// `(neighbor, axis, positive)` where `positive` is true when the
    /// neighbor sits on the +axis side.
    fn face_neighbors(self) -> [(Cell, Axis, bool); 6];
}

impl CellExt for IVec3 {
    #[inline]
    fn axis(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    #[inline]
    fn with_axis(self, axis: Axis, value: i32) -> Self {
        let mut v = self;
        match axis {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
        v
    }

    #[inline]
    fn face_neighbors(self) -> [(Cell, Axis, bool); 6] {
        [
            (self + IVec3::X, Axis::X, true),
            (self - IVec3::X, Axis::X, false),
            (self + IVec3::Y, Axis::Y, true),
            (self - IVec3::Y, Axis::Y, false),
            (self + IVec3::Z, Axis::Z, true),
            (self - IVec3::Z, Axis::Z, false),
        ]
    }
}

/// Axis-aligned cell bounds as `(min, max_excl)`, both componentwise.
/// The empty range is represented as `((0,0,0), (0,0,0))`.
pub type Bounds = (IVec3, IVec3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_accessors() {
        let c = IVec3::new(3, -4, 7);
        assert_eq!(c.axis(Axis::X), 3);
        assert_eq!(c.axis(Axis::Y), -4);
        assert_eq!(c.axis(Axis::Z), 7);
        assert_eq!(c.with_axis(Axis::Y, 9), IVec3::new(3, 9, 7));
    }

    #[test]
    fn test_face_neighbors_are_unit_steps() {
        let c = IVec3::new(1, 2, 3);
        for (n, axis, positive) in c.face_neighbors() {
            let delta = n - c;
            assert_eq!(delta.abs(), axis.unit());
            assert_eq!(delta.axis(axis) > 0, positive);
        }
    }
}
