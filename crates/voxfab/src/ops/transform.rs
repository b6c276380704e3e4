//! Rigid lattice transforms. Each returns a new solid whose boundary set is
//! rebuilt cell by cell.

use crate::axis::Axis;
use crate::core::{Cell, VoxelSolid};
use glam::IVec3;

/// One 90-degree rotation about an axis, in the canonical lattice frame:
///
/// ```text
/// Rx: (x, y, z) -> (x, -z,  y)
/// Ry: (x, y, z) -> (z,  y, -x)
/// Rz: (x, y, z) -> (-y, x,  z)
/// ```
#[inline]
pub fn rotate_cell_90(cell: Cell, axis: Axis) -> Cell {
    match axis {
        Axis::X => IVec3::new(cell.x, -cell.z, cell.y),
        Axis::Y => IVec3::new(cell.z, cell.y, -cell.x),
        Axis::Z => IVec3::new(-cell.y, cell.x, cell.z),
    }
}

/// Reflect a cell across the plane `axis = 0` so the occupied half-open cube
/// maps onto the mirrored half-open cube: for X, `x -> -x - 1`.
#[inline]
pub fn mirror_cell(cell: Cell, axis: Axis) -> Cell {
    match axis {
        Axis::X => IVec3::new(-cell.x - 1, cell.y, cell.z),
        Axis::Y => IVec3::new(cell.x, -cell.y - 1, cell.z),
        Axis::Z => IVec3::new(cell.x, cell.y, -cell.z - 1),
    }
}

impl VoxelSolid {
    /// Translate every cell by `delta`.
    pub fn translate(&self, delta: IVec3) -> VoxelSolid {
        VoxelSolid::from_cells(self.cells().map(|c| c + delta))
    }

    /// Apply `quarter_turns mod 4` canonical 90-degree rotations about `axis`.
    pub fn rotate90(&self, axis: Axis, quarter_turns: i32) -> VoxelSolid {
        let turns = quarter_turns.rem_euclid(4);
        if turns == 0 {
            return self.clone();
        }
        VoxelSolid::from_cells(self.cells().map(|c| {
            let mut cell = c;
            for _ in 0..turns {
                cell = rotate_cell_90(cell, axis);
            }
            cell
        }))
    }

    /// Mirror across the plane `axis = 0`.
    pub fn mirror(&self, axis: Axis) -> VoxelSolid {
        VoxelSolid::from_cells(self.cells().map(|c| mirror_cell(c, axis)))
    }

    /// Replicate every cell into a `factor`-cubed block, scaling the lattice.
    /// Factors below 2 return a clone.
    pub fn upscale(&self, factor: i32) -> VoxelSolid {
        if factor < 2 {
            return self.clone();
        }
        let mut out = VoxelSolid::new();
        for c in self.cells() {
            let base = c * factor;
            for dz in 0..factor {
                for dy in 0..factor {
                    for dx in 0..factor {
                        out.add(base + IVec3::new(dx, dy, dz));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_box(min: IVec3, max_excl: IVec3) -> VoxelSolid {
        let mut s = VoxelSolid::new();
        s.fill_box(min, max_excl);
        s
    }

    #[test]
    fn test_translate() {
        let s = solid_box(IVec3::ZERO, IVec3::new(2, 1, 1));
        let t = s.translate(IVec3::new(5, -3, 2));
        assert_eq!(t.bounds(), (IVec3::new(5, -3, 2), IVec3::new(7, -2, 3)));
        assert_eq!(t.volume(), 2);
    }

    #[test]
    fn test_rotate90_four_times_is_identity() {
        let s = solid_box(IVec3::new(1, 2, 3), IVec3::new(4, 5, 6));
        for axis in Axis::ALL {
            assert!(s.rotate90(axis, 4).same_cells(&s));
            assert!(s.rotate90(axis, 0).same_cells(&s));
            assert!(s.rotate90(axis, -4).same_cells(&s));
        }
    }

    #[test]
    fn test_rotate90_z_of_unit_cell() {
        let mut s = VoxelSolid::new();
        s.add(IVec3::new(1, 0, 0));
        let r = s.rotate90(Axis::Z, 1);
        // (x, y) = (1, 0) -> (-y, x) = (0, 1)
        assert!(r.contains(IVec3::new(0, 1, 0)));
        assert_eq!(r.volume(), 1);
    }

    #[test]
    fn test_rotation_preserves_volume_and_watertightness() {
        let s = solid_box(IVec3::new(-2, 0, 1), IVec3::new(3, 4, 2));
        for axis in Axis::ALL {
            let r = s.rotate90(axis, 1);
            assert_eq!(r.volume(), s.volume());
            assert_eq!(r.surface_area(), s.surface_area());
            assert!(r.is_watertight());
        }
    }

    #[test]
    fn test_mirror_is_involution() {
        let s = solid_box(IVec3::new(0, 1, 2), IVec3::new(3, 4, 5));
        for axis in Axis::ALL {
            assert!(s.mirror(axis).mirror(axis).same_cells(&s));
        }
    }

    #[test]
    fn test_mirror_x_maps_halfspace() {
        let s = solid_box(IVec3::ZERO, IVec3::new(2, 1, 1));
        let m = s.mirror(Axis::X);
        // [0, 2) maps onto [-2, 0)
        assert_eq!(m.bounds(), (IVec3::new(-2, 0, 0), IVec3::new(0, 1, 1)));
    }

    #[test]
    fn test_upscale_volume_cubes() {
        let s = solid_box(IVec3::ZERO, IVec3::new(2, 1, 1));
        let up = s.upscale(3);
        assert_eq!(up.volume(), 2 * 27);
        assert!(up.is_watertight());
        assert_eq!(up.bounds(), (IVec3::ZERO, IVec3::new(6, 3, 3)));
    }

    #[test]
    fn test_upscale_factor_one_clones() {
        let s = solid_box(IVec3::ZERO, IVec3::new(2, 2, 2));
        assert!(s.upscale(1).same_cells(&s));
    }
}
