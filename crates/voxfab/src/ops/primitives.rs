//! Bulk primitive fills, all expressed through the kernel's incremental
//! `add` so the boundary invariant is maintained for free.

use crate::axis::Axis;
use crate::core::{Cell, CellExt, VoxelSolid};
use glam::IVec3;

impl VoxelSolid {
    /// Fill the half-open box `[min, max_excl)`. Empty ranges are a no-op.
    pub fn fill_box(&mut self, min: Cell, max_excl: Cell) {
        if min.x >= max_excl.x || min.y >= max_excl.y || min.z >= max_excl.z {
            return;
        }
        for z in min.z..max_excl.z {
            for y in min.y..max_excl.y {
                for x in min.x..max_excl.x {
                    self.add(IVec3::new(x, y, z));
                }
            }
        }
    }

    /// Fill a sphere: every cell with `|cell - center|^2 <= r^2`.
    /// Negative radius is a no-op.
    pub fn fill_sphere(&mut self, center: Cell, r: i32) {
        if r < 0 {
            return;
        }
        let rr = i64::from(r) * i64::from(r);
        for z in -r..=r {
            for y in -r..=r {
                for x in -r..=r {
                    let d = i64::from(x) * i64::from(x)
                        + i64::from(y) * i64::from(y)
                        + i64::from(z) * i64::from(z);
                    if d <= rr {
                        self.add(center + IVec3::new(x, y, z));
                    }
                }
            }
        }
    }

    /// Fill a cylinder running along `axis`. `(ca, cb)` is the disc center in
    /// the plane axes of `axis` (canonical order), the axis range is
    /// `[lo, hi_excl)`. Negative radius or empty range is a no-op.
    pub fn fill_cylinder(&mut self, axis: Axis, ca: i32, cb: i32, lo: i32, hi_excl: i32, r: i32) {
        if r < 0 || lo >= hi_excl {
            return;
        }
        let (ua, ub) = axis.plane_axes();
        let rr = i64::from(r) * i64::from(r);
        for k in lo..hi_excl {
            for da in -r..=r {
                for db in -r..=r {
                    let d = i64::from(da) * i64::from(da) + i64::from(db) * i64::from(db);
                    if d <= rr {
                        let cell = IVec3::ZERO
                            .with_axis(axis, k)
                            .with_axis(ua, ca + da)
                            .with_axis(ub, cb + db);
                        self.add(cell);
                    }
                }
            }
        }
    }

    /// Cylinder along Z centered at `(cx, cy)` in the XY plane.
    pub fn fill_cylinder_z(&mut self, cx: i32, cy: i32, z_lo: i32, z_hi_excl: i32, r: i32) {
        self.fill_cylinder(Axis::Z, cx, cy, z_lo, z_hi_excl, r);
    }

    /// Cylinder along X centered at `(cy, cz)` in the YZ plane.
    pub fn fill_cylinder_x(&mut self, cy: i32, cz: i32, x_lo: i32, x_hi_excl: i32, r: i32) {
        self.fill_cylinder(Axis::X, cy, cz, x_lo, x_hi_excl, r);
    }

    /// Cylinder along Y centered at `(cx, cz)` in the XZ plane.
    pub fn fill_cylinder_y(&mut self, cx: i32, cz: i32, y_lo: i32, y_hi_excl: i32, r: i32) {
        self.fill_cylinder(Axis::Y, cx, cz, y_lo, y_hi_excl, r);
    }
}
