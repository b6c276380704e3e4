//! Arbitrary-angle revoxelization.
//!
//! Resamples a source solid under a rotation about a pivot into a fresh
//! target lattice. Two fill tests are available per target cell:
//!
//! - **Conservative OBB**: the target cell's unit cube is mapped into source
//!   space as an oriented box and tested against candidate source voxels with
//!   the 15-axis separating axis test. Never loses interior cells; dilates
//!   slightly at the boundary.
//! - **Supersampling**: `n^3` sample points per target cell are mapped back
//!   into source space and probed against the occupancy set. Unbiased, with
//!   thinner boundaries, at resolutions where `n >= 3`.

use crate::axis::Axis;
use crate::core::VoxelSolid;
use crate::error::{Error, Result};
use glam::{DMat3, DVec3, IVec3};

/// Mode and tolerances for one revoxelization pass.
#[derive(Debug, Clone, Copy)]
pub struct RevoxOptions {
    /// Rotation axis.
    pub axis: Axis,
    /// Rotation angle in degrees; any sign and magnitude.
    pub degrees: f64,
    /// Pivot point the rotation turns about, in lattice coordinates.
    pub pivot: DVec3,
    /// Select the conservative OBB test instead of supersampling.
    pub conservative_obb: bool,
    /// Supersample grid edge; ignored by the OBB mode.
    pub samples_per_axis: u32,
    /// Tolerance used for envelope widening and membership tests.
    pub epsilon: f64,
}

impl RevoxOptions {
    pub fn new(axis: Axis, degrees: f64, pivot: DVec3) -> Self {
        RevoxOptions {
            axis,
            degrees,
            pivot,
            conservative_obb: true,
            samples_per_axis: 3,
            epsilon: 1e-9,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.samples_per_axis == 0 {
            return Err(Error::InvalidArgument(
                "samples_per_axis must be positive".into(),
            ));
        }
        if !(self.epsilon > 0.0) {
            return Err(Error::InvalidArgument("epsilon must be positive".into()));
        }
        if !self.pivot.is_finite() || !self.degrees.is_finite() {
            return Err(Error::InvalidArgument(
                "pivot and degrees must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Rotation matrix about a lattice axis by `degrees`.
fn rotation_matrix(axis: Axis, degrees: f64) -> DMat3 {
    let radians = degrees.to_radians();
    match axis {
        Axis::X => DMat3::from_rotation_x(radians),
        Axis::Y => DMat3::from_rotation_y(radians),
        Axis::Z => DMat3::from_rotation_z(radians),
    }
}

/// Resample `source` under the rotation described by `options`.
pub fn revoxelize(source: &VoxelSolid, options: &RevoxOptions) -> Result<VoxelSolid> {
    options.validate()?;
    if source.is_empty() {
        return Ok(VoxelSolid::new());
    }

    let rot = rotation_matrix(options.axis, options.degrees);
    // Rigid rotation: the inverse is the transpose.
    let inv = rot.transpose();
    let eps = options.epsilon;

    let (target_min, target_max) = target_envelope(source, &rot, options.pivot, eps);

    let mut out = VoxelSolid::new();
    for z in target_min.z..target_max.z {
        for y in target_min.y..target_max.y {
            for x in target_min.x..target_max.x {
                let target = IVec3::new(x, y, z);
                let filled = if options.conservative_obb {
                    obb_cell_filled(source, target, &inv, options.pivot, eps)
                } else {
                    supersample_cell_filled(
                        source,
                        target,
                        &inv,
                        options.pivot,
                        options.samples_per_axis,
                        eps,
                    )
                };
                if filled {
                    out.add(target);
                }
            }
        }
    }
    Ok(out)
}

/// Rotate the padded source AABB forward and take its integer envelope,
/// widened by epsilon.
fn target_envelope(
    source: &VoxelSolid,
    rot: &DMat3,
    pivot: DVec3,
    eps: f64,
) -> (IVec3, IVec3) {
    let (min, max_excl) = source.bounds();
    let lo = min.as_dvec3() - DVec3::ONE;
    let hi = max_excl.as_dvec3() + DVec3::ONE;

    let mut env_min = DVec3::splat(f64::INFINITY);
    let mut env_max = DVec3::splat(f64::NEG_INFINITY);
    for i in 0..8 {
        let corner = DVec3::new(
            if i & 1 == 0 { lo.x } else { hi.x },
            if i & 2 == 0 { lo.y } else { hi.y },
            if i & 4 == 0 { lo.z } else { hi.z },
        );
        let rotated = *rot * (corner - pivot) + pivot;
        env_min = env_min.min(rotated);
        env_max = env_max.max(rotated);
    }
    (
        (env_min - eps).floor().as_ivec3(),
        (env_max + eps).ceil().as_ivec3(),
    )
}

/// Supersampling test: any of the `n^3` interior sample points of the target
/// cell maps back into an occupied source cell.
fn supersample_cell_filled(
    source: &VoxelSolid,
    target: IVec3,
    inv: &DMat3,
    pivot: DVec3,
    n: u32,
    eps: f64,
) -> bool {
    let base = target.as_dvec3();
    let step = 1.0 / f64::from(n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                let sample = base
                    + DVec3::new(
                        (f64::from(i) + 0.5) * step,
                        (f64::from(j) + 0.5) * step,
                        (f64::from(k) + 0.5) * step,
                    );
                let mapped = *inv * (sample - pivot) + pivot;
                // Floor with tolerance to pick the candidate source cell.
                let candidate = (mapped + eps).floor().as_ivec3();
                if source.contains(candidate) && point_in_cell(mapped, candidate, eps) {
                    return true;
                }
            }
        }
    }
    false
}

#[inline]
fn point_in_cell(p: DVec3, cell: IVec3, eps: f64) -> bool {
    let lo = cell.as_dvec3();
    let hi = lo + DVec3::ONE;
    p.x > lo.x - eps
        && p.x < hi.x + eps
        && p.y > lo.y - eps
        && p.y < hi.y + eps
        && p.z > lo.z - eps
        && p.z < hi.z + eps
}

/// Conservative test: the target cell's cube, carried into source space as an
/// oriented box, intersects some occupied source voxel.
fn obb_cell_filled(
    source: &VoxelSolid,
    target: IVec3,
    inv: &DMat3,
    pivot: DVec3,
    eps: f64,
) -> bool {
    let center = target.as_dvec3() + DVec3::splat(0.5);
    let mapped = *inv * (center - pivot) + pivot;

    // Extent of the oriented half-cube along each world axis.
    let ext = DVec3::new(
        0.5 * (inv.x_axis.x.abs() + inv.y_axis.x.abs() + inv.z_axis.x.abs()),
        0.5 * (inv.x_axis.y.abs() + inv.y_axis.y.abs() + inv.z_axis.y.abs()),
        0.5 * (inv.x_axis.z.abs() + inv.y_axis.z.abs() + inv.z_axis.z.abs()),
    );

    let lo = (mapped - ext).floor().as_ivec3();
    let hi = (mapped + ext).ceil().as_ivec3();
    for z in lo.z..hi.z {
        for y in lo.y..hi.y {
            for x in lo.x..hi.x {
                let candidate = IVec3::new(x, y, z);
                if source.contains(candidate)
                    && obb_intersects_aabb(
                        mapped,
                        inv,
                        candidate.as_dvec3() + DVec3::splat(0.5),
                        eps,
                    )
                {
                    return true;
                }
            }
        }
    }
    false
}

/// 15-axis separating axis test between an oriented half-unit cube (axes are
/// the columns of `basis`) and an axis-aligned half-unit cube.
///
/// `eps` is added to the absolute basis entries to mask the degenerate
/// near-parallel-axis cross products.
fn obb_intersects_aabb(obb_center: DVec3, basis: &DMat3, aabb_center: DVec3, eps: f64) -> bool {
    const HALF: f64 = 0.5;
    // r[i][j]: world-axis i component of OBB axis j.
    let r = [
        [basis.x_axis.x, basis.y_axis.x, basis.z_axis.x],
        [basis.x_axis.y, basis.y_axis.y, basis.z_axis.y],
        [basis.x_axis.z, basis.y_axis.z, basis.z_axis.z],
    ];
    let mut abs_r = [[0.0f64; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            abs_r[i][j] = r[i][j].abs() + eps;
        }
    }

    let t_world = obb_center - aabb_center;
    let t = [t_world.x, t_world.y, t_world.z];

    // World axes.
    for i in 0..3 {
        let rb = HALF * (abs_r[i][0] + abs_r[i][1] + abs_r[i][2]);
        if t[i].abs() > HALF + rb {
            return false;
        }
    }

    // OBB axes.
    for j in 0..3 {
        let proj = t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j];
        let ra = HALF * (abs_r[0][j] + abs_r[1][j] + abs_r[2][j]);
        if proj.abs() > ra + HALF {
            return false;
        }
    }

    // Cross products of world axis i and OBB axis j.
    for i in 0..3 {
        let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
        for j in 0..3 {
            let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
            let proj = t[i2] * r[i1][j] - t[i1] * r[i2][j];
            let ra = HALF * (abs_r[i1][j] + abs_r[i2][j]);
            let rb = HALF * (abs_r[i][j2] + abs_r[i][j1]);
            if proj.abs() > ra + rb {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_box(min: IVec3, max_excl: IVec3) -> VoxelSolid {
        let mut s = VoxelSolid::new();
        s.fill_box(min, max_excl);
        s
    }

    fn opts(axis: Axis, degrees: f64, conservative: bool) -> RevoxOptions {
        RevoxOptions {
            conservative_obb: conservative,
            ..RevoxOptions::new(axis, degrees, DVec3::ZERO)
        }
    }

    #[test]
    fn test_zero_samples_rejected() {
        let s = solid_box(IVec3::ZERO, IVec3::ONE);
        let mut o = opts(Axis::Z, 30.0, false);
        o.samples_per_axis = 0;
        assert!(matches!(
            revoxelize(&s, &o),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_source_stays_empty() {
        let s = VoxelSolid::new();
        let result = revoxelize(&s, &opts(Axis::Z, 45.0, true)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_zero_rotation_supersample_is_identity() {
        let s = solid_box(IVec3::new(2, 3, 4), IVec3::new(6, 7, 8));
        let result = revoxelize(&s, &opts(Axis::Z, 0.0, false)).unwrap();
        assert!(result.same_cells(&s));
    }

    #[test]
    fn test_zero_rotation_obb_covers_source() {
        // OBB mode is conservative: it may dilate but never loses cells.
        let s = solid_box(IVec3::ZERO, IVec3::new(4, 4, 4));
        let result = revoxelize(&s, &opts(Axis::Z, 0.0, true)).unwrap();
        for c in s.cells() {
            assert!(result.contains(c), "lost interior cell {c:?}");
        }
    }

    #[test]
    fn test_quarter_turn_matches_volume() {
        let s = solid_box(IVec3::ZERO, IVec3::new(5, 3, 2));
        let result = revoxelize(&s, &opts(Axis::Z, 90.0, false)).unwrap();
        assert_eq!(result.volume(), s.volume());
        assert!(result.is_watertight());
    }

    #[test]
    fn test_rotation_preserves_watertightness_both_modes() {
        let s = solid_box(IVec3::ZERO, IVec3::new(8, 6, 3));
        for conservative in [true, false] {
            let result = revoxelize(&s, &opts(Axis::Z, 30.0, conservative)).unwrap();
            assert!(!result.is_empty());
            assert!(
                result.is_watertight(),
                "conservative={conservative} output must stay watertight"
            );
            assert!(result.is_six_connected());
        }
    }

    #[test]
    fn test_negative_degrees_accepted() {
        let s = solid_box(IVec3::ZERO, IVec3::new(4, 4, 1));
        let result = revoxelize(&s, &opts(Axis::Z, -30.0, true)).unwrap();
        assert!(!result.is_empty());
    }

    #[test]
    fn test_obb_never_underfills_supersampling() {
        let s = solid_box(IVec3::ZERO, IVec3::new(6, 4, 2));
        let mut ss = opts(Axis::Z, 37.0, false);
        ss.samples_per_axis = 5;
        let sampled = revoxelize(&s, &ss).unwrap();
        let conservative = revoxelize(&s, &opts(Axis::Z, 37.0, true)).unwrap();
        for c in sampled.cells() {
            assert!(
                conservative.contains(c),
                "conservative mode missing cell {c:?} found by sampling"
            );
        }
    }

    #[test]
    fn test_sat_detects_overlap_and_separation() {
        let identity = DMat3::IDENTITY;
        assert!(obb_intersects_aabb(
            DVec3::ZERO,
            &identity,
            DVec3::new(0.9, 0.0, 0.0),
            1e-9
        ));
        assert!(!obb_intersects_aabb(
            DVec3::ZERO,
            &identity,
            DVec3::new(1.1, 0.0, 0.0),
            1e-9
        ));
        // 45 degrees about Z: corner reach along X grows to sqrt(2)/2.
        let rot = DMat3::from_rotation_z(std::f64::consts::FRAC_PI_4);
        assert!(obb_intersects_aabb(
            DVec3::ZERO,
            &rot,
            DVec3::new(1.15, 0.0, 0.0),
            1e-9
        ));
        assert!(!obb_intersects_aabb(
            DVec3::ZERO,
            &rot,
            DVec3::new(1.3, 0.0, 0.0),
            1e-9
        ));
    }
}
