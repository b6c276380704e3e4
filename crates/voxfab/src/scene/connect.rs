//! Connective operators between two solids: Weld, BridgeAxis and Strut.

use crate::axis::Axis;
use crate::core::{Bounds, Cell, CellExt, VoxelSolid};
use crate::error::{Error, Result};
use crate::ops::{self, structuring_element, Metric};
use crate::scene::{Role, Scene};
use glam::IVec3;
use std::collections::HashMap;
use tracing::info;

/// Union two solids and, if the union is disconnected, close it with the
/// smallest radius that makes it 6-connected. Returns the result and the
/// radius used (zero when the plain union was already connected).
///
/// The search doubles an initial guess up to 16 times looking for any
/// connecting radius, then binary-searches the minimum. If even the doubled
/// high never connects, the last closure is returned as-is.
pub fn weld(
    a: &VoxelSolid,
    b: &VoxelSolid,
    radius: Option<i32>,
    metric: Metric,
) -> (VoxelSolid, i32) {
    let union = ops::union(a, b);
    if union.is_six_connected() {
        return (union, 0);
    }

    let mut r = radius
        .unwrap_or_else(|| chebyshev_gap(a.bounds(), b.bounds()))
        .max(1);
    let mut closed = union.close(r, metric);
    let mut attempts = 0;
    while !closed.is_six_connected() && attempts < 16 {
        r *= 2;
        closed = union.close(r, metric);
        attempts += 1;
    }
    if !closed.is_six_connected() {
        // Fail-safe: report the high radius even though it did not connect.
        return (closed, r);
    }

    let mut lo = 1;
    let mut hi = r;
    let mut best = closed;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let candidate = union.close(mid, metric);
        if candidate.is_six_connected() {
            best = candidate;
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    (best, hi)
}

/// Chebyshev distance between two cell-bound boxes: the largest per-axis
/// gap, zero when the boxes touch or overlap.
fn chebyshev_gap(a: Bounds, b: Bounds) -> i32 {
    let mut gap = 0;
    for axis in Axis::ALL {
        let a_min = a.0.axis(axis);
        let a_max = a.1.axis(axis);
        let b_min = b.0.axis(axis);
        let b_max = b.1.axis(axis);
        gap = gap.max(b_min - a_max).max(a_min - b_max);
    }
    gap.max(0)
}

/// Fill the gap between two solids along `axis` over the intersection of
/// their perpendicular projections, growing `thickness - 1` cells into the
/// earlier solid's side and `thickness` toward the later one. An optional
/// mask AABB restricts which bridge cells are kept. The result is the union
/// of both inputs and the bridge cells.
pub fn bridge_axis(
    a: &VoxelSolid,
    b: &VoxelSolid,
    axis: Axis,
    thickness: i32,
    mask: Option<Bounds>,
) -> Result<VoxelSolid> {
    if thickness < 1 {
        return Err(Error::InvalidArgument(format!(
            "bridge thickness must be positive, got {thickness}"
        )));
    }
    let mut out = ops::union(a, b);
    if a.is_empty() || b.is_empty() {
        return Ok(out);
    }

    // Order the inputs along the axis by bounds center.
    let (a_bounds, b_bounds) = (a.bounds(), b.bounds());
    let a_center2 = a_bounds.0.axis(axis) + a_bounds.1.axis(axis);
    let b_center2 = b_bounds.0.axis(axis) + b_bounds.1.axis(axis);
    let (earlier, later, earlier_bounds, later_bounds) = if a_center2 <= b_center2 {
        (a, b, a_bounds, b_bounds)
    } else {
        (b, a, b_bounds, a_bounds)
    };

    let earlier_proj = project(earlier, axis);
    let later_proj = project(later, axis);

    // Footprint: columns present in both projections, or the AABB overlap
    // rectangle when the projections never coincide.
    let mut footprint: Vec<(i32, i32)> = earlier_proj
        .keys()
        .filter(|uv| later_proj.contains_key(uv))
        .copied()
        .collect();
    if footprint.is_empty() {
        let (ua, ub) = axis.plane_axes();
        let u_lo = earlier_bounds.0.axis(ua).max(later_bounds.0.axis(ua));
        let u_hi = earlier_bounds.1.axis(ua).min(later_bounds.1.axis(ua));
        let v_lo = earlier_bounds.0.axis(ub).max(later_bounds.0.axis(ub));
        let v_hi = earlier_bounds.1.axis(ub).min(later_bounds.1.axis(ub));
        for u in u_lo..u_hi {
            for v in v_lo..v_hi {
                footprint.push((u, v));
            }
        }
    }
    footprint.sort();

    let (ua, ub) = axis.plane_axes();
    for (u, v) in footprint {
        // Nearer faces: per-column extents when known, box extents otherwise.
        let start = earlier_proj
            .get(&(u, v))
            .map(|span| span.1)
            .unwrap_or_else(|| earlier_bounds.1.axis(axis));
        let end = later_proj
            .get(&(u, v))
            .map(|span| span.0)
            .unwrap_or_else(|| later_bounds.0.axis(axis));
        for k in (start - (thickness - 1))..(end + thickness) {
            let cell = IVec3::ZERO
                .with_axis(axis, k)
                .with_axis(ua, u)
                .with_axis(ub, v);
            if let Some((mask_min, mask_max)) = mask {
                let inside = (0..3).all(|i| {
                    let axis_i = Axis::ALL[i];
                    cell.axis(axis_i) >= mask_min.axis(axis_i)
                        && cell.axis(axis_i) < mask_max.axis(axis_i)
                });
                if !inside {
                    continue;
                }
            }
            out.add(cell);
        }
    }
    Ok(out)
}

/// Per-column extent of a solid along `axis`: `(u, v) -> (min, max_excl)`.
fn project(solid: &VoxelSolid, axis: Axis) -> HashMap<(i32, i32), (i32, i32)> {
    let (ua, ub) = axis.plane_axes();
    let mut columns: HashMap<(i32, i32), (i32, i32)> = HashMap::new();
    for c in solid.cells() {
        let key = (c.axis(ua), c.axis(ub));
        let k = c.axis(axis);
        columns
            .entry(key)
            .and_modify(|span| {
                span.0 = span.0.min(k);
                span.1 = span.1.max(k + 1);
            })
            .or_insert((k, k + 1));
    }
    columns
}

/// Connect two solids with a straight strut: rasterize a line between the
/// closest pair of surface cells and thicken it with the Chebyshev ball of
/// the given radius. The result is the union of both inputs and the strut.
pub fn strut(a: &VoxelSolid, b: &VoxelSolid, radius: i32) -> VoxelSolid {
    let mut out = ops::union(a, b);
    let surface_a = a.surface_cells();
    let surface_b = b.surface_cells();
    let Some((from, to)) = closest_pair(&surface_a, &surface_b) else {
        return out;
    };

    let ball = structuring_element(radius, Metric::Chebyshev);
    for cell in bresenham_line(from, to) {
        for &delta in &ball {
            out.add(cell + delta);
        }
    }
    out
}

/// Closest pair by squared Euclidean distance; ties resolve to the first
/// pair in the (sorted) scan order.
fn closest_pair(a: &[Cell], b: &[Cell]) -> Option<(Cell, Cell)> {
    let mut best: Option<(i64, Cell, Cell)> = None;
    for &ca in a {
        for &cb in b {
            let d = cb - ca;
            let dist = i64::from(d.x) * i64::from(d.x)
                + i64::from(d.y) * i64::from(d.y)
                + i64::from(d.z) * i64::from(d.z);
            if best.map_or(true, |(bd, _, _)| dist < bd) {
                best = Some((dist, ca, cb));
            }
        }
    }
    best.map(|(_, ca, cb)| (ca, cb))
}

/// Integer line rasterization, dominant-axis 3D Bresenham. Both endpoints
/// are included.
fn bresenham_line(from: Cell, to: Cell) -> Vec<Cell> {
    let delta = (to - from).abs();
    let step = IVec3::new(
        (to.x - from.x).signum(),
        (to.y - from.y).signum(),
        (to.z - from.z).signum(),
    );
    let mut p = from;
    let mut points = vec![p];

    if delta.x >= delta.y && delta.x >= delta.z {
        let mut err_y = 2 * delta.y - delta.x;
        let mut err_z = 2 * delta.z - delta.x;
        for _ in 0..delta.x {
            if err_y > 0 {
                p.y += step.y;
                err_y -= 2 * delta.x;
            }
            if err_z > 0 {
                p.z += step.z;
                err_z -= 2 * delta.x;
            }
            err_y += 2 * delta.y;
            err_z += 2 * delta.z;
            p.x += step.x;
            points.push(p);
        }
    } else if delta.y >= delta.x && delta.y >= delta.z {
        let mut err_x = 2 * delta.x - delta.y;
        let mut err_z = 2 * delta.z - delta.y;
        for _ in 0..delta.y {
            if err_x > 0 {
                p.x += step.x;
                err_x -= 2 * delta.y;
            }
            if err_z > 0 {
                p.z += step.z;
                err_z -= 2 * delta.y;
            }
            err_x += 2 * delta.x;
            err_z += 2 * delta.z;
            p.y += step.y;
            points.push(p);
        }
    } else {
        let mut err_x = 2 * delta.x - delta.z;
        let mut err_y = 2 * delta.y - delta.z;
        for _ in 0..delta.z {
            if err_x > 0 {
                p.x += step.x;
                err_x -= 2 * delta.z;
            }
            if err_y > 0 {
                p.y += step.y;
                err_y -= 2 * delta.z;
            }
            err_x += 2 * delta.x;
            err_y += 2 * delta.y;
            p.z += step.z;
            points.push(p);
        }
    }
    points
}

impl Scene {
    /// Weld two registered parts and register the closed result as a new
    /// named part. Returns the new part id and the radius used.
    pub fn weld_parts(
        &mut self,
        a: usize,
        b: usize,
        name: impl Into<String>,
        radius: Option<i32>,
        metric: Metric,
    ) -> Result<(usize, i32)> {
        let solid_a = self.part(a)?.solid.clone();
        let solid_b = self.part(b)?.solid.clone();
        let (welded, used) = weld(&solid_a, &solid_b, radius, metric);
        info!(radius = used, "weld closed at radius");
        let id = self.add_part(name, welded, Role::Solid);
        Ok((id, used))
    }
}
