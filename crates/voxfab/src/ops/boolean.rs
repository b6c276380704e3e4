//! Boolean composition of solids.
//!
//! All three operations produce a fresh solid by iterating cell memberships
//! and inserting through the incremental path, so the boundary set of the
//! result is rebuilt rather than spliced from the inputs.

use crate::core::VoxelSolid;

/// Boolean operation selector used by the builder and scene layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    Union,
    Subtract,
    Intersect,
}

/// Cells of either input.
pub fn union(a: &VoxelSolid, b: &VoxelSolid) -> VoxelSolid {
    let mut out = VoxelSolid::new();
    for c in a.cells() {
        out.add(c);
    }
    for c in b.cells() {
        out.add(c);
    }
    out
}

/// Cells of `a` that are not in `b`.
pub fn subtract(a: &VoxelSolid, b: &VoxelSolid) -> VoxelSolid {
    let mut out = VoxelSolid::new();
    for c in a.cells() {
        if !b.contains(c) {
            out.add(c);
        }
    }
    out
}

/// Cells present in both inputs.
pub fn intersect(a: &VoxelSolid, b: &VoxelSolid) -> VoxelSolid {
    // Iterate the smaller set.
    let (small, large) = if a.volume() <= b.volume() { (a, b) } else { (b, a) };
    let mut out = VoxelSolid::new();
    for c in small.cells() {
        if large.contains(c) {
            out.add(c);
        }
    }
    out
}

/// Apply `op` with `a` as the left operand.
pub fn apply(op: BoolOp, a: &VoxelSolid, b: &VoxelSolid) -> VoxelSolid {
    match op {
        BoolOp::Union => union(a, b),
        BoolOp::Subtract => subtract(a, b),
        BoolOp::Intersect => intersect(a, b),
    }
}
