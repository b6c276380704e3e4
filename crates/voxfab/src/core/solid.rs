//! Voxel occupancy with an incrementally maintained boundary-face set.
//!
//! `VoxelSolid` owns two sets: the occupied cells `V` and the boundary faces
//! `B`. The central invariant is that a face is in `B` iff exactly one of its
//! two adjacent cells is in `V`. Both `add` and `remove` preserve it by
//! toggling the six faces of the touched cell, which keeps watertightness
//! checks and mesh extraction proportional to `|B|` instead of `|V|`.

use crate::axis::Axis;
use crate::core::cell::{Bounds, Cell, CellExt, NEIGHBOR_OFFSETS};
use crate::core::face::{EdgeKey, FaceKey};
use glam::IVec3;
use std::collections::{HashMap, HashSet, VecDeque};

/// An integer-lattice solid: a set of occupied unit cells plus the set of
/// unit faces separating occupied from unoccupied space.
#[derive(Debug, Clone, Default)]
pub struct VoxelSolid {
    cells: HashSet<Cell>,
    faces: HashSet<FaceKey>,
}

impl VoxelSolid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a solid from any cell iterator, rebuilding the boundary set
    /// through the incremental path.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        let mut solid = Self::new();
        for c in cells {
            solid.add(c);
        }
        solid
    }

    /// Number of occupied cells (lattice volume).
    #[inline]
    pub fn volume(&self) -> usize {
        self.cells.len()
    }

    /// Number of boundary faces (lattice surface area).
    #[inline]
    pub fn surface_area(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Iterate occupied cells in unspecified order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Iterate boundary faces in unspecified order.
    pub fn boundary_faces(&self) -> impl Iterator<Item = FaceKey> + '_ {
        self.faces.iter().copied()
    }

    /// Insert a cell, toggling its six faces. No-op if already present.
    pub fn add(&mut self, cell: Cell) {
        if !self.cells.insert(cell) {
            return;
        }
        for (_, axis, positive) in cell.face_neighbors() {
            self.toggle_face(FaceKey::between(cell, axis, positive));
        }
    }

    /// Remove a cell, toggling its six faces. No-op if absent.
    pub fn remove(&mut self, cell: Cell) {
        if !self.cells.remove(&cell) {
            return;
        }
        for (_, axis, positive) in cell.face_neighbors() {
            self.toggle_face(FaceKey::between(cell, axis, positive));
        }
    }

    #[inline]
    fn toggle_face(&mut self, face: FaceKey) {
        if !self.faces.remove(&face) {
            self.faces.insert(face);
        }
    }

    /// Enclosing cell bounds as `(min, max_excl)`. Empty solids report the
    /// degenerate `((0,0,0), (0,0,0))`.
    pub fn bounds(&self) -> Bounds {
        let mut iter = self.cells.iter();
        let Some(first) = iter.next() else {
            return (IVec3::ZERO, IVec3::ZERO);
        };
        let mut min = *first;
        let mut max = *first;
        for c in iter {
            min = min.min(*c);
            max = max.max(*c);
        }
        (min, max + IVec3::ONE)
    }

    /// True when every pair of occupied cells is linked by a path of
    /// face-adjacent occupied cells. The empty solid counts as connected.
    pub fn is_six_connected(&self) -> bool {
        let Some(seed) = self.cells.iter().next() else {
            return true;
        };
        let mut seen: HashSet<Cell> = HashSet::with_capacity(self.cells.len());
        let mut queue = VecDeque::new();
        seen.insert(*seed);
        queue.push_back(*seed);
        while let Some(c) = queue.pop_front() {
            for offset in NEIGHBOR_OFFSETS {
                let n = c + offset;
                if self.cells.contains(&n) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen.len() == self.cells.len()
    }

    /// True when the boundary-face complex is closed: every face edge is
    /// shared by exactly two boundary faces. The empty solid is watertight.
    pub fn is_watertight(&self) -> bool {
        if self.cells.is_empty() {
            return true;
        }
        if self.faces.is_empty() {
            return false;
        }
        let mut edge_counts: HashMap<EdgeKey, u32> = HashMap::with_capacity(self.faces.len() * 2);
        for face in &self.faces {
            for edge in face.edges() {
                *edge_counts.entry(edge).or_insert(0) += 1;
            }
        }
        edge_counts.values().all(|&count| count == 2)
    }

    /// The side of a boundary face that carries the filled cell: true when
    /// the occupied cell lies on the negative side of the plane (so the
    /// outward normal points toward +axis).
    ///
    /// A boundary face with neither or both neighbors occupied can only come
    /// from a corrupted set and is reported as an invariant violation.
    pub fn face_filled_on_negative_side(&self, face: FaceKey) -> crate::error::Result<bool> {
        let (neg, pos) = face.adjacent_cells();
        match (self.cells.contains(&neg), self.cells.contains(&pos)) {
            (true, false) => Ok(true),
            (false, true) => Ok(false),
            _ => Err(crate::error::Error::Invariant(format!(
                "boundary face {:?} has {} occupied neighbors",
                face,
                (self.cells.contains(&neg) as u8) + (self.cells.contains(&pos) as u8)
            ))),
        }
    }

    /// Occupied cells with at least one unoccupied face neighbor.
    pub fn surface_cells(&self) -> Vec<Cell> {
        let mut surface: Vec<Cell> = self
            .cells
            .iter()
            .copied()
            .filter(|&c| {
                NEIGHBOR_OFFSETS
                    .iter()
                    .any(|&offset| !self.cells.contains(&(c + offset)))
            })
            .collect();
        // Deterministic order for downstream tie-breaking.
        surface.sort_by_key(|c| (c.x, c.y, c.z));
        surface
    }

    /// Set equality on occupied cells.
    pub fn same_cells(&self, other: &VoxelSolid) -> bool {
        self.cells == other.cells
    }

    /// Per-axis extent of the bounds along `axis`, zero when empty.
    pub fn extent(&self, axis: Axis) -> i32 {
        let (min, max) = self.bounds();
        max.axis(axis) - min.axis(axis)
    }
}
