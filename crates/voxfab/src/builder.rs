//! Fluent solid construction.
//!
//! A builder owns one solid and a current transform list. Primitives are
//! materialized into a scratch solid, carried through the transform list in
//! order, then committed into the owned solid: added for solids, removed for
//! cuts. Nested scopes run a closure against a child builder and combine the
//! child's output back with a boolean, or revoxelize it first for the
//! arbitrary-rotation scopes.

use crate::axis::Axis;
use crate::config::RevoxSettings;
use crate::core::{Cell, VoxelSolid};
use crate::error::Result;
use crate::ops::{self, BoolOp};
use crate::revox::{revoxelize, RevoxOptions};
use glam::{DVec3, IVec3};

/// One entry of the transform list, applied oldest first.
#[derive(Debug, Clone, Copy)]
enum Step {
    Translate(IVec3),
    Rotate90 { axis: Axis, quarter_turns: i32 },
    Mirror(Axis),
}

impl Step {
    fn apply(self, solid: &VoxelSolid) -> VoxelSolid {
        match self {
            Step::Translate(delta) => solid.translate(delta),
            Step::Rotate90 { axis, quarter_turns } => solid.rotate90(axis, quarter_turns),
            Step::Mirror(axis) => solid.mirror(axis),
        }
    }
}

/// Stateful builder for one solid.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    solid: VoxelSolid,
    transforms: Vec<Step>,
    revox: RevoxSettings,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder using scene-level revoxelization defaults for `rotate_any`.
    pub fn with_revox_settings(revox: RevoxSettings) -> Self {
        Builder {
            revox,
            ..Self::default()
        }
    }

    /// Consume the builder and take the constructed solid.
    pub fn build(self) -> VoxelSolid {
        self.solid
    }

    pub fn solid(&self) -> &VoxelSolid {
        &self.solid
    }

    // ----- transform stack -----

    pub fn translate(&mut self, delta: IVec3) -> &mut Self {
        self.transforms.push(Step::Translate(delta));
        self
    }

    pub fn rotate90(&mut self, axis: Axis, quarter_turns: i32) -> &mut Self {
        self.transforms.push(Step::Rotate90 { axis, quarter_turns });
        self
    }

    pub fn mirror(&mut self, axis: Axis) -> &mut Self {
        self.transforms.push(Step::Mirror(axis));
        self
    }

    pub fn reset_transform(&mut self) -> &mut Self {
        self.transforms.clear();
        self
    }

    // ----- primitive emit -----

    pub fn solid_box(&mut self, min: Cell, max_excl: Cell) -> &mut Self {
        let mut scratch = VoxelSolid::new();
        scratch.fill_box(min, max_excl);
        self.commit(scratch, false)
    }

    pub fn cut_box(&mut self, min: Cell, max_excl: Cell) -> &mut Self {
        let mut scratch = VoxelSolid::new();
        scratch.fill_box(min, max_excl);
        self.commit(scratch, true)
    }

    pub fn sphere(&mut self, center: Cell, r: i32) -> &mut Self {
        let mut scratch = VoxelSolid::new();
        scratch.fill_sphere(center, r);
        self.commit(scratch, false)
    }

    pub fn cut_sphere(&mut self, center: Cell, r: i32) -> &mut Self {
        let mut scratch = VoxelSolid::new();
        scratch.fill_sphere(center, r);
        self.commit(scratch, true)
    }

    pub fn cylinder_x(&mut self, cy: i32, cz: i32, x_lo: i32, x_hi_excl: i32, r: i32) -> &mut Self {
        let mut scratch = VoxelSolid::new();
        scratch.fill_cylinder_x(cy, cz, x_lo, x_hi_excl, r);
        self.commit(scratch, false)
    }

    pub fn cut_cylinder_x(&mut self, cy: i32, cz: i32, x_lo: i32, x_hi_excl: i32, r: i32) -> &mut Self {
        let mut scratch = VoxelSolid::new();
        scratch.fill_cylinder_x(cy, cz, x_lo, x_hi_excl, r);
        self.commit(scratch, true)
    }

    pub fn cylinder_y(&mut self, cx: i32, cz: i32, y_lo: i32, y_hi_excl: i32, r: i32) -> &mut Self {
        let mut scratch = VoxelSolid::new();
        scratch.fill_cylinder_y(cx, cz, y_lo, y_hi_excl, r);
        self.commit(scratch, false)
    }

    pub fn cut_cylinder_y(&mut self, cx: i32, cz: i32, y_lo: i32, y_hi_excl: i32, r: i32) -> &mut Self {
        let mut scratch = VoxelSolid::new();
        scratch.fill_cylinder_y(cx, cz, y_lo, y_hi_excl, r);
        self.commit(scratch, true)
    }

    pub fn cylinder_z(&mut self, cx: i32, cy: i32, z_lo: i32, z_hi_excl: i32, r: i32) -> &mut Self {
        let mut scratch = VoxelSolid::new();
        scratch.fill_cylinder_z(cx, cy, z_lo, z_hi_excl, r);
        self.commit(scratch, false)
    }

    pub fn cut_cylinder_z(&mut self, cx: i32, cy: i32, z_lo: i32, z_hi_excl: i32, r: i32) -> &mut Self {
        let mut scratch = VoxelSolid::new();
        scratch.fill_cylinder_z(cx, cy, z_lo, z_hi_excl, r);
        self.commit(scratch, true)
    }

    /// Run the scratch solid through the transform list, then add or remove
    /// its cells.
    fn commit(&mut self, mut scratch: VoxelSolid, cut: bool) -> &mut Self {
        for step in &self.transforms {
            scratch = step.apply(&scratch);
        }
        if cut {
            for c in scratch.cells() {
                self.solid.remove(c);
            }
        } else {
            for c in scratch.cells() {
                self.solid.add(c);
            }
        }
        self
    }

    // ----- nested scopes -----

    fn child(&self, transforms: Vec<Step>) -> Builder {
        Builder {
            solid: VoxelSolid::new(),
            transforms,
            revox: self.revox,
        }
    }

    fn run_scope<F>(&self, transforms: Vec<Step>, scope: F) -> VoxelSolid
    where
        F: FnOnce(&mut Builder),
    {
        let mut child = self.child(transforms);
        scope(&mut child);
        child.build()
    }

    fn combine(&mut self, op: BoolOp, other: VoxelSolid) {
        match op {
            BoolOp::Union => {
                for c in other.cells() {
                    self.solid.add(c);
                }
            }
            BoolOp::Subtract => {
                for c in other.cells() {
                    self.solid.remove(c);
                }
            }
            BoolOp::Intersect => {
                self.solid = ops::intersect(&self.solid, &other);
            }
        }
    }

    /// Run `scope` with the current transforms extended by `offset`, then
    /// union the result in.
    pub fn place<F>(&mut self, offset: IVec3, scope: F) -> &mut Self
    where
        F: FnOnce(&mut Builder),
    {
        let mut transforms = self.transforms.clone();
        transforms.push(Step::Translate(offset));
        let child_solid = self.run_scope(transforms, scope);
        self.combine(BoolOp::Union, child_solid);
        self
    }

    /// Repeat `scope` `count` times along X with the given spacing.
    pub fn array_x<F>(&mut self, count: i32, spacing: i32, scope: F) -> &mut Self
    where
        F: Fn(&mut Builder),
    {
        for i in 0..count.max(0) {
            self.place(IVec3::new(i * spacing, 0, 0), &scope);
        }
        self
    }

    /// Repeat `scope` `count` times along Y with the given spacing.
    pub fn array_y<F>(&mut self, count: i32, spacing: i32, scope: F) -> &mut Self
    where
        F: Fn(&mut Builder),
    {
        for i in 0..count.max(0) {
            self.place(IVec3::new(0, i * spacing, 0), &scope);
        }
        self
    }

    /// Repeat `scope` over an XY grid.
    pub fn grid<F>(&mut self, nx: i32, ny: i32, dx: i32, dy: i32, scope: F) -> &mut Self
    where
        F: Fn(&mut Builder),
    {
        for j in 0..ny.max(0) {
            for i in 0..nx.max(0) {
                self.place(IVec3::new(i * dx, j * dy, 0), &scope);
            }
        }
        self
    }

    /// Build `scope` into a fresh solid and union it in.
    pub fn union<F>(&mut self, scope: F) -> &mut Self
    where
        F: FnOnce(&mut Builder),
    {
        let child_solid = self.run_scope(self.transforms.clone(), scope);
        self.combine(BoolOp::Union, child_solid);
        self
    }

    /// Build `scope` into a fresh solid and subtract it.
    pub fn subtract<F>(&mut self, scope: F) -> &mut Self
    where
        F: FnOnce(&mut Builder),
    {
        let child_solid = self.run_scope(self.transforms.clone(), scope);
        self.combine(BoolOp::Subtract, child_solid);
        self
    }

    /// Build `scope` into a fresh solid and intersect with it.
    pub fn intersect<F>(&mut self, scope: F) -> &mut Self
    where
        F: FnOnce(&mut Builder),
    {
        let child_solid = self.run_scope(self.transforms.clone(), scope);
        self.combine(BoolOp::Intersect, child_solid);
        self
    }

    /// Build `scope`, revoxelize it by `degrees` about `axis` around the
    /// center of its bounds, then union the result in.
    pub fn rotate_any<F>(&mut self, axis: Axis, degrees: f64, scope: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Builder),
    {
        let child_solid = self.run_scope(self.transforms.clone(), scope);
        let (min, max_excl) = child_solid.bounds();
        let pivot = (min.as_dvec3() + max_excl.as_dvec3()) * 0.5;
        let options = self.revox.options(axis, degrees, pivot);
        self.rotate_with_options(child_solid, &options)
    }

    /// As `rotate_any` with an explicit pivot.
    pub fn rotate_any_around<F>(
        &mut self,
        axis: Axis,
        degrees: f64,
        pivot: DVec3,
        scope: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut Builder),
    {
        let child_solid = self.run_scope(self.transforms.clone(), scope);
        let options = self.revox.options(axis, degrees, pivot);
        self.rotate_with_options(child_solid, &options)
    }

    /// As `rotate_any` with fully explicit revoxelizer options.
    pub fn rotate_any_with<F>(&mut self, options: &RevoxOptions, scope: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Builder),
    {
        let child_solid = self.run_scope(self.transforms.clone(), scope);
        self.rotate_with_options(child_solid, options)
    }

    fn rotate_with_options(
        &mut self,
        child_solid: VoxelSolid,
        options: &RevoxOptions,
    ) -> Result<&mut Self> {
        let rotated = revoxelize(&child_solid, options)?;
        self.combine(BoolOp::Union, rotated);
        Ok(self)
    }
}
