//! Parts, instances and the scene container.
//!
//! A part is a named immutable solid with a default boolean role. Instances
//! reference a part and carry a mutable exact integer frame (3x3 matrix plus
//! translation, composed by left-multiplication of 90-degree rotations and
//! axis reflections) and an optional arbitrary rotation applied by the bake
//! pipeline after the exact frame.

pub mod bake;
pub mod connect;

pub use bake::BakeOverrides;

use crate::axis::Axis;
use crate::config::ProjectSettings;
use crate::core::{Cell, VoxelSolid};
use crate::error::{Error, Result};
use glam::{DVec3, IVec3};

/// How an instance combines into the bake accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Solid,
    Hole,
    Intersect,
}

/// Named immutable solid registered with a scene.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub solid: VoxelSolid,
    pub default_role: Role,
}

/// Exact integer affine frame: `cell -> matrix * cell + translation`.
/// Rows are stored as `IVec3`, so `apply` is three dot products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactFrame {
    rows: [IVec3; 3],
    pub translation: IVec3,
}

impl Default for ExactFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ExactFrame {
    pub const IDENTITY: ExactFrame = ExactFrame {
        rows: [IVec3::X, IVec3::Y, IVec3::Z],
        translation: IVec3::ZERO,
    };

    #[inline]
    pub fn apply(&self, cell: Cell) -> Cell {
        IVec3::new(
            self.rows[0].dot(cell),
            self.rows[1].dot(cell),
            self.rows[2].dot(cell),
        ) + self.translation
    }

    /// Compose `(m, t)` after `self`: the result maps
    /// `cell -> m * (self(cell)) + t`.
    fn premultiply(&mut self, m: [IVec3; 3], t: IVec3) {
        let mul_row = |row: IVec3| {
            row.x * self.rows[0] + row.y * self.rows[1] + row.z * self.rows[2]
        };
        let mul_vec = |row: IVec3| row.dot(self.translation);
        let new_rows = [mul_row(m[0]), mul_row(m[1]), mul_row(m[2])];
        let new_translation =
            IVec3::new(mul_vec(m[0]), mul_vec(m[1]), mul_vec(m[2])) + t;
        self.rows = new_rows;
        self.translation = new_translation;
    }

    /// Prepend a translation.
    pub fn translate(&mut self, delta: IVec3) {
        self.translation += delta;
    }

    /// Prepend `quarter_turns mod 4` canonical 90-degree rotations.
    pub fn rotate90(&mut self, axis: Axis, quarter_turns: i32) {
        let m = match axis {
            Axis::X => [IVec3::X, IVec3::new(0, 0, -1), IVec3::Y],
            Axis::Y => [IVec3::Z, IVec3::Y, IVec3::new(-1, 0, 0)],
            Axis::Z => [IVec3::new(0, -1, 0), IVec3::X, IVec3::Z],
        };
        for _ in 0..quarter_turns.rem_euclid(4) {
            self.premultiply(m, IVec3::ZERO);
        }
    }

    /// Prepend an axis reflection in half-open cell space (`x -> -x - 1`).
    pub fn mirror(&mut self, axis: Axis) {
        let m = match axis {
            Axis::X => [IVec3::new(-1, 0, 0), IVec3::Y, IVec3::Z],
            Axis::Y => [IVec3::X, IVec3::new(0, -1, 0), IVec3::Z],
            Axis::Z => [IVec3::X, IVec3::Y, IVec3::new(0, 0, -1)],
        };
        self.premultiply(m, -axis.unit());
    }
}

/// Arbitrary-angle rotation attached to an instance, applied after the
/// exact frame during bake.
#[derive(Debug, Clone, Copy)]
pub struct ArbitraryRotation {
    pub axis: Axis,
    pub degrees: f64,
    pub pivot: DVec3,
    /// Override of the scene default when set.
    pub epsilon: Option<f64>,
    /// Override of the scene default when set.
    pub samples_per_axis: Option<u32>,
}

impl ArbitraryRotation {
    pub fn new(axis: Axis, degrees: f64, pivot: DVec3) -> Self {
        ArbitraryRotation {
            axis,
            degrees,
            pivot,
            epsilon: None,
            samples_per_axis: None,
        }
    }
}

/// Placement of a part in the scene.
#[derive(Debug, Clone)]
pub struct Instance {
    pub part: usize,
    pub frame: ExactFrame,
    pub rotation: Option<ArbitraryRotation>,
    pub role: Role,
}

/// Ordered instance list plus project-wide settings.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub settings: ProjectSettings,
    parts: Vec<Part>,
    instances: Vec<Instance>,
}

impl Scene {
    pub fn new(settings: ProjectSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Scene {
            settings,
            parts: Vec::new(),
            instances: Vec::new(),
        })
    }

    /// Register a part and return its id.
    pub fn add_part(
        &mut self,
        name: impl Into<String>,
        solid: VoxelSolid,
        default_role: Role,
    ) -> usize {
        self.parts.push(Part {
            name: name.into(),
            solid,
            default_role,
        });
        self.parts.len() - 1
    }

    pub fn part(&self, id: usize) -> Result<&Part> {
        self.parts
            .get(id)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown part id {id}")))
    }

    pub fn part_by_name(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Append an instance of `part` with an identity frame and the part's
    /// default role; returns the instance index.
    pub fn add_instance(&mut self, part: usize) -> Result<usize> {
        let role = self.part(part)?.default_role;
        self.instances.push(Instance {
            part,
            frame: ExactFrame::IDENTITY,
            rotation: None,
            role,
        });
        Ok(self.instances.len() - 1)
    }

    pub fn instance_mut(&mut self, index: usize) -> Result<&mut Instance> {
        self.instances
            .get_mut(index)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown instance index {index}")))
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_frame() {
        let frame = ExactFrame::IDENTITY;
        assert_eq!(frame.apply(IVec3::new(3, -2, 5)), IVec3::new(3, -2, 5));
    }

    #[test]
    fn test_translate_then_rotate_composes_left() {
        let mut frame = ExactFrame::IDENTITY;
        frame.translate(IVec3::new(10, 0, 0));
        frame.rotate90(Axis::Z, 1);
        // cell -> Rz * (cell + (10,0,0)): (0,0,0) -> (10,0,0) -> (0,10,0)
        assert_eq!(frame.apply(IVec3::ZERO), IVec3::new(0, 10, 0));
    }

    #[test]
    fn test_rotate90_four_turns_is_identity() {
        let mut frame = ExactFrame::IDENTITY;
        frame.translate(IVec3::new(1, 2, 3));
        let reference = frame;
        frame.rotate90(Axis::X, 4);
        assert_eq!(frame, reference);
    }

    #[test]
    fn test_frame_matches_solid_rotation() {
        // The frame's rotation agrees with VoxelSolid::rotate90.
        let mut solid = VoxelSolid::new();
        solid.fill_box(IVec3::new(1, 0, 0), IVec3::new(3, 2, 1));
        let rotated = solid.rotate90(Axis::Z, 1);

        let mut frame = ExactFrame::IDENTITY;
        frame.rotate90(Axis::Z, 1);
        let by_frame = VoxelSolid::from_cells(solid.cells().map(|c| frame.apply(c)));
        assert!(by_frame.same_cells(&rotated));
    }

    #[test]
    fn test_frame_mirror_matches_solid_mirror() {
        let mut solid = VoxelSolid::new();
        solid.fill_box(IVec3::ZERO, IVec3::new(3, 1, 1));
        let mirrored = solid.mirror(Axis::X);

        let mut frame = ExactFrame::IDENTITY;
        frame.mirror(Axis::X);
        let by_frame = VoxelSolid::from_cells(solid.cells().map(|c| frame.apply(c)));
        assert!(by_frame.same_cells(&mirrored));
    }

    #[test]
    fn test_scene_part_registry() {
        let mut scene = Scene::default();
        let mut solid = VoxelSolid::new();
        solid.add(IVec3::ZERO);
        let id = scene.add_part("pin", solid, Role::Solid);
        assert_eq!(scene.part(id).unwrap().name, "pin");
        assert!(scene.part_by_name("pin").is_some());
        assert!(scene.part(99).is_err());
    }

    #[test]
    fn test_instance_gets_default_role() {
        let mut scene = Scene::default();
        let mut solid = VoxelSolid::new();
        solid.add(IVec3::ZERO);
        let id = scene.add_part("hole", solid, Role::Hole);
        let idx = scene.add_instance(id).unwrap();
        assert_eq!(scene.instances()[idx].role, Role::Hole);
    }
}
