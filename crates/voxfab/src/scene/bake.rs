//! The bake pipeline: instance composition into one solid.

use crate::config::Quality;
use crate::core::VoxelSolid;
use crate::error::{Error, Result};
use crate::ops::{self, BoolOp, Metric};
use crate::revox::revoxelize;
use crate::scene::{Instance, Role, Scene};
use tracing::debug;

/// Per-bake overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct BakeOverrides {
    /// Bake at a different lattice resolution. Must be a positive multiple
    /// of the scene's `voxels_per_unit`.
    pub voxels_per_unit: Option<u32>,
}

impl Scene {
    /// Compose all instances, in insertion order, into one solid.
    pub fn bake(&self, overrides: Option<&BakeOverrides>) -> Result<VoxelSolid> {
        let factor = self.resolution_factor(overrides)?;
        let mut accumulator = VoxelSolid::new();
        for (index, instance) in self.instances().iter().enumerate() {
            let placed = self.realize_instance(instance, factor)?;
            debug!(
                instance = index,
                role = ?instance.role,
                cells = placed.volume(),
                "baking instance"
            );
            let op = match instance.role {
                Role::Solid => BoolOp::Union,
                Role::Hole => BoolOp::Subtract,
                Role::Intersect => BoolOp::Intersect,
            };
            accumulator = ops::apply(op, &accumulator, &placed);
        }
        Ok(accumulator)
    }

    /// Bake and then apply the quality profile's refinements.
    pub fn bake_for_quality(&self, quality: Quality) -> Result<VoxelSolid> {
        let baked = self.bake(None)?;
        Ok(match quality {
            Quality::Draft => baked,
            Quality::Medium => baked.upscale(2).close(1, Metric::Chebyshev),
            Quality::High => baked
                .upscale(3)
                .close(1, Metric::Chebyshev)
                .open(1, Metric::Chebyshev),
        })
    }

    fn resolution_factor(&self, overrides: Option<&BakeOverrides>) -> Result<i32> {
        let Some(requested) = overrides.and_then(|o| o.voxels_per_unit) else {
            return Ok(1);
        };
        if requested == 0 {
            return Err(Error::InvalidArgument(
                "voxels_per_unit override must be positive".into(),
            ));
        }
        let base = self.settings.voxels_per_unit;
        if requested % base != 0 {
            return Err(Error::InvalidArgument(format!(
                "voxels_per_unit override {requested} is not a multiple of the scene resolution {base}"
            )));
        }
        Ok((requested / base) as i32)
    }

    /// Clone, rescale, frame and optionally revoxelize one instance.
    fn realize_instance(&self, instance: &Instance, factor: i32) -> Result<VoxelSolid> {
        let part = self.part(instance.part)?;
        let scaled = part.solid.upscale(factor);

        // Exact frame; translation is expressed in scene lattice units, so
        // it scales with the resolution factor.
        let mut frame = instance.frame;
        frame.translation *= factor;
        let placed = VoxelSolid::from_cells(scaled.cells().map(|c| frame.apply(c)));

        let Some(rotation) = instance.rotation else {
            return Ok(placed);
        };
        let mut options = self.settings.revox.options(
            rotation.axis,
            rotation.degrees,
            rotation.pivot * f64::from(factor),
        );
        if let Some(epsilon) = rotation.epsilon {
            options.epsilon = epsilon;
        }
        if let Some(samples) = rotation.samples_per_axis {
            options.samples_per_axis = samples;
        }
        revoxelize(&placed, &options)
    }
}
