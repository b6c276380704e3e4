//! Project, bake and export configuration.

use crate::error::{Error, Result};
use crate::io::compress::{Compression, CompressionLevel};
use crate::io::sbvx::Encoding;
use crate::revox::RevoxOptions;
use serde::{Deserialize, Serialize};

/// Label for downstream consumers; lattice math never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    #[default]
    Millimeters,
    Inches,
}

/// Bake quality profile: upscale factor and morphological smoothing
/// applied before export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quality {
    #[default]
    Draft,
    Medium,
    High,
}

/// Mesh extraction engine. Surface Nets is declared but unimplemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeshEngine {
    #[default]
    VoxelFaces,
    SurfaceNets,
}

/// Scene-wide defaults for arbitrary-angle revoxelization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RevoxSettings {
    /// Conservative OBB mode instead of supersampling.
    pub conservative_obb: bool,
    /// Supersample grid edge.
    pub samples_per_axis: u32,
    /// Floor/ceil and membership tolerance.
    pub epsilon: f64,
}

impl Default for RevoxSettings {
    fn default() -> Self {
        RevoxSettings {
            conservative_obb: true,
            samples_per_axis: 3,
            epsilon: 1e-9,
        }
    }
}

impl RevoxSettings {
    /// Instantiate revoxelizer options for a concrete rotation.
    pub fn options(
        &self,
        axis: crate::axis::Axis,
        degrees: f64,
        pivot: glam::DVec3,
    ) -> RevoxOptions {
        RevoxOptions {
            axis,
            degrees,
            pivot,
            conservative_obb: self.conservative_obb,
            samples_per_axis: self.samples_per_axis,
            epsilon: self.epsilon,
        }
    }
}

/// Process-wide project settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    pub units: Units,
    /// Lattice resolution per logical unit; must be positive.
    pub voxels_per_unit: u32,
    pub revox: RevoxSettings,
    pub quality: Quality,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        ProjectSettings {
            units: Units::default(),
            voxels_per_unit: 1,
            revox: RevoxSettings::default(),
            quality: Quality::default(),
        }
    }
}

impl ProjectSettings {
    pub fn validate(&self) -> Result<()> {
        if self.voxels_per_unit == 0 {
            return Err(Error::InvalidArgument(
                "voxels_per_unit must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Options for one mesh export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    pub engine: MeshEngine,
    /// Reserved for Surface Nets.
    pub iso_level: f64,
    /// Reserved for Surface Nets.
    pub smoothing_passes: u32,
    /// Quantize-and-weld grid in logical units; zero disables the pass.
    pub quantize_step_units: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            engine: MeshEngine::default(),
            iso_level: 0.5,
            smoothing_passes: 0,
            quantize_step_units: 0.0,
        }
    }
}

/// Options for one SBVX save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOptions {
    pub encoding: Encoding,
    pub compression: Compression,
    /// Integer level mapped to Fastest / Balanced / Smallest.
    pub compression_level: i32,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            encoding: Encoding::Auto,
            compression: Compression::None,
            compression_level: 5,
        }
    }
}

impl SaveOptions {
    #[inline]
    pub fn level(&self) -> CompressionLevel {
        CompressionLevel::from_int(self.compression_level)
    }
}
