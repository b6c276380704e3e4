//! voxfab - integer-lattice voxel CSG kernel.
//!
//! Solids are sets of occupied unit cells with an incrementally maintained
//! boundary-face set, composed by boolean operations, resampled under rigid
//! and arbitrary rotations, persisted in the SBVX binary container and
//! exported as watertight triangle meshes in binary STL.

pub mod axis;
pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod mesh;
pub mod ops;
pub mod revox;
pub mod scene;

pub use crate::axis::Axis;
pub use crate::builder::Builder;
pub use crate::config::{
    ExportOptions, MeshEngine, ProjectSettings, Quality, RevoxSettings, SaveOptions, Units,
};
pub use crate::core::{Bounds, Cell, CellExt, EdgeKey, FaceKey, VoxelSolid};
pub use crate::error::{Error, Result};
pub use crate::io::{Compression, CompressionLevel, Encoding};
pub use crate::mesh::{build_mesh, extract_mesh, is_closed_manifold, MeshD, TriIdx};
pub use crate::ops::{BoolOp, Metric};
pub use crate::revox::{revoxelize, RevoxOptions};
pub use crate::scene::{
    connect::{bridge_axis, strut, weld},
    ArbitraryRotation, BakeOverrides, ExactFrame, Instance, Part, Role, Scene,
};

// Re-export glam for convenience
pub use glam;
