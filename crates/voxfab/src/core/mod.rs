// Core lattice types: cells, faces, and the voxel solid itself.

pub mod cell;
pub mod face;
pub mod solid;

pub use cell::{Bounds, Cell, CellExt, NEIGHBOR_OFFSETS};
pub use face::{EdgeKey, FaceKey};
pub use solid::VoxelSolid;
