//! Persistence: the SBVX container, the compression wrapper, and STL export.

pub mod compress;
pub mod sbvx;
pub mod stl;

pub use compress::{compress, decompress, Compression, CompressionLevel};
pub use sbvx::{decode, encode, Encoding};
pub use stl::{encode_stl, write_stl};

use crate::config::SaveOptions;
use crate::core::VoxelSolid;
use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Encode a solid and write it to disk with the selected compression.
pub fn save_sbvx<P: AsRef<Path>>(
    path: P,
    solid: &VoxelSolid,
    options: &SaveOptions,
) -> Result<()> {
    let encoded = encode(solid, options.encoding)?;
    let packed = compress(&encoded, options.compression, options.level())?;
    debug!(
        raw = encoded.len(),
        stored = packed.len(),
        "writing sbvx file"
    );
    fs::write(path, packed)?;
    Ok(())
}

/// Read a solid back from disk; `options` must select the compression the
/// file was written with.
pub fn load_sbvx<P: AsRef<Path>>(path: P, options: &SaveOptions) -> Result<VoxelSolid> {
    let packed = fs::read(path)?;
    let encoded = decompress(&packed, options.compression)?;
    decode(&encoded)
}
