//! SBVX encoding: header assembly plus the dense and sparse payloads.

use super::{morton_key, Encoding, ENCODING_DENSE, ENCODING_SPARSE, HEADER_SIZE, MAGIC, VERSION};
use crate::core::{Cell, VoxelSolid};
use crate::error::{Error, Result};
use glam::IVec3;
use tracing::debug;

/// Resolve `Auto` against the occupancy heuristic: dense costs one bit per
/// box cell, sparse twelve bytes per occupied cell, so dense wins once the
/// box is at least a quarter occupied by the 4x margin rule.
pub fn select_encoding(solid: &VoxelSolid, requested: Encoding) -> Encoding {
    match requested {
        Encoding::Auto => {
            if solid.is_empty() {
                return Encoding::Sparse;
            }
            let (min, max_excl) = solid.bounds();
            let size = (max_excl - min).as_uvec3();
            let total = u64::from(size.x) * u64::from(size.y) * u64::from(size.z);
            if 4 * solid.volume() as u64 >= total {
                Encoding::Dense
            } else {
                Encoding::Sparse
            }
        }
        fixed => fixed,
    }
}

/// Encode a solid into an SBVX byte vector.
pub fn encode(solid: &VoxelSolid, encoding: Encoding) -> Result<Vec<u8>> {
    let resolved = select_encoding(solid, encoding);
    debug!(
        cells = solid.volume(),
        encoding = ?resolved,
        "encoding sbvx container"
    );
    let (min, max_excl) = if solid.is_empty() {
        (IVec3::ZERO, IVec3::ZERO)
    } else {
        solid.bounds()
    };
    let size = (max_excl - min).as_uvec3();

    let payload = match resolved {
        Encoding::Dense => encode_dense(solid, min, size.as_ivec3())?,
        Encoding::Sparse => encode_sparse(solid, min),
        Encoding::Auto => unreachable!("auto resolved above"),
    };

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.push(match resolved {
        Encoding::Dense => ENCODING_DENSE,
        _ => ENCODING_SPARSE,
    });
    for v in [min.x, min.y, min.z] {
        out.extend_from_slice(&v.to_le_bytes());
    }
    for v in [size.x, size.y, size.z] {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// One bit per box cell, x-fastest then y then z, LSB-first per byte.
fn encode_dense(solid: &VoxelSolid, min: Cell, size: IVec3) -> Result<Vec<u8>> {
    let total = (u64::from(size.x as u32))
        .checked_mul(u64::from(size.y as u32))
        .and_then(|v| v.checked_mul(u64::from(size.z as u32)))
        .ok_or_else(|| Error::InvalidArgument("dense bit index overflows u64".into()))?;
    let byte_len = usize::try_from(total.div_ceil(8))
        .map_err(|_| Error::InvalidArgument("dense payload exceeds addressable memory".into()))?;

    let mut bits = vec![0u8; byte_len];
    let sx = u64::from(size.x as u32);
    let sy = u64::from(size.y as u32);
    for c in solid.cells() {
        let rel = c - min;
        let index = u64::from(rel.x as u32) + sx * (u64::from(rel.y as u32) + sy * u64::from(rel.z as u32));
        bits[(index / 8) as usize] |= 1 << (index % 8);
    }
    Ok(bits)
}

/// u32 count then `(x, y, z)` i32 triples in Morton order of `(cell - min)`,
/// ties broken by `(z, y, x)`.
fn encode_sparse(solid: &VoxelSolid, min: Cell) -> Vec<u8> {
    let mut cells: Vec<Cell> = solid.cells().collect();
    cells.sort_by_key(|c| {
        let rel = *c - min;
        (
            morton_key(rel.x as u32, rel.y as u32, rel.z as u32),
            c.z,
            c.y,
            c.x,
        )
    });

    let mut out = Vec::with_capacity(4 + cells.len() * 12);
    out.extend_from_slice(&(cells.len() as u32).to_le_bytes());
    for c in cells {
        out.extend_from_slice(&c.x.to_le_bytes());
        out.extend_from_slice(&c.y.to_le_bytes());
        out.extend_from_slice(&c.z.to_le_bytes());
    }
    out
}
