//! SBVX decoding with full format validation.

use super::{ENCODING_DENSE, ENCODING_SPARSE, HEADER_SIZE, MAGIC, VERSION};
use crate::core::VoxelSolid;
use crate::error::{Error, Result};
use glam::IVec3;

struct Header {
    encoding: u8,
    origin: IVec3,
    size: IVec3,
    payload_len: u64,
}

/// Decode an SBVX byte stream into a solid.
pub fn decode(data: &[u8]) -> Result<VoxelSolid> {
    let header = read_header(data)?;
    let payload = &data[HEADER_SIZE..];
    if payload.len() as u64 != header.payload_len {
        return Err(Error::InvalidFormat(format!(
            "payload length mismatch: header declares {}, stream carries {}",
            header.payload_len,
            payload.len()
        )));
    }
    match header.encoding {
        ENCODING_DENSE => decode_dense(&header, payload),
        ENCODING_SPARSE => decode_sparse(&header, payload),
        other => Err(Error::InvalidFormat(format!(
            "unsupported encoding byte {other}"
        ))),
    }
}

fn read_header(data: &[u8]) -> Result<Header> {
    if data.len() < HEADER_SIZE {
        return Err(Error::InvalidFormat(format!(
            "truncated header: {} of {HEADER_SIZE} bytes",
            data.len()
        )));
    }
    if data[0..5] != MAGIC {
        return Err(Error::InvalidFormat("magic mismatch".into()));
    }
    if data[5] != VERSION {
        return Err(Error::InvalidFormat(format!(
            "unsupported version {}",
            data[5]
        )));
    }
    let origin = IVec3::new(
        read_i32(data, 7),
        read_i32(data, 11),
        read_i32(data, 15),
    );
    let size_x = read_u32(data, 19);
    let size_y = read_u32(data, 23);
    let size_z = read_u32(data, 27);
    if size_x > i32::MAX as u32 || size_y > i32::MAX as u32 || size_z > i32::MAX as u32 {
        return Err(Error::InvalidFormat("box size exceeds i32 range".into()));
    }
    let payload_len = u64::from_le_bytes(data[31..39].try_into().expect("eight header bytes"));
    Ok(Header {
        encoding: data[6],
        origin,
        size: IVec3::new(size_x as i32, size_y as i32, size_z as i32),
        payload_len,
    })
}

#[inline]
fn read_i32(data: &[u8], at: usize) -> i32 {
    i32::from_le_bytes(data[at..at + 4].try_into().expect("four header bytes"))
}

#[inline]
fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(data[at..at + 4].try_into().expect("four header bytes"))
}

fn decode_dense(header: &Header, payload: &[u8]) -> Result<VoxelSolid> {
    let size = header.size;
    let total = (size.x as u64)
        .checked_mul(size.y as u64)
        .and_then(|v| v.checked_mul(size.z as u64))
        .ok_or_else(|| Error::InvalidFormat("dense bit count overflows u64".into()))?;
    let expected_bytes = total.div_ceil(8);
    if payload.len() as u64 != expected_bytes {
        return Err(Error::InvalidFormat(format!(
            "dense payload size mismatch: expected {expected_bytes} bytes for {total} bits, got {}",
            payload.len()
        )));
    }

    let mut solid = VoxelSolid::new();
    let mut index: u64 = 0;
    for z in 0..size.z {
        for y in 0..size.y {
            for x in 0..size.x {
                let byte = payload[(index / 8) as usize];
                if byte & (1 << (index % 8)) != 0 {
                    solid.add(header.origin + IVec3::new(x, y, z));
                }
                index += 1;
            }
        }
    }
    Ok(solid)
}

fn decode_sparse(header: &Header, payload: &[u8]) -> Result<VoxelSolid> {
    if payload.len() < 4 {
        return Err(Error::InvalidFormat("sparse payload missing count".into()));
    }
    let count = u32::from_le_bytes(payload[0..4].try_into().expect("four count bytes")) as u64;
    let expected = 4 + count.checked_mul(12).ok_or_else(|| {
        Error::InvalidFormat("sparse cell count overflows payload size".into())
    })?;
    if payload.len() as u64 != expected {
        return Err(Error::InvalidFormat(format!(
            "sparse payload size mismatch: expected {expected} bytes for {count} cells, got {}",
            payload.len()
        )));
    }

    let lo = header.origin;
    let hi = header.origin + header.size;
    let mut solid = VoxelSolid::new();
    let mut at = 4usize;
    for _ in 0..count {
        let cell = IVec3::new(
            read_i32(payload, at),
            read_i32(payload, at + 4),
            read_i32(payload, at + 8),
        );
        at += 12;
        if cell.x < lo.x
            || cell.y < lo.y
            || cell.z < lo.z
            || cell.x >= hi.x
            || cell.y >= hi.y
            || cell.z >= hi.z
        {
            return Err(Error::InvalidFormat(format!(
                "sparse voxel {cell:?} outside declared box [{lo:?}, {hi:?})"
            )));
        }
        solid.add(cell);
    }
    Ok(solid)
}
