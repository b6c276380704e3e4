//! Optional outer compression for SBVX streams.
//!
//! The wrapper is chosen by the caller and is not self-describing; readers
//! pass the same selection they wrote with. Zstd is an optional linked
//! dependency: without the `zstd-compression` feature both directions fall
//! back to Deflate, silently from the caller's point of view.

use crate::error::{Error, Result};
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Outer compression applied around an encoded SBVX stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Compression {
    #[default]
    None,
    Deflate,
    Zstd,
}

/// Coarse level buckets shared by all codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompressionLevel {
    Fastest,
    #[default]
    Balanced,
    Smallest,
}

impl CompressionLevel {
    /// Map a caller-facing integer level: `<= 1` fastest, `>= 9` smallest,
    /// anything between balanced.
    pub fn from_int(level: i32) -> Self {
        if level <= 1 {
            CompressionLevel::Fastest
        } else if level >= 9 {
            CompressionLevel::Smallest
        } else {
            CompressionLevel::Balanced
        }
    }

    fn deflate(self) -> flate2::Compression {
        match self {
            CompressionLevel::Fastest => flate2::Compression::fast(),
            CompressionLevel::Balanced => flate2::Compression::default(),
            CompressionLevel::Smallest => flate2::Compression::best(),
        }
    }

    #[cfg(feature = "zstd-compression")]
    fn zstd(self) -> i32 {
        match self {
            CompressionLevel::Fastest => 1,
            CompressionLevel::Balanced => 3,
            CompressionLevel::Smallest => 19,
        }
    }
}

/// Compress `data` with the selected wrapper.
pub fn compress(data: &[u8], compression: Compression, level: CompressionLevel) -> Result<Vec<u8>> {
    match compression {
        Compression::None => Ok(data.to_vec()),
        Compression::Deflate => deflate(data, level),
        Compression::Zstd => zstd_compress(data, level),
    }
}

/// Undo the wrapper selected at write time.
pub fn decompress(data: &[u8], compression: Compression) -> Result<Vec<u8>> {
    match compression {
        Compression::None => Ok(data.to_vec()),
        Compression::Deflate => inflate(data),
        Compression::Zstd => zstd_decompress(data),
    }
}

fn deflate(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), level.deflate());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    DeflateDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| Error::InvalidFormat(format!("deflate stream corrupt: {e}")))?;
    Ok(out)
}

#[cfg(feature = "zstd-compression")]
fn zstd_compress(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    zstd::bulk::compress(data, level.zstd())
        .map_err(|e| Error::Io(std::io::Error::other(format!("zstd compression: {e}"))))
}

#[cfg(feature = "zstd-compression")]
fn zstd_decompress(data: &[u8]) -> Result<Vec<u8>> {
    zstd::stream::decode_all(data)
        .map_err(|e| Error::InvalidFormat(format!("zstd stream corrupt: {e}")))
}

#[cfg(not(feature = "zstd-compression"))]
fn zstd_compress(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    tracing::warn!("zstd support not linked, falling back to deflate");
    deflate(data, level)
}

#[cfg(not(feature = "zstd-compression"))]
fn zstd_decompress(data: &[u8]) -> Result<Vec<u8>> {
    tracing::warn!("zstd support not linked, falling back to deflate");
    inflate(data)
}
