//! Binary STL emission.
//!
//! Layout: an 80-byte header (leading bytes carry an ASCII name, zero
//! padded), a u32 triangle count, then per triangle the unit normal, three
//! vertex positions (all f32) and a zero attribute word. Little-endian.

use crate::error::Result;
use crate::mesh::MeshD;
use glam::DVec3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize a mesh as binary STL into `writer`. Normals are recomputed
/// from triangle edges; zero-area triangles emit a zero normal.
pub fn encode_stl<W: Write>(writer: &mut W, mesh: &MeshD, name: &str) -> Result<()> {
    let mut header = [0u8; 80];
    for (slot, byte) in header.iter_mut().zip(name.bytes()) {
        *slot = if byte.is_ascii() { byte } else { b'_' };
    }
    writer.write_all(&header)?;
    writer.write_all(&(mesh.triangle_count() as u32).to_le_bytes())?;

    for tri in &mesh.triangles {
        let normal = mesh.triangle_normal(*tri);
        write_vec(writer, normal)?;
        for &idx in tri {
            write_vec(writer, mesh.vertices[idx as usize])?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

#[inline]
fn write_vec<W: Write>(writer: &mut W, v: DVec3) -> Result<()> {
    writer.write_all(&(v.x as f32).to_le_bytes())?;
    writer.write_all(&(v.y as f32).to_le_bytes())?;
    writer.write_all(&(v.z as f32).to_le_bytes())?;
    Ok(())
}

/// Write a mesh to an STL file. The handle closes on every exit path.
pub fn write_stl<P: AsRef<Path>>(path: P, mesh: &MeshD, name: &str) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode_stl(&mut writer, mesh, name)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VoxelSolid;
    use crate::mesh::extract_mesh;
    use glam::IVec3;

    fn cube_mesh() -> MeshD {
        let mut s = VoxelSolid::new();
        s.fill_box(IVec3::ZERO, IVec3::new(2, 2, 2));
        extract_mesh(&s).unwrap()
    }

    #[test]
    fn test_stl_byte_layout() {
        let mesh = cube_mesh();
        let mut bytes = Vec::new();
        encode_stl(&mut bytes, &mesh, "cube").unwrap();

        assert_eq!(&bytes[0..4], b"cube");
        assert_eq!(bytes[4], 0);
        let count = u32::from_le_bytes(bytes[80..84].try_into().unwrap());
        assert_eq!(count as usize, mesh.triangle_count());
        // 50 bytes per triangle: 12 normal + 36 vertices + 2 attribute.
        assert_eq!(bytes.len(), 84 + mesh.triangle_count() * 50);
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mesh = cube_mesh();
        let mut bytes = Vec::new();
        encode_stl(&mut bytes, &mesh, "n").unwrap();
        for t in 0..mesh.triangle_count() {
            let at = 84 + t * 50;
            let nx = f32::from_le_bytes(bytes[at..at + 4].try_into().unwrap());
            let ny = f32::from_le_bytes(bytes[at + 4..at + 8].try_into().unwrap());
            let nz = f32::from_le_bytes(bytes[at + 8..at + 12].try_into().unwrap());
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            assert!((len - 1.0).abs() < 1e-5, "normal not unit length");
        }
    }

    #[test]
    fn test_attribute_words_are_zero() {
        let mesh = cube_mesh();
        let mut bytes = Vec::new();
        encode_stl(&mut bytes, &mesh, "attr").unwrap();
        for t in 0..mesh.triangle_count() {
            let at = 84 + t * 50 + 48;
            assert_eq!(&bytes[at..at + 2], &[0, 0]);
        }
    }

    #[test]
    fn test_long_name_truncates_into_header() {
        let mesh = cube_mesh();
        let name = "x".repeat(200);
        let mut bytes = Vec::new();
        encode_stl(&mut bytes, &mesh, &name).unwrap();
        assert!(bytes[0..80].iter().all(|&b| b == b'x'));
    }
}
