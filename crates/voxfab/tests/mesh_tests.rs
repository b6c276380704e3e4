//! Mesher pipeline tests: greedy merge bounds, outward orientation,
//! quantize-weld and the STL byte stream.

use glam::IVec3;
use voxfab::io::encode_stl;
use voxfab::mesh::{build_mesh, extract_mesh, is_closed_manifold};
use voxfab::{ops, Error, ExportOptions, MeshEngine, VoxelSolid};

fn solid_box(min: IVec3, max_excl: IVec3) -> VoxelSolid {
    let mut s = VoxelSolid::new();
    s.fill_box(min, max_excl);
    s
}

#[test]
fn greedy_merge_beats_per_face_triangulation() {
    // A 30x300x4 slab: six merged rectangles, far below one triangle pair
    // per boundary face.
    let solid = solid_box(IVec3::ZERO, IVec3::new(30, 300, 4));
    let surface = solid.surface_area();
    let mesh = extract_mesh(&solid).unwrap();
    assert!(mesh.triangle_count() <= surface);
    assert!(
        2 * mesh.triangle_count() <= 2 * surface,
        "must be at least 2x below the naive 2 * |B| triangles"
    );
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn union_of_boxes_stays_under_face_count() {
    let mut solid = solid_box(IVec3::ZERO, IVec3::new(8, 8, 2));
    for c in solid_box(IVec3::new(5, 5, 0), IVec3::new(14, 9, 3)).cells() {
        solid.add(c);
    }
    for c in solid_box(IVec3::new(0, 6, 1), IVec3::new(3, 12, 2)).cells() {
        solid.add(c);
    }
    let mesh = extract_mesh(&solid).unwrap();
    assert!(mesh.triangle_count() <= solid.surface_area());
    assert!((mesh.signed_volume() - solid.volume() as f64).abs() < 1e-9);
}

#[test]
fn signed_volume_matches_cell_count() {
    let solid = ops::subtract(
        &solid_box(IVec3::ZERO, IVec3::new(10, 10, 10)),
        &solid_box(IVec3::new(2, 2, 2), IVec3::new(8, 8, 8)),
    );
    let mesh = extract_mesh(&solid).unwrap();
    assert!((mesh.signed_volume() - 784.0).abs() < 1e-9);
}

#[test]
fn outward_normals_after_inversion() {
    let solid = solid_box(IVec3::ZERO, IVec3::new(3, 3, 3));
    let mut mesh = extract_mesh(&solid).unwrap();
    assert!(mesh.signed_volume() > 0.0);
    assert!(is_closed_manifold(&mesh));

    mesh.flip();
    assert!(mesh.signed_volume() < 0.0);
    assert!(is_closed_manifold(&mesh), "inversion keeps the mesh closed");

    mesh.ensure_outward_normals();
    assert!(mesh.signed_volume() > 0.0);
    assert!(is_closed_manifold(&mesh));
}

#[test]
fn build_mesh_runs_full_pipeline() {
    let solid = solid_box(IVec3::ZERO, IVec3::new(4, 4, 4));
    let options = ExportOptions::default();
    let mesh = build_mesh(&solid, &options, 1).unwrap();
    assert!(mesh.signed_volume() > 0.0);
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn build_mesh_quantize_welds() {
    let solid = solid_box(IVec3::ZERO, IVec3::new(4, 4, 4));
    let options = ExportOptions {
        quantize_step_units: 1.0,
        ..ExportOptions::default()
    };
    let mesh = build_mesh(&solid, &options, 1).unwrap();
    // Lattice vertices already sit on the grid; welding changes nothing.
    assert_eq!(mesh.vertex_count(), 8);
    assert!(is_closed_manifold(&mesh));

    // A coarse grid collapses the whole box; degenerate triangles are
    // dropped rather than surviving as zero-area geometry.
    let coarse = ExportOptions {
        quantize_step_units: 10.0,
        ..ExportOptions::default()
    };
    let collapsed = build_mesh(&solid, &coarse, 1).unwrap();
    for tri in &collapsed.triangles {
        assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
    }
}

#[test]
fn surface_nets_engine_is_not_implemented() {
    let solid = solid_box(IVec3::ZERO, IVec3::ONE);
    let options = ExportOptions {
        engine: MeshEngine::SurfaceNets,
        ..ExportOptions::default()
    };
    assert!(matches!(
        build_mesh(&solid, &options, 1),
        Err(Error::NotImplemented(_))
    ));
}

#[test]
fn stl_stream_matches_mesh() {
    let solid = solid_box(IVec3::ZERO, IVec3::new(2, 3, 4));
    let mesh = build_mesh(&solid, &ExportOptions::default(), 1).unwrap();
    let mut bytes = Vec::new();
    encode_stl(&mut bytes, &mesh, "panel").unwrap();

    assert_eq!(&bytes[0..5], b"panel");
    let count = u32::from_le_bytes(bytes[80..84].try_into().unwrap()) as usize;
    assert_eq!(count, mesh.triangle_count());
    assert_eq!(bytes.len(), 84 + count * 50);

    // First triangle's stored vertices match the mesh data.
    let tri = mesh.triangles[0];
    for (v, base) in (0..3).map(|i| (mesh.vertices[tri[i] as usize], 84 + 12 + i * 12)) {
        let x = f32::from_le_bytes(bytes[base..base + 4].try_into().unwrap());
        let y = f32::from_le_bytes(bytes[base + 4..base + 8].try_into().unwrap());
        let z = f32::from_le_bytes(bytes[base + 8..base + 12].try_into().unwrap());
        assert_eq!((x, y, z), (v.x as f32, v.y as f32, v.z as f32));
    }
}

#[test]
fn stl_export_writes_file() {
    let solid = solid_box(IVec3::ZERO, IVec3::new(3, 2, 1));
    let mesh = build_mesh(&solid, &ExportOptions::default(), 1).unwrap();
    let path = std::env::temp_dir().join(format!("voxfab-{}-out.stl", std::process::id()));
    voxfab::io::write_stl(&path, &mesh, "out").unwrap();
    let written = std::fs::metadata(&path).unwrap().len();
    assert_eq!(written, 84 + mesh.triangle_count() as u64 * 50);
    std::fs::remove_file(&path).ok();
}
