//! Builder scenarios: transform stacks, nested scopes and arbitrary-angle
//! rotation scopes driving the revoxelizer.

use glam::{DVec3, IVec3};
use voxfab::{Axis, Builder, RevoxOptions, VoxelSolid};

fn volume_of<F: FnOnce(&mut Builder)>(scope: F) -> usize {
    let mut b = Builder::new();
    scope(&mut b);
    b.build().volume()
}

#[test]
fn perforated_plate() {
    // A plate with a 3x3 grid of square cutouts.
    let mut b = Builder::new();
    b.solid_box(IVec3::ZERO, IVec3::new(20, 20, 2));
    b.grid(3, 3, 6, 6, |c| {
        c.cut_box(IVec3::new(2, 2, 0), IVec3::new(4, 4, 2));
    });
    let plate = b.build();
    assert_eq!(plate.volume(), 20 * 20 * 2 - 9 * 2 * 2 * 2);
    assert!(plate.is_watertight());
    assert!(plate.is_six_connected());
}

#[test]
fn bracket_from_nested_scopes() {
    // Base slab plus an upright wall, minus a bolt hole through the wall.
    let mut b = Builder::new();
    b.solid_box(IVec3::ZERO, IVec3::new(12, 8, 2));
    b.place(IVec3::new(0, 0, 2), |c| {
        c.solid_box(IVec3::ZERO, IVec3::new(2, 8, 8));
    });
    b.cut_cylinder_x(4, 6, 0, 2, 1);
    let bracket = b.build();
    assert!(bracket.is_watertight());
    assert!(bracket.is_six_connected());
    assert!(bracket.volume() < 12 * 8 * 2 + 2 * 8 * 8);
}

#[test]
fn mirrored_pair() {
    let mut b = Builder::new();
    b.solid_box(IVec3::new(2, 0, 0), IVec3::new(5, 2, 2));
    b.mirror(Axis::X).solid_box(IVec3::new(2, 0, 0), IVec3::new(5, 2, 2));
    let pair = b.build();
    assert_eq!(pair.volume(), 2 * 3 * 2 * 2);
    assert!(pair.contains(IVec3::new(2, 0, 0)));
    assert!(pair.contains(IVec3::new(-3, 0, 0)));
}

#[test]
fn transform_stack_order_matters() {
    let rotated_then_moved = volume_of(|b| {
        b.rotate90(Axis::Z, 1)
            .translate(IVec3::new(10, 0, 0))
            .solid_box(IVec3::ZERO, IVec3::new(4, 2, 1));
    });
    let moved_then_rotated = volume_of(|b| {
        b.translate(IVec3::new(10, 0, 0))
            .rotate90(Axis::Z, 1)
            .solid_box(IVec3::ZERO, IVec3::new(4, 2, 1));
    });
    // Same shape either way, different placement.
    assert_eq!(rotated_then_moved, 8);
    assert_eq!(moved_then_rotated, 8);
}

#[test]
fn subtract_scope_with_rotation() {
    // Cutting a rotated slot out of a block through a nested scope.
    let mut b = Builder::new();
    b.solid_box(IVec3::ZERO, IVec3::new(30, 30, 3));
    b.subtract(|c| {
        c.rotate_any_around(
            Axis::Z,
            30.0,
            DVec3::new(15.0, 15.0, 0.0),
            |slot| {
                slot.solid_box(IVec3::new(10, 13, -1), IVec3::new(20, 17, 4));
            },
        )
        .unwrap();
    });
    let block = b.build();
    assert!(block.volume() < 30 * 30 * 3);
    assert!(block.volume() > 0);
    assert!(block.is_watertight());
}

#[test]
fn rotate_any_with_explicit_options() {
    let options = RevoxOptions {
        conservative_obb: false,
        samples_per_axis: 4,
        epsilon: 1e-8,
        ..RevoxOptions::new(Axis::Z, 45.0, DVec3::new(5.0, 5.0, 0.0))
    };
    let mut b = Builder::new();
    b.rotate_any_with(&options, |c| {
        c.solid_box(IVec3::new(2, 4, 0), IVec3::new(9, 7, 2));
    })
    .unwrap();
    let solid = b.build();
    assert!(!solid.is_empty());
    assert!(solid.is_watertight());
}

#[test]
fn union_scope_equals_inline_construction() {
    let mut nested = Builder::new();
    nested.union(|c| {
        c.solid_box(IVec3::ZERO, IVec3::new(3, 3, 1));
        c.solid_box(IVec3::new(2, 2, 0), IVec3::new(5, 5, 1));
    });

    let mut flat = VoxelSolid::new();
    flat.fill_box(IVec3::ZERO, IVec3::new(3, 3, 1));
    flat.fill_box(IVec3::new(2, 2, 0), IVec3::new(5, 5, 1));

    assert!(nested.build().same_cells(&flat));
}

#[test]
fn array_spacing_leaves_gaps() {
    let mut b = Builder::new();
    b.array_y(4, 3, |c| {
        c.solid_box(IVec3::ZERO, IVec3::new(1, 2, 1));
    });
    let rail = b.build();
    assert_eq!(rail.volume(), 4 * 2);
    assert!(!rail.is_six_connected());
}
