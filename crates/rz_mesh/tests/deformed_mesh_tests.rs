//! crates/rz_mesh/tests/deformed_mesh_tests.rs
//!
//! 节点移动后参考网格的几何一致性
//!
//! - 单元与对偶单元仍铺满计算域
//! - side / wedge 分解体积之和等于控制体体积
//! - 直线界面切分的材料体积守恒

use glam::DVec2;
use rz_foundation::EntityKind;
use rz_geo::signed_area;
use rz_mesh::prelude::*;

const TOL: f64 = 1e-13;

fn deformed() -> SimpleMesh {
    let mut mesh = SimpleMesh::unit_square(3).unwrap();
    mesh.move_node(mesh.node_at(1, 1), DVec2::new(0.4, 0.3)).unwrap();
    mesh.move_node(mesh.node_at(2, 2), DVec2::new(0.62, 0.7)).unwrap();
    mesh
}

#[test]
fn test_control_volumes_tile_domain() {
    let mesh = deformed();
    let cells: f64 = (0..mesh.num_cells()).map(|c| mesh.cell_volume(c)).sum();
    let duals: f64 = (0..mesh.num_nodes()).map(|n| mesh.dual_cell_volume(n)).sum();
    assert!((cells - 1.0).abs() < TOL, "单元体积之和: {cells}");
    assert!((duals - 1.0).abs() < TOL, "对偶单元体积之和: {duals}");
}

#[test]
fn test_decompositions_match_volumes() {
    let mesh = deformed();
    for c in 0..mesh.num_cells() {
        let sides = mesh.cell_side_triangles(c).unwrap();
        let sum: f64 = sides.iter().map(|t| signed_area(t)).sum();
        assert!((sum - mesh.cell_volume(c)).abs() < TOL);
        assert!(sides.iter().all(|t| signed_area(t) > 0.0), "单元 {c} 存在非正 side");
    }
    for n in 0..mesh.num_nodes() {
        let wedges = mesh.node_wedge_triangles(n).unwrap();
        let sum: f64 = wedges.iter().map(|t| signed_area(t)).sum();
        assert!((sum - mesh.dual_cell_volume(n)).abs() < TOL, "节点 {n} wedge 体积之和不符");
    }
}

#[test]
fn test_boundary_flags_unchanged_by_motion() {
    let mesh = deformed();
    assert!(!mesh.on_exterior_boundary(EntityKind::Node, mesh.node_at(1, 1)));
    assert!(mesh.on_exterior_boundary(EntityKind::Node, mesh.node_at(0, 1)));
    assert!(mesh.on_exterior_boundary(EntityKind::Cell, mesh.cell_at(0, 0)));
}

#[test]
fn test_split_conserves_material_volume() {
    let mesh = deformed();
    let (set, occupancy) = MatPolySet::split_by_line(
        &mesh,
        DVec2::new(0.5, 0.0),
        DVec2::new(0.5, 1.0),
        0,
        1,
        1e-14,
    )
    .unwrap();

    let mut volume = [0.0; 2];
    for (m, cells) in occupancy.iter().enumerate() {
        for &c in cells {
            volume[m] += match set.cell_matpoly(c) {
                Some(cmp) => cmp.material_moments(m).area,
                None => mesh.cell_volume(c),
            };
        }
    }
    assert!((volume[0] - 0.5).abs() < TOL);
    assert!((volume[1] - 0.5).abs() < TOL);
}
