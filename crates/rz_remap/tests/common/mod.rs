//! crates/rz_remap/tests/common/mod.rs
//!
//! 集成测试共享设施

#![allow(dead_code)]

use glam::DVec2;
use rz_foundation::EntityKind;
use rz_mesh::prelude::*;

/// 界面直线位置 x = INTERFACE_X，左侧材料 0，右侧材料 1
pub const INTERFACE_X: f64 = 0.6;

pub fn assert_vec_close(actual: DVec2, expected: DVec2, tol: f64, what: &str) {
    assert!(
        (actual - expected).length() < tol,
        "{what}: 期望 {expected:?}, 实际 {actual:?}"
    );
}

/// 单元中心网格场 f(centroid)
pub fn cell_state<F: Fn(DVec2) -> f64>(mesh: &SimpleMesh, name: &str, f: F) -> SimpleState {
    let mut state = SimpleState::new(mesh.num_cells(), mesh.num_nodes(), 0);
    let centroids: Vec<DVec2> = (0..mesh.num_cells()).map(|c| mesh.cell_centroid(c)).collect();
    state
        .add_mesh_field_with(EntityKind::Cell, name, centroids, f)
        .unwrap();
    state
}

/// 节点网格场 f(x)
pub fn node_state<F: Fn(DVec2) -> f64>(mesh: &SimpleMesh, name: &str, f: F) -> SimpleState {
    let mut state = SimpleState::new(mesh.num_cells(), mesh.num_nodes(), 0);
    let coords: Vec<DVec2> = (0..mesh.num_nodes()).map(|n| mesh.node_coordinates(n)).collect();
    state
        .add_mesh_field_with(EntityKind::Node, name, coords, f)
        .unwrap();
    state
}

/// 单元中材料 m 的代表点（混合单元取子多边形质心）
pub fn material_centroid(mesh: &SimpleMesh, set: &MatPolySet, cell: usize, material: usize) -> DVec2 {
    set.cell_matpoly(cell)
        .and_then(|cmp| cmp.material_moments(material).centroid())
        .unwrap_or_else(|| mesh.cell_centroid(cell))
}

/// 两材料直线界面算例
///
/// 多材料场 "rho" 在材料 0 上为 1 + x + 2y，在材料 1 上为 3 − x + y，
/// 均在材料代表点处取值。
pub fn split_problem(mesh: &SimpleMesh) -> (SimpleState, MatPolySet) {
    let (set, occupancy) = MatPolySet::split_by_line(
        mesh,
        DVec2::new(INTERFACE_X, 0.0),
        DVec2::new(INTERFACE_X, 1.0),
        0,
        1,
        1e-14,
    )
    .unwrap();

    let fields: [fn(DVec2) -> f64; 2] = [
        |p| 1.0 + p.x + 2.0 * p.y,
        |p| 3.0 - p.x + p.y,
    ];

    let mut state = SimpleState::new(mesh.num_cells(), mesh.num_nodes(), 2);
    for (m, cells) in occupancy.into_iter().enumerate() {
        let values: Vec<f64> = cells
            .iter()
            .map(|&c| fields[m](material_centroid(mesh, &set, c, m)))
            .collect();
        state.set_material_cells(m, cells).unwrap();
        state.add_material_field(m, "rho", values).unwrap();
    }
    (state, set)
}
