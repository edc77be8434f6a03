//! crates/rz_remap/tests/intersect_tests.rs
//!
//! 实体求交验证
//!
//! - 自身求交给出自身体积与质心
//! - 不相交实体没有权重
//! - 目标体积守恒（单元、对偶单元、多材料）
//! - 非凸目标单元、轴对称坐标系
//! - 几何有效性检查与并行一致性

mod common;

use common::{split_problem, INTERFACE_X};
use glam::DVec2;
use rz_foundation::{EntityFilter, EntityKind, RzError};
use rz_geo::{polygon_moments, CoordinateSystem, Moments};
use rz_mesh::prelude::*;
use rz_remap::intersect::total_moments;
use rz_remap::prelude::*;
use std::f64::consts::PI;

const TOL: f64 = 1e-12;

fn validated() -> RemapConfig {
    RemapConfig::default().with_intersect(IntersectConfig::default().with_validation(true))
}

fn all_cells(mesh: &SimpleMesh) -> Vec<usize> {
    (0..mesh.num_cells()).collect()
}

// ============================================================
// 单元求交
// ============================================================

#[test]
fn test_self_intersection_weights() {
    let mesh = SimpleMesh::unit_square(4).unwrap();
    let r2d = IntersectR2D::new(&mesh, &mesh, &validated()).unwrap();

    for t in 0..mesh.num_cells() {
        let mut candidates = vec![t];
        candidates.extend(mesh.cell_node_adjacent_cells(t, EntityFilter::All));
        let weights = r2d.intersect_cell(t, &candidates).unwrap();

        let own = weights.iter().find(|w| w.entity == t).unwrap();
        assert!((own.volume() - 0.0625).abs() < TOL);
        let c = own.centroid().unwrap();
        assert!((c - mesh.cell_centroid(t)).length() < TOL, "自身交集质心错误");

        // 只共享边或顶点的邻居体积为零（或数值噪声）
        for w in weights.iter().filter(|w| w.entity != t) {
            assert!(w.volume() < TOL);
        }
        let total = total_moments(&weights);
        assert!(total.approx_eq(&polygon_moments(&mesh.cell_polygon(t)), TOL));
    }
}

#[test]
fn test_disjoint_meshes_no_weights() {
    let source = SimpleMesh::unit_square(2).unwrap();
    let target = SimpleMesh::new(5.0, 5.0, 6.0, 6.0, 2, 2).unwrap();
    let r2d = IntersectR2D::new(&source, &target, &validated()).unwrap();
    for t in 0..target.num_cells() {
        assert!(r2d.intersect_cell(t, &all_cells(&source)).unwrap().is_empty());
    }
}

#[test]
fn test_shifted_mesh_conservation() {
    let source = SimpleMesh::unit_square(4).unwrap();
    let target = SimpleMesh::new(0.1, 0.05, 1.1, 1.05, 3, 3).unwrap();
    let r2d = IntersectR2D::new(&source, &target, &validated()).unwrap();

    let candidates = all_cells(&source);
    let mut total = Moments::ZERO;
    for t in 0..target.num_cells() {
        let weights = r2d.intersect_cell(t, &candidates).unwrap();
        assert!(weights.iter().all(|w| w.volume() > 0.0));
        let sum = total_moments(&weights);
        // 目标单元落在源域内的部分
        let inside = rz_geo::intersect_polygons(
            &target.cell_polygon(t),
            &[DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y],
            true,
            CoordinateSystem::Cartesian,
        );
        assert!(sum.approx_eq(&inside, TOL), "目标单元 {t} 矩不守恒");
        total += sum;
    }
    // 重叠区域 [0.1,1] × [0.05,1]
    assert!((total.area - 0.9 * 0.95).abs() < TOL);
    let c = total.centroid().unwrap();
    assert!((c - DVec2::new(0.55, 0.525)).length() < TOL);
}

#[test]
fn test_non_convex_target_cell() {
    let source = SimpleMesh::unit_square(4).unwrap();
    let mut target = SimpleMesh::unit_square(1).unwrap();
    target
        .move_node(target.node_at(1, 1), DVec2::new(0.15, 0.15))
        .unwrap();

    // 有效性检查开启时，严重非凸的目标单元被拒绝
    let r2d = IntersectR2D::new(&source, &target, &validated()).unwrap();
    let err = r2d.intersect_cell(0, &all_cells(&source)).unwrap_err();
    assert!(err.is_geometry_validity());

    let config = RemapConfig::default().with_intersect(IntersectConfig::default().with_validation(false));
    let r2d = IntersectR2D::new(&source, &target, &config).unwrap();
    let weights = r2d.intersect_cell(0, &all_cells(&source)).unwrap();
    let expected = polygon_moments(&target.cell_polygon(0));
    assert!((expected.area - 0.15).abs() < TOL);
    assert!(total_moments(&weights).approx_eq(&expected, TOL));
}

#[test]
fn test_missing_decomposition_with_validation() {
    let source = SimpleMesh::unit_square(2).unwrap().without_decompositions();
    let target = SimpleMesh::unit_square(2).unwrap();
    let r2d = IntersectR2D::new(&source, &target, &validated()).unwrap();
    let err = r2d.intersect_cell(0, &[0]).unwrap_err();
    assert!(matches!(err, RzError::Config { .. }));

    let config = RemapConfig::default().with_intersect(IntersectConfig::default().with_validation(false));
    let r2d = IntersectR2D::new(&source, &target, &config).unwrap();
    assert_eq!(r2d.intersect_cell(0, &[0]).unwrap().len(), 1);
}

// ============================================================
// 对偶单元求交
// ============================================================

#[test]
fn test_dual_cell_conservation() {
    let source = SimpleMesh::unit_square(3).unwrap();
    let target = SimpleMesh::new(0.0, 0.0, 1.0, 1.0, 2, 2).unwrap();
    let r2d = IntersectR2D::new(&source, &target, &validated()).unwrap();

    let candidates: Vec<usize> = (0..source.num_nodes()).collect();
    let mut total = 0.0;
    for t in 0..target.num_nodes() {
        let weights = r2d.intersect_node(t, &candidates).unwrap();
        let sum = total_moments(&weights);
        assert!((sum.area - target.dual_cell_volume(t)).abs() < TOL, "对偶单元 {t} 体积不守恒");
        total += sum.area;
    }
    assert!((total - 1.0).abs() < TOL);
}

#[test]
fn test_dual_cell_self_intersection() {
    let mesh = SimpleMesh::unit_square(3).unwrap();
    let r2d = IntersectR2D::new(&mesh, &mesh, &validated()).unwrap();
    let n = mesh.node_at(1, 2);
    let weights = r2d.intersect(EntityKind::Node, n, &[n]).unwrap();
    assert_eq!(weights.len(), 1);
    let expected = polygon_moments(&mesh.dual_cell_polygon(n));
    assert!(weights[0].moments.approx_eq(&expected, TOL));
}

// ============================================================
// 多材料求交
// ============================================================

#[test]
fn test_material_moments_sum_to_whole() {
    let source = SimpleMesh::unit_square(4).unwrap();
    let (state, set) = split_problem(&source);
    let target = SimpleMesh::new(0.0, 0.0, 1.0, 1.0, 3, 3).unwrap();

    let mut r2d = IntersectR2D::new(&source, &target, &validated())
        .unwrap()
        .with_state(&state);
    r2d.set_interface_reconstructor(&set);

    let candidates = all_cells(&source);
    let mut material_volume = [0.0; 2];
    for t in 0..target.num_cells() {
        r2d.set_material(None).unwrap();
        let whole = total_moments(&r2d.intersect_cell(t, &candidates).unwrap());

        let mut parts = Moments::ZERO;
        for (m, volume) in material_volume.iter_mut().enumerate() {
            r2d.set_material(Some(m)).unwrap();
            let weights = r2d.intersect_cell(t, &candidates).unwrap();
            for w in &weights {
                assert!(state.cell_index_in_material(w.entity, m).is_some());
            }
            let sum = total_moments(&weights);
            *volume += sum.area;
            parts += sum;
        }
        assert!(parts.approx_eq(&whole, TOL), "目标单元 {t} 材料矩之和不等于整体矩");
    }
    assert!((material_volume[0] - INTERFACE_X).abs() < TOL);
    assert!((material_volume[1] - (1.0 - INTERFACE_X)).abs() < TOL);
}

#[test]
fn test_material_requires_interface() {
    let source = SimpleMesh::unit_square(4).unwrap();
    let (state, _set) = split_problem(&source);
    let mut r2d = IntersectR2D::new(&source, &source, &validated())
        .unwrap()
        .with_state(&state);
    r2d.set_material(Some(1)).unwrap();

    // 纯单元不需要界面重构
    let pure = source.cell_at(3, 0);
    assert_eq!(r2d.intersect_cell(pure, &[pure]).unwrap().len(), 1);

    let mixed = source.cell_at(2, 0);
    let err = r2d.intersect_cell(mixed, &[mixed]).unwrap_err();
    assert!(matches!(err, RzError::Precondition { .. }));
    assert!(matches!(
        r2d.set_material(Some(2)),
        Err(RzError::InvalidMaterial { .. })
    ));
}

#[test]
fn test_negative_material_polygon_follows_validation() {
    let mesh = SimpleMesh::unit_square(1).unwrap();
    let mut state = SimpleState::new(1, 4, 2);
    state.set_material_cells(0, vec![0]).unwrap();
    state.set_material_cells(1, vec![0]).unwrap();

    // 材料 0 子多边形为顺时针（存储体积为负）
    let mut left = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(0.5, 0.0),
        DVec2::new(0.5, 1.0),
        DVec2::new(0.0, 1.0),
    ];
    left.reverse();
    let right = vec![
        DVec2::new(0.5, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(0.5, 1.0),
    ];
    let mut cmp = CellMatPoly::new(0);
    cmp.push(MaterialPolygon::new(0, left));
    cmp.push(MaterialPolygon::new(1, right));
    let mut set = MatPolySet::new();
    set.insert(cmp);

    let mut r2d = IntersectR2D::new(&mesh, &mesh, &validated())
        .unwrap()
        .with_state(&state);
    r2d.set_interface_reconstructor(&set);
    r2d.set_material(Some(0)).unwrap();
    let err = r2d.intersect_cell(0, &[0]).unwrap_err();
    assert!(matches!(err, RzError::NegativeMaterialVolume { material: 0, cell: 0, .. }));

    let config =
        RemapConfig::default().with_intersect(IntersectConfig::default().with_validation(false));
    let mut r2d = IntersectR2D::new(&mesh, &mesh, &config)
        .unwrap()
        .with_state(&state);
    r2d.set_interface_reconstructor(&set);
    r2d.set_material(Some(0)).unwrap();
    assert!(r2d.intersect_cell(0, &[0]).is_ok());
    r2d.set_material(Some(1)).unwrap();
    let weights = r2d.intersect_cell(0, &[0]).unwrap();
    assert!((weights[0].volume() - 0.5).abs() < TOL);
}

// ============================================================
// 坐标系与并行
// ============================================================

#[test]
fn test_axisymmetric_volumes() {
    let mesh = SimpleMesh::unit_square(2)
        .unwrap()
        .with_coordinate_system(CoordinateSystem::CylindricalAxisymmetric);
    let r2d = IntersectR2D::new(&mesh, &mesh, &validated()).unwrap();
    assert_eq!(r2d.coordinate_system(), CoordinateSystem::CylindricalAxisymmetric);

    // [0.5,1] × [0,0.5]: V = 2π ∫ r dA = 0.375π
    let c = mesh.cell_at(1, 0);
    let weights = r2d.intersect_cell(c, &[c]).unwrap();
    assert!((weights[0].volume() - 0.375 * PI).abs() < TOL);

    // 整体体积 = π r² h
    let total: f64 = (0..mesh.num_cells())
        .map(|t| total_moments(&r2d.intersect_cell(t, &all_cells(&mesh)).unwrap()).area)
        .sum();
    assert!((total - PI).abs() < TOL);
}

#[test]
fn test_parallel_matches_serial() {
    let source = SimpleMesh::unit_square(10).unwrap();
    let target = SimpleMesh::new(0.03, -0.02, 1.03, 0.98, 7, 7).unwrap();
    let targets: Vec<usize> = (0..target.num_cells()).collect();
    let candidates: Vec<Vec<usize>> = targets.iter().map(|_| all_cells(&source)).collect();

    let mut serial = validated();
    serial.intersect.parallel = false;
    let mut parallel = validated();
    parallel.intersect.parallel_threshold = 1;

    let a = IntersectR2D::new(&source, &target, &serial)
        .unwrap()
        .intersect_all(EntityKind::Cell, &targets, &candidates)
        .unwrap();
    let b = IntersectR2D::new(&source, &target, &parallel)
        .unwrap()
        .intersect_all(EntityKind::Cell, &targets, &candidates)
        .unwrap();
    assert_eq!(a, b);
}
