//! crates/rz_geo/tests/intersection_tests.rs
//!
//! 多边形求交性质验证
//!
//! - 求交与参数顺序无关（面积与一阶矩）
//! - 分块求交之和等于整体求交
//! - 非凸裁剪边界的三角剖分路径与直接裁剪一致
//! - 轴对称坐标系下的体积

use glam::DVec2;
use rz_geo::prelude::*;
use std::f64::consts::PI;

// ============================================================
// 测试辅助设施
// ============================================================

const TOL: f64 = 1e-12;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<DVec2> {
    vec![
        DVec2::new(x0, y0),
        DVec2::new(x1, y0),
        DVec2::new(x1, y1),
        DVec2::new(x0, y1),
    ]
}

/// 正 n 边形（逆时针），可旋转
fn regular(n: usize, center: DVec2, r: f64, phase: f64) -> Vec<DVec2> {
    (0..n)
        .map(|k| {
            let t = phase + 2.0 * PI * k as f64 / n as f64;
            center + r * DVec2::new(t.cos(), t.sin())
        })
        .collect()
}

/// 五角星（非凸，关于中心星形）
fn star(center: DVec2, r_out: f64, r_in: f64) -> Vec<DVec2> {
    (0..10)
        .map(|k| {
            let t = PI / 2.0 + PI * k as f64 / 5.0;
            let r = if k % 2 == 0 { r_out } else { r_in };
            center + r * DVec2::new(t.cos(), t.sin())
        })
        .collect()
}

fn intersect(a: &[DVec2], b: &[DVec2]) -> Moments {
    intersect_polygons(a, b, is_convex(b, 1e-14), CoordinateSystem::Cartesian)
}

// ============================================================
// 顺序无关
// ============================================================

#[test]
fn test_order_invariance_convex() {
    let a = regular(7, DVec2::new(0.1, 0.2), 1.0, 0.3);
    let b = regular(5, DVec2::new(0.6, -0.1), 0.8, 0.0);
    let ab = intersect(&a, &b);
    let ba = intersect(&b, &a);
    assert!(ab.is_positive(), "重叠面积应为正");
    assert!(ab.approx_eq(&ba, TOL), "求交结果与顺序有关: {:?} vs {:?}", ab, ba);
}

#[test]
fn test_order_invariance_non_convex() {
    let s = star(DVec2::ZERO, 1.0, 0.4);
    let sq = rect(-0.3, -0.2, 0.9, 0.7);
    assert!(!is_convex(&s, 1e-14));
    let a = intersect(&s, &sq);
    let b = intersect(&sq, &s);
    assert!(a.approx_eq(&b, TOL), "非凸求交与顺序有关: {:?} vs {:?}", a, b);
}

// ============================================================
// 可加性
// ============================================================

#[test]
fn test_partition_additivity() {
    // 目标多边形被四块划分，分块求交之和等于整体
    let target = regular(6, DVec2::new(0.5, 0.5), 0.6, 0.1);
    let whole = intersect(&rect(0.0, 0.0, 1.0, 1.0), &target);
    let parts: Moments = [
        rect(0.0, 0.0, 0.5, 0.5),
        rect(0.5, 0.0, 1.0, 0.5),
        rect(0.5, 0.5, 1.0, 1.0),
        rect(0.0, 0.5, 0.5, 1.0),
    ]
    .iter()
    .map(|p| intersect(p, &target))
    .sum();
    assert!(whole.approx_eq(&parts, TOL));
}

#[test]
fn test_disjoint_has_no_area() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(1.5, 0.0, 2.5, 1.0);
    assert!(!intersect(&a, &b).is_positive());
}

#[test]
fn test_touching_edge_has_no_area() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(1.0, 0.0, 2.0, 1.0);
    assert!(intersect(&a, &b).area.abs() < 1e-14);
}

// ============================================================
// 轴对称
// ============================================================

#[test]
fn test_axisymmetric_overlap_volume() {
    // [0,2]x[0,1] ∩ [1,3]x[0,1] = [1,2]x[0,1]，旋转体积 3π
    let a = rect(0.0, 0.0, 2.0, 1.0);
    let b = rect(1.0, 0.0, 3.0, 1.0);
    let m = intersect_polygons(&a, &b, true, CoordinateSystem::CylindricalAxisymmetric);
    assert!((m.area - 3.0 * PI).abs() < TOL);
}
