// crates/rz_geo/src/clip.rs

//! 半平面裁剪
//!
//! Sutherland–Hodgman 算法：依次用每个半平面裁剪主多边形。
//! 裁剪边界必须是凸的（半平面交集）；主多边形可以非凸，此时结果可能
//! 含有沿裁剪边界来回的零面积"桥接"边，但由于矩是边界积分，
//! 这些边的贡献相互抵消，面积与一阶矩仍然精确。

use crate::moments::{edges, polygon_moments, signed_area, vertex_average};
use glam::DVec2;

// ============================================================================
// HalfPlane
// ============================================================================

/// 半平面 `{ x : normal · x + offset >= 0 }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    /// 内法向（不要求单位长度）
    pub normal: DVec2,
    /// 偏移
    pub offset: f64,
}

impl HalfPlane {
    /// 有向线段 a→b 左侧的半平面
    #[inline]
    pub fn left_of(a: DVec2, b: DVec2) -> Self {
        let normal = (b - a).perp();
        Self {
            normal,
            offset: -normal.dot(a),
        }
    }

    /// 有向距离（内侧为正，按法向长度缩放）
    #[inline]
    pub fn signed_distance(&self, p: DVec2) -> f64 {
        self.normal.dot(p) + self.offset
    }
}

/// 逆时针凸多边形的内侧半平面集合
///
/// 长度为零的边不产生半平面。
pub fn inward_half_planes(poly: &[DVec2]) -> Vec<HalfPlane> {
    edges(poly)
        .filter(|(a, b)| a != b)
        .map(|(a, b)| HalfPlane::left_of(a, b))
        .collect()
}

// ============================================================================
// 裁剪
// ============================================================================

/// 用单个半平面裁剪多边形
pub fn clip_by_half_plane(subject: &[DVec2], plane: &HalfPlane) -> Vec<DVec2> {
    let n = subject.len();
    let mut out = Vec::with_capacity(n + 2);
    if n == 0 {
        return out;
    }

    let mut prev = subject[n - 1];
    let mut d_prev = plane.signed_distance(prev);
    for &cur in subject {
        let d_cur = plane.signed_distance(cur);
        if d_cur >= 0.0 {
            if d_prev < 0.0 {
                out.push(crossing(prev, cur, d_prev, d_cur));
            }
            out.push(cur);
        } else if d_prev >= 0.0 {
            out.push(crossing(prev, cur, d_prev, d_cur));
        }
        prev = cur;
        d_prev = d_cur;
    }
    out
}

/// 线段 a→b 与裁剪线的交点（调用方保证 d_a 与 d_b 异号）
#[inline]
fn crossing(a: DVec2, b: DVec2, d_a: f64, d_b: f64) -> DVec2 {
    let t = d_a / (d_a - d_b);
    a + (b - a) * t
}

/// 用半平面集合（凸区域）裁剪多边形
pub fn clip_polygon(subject: &[DVec2], planes: &[HalfPlane]) -> Vec<DVec2> {
    let mut poly = subject.to_vec();
    for plane in planes {
        if poly.len() < 3 {
            poly.clear();
            break;
        }
        poly = clip_by_half_plane(&poly, plane);
    }
    poly
}

/// 用逆时针凸多边形裁剪
#[inline]
pub fn clip_by_convex(subject: &[DVec2], clipper: &[DVec2]) -> Vec<DVec2> {
    clip_polygon(subject, &inward_half_planes(clipper))
}

// ============================================================================
// 扇形三角剖分
// ============================================================================

/// 以质心为中心的扇形三角剖分
///
/// 对质心星形的多边形，所有三角形均为正向；面积非正的三角形被丢弃
/// （与按其半平面裁剪得到空集的结果一致）。面积退化时以顶点平均
/// 作为扇心。
pub fn fan_triangulate(poly: &[DVec2]) -> Vec<[DVec2; 3]> {
    if poly.len() < 3 {
        return Vec::new();
    }
    let center = polygon_moments(poly)
        .centroid()
        .unwrap_or_else(|| vertex_average(poly));

    edges(poly)
        .map(|(a, b)| [center, a, b])
        .filter(|tri| signed_area(tri) > 0.0)
        .collect()
}
