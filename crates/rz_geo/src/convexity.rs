// crates/rz_geo/src/convexity.rs

//! 多边形凸性判定
//!
//! 对每个首尾相接的顶点三元组 (f, m, s)，取弦 f→s 的单位外法向 n，
//! 计算中间点的有向距离 `d = (m − f) · n`。任一 `d <= −tol` 即判为非凸。
//!
//! 逆时针多边形中，凸顶点 m 位于弦 f→s 的外侧（d > 0），
//! 凹顶点位于内侧（d < 0）。复杂度 O(n)。

use glam::DVec2;

/// 判断逆时针多边形是否凸
///
/// 共线顶点（d ≈ 0）视为凸；长度为零的弦被跳过；少于 3 个顶点的
/// 退化多边形视为凸。
pub fn is_convex(poly: &[DVec2], tolerance: f64) -> bool {
    let n = poly.len();
    if n < 3 {
        return true;
    }
    for i in 0..n {
        let f = poly[i];
        let m = poly[(i + 1) % n];
        let s = poly[(i + 2) % n];

        let chord = s - f;
        let len = chord.length();
        if len == 0.0 {
            continue;
        }
        // 弦 f→s 的外法向（逆时针时指向多边形外侧）
        let normal = DVec2::new(chord.y, -chord.x) / len;
        let dst = (m - f).dot(normal);
        if dst <= -tolerance {
            return false;
        }
    }
    true
}
