// crates/rz_geo/src/intersect.rs

//! 多边形求交矩
//!
//! `intersect_polygons(subject, clipper, ..)` 计算两个逆时针多边形交集的
//! 体积与一阶矩。第二个多边形作为裁剪边界：
//!
//! - 凸：主多边形直接被其内侧半平面裁剪
//! - 非凸：以质心扇形三角剖分，主多边形分别被每个三角形裁剪后矩求和
//!
//! 凸性由调用方以提示参数给出（调用方通常已为其他目的做过判定）。

use crate::clip::{clip_by_convex, fan_triangulate};
use crate::coord_sys::CoordinateSystem;
use crate::moments::Moments;
use glam::DVec2;

/// 求交矩
///
/// # 参数
///
/// - `subject`: 被裁剪多边形（可非凸）
/// - `clipper`: 裁剪边界多边形
/// - `clipper_is_convex`: `clipper` 是否凸
/// - `coord_sys`: 计算矩所用坐标系
///
/// 无重叠时返回面积为零（或数值噪声量级）的矩，由调用方筛除。
pub fn intersect_polygons(
    subject: &[DVec2],
    clipper: &[DVec2],
    clipper_is_convex: bool,
    coord_sys: CoordinateSystem,
) -> Moments {
    if subject.len() < 3 || clipper.len() < 3 {
        return Moments::ZERO;
    }

    if clipper_is_convex {
        let clipped = clip_by_convex(subject, clipper);
        return coord_sys.polygon_moments(&clipped);
    }

    fan_triangulate(clipper)
        .iter()
        .map(|tri| coord_sys.polygon_moments(&clip_by_convex(subject, tri)))
        .sum()
}
