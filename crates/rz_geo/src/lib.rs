// crates/rz_geo/src/lib.rs
//! Rezone 二维多边形几何
//!
//! 提供重映射求交所需的纯几何算法，不依赖任何网格结构。
//!
//! # 模块
//!
//! - `moments`: 多边形面积、一阶矩与二阶矩
//! - `convexity`: 边界积分凸性判定
//! - `clip`: 半平面（Sutherland–Hodgman）裁剪与扇形三角剖分
//! - `intersect`: 凸性感知的多边形求交矩
//! - `coord_sys`: 坐标系与体积元
//!
//! 所有多边形约定为逆时针顶点顺序。
//!
//! # 示例
//!
//! ```
//! use glam::DVec2;
//! use rz_geo::prelude::*;
//!
//! let a = vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0), DVec2::new(0.0, 1.0)];
//! let b = vec![DVec2::new(0.5, 0.0), DVec2::new(1.5, 0.0), DVec2::new(1.5, 1.0), DVec2::new(0.5, 1.0)];
//!
//! let convex = is_convex(&b, 1e-14);
//! let m = intersect_polygons(&a, &b, convex, CoordinateSystem::Cartesian);
//! assert!((m.area - 0.5).abs() < 1e-14);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clip;
pub mod convexity;
pub mod coord_sys;
pub mod intersect;
pub mod moments;

/// 预导入模块
pub mod prelude {
    pub use crate::clip::{clip_by_convex, clip_polygon, fan_triangulate, HalfPlane};
    pub use crate::convexity::is_convex;
    pub use crate::coord_sys::CoordinateSystem;
    pub use crate::intersect::intersect_polygons;
    pub use crate::moments::{polygon_moments, signed_area, Moments};
}

// 重导出常用类型
pub use convexity::is_convex;
pub use coord_sys::CoordinateSystem;
pub use intersect::intersect_polygons;
pub use moments::{polygon_moments, polygon_second_moments, signed_area, Moments, SecondMoments};
