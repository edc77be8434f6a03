// crates/rz_geo/src/coord_sys.rs

//! 坐标系
//!
//! 重映射的体积与一阶矩依赖于坐标系的体积元：
//!
//! | 坐标系 | 体积元 | 体积 | 一阶矩 |
//! |--------|--------|------|--------|
//! | Cartesian | dA | A | (∫x, ∫y) |
//! | CylindricalAxisymmetric | 2π r dA | 2π ∫r | 2π (∫r², ∫rz) |
//!
//! 轴对称坐标系中 x 为径向坐标 r（要求 r ≥ 0），y 为轴向坐标 z。

use crate::moments::{polygon_moments, polygon_second_moments, Moments};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// 二维坐标系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// 平面直角坐标
    #[default]
    Cartesian,
    /// 柱坐标轴对称 (r, z)
    CylindricalAxisymmetric,
}

impl CoordinateSystem {
    /// 坐标系名称
    pub fn name(self) -> &'static str {
        match self {
            Self::Cartesian => "Cartesian",
            Self::CylindricalAxisymmetric => "CylindricalAxisymmetric",
        }
    }

    /// 体积元的几何因子
    #[inline]
    pub fn geometry_factor(self) -> f64 {
        match self {
            Self::Cartesian => 1.0,
            Self::CylindricalAxisymmetric => 2.0 * PI,
        }
    }

    /// 在该坐标系下计算多边形的体积与一阶矩
    pub fn polygon_moments(self, poly: &[DVec2]) -> Moments {
        match self {
            Self::Cartesian => polygon_moments(poly),
            Self::CylindricalAxisymmetric => {
                let m = polygon_moments(poly);
                let s = polygon_second_moments(poly);
                let k = self.geometry_factor();
                Moments::new(k * m.first.x, DVec2::new(k * s.xx, k * s.xy))
            }
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<DVec2> {
        vec![
            DVec2::new(x0, y0),
            DVec2::new(x1, y0),
            DVec2::new(x1, y1),
            DVec2::new(x0, y1),
        ]
    }

    #[test]
    fn test_cartesian_matches_plain_moments() {
        let r = rect(0.0, 0.0, 2.0, 1.0);
        assert_eq!(
            CoordinateSystem::Cartesian.polygon_moments(&r),
            polygon_moments(&r)
        );
    }

    #[test]
    fn test_axisymmetric_annulus_volume() {
        // [1,2]x[0,1] 绕 z 轴旋转：V = π (2² − 1²) · 1 = 3π
        let m = CoordinateSystem::CylindricalAxisymmetric.polygon_moments(&rect(1.0, 0.0, 2.0, 1.0));
        assert!((m.area - 3.0 * PI).abs() < 1e-12);
        // 径向质心 = ∫r² / ∫r = (7/3) / (3/2) = 14/9
        let c = m.centroid().unwrap();
        assert!((c.x - 14.0 / 9.0).abs() < 1e-12);
        assert!((c.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&CoordinateSystem::CylindricalAxisymmetric).unwrap();
        assert_eq!(json, "\"CylindricalAxisymmetric\"");
        assert_eq!(CoordinateSystem::default(), CoordinateSystem::Cartesian);
    }
}
