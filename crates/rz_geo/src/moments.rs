// crates/rz_geo/src/moments.rs

//! 多边形几何矩
//!
//! 多边形按逆时针顺序给出顶点，所有积分由格林公式化为边界求和：
//!
//! ```text
//! A    = ½ Σ c_i
//! ∫x   = ⅙ Σ (x_i + x_{i+1}) c_i
//! ∫y   = ⅙ Σ (y_i + y_{i+1}) c_i
//! ∫x²  = 1/12 Σ (x_i² + x_i x_{i+1} + x_{i+1}²) c_i
//! ∫y²  = 1/12 Σ (y_i² + y_i y_{i+1} + y_{i+1}²) c_i
//! ∫xy  = 1/24 Σ (x_i y_{i+1} + 2 x_i y_i + 2 x_{i+1} y_{i+1} + x_{i+1} y_i) c_i
//! ```
//!
//! 其中 c_i = x_i y_{i+1} − x_{i+1} y_i。边界积分对非凸多边形同样成立，
//! 退化（重合/共线）顶点不影响结果。

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// 零阶与一阶矩 `[面积, Σx, Σy]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Moments {
    /// 面积（或体积）
    pub area: f64,
    /// 一阶矩 (∫x, ∫y)
    pub first: DVec2,
}

impl Moments {
    /// 零矩
    pub const ZERO: Self = Self {
        area: 0.0,
        first: DVec2::ZERO,
    };

    /// 创建矩
    #[inline]
    pub const fn new(area: f64, first: DVec2) -> Self {
        Self { area, first }
    }

    /// 从 `[面积, Σx, Σy]` 数组创建
    #[inline]
    pub fn from_array([area, mx, my]: [f64; 3]) -> Self {
        Self::new(area, DVec2::new(mx, my))
    }

    /// 转为 `[面积, Σx, Σy]` 数组
    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.area, self.first.x, self.first.y]
    }

    /// 质心（面积为零时返回 None）
    #[inline]
    pub fn centroid(&self) -> Option<DVec2> {
        if self.area == 0.0 {
            None
        } else {
            Some(self.first / self.area)
        }
    }

    /// 面积是否为正（求交结果是否代表真实重叠）
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.area > 0.0
    }

    /// 分量是否均在容差内相等
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.area - other.area).abs() <= eps
            && (self.first.x - other.first.x).abs() <= eps
            && (self.first.y - other.first.y).abs() <= eps
    }
}

impl Add for Moments {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            area: self.area + other.area,
            first: self.first + other.first,
        }
    }
}

impl AddAssign for Moments {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.area += other.area;
        self.first += other.first;
    }
}

impl Sum for Moments {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + m)
    }
}

/// 二阶矩 (∫x², ∫xy, ∫y²)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SecondMoments {
    /// ∫x² dA
    pub xx: f64,
    /// ∫xy dA
    pub xy: f64,
    /// ∫y² dA
    pub yy: f64,
}

/// 按边遍历 (v_i, v_{i+1})，首尾相接
#[inline]
pub(crate) fn edges(poly: &[DVec2]) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
    let n = poly.len();
    (0..n).map(move |i| (poly[i], poly[(i + 1) % n]))
}

/// 有向面积（逆时针为正）
pub fn signed_area(poly: &[DVec2]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    0.5 * edges(poly).map(|(a, b)| a.perp_dot(b)).sum::<f64>()
}

/// 零阶与一阶矩
pub fn polygon_moments(poly: &[DVec2]) -> Moments {
    if poly.len() < 3 {
        return Moments::ZERO;
    }
    let mut area = 0.0;
    let mut first = DVec2::ZERO;
    for (a, b) in edges(poly) {
        let c = a.perp_dot(b);
        area += c;
        first += (a + b) * c;
    }
    Moments::new(0.5 * area, first / 6.0)
}

/// 二阶矩
pub fn polygon_second_moments(poly: &[DVec2]) -> SecondMoments {
    if poly.len() < 3 {
        return SecondMoments::default();
    }
    let mut m = SecondMoments::default();
    for (a, b) in edges(poly) {
        let c = a.perp_dot(b);
        m.xx += (a.x * a.x + a.x * b.x + b.x * b.x) * c;
        m.yy += (a.y * a.y + a.y * b.y + b.y * b.y) * c;
        m.xy += (a.x * b.y + 2.0 * a.x * a.y + 2.0 * b.x * b.y + b.x * a.y) * c;
    }
    m.xx /= 12.0;
    m.yy /= 12.0;
    m.xy /= 24.0;
    m
}

/// 顶点算术平均（面积退化时的质心替代）
pub fn vertex_average(poly: &[DVec2]) -> DVec2 {
    if poly.is_empty() {
        return DVec2::ZERO;
    }
    poly.iter().copied().sum::<DVec2>() / poly.len() as f64
}
