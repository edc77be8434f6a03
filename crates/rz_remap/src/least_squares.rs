// crates/rz_remap/src/least_squares.rs

//! 最小二乘梯度矩阵
//!
//! 对模板点 p_0（实体自身）与邻居点 p_1..p_k，设计矩阵 A 的第 i 行为
//! `p_i − p_0`。梯度为法方程解
//!
//! ```text
//! g = (AᵀA)⁺ Aᵀ (v − v_0)
//! ```
//!
//! 其中 (AᵀA)⁺ 为 2x2 对称半正定矩阵的伪逆：按特征分解计算，
//! 相对于最大特征值低于截断阈值的特征方向被舍弃。共线模板因此只在
//! 可分辨方向上给出梯度分量，单点模板给出零梯度。

use glam::{DMat2, DVec2};

/// 缓存的最小二乘矩阵 `(pinv(AᵀA), Aᵀ)`
#[derive(Debug, Clone, PartialEq)]
pub struct StencilMatrices {
    /// 法方程矩阵的伪逆
    pub pseudo_inverse: DMat2,
    /// 设计矩阵转置（按列存储，每列为 p_i − p_0）
    pub transpose: Vec<DVec2>,
}

impl StencilMatrices {
    /// 空模板（零梯度）
    pub fn empty() -> Self {
        Self {
            pseudo_inverse: DMat2::ZERO,
            transpose: Vec::new(),
        }
    }

    /// 由模板点构建，`points[0]` 为参考点
    pub fn from_points(points: &[DVec2], relative_cutoff: f64) -> Self {
        let Some((&p0, rest)) = points.split_first() else {
            return Self::empty();
        };
        let transpose: Vec<DVec2> = rest.iter().map(|&p| p - p0).collect();

        let (mut a11, mut a12, mut a22) = (0.0, 0.0, 0.0);
        for d in &transpose {
            a11 += d.x * d.x;
            a12 += d.x * d.y;
            a22 += d.y * d.y;
        }

        Self {
            pseudo_inverse: pseudo_inverse_sym2(a11, a12, a22, relative_cutoff),
            transpose,
        }
    }

    /// 邻居数（不含参考点）
    #[inline]
    pub fn num_neighbors(&self) -> usize {
        self.transpose.len()
    }

    /// 由模板值计算梯度，`values[0]` 为参考点值
    ///
    /// `values` 长度须为 `num_neighbors() + 1`。
    pub fn gradient(&self, values: &[f64]) -> DVec2 {
        let Some((&v0, rest)) = values.split_first() else {
            return DVec2::ZERO;
        };
        debug_assert_eq!(rest.len(), self.transpose.len());
        let rhs: DVec2 = self
            .transpose
            .iter()
            .zip(rest)
            .map(|(d, &v)| *d * (v - v0))
            .sum();
        self.pseudo_inverse.mul_vec2(rhs)
    }
}

/// 2x2 对称半正定矩阵 [[a11, a12], [a12, a22]] 的伪逆
///
/// 满秩时使用伴随矩阵直接求逆；秩 1 时只保留主特征方向；
/// 最大特征值非正时返回零矩阵。
pub fn pseudo_inverse_sym2(a11: f64, a12: f64, a22: f64, relative_cutoff: f64) -> DMat2 {
    let mean = 0.5 * (a11 + a22);
    let half_diff = 0.5 * (a11 - a22);
    let radius = (half_diff * half_diff + a12 * a12).sqrt();
    let lambda_max = mean + radius;
    let lambda_min = mean - radius;

    if !lambda_max.is_finite() || lambda_max <= 0.0 {
        return DMat2::ZERO;
    }

    if lambda_min > relative_cutoff * lambda_max {
        let det = a11 * a22 - a12 * a12;
        if det > 0.0 {
            let inv = 1.0 / det;
            return DMat2::from_cols(
                DVec2::new(a22 * inv, -a12 * inv),
                DVec2::new(-a12 * inv, a11 * inv),
            );
        }
    }

    // 主特征向量
    let v = if a12.abs() > 0.0 {
        DVec2::new(lambda_max - a22, a12).normalize_or_zero()
    } else if a11 >= a22 {
        DVec2::X
    } else {
        DVec2::Y
    };
    let s = 1.0 / lambda_max;
    DMat2::from_cols(v * (v.x * s), v * (v.y * s))
}
