// crates/rz_remap/src/gradient/limiter.rs

//! 梯度限制器
//!
//! 限制因子 φ ∈ [0, 1] 保证在控制体每个顶点上的重构值
//!
//! ```text
//! q(v) = q_c + φ g · (v − r)
//! ```
//!
//! 不超出模板值的范围 [q_min, q_max]（模板值包含实体自身）。
//!
//! # Barth-Jespersen
//!
//! 对控制体每个顶点 v：
//!
//! ```text
//! Δ_v = g · (v − r)
//!         ⎧ (q_max − q_c) / Δ_v   Δ_v > 0
//! φ_v = ⎨ (q_min − q_c) / Δ_v   Δ_v < 0
//!         ⎩ 1                     Δ_v = 0
//! φ = clamp(min_v φ_v, 0, 1)
//! ```
//!
//! 单元控制体取单元多边形顶点（混合单元取该材料子多边形顶点），
//! 节点控制体取对偶单元顶点。
//!
//! # 参考文献
//!
//! Barth, T.J. and Jespersen, D.C. (1989). "The design and application
//! of upwind schemes on unstructured meshes". AIAA Paper 89-0366.

use crate::config::LimiterType;
use glam::DVec2;
use std::fmt::Debug;

// ============================================================================
// 上下文
// ============================================================================

/// 限制器计算所需的上下文信息
#[derive(Debug, Clone, Copy)]
pub struct LimiterContext<'a> {
    /// 实体自身的场值 q_c
    pub center_value: f64,
    /// 模板值最小值（含自身）
    pub min_value: f64,
    /// 模板值最大值（含自身）
    pub max_value: f64,
    /// 重构参考点 r
    pub reference: DVec2,
    /// 控制体顶点
    pub vertices: &'a [DVec2],
}

impl<'a> LimiterContext<'a> {
    /// 由模板值创建，`values[0]` 为实体自身的值
    ///
    /// 极值以自身值为初值，再遍历邻居值。
    pub fn from_stencil(values: &[f64], reference: DVec2, vertices: &'a [DVec2]) -> Self {
        let center_value = values.first().copied().unwrap_or(0.0);
        let (min_value, max_value) = values
            .iter()
            .fold((center_value, center_value), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Self {
            center_value,
            min_value,
            max_value,
            reference,
            vertices,
        }
    }

    /// 允许的最大正向变化 q_max − q_c
    #[inline]
    pub fn delta_max(&self) -> f64 {
        self.max_value - self.center_value
    }

    /// 允许的最大负向变化 q_min − q_c
    #[inline]
    pub fn delta_min(&self) -> f64 {
        self.min_value - self.center_value
    }
}

// ============================================================================
// SlopeLimiter trait
// ============================================================================

/// 梯度限制器 trait
pub trait SlopeLimiter: Debug + Send + Sync {
    /// 计算限制因子 φ ∈ [0, 1]
    fn compute_limiter(&self, gradient: DVec2, ctx: &LimiterContext<'_>) -> f64;

    /// 返回限制器名称
    fn name(&self) -> &'static str;

    /// 返回限制后的梯度 φ g
    fn limit(&self, gradient: DVec2, ctx: &LimiterContext<'_>) -> DVec2 {
        gradient * self.compute_limiter(gradient, ctx)
    }
}

/// 无限制器
///
/// 始终返回 1.0，不限制梯度。
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLimiter;

impl SlopeLimiter for NoLimiter {
    #[inline]
    fn compute_limiter(&self, _gradient: DVec2, _ctx: &LimiterContext<'_>) -> f64 {
        1.0
    }

    fn name(&self) -> &'static str {
        "NoLimiter"
    }
}

/// Barth-Jespersen 限制器
#[derive(Debug, Clone, Copy, Default)]
pub struct BarthJespersen;

impl BarthJespersen {
    /// 创建新的 Barth-Jespersen 限制器
    pub fn new() -> Self {
        Self
    }
}

impl SlopeLimiter for BarthJespersen {
    fn compute_limiter(&self, gradient: DVec2, ctx: &LimiterContext<'_>) -> f64 {
        let mut phi = 1.0_f64;
        for &v in ctx.vertices {
            let diff = gradient.dot(v - ctx.reference);
            let phi_v = if diff > 0.0 {
                ctx.delta_max() / diff
            } else if diff < 0.0 {
                ctx.delta_min() / diff
            } else {
                1.0
            };
            phi = phi.min(phi_v);
        }
        // 病态输入（中心值越界）下 φ_v 可能为负
        phi.clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "BarthJespersen"
    }
}

/// 根据配置创建限制器实例
pub fn create_limiter(limiter_type: LimiterType) -> Box<dyn SlopeLimiter> {
    match limiter_type {
        LimiterType::None => Box::new(NoLimiter),
        LimiterType::BarthJespersen => Box::new(BarthJespersen::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_context_bounds_include_center() {
        let verts = unit_square();
        let ctx = LimiterContext::from_stencil(&[5.0, 6.0, 7.0], DVec2::splat(0.5), &verts);
        assert_eq!(ctx.min_value, 5.0);
        assert_eq!(ctx.max_value, 7.0);
        assert!((ctx.delta_max() - 2.0).abs() < 1e-14);
        assert_eq!(ctx.delta_min(), 0.0);
    }

    #[test]
    fn test_no_limiter() {
        let verts = unit_square();
        let ctx = LimiterContext::from_stencil(&[1.0, 1.0], DVec2::splat(0.5), &verts);
        let limiter = create_limiter(LimiterType::None);
        assert_eq!(limiter.compute_limiter(DVec2::new(100.0, -3.0), &ctx), 1.0);
        assert_eq!(limiter.name(), "NoLimiter");
    }

    #[test]
    fn test_bj_no_limiting_when_within_bounds() {
        // q = x 在 [0,1]² 上，中心 0.5，邻居范围 [-0.5, 1.5]
        let verts = unit_square();
        let ctx = LimiterContext::from_stencil(&[0.5, -0.5, 1.5], DVec2::splat(0.5), &verts);
        let phi = BarthJespersen::new().compute_limiter(DVec2::X, &ctx);
        assert!((phi - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_bj_limits_overshoot() {
        // 邻居范围 [0.25, 0.75]，顶点投影 ±0.5 → φ = 0.5
        let verts = unit_square();
        let ctx = LimiterContext::from_stencil(&[0.5, 0.25, 0.75], DVec2::splat(0.5), &verts);
        let g = BarthJespersen::new().limit(DVec2::X, &ctx);
        assert!((g.x - 0.5).abs() < 1e-14);
        assert_eq!(g.y, 0.0);

        // 限制后顶点重构值不越界
        for v in &verts {
            let q = 0.5 + g.dot(*v - ctx.reference);
            assert!(q >= ctx.min_value - 1e-14 && q <= ctx.max_value + 1e-14);
        }
    }

    #[test]
    fn test_bj_local_extremum_gives_zero() {
        // 中心为局部极大值
        let verts = unit_square();
        let ctx = LimiterContext::from_stencil(&[2.0, 1.0, 1.5], DVec2::splat(0.5), &verts);
        let phi = BarthJespersen::new().compute_limiter(DVec2::new(1.0, 1.0), &ctx);
        assert_eq!(phi, 0.0);
    }

    #[test]
    fn test_bj_zero_gradient() {
        let verts = unit_square();
        let ctx = LimiterContext::from_stencil(&[1.0, 0.0, 2.0], DVec2::splat(0.5), &verts);
        assert_eq!(BarthJespersen::new().compute_limiter(DVec2::ZERO, &ctx), 1.0);
    }

    #[test]
    fn test_bj_clamped_on_pathological_input() {
        // 中心值位于模板范围之外
        let verts = unit_square();
        let ctx = LimiterContext {
            center_value: 1.0,
            min_value: 2.0,
            max_value: 3.0,
            reference: DVec2::new(-5.0, 0.5),
            vertices: &verts,
        };
        let phi = BarthJespersen::new().compute_limiter(DVec2::X, &ctx);
        assert!((phi - 1.0 / 3.0).abs() < 1e-14);

        let ctx = LimiterContext {
            center_value: 1.0,
            min_value: -1.0,
            max_value: 0.5,
            reference: DVec2::splat(0.5),
            vertices: &verts,
        };
        assert_eq!(BarthJespersen::new().compute_limiter(DVec2::X, &ctx), 0.0);
    }
}
