// crates/rz_remap/src/config.rs

//! 重映射配置
//!
//! 所有配置结构支持 serde 反序列化，缺省字段取默认值。
//!
//! ```
//! use rz_remap::config::{LimiterType, RemapConfig};
//!
//! let config = RemapConfig::default();
//! assert_eq!(config.gradient.limiter, LimiterType::BarthJespersen);
//! assert!(config.validate().is_ok());
//! ```

use rz_foundation::{NumericTolerances, RzError, RzResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// 限制器类型
// ============================================================================

/// 内部实体的梯度限制器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LimiterType {
    /// 不限制
    None,
    /// Barth-Jespersen
    #[default]
    BarthJespersen,
}

/// 边界实体的梯度策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoundaryLimiterType {
    /// 不限制
    None,
    /// Barth-Jespersen
    #[default]
    BarthJespersen,
    /// 边界实体梯度置零
    ZeroGradient,
}

// ============================================================================
// 梯度配置
// ============================================================================

/// 梯度计算配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    /// 默认内部限制器（`set_field` 未显式给出时使用）
    pub limiter: LimiterType,
    /// 默认边界策略
    pub boundary_limiter: BoundaryLimiterType,
    /// 是否启用并行
    pub parallel: bool,
    /// 并行阈值（实体数超过此值时使用并行）
    pub parallel_threshold: usize,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            limiter: LimiterType::BarthJespersen,
            boundary_limiter: BoundaryLimiterType::BarthJespersen,
            parallel: true,
            parallel_threshold: 1000,
        }
    }
}

impl GradientConfig {
    /// 无限制配置
    pub fn unlimited() -> Self {
        Self {
            limiter: LimiterType::None,
            boundary_limiter: BoundaryLimiterType::None,
            ..Default::default()
        }
    }

    /// 设置限制器
    pub fn with_limiter(mut self, limiter: LimiterType, boundary: BoundaryLimiterType) -> Self {
        self.limiter = limiter;
        self.boundary_limiter = boundary;
        self
    }

    /// 设置并行开关
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// 设置并行阈值
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

// ============================================================================
// 求交配置
// ============================================================================

/// 求交配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectConfig {
    /// 是否检查单元/对偶单元分解与材料子多边形的有效性
    ///
    /// 默认在 debug 构建中开启。
    pub validate_geometry: bool,
    /// 是否启用并行
    pub parallel: bool,
    /// 并行阈值（目标实体数超过此值时使用并行）
    pub parallel_threshold: usize,
}

impl Default for IntersectConfig {
    fn default() -> Self {
        Self {
            validate_geometry: cfg!(debug_assertions),
            parallel: true,
            parallel_threshold: 1000,
        }
    }
}

impl IntersectConfig {
    /// 设置几何有效性检查
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_geometry = enabled;
        self
    }

    /// 设置并行开关
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}

// ============================================================================
// 总配置
// ============================================================================

/// 重映射总配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemapConfig {
    /// 数值容差
    pub tolerances: NumericTolerances,
    /// 梯度配置
    pub gradient: GradientConfig,
    /// 求交配置
    pub intersect: IntersectConfig,
}

impl RemapConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置容差
    pub fn with_tolerances(mut self, tolerances: NumericTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// 设置梯度配置
    pub fn with_gradient(mut self, gradient: GradientConfig) -> Self {
        self.gradient = gradient;
        self
    }

    /// 设置求交配置
    pub fn with_intersect(mut self, intersect: IntersectConfig) -> Self {
        self.intersect = intersect;
        self
    }

    /// 校验配置
    pub fn validate(&self) -> RzResult<()> {
        if !self.tolerances.is_valid() {
            return Err(RzError::config(format!(
                "数值容差必须为非负有限值: {:?}",
                self.tolerances
            )));
        }
        if self.tolerances.pinv_relative_cutoff >= 1.0 {
            return Err(RzError::config(format!(
                "伪逆相对截断必须小于 1: {}",
                self.tolerances.pinv_relative_cutoff
            )));
        }
        if self.gradient.parallel_threshold == 0 || self.intersect.parallel_threshold == 0 {
            return Err(RzError::config("并行阈值必须为正"));
        }
        Ok(())
    }
}

/// 并行调度策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelPolicy {
    /// 是否启用并行
    pub enabled: bool,
    /// 并行阈值
    pub threshold: usize,
}

impl ParallelPolicy {
    /// 串行
    pub const SERIAL: Self = Self {
        enabled: false,
        threshold: usize::MAX,
    };

    /// 给定规模是否并行执行
    #[inline]
    pub fn use_parallel(&self, n: usize) -> bool {
        self.enabled && n >= self.threshold
    }
}

impl From<&GradientConfig> for ParallelPolicy {
    fn from(c: &GradientConfig) -> Self {
        Self {
            enabled: c.parallel,
            threshold: c.parallel_threshold,
        }
    }
}

impl From<&IntersectConfig> for ParallelPolicy {
    fn from(c: &IntersectConfig) -> Self {
        Self {
            enabled: c.parallel,
            threshold: c.parallel_threshold,
        }
    }
}
