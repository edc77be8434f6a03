// crates/rz_foundation/src/tolerance.rs

//! 数值容差配置
//!
//! 集中定义几何与最小二乘计算中使用的容差阈值，通过参数注入使用，
//! 不提供全局可变状态。

use serde::{Deserialize, Serialize};

/// 数值容差配置
///
/// - `min_absolute_distance`: 凸性判定中的最小有向距离（负值超过该阈值即判为非凸）
/// - `min_absolute_volume`: 最小体积；多材料质心聚合时总子体积不超过该值的邻居被跳过
/// - `pinv_relative_cutoff`: 最小二乘法方程伪逆的相对奇异值截断
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericTolerances {
    /// 最小绝对距离
    pub min_absolute_distance: f64,
    /// 最小绝对体积
    pub min_absolute_volume: f64,
    /// 伪逆相对截断
    pub pinv_relative_cutoff: f64,
}

impl Default for NumericTolerances {
    fn default() -> Self {
        Self {
            min_absolute_distance: 1e-14,
            min_absolute_volume: 1e-14,
            pinv_relative_cutoff: 1e-12,
        }
    }
}

impl NumericTolerances {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建宽松配置（用于坐标量级较大或噪声较多的网格）
    pub fn relaxed() -> Self {
        Self {
            min_absolute_distance: 1e-10,
            min_absolute_volume: 1e-12,
            pinv_relative_cutoff: 1e-10,
        }
    }

    /// 设置最小绝对距离
    pub fn with_min_distance(mut self, d: f64) -> Self {
        self.min_absolute_distance = d;
        self
    }

    /// 设置最小绝对体积
    pub fn with_min_volume(mut self, v: f64) -> Self {
        self.min_absolute_volume = v;
        self
    }

    /// 体积是否视为零
    #[inline]
    pub fn is_volume_negligible(&self, volume: f64) -> bool {
        volume.abs() <= self.min_absolute_volume
    }

    /// 所有容差是否为非负有限值
    pub fn is_valid(&self) -> bool {
        [
            self.min_absolute_distance,
            self.min_absolute_volume,
            self.pinv_relative_cutoff,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }
}
