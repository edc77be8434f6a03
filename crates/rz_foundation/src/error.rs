// crates/rz_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `RzError` 枚举和 `RzResult` 类型别名，用于整个重映射核心的错误处理。
//!
//! # 错误分类
//!
//! | 类别 | 说明 | 传播策略 |
//! |------|------|----------|
//! | Configuration | 材料索引无效、缺少界面重构、坐标系不一致等 | 调用时立即返回 |
//! | Precondition | 调用顺序错误（如未构建模板即求梯度） | 调用时立即返回 |
//! | GeometryValidity | 负体积单纯形/子多边形（仅在开启验证时检测） | 致命，不重试 |
//! | Data | 字段缺失、数组大小不匹配、索引越界 | 调用时立即返回 |
//!
//! 数值退化（多材料质心聚合时子体积接近零）不是错误：在局部被吸收，
//! 不会以 NaN 的形式传播。
//!
//! # 示例
//!
//! ```
//! use rz_foundation::error::{ErrorCategory, RzError, RzResult};
//!
//! fn check_material(m: usize, n: usize) -> RzResult<()> {
//!     if m >= n {
//!         return Err(RzError::invalid_material(m, n));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_material(3, 2).unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::Configuration);
//! ```

use thiserror::Error;

/// 统一结果类型
pub type RzResult<T> = Result<T, RzError>;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 配置错误
    Configuration,
    /// 前置条件错误
    Precondition,
    /// 几何有效性错误
    GeometryValidity,
    /// 数据访问错误
    Data,
}

/// 重映射核心错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RzError {
    // ========================================================================
    // 配置错误
    // ========================================================================
    /// 通用配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 材料索引无效
    #[error("无效的材料索引: {material} (材料总数 {n_materials})")]
    InvalidMaterial {
        /// 请求的材料索引
        material: usize,
        /// 材料总数
        n_materials: usize,
    },

    /// 源/目标网格坐标系不一致
    #[error("源网格与目标网格坐标系不一致: 源={source_sys}, 目标={target_sys}")]
    CoordinateSystemMismatch {
        /// 源网格坐标系
        source_sys: String,
        /// 目标网格坐标系
        target_sys: String,
    },

    // ========================================================================
    // 前置条件错误
    // ========================================================================
    /// 前置条件不满足
    #[error("前置条件不满足: {message}")]
    Precondition {
        /// 具体错误信息
        message: String,
    },

    // ========================================================================
    // 几何有效性错误
    // ========================================================================
    /// 单元/对偶单元分解中出现负体积单纯形
    #[error(
        "{role}{kind} {entity} 的分解中存在负体积单纯形 {simplex_volume:e}; \
         {kind}体积 = {entity_volume:e}, {diagnosis}"
    )]
    NegativeSimplex {
        /// 实体类别（"单元" / "对偶单元"）
        kind: &'static str,
        /// 实体编号
        entity: usize,
        /// 所属网格（"源网格" / "目标网格"）
        role: &'static str,
        /// 单纯形体积
        simplex_volume: f64,
        /// 实体整体体积
        entity_volume: f64,
        /// 诊断结论
        diagnosis: &'static str,
    },

    /// 材料子多边形体积为负
    #[error("单元 {cell} 中材料 {material} 的子多边形体积为负: {volume:e}")]
    NegativeMaterialVolume {
        /// 材料索引
        material: usize,
        /// 单元编号
        cell: usize,
        /// 子多边形体积
        volume: f64,
    },

    // ========================================================================
    // 数据访问错误
    // ========================================================================
    /// 字段不存在
    #[error("字段不存在: {name}")]
    FieldNotFound {
        /// 字段名
        name: String,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl RzError {
    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 材料索引无效
    pub fn invalid_material(material: usize, n_materials: usize) -> Self {
        Self::InvalidMaterial {
            material,
            n_materials,
        }
    }

    /// 坐标系不一致
    pub fn coordinate_mismatch(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::CoordinateSystemMismatch {
            source_sys: source.into(),
            target_sys: target.into(),
        }
    }

    /// 前置条件不满足
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// 负体积单纯形
    ///
    /// 根据实体整体体积给出诊断：整体体积非正说明单元翻转或退化，
    /// 否则说明单元严重非凸。
    pub fn negative_simplex(
        kind: &'static str,
        entity: usize,
        role: &'static str,
        simplex_volume: f64,
        entity_volume: f64,
    ) -> Self {
        let diagnosis = if entity_volume <= 0.0 {
            "实体翻转或退化"
        } else {
            "实体可能严重非凸"
        };
        Self::NegativeSimplex {
            kind,
            entity,
            role,
            simplex_volume,
            entity_volume,
            diagnosis,
        }
    }

    /// 材料子多边形体积为负
    pub fn negative_material_volume(material: usize, cell: usize, volume: f64) -> Self {
        Self::NegativeMaterialVolume {
            material,
            cell,
            volume,
        }
    }

    /// 字段不存在
    pub fn field_not_found(name: impl Into<String>) -> Self {
        Self::FieldNotFound { name: name.into() }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. }
            | Self::InvalidMaterial { .. }
            | Self::CoordinateSystemMismatch { .. } => ErrorCategory::Configuration,
            Self::Precondition { .. } => ErrorCategory::Precondition,
            Self::NegativeSimplex { .. } | Self::NegativeMaterialVolume { .. } => {
                ErrorCategory::GeometryValidity
            }
            Self::FieldNotFound { .. }
            | Self::SizeMismatch { .. }
            | Self::IndexOutOfBounds { .. } => ErrorCategory::Data,
        }
    }

    /// 是否为几何有效性错误
    #[inline]
    pub fn is_geometry_validity(&self) -> bool {
        self.category() == ErrorCategory::GeometryValidity
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl RzError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> RzResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查索引是否在范围内
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> RzResult<()> {
        if index >= len {
            Err(Self::index_out_of_bounds(index_type, index, len))
        } else {
            Ok(())
        }
    }

    /// 检查材料索引是否有效
    #[inline]
    pub fn check_material(material: usize, n_materials: usize) -> RzResult<()> {
        if material >= n_materials {
            Err(Self::invalid_material(material, n_materials))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 测试
// ========================================================================
