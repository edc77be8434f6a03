// crates/rz_foundation/src/lib.rs

//! Rezone Foundation Layer
//!
//! 重映射核心的基础层，提供整个工作区共享的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型与错误类别
//! - [`tolerance`]: 数值容差配置
//! - [`entity`]: 实体种类、并行归属与网格角色
//!
//! # 示例
//!
//! ```
//! use rz_foundation::prelude::*;
//!
//! let tol = NumericTolerances::default();
//! assert!(tol.is_volume_negligible(0.0));
//!
//! let err = RzError::precondition("模板矩阵尚未构建");
//! assert_eq!(err.category(), ErrorCategory::Precondition);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod error;
pub mod tolerance;

// 重导出常用类型
pub use entity::{EntityFilter, EntityKind, EntityType, MeshRole};
pub use error::{ErrorCategory, RzError, RzResult};
pub use tolerance::NumericTolerances;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::entity::{EntityFilter, EntityKind, EntityType, MeshRole};
    pub use crate::error::{ErrorCategory, RzError, RzResult};
    pub use crate::tolerance::NumericTolerances;
}
