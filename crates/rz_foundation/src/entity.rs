// crates/rz_foundation/src/entity.rs

//! 实体分类
//!
//! 重映射在两类控制体上进行：单元（Cell）与节点对偶单元（Node）。
//! 并行分区下实体分为本地拥有（Owned）与幽灵（Ghost）。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 实体种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// 单元
    Cell,
    /// 节点（控制体为对偶单元）
    Node,
}

impl EntityKind {
    /// 控制体名称（用于诊断信息）
    pub fn control_volume_name(self) -> &'static str {
        match self {
            Self::Cell => "单元",
            Self::Node => "对偶单元",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell => write!(f, "cell"),
            Self::Node => write!(f, "node"),
        }
    }
}

/// 实体并行归属
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EntityType {
    /// 本地拥有
    #[default]
    Owned,
    /// 幽灵（来自相邻分区）
    Ghost,
}

/// 实体筛选范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityFilter {
    /// 仅本地拥有实体
    Owned,
    /// 全部实体（拥有 + 幽灵）
    All,
}

impl EntityFilter {
    /// 给定归属的实体是否满足筛选
    #[inline]
    pub fn accepts(self, ty: EntityType) -> bool {
        match self {
            Self::Owned => ty == EntityType::Owned,
            Self::All => true,
        }
    }
}

/// 求交时实体所属网格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshRole {
    /// 源网格
    Source,
    /// 目标网格
    Target,
}

impl MeshRole {
    /// 角色名称（用于诊断信息）
    pub fn name(self) -> &'static str {
        match self {
            Self::Source => "源网格",
            Self::Target => "目标网格",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts() {
        assert!(EntityFilter::Owned.accepts(EntityType::Owned));
        assert!(!EntityFilter::Owned.accepts(EntityType::Ghost));
        assert!(EntityFilter::All.accepts(EntityType::Ghost));
    }

    #[test]
    fn test_names() {
        assert_eq!(EntityKind::Node.control_volume_name(), "对偶单元");
        assert_eq!(MeshRole::Target.name(), "目标网格");
        assert_eq!(EntityKind::Cell.to_string(), "cell");
    }
}
