// crates/rz_remap/src/intersect/weight.rs

//! 求交权重

use glam::DVec2;
use rz_geo::Moments;
use serde::{Deserialize, Serialize};

/// 单个源实体对目标实体的交集矩
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    /// 源实体编号
    pub entity: usize,
    /// 交集矩 [体积, Σx, Σy]
    pub moments: Moments,
}

impl Weight {
    /// 创建权重
    pub fn new(entity: usize, moments: Moments) -> Self {
        Self { entity, moments }
    }

    /// 交集体积
    #[inline]
    pub fn volume(&self) -> f64 {
        self.moments.area
    }

    /// 交集质心
    #[inline]
    pub fn centroid(&self) -> Option<DVec2> {
        self.moments.centroid()
    }
}

/// 一组权重的矩之和
pub fn total_moments(weights: &[Weight]) -> Moments {
    weights.iter().map(|w| w.moments).sum()
}
