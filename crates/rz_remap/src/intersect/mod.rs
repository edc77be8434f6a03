// crates/rz_remap/src/intersect/mod.rs

//! 实体求交模块
//!
//! - [`IntersectR2D`]: 单元/对偶单元求交驱动
//! - [`MaterialMomentAggregator`]: 混合单元按材料聚合交集矩
//! - [`validity`]: side/wedge 分解与材料子多边形的有效性检查
//! - [`Weight`]: 求交输出

mod material;
mod r2d;
pub mod validity;
mod weight;

pub use material::MaterialMomentAggregator;
pub use r2d::IntersectR2D;
pub use weight::{total_moments, Weight};
