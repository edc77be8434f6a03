// crates/rz_remap/src/lib.rs

//! Rezone 守恒重映射核心
//!
//! 提供守恒重映射的两个几何/数值步骤：
//! - 限制梯度 (gradient) - 单元/节点场的最小二乘梯度与 Barth-Jespersen 限制
//! - 实体求交 (intersect) - 源/目标控制体交集的体积与一阶矩
//!
//! 以及支撑模块：
//! - 配置 (config)
//! - 邻居模板缓存 (stencil)
//! - 最小二乘矩阵 (least_squares)
//! - 按实体并行 (parallel)
//!
//! # 示例
//!
//! ```
//! use glam::DVec2;
//! use rz_foundation::EntityKind;
//! use rz_mesh::prelude::*;
//! use rz_remap::prelude::*;
//!
//! let mesh = SimpleMesh::unit_square(4).unwrap();
//! let mut state = SimpleState::new(mesh.num_cells(), mesh.num_nodes(), 0);
//! let centroids: Vec<DVec2> = (0..mesh.num_cells()).map(|c| mesh.cell_centroid(c)).collect();
//! state
//!     .add_mesh_field_with(EntityKind::Cell, "density", centroids, |p| p.x + 2.0 * p.y)
//!     .unwrap();
//!
//! let config = RemapConfig::default();
//! let mut gradient = create_gradient(EntityKind::Cell, &mesh, &state, None, &config).unwrap();
//! gradient
//!     .set_field("density", LimiterType::BarthJespersen, BoundaryLimiterType::BarthJespersen)
//!     .unwrap();
//! let g = gradient.gradient_at(mesh.cell_at(1, 1)).unwrap();
//! assert!((g - DVec2::new(1.0, 2.0)).length() < 1e-10);
//!
//! let r2d = IntersectR2D::new(&mesh, &mesh, &config).unwrap();
//! let weights = r2d.intersect_cell(5, &[5]).unwrap();
//! assert!((weights[0].volume() - 0.0625).abs() < 1e-14);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod gradient;
pub mod intersect;
pub mod least_squares;
pub mod parallel;
pub mod stencil;

// 重导出常用类型
pub use config::{
    BoundaryLimiterType, GradientConfig, IntersectConfig, LimiterType, ParallelPolicy,
    RemapConfig,
};
pub use gradient::{create_gradient, CellGradient, GradientStrategy, NodeGradient};
pub use intersect::{IntersectR2D, MaterialMomentAggregator, Weight};
pub use stencil::{FieldScope, StencilCache};

/// 预导入模块
pub mod prelude {
    pub use crate::config::{
        BoundaryLimiterType, GradientConfig, IntersectConfig, LimiterType, RemapConfig,
    };
    pub use crate::gradient::{create_gradient, GradientStrategy};
    pub use crate::intersect::{IntersectR2D, Weight};
}
