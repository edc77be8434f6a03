// crates/rz_mesh/src/lib.rs

//! Rezone 网格协作层
//!
//! 重映射核心通过本 crate 定义的只读接口访问网格、状态、界面重构结果与分区，
//! 并提供一组参考实现用于测试和演示：
//!
//! - [`SimpleMesh`]: 结构化四边形网格（含对偶单元与 side/wedge 分解）
//! - [`SimpleState`]: 字典式场数据与材料分布
//! - [`MatPolySet`]: 按单元索引的材料子多边形
//! - [`Part`]: 单元分区
//!
//! # 示例
//!
//! ```
//! use rz_mesh::prelude::*;
//! use rz_foundation::{EntityFilter, EntityKind};
//!
//! let mesh = SimpleMesh::unit_square(4).unwrap();
//! assert_eq!(mesh.cells(EntityFilter::Owned).len(), 16);
//!
//! let mut state = SimpleState::new(mesh.num_cells(), mesh.num_nodes(), 0);
//! let centroids: Vec<_> = (0..mesh.num_cells()).map(|c| mesh.cell_centroid(c)).collect();
//! state
//!     .add_mesh_field_with(EntityKind::Cell, "linear", centroids, |p| p.x + 2.0 * p.y)
//!     .unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod matpoly;
pub mod part;
pub mod simple;
pub mod state;
pub mod traits;

// 重导出常用类型
pub use matpoly::{CellMatPoly, MatPolySet, MaterialPolygon};
pub use part::Part;
pub use simple::SimpleMesh;
pub use state::SimpleState;
pub use traits::{FieldType, InterfaceReconstructor, MeshQuery, RegionRestriction, StateQuery};

/// 预导入模块
pub mod prelude {
    pub use crate::matpoly::{CellMatPoly, MatPolySet, MaterialPolygon};
    pub use crate::part::Part;
    pub use crate::simple::SimpleMesh;
    pub use crate::state::SimpleState;
    pub use crate::traits::{
        FieldType, InterfaceReconstructor, MeshQuery, RegionRestriction, StateQuery,
    };
}
