// crates/rz_mesh/src/traits.rs

//! 协作接口
//!
//! 重映射核心不持有网格、状态或界面重构数据，只通过以下只读接口访问：
//!
//! - [`MeshQuery`]: 网格几何与拓扑（单元、节点、对偶单元）
//! - [`StateQuery`]: 场数据与材料分布
//! - [`InterfaceReconstructor`]: 混合单元的材料子多边形
//! - [`RegionRestriction`]: 分区（Part）限制
//!
//! # 线程安全
//!
//! 所有接口要求 `Send + Sync`，模板构建与批量梯度计算会在 Rayon
//! 并行迭代器中共享引用。
//!
//! # 多边形约定
//!
//! 单元与对偶单元多边形按逆时针顶点顺序返回。

use crate::matpoly::CellMatPoly;
use glam::DVec2;
use rz_foundation::{EntityFilter, EntityKind, EntityType, RzResult};
use rz_geo::CoordinateSystem;

// =========================================================================
// MeshQuery - 网格只读访问接口
// =========================================================================

/// 网格只读访问接口
///
/// 实体编号为 `0..num_cells()` / `0..num_nodes()`，包含拥有与幽灵实体，
/// 归属由 `cell_type` / `node_type` 给出。
pub trait MeshQuery: Send + Sync {
    // ===== 基本计数 =====

    /// 单元总数（拥有 + 幽灵）
    fn num_cells(&self) -> usize;

    /// 节点总数（拥有 + 幽灵）
    fn num_nodes(&self) -> usize;

    /// 单元归属
    fn cell_type(&self, cell: usize) -> EntityType;

    /// 节点归属
    fn node_type(&self, node: usize) -> EntityType;

    /// 满足筛选条件的单元编号
    fn cells(&self, filter: EntityFilter) -> Vec<usize> {
        (0..self.num_cells())
            .filter(|&c| filter.accepts(self.cell_type(c)))
            .collect()
    }

    /// 满足筛选条件的节点编号
    fn nodes(&self, filter: EntityFilter) -> Vec<usize> {
        (0..self.num_nodes())
            .filter(|&n| filter.accepts(self.node_type(n)))
            .collect()
    }

    // ===== 几何查询 =====

    /// 单元质心
    fn cell_centroid(&self, cell: usize) -> DVec2;

    /// 节点坐标
    fn node_coordinates(&self, node: usize) -> DVec2;

    /// 单元多边形顶点坐标
    fn cell_polygon(&self, cell: usize) -> Vec<DVec2>;

    /// 对偶单元多边形顶点坐标
    fn dual_cell_polygon(&self, node: usize) -> Vec<DVec2>;

    /// 网格坐标系
    fn coordinate_system(&self) -> CoordinateSystem {
        CoordinateSystem::Cartesian
    }

    /// 单元体积（按坐标系体积元）
    fn cell_volume(&self, cell: usize) -> f64 {
        self.coordinate_system()
            .polygon_moments(&self.cell_polygon(cell))
            .area
    }

    /// 对偶单元体积（按坐标系体积元）
    fn dual_cell_volume(&self, node: usize) -> f64 {
        self.coordinate_system()
            .polygon_moments(&self.dual_cell_polygon(node))
            .area
    }

    // ===== 拓扑查询 =====

    /// 与单元共享节点的相邻单元（不含自身）
    fn cell_node_adjacent_cells(&self, cell: usize, filter: EntityFilter) -> Vec<usize>;

    /// 与节点共享单元的相邻节点（不含自身），即对偶单元的节点相邻关系
    fn node_adjacent_nodes(&self, node: usize, filter: EntityFilter) -> Vec<usize>;

    /// 实体是否位于计算域外边界
    ///
    /// 单元：至少一条边位于边界；节点：节点本身位于边界。
    fn on_exterior_boundary(&self, kind: EntityKind, id: usize) -> bool;

    // ===== 可选分解 =====

    /// 单元的 side 分解：每条边与质心构成的三角形 (v_k, v_{k+1}, c)
    ///
    /// 不支持分解的网格返回 None。
    fn cell_side_triangles(&self, _cell: usize) -> Option<Vec<[DVec2; 3]>> {
        None
    }

    /// 对偶单元的 wedge 分解：节点、半边中点与相邻单元质心构成的三角形
    ///
    /// 不支持分解的网格返回 None。
    fn node_wedge_triangles(&self, _node: usize) -> Option<Vec<[DVec2; 3]>> {
        None
    }
}

// =========================================================================
// StateQuery - 场数据访问接口
// =========================================================================

/// 场类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 网格场：每个实体一个值
    Mesh,
    /// 多材料场：每个材料在其所占单元上各一个值
    MultiMaterial,
}

/// 状态只读访问接口
pub trait StateQuery: Send + Sync {
    /// 场类型
    fn field_type(&self, kind: EntityKind, name: &str) -> RzResult<FieldType>;

    /// 网格场数据（按实体编号索引）
    fn mesh_data(&self, kind: EntityKind, name: &str) -> RzResult<&[f64]>;

    /// 材料场数据（按材料局部编号索引）
    fn material_data(&self, material: usize, name: &str) -> RzResult<&[f64]>;

    /// 材料总数
    fn num_materials(&self) -> usize;

    /// 含有该材料的单元（材料局部编号顺序）
    fn material_cells(&self, material: usize) -> RzResult<&[usize]>;

    /// 单元所含材料
    fn cell_materials(&self, cell: usize) -> Vec<usize>;

    /// 单元在材料单元列表中的局部编号（单元不含该材料时为 None）
    fn cell_index_in_material(&self, cell: usize, material: usize) -> Option<usize>;
}

// =========================================================================
// InterfaceReconstructor - 界面重构结果
// =========================================================================

/// 界面重构结果访问接口
pub trait InterfaceReconstructor: Send + Sync {
    /// 混合单元的材料子多边形集合（纯单元返回 None）
    fn cell_matpoly(&self, cell: usize) -> Option<&CellMatPoly>;
}

// =========================================================================
// RegionRestriction - 分区限制
// =========================================================================

/// 单元子集（Part）限制
pub trait RegionRestriction: Send + Sync {
    /// 单元是否属于该分区
    fn contains(&self, cell: usize) -> bool;

    /// 分区内单元
    fn cells(&self) -> &[usize];

    /// 分区内与单元共享节点的相邻单元（不含自身）
    fn neighbors(&self, cell: usize) -> &[usize];
}
