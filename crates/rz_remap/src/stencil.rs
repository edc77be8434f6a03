// crates/rz_remap/src/stencil.rs

//! 邻居模板缓存
//!
//! 两级映射 `FieldScope → 实体 → StencilEntry`。网格场模板在梯度计算器
//! 构造时建立；材料场模板在界面重构结果可用后按材料建立。
//!
//! # 代表点
//!
//! | 邻居 | 代表点 |
//! |------|--------|
//! | 纯单元 | 单元质心 |
//! | 混合单元（材料作用域） | 该材料子多边形的体积加权质心 |
//! | 节点 | 节点坐标 |
//!
//! 混合邻居的材料总体积 |V| ≤ `min_absolute_volume` 时被跳过；
//! 实体自身的材料体积退化时模板标记为退化，梯度取零。
//! 混合单元缺少材料子多边形时构建失败（前置条件错误），与求交一致。

use crate::config::ParallelPolicy;
use crate::intersect::MaterialMomentAggregator;
use crate::least_squares::StencilMatrices;
use crate::parallel::try_map_entities;
use glam::DVec2;
use rz_foundation::{EntityFilter, EntityType, NumericTolerances, RzError, RzResult};
use rz_mesh::{InterfaceReconstructor, MeshQuery, RegionRestriction, StateQuery};
use std::collections::HashMap;
use tracing::{debug, info};

// ============================================================================
// 数据结构
// ============================================================================

/// 模板作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldScope {
    /// 网格场
    Mesh,
    /// 某一材料的材料场
    Material(usize),
}

/// 单个实体的模板
#[derive(Debug, Clone, PartialEq)]
pub struct StencilEntry {
    /// 有效邻居编号，首项为实体自身
    pub ids: Vec<usize>,
    /// 代表点，与 `ids` 一一对应
    pub points: Vec<DVec2>,
    /// 最小二乘矩阵
    pub matrices: StencilMatrices,
    /// 实体自身代表点退化（梯度取零）
    pub degenerate: bool,
}

impl StencilEntry {
    fn new(ids: Vec<usize>, points: Vec<DVec2>, tol: &NumericTolerances) -> Self {
        let matrices = StencilMatrices::from_points(&points, tol.pinv_relative_cutoff);
        Self {
            ids,
            points,
            matrices,
            degenerate: false,
        }
    }

    fn degenerate(entity: usize, point: DVec2) -> Self {
        Self {
            ids: vec![entity],
            points: vec![point],
            matrices: StencilMatrices::empty(),
            degenerate: true,
        }
    }

    /// 参考点（实体自身的代表点）
    #[inline]
    pub fn reference(&self) -> DVec2 {
        self.points[0]
    }

    /// 邻居数（不含自身）
    #[inline]
    pub fn num_neighbors(&self) -> usize {
        self.ids.len() - 1
    }
}

/// 模板缓存
#[derive(Debug, Clone, Default)]
pub struct StencilCache {
    scopes: HashMap<FieldScope, HashMap<usize, StencilEntry>>,
}

impl StencilCache {
    /// 创建空缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询实体模板
    pub fn get(&self, scope: FieldScope, entity: usize) -> Option<&StencilEntry> {
        self.scopes.get(&scope)?.get(&entity)
    }

    /// 作用域是否已构建
    pub fn has_scope(&self, scope: FieldScope) -> bool {
        self.scopes.contains_key(&scope)
    }

    /// 作用域内模板数
    pub fn scope_len(&self, scope: FieldScope) -> usize {
        self.scopes.get(&scope).map_or(0, HashMap::len)
    }

    /// 已构建的作用域数
    pub fn num_scopes(&self) -> usize {
        self.scopes.len()
    }

    /// 移除作用域
    pub fn invalidate(&mut self, scope: FieldScope) {
        self.scopes.remove(&scope);
    }

    fn insert_scope(&mut self, scope: FieldScope, entries: Vec<(usize, StencilEntry)>) {
        self.scopes.insert(scope, entries.into_iter().collect());
    }

    // ========================================================================
    // 单元模板
    // ========================================================================

    /// 构建单元模板
    ///
    /// - `material = None`: 网格场模板，覆盖拥有单元（有分区时为分区内拥有单元）
    /// - `material = Some(m)`: 材料 m 的模板，覆盖含 m 的拥有单元，
    ///   要求界面重构结果可用且未设置分区
    #[allow(clippy::too_many_arguments)]
    pub fn build_cells<M, S>(
        &mut self,
        mesh: &M,
        state: &S,
        interface: Option<&dyn InterfaceReconstructor>,
        part: Option<&dyn RegionRestriction>,
        material: Option<usize>,
        tol: &NumericTolerances,
        policy: ParallelPolicy,
    ) -> RzResult<()>
    where
        M: MeshQuery + ?Sized,
        S: StateQuery + ?Sized,
    {
        let owned = |c: &usize| mesh.cell_type(*c) == EntityType::Owned;

        let Some(m) = material else {
            let cells: Vec<usize> = match part {
                Some(p) => p.cells().iter().copied().filter(owned).collect(),
                None => mesh.cells(EntityFilter::Owned),
            };
            let entries = try_map_entities(&cells, policy, |c| {
                let mut ids = vec![c];
                match part {
                    Some(p) => ids.extend_from_slice(p.neighbors(c)),
                    None => ids.extend(mesh.cell_node_adjacent_cells(c, EntityFilter::All)),
                }
                let points = ids.iter().map(|&id| mesh.cell_centroid(id)).collect();
                Ok((c, StencilEntry::new(ids, points, tol)))
            })?;
            info!(cells = entries.len(), partial = part.is_some(), "单元网格场模板构建完成");
            self.insert_scope(FieldScope::Mesh, entries);
            return Ok(());
        };

        RzError::check_material(m, state.num_materials())?;
        if part.is_some() {
            return Err(RzError::config(
                "part-by-part not supported for multi-material remap",
            ));
        }
        let Some(interface) = interface else {
            return Err(RzError::precondition("interface reconstructor not set"));
        };

        let cells: Vec<usize> = state
            .material_cells(m)?
            .iter()
            .copied()
            .filter(owned)
            .collect();

        let aggregator = MaterialMomentAggregator::new(mesh.coordinate_system(), *tol);
        let entries = try_map_entities(&cells, policy, |c| {
            let Some(p0) = material_point(mesh, state, interface, &aggregator, c, m)? else {
                debug!(cell = c, material = m, "单元材料体积退化，梯度置零");
                return Ok((c, StencilEntry::degenerate(c, mesh.cell_centroid(c))));
            };

            let mut ids = vec![c];
            let mut points = vec![p0];
            for nb in mesh.cell_node_adjacent_cells(c, EntityFilter::All) {
                if state.cell_index_in_material(nb, m).is_none() {
                    continue;
                }
                match material_point(mesh, state, interface, &aggregator, nb, m)? {
                    Some(p) => {
                        ids.push(nb);
                        points.push(p);
                    }
                    None => debug!(cell = c, neighbor = nb, material = m, "跳过材料体积退化的邻居"),
                }
            }
            Ok((c, StencilEntry::new(ids, points, tol)))
        })?;

        info!(cells = entries.len(), material = m, "单元材料场模板构建完成");
        self.insert_scope(FieldScope::Material(m), entries);
        Ok(())
    }

    // ========================================================================
    // 节点模板
    // ========================================================================

    /// 构建节点模板（覆盖全部节点，含幽灵节点）
    pub fn build_nodes<M>(
        &mut self,
        mesh: &M,
        tol: &NumericTolerances,
        policy: ParallelPolicy,
    ) -> RzResult<()>
    where
        M: MeshQuery + ?Sized,
    {
        let nodes = mesh.nodes(EntityFilter::All);
        let entries = try_map_entities(&nodes, policy, |n| {
            let mut ids = vec![n];
            ids.extend(mesh.node_adjacent_nodes(n, EntityFilter::All));
            let points = ids.iter().map(|&id| mesh.node_coordinates(id)).collect();
            Ok((n, StencilEntry::new(ids, points, tol)))
        })?;
        info!(nodes = entries.len(), "节点网格场模板构建完成");
        self.insert_scope(FieldScope::Mesh, entries);
        Ok(())
    }
}

/// 单元中材料 m 的代表点
///
/// 纯单元取单元质心；混合单元取子多边形体积加权质心，体积退化时
/// 返回 `Ok(None)`，缺少子多边形时返回前置条件错误。
pub fn material_point<M, S>(
    mesh: &M,
    state: &S,
    interface: &dyn InterfaceReconstructor,
    aggregator: &MaterialMomentAggregator,
    cell: usize,
    material: usize,
) -> RzResult<Option<DVec2>>
where
    M: MeshQuery + ?Sized,
    S: StateQuery + ?Sized,
{
    if state.cell_materials(cell).len() <= 1 {
        return Ok(Some(mesh.cell_centroid(cell)));
    }
    let matpoly = interface.cell_matpoly(cell).ok_or_else(|| {
        RzError::precondition(format!("混合单元 {cell} 缺少材料子多边形"))
    })?;
    Ok(aggregator.centroid(matpoly, material))
}
