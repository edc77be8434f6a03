// crates/rz_remap/src/intersect/r2d.rs

//! 二维实体求交驱动
//!
//! 对每个目标实体，与候选源实体逐一求交，输出体积为正的交集矩。
//!
//! # 裁剪方向
//!
//! | 目标凸性 | 被裁剪 | 裁剪边界 |
//! |----------|--------|----------|
//! | 凸 | 源多边形 | 目标多边形（半平面） |
//! | 非凸 | 目标多边形 | 源多边形（凸时半平面，否则扇形三角剖分） |
//!
//! 设置材料后，纯源单元用整个单元多边形，混合源单元对该材料的各个
//! 子多边形分别求交后求和，不含该材料的源单元没有贡献。

use super::material::MaterialMomentAggregator;
use super::validity::check_entity;
use super::weight::Weight;
use crate::config::{ParallelPolicy, RemapConfig};
use crate::parallel::try_map_entities;
use glam::DVec2;
use rz_foundation::{EntityKind, MeshRole, NumericTolerances, RzError, RzResult};
use rz_geo::{intersect_polygons, is_convex, CoordinateSystem, Moments};
use rz_mesh::{InterfaceReconstructor, MeshQuery, StateQuery};
use tracing::{debug, info};

/// 二维求交器
pub struct IntersectR2D<'a, SM: ?Sized, TM: ?Sized> {
    source: &'a SM,
    target: &'a TM,
    state: Option<&'a dyn StateQuery>,
    interface: Option<&'a dyn InterfaceReconstructor>,
    material: Option<usize>,
    coord_sys: CoordinateSystem,
    aggregator: MaterialMomentAggregator,
    tol: NumericTolerances,
    validate: bool,
    policy: ParallelPolicy,
}

impl<'a, SM, TM> IntersectR2D<'a, SM, TM>
where
    SM: MeshQuery + ?Sized,
    TM: MeshQuery + ?Sized,
{
    /// 创建求交器
    ///
    /// 源网格与目标网格坐标系不一致时返回配置错误。
    pub fn new(source: &'a SM, target: &'a TM, config: &RemapConfig) -> RzResult<Self> {
        config.validate()?;
        let source_sys = source.coordinate_system();
        let target_sys = target.coordinate_system();
        if source_sys != target_sys {
            return Err(RzError::coordinate_mismatch(source_sys.name(), target_sys.name()));
        }
        info!(
            coord_sys = source_sys.name(),
            validate = config.intersect.validate_geometry,
            "创建二维求交器"
        );
        Ok(Self {
            source,
            target,
            state: None,
            interface: None,
            material: None,
            coord_sys: source_sys,
            aggregator: MaterialMomentAggregator::new(source_sys, config.tolerances)
                .with_validation(config.intersect.validate_geometry),
            tol: config.tolerances,
            validate: config.intersect.validate_geometry,
            policy: ParallelPolicy::from(&config.intersect),
        })
    }

    /// 设置源网格状态（多材料求交需要）
    pub fn with_state(mut self, state: &'a dyn StateQuery) -> Self {
        self.state = Some(state);
        self
    }

    /// 设置界面重构结果
    pub fn set_interface_reconstructor(&mut self, interface: &'a dyn InterfaceReconstructor) {
        self.interface = Some(interface);
    }

    /// 设置当前材料（`None` 为整单元求交）
    pub fn set_material(&mut self, material: Option<usize>) -> RzResult<()> {
        if let Some(m) = material {
            let state = self
                .state
                .ok_or_else(|| RzError::precondition("多材料求交需要源网格状态"))?;
            RzError::check_material(m, state.num_materials())?;
        }
        self.material = material;
        Ok(())
    }

    /// 当前材料
    pub fn material(&self) -> Option<usize> {
        self.material
    }

    /// 计算所用坐标系
    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coord_sys
    }

    /// 按实体种类求交
    pub fn intersect(
        &self,
        kind: EntityKind,
        target: usize,
        candidates: &[usize],
    ) -> RzResult<Vec<Weight>> {
        match kind {
            EntityKind::Cell => self.intersect_cell(target, candidates),
            EntityKind::Node => self.intersect_node(target, candidates),
        }
    }

    /// 目标单元与候选源单元求交
    pub fn intersect_cell(&self, target: usize, candidates: &[usize]) -> RzResult<Vec<Weight>> {
        RzError::check_index("Cell", target, self.target.num_cells())?;
        if self.validate {
            check_entity(self.target, EntityKind::Cell, target, MeshRole::Target, &self.tol)?;
        }
        let target_poly = self.target.cell_polygon(target);
        let target_convex = is_convex(&target_poly, self.tol.min_absolute_distance);

        let mut weights = Vec::with_capacity(candidates.len());
        for &s in candidates {
            RzError::check_index("Cell", s, self.source.num_cells())?;
            if self.validate {
                check_entity(self.source, EntityKind::Cell, s, MeshRole::Source, &self.tol)?;
            }
            let moments = match self.material {
                None => Some(self.overlap(&self.source.cell_polygon(s), &target_poly, target_convex)),
                Some(m) => self.material_overlap(s, m, &target_poly, target_convex)?,
            };
            push_positive(&mut weights, s, moments);
        }
        Ok(weights)
    }

    /// 目标对偶单元与候选源对偶单元求交
    pub fn intersect_node(&self, target: usize, candidates: &[usize]) -> RzResult<Vec<Weight>> {
        if self.material.is_some() {
            return Err(RzError::config(
                "multi-material remap not supported for nodal remap",
            ));
        }
        RzError::check_index("Node", target, self.target.num_nodes())?;
        if self.validate {
            check_entity(self.target, EntityKind::Node, target, MeshRole::Target, &self.tol)?;
        }
        let target_poly = self.target.dual_cell_polygon(target);
        let target_convex = is_convex(&target_poly, self.tol.min_absolute_distance);

        let mut weights = Vec::with_capacity(candidates.len());
        for &s in candidates {
            RzError::check_index("Node", s, self.source.num_nodes())?;
            if self.validate {
                check_entity(self.source, EntityKind::Node, s, MeshRole::Source, &self.tol)?;
            }
            let moments = self.overlap(&self.source.dual_cell_polygon(s), &target_poly, target_convex);
            push_positive(&mut weights, s, Some(moments));
        }
        Ok(weights)
    }

    /// 批量求交，`candidates[i]` 为 `targets[i]` 的候选源实体
    ///
    /// 输出顺序与 `targets` 一致。
    pub fn intersect_all(
        &self,
        kind: EntityKind,
        targets: &[usize],
        candidates: &[Vec<usize>],
    ) -> RzResult<Vec<Vec<Weight>>> {
        RzError::check_size("candidates", targets.len(), candidates.len())?;
        let slots: Vec<usize> = (0..targets.len()).collect();
        let weights = try_map_entities(&slots, self.policy, |i| {
            self.intersect(kind, targets[i], &candidates[i])
        })?;
        info!(
            kind = %kind,
            targets = targets.len(),
            material = ?self.material,
            "批量求交完成"
        );
        Ok(weights)
    }

    fn overlap(&self, source_poly: &[DVec2], target_poly: &[DVec2], target_convex: bool) -> Moments {
        if target_convex {
            intersect_polygons(source_poly, target_poly, true, self.coord_sys)
        } else {
            let source_convex = is_convex(source_poly, self.tol.min_absolute_distance);
            intersect_polygons(target_poly, source_poly, source_convex, self.coord_sys)
        }
    }

    fn material_overlap(
        &self,
        source: usize,
        material: usize,
        target_poly: &[DVec2],
        target_convex: bool,
    ) -> RzResult<Option<Moments>> {
        let state = self
            .state
            .ok_or_else(|| RzError::precondition("多材料求交需要源网格状态"))?;
        if state.cell_index_in_material(source, material).is_none() {
            return Ok(None);
        }
        if state.cell_materials(source).len() <= 1 {
            let poly = self.source.cell_polygon(source);
            return Ok(Some(self.overlap(&poly, target_poly, target_convex)));
        }

        let interface = self
            .interface
            .ok_or_else(|| RzError::precondition("interface reconstructor not set"))?;
        let matpoly = interface.cell_matpoly(source).ok_or_else(|| {
            RzError::precondition(format!("混合单元 {source} 缺少材料子多边形"))
        })?;
        self.aggregator
            .intersect(matpoly, material, target_poly, target_convex)
    }
}

fn push_positive(weights: &mut Vec<Weight>, entity: usize, moments: Option<Moments>) {
    match moments {
        Some(m) if m.area > 0.0 => weights.push(Weight::new(entity, m)),
        Some(m) => debug!(entity, area = m.area, "丢弃非正体积的交集"),
        None => {}
    }
}
