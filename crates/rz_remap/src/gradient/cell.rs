// crates/rz_remap/src/gradient/cell.rs

//! 单元中心场的限制梯度
//!
//! 网格场模板在构造时建立（有分区时只覆盖分区单元）；材料场模板在
//! `set_material` 首次切换到某材料时建立，要求已设置界面重构结果。

use crate::config::{BoundaryLimiterType, GradientConfig, LimiterType, ParallelPolicy};
use crate::gradient::traits::{BoundField, GradientStrategy};
use crate::parallel::try_map_entities;
use crate::stencil::{FieldScope, StencilCache, StencilEntry};
use glam::DVec2;
use rz_foundation::{EntityKind, EntityType, NumericTolerances, RzError, RzResult};
use rz_mesh::{FieldType, InterfaceReconstructor, MeshQuery, RegionRestriction, StateQuery};
use tracing::debug;

/// 单元梯度计算器
pub struct CellGradient<'a, M: ?Sized, S: ?Sized> {
    mesh: &'a M,
    state: &'a S,
    interface: Option<&'a dyn InterfaceReconstructor>,
    part: Option<&'a dyn RegionRestriction>,
    tol: NumericTolerances,
    policy: ParallelPolicy,
    cache: StencilCache,
    field: Option<BoundField<'a>>,
    material: Option<usize>,
}

impl<'a, M, S> CellGradient<'a, M, S>
where
    M: MeshQuery + ?Sized,
    S: StateQuery + ?Sized,
{
    /// 创建并构建网格场模板
    pub fn new(
        mesh: &'a M,
        state: &'a S,
        part: Option<&'a dyn RegionRestriction>,
        tol: NumericTolerances,
        config: &GradientConfig,
    ) -> RzResult<Self> {
        let mut gradient = Self {
            mesh,
            state,
            interface: None,
            part,
            tol,
            policy: ParallelPolicy::from(config),
            cache: StencilCache::new(),
            field: None,
            material: None,
        };
        gradient.build(None)?;
        Ok(gradient)
    }

    /// 模板缓存
    pub fn stencils(&self) -> &StencilCache {
        &self.cache
    }

    /// 当前材料
    pub fn material(&self) -> Option<usize> {
        self.material
    }

    fn scope(&self, field: &BoundField<'_>) -> RzResult<FieldScope> {
        match field.field_type {
            FieldType::Mesh => Ok(FieldScope::Mesh),
            FieldType::MultiMaterial => self.material.map(FieldScope::Material).ok_or_else(|| {
                RzError::precondition(format!(
                    "多材料场 {} 求梯度前必须调用 set_material",
                    field.name
                ))
            }),
        }
    }

    /// 模板邻居的场值
    fn stencil_values(
        &self,
        field: &BoundField<'_>,
        values: &[f64],
        entry: &StencilEntry,
    ) -> RzResult<Vec<f64>> {
        entry
            .ids
            .iter()
            .map(|&id| {
                let index = match (field.field_type, self.material) {
                    (FieldType::MultiMaterial, Some(m)) => {
                        self.state.cell_index_in_material(id, m).ok_or_else(|| {
                            RzError::precondition(format!("单元 {id} 不含材料 {m}"))
                        })?
                    }
                    _ => id,
                };
                values
                    .get(index)
                    .copied()
                    .ok_or_else(|| RzError::index_out_of_bounds("Field", index, values.len()))
            })
            .collect()
    }

    /// 限制器使用的控制体顶点
    fn control_vertices(&self, cell: usize, scope: FieldScope) -> Vec<DVec2> {
        if let FieldScope::Material(m) = scope {
            if self.state.cell_materials(cell).len() > 1 {
                if let Some(matpoly) = self.interface.and_then(|ir| ir.cell_matpoly(cell)) {
                    return matpoly
                        .matpolys(m)
                        .flat_map(|p| p.vertices().iter().copied())
                        .collect();
                }
            }
        }
        self.mesh.cell_polygon(cell)
    }
}

impl<'a, M, S> GradientStrategy<'a> for CellGradient<'a, M, S>
where
    M: MeshQuery + ?Sized,
    S: StateQuery + ?Sized,
{
    fn kind(&self) -> EntityKind {
        EntityKind::Cell
    }

    fn set_interface_reconstructor(
        &mut self,
        interface: &'a dyn InterfaceReconstructor,
    ) -> RzResult<()> {
        self.interface = Some(interface);
        // 已建立的材料模板依赖旧的子多边形
        let n_materials = self.state.num_materials();
        for m in 0..n_materials {
            self.cache.invalidate(FieldScope::Material(m));
        }
        match self.material {
            Some(m) => {
                debug!(material = m, "界面重构结果更新，重建当前材料模板");
                self.build(Some(m))
            }
            None => Ok(()),
        }
    }

    fn build(&mut self, material: Option<usize>) -> RzResult<()> {
        self.cache.build_cells(
            self.mesh,
            self.state,
            self.interface,
            self.part,
            material,
            &self.tol,
            self.policy,
        )
    }

    fn set_field(
        &mut self,
        name: &str,
        limiter: LimiterType,
        boundary_limiter: BoundaryLimiterType,
    ) -> RzResult<()> {
        let field_type = self.state.field_type(EntityKind::Cell, name)?;
        let values = match field_type {
            FieldType::Mesh => {
                let data = self.state.mesh_data(EntityKind::Cell, name)?;
                RzError::check_size("cell field", self.mesh.num_cells(), data.len())?;
                Some(data)
            }
            FieldType::MultiMaterial => match self.material {
                Some(m) => Some(self.state.material_data(m, name)?),
                None => None,
            },
        };
        debug!(field = name, ?field_type, ?limiter, ?boundary_limiter, "绑定单元场");
        self.field = Some(BoundField::new(name, field_type, values, limiter, boundary_limiter));
        Ok(())
    }

    fn set_material(&mut self, material: usize) -> RzResult<()> {
        RzError::check_material(material, self.state.num_materials())?;
        if !self.cache.has_scope(FieldScope::Material(material)) {
            self.build(Some(material))?;
        }
        self.material = Some(material);

        if let Some(field) = self.field.as_mut() {
            if field.field_type == FieldType::MultiMaterial {
                field.values = Some(self.state.material_data(material, &field.name)?);
            }
        }
        Ok(())
    }

    fn gradient_at(&self, cell: usize) -> RzResult<DVec2> {
        let field = self
            .field
            .as_ref()
            .ok_or_else(|| RzError::precondition("求梯度前必须调用 set_field"))?;
        RzError::check_index("Cell", cell, self.mesh.num_cells())?;
        if self.mesh.cell_type(cell) != EntityType::Owned {
            return Err(RzError::precondition(format!("单元 {cell} 为幽灵单元")));
        }

        if let Some(part) = self.part {
            if !part.contains(cell) {
                return Ok(DVec2::ZERO);
            }
        }

        let on_boundary = self.mesh.on_exterior_boundary(EntityKind::Cell, cell);
        if on_boundary && field.zero_on_boundary() {
            return Ok(DVec2::ZERO);
        }

        let scope = self.scope(field)?;
        let values = field.values.ok_or_else(|| {
            RzError::precondition(format!("场 {} 尚未绑定材料数据", field.name))
        })?;
        let entry = self.cache.get(scope, cell).ok_or_else(|| {
            RzError::precondition(format!("单元 {cell} 在 {scope:?} 中没有模板"))
        })?;
        if entry.degenerate {
            return Ok(DVec2::ZERO);
        }

        let stencil_values = self.stencil_values(field, values, entry)?;
        let raw = entry.matrices.gradient(&stencil_values);

        if !field.limits(on_boundary) {
            return Ok(raw);
        }
        let vertices = self.control_vertices(cell, scope);
        Ok(field.apply(raw, &stencil_values, entry.reference(), &vertices))
    }

    fn gradients(&self, cells: &[usize]) -> RzResult<Vec<DVec2>> {
        try_map_entities(cells, self.policy, |c| self.gradient_at(c))
    }
}
