// crates/rz_remap/src/gradient/node.rs

//! 节点场的限制梯度
//!
//! 模板覆盖全部节点（含幽灵节点），邻居为共享单元的节点；
//! 限制器控制体取对偶单元顶点。节点梯度只支持网格场。

use crate::config::{BoundaryLimiterType, GradientConfig, LimiterType, ParallelPolicy};
use crate::gradient::traits::{BoundField, GradientStrategy};
use crate::parallel::try_map_entities;
use crate::stencil::{FieldScope, StencilCache};
use glam::DVec2;
use rz_foundation::{EntityKind, NumericTolerances, RzError, RzResult};
use rz_mesh::{FieldType, InterfaceReconstructor, MeshQuery, StateQuery};
use tracing::{debug, warn};

/// 节点梯度计算器
pub struct NodeGradient<'a, M: ?Sized, S: ?Sized> {
    mesh: &'a M,
    state: &'a S,
    tol: NumericTolerances,
    policy: ParallelPolicy,
    cache: StencilCache,
    field: Option<BoundField<'a>>,
}

impl<'a, M, S> NodeGradient<'a, M, S>
where
    M: MeshQuery + ?Sized,
    S: StateQuery + ?Sized,
{
    /// 创建并构建节点模板
    pub fn new(
        mesh: &'a M,
        state: &'a S,
        tol: NumericTolerances,
        config: &GradientConfig,
    ) -> RzResult<Self> {
        let mut gradient = Self {
            mesh,
            state,
            tol,
            policy: ParallelPolicy::from(config),
            cache: StencilCache::new(),
            field: None,
        };
        gradient.build(None)?;
        Ok(gradient)
    }

    /// 模板缓存
    pub fn stencils(&self) -> &StencilCache {
        &self.cache
    }
}

impl<'a, M, S> GradientStrategy<'a> for NodeGradient<'a, M, S>
where
    M: MeshQuery + ?Sized,
    S: StateQuery + ?Sized,
{
    fn kind(&self) -> EntityKind {
        EntityKind::Node
    }

    fn set_interface_reconstructor(
        &mut self,
        _interface: &'a dyn InterfaceReconstructor,
    ) -> RzResult<()> {
        warn!("节点梯度不使用界面重构结果，已忽略");
        Ok(())
    }

    fn build(&mut self, material: Option<usize>) -> RzResult<()> {
        if material.is_some() {
            return Err(RzError::config(
                "multi-material fields not supported for nodal remap",
            ));
        }
        self.cache.build_nodes(self.mesh, &self.tol, self.policy)
    }

    fn set_field(
        &mut self,
        name: &str,
        limiter: LimiterType,
        boundary_limiter: BoundaryLimiterType,
    ) -> RzResult<()> {
        let field_type = self.state.field_type(EntityKind::Node, name)?;
        if field_type == FieldType::MultiMaterial {
            debug!(field = name, "节点上的多材料场");
            return Err(RzError::config(
                "multi-material fields not supported for nodal remap",
            ));
        }
        let data = self.state.mesh_data(EntityKind::Node, name)?;
        RzError::check_size("node field", self.mesh.num_nodes(), data.len())?;
        debug!(field = name, ?limiter, ?boundary_limiter, "绑定节点场");
        self.field = Some(BoundField::new(
            name,
            field_type,
            Some(data),
            limiter,
            boundary_limiter,
        ));
        Ok(())
    }

    fn set_material(&mut self, _material: usize) -> RzResult<()> {
        Err(RzError::config(
            "multi-material fields not supported for nodal remap",
        ))
    }

    fn gradient_at(&self, node: usize) -> RzResult<DVec2> {
        let field = self
            .field
            .as_ref()
            .ok_or_else(|| RzError::precondition("求梯度前必须调用 set_field"))?;
        RzError::check_index("Node", node, self.mesh.num_nodes())?;

        let on_boundary = self.mesh.on_exterior_boundary(EntityKind::Node, node);
        if on_boundary && field.zero_on_boundary() {
            return Ok(DVec2::ZERO);
        }

        let entry = self
            .cache
            .get(FieldScope::Mesh, node)
            .ok_or_else(|| RzError::precondition(format!("节点 {node} 没有模板")))?;
        let values = field.values.unwrap_or_default();
        let stencil_values = entry
            .ids
            .iter()
            .map(|&id| {
                values
                    .get(id)
                    .copied()
                    .ok_or_else(|| RzError::index_out_of_bounds("Field", id, values.len()))
            })
            .collect::<RzResult<Vec<f64>>>()?;
        let raw = entry.matrices.gradient(&stencil_values);

        if !field.limits(on_boundary) {
            return Ok(raw);
        }
        let vertices = self.mesh.dual_cell_polygon(node);
        Ok(field.apply(raw, &stencil_values, entry.reference(), &vertices))
    }

    fn gradients(&self, nodes: &[usize]) -> RzResult<Vec<DVec2>> {
        try_map_entities(nodes, self.policy, |n| self.gradient_at(n))
    }
}
