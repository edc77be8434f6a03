// crates/rz_remap/src/gradient/traits.rs

//! 梯度策略 trait 与共享状态
//!
//! 单元与节点两种实体各有一个策略实现，调用顺序为：
//!
//! 1. 构造（建立网格场模板）
//! 2. `set_interface_reconstructor`（仅多材料单元场需要）
//! 3. `set_field` 绑定场与限制器
//! 4. `set_material`（多材料场）
//! 5. `gradient_at` / `gradients`

use crate::config::{BoundaryLimiterType, LimiterType};
use crate::gradient::limiter::{create_limiter, LimiterContext, SlopeLimiter};
use glam::DVec2;
use rz_foundation::{EntityKind, RzResult};
use rz_mesh::{FieldType, InterfaceReconstructor};

/// 梯度计算策略
pub trait GradientStrategy<'a>: Send + Sync {
    /// 实体种类
    fn kind(&self) -> EntityKind;

    /// 设置界面重构结果（多材料场的前置条件）
    ///
    /// 已建立的材料模板随之失效；当前材料的模板立即按新结果重建。
    fn set_interface_reconstructor(
        &mut self,
        interface: &'a dyn InterfaceReconstructor,
    ) -> RzResult<()>;

    /// 构建模板作用域（`None` 为网格场，`Some(m)` 为材料 m）
    fn build(&mut self, material: Option<usize>) -> RzResult<()>;

    /// 绑定待求梯度的场与限制器
    fn set_field(
        &mut self,
        name: &str,
        limiter: LimiterType,
        boundary_limiter: BoundaryLimiterType,
    ) -> RzResult<()>;

    /// 切换当前材料（多材料场）
    fn set_material(&mut self, material: usize) -> RzResult<()>;

    /// 实体的限制梯度
    fn gradient_at(&self, entity: usize) -> RzResult<DVec2>;

    /// 批量计算，输出顺序与输入一致
    fn gradients(&self, entities: &[usize]) -> RzResult<Vec<DVec2>>;
}

/// 已绑定的场
#[derive(Debug)]
pub(crate) struct BoundField<'a> {
    /// 场名
    pub name: String,
    /// 场类型
    pub field_type: FieldType,
    /// 场数据（材料场在 `set_material` 之前为 None）
    pub values: Option<&'a [f64]>,
    /// 内部限制器类型
    pub limiter_type: LimiterType,
    /// 边界策略
    pub boundary_limiter: BoundaryLimiterType,
    /// 限制器实例
    pub limiter: Box<dyn SlopeLimiter>,
}

impl<'a> BoundField<'a> {
    pub fn new(
        name: &str,
        field_type: FieldType,
        values: Option<&'a [f64]>,
        limiter_type: LimiterType,
        boundary_limiter: BoundaryLimiterType,
    ) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            values,
            limiter_type,
            boundary_limiter,
            limiter: create_limiter(limiter_type),
        }
    }

    /// 边界实体的梯度是否直接置零
    #[inline]
    pub fn zero_on_boundary(&self) -> bool {
        self.boundary_limiter == BoundaryLimiterType::ZeroGradient
    }

    /// 是否对实体施加限制
    ///
    /// 内部限制器为 BJ，且实体为内部实体或边界策略同为 BJ。
    #[inline]
    pub fn limits(&self, on_boundary: bool) -> bool {
        self.limiter_type == LimiterType::BarthJespersen
            && (!on_boundary || self.boundary_limiter == BoundaryLimiterType::BarthJespersen)
    }

    /// 对原始梯度施加限制
    pub fn apply(&self, raw: DVec2, values: &[f64], reference: DVec2, vertices: &[DVec2]) -> DVec2 {
        let ctx = LimiterContext::from_stencil(values, reference, vertices);
        self.limiter.limit(raw, &ctx)
    }
}
