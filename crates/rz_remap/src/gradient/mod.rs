// crates/rz_remap/src/gradient/mod.rs

//! 限制梯度模块
//!
//! - [`CellGradient`]: 单元中心场（网格场、多材料场、分区）
//! - [`NodeGradient`]: 节点场（仅网格场）
//! - [`SlopeLimiter`]: 梯度限制器（无限制 / Barth-Jespersen）
//!
//! 通过 [`create_gradient`] 按实体种类选择策略。

mod cell;
mod limiter;
mod node;
mod traits;

pub use cell::CellGradient;
pub use limiter::{create_limiter, BarthJespersen, LimiterContext, NoLimiter, SlopeLimiter};
pub use node::NodeGradient;
pub use traits::GradientStrategy;

use crate::config::RemapConfig;
use rz_foundation::{EntityKind, RzError, RzResult};
use rz_mesh::{MeshQuery, RegionRestriction, StateQuery};
use tracing::info;

/// 按实体种类创建梯度策略
///
/// 节点梯度不支持分区：传入 `part` 时返回配置错误。
pub fn create_gradient<'a, M, S>(
    kind: EntityKind,
    mesh: &'a M,
    state: &'a S,
    part: Option<&'a dyn RegionRestriction>,
    config: &RemapConfig,
) -> RzResult<Box<dyn GradientStrategy<'a> + 'a>>
where
    M: MeshQuery + ?Sized,
    S: StateQuery + ?Sized,
{
    config.validate()?;
    info!(?kind, partial = part.is_some(), "创建梯度策略");
    match kind {
        EntityKind::Cell => Ok(Box::new(CellGradient::new(
            mesh,
            state,
            part,
            config.tolerances,
            &config.gradient,
        )?)),
        EntityKind::Node => {
            if part.is_some() {
                return Err(RzError::config("part-by-part not supported for nodal remap"));
            }
            Ok(Box::new(NodeGradient::new(
                mesh,
                state,
                config.tolerances,
                &config.gradient,
            )?))
        }
    }
}
