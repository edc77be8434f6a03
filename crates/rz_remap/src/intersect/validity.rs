// crates/rz_remap/src/intersect/validity.rs

//! 求交前的几何有效性检查
//!
//! 单元按 side 三角形、对偶单元按 wedge 三角形分解，任一单纯形有向体积为负
//! 即判为无效。诊断信息根据实体整体体积区分翻转/退化与严重非凸两种情形。

use glam::DVec2;
use rz_foundation::{EntityKind, MeshRole, NumericTolerances, RzError, RzResult};
use rz_geo::signed_area;
use rz_mesh::{MaterialPolygon, MeshQuery};
use tracing::error;

/// 检查实体的 side/wedge 分解
///
/// 网格不提供分解时返回配置错误。
pub fn check_entity<M>(
    mesh: &M,
    kind: EntityKind,
    id: usize,
    role: MeshRole,
    tol: &NumericTolerances,
) -> RzResult<()>
where
    M: MeshQuery + ?Sized,
{
    let simplices = match kind {
        EntityKind::Cell => mesh.cell_side_triangles(id),
        EntityKind::Node => mesh.node_wedge_triangles(id),
    }
    .ok_or_else(|| {
        RzError::config(format!(
            "{}不提供{}的 side/wedge 分解，无法进行几何有效性检查",
            role.name(),
            kind.control_volume_name()
        ))
    })?;

    for tri in &simplices {
        let volume = simplex_volume(tri);
        if volume < 0.0 && !tol.is_volume_negligible(volume) {
            let entity_volume = match kind {
                EntityKind::Cell => mesh.cell_volume(id),
                EntityKind::Node => mesh.dual_cell_volume(id),
            };
            error!(
                kind = %kind,
                entity = id,
                role = role.name(),
                simplex_volume = volume,
                entity_volume,
                "分解中出现负体积单纯形"
            );
            return Err(RzError::negative_simplex(
                kind.control_volume_name(),
                id,
                role.name(),
                volume,
                entity_volume,
            ));
        }
    }
    Ok(())
}

/// 检查材料子多边形存储的体积
pub fn check_material_polygon(cell: usize, poly: &MaterialPolygon) -> RzResult<()> {
    let volume = poly.moments().area;
    if volume < 0.0 {
        error!(cell, material = poly.material(), volume, "材料子多边形体积为负");
        return Err(RzError::negative_material_volume(poly.material(), cell, volume));
    }
    Ok(())
}

#[inline]
fn simplex_volume(tri: &[DVec2; 3]) -> f64 {
    signed_area(tri)
}
