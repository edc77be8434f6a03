// crates/rz_remap/src/intersect/material.rs

//! 多材料矩聚合
//!
//! 混合源单元对材料 m 的贡献为其各个 m 子多边形与目标多边形交集矩之和。
//! 同一聚合也给出模板使用的材料体积加权质心。

use super::validity::check_material_polygon;
use glam::DVec2;
use rz_foundation::{NumericTolerances, RzResult};
use rz_geo::{intersect_polygons, is_convex, CoordinateSystem, Moments};
use rz_mesh::CellMatPoly;

/// 材料矩聚合器
#[derive(Debug, Clone, Copy)]
pub struct MaterialMomentAggregator {
    coord_sys: CoordinateSystem,
    tol: NumericTolerances,
    validate: bool,
}

impl MaterialMomentAggregator {
    /// 创建聚合器（子多边形体积检查默认随 `debug_assertions`）
    pub fn new(coord_sys: CoordinateSystem, tol: NumericTolerances) -> Self {
        Self {
            coord_sys,
            tol,
            validate: cfg!(debug_assertions),
        }
    }

    /// 开关子多边形体积检查
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// 混合单元中材料 m 与目标多边形的交集矩
    ///
    /// 单元不含该材料时返回 None。开启检查时，子多边形存储体积为负
    /// 返回几何有效性错误；关闭时不检查。
    pub fn intersect(
        &self,
        matpoly: &CellMatPoly,
        material: usize,
        target: &[DVec2],
        target_is_convex: bool,
    ) -> RzResult<Option<Moments>> {
        if !matpoly.is_cell_material(material) {
            return Ok(None);
        }
        let mut total = Moments::ZERO;
        for poly in matpoly.matpolys(material) {
            if self.validate {
                check_material_polygon(matpoly.cell(), poly)?;
            }
            total += if target_is_convex {
                intersect_polygons(poly.vertices(), target, true, self.coord_sys)
            } else {
                let convex = is_convex(poly.vertices(), self.tol.min_absolute_distance);
                intersect_polygons(target, poly.vertices(), convex, self.coord_sys)
            };
        }
        Ok(Some(total))
    }

    /// 材料 m 的体积加权质心
    ///
    /// 总体积 |V| ≤ `min_absolute_volume` 时返回 None。
    pub fn centroid(&self, matpoly: &CellMatPoly, material: usize) -> Option<DVec2> {
        let moments = matpoly.material_moments(material);
        if self.tol.is_volume_negligible(moments.area) {
            return None;
        }
        moments.centroid()
    }
}
