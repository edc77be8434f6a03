// crates/rz_mesh/src/matpoly.rs

//! 材料子多边形
//!
//! 界面重构把混合单元划分为若干材料子多边形，每个子多边形归属单一材料，
//! 构造后不可变。[`MatPolySet`] 是按单元索引的参考实现；
//! [`MatPolySet::split_by_line`] 用一条直线界面切分网格，供测试与演示使用。

use crate::traits::{InterfaceReconstructor, MeshQuery};
use glam::DVec2;
use rz_foundation::{RzError, RzResult};
use rz_geo::clip::{clip_by_half_plane, HalfPlane};
use rz_geo::{polygon_moments, Moments};
use std::collections::HashMap;
use tracing::debug;

// ============================================================================
// MaterialPolygon
// ============================================================================

/// 单一材料的子多边形
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialPolygon {
    material: usize,
    vertices: Vec<DVec2>,
    moments: Moments,
}

impl MaterialPolygon {
    /// 从逆时针顶点创建，矩按平面公式计算
    pub fn new(material: usize, vertices: Vec<DVec2>) -> Self {
        let moments = polygon_moments(&vertices);
        Self {
            material,
            vertices,
            moments,
        }
    }

    /// 使用外部给定的矩创建（界面重构已计算矩时使用）
    pub fn with_moments(material: usize, vertices: Vec<DVec2>, moments: Moments) -> Self {
        Self {
            material,
            vertices,
            moments,
        }
    }

    /// 所属材料
    #[inline]
    pub fn material(&self) -> usize {
        self.material
    }

    /// 顶点
    #[inline]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// 矩 [体积, Σx, Σy]
    #[inline]
    pub fn moments(&self) -> Moments {
        self.moments
    }
}

// ============================================================================
// CellMatPoly
// ============================================================================

/// 单元的材料子多边形集合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellMatPoly {
    cell: usize,
    polys: Vec<MaterialPolygon>,
}

impl CellMatPoly {
    /// 创建空集合
    pub fn new(cell: usize) -> Self {
        Self {
            cell,
            polys: Vec::new(),
        }
    }

    /// 添加子多边形
    pub fn push(&mut self, poly: MaterialPolygon) {
        self.polys.push(poly);
    }

    /// 所属单元
    #[inline]
    pub fn cell(&self) -> usize {
        self.cell
    }

    /// 全部子多边形
    #[inline]
    pub fn polygons(&self) -> &[MaterialPolygon] {
        &self.polys
    }

    /// 单元中出现的材料（升序，去重）
    pub fn cell_matids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.polys.iter().map(|p| p.material).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// 材料数量
    pub fn num_materials(&self) -> usize {
        self.cell_matids().len()
    }

    /// 单元是否含有该材料
    pub fn is_cell_material(&self, material: usize) -> bool {
        self.polys.iter().any(|p| p.material == material)
    }

    /// 某一材料的子多边形
    pub fn matpolys(&self, material: usize) -> impl Iterator<Item = &MaterialPolygon> + '_ {
        self.polys.iter().filter(move |p| p.material == material)
    }

    /// 某一材料子多边形矩之和
    pub fn material_moments(&self, material: usize) -> Moments {
        self.matpolys(material).map(MaterialPolygon::moments).sum()
    }
}

// ============================================================================
// MatPolySet
// ============================================================================

/// 按单元索引的界面重构结果
#[derive(Debug, Clone, Default)]
pub struct MatPolySet {
    cells: HashMap<usize, CellMatPoly>,
    material_cells: Vec<Vec<usize>>,
}

impl MatPolySet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入单元的子多边形集合
    pub fn insert(&mut self, matpoly: CellMatPoly) {
        for m in matpoly.cell_matids() {
            if self.material_cells.len() <= m {
                self.material_cells.resize(m + 1, Vec::new());
            }
            self.material_cells[m].push(matpoly.cell);
        }
        self.cells.insert(matpoly.cell, matpoly);
    }

    /// 混合单元数
    pub fn num_mixed_cells(&self) -> usize {
        self.cells.len()
    }

    /// 含有某材料的混合单元
    pub fn mixed_cells_of(&self, material: usize) -> &[usize] {
        self.material_cells
            .get(material)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 用直线界面切分网格
    ///
    /// 直线 a→b 左侧为材料 `left`，右侧为材料 `right`。被直线穿过的单元成为
    /// 混合单元并记录两个子多边形；其余单元为纯单元，不进入集合。
    /// 返回值的第二项是每个材料所占单元（含纯单元），按单元编号升序，
    /// 可直接用于设置状态的材料分布。
    pub fn split_by_line<M: MeshQuery + ?Sized>(
        mesh: &M,
        a: DVec2,
        b: DVec2,
        left: usize,
        right: usize,
        min_volume: f64,
    ) -> RzResult<(Self, Vec<Vec<usize>>)> {
        if left == right {
            return Err(RzError::config("直线界面两侧材料必须不同"));
        }
        if a == b {
            return Err(RzError::config("直线界面的两个端点重合"));
        }

        let inside = HalfPlane::left_of(a, b);
        let outside = HalfPlane {
            normal: -inside.normal,
            offset: -inside.offset,
        };

        let n_materials = left.max(right) + 1;
        let mut occupancy = vec![Vec::new(); n_materials];
        let mut set = Self::new();

        for cell in 0..mesh.num_cells() {
            let poly = mesh.cell_polygon(cell);
            let left_part = clip_by_half_plane(&poly, &inside);
            let right_part = clip_by_half_plane(&poly, &outside);
            let left_vol = polygon_moments(&left_part).area;
            let right_vol = polygon_moments(&right_part).area;

            let has_left = left_vol > min_volume;
            let has_right = right_vol > min_volume;
            if has_left {
                occupancy[left].push(cell);
            }
            if has_right {
                occupancy[right].push(cell);
            }
            if has_left && has_right {
                let mut matpoly = CellMatPoly::new(cell);
                matpoly.push(MaterialPolygon::new(left, left_part));
                matpoly.push(MaterialPolygon::new(right, right_part));
                set.insert(matpoly);
            }
        }

        debug!(mixed = set.num_mixed_cells(), "直线界面切分完成");
        Ok((set, occupancy))
    }
}

impl InterfaceReconstructor for MatPolySet {
    fn cell_matpoly(&self, cell: usize) -> Option<&CellMatPoly> {
        self.cells.get(&cell)
    }
}
