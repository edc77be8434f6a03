// crates/rz_mesh/src/simple.rs

//! 结构化四边形参考网格
//!
//! 矩形域上的 nx × ny 四边形网格，数据按 SoA 布局存储。
//! 节点按行主序编号 `n(i, j) = j (nx+1) + i`，单元编号 `c(i, j) = j nx + i`，
//! 单元顶点逆时针排列 `[n(i,j), n(i+1,j), n(i+1,j+1), n(i,j+1)]`。
//!
//! 对偶单元由节点周围各单元的"边中点 – 单元质心 – 边中点"折线拼接而成；
//! 边界节点的对偶单元额外包含节点自身。
//!
//! 生成后可移动节点（构造翻转/非凸单元）、标记幽灵实体、切换坐标系，
//! 以及关闭 side/wedge 分解能力。

use crate::traits::MeshQuery;
use glam::DVec2;
use rz_foundation::{EntityFilter, EntityKind, EntityType, RzError, RzResult};
use rz_geo::{polygon_moments, CoordinateSystem};
use rz_geo::moments::vertex_average;
use tracing::debug;

/// 结构化四边形网格
#[derive(Debug, Clone)]
pub struct SimpleMesh {
    /// x 方向单元数
    nx: usize,
    /// y 方向单元数
    ny: usize,
    /// 节点坐标
    coords: Vec<DVec2>,
    /// 单元顶点（逆时针）
    cell_nodes: Vec<[usize; 4]>,
    /// 节点周围单元（逆时针，边界节点从缺口之后开始）
    node_cells: Vec<Vec<usize>>,
    /// 单元归属
    cell_types: Vec<EntityType>,
    /// 节点归属
    node_types: Vec<EntityType>,
    /// 坐标系
    coord_sys: CoordinateSystem,
    /// 是否提供 side/wedge 分解
    decompositions: bool,
}

impl SimpleMesh {
    /// 在 [x0, x1] × [y0, y1] 上生成 nx × ny 网格
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64, nx: usize, ny: usize) -> RzResult<Self> {
        if nx == 0 || ny == 0 {
            return Err(RzError::config(format!("网格尺寸必须为正: {nx} x {ny}")));
        }
        if !(x1 > x0 && y1 > y0) {
            return Err(RzError::config(format!(
                "无效的矩形域: [{x0}, {x1}] x [{y0}, {y1}]"
            )));
        }

        let dx = (x1 - x0) / nx as f64;
        let dy = (y1 - y0) / ny as f64;
        let node_id = |i: usize, j: usize| j * (nx + 1) + i;

        let mut coords = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..=ny {
            for i in 0..=nx {
                coords.push(DVec2::new(x0 + i as f64 * dx, y0 + j as f64 * dy));
            }
        }

        let mut cell_nodes = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                cell_nodes.push([
                    node_id(i, j),
                    node_id(i + 1, j),
                    node_id(i + 1, j + 1),
                    node_id(i, j + 1),
                ]);
            }
        }

        let node_cells = (0..=ny)
            .flat_map(|j| (0..=nx).map(move |i| (i, j)))
            .map(|(i, j)| ordered_node_cells(i, j, nx, ny))
            .collect();

        let n_cells = nx * ny;
        let n_nodes = coords.len();
        debug!(nx, ny, n_cells, n_nodes, "生成结构化四边形网格");

        Ok(Self {
            nx,
            ny,
            coords,
            cell_nodes,
            node_cells,
            cell_types: vec![EntityType::Owned; n_cells],
            node_types: vec![EntityType::Owned; n_nodes],
            coord_sys: CoordinateSystem::Cartesian,
            decompositions: true,
        })
    }

    /// 单位正方形上的 n × n 网格
    pub fn unit_square(n: usize) -> RzResult<Self> {
        Self::new(0.0, 0.0, 1.0, 1.0, n, n)
    }

    /// 设置坐标系
    pub fn with_coordinate_system(mut self, coord_sys: CoordinateSystem) -> Self {
        self.coord_sys = coord_sys;
        self
    }

    /// 标记幽灵单元
    pub fn with_ghost_cells(mut self, cells: &[usize]) -> RzResult<Self> {
        for &c in cells {
            RzError::check_index("Cell", c, self.cell_types.len())?;
            self.cell_types[c] = EntityType::Ghost;
        }
        Ok(self)
    }

    /// 标记幽灵节点
    pub fn with_ghost_nodes(mut self, nodes: &[usize]) -> RzResult<Self> {
        for &n in nodes {
            RzError::check_index("Node", n, self.node_types.len())?;
            self.node_types[n] = EntityType::Ghost;
        }
        Ok(self)
    }

    /// 关闭 side/wedge 分解能力
    pub fn without_decompositions(mut self) -> Self {
        self.decompositions = false;
        self
    }

    /// 移动节点
    pub fn move_node(&mut self, node: usize, position: DVec2) -> RzResult<()> {
        RzError::check_index("Node", node, self.coords.len())?;
        self.coords[node] = position;
        Ok(())
    }

    /// x 方向单元数
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// y 方向单元数
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// 按 (i, j) 取节点编号
    #[inline]
    pub fn node_at(&self, i: usize, j: usize) -> usize {
        j * (self.nx + 1) + i
    }

    /// 按 (i, j) 取单元编号
    #[inline]
    pub fn cell_at(&self, i: usize, j: usize) -> usize {
        j * self.nx + i
    }

    /// 单元顶点编号
    #[inline]
    pub fn cell_node_ids(&self, cell: usize) -> &[usize; 4] {
        &self.cell_nodes[cell]
    }

    /// 节点周围单元（逆时针）
    #[inline]
    pub fn node_cell_ids(&self, node: usize) -> &[usize] {
        &self.node_cells[node]
    }

    /// 节点在单元顶点中的局部位置
    fn local_index(&self, cell: usize, node: usize) -> Option<usize> {
        self.cell_nodes[cell].iter().position(|&v| v == node)
    }

    fn node_ij(&self, node: usize) -> (usize, usize) {
        (node % (self.nx + 1), node / (self.nx + 1))
    }

    fn cell_ij(&self, cell: usize) -> (usize, usize) {
        (cell % self.nx, cell / self.nx)
    }

    /// 节点 n 与单元内前后相邻顶点的边中点
    ///
    /// 返回 (mid(n, v_{k+1}), mid(v_{k-1}, n))，分别为绕节点逆时针方向上
    /// 单元之前与之后的边。
    fn half_edge_midpoints(&self, cell: usize, k: usize) -> (DVec2, DVec2) {
        let nodes = &self.cell_nodes[cell];
        let p = self.coords[nodes[k]];
        let next = self.coords[nodes[(k + 1) % 4]];
        let prev = self.coords[nodes[(k + 3) % 4]];
        (0.5 * (p + next), 0.5 * (prev + p))
    }
}

/// 节点 (i, j) 周围单元的逆时针序列
///
/// 候选顺序为右上、左上、左下、右下；边界节点从缺口后的第一个单元开始，
/// 使序列在角度上连续。
fn ordered_node_cells(i: usize, j: usize, nx: usize, ny: usize) -> Vec<usize> {
    let cell = |ci: isize, cj: isize| -> Option<usize> {
        if ci < 0 || cj < 0 || ci >= nx as isize || cj >= ny as isize {
            None
        } else {
            Some(cj as usize * nx + ci as usize)
        }
    };
    let (i, j) = (i as isize, j as isize);
    let slots = [
        cell(i, j),
        cell(i - 1, j),
        cell(i - 1, j - 1),
        cell(i, j - 1),
    ];

    let start = (0..4)
        .find(|&k| slots[k].is_some() && slots[(k + 3) % 4].is_none())
        .unwrap_or(0);
    (0..4).filter_map(|k| slots[(start + k) % 4]).collect()
}

impl MeshQuery for SimpleMesh {
    fn num_cells(&self) -> usize {
        self.cell_nodes.len()
    }

    fn num_nodes(&self) -> usize {
        self.coords.len()
    }

    fn cell_type(&self, cell: usize) -> EntityType {
        self.cell_types[cell]
    }

    fn node_type(&self, node: usize) -> EntityType {
        self.node_types[node]
    }

    fn cell_centroid(&self, cell: usize) -> DVec2 {
        let poly = self.cell_polygon(cell);
        polygon_moments(&poly)
            .centroid()
            .unwrap_or_else(|| vertex_average(&poly))
    }

    fn node_coordinates(&self, node: usize) -> DVec2 {
        self.coords[node]
    }

    fn cell_polygon(&self, cell: usize) -> Vec<DVec2> {
        self.cell_nodes[cell].iter().map(|&n| self.coords[n]).collect()
    }

    fn dual_cell_polygon(&self, node: usize) -> Vec<DVec2> {
        let mut poly: Vec<DVec2> = Vec::with_capacity(9);
        if self.on_exterior_boundary(EntityKind::Node, node) {
            poly.push(self.coords[node]);
        }
        for &c in &self.node_cells[node] {
            let Some(k) = self.local_index(c, node) else {
                continue;
            };
            let (before, after) = self.half_edge_midpoints(c, k);
            if poly.last() != Some(&before) {
                poly.push(before);
            }
            poly.push(self.cell_centroid(c));
            poly.push(after);
        }
        // 内部节点首尾中点重合
        if poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }
        poly
    }

    fn coordinate_system(&self) -> CoordinateSystem {
        self.coord_sys
    }

    fn cell_node_adjacent_cells(&self, cell: usize, filter: EntityFilter) -> Vec<usize> {
        let mut adj: Vec<usize> = self.cell_nodes[cell]
            .iter()
            .flat_map(|&n| self.node_cells[n].iter().copied())
            .filter(|&c| c != cell && filter.accepts(self.cell_types[c]))
            .collect();
        adj.sort_unstable();
        adj.dedup();
        adj
    }

    fn node_adjacent_nodes(&self, node: usize, filter: EntityFilter) -> Vec<usize> {
        let mut adj: Vec<usize> = self.node_cells[node]
            .iter()
            .flat_map(|&c| self.cell_nodes[c].iter().copied())
            .filter(|&n| n != node && filter.accepts(self.node_types[n]))
            .collect();
        adj.sort_unstable();
        adj.dedup();
        adj
    }

    fn on_exterior_boundary(&self, kind: EntityKind, id: usize) -> bool {
        match kind {
            EntityKind::Cell => {
                let (i, j) = self.cell_ij(id);
                i == 0 || j == 0 || i + 1 == self.nx || j + 1 == self.ny
            }
            EntityKind::Node => {
                let (i, j) = self.node_ij(id);
                i == 0 || j == 0 || i == self.nx || j == self.ny
            }
        }
    }

    fn cell_side_triangles(&self, cell: usize) -> Option<Vec<[DVec2; 3]>> {
        if !self.decompositions {
            return None;
        }
        let poly = self.cell_polygon(cell);
        let c = self.cell_centroid(cell);
        let n = poly.len();
        Some((0..n).map(|k| [poly[k], poly[(k + 1) % n], c]).collect())
    }

    fn node_wedge_triangles(&self, node: usize) -> Option<Vec<[DVec2; 3]>> {
        if !self.decompositions {
            return None;
        }
        let p = self.coords[node];
        let mut wedges = Vec::with_capacity(2 * self.node_cells[node].len());
        for &c in &self.node_cells[node] {
            let Some(k) = self.local_index(c, node) else {
                continue;
            };
            let (before, after) = self.half_edge_midpoints(c, k);
            let centroid = self.cell_centroid(c);
            wedges.push([p, before, centroid]);
            wedges.push([after, p, centroid]);
        }
        Some(wedges)
    }
}
