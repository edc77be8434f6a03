// crates/rz_mesh/src/part.rs

//! 单元分区（Part）
//!
//! 分区是网格单元的子集，邻居关系只在分区内部成立。

use crate::traits::{MeshQuery, RegionRestriction};
use rz_foundation::{EntityFilter, RzError, RzResult};

/// 单元分区
#[derive(Debug, Clone)]
pub struct Part {
    /// 分区内单元（升序）
    cells: Vec<usize>,
    /// 成员标记（按网格单元编号）
    member: Vec<bool>,
    /// 分区内邻居（按网格单元编号，非成员为空）
    neighbors: Vec<Vec<usize>>,
}

impl Part {
    /// 由单元列表构建分区
    pub fn new<M: MeshQuery + ?Sized>(mesh: &M, cells: &[usize]) -> RzResult<Self> {
        let n = mesh.num_cells();
        let mut member = vec![false; n];
        for &c in cells {
            RzError::check_index("Cell", c, n)?;
            member[c] = true;
        }
        let cells: Vec<usize> = (0..n).filter(|&c| member[c]).collect();

        let mut neighbors = vec![Vec::new(); n];
        for &c in &cells {
            neighbors[c] = mesh
                .cell_node_adjacent_cells(c, EntityFilter::All)
                .into_iter()
                .filter(|&nb| member[nb])
                .collect();
        }

        Ok(Self {
            cells,
            member,
            neighbors,
        })
    }

    /// 按谓词选择单元（通常基于质心位置）
    pub fn from_predicate<M, F>(mesh: &M, pred: F) -> RzResult<Self>
    where
        M: MeshQuery + ?Sized,
        F: Fn(usize) -> bool,
    {
        let cells: Vec<usize> = (0..mesh.num_cells()).filter(|&c| pred(c)).collect();
        Self::new(mesh, &cells)
    }

    /// 分区单元数
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// 分区是否为空
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl RegionRestriction for Part {
    fn contains(&self, cell: usize) -> bool {
        self.member.get(cell).copied().unwrap_or(false)
    }

    fn cells(&self) -> &[usize] {
        &self.cells
    }

    fn neighbors(&self, cell: usize) -> &[usize] {
        self.neighbors.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }
}
