// crates/rz_mesh/src/state.rs

//! 字典式参考状态
//!
//! 网格场按 (实体种类, 名称) 存储；多材料场按 (材料, 名称) 存储，
//! 数据以材料局部编号索引，局部编号由 `set_material_cells` 给出的单元顺序决定。

use crate::traits::{FieldType, StateQuery};
use rz_foundation::{EntityKind, RzError, RzResult};
use std::collections::HashMap;

/// 字典式状态
#[derive(Debug, Clone, Default)]
pub struct SimpleState {
    /// 实体数量 (单元, 节点)
    n_cells: usize,
    n_nodes: usize,
    /// 网格场
    mesh_fields: HashMap<(EntityKind, String), Vec<f64>>,
    /// 多材料场
    material_fields: HashMap<(usize, String), Vec<f64>>,
    /// 多材料场名称
    material_field_names: Vec<String>,
    /// 每个材料所占单元
    material_cells: Vec<Vec<usize>>,
    /// 每个材料的 单元 → 局部编号
    material_index: Vec<HashMap<usize, usize>>,
    /// 每个单元所含材料
    cell_materials: Vec<Vec<usize>>,
}

impl SimpleState {
    /// 创建与网格规模匹配的空状态
    pub fn new(n_cells: usize, n_nodes: usize, n_materials: usize) -> Self {
        Self {
            n_cells,
            n_nodes,
            material_cells: vec![Vec::new(); n_materials],
            material_index: vec![HashMap::new(); n_materials],
            cell_materials: vec![Vec::new(); n_cells],
            ..Default::default()
        }
    }

    fn entity_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Cell => self.n_cells,
            EntityKind::Node => self.n_nodes,
        }
    }

    /// 添加网格场
    pub fn add_mesh_field(
        &mut self,
        kind: EntityKind,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> RzResult<()> {
        RzError::check_size("mesh field", self.entity_count(kind), values.len())?;
        self.mesh_fields.insert((kind, name.into()), values);
        Ok(())
    }

    /// 按实体坐标生成网格场
    pub fn add_mesh_field_with<F>(
        &mut self,
        kind: EntityKind,
        name: impl Into<String>,
        points: impl IntoIterator<Item = glam::DVec2>,
        f: F,
    ) -> RzResult<()>
    where
        F: Fn(glam::DVec2) -> f64,
    {
        let values = points.into_iter().map(f).collect();
        self.add_mesh_field(kind, name, values)
    }

    /// 设置材料所占单元（顺序即局部编号）
    pub fn set_material_cells(&mut self, material: usize, cells: Vec<usize>) -> RzResult<()> {
        RzError::check_material(material, self.material_cells.len())?;
        for &c in &cells {
            RzError::check_index("Cell", c, self.n_cells)?;
        }

        for &c in &self.material_cells[material] {
            self.cell_materials[c].retain(|&m| m != material);
        }
        self.material_index[material] = cells.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        for &c in &cells {
            self.cell_materials[c].push(material);
            self.cell_materials[c].sort_unstable();
        }
        self.material_cells[material] = cells;
        Ok(())
    }

    /// 添加多材料场的某一材料数据
    pub fn add_material_field(
        &mut self,
        material: usize,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> RzResult<()> {
        RzError::check_material(material, self.material_cells.len())?;
        RzError::check_size(
            "material field",
            self.material_cells[material].len(),
            values.len(),
        )?;
        let name = name.into();
        if !self.material_field_names.contains(&name) {
            self.material_field_names.push(name.clone());
        }
        self.material_fields.insert((material, name), values);
        Ok(())
    }
}

impl StateQuery for SimpleState {
    fn field_type(&self, kind: EntityKind, name: &str) -> RzResult<FieldType> {
        if self.mesh_fields.contains_key(&(kind, name.to_string())) {
            Ok(FieldType::Mesh)
        } else if kind == EntityKind::Cell && self.material_field_names.iter().any(|n| n == name) {
            Ok(FieldType::MultiMaterial)
        } else {
            Err(RzError::field_not_found(name))
        }
    }

    fn mesh_data(&self, kind: EntityKind, name: &str) -> RzResult<&[f64]> {
        self.mesh_fields
            .get(&(kind, name.to_string()))
            .map(Vec::as_slice)
            .ok_or_else(|| RzError::field_not_found(name))
    }

    fn material_data(&self, material: usize, name: &str) -> RzResult<&[f64]> {
        RzError::check_material(material, self.material_cells.len())?;
        self.material_fields
            .get(&(material, name.to_string()))
            .map(Vec::as_slice)
            .ok_or_else(|| RzError::field_not_found(format!("{name}[材料 {material}]")))
    }

    fn num_materials(&self) -> usize {
        self.material_cells.len()
    }

    fn material_cells(&self, material: usize) -> RzResult<&[usize]> {
        RzError::check_material(material, self.material_cells.len())?;
        Ok(&self.material_cells[material])
    }

    fn cell_materials(&self, cell: usize) -> Vec<usize> {
        self.cell_materials.get(cell).cloned().unwrap_or_default()
    }

    fn cell_index_in_material(&self, cell: usize, material: usize) -> Option<usize> {
        self.material_index.get(material)?.get(&cell).copied()
    }
}
