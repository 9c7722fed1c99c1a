// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use igu_recovery::domain::{
    CoatingType, GlassType, GlazingType, IGUCondition, IGUGroup, SealantType, SpacerMaterial,
};
use igu_recovery::importer::ProductRecord;
use std::collections::HashMap;

// ==========================================
// IGUGroup 构建器
// ==========================================

/// 默认: 双层 6|16|6, 1000 x 1000 mm, 数量 10
pub struct IguGroupBuilder {
    name: String,
    quantity: u32,
    width_mm: f64,
    height_mm: f64,
    glazing_type: GlazingType,
    outer: GlassType,
    inner: GlassType,
    outer_mm: f64,
    inner_mm: f64,
    centre_mm: Option<f64>,
    cavity_mm: f64,
    cavity_2_mm: Option<f64>,
    spacer: SpacerMaterial,
    sealant: SealantType,
    condition: IGUCondition,
    mass_per_m2: Option<f64>,
}

impl IguGroupBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: 10,
            width_mm: 1000.0,
            height_mm: 1000.0,
            glazing_type: GlazingType::Double,
            outer: GlassType::Annealed,
            inner: GlassType::Annealed,
            outer_mm: 6.0,
            inner_mm: 6.0,
            centre_mm: None,
            cavity_mm: 16.0,
            cavity_2_mm: None,
            spacer: SpacerMaterial::Aluminium,
            sealant: SealantType::Polysulfide,
            condition: IGUCondition::default(),
            mass_per_m2: None,
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn size(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.width_mm = width_mm;
        self.height_mm = height_mm;
        self
    }

    pub fn panes(mut self, outer_mm: f64, cavity_mm: f64, inner_mm: f64) -> Self {
        self.outer_mm = outer_mm;
        self.cavity_mm = cavity_mm;
        self.inner_mm = inner_mm;
        self
    }

    /// 三层: 外 | 空腔1 | 中 | 空腔2 | 内
    pub fn triple(mut self, centre_mm: f64, cavity_2_mm: f64) -> Self {
        self.glazing_type = GlazingType::Triple;
        self.centre_mm = Some(centre_mm);
        self.cavity_2_mm = Some(cavity_2_mm);
        self
    }

    pub fn laminated_outer(mut self) -> Self {
        self.outer = GlassType::Laminated;
        self
    }

    pub fn spacer(mut self, spacer: SpacerMaterial) -> Self {
        self.spacer = spacer;
        self
    }

    pub fn sealant(mut self, sealant: SealantType) -> Self {
        self.sealant = sealant;
        self
    }

    pub fn condition(mut self, condition: IGUCondition) -> Self {
        self.condition = condition;
        self
    }

    pub fn mass_per_m2(mut self, mass: f64) -> Self {
        self.mass_per_m2 = Some(mass);
        self
    }

    pub fn build(self) -> IGUGroup {
        IGUGroup {
            name: Some(self.name),
            quantity: self.quantity,
            unit_width_mm: self.width_mm,
            unit_height_mm: self.height_mm,
            glazing_type: self.glazing_type,
            glass_type_outer: self.outer,
            glass_type_inner: self.inner,
            glass_type_centre: self.centre_mm.map(|_| GlassType::Annealed),
            coating_type: CoatingType::None,
            sealant_type_secondary: self.sealant,
            spacer_material: self.spacer,
            thickness_outer_mm: self.outer_mm,
            thickness_inner_mm: self.inner_mm,
            thickness_centre_mm: self.centre_mm,
            cavity_thickness_mm: self.cavity_mm,
            cavity_thickness_2_mm: self.cavity_2_mm,
            condition: self.condition,
            mass_per_m2_override: self.mass_per_m2,
        }
    }

    pub fn build_product(self, group_id: &str) -> ProductRecord {
        let group = self.build();
        ProductRecord {
            group_id: Some(group_id.to_string()),
            product_name: group.display_name().to_string(),
            row_number: 2,
            group,
        }
    }
}

// ==========================================
// 目录/参数表行构建
// ==========================================

/// 单行原始记录
pub fn raw_row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// 产品目录 CSV 文本
pub fn catalogue_csv(rows: &[&str]) -> String {
    let mut text = String::from("win_name,Group/ID,Unit,Quantity,Width,Height,Spacer Material\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}
