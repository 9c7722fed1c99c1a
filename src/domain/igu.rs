// ==========================================
// IGU 回收碳排放评估 - IGU 分组领域模型
// ==========================================
// 职责: 几何、构造、外观状态描述
// 红线: 三层中空必须给出中片厚度与第二空腔; 单层中空内片/空腔为 0
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::types::{
    CoatingType, EdgeSealCondition, GlassType, GlazingType, SealantType, SpacerMaterial,
};
use serde::{Deserialize, Serialize};

// ==========================================
// IGUCondition - 外观检查结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IGUCondition {
    pub visible_edge_seal_condition: EdgeSealCondition,
    pub visible_fogging: bool,
    pub cracks_chips: bool,
    pub age_years: f64,
    pub reuse_allowed: bool,
}

impl IGUCondition {
    /// 再利用资格判定
    ///
    /// # 规则
    /// reuse_allowed ∧ ¬cracks_chips ∧ edge_seal ≠ unacceptable ∧ ¬fogging
    pub fn is_eligible(&self) -> bool {
        self.reuse_allowed
            && !self.cracks_chips
            && self.visible_edge_seal_condition != EdgeSealCondition::Unacceptable
            && !self.visible_fogging
    }
}

impl Default for IGUCondition {
    fn default() -> Self {
        Self {
            visible_edge_seal_condition: EdgeSealCondition::Acceptable,
            visible_fogging: false,
            cracks_chips: false,
            age_years: 20.0,
            reuse_allowed: true,
        }
    }
}

// ==========================================
// SealGeometry - 全批次密封几何
// ==========================================
// 二道密封厚度不在此存储,按空腔厚度逐分组推导
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SealGeometry {
    pub primary_thickness_mm: f64,
    pub primary_width_mm: f64,
    pub secondary_width_mm: f64,
}

impl SealGeometry {
    pub fn new(
        primary_thickness_mm: f64,
        primary_width_mm: f64,
        secondary_width_mm: f64,
    ) -> DomainResult<Self> {
        for (field, value) in [
            ("primary_thickness_mm", primary_thickness_mm),
            ("primary_width_mm", primary_width_mm),
            ("secondary_width_mm", secondary_width_mm),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(DomainError::out_of_range(field, value, 0.0, f64::MAX));
            }
        }
        Ok(Self {
            primary_thickness_mm,
            primary_width_mm,
            secondary_width_mm,
        })
    }
}

// ==========================================
// IGUGroup - 同质 IGU 分组
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IGUGroup {
    // ===== 标识 =====
    pub name: Option<String>,

    // ===== 数量与尺寸 =====
    pub quantity: u32,
    pub unit_width_mm: f64,
    pub unit_height_mm: f64,

    // ===== 构造 =====
    pub glazing_type: GlazingType,
    pub glass_type_outer: GlassType,
    pub glass_type_inner: GlassType,
    pub glass_type_centre: Option<GlassType>, // 仅三层中空; 缺省按退火玻璃
    pub coating_type: CoatingType,
    pub sealant_type_secondary: SealantType,
    pub spacer_material: SpacerMaterial,

    // ===== 厚度 (mm) =====
    pub thickness_outer_mm: f64,
    pub thickness_inner_mm: f64,
    pub thickness_centre_mm: Option<f64>,
    pub cavity_thickness_mm: f64,
    pub cavity_thickness_2_mm: Option<f64>,

    // ===== 外观状态 =====
    pub condition: IGUCondition,

    // ===== 粗算质量 =====
    pub mass_per_m2_override: Option<f64>,
}

impl IGUGroup {
    /// 校验分组不变量
    pub fn validate(&self) -> DomainResult<()> {
        if !(self.unit_width_mm > 0.0) || !(self.unit_height_mm > 0.0) {
            return Err(DomainError::InvalidGroup(format!(
                "尺寸必须为正: {}x{} mm",
                self.unit_width_mm, self.unit_height_mm
            )));
        }

        let mut thicknesses = vec![
            ("thickness_outer_mm", self.thickness_outer_mm),
            ("thickness_inner_mm", self.thickness_inner_mm),
            ("cavity_thickness_mm", self.cavity_thickness_mm),
        ];
        if let Some(t) = self.thickness_centre_mm {
            thicknesses.push(("thickness_centre_mm", t));
        }
        if let Some(c) = self.cavity_thickness_2_mm {
            thicknesses.push(("cavity_thickness_2_mm", c));
        }
        for (field, value) in thicknesses {
            if value < 0.0 || !value.is_finite() {
                return Err(DomainError::out_of_range(field, value, 0.0, f64::MAX));
            }
        }

        match self.glazing_type {
            GlazingType::Triple => {
                if self.thickness_centre_mm.is_none() || self.cavity_thickness_2_mm.is_none() {
                    return Err(DomainError::InvalidGroup(
                        "三层中空缺少中片厚度或第二空腔厚度".to_string(),
                    ));
                }
            }
            GlazingType::Single => {
                if self.thickness_inner_mm != 0.0 || self.cavity_thickness_mm != 0.0 {
                    return Err(DomainError::InvalidGroup(format!(
                        "单层玻璃内片/空腔必须为 0: inner={}, cavity={}",
                        self.thickness_inner_mm, self.cavity_thickness_mm
                    )));
                }
            }
            GlazingType::Double => {}
        }

        Ok(())
    }

    // ==========================================
    // 几何
    // ==========================================

    /// 单樘面积 (m²)
    pub fn area_per_unit_m2(&self) -> f64 {
        (self.unit_width_mm / 1000.0) * (self.unit_height_mm / 1000.0)
    }

    /// 单樘周长 (m)
    pub fn perimeter_m(&self) -> f64 {
        2.0 * (self.unit_width_mm / 1000.0 + self.unit_height_mm / 1000.0)
    }

    /// 分组总面积 (m²)
    pub fn total_area_m2(&self) -> f64 {
        self.area_per_unit_m2() * self.quantity as f64
    }

    /// 各片玻璃 (类型, 厚度mm)，外 → 中 → 内
    pub fn panes(&self) -> Vec<(GlassType, f64)> {
        let mut panes = vec![(self.glass_type_outer, self.thickness_outer_mm)];
        if self.glazing_type == GlazingType::Triple {
            if let Some(t) = self.thickness_centre_mm {
                panes.push((self.glass_type_centre.unwrap_or(GlassType::Annealed), t));
            }
        }
        if self.glazing_type != GlazingType::Single {
            panes.push((self.glass_type_inner, self.thickness_inner_mm));
        }
        panes
    }

    /// 玻璃总厚度 (mm)
    pub fn total_glass_thickness_mm(&self) -> f64 {
        self.panes().iter().map(|(_, t)| t).sum()
    }

    /// 整体构造深度 (mm): 玻璃 + 空腔
    pub fn build_up_depth_mm(&self) -> f64 {
        let cavities = match self.glazing_type {
            GlazingType::Single => 0.0,
            GlazingType::Double => self.cavity_thickness_mm,
            GlazingType::Triple => {
                self.cavity_thickness_mm + self.cavity_thickness_2_mm.unwrap_or(0.0)
            }
        };
        self.total_glass_thickness_mm() + cavities
    }

    /// 二道密封厚度 (mm)
    ///
    /// # 规则
    /// - 双层: 空腔厚度
    /// - 三层: max(空腔1, 空腔2)
    /// - 单层: 0
    pub fn secondary_seal_thickness_mm(&self) -> f64 {
        match self.glazing_type {
            GlazingType::Single => 0.0,
            GlazingType::Double => self.cavity_thickness_mm,
            GlazingType::Triple => self
                .cavity_thickness_mm
                .max(self.cavity_thickness_2_mm.unwrap_or(0.0)),
        }
    }

    // ==========================================
    // 夹层玻璃
    // ==========================================

    /// 是否含夹层玻璃片
    pub fn has_laminated(&self) -> bool {
        self.panes().iter().any(|(g, _)| g.is_laminated())
    }

    /// 非夹层玻璃质量占比 (同面积同密度下按厚度折算)
    pub fn non_laminated_mass_fraction(&self) -> f64 {
        let total = self.total_glass_thickness_mm();
        if total <= 0.0 {
            return 0.0;
        }
        let non_laminated: f64 = self
            .panes()
            .iter()
            .filter(|(g, _)| !g.is_laminated())
            .map(|(_, t)| t)
            .sum();
        non_laminated / total
    }

    /// 展示名
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed")
    }
}
