// ==========================================
// IGU 回收碳排放评估 - 材料质量计算
// ==========================================
// 职责: 玻璃/密封胶/间隔条质量, 批次质量汇总, 初始物料流
// 红线: 数量按 k 倍缩放时, 各质量严格按 k 倍缩放
// ==========================================

use crate::config::MaterialConstants;
use crate::domain::{FlowState, IGUGroup, SealGeometry};
use crate::engine::aggregation::BatchStats;
use serde::{Deserialize, Serialize};

const MM_TO_M: f64 = 1.0 / 1000.0;

/// 分组材料质量 (整组合计)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialMasses {
    pub glass_kg: f64,
    pub sealant_kg: f64,
    pub spacer_kg: f64,
    pub spacer_length_m: f64,
}

impl MaterialMasses {
    pub fn total_kg(&self) -> f64 {
        self.glass_kg + self.sealant_kg + self.spacer_kg
    }
}

/// 密封胶体积 (m³)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SealantVolumes {
    pub primary_per_igu_m3: f64,
    pub secondary_per_igu_m3: f64,
    pub primary_total_m3: f64,
    pub secondary_total_m3: f64,
    pub secondary_thickness_mm: f64,
}

impl SealantVolumes {
    pub fn total_m3(&self) -> f64 {
        self.primary_total_m3 + self.secondary_total_m3
    }
}

/// 批次质量汇总
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IguMassTotals {
    pub total_mass_kg: f64,
    pub total_mass_t: f64,
    pub acceptable_mass_kg: f64,
    pub remanufactured_mass_kg: f64,
    pub avg_mass_per_igu_kg: f64,
}

/// 一道/二道密封胶体积
///
/// 一道密封截面恒定; 二道密封厚度由空腔推导
pub fn compute_sealant_volumes(group: &IGUGroup, seal: &SealGeometry) -> SealantVolumes {
    let perimeter_m = group.perimeter_m();
    let quantity = group.quantity as f64;

    let primary_section_m2 = (seal.primary_thickness_mm * MM_TO_M) * (seal.primary_width_mm * MM_TO_M);
    let secondary_thickness_mm = group.secondary_seal_thickness_mm();
    let secondary_section_m2 = (secondary_thickness_mm * MM_TO_M) * (seal.secondary_width_mm * MM_TO_M);

    let primary_per_igu_m3 = perimeter_m * primary_section_m2;
    let secondary_per_igu_m3 = perimeter_m * secondary_section_m2;

    SealantVolumes {
        primary_per_igu_m3,
        secondary_per_igu_m3,
        primary_total_m3: primary_per_igu_m3 * quantity,
        secondary_total_m3: secondary_per_igu_m3 * quantity,
        secondary_thickness_mm,
    }
}

/// 分组材料质量
///
/// # 规则
/// - 玻璃 = 总厚度(m) × 单樘面积 × 数量 × 玻璃密度
/// - 密封胶 = 总体积 × 密封胶密度 × 类型密度系数
/// - 间隔条长度 = 周长 × 空腔数 × 数量; 质量再乘材料重量系数
pub fn calculate_material_masses(
    group: &IGUGroup,
    seal: &SealGeometry,
    materials: &MaterialConstants,
) -> MaterialMasses {
    let quantity = group.quantity as f64;

    let glass_volume_m3 = group.total_glass_thickness_mm() * MM_TO_M * group.area_per_unit_m2() * quantity;
    let glass_kg = glass_volume_m3 * materials.glass_density_kg_m3;

    let volumes = compute_sealant_volumes(group, seal);
    let sealant_kg = volumes.total_m3()
        * materials.sealant_density_kg_m3
        * group.sealant_type_secondary.density_factor();

    let spacer_length_m = group.perimeter_m() * group.glazing_type.cavities() as f64 * quantity;
    let spacer_kg = spacer_length_m
        * materials.spacer_mass_per_m_kg
        * group.spacer_material.weight_factor();

    MaterialMasses {
        glass_kg,
        sealant_kg,
        spacer_kg,
        spacer_length_m,
    }
}

/// 批次质量汇总
///
/// 给出密封几何时按玻璃+密封胶+间隔条逐项求和;
/// 否则按 面积 × 单位面积参考质量 (分组覆盖值优先) 粗算
pub fn compute_igu_mass_totals(
    groups: &[IGUGroup],
    stats: &BatchStats,
    seal: Option<&SealGeometry>,
    materials: &MaterialConstants,
) -> IguMassTotals {
    let total_mass_kg: f64 = groups
        .iter()
        .map(|g| match seal {
            Some(seal) => calculate_material_masses(g, seal, materials).total_kg(),
            None => {
                let mass_per_m2 = g
                    .mass_per_m2_override
                    .unwrap_or_else(|| materials.reference_mass_per_m2(g.glazing_type));
                g.total_area_m2() * mass_per_m2
            }
        })
        .sum();

    let avg_mass_per_igu_kg = if stats.total_igus > 0.0 {
        total_mass_kg / stats.total_igus
    } else {
        0.0
    };

    IguMassTotals {
        total_mass_kg,
        total_mass_t: total_mass_kg / 1000.0,
        acceptable_mass_kg: avg_mass_per_igu_kg * stats.acceptable_igus,
        remanufactured_mass_kg: avg_mass_per_igu_kg * stats.remanufactured_igus,
        avg_mass_per_igu_kg,
    }
}

/// 初始物料流: 全部数量、面积与质量
pub fn initial_flow_state(stats: &BatchStats, masses: &IguMassTotals) -> FlowState {
    FlowState::new(stats.total_igus, stats.total_area_m2, masses.total_mass_kg)
}
