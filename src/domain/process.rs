// ==========================================
// IGU 回收碳排放评估 - 工艺参数
// ==========================================
// 职责: 批次级工艺参数与路线注册表
// 红线: 比率字段必须位于 [0, 1]
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::transport::RouteRegistry;
use crate::domain::types::RepurposeIntensity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSettings {
    // ===== 存活率 =====
    pub breakage_rate_global: f64,
    pub humidity_failure_rate: f64,
    pub split_yield: f64,
    pub remanufacturing_yield: f64,

    // ===== 周转架 (stillage) =====
    pub igus_per_stillage: u32,
    pub stillage_mass_empty_kg: f64,
    pub include_stillage_embodied: bool,
    pub stillage_manufacture_kgco2: f64,
    pub stillage_lifetime_cycles: u32,

    // ===== 排放因子 (kgCO2e / m²) =====
    pub e_site_kgco2_per_m2: f64,
    pub repurpose_light_kgco2_per_m2: f64,
    pub repurpose_medium_kgco2_per_m2: f64,
    pub repurpose_heavy_kgco2_per_m2: f64,
    pub repurpose_intensity: RepurposeIntensity,

    // ===== 路线 =====
    pub routes: RouteRegistry,
}

impl ProcessSettings {
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            ("breakage_rate_global", self.breakage_rate_global),
            ("humidity_failure_rate", self.humidity_failure_rate),
            ("split_yield", self.split_yield),
            ("remanufacturing_yield", self.remanufacturing_yield),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DomainError::out_of_range(field, value, 0.0, 1.0));
            }
        }
        Ok(())
    }

    /// 按强度取改造排放因子
    pub fn repurpose_factor(&self, intensity: RepurposeIntensity) -> f64 {
        match intensity {
            RepurposeIntensity::Light => self.repurpose_light_kgco2_per_m2,
            RepurposeIntensity::Medium => self.repurpose_medium_kgco2_per_m2,
            RepurposeIntensity::Heavy => self.repurpose_heavy_kgco2_per_m2,
        }
    }

    /// 所需周转架数量 (向上取整)
    pub fn stillages_for(&self, igus: f64) -> f64 {
        if self.igus_per_stillage == 0 || igus <= 0.0 {
            return 0.0;
        }
        (igus / self.igus_per_stillage as f64).ceil()
    }

    /// 周转架空架总质量 (kg)
    pub fn stillage_mass_for(&self, igus: f64) -> f64 {
        self.stillages_for(igus) * self.stillage_mass_empty_kg
    }

    /// 每樘 IGU 分摊的周转架隐含碳 (kgCO2e)
    pub fn packaging_factor_per_igu(&self) -> f64 {
        let denominator = self.stillage_lifetime_cycles as f64 * self.igus_per_stillage as f64;
        if denominator <= 0.0 {
            return 0.0;
        }
        self.stillage_manufacture_kgco2 / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ProcessSettings {
        ProcessSettings {
            breakage_rate_global: 0.05,
            humidity_failure_rate: 0.05,
            split_yield: 0.95,
            remanufacturing_yield: 0.90,
            igus_per_stillage: 20,
            stillage_mass_empty_kg: 300.0,
            include_stillage_embodied: false,
            stillage_manufacture_kgco2: 500.0,
            stillage_lifetime_cycles: 100,
            e_site_kgco2_per_m2: 0.15,
            repurpose_light_kgco2_per_m2: 0.5,
            repurpose_medium_kgco2_per_m2: 1.0,
            repurpose_heavy_kgco2_per_m2: 2.0,
            repurpose_intensity: RepurposeIntensity::Medium,
            routes: RouteRegistry::new(),
        }
    }

    #[test]
    fn test_stillage_rounding() {
        let s = settings();
        assert_eq!(s.stillages_for(0.0), 0.0);
        assert_eq!(s.stillages_for(20.0), 1.0);
        assert_eq!(s.stillages_for(21.0), 2.0);
        assert_eq!(s.stillage_mass_for(9.5), 300.0);
    }

    #[test]
    fn test_packaging_factor() {
        let s = settings();
        assert!((s.packaging_factor_per_igu() - 0.25).abs() < 1e-12);

        let mut s = settings();
        s.stillage_lifetime_cycles = 0;
        assert_eq!(s.packaging_factor_per_igu(), 0.0);
    }

    #[test]
    fn test_rate_validation() {
        let mut s = settings();
        assert!(s.validate().is_ok());
        s.split_yield = 1.2;
        assert!(s.validate().is_err());
    }
}
