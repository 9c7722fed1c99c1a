// ==========================================
// IGU 回收碳排放评估 - 类型化参数
// ==========================================
// 职责: 从原始参数表构建引擎所需的强类型参数记录
// 红线: 任一必需参数缺失或越界 → ConfigError, 计算前失败
// ==========================================

use crate::config::config_manager::{config_keys as k, ParameterSet};
use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::{
    GlazingType, Location, ProcessSettings, RepurposeIntensity, RouteRegistry, SealGeometry,
    TransportModeConfig,
};
use serde::{Deserialize, Serialize};

// ==========================================
// EmissionParameters - 路径计算排放因子与工序损耗
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionParameters {
    // ===== kgCO2e/m² =====
    pub disassembly_kgco2_per_m2: f64,
    pub remanufacturing_kgco2_per_m2: f64,
    pub repair_kgco2_per_m2: f64,
    pub recondition_kgco2_per_m2: f64,
    pub assembly_process_kgco2_per_m2: f64,
    pub install_system_kgco2_per_m2: f64,
    pub breaking_kgco2_per_m2: f64,

    // ===== kgCO2e/kg =====
    pub glass_reprocessing_kgco2_per_kg: f64,
    pub virgin_glass_kgco2_per_kg: f64,
    pub spacer_kgco2_per_kg: f64,
    pub sealant_kgco2_per_kg: f64,

    // ===== 工序损耗 =====
    pub repair_yield_loss: f64,
    pub system_reuse_default_yield_loss: f64,
    pub component_disassembly_yield_loss: f64,
    pub repurpose_disassembly_yield_loss: f64,

    // ===== 碎玻璃去向 =====
    pub cullet_float_share: f64,
    pub cullet_glasswool_share: f64,
    pub cullet_container_share: f64,
}

impl EmissionParameters {
    pub fn from_parameters(params: &ParameterSet) -> ConfigResult<Self> {
        let ep = Self {
            disassembly_kgco2_per_m2: params.require_f64(k::DISASSEMBLY_KGCO2_PER_M2)?,
            remanufacturing_kgco2_per_m2: params.require_f64(k::REMANUFACTURING_KGCO2_PER_M2)?,
            repair_kgco2_per_m2: params.require_f64(k::REPAIR_KGCO2_PER_M2)?,
            recondition_kgco2_per_m2: params.require_f64(k::RECONDITION_KGCO2_PER_M2)?,
            assembly_process_kgco2_per_m2: params
                .require_f64(k::ASSEMBLY_PROCESS_KGCO2_PER_M2)?,
            install_system_kgco2_per_m2: params.require_f64(k::INSTALL_SYSTEM_KGCO2_PER_M2)?,
            breaking_kgco2_per_m2: params.require_f64(k::BREAKING_KGCO2_PER_M2)?,

            glass_reprocessing_kgco2_per_kg: params
                .require_f64(k::GLASS_REPROCESSING_KGCO2_PER_KG)?,
            virgin_glass_kgco2_per_kg: params.require_f64(k::VIRGIN_GLASS_KGCO2_PER_KG)?,
            spacer_kgco2_per_kg: params.require_f64(k::SPACER_KGCO2_PER_KG)?,
            sealant_kgco2_per_kg: params.require_f64(k::SEALANT_KGCO2_PER_KG)?,

            repair_yield_loss: params.require_fraction(k::REPAIR_YIELD_LOSS)?,
            system_reuse_default_yield_loss: params
                .require_fraction(k::SYSTEM_REUSE_DEFAULT_YIELD_LOSS)?,
            component_disassembly_yield_loss: params
                .require_fraction(k::COMPONENT_DISASSEMBLY_YIELD_LOSS)?,
            repurpose_disassembly_yield_loss: params
                .require_fraction(k::REPURPOSE_DISASSEMBLY_YIELD_LOSS)?,

            cullet_float_share: params.require_fraction(k::CULLET_FLOAT_SHARE)?,
            cullet_glasswool_share: params.require_fraction(k::CULLET_GLASSWOOL_SHARE)?,
            cullet_container_share: params.require_fraction(k::CULLET_CONTAINER_SHARE)?,
        };

        let open_loop = ep.cullet_glasswool_share + ep.cullet_container_share;
        if open_loop > 1.0 {
            return Err(ConfigError::invalid(
                k::CULLET_GLASSWOOL_SHARE,
                &open_loop.to_string(),
                "玻璃棉与容器玻璃占比之和不得超过 1",
            ));
        }

        Ok(ep)
    }
}

// ==========================================
// MaterialConstants - 材料常数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialConstants {
    pub glass_density_kg_m3: f64,
    pub sealant_density_kg_m3: f64,
    pub spacer_mass_per_m_kg: f64,
    pub mass_per_m2_single: f64,
    pub mass_per_m2_double: f64,
    pub mass_per_m2_triple: f64,
}

impl MaterialConstants {
    pub fn from_parameters(params: &ParameterSet) -> ConfigResult<Self> {
        Ok(Self {
            glass_density_kg_m3: params.require_f64(k::GLASS_DENSITY_KG_M3)?,
            sealant_density_kg_m3: params.require_f64(k::SEALANT_DENSITY_KG_M3)?,
            spacer_mass_per_m_kg: params.require_f64(k::SPACER_MASS_PER_M_KG)?,
            mass_per_m2_single: params.require_f64(k::MASS_PER_M2_SINGLE)?,
            mass_per_m2_double: params.require_f64(k::MASS_PER_M2_DOUBLE)?,
            mass_per_m2_triple: params.require_f64(k::MASS_PER_M2_TRIPLE)?,
        })
    }

    /// 按中空类型取参考面密度 (kg/m²)
    pub fn reference_mass_per_m2(&self, glazing: GlazingType) -> f64 {
        match glazing {
            GlazingType::Single => self.mass_per_m2_single,
            GlazingType::Double => self.mass_per_m2_double,
            GlazingType::Triple => self.mass_per_m2_triple,
        }
    }
}

// ==========================================
// BatchDefaults - 批量模式标准单元
// ==========================================
// 产品目录行未给出数量/尺寸时使用
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchDefaults {
    pub quantity: u32,
    pub unit_width_mm: f64,
    pub unit_height_mm: f64,
}

impl BatchDefaults {
    pub fn from_parameters(params: &ParameterSet) -> ConfigResult<Self> {
        Ok(Self {
            quantity: params.require_u32(k::BATCH_QUANTITY)?,
            unit_width_mm: params.require_f64(k::BATCH_UNIT_WIDTH_MM)?,
            unit_height_mm: params.require_f64(k::BATCH_UNIT_HEIGHT_MM)?,
        })
    }
}

// ==========================================
// 领域参数构建
// ==========================================

/// 构建工艺参数
///
/// # 参数
/// - `routes`: 已决路线注册表 (加载/解析结果)
pub fn build_process_settings(
    params: &ParameterSet,
    routes: RouteRegistry,
) -> ConfigResult<ProcessSettings> {
    let intensity: RepurposeIntensity = params.require_str(k::REPURPOSE_INTENSITY)?.parse()?;

    let settings = ProcessSettings {
        breakage_rate_global: params.require_fraction(k::BREAKAGE_RATE_GLOBAL)?,
        humidity_failure_rate: params.require_fraction(k::HUMIDITY_FAILURE_RATE)?,
        split_yield: params.require_fraction(k::SPLIT_YIELD)?,
        remanufacturing_yield: params.require_fraction(k::REMANUFACTURING_YIELD)?,
        igus_per_stillage: params.require_u32(k::IGUS_PER_STILLAGE)?,
        stillage_mass_empty_kg: params.require_f64(k::STILLAGE_MASS_EMPTY_KG)?,
        include_stillage_embodied: params.require_bool(k::INCLUDE_STILLAGE_EMBODIED)?,
        stillage_manufacture_kgco2: params.require_f64(k::STILLAGE_MANUFACTURE_KGCO2)?,
        stillage_lifetime_cycles: params.require_u32(k::STILLAGE_LIFETIME_CYCLES)?,
        e_site_kgco2_per_m2: params.require_f64(k::E_SITE_KGCO2_PER_M2)?,
        repurpose_light_kgco2_per_m2: params.require_f64(k::REPURPOSE_LIGHT_KGCO2_PER_M2)?,
        repurpose_medium_kgco2_per_m2: params.require_f64(k::REPURPOSE_MEDIUM_KGCO2_PER_M2)?,
        repurpose_heavy_kgco2_per_m2: params.require_f64(k::REPURPOSE_HEAVY_KGCO2_PER_M2)?,
        repurpose_intensity: intensity,
        routes,
    };
    settings.validate()?;
    Ok(settings)
}

/// 构建运输方式配置
///
/// # 规则
/// - 未配置的地点取 (0, 0), 同点距离触发回退距离
/// - 填埋场地点仅在经纬度都给出时存在
pub fn build_transport_config(params: &ParameterSet) -> ConfigResult<TransportModeConfig> {
    let origin = optional_location(params, k::ORIGIN_LAT, k::ORIGIN_LON)?;
    let processor = optional_location(params, k::PROCESSOR_LAT, k::PROCESSOR_LON)?;
    let reuse = optional_location(params, k::REUSE_LAT, k::REUSE_LON)?;
    let landfill = optional_location(params, k::LANDFILL_LAT, k::LANDFILL_LON)?;

    let unset = Location { lat: 0.0, lon: 0.0 };
    let config = TransportModeConfig {
        origin: origin.unwrap_or(unset),
        processor: processor.unwrap_or(unset),
        reuse: reuse.unwrap_or(unset),
        landfill,
        emissionfactor_truck: params.require_f64(k::EMISSIONFACTOR_TRUCK)?,
        emissionfactor_ferry: params.require_f64(k::EMISSIONFACTOR_FERRY)?,
        backhaul_factor: params.require_f64(k::BACKHAUL_FACTOR)?,
        override_a_truck_km: params.optional_f64(k::TRAVEL_TRUCK_A_KM_OVERRIDE)?,
        override_a_ferry_km: params.optional_f64(k::TRAVEL_FERRY_A_KM_OVERRIDE)?,
        override_b_truck_km: params.optional_f64(k::TRAVEL_TRUCK_B_KM_OVERRIDE)?,
        override_b_ferry_km: params.optional_f64(k::TRAVEL_FERRY_B_KM_OVERRIDE)?,
        fallback_a_km: params.require_f64(k::DISTANCE_FALLBACK_A_KM)?,
        fallback_b_km: params.require_f64(k::DISTANCE_FALLBACK_B_KM)?,
    };
    config.validate()?;
    Ok(config)
}

/// 构建密封几何
pub fn build_seal_geometry(params: &ParameterSet) -> ConfigResult<SealGeometry> {
    Ok(SealGeometry::new(
        params.require_f64(k::PRIMARY_SEAL_THICKNESS_MM)?,
        params.require_f64(k::PRIMARY_SEAL_WIDTH_MM)?,
        params.require_f64(k::SECONDARY_SEAL_WIDTH_MM)?,
    )?)
}

fn optional_location(
    params: &ParameterSet,
    lat_key: &str,
    lon_key: &str,
) -> ConfigResult<Option<Location>> {
    match (params.optional_f64(lat_key)?, params.optional_f64(lon_key)?) {
        (Some(lat), Some(lon)) => Ok(Some(Location::new(lat, lon)?)),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::MissingKey(lon_key.to_string())),
        (None, Some(_)) => Err(ConfigError::MissingKey(lat_key.to_string())),
    }
}
