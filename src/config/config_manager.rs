// ==========================================
// IGU 回收碳排放评估 - 参数管理器
// ==========================================
// 职责: 参数键定义、内置默认表、Key/Value 参数文件加载与覆写
// 存储: 参数表 (.xlsx/.xls/.csv, 列: Key, Value[, Unit, Description])
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::importer::file_parser::UniversalFileParser;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 参数文件路径环境变量
pub const PARAMS_ENV_VAR: &str = "IGU_RECOVERY_PARAMS";

/// 默认参数文件名
pub const DEFAULT_PARAMS_FILE: &str = "project_parameters.xlsx";

// ==========================================
// ParameterSet - 原始参数表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: BTreeMap<String, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置默认参数表
    pub fn builtin() -> Self {
        let values = config_keys::BUILTIN_DEFAULTS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { values }
    }

    /// 从已解析的表格行构建 (需含 Key/Value 列)
    ///
    /// # 规则
    /// - 列名大小写不敏感
    /// - Key 为空的行跳过
    pub fn from_records(records: &[HashMap<String, String>]) -> ConfigResult<Self> {
        let mut values = BTreeMap::new();

        for (idx, row) in records.iter().enumerate() {
            let key = find_column(row, "key");
            let value = find_column(row, "value");

            let (key, value) = match (key, value) {
                (Some(k), Some(v)) => (k, v),
                _ => {
                    return Err(ConfigError::MissingColumns(format!(
                        "第 {} 行缺少 Key 或 Value",
                        idx + 2
                    )))
                }
            };

            if key.is_empty() {
                continue;
            }
            values.insert(key.to_string(), value.to_string());
        }

        Ok(Self { values })
    }

    /// 加载参数文件
    pub fn load_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let records = UniversalFileParser.parse(path)?;
        let set = Self::from_records(&records)?;
        info!(path = %path.display(), count = set.len(), "参数文件加载完成");
        Ok(set)
    }

    /// 内置默认值叠加参数文件
    ///
    /// # 规则
    /// - 显式路径不存在 → 错误
    /// - 未指定路径时使用默认路径; 默认路径不存在 → 仅使用内置默认值
    pub fn load_layered(explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut set = Self::builtin();

        match explicit {
            Some(path) => set.merge(Self::load_file(path)?),
            None => match default_parameters_path() {
                Some(path) if path.exists() => set.merge(Self::load_file(&path)?),
                Some(path) => {
                    warn!(path = %path.display(), "未找到参数文件,使用内置默认值");
                }
                None => warn!("无法确定参数文件默认路径,使用内置默认值"),
            },
        }

        Ok(set)
    }

    /// 以 `other` 覆盖同名参数
    pub fn merge(&mut self, other: ParameterSet) {
        for (k, v) in other.values {
            debug!(key = %k, value = %v, "覆写参数");
            self.values.insert(k, v);
        }
    }

    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // ==========================================
    // 必需参数读取 (缺失即失败)
    // ==========================================

    pub fn require_str(&self, key: &str) -> ConfigResult<&str> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    pub fn require_f64(&self, key: &str) -> ConfigResult<f64> {
        let raw = self.require_str(key)?;
        parse_f64(key, raw)
    }

    /// 非负整数 (允许 "20.0" 形式的表格数值)
    pub fn require_u32(&self, key: &str) -> ConfigResult<u32> {
        let raw = self.require_str(key)?;
        let value = parse_f64(key, raw)?;
        if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(ConfigError::invalid(key, raw, "期望非负整数"));
        }
        Ok(value as u32)
    }

    pub fn require_bool(&self, key: &str) -> ConfigResult<bool> {
        let raw = self.require_str(key)?;
        match raw.to_lowercase().as_str() {
            "1" | "1.0" | "true" | "yes" | "y" => Ok(true),
            "0" | "0.0" | "false" | "no" | "n" => Ok(false),
            _ => Err(ConfigError::invalid(key, raw, "期望布尔值")),
        }
    }

    /// 比率参数, 必须位于 [0, 1]
    pub fn require_fraction(&self, key: &str) -> ConfigResult<f64> {
        let value = self.require_f64(key)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::invalid(key, &value.to_string(), "期望 [0, 1] 区间"));
        }
        Ok(value)
    }

    // ==========================================
    // 可选参数读取
    // ==========================================

    pub fn optional_f64(&self, key: &str) -> ConfigResult<Option<f64>> {
        self.get(key).map(|raw| parse_f64(key, raw)).transpose()
    }
}

fn find_column<'a>(row: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    row.iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(name))
        .map(|(_, v)| v.trim())
}

fn parse_f64(key: &str, raw: &str) -> ConfigResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::invalid(key, raw, "无法解析为数值"))
}

/// 默认参数文件路径
///
/// # 规则
/// 1. 环境变量 IGU_RECOVERY_PARAMS
/// 2. 用户配置目录 / igu-recovery / project_parameters.xlsx
pub fn default_parameters_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(PARAMS_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|dir| dir.join("igu-recovery").join(DEFAULT_PARAMS_FILE))
}

// ==========================================
// 参数键常量
// ==========================================
pub mod config_keys {
    // 现场拆除 / 加工排放 (kgCO2e/m²)
    pub const E_SITE_KGCO2_PER_M2: &str = "E_SITE_KGCO2_PER_M2";
    pub const DISASSEMBLY_KGCO2_PER_M2: &str = "DISASSEMBLY_KGCO2_PER_M2";
    pub const REMANUFACTURING_KGCO2_PER_M2: &str = "REMANUFACTURING_KGCO2_PER_M2";
    pub const REPAIR_KGCO2_PER_M2: &str = "REPAIR_KGCO2_PER_M2";
    pub const RECONDITION_KGCO2_PER_M2: &str = "RECONDITION_KGCO2_PER_M2";
    pub const ASSEMBLY_PROCESS_KGCO2_PER_M2: &str = "ASSEMBLY_PROCESS_KGCO2_PER_M2";
    pub const REPURPOSE_LIGHT_KGCO2_PER_M2: &str = "REPURPOSE_LIGHT_KGCO2_PER_M2";
    pub const REPURPOSE_MEDIUM_KGCO2_PER_M2: &str = "REPURPOSE_MEDIUM_KGCO2_PER_M2";
    pub const REPURPOSE_HEAVY_KGCO2_PER_M2: &str = "REPURPOSE_HEAVY_KGCO2_PER_M2";
    pub const REPURPOSE_INTENSITY: &str = "REPURPOSE_INTENSITY";
    pub const INSTALL_SYSTEM_KGCO2_PER_M2: &str = "INSTALL_SYSTEM_KGCO2_PER_M2";
    pub const BREAKING_KGCO2_PER_M2: &str = "BREAKING_KGCO2_PER_M2";

    // 材料排放 (kgCO2e/kg)
    pub const GLASS_REPROCESSING_KGCO2_PER_KG: &str = "GLASS_REPROCESSING_KGCO2_PER_KG";
    pub const VIRGIN_GLASS_KGCO2_PER_KG: &str = "VIRGIN_GLASS_KGCO2_PER_KG";
    pub const SPACER_KGCO2_PER_KG: &str = "SPACER_KGCO2_PER_KG";
    pub const SEALANT_KGCO2_PER_KG: &str = "SEALANT_KGCO2_PER_KG";

    // 工序损耗
    pub const REPAIR_YIELD_LOSS: &str = "REPAIR_YIELD_LOSS";
    pub const SYSTEM_REUSE_DEFAULT_YIELD_LOSS: &str = "SYSTEM_REUSE_DEFAULT_YIELD_LOSS";
    pub const COMPONENT_DISASSEMBLY_YIELD_LOSS: &str = "COMPONENT_DISASSEMBLY_YIELD_LOSS";
    pub const REPURPOSE_DISASSEMBLY_YIELD_LOSS: &str = "REPURPOSE_DISASSEMBLY_YIELD_LOSS";

    // 碎玻璃去向占比
    pub const CULLET_FLOAT_SHARE: &str = "CULLET_FLOAT_SHARE";
    pub const CULLET_GLASSWOOL_SHARE: &str = "CULLET_GLASSWOOL_SHARE";
    pub const CULLET_CONTAINER_SHARE: &str = "CULLET_CONTAINER_SHARE";

    // 材料常数
    pub const GLASS_DENSITY_KG_M3: &str = "GLASS_DENSITY_KG_M3";
    pub const SEALANT_DENSITY_KG_M3: &str = "SEALANT_DENSITY_KG_M3";
    pub const SPACER_MASS_PER_M_KG: &str = "SPACER_MASS_PER_M_KG";
    pub const MASS_PER_M2_SINGLE: &str = "MASS_PER_M2_SINGLE";
    pub const MASS_PER_M2_DOUBLE: &str = "MASS_PER_M2_DOUBLE";
    pub const MASS_PER_M2_TRIPLE: &str = "MASS_PER_M2_TRIPLE";

    // 批次存活率
    pub const BREAKAGE_RATE_GLOBAL: &str = "BREAKAGE_RATE_GLOBAL";
    pub const HUMIDITY_FAILURE_RATE: &str = "HUMIDITY_FAILURE_RATE";
    pub const SPLIT_YIELD: &str = "SPLIT_YIELD";
    pub const REMANUFACTURING_YIELD: &str = "REMANUFACTURING_YIELD";

    // 周转架
    pub const IGUS_PER_STILLAGE: &str = "IGUS_PER_STILLAGE";
    pub const STILLAGE_MASS_EMPTY_KG: &str = "STILLAGE_MASS_EMPTY_KG";
    pub const STILLAGE_MANUFACTURE_KGCO2: &str = "STILLAGE_MANUFACTURE_KGCO2";
    pub const STILLAGE_LIFETIME_CYCLES: &str = "STILLAGE_LIFETIME_CYCLES";
    pub const INCLUDE_STILLAGE_EMBODIED: &str = "INCLUDE_STILLAGE_EMBODIED";

    // 运输
    pub const EMISSIONFACTOR_TRUCK: &str = "EMISSIONFACTOR_TRUCK";
    pub const EMISSIONFACTOR_FERRY: &str = "EMISSIONFACTOR_FERRY";
    pub const BACKHAUL_FACTOR: &str = "BACKHAUL_FACTOR";
    pub const DISTANCE_FALLBACK_A_KM: &str = "DISTANCE_FALLBACK_A_KM";
    pub const DISTANCE_FALLBACK_B_KM: &str = "DISTANCE_FALLBACK_B_KM";
    pub const TRAVEL_TRUCK_A_KM_OVERRIDE: &str = "TRAVEL_TRUCK_A_KM_OVERRIDE";
    pub const TRAVEL_FERRY_A_KM_OVERRIDE: &str = "TRAVEL_FERRY_A_KM_OVERRIDE";
    pub const TRAVEL_TRUCK_B_KM_OVERRIDE: &str = "TRAVEL_TRUCK_B_KM_OVERRIDE";
    pub const TRAVEL_FERRY_B_KM_OVERRIDE: &str = "TRAVEL_FERRY_B_KM_OVERRIDE";

    // 地点 (可选; 缺省为同点,触发回退距离)
    pub const ORIGIN_LAT: &str = "ORIGIN_LAT";
    pub const ORIGIN_LON: &str = "ORIGIN_LON";
    pub const PROCESSOR_LAT: &str = "PROCESSOR_LAT";
    pub const PROCESSOR_LON: &str = "PROCESSOR_LON";
    pub const REUSE_LAT: &str = "REUSE_LAT";
    pub const REUSE_LON: &str = "REUSE_LON";
    pub const LANDFILL_LAT: &str = "LANDFILL_LAT";
    pub const LANDFILL_LON: &str = "LANDFILL_LON";

    // 密封几何 (mm)
    pub const PRIMARY_SEAL_THICKNESS_MM: &str = "PRIMARY_SEAL_THICKNESS_MM";
    pub const PRIMARY_SEAL_WIDTH_MM: &str = "PRIMARY_SEAL_WIDTH_MM";
    pub const SECONDARY_SEAL_WIDTH_MM: &str = "SECONDARY_SEAL_WIDTH_MM";

    // 批量模式标准单元
    pub const BATCH_QUANTITY: &str = "BATCH_QUANTITY";
    pub const BATCH_UNIT_WIDTH_MM: &str = "BATCH_UNIT_WIDTH_MM";
    pub const BATCH_UNIT_HEIGHT_MM: &str = "BATCH_UNIT_HEIGHT_MM";

    /// 内置默认表
    pub const BUILTIN_DEFAULTS: &[(&str, &str)] = &[
        (E_SITE_KGCO2_PER_M2, "0.15"),
        (DISASSEMBLY_KGCO2_PER_M2, "0.5"),
        (REMANUFACTURING_KGCO2_PER_M2, "7.5"),
        (REPAIR_KGCO2_PER_M2, "1.0"),
        (RECONDITION_KGCO2_PER_M2, "0.0"),
        (ASSEMBLY_PROCESS_KGCO2_PER_M2, "0.5"),
        (REPURPOSE_LIGHT_KGCO2_PER_M2, "0.5"),
        (REPURPOSE_MEDIUM_KGCO2_PER_M2, "1.0"),
        (REPURPOSE_HEAVY_KGCO2_PER_M2, "2.0"),
        (REPURPOSE_INTENSITY, "medium"),
        (INSTALL_SYSTEM_KGCO2_PER_M2, "0.25"),
        (BREAKING_KGCO2_PER_M2, "0.1"),
        (GLASS_REPROCESSING_KGCO2_PER_KG, "0.03"),
        (VIRGIN_GLASS_KGCO2_PER_KG, "1.2"),
        (SPACER_KGCO2_PER_KG, "8.0"),
        (SEALANT_KGCO2_PER_KG, "3.0"),
        (REPAIR_YIELD_LOSS, "0.20"),
        (SYSTEM_REUSE_DEFAULT_YIELD_LOSS, "0.05"),
        (COMPONENT_DISASSEMBLY_YIELD_LOSS, "0.20"),
        (REPURPOSE_DISASSEMBLY_YIELD_LOSS, "0.10"),
        (CULLET_FLOAT_SHARE, "0.80"),
        (CULLET_GLASSWOOL_SHARE, "0.10"),
        (CULLET_CONTAINER_SHARE, "0.10"),
        (GLASS_DENSITY_KG_M3, "2500"),
        (SEALANT_DENSITY_KG_M3, "1700"),
        (SPACER_MASS_PER_M_KG, "0.15"),
        (MASS_PER_M2_SINGLE, "10"),
        (MASS_PER_M2_DOUBLE, "20"),
        (MASS_PER_M2_TRIPLE, "30"),
        (BREAKAGE_RATE_GLOBAL, "0.05"),
        (HUMIDITY_FAILURE_RATE, "0.05"),
        (SPLIT_YIELD, "0.95"),
        (REMANUFACTURING_YIELD, "0.90"),
        (IGUS_PER_STILLAGE, "20"),
        (STILLAGE_MASS_EMPTY_KG, "300"),
        (STILLAGE_MANUFACTURE_KGCO2, "500"),
        (STILLAGE_LIFETIME_CYCLES, "100"),
        (INCLUDE_STILLAGE_EMBODIED, "0"),
        (EMISSIONFACTOR_TRUCK, "0.04"),
        (EMISSIONFACTOR_FERRY, "0.045"),
        (BACKHAUL_FACTOR, "1.3"),
        (DISTANCE_FALLBACK_A_KM, "100"),
        (DISTANCE_FALLBACK_B_KM, "100"),
        (PRIMARY_SEAL_THICKNESS_MM, "6"),
        (PRIMARY_SEAL_WIDTH_MM, "12"),
        (SECONDARY_SEAL_WIDTH_MM, "8"),
        (BATCH_QUANTITY, "50"),
        (BATCH_UNIT_WIDTH_MM, "1000"),
        (BATCH_UNIT_HEIGHT_MM, "1500"),
    ];
}
