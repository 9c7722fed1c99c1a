// ==========================================
// IGU 回收碳排放评估 - 配置层
// ==========================================
// 职责: 参数键、内置默认表、参数文件加载、强类型参数构建
// 存储: Key/Value 参数表 (.xlsx/.xls/.csv)
// ==========================================

pub mod config_manager;
pub mod error;
pub mod parameters;

pub use config_manager::{config_keys, default_parameters_path, ParameterSet, PARAMS_ENV_VAR};
pub use error::{ConfigError, ConfigResult};
pub use parameters::{
    build_process_settings, build_seal_geometry, build_transport_config, BatchDefaults,
    EmissionParameters, MaterialConstants,
};
