// ==========================================
// 配置层集成测试
// ==========================================
// 覆盖: 参数文件叠加, 必需参数缺失即失败, 取值校验
// ==========================================

use igu_recovery::config::{
    build_transport_config, config_keys as k, ConfigError, EmissionParameters, ParameterSet,
};
use igu_recovery::domain::RepurposeIntensity;
use igu_recovery::engine::{BatchContext, EngineError};
use std::fs;
use tempfile::TempDir;

fn write_params(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("project_parameters.csv");
    fs::write(&path, format!("Key,Value,Unit\n{}", body)).unwrap();
    path
}

#[test]
fn test_parameter_file_overrides_builtin() {
    let dir = TempDir::new().unwrap();
    let path = write_params(
        &dir,
        "E_SITE_KGCO2_PER_M2,0.3,kgCO2e/m2\n\
         REPURPOSE_INTENSITY,light,\n\
         ,ignored,\n",
    );

    let set = ParameterSet::load_layered(Some(path.as_path())).unwrap();
    let ctx = BatchContext::from_parameters(&set, None).unwrap();
    assert_eq!(ctx.processes.e_site_kgco2_per_m2, 0.3);
    assert_eq!(ctx.decisions.repurpose_intensity, RepurposeIntensity::Light);
    // 未覆盖的键保持内置值
    assert_eq!(ctx.transport.backhaul_factor, 1.3);
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let result = ParameterSet::load_layered(Some(dir.path().join("absent.csv").as_path()));
    assert!(matches!(result, Err(ConfigError::Import(_))));
}

#[test]
fn test_file_without_key_column_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "Name,Amount\nE_SITE,1\n").unwrap();
    assert!(matches!(
        ParameterSet::load_file(&path),
        Err(ConfigError::MissingColumns(_))
    ));
}

#[test]
fn test_missing_required_key_fails_before_calculation() {
    let mut set = ParameterSet::builtin();
    set.remove(k::VIRGIN_GLASS_KGCO2_PER_KG);

    match EmissionParameters::from_parameters(&set) {
        Err(ConfigError::MissingKey(key)) => assert_eq!(key, k::VIRGIN_GLASS_KGCO2_PER_KG),
        other => panic!("expected MissingKey, got {:?}", other),
    }
    assert!(matches!(
        BatchContext::from_parameters(&set, None),
        Err(EngineError::Config(ConfigError::MissingKey(_)))
    ));
}

#[test]
fn test_out_of_range_values_rejected() {
    let mut set = ParameterSet::builtin();
    set.set(k::BREAKAGE_RATE_GLOBAL, 1.5);
    assert!(BatchContext::from_parameters(&set, None).is_err());

    let mut set = ParameterSet::builtin();
    set.set(k::BACKHAUL_FACTOR, 0.8);
    assert!(build_transport_config(&set).is_err());

    let mut set = ParameterSet::builtin();
    set.set(k::REPURPOSE_INTENSITY, "extreme");
    assert!(BatchContext::from_parameters(&set, None).is_err());
}

#[test]
fn test_half_specified_location_is_missing_key() {
    let mut set = ParameterSet::builtin();
    set.set(k::LANDFILL_LAT, 51.0);
    match build_transport_config(&set) {
        Err(ConfigError::MissingKey(key)) => assert_eq!(key, k::LANDFILL_LON),
        other => panic!("expected MissingKey, got {:?}", other),
    }
}
