// ==========================================
// IGU 回收碳排放评估 - 运输领域模型
// ==========================================
// 职责: 坐标、路线键、已决运输段、运输方式配置
// 红线: 路线键为封闭集合; 距离不得为负
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::types::TransportMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ==========================================
// Location - 经纬度
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> DomainResult<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidLocation { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

// ==========================================
// RouteKey - 路线键
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKey {
    OriginToProcessor,
    ProcessorToReuse,
    ProcessorToRecycling,
    ProcessorToGlasswool,
    ProcessorToContainer,
    OriginToLandfill,
    ProcessorToLandfill,
}

impl RouteKey {
    pub const ALL: [RouteKey; 7] = [
        RouteKey::OriginToProcessor,
        RouteKey::ProcessorToReuse,
        RouteKey::ProcessorToRecycling,
        RouteKey::ProcessorToGlasswool,
        RouteKey::ProcessorToContainer,
        RouteKey::OriginToLandfill,
        RouteKey::ProcessorToLandfill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKey::OriginToProcessor => "origin_to_processor",
            RouteKey::ProcessorToReuse => "processor_to_reuse",
            RouteKey::ProcessorToRecycling => "processor_to_recycling",
            RouteKey::ProcessorToGlasswool => "processor_to_glasswool",
            RouteKey::ProcessorToContainer => "processor_to_container",
            RouteKey::OriginToLandfill => "origin_to_landfill",
            RouteKey::ProcessorToLandfill => "processor_to_landfill",
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RouteKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        RouteKey::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| DomainError::unrecognized("route_key", s))
    }
}

// ==========================================
// RouteConfig - 已决运输段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub mode: TransportMode,
    pub truck_km: f64,
    pub ferry_km: f64,
}

impl RouteConfig {
    pub fn new(mode: TransportMode, truck_km: f64, ferry_km: f64) -> DomainResult<Self> {
        for (field, value) in [("truck_km", truck_km), ("ferry_km", ferry_km)] {
            if value < 0.0 || !value.is_finite() {
                return Err(DomainError::out_of_range(field, value, 0.0, f64::MAX));
            }
        }
        Ok(Self {
            mode,
            truck_km,
            ferry_km,
        })
    }

    /// 仅公路段
    pub fn road(truck_km: f64) -> DomainResult<Self> {
        Self::new(TransportMode::Road, truck_km, 0.0)
    }

    /// 计费轮渡距离; 纯公路路线的轮渡距离不计
    pub fn billed_ferry_km(&self) -> f64 {
        match self.mode {
            TransportMode::RoadFerry => self.ferry_km,
            TransportMode::Road => 0.0,
        }
    }

    pub fn total_km(&self) -> f64 {
        self.truck_km + self.billed_ferry_km()
    }
}

// ==========================================
// RouteRegistry - 路线注册表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteRegistry(BTreeMap<RouteKey, RouteConfig>);

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: RouteKey, route: RouteConfig) -> Option<RouteConfig> {
        self.0.insert(key, route)
    }

    pub fn get(&self, key: RouteKey) -> Option<&RouteConfig> {
        self.0.get(&key)
    }

    pub fn contains(&self, key: RouteKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, &RouteConfig)> {
        self.0.iter()
    }

    /// 以 `other` 覆盖同键条目
    pub fn merge(&mut self, other: RouteRegistry) {
        self.0.extend(other.0);
    }
}

impl FromIterator<(RouteKey, RouteConfig)> for RouteRegistry {
    fn from_iter<I: IntoIterator<Item = (RouteKey, RouteConfig)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ==========================================
// TransportModeConfig - 运输方式配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportModeConfig {
    // ===== 地点 =====
    pub origin: Location,
    pub processor: Location,
    pub reuse: Location,
    pub landfill: Option<Location>,

    // ===== 排放因子 (kgCO2e / t·km) =====
    pub emissionfactor_truck: f64,
    pub emissionfactor_ferry: f64,
    pub backhaul_factor: f64,

    // ===== 分段距离覆盖 (km) =====
    pub override_a_truck_km: Option<f64>,
    pub override_a_ferry_km: Option<f64>,
    pub override_b_truck_km: Option<f64>,
    pub override_b_ferry_km: Option<f64>,

    // ===== 同点回退距离 (km) =====
    pub fallback_a_km: f64,
    pub fallback_b_km: f64,
}

impl TransportModeConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.backhaul_factor < 1.0 {
            return Err(DomainError::out_of_range(
                "backhaul_factor",
                self.backhaul_factor,
                1.0,
                f64::MAX,
            ));
        }
        for (field, value) in [
            ("emissionfactor_truck", self.emissionfactor_truck),
            ("emissionfactor_ferry", self.emissionfactor_ferry),
        ] {
            if value < 0.0 {
                return Err(DomainError::out_of_range(field, value, 0.0, f64::MAX));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_bounds() {
        assert!(Location::new(51.5, -0.12).is_ok());
        assert!(Location::new(91.0, 0.0).is_err());
        assert!(Location::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_route_config_rejects_negative() {
        assert!(RouteConfig::road(-1.0).is_err());
        let r = RouteConfig::new(TransportMode::RoadFerry, 120.0, 30.0).unwrap();
        assert_eq!(r.total_km(), 150.0);
    }

    #[test]
    fn test_road_route_ignores_ferry_distance() {
        let r = RouteConfig::new(TransportMode::Road, 100.0, 50.0).unwrap();
        assert_eq!(r.billed_ferry_km(), 0.0);
        assert_eq!(r.total_km(), 100.0);
    }

    #[test]
    fn test_route_key_parse() {
        assert_eq!(
            "processor_to_landfill".parse::<RouteKey>().unwrap(),
            RouteKey::ProcessorToLandfill
        );
        assert!("origin_to_moon".parse::<RouteKey>().is_err());
    }

    #[test]
    fn test_registry_merge_prefers_incoming() {
        let mut base: RouteRegistry = [
            (RouteKey::OriginToProcessor, RouteConfig::road(100.0).unwrap()),
            (RouteKey::ProcessorToReuse, RouteConfig::road(80.0).unwrap()),
        ]
        .into_iter()
        .collect();
        let loaded: RouteRegistry =
            [(RouteKey::OriginToProcessor, RouteConfig::road(42.0).unwrap())]
                .into_iter()
                .collect();

        base.merge(loaded);
        assert_eq!(base.len(), 2);
        assert_eq!(base.get(RouteKey::OriginToProcessor).unwrap().truck_km, 42.0);
    }
}
