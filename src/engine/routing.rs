// ==========================================
// IGU 回收碳排放评估 - 默认路线解析
// ==========================================
// 职责: 由地点与分段覆盖值生成路线注册表 (大圆距离, 无网络调用)
// 红线: 纯函数; 加载的路线表条目优先于此处结果
// ==========================================

use crate::domain::{Location, RouteConfig, RouteKey, RouteRegistry, TransportMode, TransportModeConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 地球平均半径 (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 两点间大圆距离 (km)
pub fn haversine_km(a: &Location, b: &Location) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// A 段 (origin → processor) 与 B 段 (processor → reuse) 距离
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteDistances {
    pub truck_a_km: f64,
    pub ferry_a_km: f64,
    pub truck_b_km: f64,
    pub ferry_b_km: f64,
}

/// 计算 A/B 段距离
///
/// # 规则
/// - 大圆距离 ≤ 0 (同点) → 回退距离
/// - 卡车距离覆盖值优先; 轮渡距离默认 0, 仅由覆盖值给出
pub fn compute_route_distances(transport: &TransportModeConfig) -> RouteDistances {
    let mut base_a = haversine_km(&transport.origin, &transport.processor);
    let mut base_b = haversine_km(&transport.processor, &transport.reuse);
    if base_a <= 0.0 {
        base_a = transport.fallback_a_km;
    }
    if base_b <= 0.0 {
        base_b = transport.fallback_b_km;
    }

    RouteDistances {
        truck_a_km: transport.override_a_truck_km.unwrap_or(base_a),
        ferry_a_km: transport.override_a_ferry_km.unwrap_or(0.0),
        truck_b_km: transport.override_b_truck_km.unwrap_or(base_b),
        ferry_b_km: transport.override_b_ferry_km.unwrap_or(0.0),
    }
}

fn leg(truck_km: f64, ferry_km: f64) -> RouteConfig {
    // 负值覆盖按 0 处理
    let truck_km = truck_km.max(0.0);
    let ferry_km = ferry_km.max(0.0);
    let mode = if ferry_km > 0.0 {
        TransportMode::RoadFerry
    } else {
        TransportMode::Road
    };
    RouteConfig {
        mode,
        truck_km,
        ferry_km,
    }
}

fn landfill_leg(from: &Location, landfill: Option<&Location>, fallback_km: f64) -> RouteConfig {
    let km = landfill
        .map(|l| haversine_km(from, l))
        .filter(|d| *d > 0.0)
        .unwrap_or(fallback_km);
    leg(km, 0.0)
}

/// 生成默认路线注册表 (覆盖全部路线键)
///
/// # 规则
/// - origin_to_processor ← A 段
/// - processor_to_{reuse,recycling,glasswool,container} ← B 段
/// - 填埋段: 有填埋场地点时按大圆距离, 否则取 A/B 回退距离
pub fn resolve_default_routes(transport: &TransportModeConfig) -> RouteRegistry {
    let d = compute_route_distances(transport);
    let a = leg(d.truck_a_km, d.ferry_a_km);
    let b = leg(d.truck_b_km, d.ferry_b_km);
    let landfill = transport.landfill.as_ref();

    let registry: RouteRegistry = [
        (RouteKey::OriginToProcessor, a),
        (RouteKey::ProcessorToReuse, b),
        (RouteKey::ProcessorToRecycling, b),
        (RouteKey::ProcessorToGlasswool, b),
        (RouteKey::ProcessorToContainer, b),
        (
            RouteKey::OriginToLandfill,
            landfill_leg(&transport.origin, landfill, transport.fallback_a_km),
        ),
        (
            RouteKey::ProcessorToLandfill,
            landfill_leg(&transport.processor, landfill, transport.fallback_b_km),
        ),
    ]
    .into_iter()
    .collect();

    debug!(
        truck_a_km = d.truck_a_km,
        truck_b_km = d.truck_b_km,
        "默认路线已解析"
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(origin: Location, processor: Location, reuse: Location) -> TransportModeConfig {
        TransportModeConfig {
            origin,
            processor,
            reuse,
            landfill: None,
            emissionfactor_truck: 0.04,
            emissionfactor_ferry: 0.045,
            backhaul_factor: 1.3,
            override_a_truck_km: None,
            override_a_ferry_km: None,
            override_b_truck_km: None,
            override_b_ferry_km: None,
            fallback_a_km: 100.0,
            fallback_b_km: 100.0,
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        // 伦敦 → 巴黎 约 344 km
        let london = Location { lat: 51.5074, lon: -0.1278 };
        let paris = Location { lat: 48.8566, lon: 2.3522 };
        let d = haversine_km(&london, &paris);
        assert!((d - 343.5).abs() < 2.0, "got {}", d);
        assert_eq!(haversine_km(&london, &london), 0.0);
    }

    #[test]
    fn test_coincident_points_use_fallback() {
        let p = Location { lat: 0.0, lon: 0.0 };
        let d = compute_route_distances(&transport(p, p, p));
        assert_eq!(d.truck_a_km, 100.0);
        assert_eq!(d.truck_b_km, 100.0);
        assert_eq!(d.ferry_a_km, 0.0);
    }

    #[test]
    fn test_overrides_and_ferry_mode() {
        let p = Location { lat: 0.0, lon: 0.0 };
        let mut t = transport(p, p, p);
        t.override_b_truck_km = Some(250.0);
        t.override_b_ferry_km = Some(40.0);

        let routes = resolve_default_routes(&t);
        assert_eq!(routes.len(), RouteKey::ALL.len());

        let b = routes.get(RouteKey::ProcessorToReuse).unwrap();
        assert_eq!(b.truck_km, 250.0);
        assert_eq!(b.mode, TransportMode::RoadFerry);

        let landfill = routes.get(RouteKey::OriginToLandfill).unwrap();
        assert_eq!(landfill.truck_km, 100.0);
        assert_eq!(landfill.mode, TransportMode::Road);
    }
}
