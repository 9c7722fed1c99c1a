// ==========================================
// IGU 回收碳排放评估 - 路线运输排放
// ==========================================
// 公式: mass_t × (truck_km × EF_truck + ferry_km × EF_ferry) × backhaul
// 说明: 仅 RoadFerry 路线计轮渡段
// 红线: 路线键缺失 → 返回 0, 同时写审计告警与 tracing 告警
// ==========================================

use crate::domain::{ProcessSettings, RouteKey, TransportModeConfig};
use crate::engine::audit::CalculationAudit;
use serde_json::json;
use tracing::warn;

/// 按路线键计算运输排放 (kgCO2e)
///
/// 对质量与距离均为线性; 回程系数同时作用于公路段与轮渡段
pub fn get_route_emissions(
    mass_kg: f64,
    route_key: RouteKey,
    processes: &ProcessSettings,
    transport: &TransportModeConfig,
    audit: &dyn CalculationAudit,
) -> f64 {
    let context = format!("Transport: {}", route_key);

    let route = match processes.routes.get(route_key) {
        Some(r) => r,
        None => {
            warn!(route = %route_key, mass_kg, "路线未配置,运输排放按 0 计");
            audit.warn(&context, "route not configured; emission counted as 0");
            return 0.0;
        }
    };

    let mass_t = mass_kg / 1000.0;
    let ferry_km = route.billed_ferry_km();
    let per_tonne = route.truck_km * transport.emissionfactor_truck
        + ferry_km * transport.emissionfactor_ferry;
    let emissions = mass_t * per_tonne * transport.backhaul_factor;

    audit.log_calculation(
        &context,
        "mass_t * (truck_km * EF_truck + ferry_km * EF_ferry) * backhaul",
        json!({
            "mass_t": mass_t,
            "mode": route.mode.to_string(),
            "truck_km": route.truck_km,
            "ferry_km": ferry_km,
            "ef_truck": transport.emissionfactor_truck,
            "ef_ferry": transport.emissionfactor_ferry,
            "backhaul": transport.backhaul_factor,
        }),
        emissions,
    );

    emissions
}
