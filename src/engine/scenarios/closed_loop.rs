// ==========================================
// IGU 回收碳排放评估 - 闭环回收路径
// ==========================================
// 顺序: 整樘/破碎决策 → 现场损失 → 现场拆除 → 破碎或拆解 → A 段
//      → 夹层玻璃修正 → 浮法/开环分流 → 玻璃再加工 → B 段 + 开环段
//      → [等效新品] → 现场废料运输
// 红线: 含夹层玻璃时浮法份额被覆盖 (破碎运输 → 0; 整樘运输 → 非夹层质量占比)
// ==========================================

use crate::domain::{IGUGroup, RouteKey, ScenarioKind, ScenarioResult, Stage};
use crate::engine::decisions::ScenarioDecisions;
use crate::engine::scenarios::common::StageRecorder;
use crate::engine::scenarios::ScenarioContext;
use serde_json::json;
use tracing::debug;

/// 浮法碎玻璃份额 (含夹层玻璃时覆盖配置值)
pub fn float_cullet_share(group: &IGUGroup, send_intact: bool, configured_share: f64) -> f64 {
    if !group.has_laminated() {
        return configured_share;
    }
    if send_intact {
        group.non_laminated_mass_fraction()
    } else {
        0.0
    }
}

pub fn run_closed_loop_recycling(
    ctx: &ScenarioContext<'_>,
    decisions: &ScenarioDecisions,
) -> ScenarioResult {
    let params = ctx.params;
    let start = ctx.flow_start;
    let mut rec = StageRecorder::new(ctx);

    let shipped = rec.recycling_front_end(decisions);

    let share = float_cullet_share(ctx.group, decisions.send_intact, params.cullet_float_share);
    if ctx.group.has_laminated() {
        debug!(
            product = ctx.group.display_name(),
            configured = params.cullet_float_share,
            applied = share,
            "夹层玻璃修正浮法份额"
        );
    }
    let float_bound = shipped.scaled(share);
    let open_loop_bound = shipped.scaled(1.0 - share);

    rec.charge(
        Stage::GlassReprocessing,
        "mass_kg * GLASS_REPROCESSING",
        json!({ "mass_kg": shipped.mass_kg, "factor": params.glass_reprocessing_kgco2_per_kg }),
        shipped.mass_kg * params.glass_reprocessing_kgco2_per_kg,
    );
    rec.transport(Stage::TransportB, RouteKey::ProcessorToReuse, float_bound.mass_kg);
    rec.transport(
        Stage::OpenLoopTransport,
        RouteKey::ProcessorToRecycling,
        open_loop_bound.mass_kg,
    );

    if decisions.equivalent_product {
        rec.equivalent_product(&start, &float_bound);
    }
    rec.waste_from_site(&start, &shipped);

    rec.finish(
        ScenarioKind::ClosedLoopRecycling,
        ScenarioKind::ClosedLoopRecycling.label(),
        float_bound,
        Some(share * 100.0),
    )
}
