// ==========================================
// IGU 回收碳排放评估 - 直接填埋路径
// ==========================================
// 红线: 无产出, 最终状态恒为 0; 等效新品为整批全新替换
// ==========================================

use crate::domain::{FlowState, RouteKey, ScenarioKind, ScenarioResult, Stage};
use crate::engine::decisions::ScenarioDecisions;
use crate::engine::scenarios::common::StageRecorder;
use crate::engine::scenarios::ScenarioContext;

pub fn run_landfill(ctx: &ScenarioContext<'_>, decisions: &ScenarioDecisions) -> ScenarioResult {
    let start = ctx.flow_start;
    let mut rec = StageRecorder::new(ctx);

    rec.dismantling(start.area_m2);
    rec.transport(Stage::LandfillTransport, RouteKey::OriginToLandfill, start.mass_kg);

    let final_state = FlowState::zero();
    if decisions.equivalent_product {
        rec.equivalent_product(&start, &final_state);
    }

    rec.finish(
        ScenarioKind::Landfill,
        ScenarioKind::Landfill.label(),
        final_state,
        None,
    )
}
