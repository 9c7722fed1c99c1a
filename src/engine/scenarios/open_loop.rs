// ==========================================
// IGU 回收碳排放评估 - 开环回收路径
// ==========================================
// 顺序: 现场损失 → 现场拆除 → 破碎或拆解 → A 段
//      → 玻璃棉 / 容器玻璃两路分流 → 剔除部分填埋 → [等效新品]
// ==========================================

use crate::domain::{RouteKey, ScenarioKind, ScenarioResult, Stage};
use crate::engine::decisions::ScenarioDecisions;
use crate::engine::scenarios::common::StageRecorder;
use crate::engine::scenarios::ScenarioContext;

pub fn run_open_loop_recycling(
    ctx: &ScenarioContext<'_>,
    decisions: &ScenarioDecisions,
) -> ScenarioResult {
    let params = ctx.params;
    let start = ctx.flow_start;
    let mut rec = StageRecorder::new(ctx);

    let shipped = rec.recycling_front_end(decisions);

    let glasswool = shipped.scaled(params.cullet_glasswool_share);
    let container = shipped.scaled(params.cullet_container_share);
    rec.transport(
        Stage::GlasswoolTransport,
        RouteKey::ProcessorToGlasswool,
        glasswool.mass_kg,
    );
    rec.transport(
        Stage::ContainerTransport,
        RouteKey::ProcessorToContainer,
        container.mass_kg,
    );

    let useful = params.cullet_glasswool_share + params.cullet_container_share;
    let useful_flow = shipped.scaled(useful);

    rec.waste_from_site(&start, &shipped);
    rec.waste_from_processor(&shipped, &useful_flow);

    if decisions.equivalent_product {
        rec.equivalent_product(&start, &useful_flow);
    }

    rec.finish(
        ScenarioKind::OpenLoopRecycling,
        ScenarioKind::OpenLoopRecycling.label(),
        useful_flow,
        Some(useful * 100.0),
    )
}
