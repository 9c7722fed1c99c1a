// ==========================================
// IGU 回收碳排放评估 - 部件改造路径
// ==========================================
// 顺序: 拆除损失 → 现场拆除 → A 段 → 包装 → 拆解损失 → 拆解(拆前面积)
//      → 改造(轻/中/重) → B 段 → 安装 → [等效新品] → 废料运输
// ==========================================

use crate::domain::{RouteKey, ScenarioKind, ScenarioResult, Stage};
use crate::engine::decisions::ScenarioDecisions;
use crate::engine::scenarios::common::StageRecorder;
use crate::engine::scenarios::ScenarioContext;
use crate::engine::yield_loss::apply_yield_loss;
use serde_json::json;

pub fn run_component_repurpose(
    ctx: &ScenarioContext<'_>,
    decisions: &ScenarioDecisions,
) -> ScenarioResult {
    let params = ctx.params;
    let start = ctx.flow_start;
    let intensity = decisions.repurpose_intensity;
    let mut rec = StageRecorder::new(ctx);

    let removed = apply_yield_loss(&start, decisions.removal_yield_loss);
    rec.dismantling(start.area_m2);
    rec.transport_in_stillages(Stage::TransportA, RouteKey::OriginToProcessor, &removed);
    rec.packaging(removed.igus);

    let disassembled = apply_yield_loss(&removed, params.repurpose_disassembly_yield_loss);
    rec.charge(
        Stage::Disassembly,
        "area_m2 * DISASSEMBLY",
        json!({ "area_m2": removed.area_m2, "factor": params.disassembly_kgco2_per_m2 }),
        removed.area_m2 * params.disassembly_kgco2_per_m2,
    );

    let factor = ctx.processes.repurpose_factor(intensity);
    rec.charge(
        Stage::Repurposing,
        "area_m2 * REPURPOSE[intensity]",
        json!({
            "area_m2": disassembled.area_m2,
            "intensity": intensity.to_string(),
            "factor": factor,
        }),
        disassembled.area_m2 * factor,
    );

    rec.transport_in_stillages(Stage::TransportB, RouteKey::ProcessorToReuse, &disassembled);
    rec.installation(disassembled.area_m2);

    if decisions.equivalent_product {
        rec.equivalent_product(&start, &disassembled);
    }
    rec.waste_from_site(&start, &removed);
    rec.waste_from_processor(&removed, &disassembled);

    rec.finish(
        ScenarioKind::ComponentRepurpose,
        format!("{} ({})", ScenarioKind::ComponentRepurpose.label(), intensity),
        disassembled,
        None,
    )
}
