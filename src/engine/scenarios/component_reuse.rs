// ==========================================
// IGU 回收碳排放评估 - 部件再利用路径
// ==========================================
// 顺序: 拆除损失 → 现场拆除 → A 段 → 包装 → 拆解损失 → 拆解(拆后面积)
//      → [翻新] → 重组(间隔条+密封胶+工艺能耗) → B 段 → 安装
//      → [等效新品] → 废料运输
// ==========================================

use crate::domain::{RouteKey, ScenarioKind, ScenarioResult, Stage};
use crate::engine::decisions::ScenarioDecisions;
use crate::engine::scenarios::common::{surviving_fraction, StageRecorder};
use crate::engine::scenarios::ScenarioContext;
use crate::engine::yield_loss::apply_yield_loss;
use serde_json::json;

pub fn run_component_reuse(
    ctx: &ScenarioContext<'_>,
    decisions: &ScenarioDecisions,
) -> ScenarioResult {
    let params = ctx.params;
    let start = ctx.flow_start;
    let mut rec = StageRecorder::new(ctx);

    let removed = apply_yield_loss(&start, decisions.removal_yield_loss);
    rec.dismantling(start.area_m2);
    rec.transport_in_stillages(Stage::TransportA, RouteKey::OriginToProcessor, &removed);
    rec.packaging(removed.igus);

    let disassembled = apply_yield_loss(&removed, params.component_disassembly_yield_loss);
    rec.charge(
        Stage::Disassembly,
        "area_m2 * DISASSEMBLY",
        json!({ "area_m2": disassembled.area_m2, "factor": params.disassembly_kgco2_per_m2 }),
        disassembled.area_m2 * params.disassembly_kgco2_per_m2,
    );

    if decisions.recondition {
        rec.charge(
            Stage::Recondition,
            "area_m2 * RECONDITION",
            json!({ "area_m2": disassembled.area_m2, "factor": params.recondition_kgco2_per_m2 }),
            disassembled.area_m2 * params.recondition_kgco2_per_m2,
        );
    }

    // 新间隔条与密封胶按存活比例折算
    let fraction = surviving_fraction(&start, &disassembled);
    let spacer_kg = ctx.group_masses.spacer_kg * fraction;
    let sealant_kg = ctx.group_masses.sealant_kg * fraction;
    let materials_kgco2 = spacer_kg * params.spacer_kgco2_per_kg + sealant_kg * params.sealant_kgco2_per_kg;
    let process_kgco2 = disassembled.area_m2 * params.assembly_process_kgco2_per_m2;
    rec.charge(
        Stage::Reassembly,
        "spacer_kg * SPACER + sealant_kg * SEALANT + area_m2 * ASSEMBLY_PROCESS",
        json!({
            "surviving_fraction": fraction,
            "spacer_kg": spacer_kg,
            "sealant_kg": sealant_kg,
            "area_m2": disassembled.area_m2,
            "assembly_process": params.assembly_process_kgco2_per_m2,
        }),
        materials_kgco2 + process_kgco2,
    );

    rec.transport_in_stillages(Stage::TransportB, RouteKey::ProcessorToReuse, &disassembled);
    rec.installation(disassembled.area_m2);

    if decisions.equivalent_product {
        rec.equivalent_product(&start, &disassembled);
    }
    rec.waste_from_site(&start, &removed);
    rec.waste_from_processor(&removed, &disassembled);

    rec.finish(
        ScenarioKind::ComponentReuse,
        ScenarioKind::ComponentReuse.label(),
        disassembled,
        None,
    )
}
