// ==========================================
// IGU 回收碳排放评估 - 整樘再利用路径
// ==========================================
// 顺序: 拆除损失 → 现场拆除(拆前面积) → A 段 → 包装
//      → 维修损失 或 默认复用损失 → B 段 → 安装 → [等效新品] → 废料运输
// ==========================================

use crate::domain::{GlazingType, RouteKey, ScenarioKind, ScenarioResult, Stage};
use crate::engine::decisions::ScenarioDecisions;
use crate::engine::scenarios::common::StageRecorder;
use crate::engine::scenarios::ScenarioContext;
use crate::engine::yield_loss::apply_yield_loss;
use serde_json::json;

pub fn run_system_reuse(ctx: &ScenarioContext<'_>, decisions: &ScenarioDecisions) -> ScenarioResult {
    let params = ctx.params;
    let start = ctx.flow_start;
    let mut rec = StageRecorder::new(ctx);

    let removed = apply_yield_loss(&start, decisions.removal_yield_loss);
    rec.dismantling(start.area_m2);
    rec.transport_in_stillages(Stage::TransportA, RouteKey::OriginToProcessor, &removed);
    rec.packaging(removed.igus);

    let ready = if decisions.repair_needed {
        let repaired = apply_yield_loss(&removed, params.repair_yield_loss);
        // 三层中空两个空腔都需重新充气密封
        let multiplier = if ctx.group.glazing_type == GlazingType::Triple {
            2.0
        } else {
            1.0
        };
        rec.charge(
            Stage::Repair,
            "area_m2 * REPAIR * cavity_multiplier",
            json!({
                "area_m2": repaired.area_m2,
                "factor": params.repair_kgco2_per_m2,
                "cavity_multiplier": multiplier,
            }),
            repaired.area_m2 * params.repair_kgco2_per_m2 * multiplier,
        );
        repaired
    } else {
        apply_yield_loss(&removed, params.system_reuse_default_yield_loss)
    };

    rec.transport_in_stillages(Stage::TransportB, RouteKey::ProcessorToReuse, &ready);
    rec.installation(ready.area_m2);

    if decisions.equivalent_product {
        rec.equivalent_product(&start, &ready);
    }
    rec.waste_from_site(&start, &removed);
    rec.waste_from_processor(&removed, &ready);

    rec.finish(
        ScenarioKind::SystemReuse,
        ScenarioKind::SystemReuse.label(),
        ready,
        None,
    )
}
