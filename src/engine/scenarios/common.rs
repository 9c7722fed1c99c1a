// ==========================================
// IGU 回收碳排放评估 - 路径公共环节
// ==========================================
// 职责: 记账 + 审计, 运输段, 周转架包装, 废料运输, 等效新品补足
// 红线: 每一笔排放都经由 StageRecorder 记入台账, 不得算而不记
// ==========================================

use crate::domain::{FlowState, RouteKey, ScenarioKind, ScenarioResult, Stage, StageLedger};
use crate::engine::decisions::ScenarioDecisions;
use crate::engine::route_emission::get_route_emissions;
use crate::engine::scenarios::ScenarioContext;
use crate::engine::yield_loss::apply_yield_loss;
use serde_json::{json, Value};

pub(crate) struct StageRecorder<'c, 'a> {
    ctx: &'c ScenarioContext<'a>,
    ledger: StageLedger,
}

impl<'c, 'a> StageRecorder<'c, 'a> {
    pub fn new(ctx: &'c ScenarioContext<'a>) -> Self {
        Self {
            ctx,
            ledger: StageLedger::new(),
        }
    }

    /// 记入一项面积/质量类排放并写审计
    pub fn charge(&mut self, stage: Stage, formula: &str, variables: Value, kgco2e: f64) {
        self.ctx
            .audit
            .log_calculation(stage.label(), formula, variables, kgco2e);
        self.ledger.add(stage, kgco2e);
    }

    /// 按路线键记入运输排放
    pub fn transport(&mut self, stage: Stage, key: RouteKey, mass_kg: f64) -> f64 {
        let kgco2e = get_route_emissions(
            mass_kg,
            key,
            self.ctx.processes,
            self.ctx.transport,
            self.ctx.audit,
        );
        self.ledger.add(stage, kgco2e);
        kgco2e
    }

    /// 整樘运输: 载荷 = 物料质量 + 周转架空架质量
    pub fn transport_in_stillages(&mut self, stage: Stage, key: RouteKey, flow: &FlowState) {
        let stillage_kg = self.ctx.processes.stillage_mass_for(flow.igus);
        self.transport(stage, key, flow.mass_kg + stillage_kg);
    }

    /// 周转架隐含碳, 仅在计入时记账
    pub fn packaging(&mut self, igus: f64) {
        let processes = self.ctx.processes;
        if !processes.include_stillage_embodied {
            return;
        }
        let factor = processes.packaging_factor_per_igu();
        self.charge(
            Stage::Packaging,
            "igus * stillage_manufacture / (lifetime_cycles * igus_per_stillage)",
            json!({ "igus": igus, "factor_per_igu": factor }),
            igus * factor,
        );
    }

    /// 现场拆除 (拆前面积)
    pub fn dismantling(&mut self, area_m2: f64) {
        let factor = self.ctx.processes.e_site_kgco2_per_m2;
        self.charge(
            Stage::Dismantling,
            "area_m2 * E_site",
            json!({ "area_m2": area_m2, "e_site": factor }),
            area_m2 * factor,
        );
    }

    pub fn installation(&mut self, area_m2: f64) {
        let factor = self.ctx.params.install_system_kgco2_per_m2;
        self.charge(
            Stage::Installation,
            "area_m2 * INSTALL_SYSTEM",
            json!({ "area_m2": area_m2, "factor": factor }),
            area_m2 * factor,
        );
    }

    /// 废料运输; 损失质量为 0 时记 0, 不查路线
    pub fn waste(&mut self, stage: Stage, key: RouteKey, lost_mass_kg: f64) {
        if lost_mass_kg > 0.0 {
            self.transport(stage, key, lost_mass_kg);
        } else {
            self.ledger.add(stage, 0.0);
        }
    }

    /// 现场损失 → origin_to_landfill
    pub fn waste_from_site(&mut self, before: &FlowState, after: &FlowState) {
        let lost = before.delta_to(after);
        self.waste(Stage::WasteTransportSite, RouteKey::OriginToLandfill, lost.mass_kg);
    }

    /// 处理厂损失 → processor_to_landfill
    pub fn waste_from_processor(&mut self, before: &FlowState, after: &FlowState) {
        let lost = before.delta_to(after);
        self.waste(
            Stage::WasteTransportProcessor,
            RouteKey::ProcessorToLandfill,
            lost.mass_kg,
        );
    }

    /// 等效新品补足: 按 (初始 − 最终) 的面积与质量补足
    pub fn equivalent_product(&mut self, start: &FlowState, final_state: &FlowState) {
        let params = self.ctx.params;
        let lost = start.delta_to(final_state);
        let lost_area = lost.area_m2.max(0.0);
        let lost_mass = lost.mass_kg.max(0.0);

        self.charge(
            Stage::EquivalentNewGlass,
            "lost_mass_kg * VIRGIN_GLASS",
            json!({ "lost_mass_kg": lost_mass, "factor": params.virgin_glass_kgco2_per_kg }),
            lost_mass * params.virgin_glass_kgco2_per_kg,
        );
        self.charge(
            Stage::EquivalentReassembly,
            "lost_area_m2 * REMANUFACTURING",
            json!({ "lost_area_m2": lost_area, "factor": params.remanufacturing_kgco2_per_m2 }),
            lost_area * params.remanufacturing_kgco2_per_m2,
        );
        self.transport(Stage::EquivalentTransport, RouteKey::ProcessorToReuse, lost_mass);
        self.charge(
            Stage::EquivalentInstallation,
            "lost_area_m2 * INSTALL_SYSTEM",
            json!({ "lost_area_m2": lost_area, "factor": params.install_system_kgco2_per_m2 }),
            lost_area * params.install_system_kgco2_per_m2,
        );
    }

    /// 回收类路径前段: 拆除 [破碎] → 现场拆除 → 破碎或处理厂拆解 → A 段
    ///
    /// 返回运往处理厂的物料流
    pub fn recycling_front_end(&mut self, decisions: &ScenarioDecisions) -> FlowState {
        let params = self.ctx.params;
        let start = self.ctx.flow_start;

        let removed = apply_yield_loss(&start, decisions.removal_yield_loss);
        let shipped = if decisions.send_intact {
            removed
        } else {
            apply_yield_loss(&removed, decisions.breaking_yield_loss)
        };

        self.dismantling(start.area_m2);
        if decisions.send_intact {
            self.charge(
                Stage::Disassembly,
                "area_m2 * DISASSEMBLY",
                json!({ "area_m2": shipped.area_m2, "factor": params.disassembly_kgco2_per_m2 }),
                shipped.area_m2 * params.disassembly_kgco2_per_m2,
            );
            self.transport_in_stillages(Stage::TransportA, RouteKey::OriginToProcessor, &shipped);
            self.packaging(shipped.igus);
        } else {
            self.charge(
                Stage::Breaking,
                "area_m2 * BREAKING",
                json!({ "area_m2": removed.area_m2, "factor": params.breaking_kgco2_per_m2 }),
                removed.area_m2 * params.breaking_kgco2_per_m2,
            );
            // 碎玻璃散装运输, 不计周转架
            self.transport(Stage::TransportA, RouteKey::OriginToProcessor, shipped.mass_kg);
        }

        shipped
    }

    pub fn finish(
        self,
        kind: ScenarioKind,
        name: impl Into<String>,
        final_state: FlowState,
        yield_percent: Option<f64>,
    ) -> ScenarioResult {
        ScenarioResult::from_ledger(
            kind,
            name,
            self.ledger,
            self.ctx.flow_start,
            final_state,
            yield_percent,
        )
    }
}

/// 面积保留比例, 初始面积为 0 时返回 0
pub(crate) fn surviving_fraction(start: &FlowState, current: &FlowState) -> f64 {
    if start.area_m2 > 0.0 {
        current.area_m2 / start.area_m2
    } else {
        0.0
    }
}
