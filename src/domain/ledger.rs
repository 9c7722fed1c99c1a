// ==========================================
// IGU 回收碳排放评估 - 分阶段排放台账与路径结果
// ==========================================
// 红线: total 由台账求和得出,不单独存储可漂移的副本
// ==========================================

use crate::domain::flow::FlowState;
use crate::domain::types::ScenarioKind;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Stage - 排放阶段标签
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Dismantling,
    Packaging,
    TransportA,
    Repair,
    Disassembly,
    Recondition,
    Reassembly,
    Repurposing,
    Breaking,
    GlassReprocessing,
    TransportB,
    OpenLoopTransport,
    GlasswoolTransport,
    ContainerTransport,
    Installation,
    LandfillTransport,
    WasteTransportSite,
    WasteTransportProcessor,
    EquivalentNewGlass,
    EquivalentReassembly,
    EquivalentTransport,
    EquivalentInstallation,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Dismantling => "Dismantling",
            Stage::Packaging => "Packaging",
            Stage::TransportA => "Transport A",
            Stage::Repair => "Repair",
            Stage::Disassembly => "Disassembly",
            Stage::Recondition => "Recondition",
            Stage::Reassembly => "Reassembly",
            Stage::Repurposing => "Repurposing",
            Stage::Breaking => "Breaking",
            Stage::GlassReprocessing => "Glass Reprocessing",
            Stage::TransportB => "Transport B",
            Stage::OpenLoopTransport => "Open-loop Transport",
            Stage::GlasswoolTransport => "Glasswool Transport",
            Stage::ContainerTransport => "Container Transport",
            Stage::Installation => "Installation",
            Stage::LandfillTransport => "Landfill Transport",
            Stage::WasteTransportSite => "Waste Transport (Site)",
            Stage::WasteTransportProcessor => "Waste Transport (Processor)",
            Stage::EquivalentNewGlass => "Equivalent New Glass",
            Stage::EquivalentReassembly => "Equivalent Reassembly",
            Stage::EquivalentTransport => "Equivalent Transport",
            Stage::EquivalentInstallation => "Equivalent Installation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// StageLedger - 有序台账
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageEntry {
    pub stage: Stage,
    pub kgco2e: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageLedger {
    entries: Vec<StageEntry>,
}

impl StageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记账; 同一阶段重复记账时累加,保持首次出现的顺序
    pub fn add(&mut self, stage: Stage, kgco2e: f64) {
        match self.entries.iter_mut().find(|e| e.stage == stage) {
            Some(entry) => entry.kgco2e += kgco2e,
            None => self.entries.push(StageEntry { stage, kgco2e }),
        }
    }

    pub fn get(&self, stage: Stage) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.stage == stage)
            .map(|e| e.kgco2e)
    }

    pub fn entries(&self) -> &[StageEntry] {
        &self.entries
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.kgco2e).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==========================================
// ScenarioResult - 路径计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub kind: ScenarioKind,
    pub total_emissions_kgco2: f64,
    pub by_stage: StageLedger,

    pub initial_igus: f64,
    pub initial_area_m2: f64,
    pub initial_mass_kg: f64,
    pub final_igus: f64,
    pub final_area_m2: f64,
    pub final_mass_kg: f64,

    pub yield_percent: f64,
}

impl ScenarioResult {
    /// 由台账构建结果
    ///
    /// # 参数
    /// - `yield_percent`: 回收类路径传入有效碎玻璃占比; 其余路径传 None,按面积比计算
    pub fn from_ledger(
        kind: ScenarioKind,
        scenario_name: impl Into<String>,
        by_stage: StageLedger,
        initial: FlowState,
        final_state: FlowState,
        yield_percent: Option<f64>,
    ) -> Self {
        let yield_percent = yield_percent.unwrap_or_else(|| {
            if initial.area_m2 > 0.0 {
                final_state.area_m2 / initial.area_m2 * 100.0
            } else {
                0.0
            }
        });

        Self {
            scenario_name: scenario_name.into(),
            kind,
            total_emissions_kgco2: by_stage.total(),
            by_stage,
            initial_igus: initial.igus,
            initial_area_m2: initial.area_m2,
            initial_mass_kg: initial.mass_kg,
            final_igus: final_state.igus,
            final_area_m2: final_state.area_m2,
            final_mass_kg: final_state.mass_kg,
            yield_percent,
        }
    }

    /// 单位产出面积排放强度 (kgCO2e/m²)
    pub fn intensity_kgco2_per_m2(&self) -> f64 {
        if self.final_area_m2 > 0.0 {
            self.total_emissions_kgco2 / self.final_area_m2
        } else {
            0.0
        }
    }
}
