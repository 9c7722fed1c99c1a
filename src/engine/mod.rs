// ==========================================
// IGU 回收碳排放评估 - 引擎层
// ==========================================
// 职责: 汇总与质量计算, 路线排放, 损失原语, 六条回收路径, 批量评估
// 红线: 计算函数均为显式输入的纯函数; 审计旁路以参数注入
// ==========================================

pub mod aggregation;
pub mod audit;
pub mod batch;
pub mod decisions;
pub mod error;
pub mod material_mass;
pub mod route_emission;
pub mod routing;
pub mod scenarios;
pub mod yield_loss;

// 重导出核心引擎
pub use aggregation::{aggregate_igu_groups, BatchStats};
pub use audit::{
    AuditEntry, AuditLevel, AuditSubject, CalculationAudit, FileAudit, MemoryAudit, NoOpAudit,
    ScopedAudit,
};
pub use batch::{BatchContext, BatchFailure, BatchItem, BatchReport, BatchRunner};
pub use decisions::{resolve_decisions, DecisionPrompt, PartialDecisions, ScenarioDecisions};
pub use error::{EngineError, EngineResult};
pub use material_mass::{
    calculate_material_masses, compute_igu_mass_totals, compute_sealant_volumes,
    initial_flow_state, IguMassTotals, MaterialMasses, SealantVolumes,
};
pub use route_emission::get_route_emissions;
pub use routing::{compute_route_distances, haversine_km, resolve_default_routes, RouteDistances};
pub use scenarios::{run_scenario, ScenarioContext};
pub use yield_loss::apply_yield_loss;
