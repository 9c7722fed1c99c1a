// ==========================================
// IGU 回收碳排放评估 - 回收路径流水线
// ==========================================
// 职责: 六条路径的分阶段排放计算
// 输入: ScenarioContext (只读) + 已补全的 ScenarioDecisions
// 输出: ScenarioResult (total == 分阶段之和)
// 红线: 纯函数, 不询问用户, 不读写全局状态; 审计通过上下文注入
// ==========================================

mod common;

pub mod closed_loop;
pub mod component_reuse;
pub mod landfill;
pub mod open_loop;
pub mod repurpose;
pub mod system_reuse;

pub use closed_loop::{float_cullet_share, run_closed_loop_recycling};
pub use component_reuse::run_component_reuse;
pub use landfill::run_landfill;
pub use open_loop::run_open_loop_recycling;
pub use repurpose::run_component_repurpose;
pub use system_reuse::run_system_reuse;

use crate::config::EmissionParameters;
use crate::domain::{FlowState, IGUGroup, ProcessSettings, ScenarioKind, ScenarioResult, TransportModeConfig};
use crate::engine::audit::CalculationAudit;
use crate::engine::decisions::ScenarioDecisions;
use crate::engine::error::EngineResult;
use crate::engine::material_mass::MaterialMasses;
use tracing::{info, instrument};

/// 单个产品分组的计算上下文
#[derive(Clone, Copy)]
pub struct ScenarioContext<'a> {
    pub processes: &'a ProcessSettings,
    pub transport: &'a TransportModeConfig,
    pub params: &'a EmissionParameters,
    pub group: &'a IGUGroup,
    /// 分组材料质量 (部件再利用的重组材料)
    pub group_masses: MaterialMasses,
    pub flow_start: FlowState,
    pub audit: &'a dyn CalculationAudit,
}

/// 按路径类型分派
#[instrument(skip(ctx, decisions), fields(product = ctx.group.display_name(), scenario = %kind))]
pub fn run_scenario(
    kind: ScenarioKind,
    ctx: &ScenarioContext<'_>,
    decisions: &ScenarioDecisions,
) -> EngineResult<ScenarioResult> {
    decisions.validate()?;

    let result = match kind {
        ScenarioKind::SystemReuse => run_system_reuse(ctx, decisions),
        ScenarioKind::ComponentReuse => run_component_reuse(ctx, decisions),
        ScenarioKind::ComponentRepurpose => run_component_repurpose(ctx, decisions),
        ScenarioKind::ClosedLoopRecycling => run_closed_loop_recycling(ctx, decisions),
        ScenarioKind::OpenLoopRecycling => run_open_loop_recycling(ctx, decisions),
        ScenarioKind::Landfill => run_landfill(ctx, decisions),
    };

    info!(
        total_kgco2e = result.total_emissions_kgco2,
        yield_percent = result.yield_percent,
        stages = result.by_stage.entries().len(),
        "路径计算完成"
    );
    Ok(result)
}
