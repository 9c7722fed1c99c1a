// ==========================================
// IGU 回收碳排放评估 - 核心库
// ==========================================
// 职责: 中空玻璃 (IGU) 拆除后六条回收路径的隐含碳核算
// 分层: domain → config / importer → engine → report
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 参数表
pub mod config;

// 导入层 - 产品目录与路线表
pub mod importer;

// 引擎层 - 汇总、运输、回收路径
pub mod engine;

// 报表层 - CSV / JSON 输出
pub mod report;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    FlowState, IGUCondition, IGUGroup, ProcessSettings, RouteKey, RouteRegistry, ScenarioKind,
    ScenarioResult, SealGeometry, Stage, StageLedger, TransportModeConfig,
};

// 配置
pub use config::{EmissionParameters, MaterialConstants, ParameterSet};

// 引擎
pub use engine::{
    aggregate_igu_groups, apply_yield_loss, get_route_emissions, run_scenario, BatchContext,
    BatchRunner, CalculationAudit, ScenarioContext, ScenarioDecisions,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "IGU 回收碳排放评估";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
