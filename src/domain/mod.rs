// ==========================================
// IGU 回收碳排放评估 - 领域模型层
// ==========================================
// 职责: 定义 IGU 分组、工艺参数、运输段、物料流与结果
// 红线: 不含文件读写逻辑,不含路径计算逻辑
// ==========================================

pub mod error;
pub mod flow;
pub mod igu;
pub mod ledger;
pub mod process;
pub mod transport;
pub mod types;

// 重导出核心类型
pub use error::{DomainError, DomainResult};
pub use flow::FlowState;
pub use igu::{IGUCondition, IGUGroup, SealGeometry};
pub use ledger::{ScenarioResult, Stage, StageEntry, StageLedger};
pub use process::ProcessSettings;
pub use transport::{Location, RouteConfig, RouteKey, RouteRegistry, TransportModeConfig};
pub use types::{
    CoatingType, EdgeSealCondition, GlassType, GlazingType, RepurposeIntensity, ScenarioKind,
    SealantType, SpacerMaterial, TransportMode,
};
