// ==========================================
// IGU 回收碳排放评估 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::config::error::ConfigError;
use crate::domain::error::DomainError;
use crate::domain::ScenarioKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("领域错误: {0}")]
    Domain(#[from] DomainError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ===== 决策 =====
    #[error("决策取值无效 ({field}): {value}, 期望 [0, 1]")]
    InvalidDecision { field: String, value: f64 },

    // ===== 批量 =====
    #[error("路径计算失败 (产品 {product}, 路径 {scenario}): {message}")]
    ScenarioFailed {
        product: String,
        scenario: ScenarioKind,
        message: String,
    },

    #[error("批量任务执行失败: {0}")]
    TaskJoin(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
