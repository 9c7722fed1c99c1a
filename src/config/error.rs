// ==========================================
// IGU 回收碳排放评估 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 缺失必需参数必须在计算开始前失败
// ==========================================

use crate::domain::error::DomainError;
use crate::importer::error::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 参数缺失/格式 =====
    #[error("缺少必需参数: {0}")]
    MissingKey(String),

    #[error("参数值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    // ===== 参数文件 =====
    #[error("参数文件缺少 Key/Value 列: {0}")]
    MissingColumns(String),

    #[error("参数文件读取失败: {0}")]
    Import(#[from] ImportError),

    // ===== 领域校验 =====
    #[error("参数不满足领域约束: {0}")]
    Domain(#[from] DomainError),
}

impl ConfigError {
    pub fn invalid(key: &str, value: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message: message.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
