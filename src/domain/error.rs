// ==========================================
// IGU 回收碳排放评估 - 领域层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 职责: 分类字段解析失败、实体不变量违反
// ==========================================

use thiserror::Error;

/// 领域层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    // ===== 分类字段 =====
    #[error("无法识别的取值 (字段 {field}): {value}")]
    UnrecognizedValue { field: String, value: String },

    // ===== 实体不变量 =====
    #[error("IGU 分组无效: {0}")]
    InvalidGroup(String),

    #[error("坐标越界: lat={lat}, lon={lon}")]
    InvalidLocation { lat: f64, lon: f64 },

    #[error("数值范围错误 (字段 {field}): 值 {value} 超出范围 [{min}, {max}]")]
    ValueOutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl DomainError {
    /// 构造"无法识别的取值"错误
    pub fn unrecognized(field: &str, value: &str) -> Self {
        DomainError::UnrecognizedValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// 构造"数值越界"错误
    pub fn out_of_range(field: &str, value: f64, min: f64, max: f64) -> Self {
        DomainError::ValueOutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        }
    }
}

/// Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
