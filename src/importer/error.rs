// ==========================================
// IGU 回收碳排放评估 - 导入层错误类型
// ==========================================
// 文件级错误: 整个文件不可用
// 行级错误: 携带表格行号 (表头为第 1 行), 由目录导入器记录后跳过
// ==========================================

use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件级 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("不支持的文件类型: {0} (支持 .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("工作簿为空: {0}")]
    EmptyWorkbook(String),

    #[error("读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 解析失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel 解析失败: {0}")]
    Excel(#[from] calamine::Error),

    // ===== 行级 =====
    #[error("第 {row} 行映射失败: {message}")]
    RowMapping { row: usize, message: String },

    #[error("第 {row} 行 {field} 取值无效: {message}")]
    InvalidCell {
        row: usize,
        field: String,
        message: String,
    },

    #[error("第 {row} 行构造串无法识别: {value}")]
    InvalidBuildUp { row: usize, value: String },

    #[error("第 {row} 行不满足分组约束: {source}")]
    DomainViolation {
        row: usize,
        #[source]
        source: DomainError,
    },
}

impl ImportError {
    /// 行级错误的行号
    pub fn row(&self) -> Option<usize> {
        match self {
            ImportError::RowMapping { row, .. }
            | ImportError::InvalidCell { row, .. }
            | ImportError::InvalidBuildUp { row, .. }
            | ImportError::DomainViolation { row, .. } => Some(*row),
            _ => None,
        }
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
