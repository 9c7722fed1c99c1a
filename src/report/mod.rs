// ==========================================
// IGU 回收碳排放评估 - 报表层
// ==========================================
// 职责: 批次结果 → CSV 分析报表 / JSON 明细
// ==========================================

pub mod csv_report;
pub mod error;
pub mod json_report;

pub use csv_report::{build_rows, round3, write_csv, write_csv_file, ReportRow, BASE_COLUMNS};
pub use error::{ReportError, ReportResult};
pub use json_report::{write_json_file, JsonReport};
