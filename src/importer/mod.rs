// ==========================================
// IGU 回收碳排放评估 - 导入层
// ==========================================
// 职责: 外部表格 → 产品分组 / 路线注册表
// 支持: Excel, CSV
// ==========================================

pub mod catalogue_importer;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod route_table;

pub use catalogue_importer::{CatalogueImport, ProductCatalogueImporter, RowRejection};
pub use error::{ImportError, ImportResult};
pub use field_mapper::{BuildUp, CatalogueFieldMapper, ProductRecord};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use route_table::RouteTableImporter;
