// ==========================================
// IGU 回收碳排放评估 - 产品目录导入器
// ==========================================
// 流程: 文件解析 → 分组号向下填充 → 逐行映射 → 汇总
// 红线: 单行失败只记录并跳过, 不中断整个目录
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{CatalogueFieldMapper, ProductRecord};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument, warn};

/// 被拒绝的目录行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row_number: usize,
    pub reason: String,
}

/// 目录导入结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogueImport {
    pub products: Vec<ProductRecord>,
    pub rejected: Vec<RowRejection>,
}

pub struct ProductCatalogueImporter {
    mapper: CatalogueFieldMapper,
}

impl ProductCatalogueImporter {
    pub fn new(mapper: CatalogueFieldMapper) -> Self {
        Self { mapper }
    }

    /// 从文件导入产品目录
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<CatalogueImport> {
        let records = UniversalFileParser.parse(path.as_ref())?;
        Ok(self.import_records(records))
    }

    /// 从已解析的行导入
    ///
    /// # 规则
    /// - "Group/ID" 列为空时沿用上一行 (合并单元格)
    /// - 行号按表格计, 表头为第 1 行
    pub fn import_records(&self, records: Vec<RawRecord>) -> CatalogueImport {
        let mut result = CatalogueImport::default();
        let mut last_group: Option<String> = None;

        for (idx, mut row) in records.into_iter().enumerate() {
            let row_number = idx + 2;

            match row.get("Group/ID").map(|v| v.trim().to_string()) {
                Some(g) if !g.is_empty() => last_group = Some(g),
                _ => {
                    if let Some(g) = &last_group {
                        row.insert("Group/ID".to_string(), g.clone());
                    }
                }
            }

            match self.mapper.map_to_product(&row, row_number) {
                Ok(product) => result.products.push(product),
                Err(e) => {
                    warn!(row = row_number, error = %e, "产品行映射失败,已跳过");
                    result.rejected.push(RowRejection {
                        row_number,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            accepted = result.products.len(),
            rejected = result.rejected.len(),
            "产品目录导入完成"
        );
        result
    }
}
