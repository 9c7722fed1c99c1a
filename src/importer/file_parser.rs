// ==========================================
// IGU 回收碳排放评估 - 表格文件解析
// ==========================================
// 支持: Excel (.xlsx/.xls, 取第一个工作表) / CSV (.csv)
// 输出: 按表头展开的行记录 (列名 → 去空白的单元格文本)
// 规则: 全空行跳过; 空表头列忽略
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 行记录: 列名 → 单元格文本
pub type RawRecord = HashMap<String, String>;

/// 表格解析接口
pub trait FileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 文件存在且扩展名在允许列表内
fn check_file(path: &Path, allowed: &[&str]) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let ext = extension_of(path);
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

/// 表头 + 数据行 → 行记录
fn zip_rows<I, R>(headers: &[String], rows: I) -> Vec<RawRecord>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    rows.into_iter()
        .filter_map(|cells| {
            let record: RawRecord = headers
                .iter()
                .zip(cells)
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, v)| (h.clone(), v.trim().to_string()))
                .collect();
            (!record.values().all(|v| v.is_empty())).then_some(record)
        })
        .collect()
}

// ==========================================
// CSV
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, path: &Path) -> ImportResult<Vec<RawRecord>> {
        check_file(path, &["csv"])?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(File::open(path)?);

        // Excel 导出的 CSV 可能带 BOM
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let rows = reader
            .records()
            .map(|r| r.map(|rec| rec.iter().map(str::to_string).collect::<Vec<_>>()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(zip_rows(&headers, rows))
    }
}

// ==========================================
// Excel
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, path: &Path) -> ImportResult<Vec<RawRecord>> {
        check_file(path, &["xlsx", "xls"])?;

        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::EmptyWorkbook(path.display().to_string()))??;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
        let headers: Vec<String> = match rows.next() {
            Some(h) => h.iter().map(|c| c.trim().to_string()).collect(),
            None => return Err(ImportError::EmptyWorkbook(path.display().to_string())),
        };

        Ok(zip_rows(&headers, rows))
    }
}

// ==========================================
// 按扩展名分派
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRecord>> {
        let path = file_path.as_ref();

        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let file = csv_file(&["Key,Value,Unit", "E_SITE_KGCO2_PER_M2,0.15,kgCO2e/m2", "SPLIT_YIELD,0.95,"]);

        let records = CsvParser.parse_to_raw_records(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Key"), Some(&"E_SITE_KGCO2_PER_M2".to_string()));
        assert_eq!(records[1].get("Value"), Some(&"0.95".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let file = csv_file(&["win_name,Unit", "A,6|16|6", ",", "B,4|12|4"]);

        let records = CsvParser.parse_to_raw_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let file = Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(matches!(
            UniversalFileParser.parse(file.path()),
            Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"
        ));
    }
}
