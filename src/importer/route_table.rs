// ==========================================
// IGU 回收碳排放评估 - 路线表导入
// ==========================================
// 列: route_key, mode, truck_km, ferry_km
// 红线: 路线键/运输方式无法识别或距离为负 → 整表失败
// ==========================================

use crate::domain::{RouteConfig, RouteKey, RouteRegistry, TransportMode};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use std::path::Path;
use tracing::{info, warn};

pub struct RouteTableImporter;

impl RouteTableImporter {
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<RouteRegistry> {
        let records = UniversalFileParser.parse(path.as_ref())?;
        let registry = self.import_records(&records)?;
        info!(
            path = %path.as_ref().display(),
            routes = registry.len(),
            "路线表加载完成"
        );
        Ok(registry)
    }

    pub fn import_records(&self, records: &[RawRecord]) -> ImportResult<RouteRegistry> {
        let mut registry = RouteRegistry::new();

        for (idx, row) in records.iter().enumerate() {
            let row_number = idx + 2;
            let domain_err = |source| ImportError::DomainViolation {
                row: row_number,
                source,
            };

            let key: RouteKey = required(row, "route_key", row_number)?
                .parse()
                .map_err(domain_err)?;

            let truck_km = number(row, "truck_km", row_number)?;
            let ferry_km = number(row, "ferry_km", row_number)?;
            let mode = match cell(row, "mode") {
                Some(m) => m.parse::<TransportMode>().map_err(domain_err)?,
                None if ferry_km > 0.0 => TransportMode::RoadFerry,
                None => TransportMode::Road,
            };

            if mode == TransportMode::Road && ferry_km > 0.0 {
                warn!(row = row_number, route = %key, ferry_km, "公路路线的轮渡距离不计入排放");
            }
            let route = RouteConfig::new(mode, truck_km, ferry_km).map_err(domain_err)?;
            registry.insert(key, route);
        }

        Ok(registry)
    }
}

fn cell<'a>(row: &'a RawRecord, name: &str) -> Option<&'a str> {
    row.iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(name))
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

fn required<'a>(row: &'a RawRecord, name: &str, row_number: usize) -> ImportResult<&'a str> {
    cell(row, name).ok_or_else(|| ImportError::RowMapping {
        row: row_number,
        message: format!("缺少列 {}", name),
    })
}

/// 距离列, 空值按 0 计
fn number(row: &RawRecord, name: &str, row_number: usize) -> ImportResult<f64> {
    match cell(row, name) {
        None => Ok(0.0),
        Some(v) => v
            .parse::<f64>()
            .map_err(|_| ImportError::InvalidCell {
                row: row_number,
                field: name.to_string(),
                message: format!("无法解析为浮点数: {}", v),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_route_table_rows() {
        let records = vec![
            row(&[("route_key", "origin_to_processor"), ("mode", "HGV lorry"), ("truck_km", "120")]),
            row(&[("route_key", "processor_to_reuse"), ("truck_km", "80"), ("ferry_km", "35")]),
        ];
        let registry = RouteTableImporter.import_records(&records).unwrap();

        assert_eq!(registry.len(), 2);
        let b = registry.get(RouteKey::ProcessorToReuse).unwrap();
        assert_eq!(b.mode, TransportMode::RoadFerry);
        assert_eq!(b.total_km(), 115.0);
    }

    #[test]
    fn test_explicit_road_mode_keeps_ferry_out_of_distance() {
        let records = vec![row(&[
            ("route_key", "processor_to_reuse"),
            ("mode", "HGV lorry"),
            ("truck_km", "80"),
            ("ferry_km", "35"),
        ])];
        let registry = RouteTableImporter.import_records(&records).unwrap();

        let b = registry.get(RouteKey::ProcessorToReuse).unwrap();
        assert_eq!(b.mode, TransportMode::Road);
        assert_eq!(b.billed_ferry_km(), 0.0);
        assert_eq!(b.total_km(), 80.0);
    }

    #[test]
    fn test_unknown_route_key_rejected() {
        let records = vec![row(&[("route_key", "site_to_moon"), ("truck_km", "1")])];
        let err = RouteTableImporter.import_records(&records).unwrap_err();
        assert_eq!(err.row(), Some(2));
    }

    #[test]
    fn test_negative_distance_rejected() {
        let records = vec![row(&[("route_key", "origin_to_landfill"), ("truck_km", "-5")])];
        assert!(RouteTableImporter.import_records(&records).is_err());
    }
}
