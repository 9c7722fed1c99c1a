// ==========================================
// IGU 回收碳排放评估 - CSV 分析报表
// ==========================================
// 列: 固定基础列 + 按名称排序的 Emissions_<阶段> 列
// 规则: 数值保留 3 位小数; 某行没有的阶段列留空
// ==========================================

use crate::domain::{Location, RouteKey};
use crate::engine::{BatchContext, BatchReport};
use crate::report::error::ReportResult;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const BASE_COLUMNS: [&str; 11] = [
    "Product Group",
    "Product Name",
    "Scenario",
    "Total Emissions (kgCO2e)",
    "Final Yield (%)",
    "Final Mass (kg)",
    "Intensity (kgCO2e/m2 output)",
    "Origin",
    "Processor",
    "Route A Mode",
    "Route A Dist (km)",
];

const STAGE_PREFIX: &str = "Emissions_";

/// 报表单行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub product_group: String,
    pub product_name: String,
    pub scenario: String,
    pub total_emissions_kgco2: f64,
    pub final_yield_percent: f64,
    pub final_mass_kg: f64,
    pub intensity_kgco2_per_m2: f64,
    pub origin: String,
    pub processor: String,
    pub route_a_mode: String,
    pub route_a_km: Option<f64>,
    /// 阶段标签 → 排放
    pub stages: BTreeMap<String, f64>,
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn format_location(loc: &Location) -> String {
    format!("{:.4},{:.4}", loc.lat, loc.lon)
}

/// 由批次结果构建报表行
pub fn build_rows(report: &BatchReport, context: &BatchContext) -> Vec<ReportRow> {
    let route_a = context.processes.routes.get(RouteKey::OriginToProcessor);
    let origin = format_location(&context.transport.origin);
    let processor = format_location(&context.transport.processor);

    report
        .items
        .iter()
        .map(|item| {
            let result = &item.result;
            ReportRow {
                product_group: item.group_id.clone().unwrap_or_else(|| "N/A".to_string()),
                product_name: item.product_name.clone(),
                scenario: result.scenario_name.clone(),
                total_emissions_kgco2: result.total_emissions_kgco2,
                final_yield_percent: result.yield_percent,
                final_mass_kg: result.final_mass_kg,
                intensity_kgco2_per_m2: result.intensity_kgco2_per_m2(),
                origin: origin.clone(),
                processor: processor.clone(),
                route_a_mode: route_a
                    .map(|r| r.mode.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                route_a_km: route_a.map(|r| r.total_km()),
                stages: result
                    .by_stage
                    .entries()
                    .iter()
                    .map(|e| (e.stage.label().to_string(), e.kgco2e))
                    .collect(),
            }
        })
        .collect()
}

/// 写 CSV
pub fn write_csv<W: Write>(rows: &[ReportRow], writer: W) -> ReportResult<()> {
    let stage_columns: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.stages.keys().map(String::as_str))
        .collect();

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(stage_columns.iter().map(|s| format!("{}{}", STAGE_PREFIX, s)));
    wtr.write_record(&header)?;

    let number = |v: f64| round3(v).to_string();
    for row in rows {
        let mut record = vec![
            row.product_group.clone(),
            row.product_name.clone(),
            row.scenario.clone(),
            number(row.total_emissions_kgco2),
            number(row.final_yield_percent),
            number(row.final_mass_kg),
            number(row.intensity_kgco2_per_m2),
            row.origin.clone(),
            row.processor.clone(),
            row.route_a_mode.clone(),
            row.route_a_km.map(number).unwrap_or_default(),
        ];
        record.extend(
            stage_columns
                .iter()
                .map(|s| row.stages.get(*s).map(|v| number(*v)).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file<P: AsRef<Path>>(rows: &[ReportRow], path: P) -> ReportResult<()> {
    let file = File::create(path.as_ref())?;
    write_csv(rows, file)?;
    info!(path = %path.as_ref().display(), rows = rows.len(), "CSV 报表已写出");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(scenario: &str, stages: &[(&str, f64)]) -> ReportRow {
        ReportRow {
            product_group: "G1".to_string(),
            product_name: "SGG 6|16|6".to_string(),
            scenario: scenario.to_string(),
            total_emissions_kgco2: stages.iter().map(|(_, v)| v).sum(),
            final_yield_percent: 80.0,
            final_mass_kg: 160.12345,
            intensity_kgco2_per_m2: 0.0,
            origin: "51.5074,-0.1278".to_string(),
            processor: "52.4862,-1.8904".to_string(),
            route_a_mode: "HGV lorry".to_string(),
            route_a_km: Some(120.0),
            stages: stages.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(-0.0004), -0.0);
    }

    #[test]
    fn test_stage_columns_sorted_and_blank_when_absent() {
        let rows = vec![
            row("Straight to Landfill", &[("Landfill Transport", 1.5), ("Dismantling", 1.5)]),
            row("System Reuse", &[("Transport A", 2.0)]),
        ];
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].ends_with(
            "Emissions_Dismantling,Emissions_Landfill Transport,Emissions_Transport A"
        ));
        assert!(lines[1].contains(",160.123,"));
        assert!(lines[1].ends_with(",1.5,1.5,"));
        assert!(lines[2].ends_with(",,,2"));
    }
}
