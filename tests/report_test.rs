// ==========================================
// 报表层集成测试
// ==========================================
// 覆盖: 批次 → CSV / JSON 报表落盘
// ==========================================

mod helpers;

use helpers::test_data_builder::IguGroupBuilder;
use igu_recovery::config::ParameterSet;
use igu_recovery::domain::ScenarioKind;
use igu_recovery::engine::{BatchContext, BatchRunner, NoOpAudit};
use igu_recovery::report::{build_rows, write_csv_file, write_json_file, BASE_COLUMNS};
use std::sync::Arc;
use tempfile::TempDir;

fn run_batch() -> (igu_recovery::engine::BatchReport, BatchContext) {
    let context = BatchContext::from_parameters(&ParameterSet::builtin(), None).unwrap();
    let runner = BatchRunner::new(context.clone(), Arc::new(NoOpAudit));
    let products = vec![
        IguGroupBuilder::new("W-01").build_product("G1"),
        IguGroupBuilder::new("W-02").quantity(4).build_product("G2"),
    ];
    (runner.run(&products), context)
}

#[test]
fn test_csv_report_written_with_stage_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("automated_analysis_report.csv");
    let (report, context) = run_batch();

    let rows = build_rows(&report, &context);
    assert_eq!(rows.len(), 2 * ScenarioKind::ALL.len());
    write_csv_file(&rows, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(&headers[..BASE_COLUMNS.len()], &BASE_COLUMNS[..]);
    assert!(headers.iter().any(|h| h == "Emissions_Dismantling"));
    assert!(headers.iter().any(|h| h == "Emissions_Landfill Transport"));

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), rows.len());

    // 填埋行没有 Transport B
    let transport_b = headers.iter().position(|h| h == "Emissions_Transport B").unwrap();
    let landfill = records
        .iter()
        .find(|r| &r[2] == ScenarioKind::Landfill.label())
        .unwrap();
    assert_eq!(&landfill[transport_b], "");
    assert_eq!(&landfill[0], "G1");
    assert_eq!(&landfill[9], "HGV lorry");
}

#[test]
fn test_json_report_contains_results_and_routes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("automated_analysis_report.json");
    let (report, context) = run_batch();

    write_json_file(&report, &context, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["results"].as_array().unwrap().len(), report.items.len());
    assert!(value["failures"].as_array().unwrap().is_empty());
    assert_eq!(value["routes"]["origin_to_processor"]["truck_km"], 100.0);
    assert_eq!(value["version"], igu_recovery::VERSION);
}
