// ==========================================
// IGU 回收碳排放评估 - JSON 报表
// ==========================================
// 内容: 运行元数据 + 全部路径结果 (含分阶段台账) + 失败清单
// ==========================================

use crate::domain::{RouteRegistry, TransportModeConfig};
use crate::engine::{BatchContext, BatchFailure, BatchItem, BatchReport, ScenarioDecisions};
use crate::report::error::ReportResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub version: &'static str,
    pub transport: &'a TransportModeConfig,
    pub routes: &'a RouteRegistry,
    pub decisions: &'a ScenarioDecisions,
    pub results: &'a [BatchItem],
    pub failures: &'a [BatchFailure],
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a BatchReport, context: &'a BatchContext) -> Self {
        Self {
            generated_at: Utc::now(),
            version: crate::VERSION,
            transport: &context.transport,
            routes: &context.processes.routes,
            decisions: &context.decisions,
            results: &report.items,
            failures: &report.failures,
        }
    }
}

pub fn write_json_file<P: AsRef<Path>>(
    report: &BatchReport,
    context: &BatchContext,
    path: P,
) -> ReportResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &JsonReport::new(report, context))?;
    writer.flush()?;
    info!(
        path = %path.as_ref().display(),
        results = report.items.len(),
        "JSON 报表已写出"
    );
    Ok(())
}
