// ==========================================
// IGU 回收碳排放评估 - 批量评估入口
// ==========================================
// 用法:
//   igu-recovery <catalogue> [--params FILE] [--routes FILE] [--out DIR]
//                [--parallel] [--json-logs]
// 输出: automated_analysis_report.csv / .json + audit_<时间戳>.jsonl
// 退出码: 仅配置/导入错误非 0; 单个产品失败只记录
// ==========================================

use anyhow::{bail, Context, Result};
use igu_recovery::config::{BatchDefaults, ParameterSet};
use igu_recovery::domain::IGUCondition;
use igu_recovery::engine::{BatchContext, BatchRunner, CalculationAudit, FileAudit};
use igu_recovery::importer::{CatalogueFieldMapper, ProductCatalogueImporter, RouteTableImporter};
use igu_recovery::{logging, report};
use std::path::PathBuf;
use std::sync::Arc;

const CSV_REPORT: &str = "automated_analysis_report.csv";
const JSON_REPORT: &str = "automated_analysis_report.json";

struct CliArgs {
    catalogue: PathBuf,
    params: Option<PathBuf>,
    routes: Option<PathBuf>,
    out_dir: PathBuf,
    parallel: bool,
    json_logs: bool,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut catalogue = None;
        let mut params = None;
        let mut routes = None;
        let mut out_dir = PathBuf::from(".");
        let mut parallel = false;
        let mut json_logs = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--params" => params = Some(PathBuf::from(value_of(&mut args, "--params")?)),
                "--routes" => routes = Some(PathBuf::from(value_of(&mut args, "--routes")?)),
                "--out" => out_dir = PathBuf::from(value_of(&mut args, "--out")?),
                "--parallel" => parallel = true,
                "--json-logs" => json_logs = true,
                flag if flag.starts_with("--") => bail!("未知参数: {}", flag),
                path => {
                    if catalogue.is_some() {
                        bail!("只能指定一个产品目录文件");
                    }
                    catalogue = Some(PathBuf::from(path));
                }
            }
        }

        let catalogue = catalogue.context(
            "用法: igu-recovery <catalogue> [--params FILE] [--routes FILE] [--out DIR] [--parallel] [--json-logs]",
        )?;

        Ok(Self {
            catalogue,
            params,
            routes,
            out_dir,
            parallel,
            json_logs,
        })
    }
}

fn value_of(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("参数 {} 缺少取值", flag))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", igu_recovery::APP_NAME, igu_recovery::VERSION);
    tracing::info!("==================================================");

    // 1. 参数 (内置默认 + 参数文件)
    let params = ParameterSet::load_layered(args.params.as_deref())
        .context("参数加载失败")?;

    // 2. 路线表 (可选)
    let loaded_routes = match &args.routes {
        Some(path) => Some(
            RouteTableImporter
                .import_file(path)
                .with_context(|| format!("路线表加载失败: {}", path.display()))?,
        ),
        None => None,
    };

    let context = BatchContext::from_parameters(&params, loaded_routes)
        .context("批次上下文构建失败")?;

    // 3. 产品目录
    let mapper = CatalogueFieldMapper::new(
        BatchDefaults::from_parameters(&params)?,
        IGUCondition::default(),
    );
    let catalogue = ProductCatalogueImporter::new(mapper)
        .import_file(&args.catalogue)
        .with_context(|| format!("产品目录导入失败: {}", args.catalogue.display()))?;
    if catalogue.products.is_empty() {
        bail!("产品目录没有可用行 (拒绝 {} 行)", catalogue.rejected.len());
    }

    // 4. 批量评估
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("无法创建输出目录: {}", args.out_dir.display()))?;
    let audit = Arc::new(FileAudit::create_in(&args.out_dir).context("审计文件创建失败")?);
    let runner = BatchRunner::new(context, audit.clone() as Arc<dyn CalculationAudit>);

    let batch = if args.parallel {
        runner.run_parallel(catalogue.products).await
    } else {
        runner.run(&catalogue.products)
    };

    // 5. 报表
    let rows = report::build_rows(&batch, runner.context());
    let csv_path = args.out_dir.join(CSV_REPORT);
    let json_path = args.out_dir.join(JSON_REPORT);
    report::write_csv_file(&rows, &csv_path)?;
    report::write_json_file(&batch, runner.context(), &json_path)?;
    audit.flush()?;

    tracing::info!(
        results = batch.items.len(),
        failures = batch.failures.len(),
        rejected_rows = catalogue.rejected.len(),
        csv = %csv_path.display(),
        audit = %audit.path().display(),
        "批量评估结束"
    );
    Ok(())
}
