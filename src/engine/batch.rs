// ==========================================
// IGU 回收碳排放评估 - 批量评估
// ==========================================
// 职责: 产品目录 × 路径矩阵展开计算
// 并发: run_parallel 按产品 spawn_blocking, join_all 汇合 (结果保持目录顺序)
// 红线: 单个产品/路径失败只记录并跳过, 不中断批次; 共享上下文只读
// ==========================================

use crate::config::{
    build_process_settings, build_seal_geometry, build_transport_config, EmissionParameters,
    MaterialConstants, ParameterSet,
};
use crate::domain::{
    ProcessSettings, RouteRegistry, ScenarioKind, ScenarioResult, SealGeometry, TransportModeConfig,
};
use crate::engine::aggregation::aggregate_igu_groups;
use crate::engine::audit::{CalculationAudit, ScopedAudit};
use crate::engine::decisions::ScenarioDecisions;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::material_mass::{calculate_material_masses, compute_igu_mass_totals, initial_flow_state};
use crate::engine::routing::resolve_default_routes;
use crate::engine::scenarios::{run_scenario, ScenarioContext};
use crate::importer::ProductRecord;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

// ==========================================
// 批次上下文 (只读共享)
// ==========================================
#[derive(Debug, Clone)]
pub struct BatchContext {
    pub processes: ProcessSettings,
    pub transport: TransportModeConfig,
    pub params: EmissionParameters,
    pub materials: MaterialConstants,
    pub seal: SealGeometry,
    /// 批量模式统一决策
    pub decisions: ScenarioDecisions,
    pub scenarios: Vec<ScenarioKind>,
}

impl BatchContext {
    /// 由参数表构建批次上下文
    ///
    /// # 规则
    /// - 路线: 先按地点解析默认路线, 再叠加加载的路线表 (加载项优先)
    /// - 决策: 批量默认值, 改造强度取参数预设
    /// - 路径: 全部六条
    pub fn from_parameters(
        params: &ParameterSet,
        loaded_routes: Option<RouteRegistry>,
    ) -> EngineResult<Self> {
        let transport = build_transport_config(params)?;
        let mut routes = resolve_default_routes(&transport);
        if let Some(loaded) = loaded_routes {
            routes.merge(loaded);
        }
        let processes = build_process_settings(params, routes)?;
        let decisions = ScenarioDecisions::batch_defaults(processes.repurpose_intensity);

        Ok(Self {
            params: EmissionParameters::from_parameters(params)?,
            materials: MaterialConstants::from_parameters(params)?,
            seal: build_seal_geometry(params)?,
            processes,
            transport,
            decisions,
            scenarios: ScenarioKind::ALL.to_vec(),
        })
    }
}

// ==========================================
// 批次结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub group_id: Option<String>,
    pub product_name: String,
    pub result: ScenarioResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    pub product_name: String,
    /// None 表示整个产品的任务失败
    pub scenario: Option<ScenarioKind>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    fn absorb(&mut self, other: BatchReport) {
        self.items.extend(other.items);
        self.failures.extend(other.failures);
    }
}

// ==========================================
// BatchRunner
// ==========================================
#[derive(Clone)]
pub struct BatchRunner {
    context: Arc<BatchContext>,
    audit: Arc<dyn CalculationAudit>,
}

impl BatchRunner {
    pub fn new(context: BatchContext, audit: Arc<dyn CalculationAudit>) -> Self {
        Self {
            context: Arc::new(context),
            audit,
        }
    }

    pub fn context(&self) -> &BatchContext {
        &self.context
    }

    /// 单个产品的全部路径
    pub fn evaluate_product(&self, product: &ProductRecord) -> BatchReport {
        let mut report = BatchReport::default();

        for kind in &self.context.scenarios {
            match self.evaluate_scenario(product, *kind) {
                Ok(result) => report.items.push(BatchItem {
                    group_id: product.group_id.clone(),
                    product_name: product.product_name.clone(),
                    result,
                }),
                Err(e) => {
                    warn!(
                        product = %product.product_name,
                        scenario = %kind,
                        error = %e,
                        "路径计算失败,已跳过"
                    );
                    report.failures.push(BatchFailure {
                        product_name: product.product_name.clone(),
                        scenario: Some(*kind),
                        message: e.to_string(),
                    });
                }
            }
        }

        report
    }

    fn evaluate_scenario(
        &self,
        product: &ProductRecord,
        kind: ScenarioKind,
    ) -> EngineResult<ScenarioResult> {
        let ctx = &self.context;
        let group = &product.group;
        let groups = std::slice::from_ref(group);

        let stats = aggregate_igu_groups(groups, &ctx.processes)?;
        // 物料流起点按单位面积参考质量; 精细材料质量只用于重组材料
        let masses = compute_igu_mass_totals(groups, &stats, None, &ctx.materials);
        let audit = ScopedAudit::new(self.audit.as_ref(), product.product_name.as_str(), kind);
        let scenario_ctx = ScenarioContext {
            processes: &ctx.processes,
            transport: &ctx.transport,
            params: &ctx.params,
            group,
            group_masses: calculate_material_masses(group, &ctx.seal, &ctx.materials),
            flow_start: initial_flow_state(&stats, &masses),
            audit: &audit,
        };

        run_scenario(kind, &scenario_ctx, &ctx.decisions).map_err(|e| EngineError::ScenarioFailed {
            product: product.product_name.clone(),
            scenario: kind,
            message: e.to_string(),
        })
    }

    /// 顺序执行
    #[instrument(skip(self, products), fields(products = products.len()))]
    pub fn run(&self, products: &[ProductRecord]) -> BatchReport {
        let mut report = BatchReport::default();
        for product in products {
            report.absorb(self.evaluate_product(product));
        }
        log_summary(&report);
        report
    }

    /// 并行执行 (每个产品一个阻塞任务)
    #[instrument(skip(self, products), fields(products = products.len()))]
    pub async fn run_parallel(&self, products: Vec<ProductRecord>) -> BatchReport {
        let tasks = products.into_iter().map(|product| {
            let runner = self.clone();
            async move {
                let name = product.product_name.clone();
                tokio::task::spawn_blocking(move || runner.evaluate_product(&product))
                    .await
                    .map_err(|e| (name, EngineError::TaskJoin(e.to_string())))
            }
        });

        let mut report = BatchReport::default();
        for outcome in join_all(tasks).await {
            match outcome {
                Ok(partial) => report.absorb(partial),
                Err((product_name, e)) => {
                    error!(product = %product_name, error = %e, "批量任务异常终止");
                    report.failures.push(BatchFailure {
                        product_name,
                        scenario: None,
                        message: e.to_string(),
                    });
                }
            }
        }

        log_summary(&report);
        report
    }
}

fn log_summary(report: &BatchReport) {
    info!(
        results = report.items.len(),
        failures = report.failures.len(),
        "批量评估完成"
    );
}
