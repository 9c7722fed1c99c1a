// ==========================================
// IGU 回收碳排放评估 - 批次汇总
// ==========================================
// 职责: 数量/面积汇总, 资格过滤, 破损与受潮存活, 拆片再制造数量
// 红线: 空批次返回全 0, 不报错; 所有除法先判零
// ==========================================

use crate::domain::{IGUGroup, ProcessSettings};
use crate::engine::error::EngineResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 批次汇总统计
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchStats {
    pub total_igus: f64,
    pub total_area_m2: f64,
    pub acceptable_igus: f64,
    pub acceptable_area_m2: f64,
    /// 破损与受潮失效后的存活数量
    pub surviving_igus: f64,
    /// 合格分组按数量加权的平均片数
    pub panes_per_igu: f64,
    pub available_panes: f64,
    pub remanufactured_igus: f64,
    pub remanufactured_area_m2: f64,
    pub average_area_per_igu_m2: f64,
}

/// 汇总 IGU 分组
///
/// # 规则
/// - 合格: reuse_allowed ∧ ¬cracks ∧ edge_seal ≠ unacceptable ∧ ¬fogging
/// - 存活 = 合格 × (1 − breakage) × (1 − humidity)
/// - 片数按合格分组数量加权平均 (混合批次近似)
/// - 可用片数 = 存活 × 片数 × split_yield
/// - 再制造数量 = floor(可用片数 / 片数) × remanufacturing_yield
#[instrument(skip(groups, processes), fields(groups = groups.len()))]
pub fn aggregate_igu_groups(
    groups: &[IGUGroup],
    processes: &ProcessSettings,
) -> EngineResult<BatchStats> {
    let mut total_igus = 0.0;
    let mut total_area_m2 = 0.0;
    let mut acceptable_igus = 0.0;
    let mut weighted_panes = 0.0;

    for group in groups {
        group.validate()?;

        let quantity = group.quantity as f64;
        total_igus += quantity;
        total_area_m2 += group.total_area_m2();

        if group.condition.is_eligible() {
            acceptable_igus += quantity;
            weighted_panes += quantity * group.glazing_type.panes() as f64;
        }
    }

    let surviving_igus = acceptable_igus
        * (1.0 - processes.breakage_rate_global)
        * (1.0 - processes.humidity_failure_rate);

    let panes_per_igu = if acceptable_igus > 0.0 {
        weighted_panes / acceptable_igus
    } else {
        0.0
    };

    let available_panes = surviving_igus * panes_per_igu * processes.split_yield;
    let remanufactured_igus = if panes_per_igu > 0.0 {
        (available_panes / panes_per_igu).floor() * processes.remanufacturing_yield
    } else {
        0.0
    };

    let average_area_per_igu_m2 = if total_igus > 0.0 {
        total_area_m2 / total_igus
    } else {
        0.0
    };

    let stats = BatchStats {
        total_igus,
        total_area_m2,
        acceptable_igus,
        acceptable_area_m2: average_area_per_igu_m2 * acceptable_igus,
        surviving_igus,
        panes_per_igu,
        available_panes,
        remanufactured_igus,
        remanufactured_area_m2: average_area_per_igu_m2 * remanufactured_igus,
        average_area_per_igu_m2,
    };

    debug!(
        total_igus = stats.total_igus,
        acceptable_igus = stats.acceptable_igus,
        remanufactured_igus = stats.remanufactured_igus,
        "批次汇总完成"
    );
    Ok(stats)
}
