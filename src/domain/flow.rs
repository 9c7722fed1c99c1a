// ==========================================
// IGU 回收碳排放评估 - 物料流状态
// ==========================================
// 红线: 三个字段只能按同一保留系数整体缩放; 只替换,不原地修改
// ==========================================

use serde::{Deserialize, Serialize};

/// 仍在流转中的物料量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowState {
    pub igus: f64,
    pub area_m2: f64,
    pub mass_kg: f64,
}

impl FlowState {
    pub fn new(igus: f64, area_m2: f64, mass_kg: f64) -> Self {
        Self {
            igus,
            area_m2,
            mass_kg,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// 按保留系数整体缩放
    pub fn scaled(&self, keep_fraction: f64) -> Self {
        Self {
            igus: self.igus * keep_fraction,
            area_m2: self.area_m2 * keep_fraction,
            mass_kg: self.mass_kg * keep_fraction,
        }
    }

    /// 与后续状态的差值 (本阶段损失量)
    pub fn delta_to(&self, after: &FlowState) -> FlowState {
        FlowState {
            igus: self.igus - after.igus,
            area_m2: self.area_m2 - after.area_m2,
            mass_kg: self.mass_kg - after.mass_kg,
        }
    }
}
