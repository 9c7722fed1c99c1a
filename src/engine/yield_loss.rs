// ==========================================
// IGU 回收碳排放评估 - 损耗原语
// ==========================================
// 红线: 物料只能通过此函数损失; 损失量由调用方计入废弃运输段
// ==========================================

use crate::domain::FlowState;

/// 施加工序损耗
///
/// # 规则
/// - 三个字段统一乘以 (1 - loss_fraction)
/// - 0 为恒等, 1 归零
/// - 损耗比例的 [0, 1] 校验在决策层完成
pub fn apply_yield_loss(state: &FlowState, loss_fraction: f64) -> FlowState {
    state.scaled(1.0 - loss_fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_zeroing() {
        let s = FlowState::new(10.0, 15.0, 300.0);
        assert_eq!(apply_yield_loss(&s, 0.0), s);
        assert_eq!(apply_yield_loss(&s, 1.0), FlowState::zero());
    }

    #[test]
    fn test_fields_scale_together() {
        let s = FlowState::new(10.0, 15.0, 300.0);
        let after = apply_yield_loss(&s, 0.2);
        assert!((after.igus - 8.0).abs() < 1e-12);
        assert!((after.area_m2 - 12.0).abs() < 1e-12);
        assert!((after.mass_kg - 240.0).abs() < 1e-12);

        let lost = s.delta_to(&after);
        assert!((lost.mass_kg - 60.0).abs() < 1e-12);
    }
}
