// ==========================================
// IGU 回收碳排放评估 - 路径决策
// ==========================================
// 职责: 把调用方给出的部分决策补全为确定值
// - interactive = false: 使用固定默认值 (批量模式)
// - interactive = true: 缺失项通过注入的 DecisionPrompt 询问
// 红线: 路径计算函数只接收补全后的 ScenarioDecisions, 不做任何询问
// ==========================================

use crate::domain::{RepurposeIntensity, ScenarioKind};
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 补全后的路径决策
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDecisions {
    pub repair_needed: bool,
    pub send_intact: bool,
    pub recondition: bool,
    pub repurpose_intensity: RepurposeIntensity,
    pub equivalent_product: bool,
    /// 现场拆除损失比例 [0, 1]
    pub removal_yield_loss: f64,
    /// 现场破碎损失比例 [0, 1], 仅在不整樘运输时生效
    pub breaking_yield_loss: f64,
}

impl Default for ScenarioDecisions {
    fn default() -> Self {
        Self {
            repair_needed: false,
            send_intact: true,
            recondition: true,
            repurpose_intensity: RepurposeIntensity::default(),
            equivalent_product: false,
            removal_yield_loss: 0.0,
            breaking_yield_loss: 0.0,
        }
    }
}

impl ScenarioDecisions {
    /// 批量模式默认值, 改造强度取工艺参数中的预设
    pub fn batch_defaults(repurpose_intensity: RepurposeIntensity) -> Self {
        Self {
            repurpose_intensity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("removal_yield_loss", self.removal_yield_loss),
            ("breaking_yield_loss", self.breaking_yield_loss),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::InvalidDecision {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// 调用方已知的决策, None 表示待定
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialDecisions {
    pub repair_needed: Option<bool>,
    pub send_intact: Option<bool>,
    pub recondition: Option<bool>,
    pub repurpose_intensity: Option<RepurposeIntensity>,
    pub equivalent_product: Option<bool>,
    pub removal_yield_loss: Option<f64>,
    pub breaking_yield_loss: Option<f64>,
}

/// 交互式决策适配器
pub trait DecisionPrompt {
    fn confirm(&self, question: &str, default: bool) -> bool;

    /// 询问损失比例, 返回 [0, 1] 之外的值会在补全后被拒绝
    fn ask_fraction(&self, question: &str, default: f64) -> f64;

    fn choose_intensity(&self, default: RepurposeIntensity) -> RepurposeIntensity;
}

/// 补全决策
///
/// 只询问与该路径相关的项; 无关项直接取默认值
pub fn resolve_decisions(
    kind: ScenarioKind,
    known: &PartialDecisions,
    interactive: bool,
    preset_intensity: RepurposeIntensity,
    prompt: Option<&dyn DecisionPrompt>,
) -> EngineResult<ScenarioDecisions> {
    let defaults = ScenarioDecisions::batch_defaults(preset_intensity);
    let prompt = if interactive { prompt } else { None };

    let ask_bool = |value: Option<bool>, relevant: bool, question: &str, default: bool| {
        match (value, prompt) {
            (Some(v), _) => v,
            (None, Some(p)) if relevant => p.confirm(question, default),
            _ => default,
        }
    };
    let ask_fraction = |value: Option<f64>, relevant: bool, question: &str| match (value, prompt) {
        (Some(v), _) => v,
        (None, Some(p)) if relevant => p.ask_fraction(question, 0.0),
        _ => 0.0,
    };

    let recycling = kind.is_recycling();
    let has_removal = kind != ScenarioKind::Landfill;

    let send_intact = ask_bool(
        known.send_intact,
        recycling,
        "Send IGUs intact to processor?",
        defaults.send_intact,
    );

    let repurpose_intensity = match (known.repurpose_intensity, prompt) {
        (Some(i), _) => i,
        (None, Some(p)) if kind == ScenarioKind::ComponentRepurpose => {
            p.choose_intensity(defaults.repurpose_intensity)
        }
        _ => defaults.repurpose_intensity,
    };

    let decisions = ScenarioDecisions {
        repair_needed: ask_bool(
            known.repair_needed,
            kind == ScenarioKind::SystemReuse,
            "Does the IGU system require repair?",
            defaults.repair_needed,
        ),
        send_intact,
        recondition: ask_bool(
            known.recondition,
            kind == ScenarioKind::ComponentReuse,
            "Is recondition of components required?",
            defaults.recondition,
        ),
        repurpose_intensity,
        equivalent_product: ask_bool(
            known.equivalent_product,
            true,
            "Add equivalent new product for the lost fraction?",
            defaults.equivalent_product,
        ),
        removal_yield_loss: ask_fraction(
            known.removal_yield_loss,
            has_removal,
            "Yield loss at on-site removal (0-1)",
        ),
        breaking_yield_loss: ask_fraction(
            known.breaking_yield_loss,
            recycling && !send_intact,
            "Yield loss at breaking (0-1)",
        ),
    };

    decisions.validate()?;
    debug!(scenario = %kind, interactive, ?decisions, "决策已补全");
    Ok(decisions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// 记录问题并返回固定答案
    struct ScriptedPrompt {
        answer: bool,
        fraction: f64,
        asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn new(answer: bool, fraction: f64) -> Self {
            Self {
                answer,
                fraction,
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl DecisionPrompt for ScriptedPrompt {
        fn confirm(&self, question: &str, _default: bool) -> bool {
            self.asked.borrow_mut().push(question.to_string());
            self.answer
        }

        fn ask_fraction(&self, question: &str, _default: f64) -> f64 {
            self.asked.borrow_mut().push(question.to_string());
            self.fraction
        }

        fn choose_intensity(&self, _default: RepurposeIntensity) -> RepurposeIntensity {
            self.asked.borrow_mut().push("intensity".to_string());
            RepurposeIntensity::Heavy
        }
    }

    #[test]
    fn test_batch_defaults() {
        let d = resolve_decisions(
            ScenarioKind::SystemReuse,
            &PartialDecisions::default(),
            false,
            RepurposeIntensity::Medium,
            None,
        )
        .unwrap();
        assert_eq!(d, ScenarioDecisions::default());
        assert!(!d.repair_needed);
        assert!(d.send_intact);
        assert!(d.recondition);
    }

    #[test]
    fn test_non_interactive_never_prompts() {
        let prompt = ScriptedPrompt::new(false, 0.5);
        let d = resolve_decisions(
            ScenarioKind::ClosedLoopRecycling,
            &PartialDecisions::default(),
            false,
            RepurposeIntensity::Light,
            Some(&prompt),
        )
        .unwrap();
        assert!(prompt.asked.borrow().is_empty());
        assert!(d.send_intact);
        assert_eq!(d.repurpose_intensity, RepurposeIntensity::Light);
    }

    #[test]
    fn test_interactive_asks_only_relevant_questions() {
        let prompt = ScriptedPrompt::new(false, 0.1);
        let d = resolve_decisions(
            ScenarioKind::ClosedLoopRecycling,
            &PartialDecisions::default(),
            true,
            RepurposeIntensity::Medium,
            Some(&prompt),
        )
        .unwrap();

        assert!(!d.send_intact);
        assert_eq!(d.breaking_yield_loss, 0.1);
        let asked = prompt.asked.borrow();
        assert!(asked.iter().any(|q| q.contains("breaking")));
        assert!(!asked.iter().any(|q| q.contains("repair")));
        assert!(!asked.iter().any(|q| q == "intensity"));
    }

    #[test]
    fn test_known_values_are_not_asked() {
        let prompt = ScriptedPrompt::new(true, 0.0);
        let known = PartialDecisions {
            repurpose_intensity: Some(RepurposeIntensity::Light),
            equivalent_product: Some(false),
            removal_yield_loss: Some(0.05),
            ..Default::default()
        };
        let d = resolve_decisions(
            ScenarioKind::ComponentRepurpose,
            &known,
            true,
            RepurposeIntensity::Medium,
            Some(&prompt),
        )
        .unwrap();
        assert_eq!(d.repurpose_intensity, RepurposeIntensity::Light);
        assert_eq!(d.removal_yield_loss, 0.05);
        assert!(prompt.asked.borrow().is_empty());
    }

    #[test]
    fn test_loss_out_of_range_rejected() {
        let known = PartialDecisions {
            removal_yield_loss: Some(1.5),
            ..Default::default()
        };
        let err = resolve_decisions(
            ScenarioKind::Landfill,
            &known,
            false,
            RepurposeIntensity::Medium,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDecision { .. }));
    }
}
