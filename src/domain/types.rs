// ==========================================
// IGU 回收碳排放评估 - 领域类型定义
// ==========================================
// 红线: 分类字段为封闭枚举,无法识别的取值必须拒绝,不得静默回退默认值
// ==========================================

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 统一化分类字段输入: 去空白、转小写、空格/连字符转下划线
fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}

// ==========================================
// 中空玻璃类型 (Glazing Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlazingType {
    Single, // 单层
    Double, // 双层
    Triple, // 三层
}

impl GlazingType {
    /// 每樘玻璃片数
    pub fn panes(&self) -> u32 {
        match self {
            GlazingType::Single => 1,
            GlazingType::Double => 2,
            GlazingType::Triple => 3,
        }
    }

    /// 空腔数量 (决定间隔条长度)
    pub fn cavities(&self) -> u32 {
        match self {
            GlazingType::Single => 0,
            GlazingType::Double => 1,
            GlazingType::Triple => 2,
        }
    }
}

impl fmt::Display for GlazingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlazingType::Single => write!(f, "single"),
            GlazingType::Double => write!(f, "double"),
            GlazingType::Triple => write!(f, "triple"),
        }
    }
}

impl FromStr for GlazingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "single" => Ok(GlazingType::Single),
            "double" => Ok(GlazingType::Double),
            "triple" => Ok(GlazingType::Triple),
            _ => Err(DomainError::unrecognized("glazing_type", s)),
        }
    }
}

// ==========================================
// 玻璃原片类型 (Glass Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlassType {
    Annealed,  // 退火玻璃
    Tempered,  // 钢化玻璃
    Laminated, // 夹层玻璃
}

impl GlassType {
    pub fn is_laminated(&self) -> bool {
        matches!(self, GlassType::Laminated)
    }
}

impl fmt::Display for GlassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlassType::Annealed => write!(f, "annealed"),
            GlassType::Tempered => write!(f, "tempered"),
            GlassType::Laminated => write!(f, "laminated"),
        }
    }
}

impl FromStr for GlassType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "annealed" | "float" => Ok(GlassType::Annealed),
            "tempered" | "toughened" => Ok(GlassType::Tempered),
            "laminated" => Ok(GlassType::Laminated),
            _ => Err(DomainError::unrecognized("glass_type", s)),
        }
    }
}

// ==========================================
// 镀膜类型 (Coating Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoatingType {
    None,
    HardLowE,
    SoftLowE,
    SolarControl,
}

impl fmt::Display for CoatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoatingType::None => write!(f, "none"),
            CoatingType::HardLowE => write!(f, "hard_lowE"),
            CoatingType::SoftLowE => write!(f, "soft_lowE"),
            CoatingType::SolarControl => write!(f, "solar_control"),
        }
    }
}

impl FromStr for CoatingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "none" | "" => Ok(CoatingType::None),
            "hard_lowe" => Ok(CoatingType::HardLowE),
            "soft_lowe" => Ok(CoatingType::SoftLowE),
            "solar_control" => Ok(CoatingType::SolarControl),
            _ => Err(DomainError::unrecognized("coating_type", s)),
        }
    }
}

// ==========================================
// 二道密封胶类型 (Sealant Type)
// ==========================================
// 密度基准: 聚硫胶 (polysulfide) = 1.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SealantType {
    Polysulfide,
    Polyurethane,
    Silicone,
    Combination,
}

impl SealantType {
    /// 相对聚硫胶的密度系数
    pub fn density_factor(&self) -> f64 {
        match self {
            SealantType::Polyurethane => 0.85,
            SealantType::Silicone => 0.82,
            SealantType::Polysulfide | SealantType::Combination => 1.0,
        }
    }
}

impl fmt::Display for SealantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SealantType::Polysulfide => write!(f, "polysulfide"),
            SealantType::Polyurethane => write!(f, "polyurethane"),
            SealantType::Silicone => write!(f, "silicone"),
            SealantType::Combination => write!(f, "combination"),
        }
    }
}

impl FromStr for SealantType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "polysulfide" => Ok(SealantType::Polysulfide),
            "polyurethane" => Ok(SealantType::Polyurethane),
            "silicone" => Ok(SealantType::Silicone),
            "combination" | "combi" => Ok(SealantType::Combination),
            _ => Err(DomainError::unrecognized("sealant_type", s)),
        }
    }
}

// ==========================================
// 间隔条材料 (Spacer Material)
// ==========================================
// 线密度基准: 铝 = 1.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacerMaterial {
    Aluminium,
    Steel,
    WarmEdgeComposite,
}

impl SpacerMaterial {
    /// 相对铝间隔条的线重系数
    pub fn weight_factor(&self) -> f64 {
        match self {
            SpacerMaterial::Aluminium => 1.0,
            SpacerMaterial::Steel => 2.0,
            SpacerMaterial::WarmEdgeComposite => 0.6,
        }
    }
}

impl fmt::Display for SpacerMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpacerMaterial::Aluminium => write!(f, "aluminium"),
            SpacerMaterial::Steel => write!(f, "steel"),
            SpacerMaterial::WarmEdgeComposite => write!(f, "warm_edge_composite"),
        }
    }
}

impl FromStr for SpacerMaterial {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "aluminium" | "aluminum" => Ok(SpacerMaterial::Aluminium),
            "steel" | "stainless_steel" => Ok(SpacerMaterial::Steel),
            "warm_edge_composite" | "warm_edge" => Ok(SpacerMaterial::WarmEdgeComposite),
            _ => Err(DomainError::unrecognized("spacer_material", s)),
        }
    }
}

// ==========================================
// 边部密封外观状态 (Edge Seal Condition)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSealCondition {
    Acceptable,   // 可接受
    Unacceptable, // 不可接受
    NotAssessed,  // 未评估
}

impl fmt::Display for EdgeSealCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeSealCondition::Acceptable => write!(f, "acceptable"),
            EdgeSealCondition::Unacceptable => write!(f, "unacceptable"),
            EdgeSealCondition::NotAssessed => write!(f, "not assessed"),
        }
    }
}

impl FromStr for EdgeSealCondition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "acceptable" => Ok(EdgeSealCondition::Acceptable),
            "unacceptable" => Ok(EdgeSealCondition::Unacceptable),
            "not_assessed" => Ok(EdgeSealCondition::NotAssessed),
            _ => Err(DomainError::unrecognized("edge_seal_condition", s)),
        }
    }
}

// ==========================================
// 运输方式 (Transport Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Road,      // 仅公路 (HGV lorry)
    RoadFerry, // 公路 + 轮渡 (HGV lorry+ferry)
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Road => write!(f, "HGV lorry"),
            TransportMode::RoadFerry => write!(f, "HGV lorry+ferry"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "hgv_lorry" | "road" | "truck" => Ok(TransportMode::Road),
            "hgv_lorry+ferry" | "road+ferry" | "road_ferry" | "truck+ferry" => {
                Ok(TransportMode::RoadFerry)
            }
            _ => Err(DomainError::unrecognized("transport_mode", s)),
        }
    }
}

// ==========================================
// 改造强度 (Repurpose Intensity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepurposeIntensity {
    Light,
    Medium,
    Heavy,
}

impl Default for RepurposeIntensity {
    fn default() -> Self {
        RepurposeIntensity::Medium
    }
}

impl fmt::Display for RepurposeIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepurposeIntensity::Light => write!(f, "light"),
            RepurposeIntensity::Medium => write!(f, "medium"),
            RepurposeIntensity::Heavy => write!(f, "heavy"),
        }
    }
}

impl FromStr for RepurposeIntensity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "light" => Ok(RepurposeIntensity::Light),
            "medium" => Ok(RepurposeIntensity::Medium),
            "heavy" => Ok(RepurposeIntensity::Heavy),
            _ => Err(DomainError::unrecognized("repurpose_intensity", s)),
        }
    }
}

// ==========================================
// 回收路径 (Scenario Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioKind {
    SystemReuse,
    ComponentReuse,
    ComponentRepurpose,
    ClosedLoopRecycling,
    OpenLoopRecycling,
    Landfill,
}

impl ScenarioKind {
    /// 全部路径 (批量模式按此顺序展开)
    pub const ALL: [ScenarioKind; 6] = [
        ScenarioKind::SystemReuse,
        ScenarioKind::ComponentReuse,
        ScenarioKind::ComponentRepurpose,
        ScenarioKind::ClosedLoopRecycling,
        ScenarioKind::OpenLoopRecycling,
        ScenarioKind::Landfill,
    ];

    /// 报表展示名
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::SystemReuse => "System Reuse",
            ScenarioKind::ComponentReuse => "Component Reuse",
            ScenarioKind::ComponentRepurpose => "Component Repurpose",
            ScenarioKind::ClosedLoopRecycling => "Closed-loop Recycling",
            ScenarioKind::OpenLoopRecycling => "Open-loop Recycling",
            ScenarioKind::Landfill => "Straight to Landfill",
        }
    }

    /// 是否为回收类路径 (产出率按有效碎玻璃占比计)
    pub fn is_recycling(&self) -> bool {
        matches!(
            self,
            ScenarioKind::ClosedLoopRecycling | ScenarioKind::OpenLoopRecycling
        )
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ScenarioKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "system_reuse" => Ok(ScenarioKind::SystemReuse),
            "component_reuse" => Ok(ScenarioKind::ComponentReuse),
            "component_repurpose" | "repurpose" => Ok(ScenarioKind::ComponentRepurpose),
            "closed_loop_recycling" | "closed_loop" => Ok(ScenarioKind::ClosedLoopRecycling),
            "open_loop_recycling" | "open_loop" => Ok(ScenarioKind::OpenLoopRecycling),
            "landfill" | "straight_to_landfill" => Ok(ScenarioKind::Landfill),
            _ => Err(DomainError::unrecognized("scenario", s)),
        }
    }
}
