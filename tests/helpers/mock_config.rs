// ==========================================
// Mock 配置 - 用于集成测试
// ==========================================

use igu_recovery::config::{config_keys as k, EmissionParameters, MaterialConstants, ParameterSet};
use igu_recovery::domain::{
    FlowState, IGUGroup, ProcessSettings, RouteConfig, RouteKey, RouteRegistry,
    TransportModeConfig,
};
use igu_recovery::engine::{
    calculate_material_masses, BatchContext, CalculationAudit, ScenarioContext,
};

/// 强类型参数集合
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub processes: ProcessSettings,
    pub transport: TransportModeConfig,
    pub params: EmissionParameters,
    pub materials: MaterialConstants,
}

impl MockConfig {
    /// 内置默认参数 (全部路线按回退距离解析)
    pub fn builtin() -> Self {
        Self::from_parameters(&ParameterSet::builtin())
    }

    pub fn from_parameters(set: &ParameterSet) -> Self {
        let ctx = BatchContext::from_parameters(set, None).unwrap();
        Self {
            processes: ctx.processes,
            transport: ctx.transport,
            params: ctx.params,
            materials: ctx.materials,
        }
    }

    /// 填埋算例配置
    ///
    /// - E_site = 0.15 kgCO2e/m²
    /// - EF_truck = 0.1 kgCO2e/t·km, 回程系数 1.0
    /// - 仅配置 origin_to_landfill = 50 km 公路
    pub fn landfill_case() -> Self {
        let mut set = ParameterSet::builtin();
        set.set(k::E_SITE_KGCO2_PER_M2, 0.15);
        set.set(k::EMISSIONFACTOR_TRUCK, 0.1);
        set.set(k::BACKHAUL_FACTOR, 1.0);

        let mut config = Self::from_parameters(&set);
        let routes: RouteRegistry = [(RouteKey::OriginToLandfill, RouteConfig::road(50.0).unwrap())]
            .into_iter()
            .collect();
        config.processes.routes = routes;
        config
    }

    pub fn with_routes(mut self, routes: RouteRegistry) -> Self {
        self.processes.routes = routes;
        self
    }

    /// 以给定起点构建路径上下文
    pub fn context<'a>(
        &'a self,
        group: &'a IGUGroup,
        flow_start: FlowState,
        audit: &'a dyn CalculationAudit,
    ) -> ScenarioContext<'a> {
        let seal = igu_recovery::domain::SealGeometry::new(6.0, 12.0, 8.0).unwrap();
        ScenarioContext {
            processes: &self.processes,
            transport: &self.transport,
            params: &self.params,
            group,
            group_masses: calculate_material_masses(group, &seal, &self.materials),
            flow_start,
            audit,
        }
    }
}
