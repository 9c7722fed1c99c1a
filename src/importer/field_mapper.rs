// ==========================================
// IGU 回收碳排放评估 - 产品目录字段映射器
// ==========================================
// 职责: 目录行 → IGUGroup (构造串解析、夹层标记识别、类型转换)
// 红线: 分类字段无法识别 → 行级错误, 不得回退默认值
// ==========================================

use crate::config::BatchDefaults;
use crate::domain::{
    CoatingType, GlassType, GlazingType, IGUCondition, IGUGroup, SealantType, SpacerMaterial,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRecord;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 目录中的一条产品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub group_id: Option<String>,
    pub product_name: String,
    pub row_number: usize,
    pub group: IGUGroup,
}

/// 解析后的构造串 (mm)
#[derive(Debug, Clone, PartialEq)]
pub struct BuildUp {
    pub panes: Vec<f64>,
    pub cavities: Vec<f64>,
}

impl BuildUp {
    /// 解析 "6|16|6" / "6|16|12|16|6" 形式的构造串
    ///
    /// # 规则
    /// - 玻璃与空腔交替出现, 段数必须为奇数
    /// - 每段取前导数字 ("16Ar" → 16)
    pub fn parse(value: &str, row_number: usize) -> ImportResult<Self> {
        let format_err = || ImportError::InvalidBuildUp {
            row: row_number,
            value: value.to_string(),
        };

        let parts: Vec<f64> = value
            .split('|')
            .map(|seg| leading_number(seg).ok_or_else(format_err))
            .collect::<ImportResult<_>>()?;

        if parts.is_empty() || parts.len() % 2 == 0 || parts.len() > 5 {
            return Err(format_err());
        }

        let panes = parts.iter().step_by(2).copied().collect();
        let cavities = parts.iter().skip(1).step_by(2).copied().collect();
        Ok(Self { panes, cavities })
    }

    /// 按片数推断中空类型
    pub fn glazing_type(&self) -> GlazingType {
        match self.panes.len() {
            1 => GlazingType::Single,
            2 => GlazingType::Double,
            _ => GlazingType::Triple,
        }
    }
}

fn leading_number(segment: &str) -> Option<f64> {
    let s = segment.trim();
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse::<f64>().ok().filter(|v| *v >= 0.0)
}

// ==========================================
// CatalogueFieldMapper
// ==========================================
pub struct CatalogueFieldMapper {
    pub defaults: BatchDefaults,
    pub condition: IGUCondition,
}

impl CatalogueFieldMapper {
    pub fn new(defaults: BatchDefaults, condition: IGUCondition) -> Self {
        Self {
            defaults,
            condition,
        }
    }

    pub fn map_to_product(&self, row: &RawRecord, row_number: usize) -> ImportResult<ProductRecord> {
        let product_name = self
            .get_string(row, "win_name")
            .unwrap_or_else(|| format!("Row {}", row_number));
        let group_id = self.get_string(row, "Group/ID");

        // ===== 构造 =====
        let build_up_raw = self.get_string(row, "Unit").ok_or_else(|| {
            ImportError::RowMapping {
                row: row_number,
                message: "缺少构造串 (Unit)".to_string(),
            }
        })?;
        let build_up = BuildUp::parse(&build_up_raw, row_number)?;

        let glazing_type = match self.get_string(row, "Glazing Type") {
            Some(v) => self.parse_enum::<GlazingType>(&v, row_number)?,
            None => build_up.glazing_type(),
        };
        if (glazing_type.panes() as usize) > build_up.panes.len() {
            return Err(ImportError::RowMapping {
                row: row_number,
                message: format!(
                    "构造串 {} 不足以描述 {} 中空",
                    build_up_raw, glazing_type
                ),
            });
        }

        let pane = |i: usize| build_up.panes.get(i).copied().unwrap_or(0.0);
        let cavity = |i: usize| build_up.cavities.get(i).copied().unwrap_or(0.0);
        let last_pane = build_up.panes.len() - 1;

        let (thickness_inner_mm, thickness_centre_mm, cavity_thickness_mm, cavity_thickness_2_mm) =
            match glazing_type {
                GlazingType::Single => (0.0, None, 0.0, None),
                GlazingType::Double => (pane(last_pane), None, cavity(0), None),
                GlazingType::Triple => (pane(2), Some(pane(1)), cavity(0), Some(cavity(1))),
            };

        // ===== 玻璃类型与夹层标记 =====
        let mut glass_type_outer = self.parse_glass(row, "Glass Type Outer", row_number)?;
        let mut glass_type_inner = self.parse_glass(row, "Glass Type Inner", row_number)?;
        let mut glass_type_centre = match glazing_type {
            GlazingType::Triple => Some(self.parse_glass(row, "Glass Type Centre", row_number)?),
            _ => None,
        };

        if product_name.to_lowercase().contains("lami") || self.flag(row, "Outer_Lam") {
            glass_type_outer = GlassType::Laminated;
        }
        if self.flag(row, "Inner_Lam") {
            glass_type_inner = GlassType::Laminated;
        }
        if glazing_type == GlazingType::Triple && self.flag(row, "Centre_Lam") {
            glass_type_centre = Some(GlassType::Laminated);
        }

        // ===== 分类字段 =====
        let coating_type = match self.get_string(row, "Coating Type") {
            Some(v) => self.parse_enum::<CoatingType>(&v, row_number)?,
            None => CoatingType::None,
        };
        let sealant_type_secondary = match self.get_string(row, "Sealant Type") {
            Some(v) => self.parse_enum::<SealantType>(&v, row_number)?,
            None => SealantType::Polysulfide,
        };
        let spacer_material = match self.get_string(row, "Spacer Material") {
            Some(v) => self.parse_enum::<SpacerMaterial>(&v, row_number)?,
            None => SpacerMaterial::Aluminium,
        };

        // ===== 数量与尺寸 =====
        let quantity = match self.parse_f64(row, "Quantity", row_number)? {
            Some(q) if q >= 0.0 && q.fract() == 0.0 => q as u32,
            Some(q) => {
                return Err(ImportError::InvalidCell {
                    row: row_number,
                    field: "Quantity".to_string(),
                    message: format!("期望非负整数: {}", q),
                })
            }
            None => self.defaults.quantity,
        };
        let unit_width_mm = self
            .parse_f64(row, "Width", row_number)?
            .unwrap_or(self.defaults.unit_width_mm);
        let unit_height_mm = self
            .parse_f64(row, "Height", row_number)?
            .unwrap_or(self.defaults.unit_height_mm);

        let group = IGUGroup {
            name: Some(product_name.clone()),
            quantity,
            unit_width_mm,
            unit_height_mm,
            glazing_type,
            glass_type_outer,
            glass_type_inner,
            glass_type_centre,
            coating_type,
            sealant_type_secondary,
            spacer_material,
            thickness_outer_mm: pane(0),
            thickness_inner_mm,
            thickness_centre_mm,
            cavity_thickness_mm,
            cavity_thickness_2_mm,
            condition: self.condition.clone(),
            mass_per_m2_override: self.parse_f64(row, "Mass per m2", row_number)?,
        };

        group
            .validate()
            .map_err(|source| ImportError::DomainViolation {
                row: row_number,
                source,
            })?;

        Ok(ProductRecord {
            group_id,
            product_name,
            row_number,
            group,
        })
    }

    /// 提取字符串字段，支持多个可能的列名（别名）
    fn get_string(&self, row: &RawRecord, key: &str) -> Option<String> {
        let aliases: Vec<&str> = match key {
            "win_name" => vec!["win_name", "Product Name", "Name"],
            "Group/ID" => vec!["Group/ID", "Group", "Product Group"],
            "Unit" => vec!["Unit", "Build-up", "Build Up", "Buildup"],
            "Width" => vec!["Width", "Width (mm)", "unit_width_mm"],
            "Height" => vec!["Height", "Height (mm)", "unit_height_mm"],
            "Mass per m2" => vec!["Mass per m2", "mass_per_m2", "Mass (kg/m2)"],
            _ => vec![key],
        };

        for alias in aliases {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 解析浮点数
    fn parse_f64(&self, row: &RawRecord, key: &str, row_number: usize) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => value
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ImportError::InvalidCell {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为浮点数: {}", value),
                }),
        }
    }

    fn parse_enum<T>(&self, value: &str, row_number: usize) -> ImportResult<T>
    where
        T: FromStr<Err = crate::domain::DomainError>,
    {
        value
            .parse::<T>()
            .map_err(|source| ImportError::DomainViolation {
                row: row_number,
                source,
            })
    }

    fn parse_glass(&self, row: &RawRecord, key: &str, row_number: usize) -> ImportResult<GlassType> {
        match self.get_string(row, key) {
            Some(v) => self.parse_enum::<GlassType>(&v, row_number),
            None => Ok(GlassType::Annealed),
        }
    }

    /// 夹层标记列 (Yes/Y/True/1/X 视为真)
    fn flag(&self, row: &RawRecord, key: &str) -> bool {
        self.get_string(row, key)
            .map(|v| matches!(v.to_lowercase().as_str(), "yes" | "y" | "true" | "1" | "x"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> CatalogueFieldMapper {
        CatalogueFieldMapper::new(
            BatchDefaults {
                quantity: 50,
                unit_width_mm: 1000.0,
                unit_height_mm: 1500.0,
            },
            IGUCondition::default(),
        )
    }

    fn row(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_up_parse() {
        let b = BuildUp::parse("6|16Ar|4", 1).unwrap();
        assert_eq!(b.panes, vec![6.0, 4.0]);
        assert_eq!(b.cavities, vec![16.0]);
        assert_eq!(b.glazing_type(), GlazingType::Double);

        assert!(BuildUp::parse("6|16", 1).is_err());
        assert!(BuildUp::parse("six|16|6", 1).is_err());
    }

    #[test]
    fn test_triple_build_up_mapping() {
        let r = row(&[("win_name", "Win"), ("Unit", "6|16|12|16|6"), ("Glazing Type", "triple")]);
        let p = mapper().map_to_product(&r, 2).unwrap();

        assert_eq!(p.group.thickness_outer_mm, 6.0);
        assert_eq!(p.group.thickness_inner_mm, 6.0);
        assert_eq!(p.group.thickness_centre_mm, Some(12.0));
        assert_eq!(p.group.cavity_thickness_mm, 16.0);
        assert_eq!(p.group.cavity_thickness_2_mm, Some(16.0));
        assert_eq!(p.group.quantity, 50);
    }

    #[test]
    fn test_laminate_markers() {
        let r = row(&[("win_name", "Window_lami_44"), ("Unit", "6|16|6")]);
        let p = mapper().map_to_product(&r, 2).unwrap();
        assert_eq!(p.group.glass_type_outer, GlassType::Laminated);
        assert_eq!(p.group.glass_type_inner, GlassType::Annealed);

        let r = row(&[("win_name", "WinStd"), ("Unit", "6|16|6"), ("Inner_Lam", "Yes")]);
        let p = mapper().map_to_product(&r, 3).unwrap();
        assert_eq!(p.group.glass_type_outer, GlassType::Annealed);
        assert_eq!(p.group.glass_type_inner, GlassType::Laminated);
    }

    #[test]
    fn test_single_glazing_zeroes_inner() {
        let r = row(&[("Unit", "6|16|6"), ("Glazing Type", "single"), ("Quantity", "5")]);
        let p = mapper().map_to_product(&r, 4).unwrap();
        assert_eq!(p.group.glazing_type, GlazingType::Single);
        assert_eq!(p.group.thickness_inner_mm, 0.0);
        assert_eq!(p.group.cavity_thickness_mm, 0.0);
        assert_eq!(p.group.quantity, 5);
    }

    #[test]
    fn test_unrecognized_sealant_rejected() {
        let r = row(&[("Unit", "6|16|6"), ("Sealant Type", "glue")]);
        let err = mapper().map_to_product(&r, 7).unwrap_err();
        assert!(matches!(err, ImportError::DomainViolation { row: 7, .. }));
    }
}
