// ==========================================
// 导入层集成测试
// ==========================================
// 覆盖: 产品目录 CSV, 分组号向下填充, 坏行跳过, 路线表
// ==========================================

mod helpers;

use helpers::test_data_builder::catalogue_csv;
use igu_recovery::config::{BatchDefaults, ParameterSet};
use igu_recovery::domain::{GlassType, GlazingType, IGUCondition, RouteKey, SpacerMaterial, TransportMode};
use igu_recovery::importer::{
    CatalogueFieldMapper, ImportError, ProductCatalogueImporter, RouteTableImporter,
};
use std::fs;
use tempfile::TempDir;

fn importer() -> ProductCatalogueImporter {
    let defaults = BatchDefaults::from_parameters(&ParameterSet::builtin()).unwrap();
    ProductCatalogueImporter::new(CatalogueFieldMapper::new(defaults, IGUCondition::default()))
}

#[test]
fn test_catalogue_csv_import() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalogue.csv");
    fs::write(
        &path,
        catalogue_csv(&[
            "W-01,Block A,6|16|6,20,1200,1500,aluminium",
            "W-02,,4|12|4|12|4,5,800,1000,warm edge",
            "W-03 Lami,,6|16|6.8,,,,steel",
        ]),
    )
    .unwrap();

    let import = importer().import_file(&path).unwrap();
    assert!(import.rejected.is_empty());
    assert_eq!(import.products.len(), 3);

    let w1 = &import.products[0];
    assert_eq!(w1.group.glazing_type, GlazingType::Double);
    assert_eq!(w1.group.quantity, 20);
    assert_eq!(w1.group.cavity_thickness_mm, 16.0);

    let w2 = &import.products[1];
    assert_eq!(w2.group_id.as_deref(), Some("Block A"));
    assert_eq!(w2.group.glazing_type, GlazingType::Triple);
    assert_eq!(w2.group.thickness_centre_mm, Some(4.0));
    assert_eq!(w2.group.spacer_material, SpacerMaterial::WarmEdgeComposite);

    // 缺省尺寸与数量取批量默认值; 名称含 lami → 外片夹层
    let w3 = &import.products[2];
    assert_eq!(w3.group_id.as_deref(), Some("Block A"));
    assert_eq!(w3.group.quantity, 50);
    assert_eq!(w3.group.unit_width_mm, 1000.0);
    assert_eq!(w3.group.glass_type_outer, GlassType::Laminated);
    assert_eq!(w3.group.thickness_inner_mm, 6.8);
}

#[test]
fn test_bad_rows_are_rejected_with_row_numbers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalogue.csv");
    fs::write(
        &path,
        catalogue_csv(&[
            "Good,G,6|16|6,10,1000,1000,aluminium",
            "NoBuildUp,G,,10,1000,1000,aluminium",
            "BadSpacer,G,6|16|6,10,1000,1000,unobtainium",
            "HalfUnit,G,6|16|6,2.5,1000,1000,aluminium",
        ]),
    )
    .unwrap();

    let import = importer().import_file(&path).unwrap();
    assert_eq!(import.products.len(), 1);
    let rows: Vec<usize> = import.rejected.iter().map(|r| r.row_number).collect();
    assert_eq!(rows, vec![3, 4, 5]);
}

#[test]
fn test_missing_file_and_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let missing = importer().import_file(dir.path().join("nope.csv"));
    assert!(matches!(missing, Err(ImportError::FileNotFound(_))));

    let txt = dir.path().join("catalogue.txt");
    fs::write(&txt, "win_name\nW\n").unwrap();
    assert!(matches!(
        importer().import_file(&txt),
        Err(ImportError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_route_table_import() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routes.csv");
    fs::write(
        &path,
        "route_key,mode,truck_km,ferry_km\n\
         origin_to_processor,HGV lorry,120,\n\
         processor_to_reuse,,80,35\n\
         origin_to_landfill,road,25,0\n",
    )
    .unwrap();

    let registry = RouteTableImporter.import_file(&path).unwrap();
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.get(RouteKey::OriginToProcessor).unwrap().truck_km, 120.0);
    assert_eq!(
        registry.get(RouteKey::ProcessorToReuse).unwrap().mode,
        TransportMode::RoadFerry
    );
    assert!(!registry.contains(RouteKey::ProcessorToGlasswool));
}

#[test]
fn test_route_table_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routes.csv");
    fs::write(&path, "route_key,truck_km\nprocessor_to_moon,10\n").unwrap();

    assert!(RouteTableImporter.import_file(&path).is_err());
}
