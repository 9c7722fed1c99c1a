// ==========================================
// 批次汇总与材料质量集成测试
// ==========================================

mod helpers;

use helpers::mock_config::MockConfig;
use helpers::test_data_builder::IguGroupBuilder;
use igu_recovery::domain::{IGUCondition, SealGeometry, SpacerMaterial};
use igu_recovery::engine::{
    aggregate_igu_groups, calculate_material_masses, compute_igu_mass_totals,
    compute_sealant_volumes, BatchStats,
};

fn seal() -> SealGeometry {
    SealGeometry::new(6.0, 12.0, 8.0).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9 * b.abs().max(1.0)
}

#[test]
fn test_empty_batch_is_all_zero() {
    let config = MockConfig::builtin();
    let stats = aggregate_igu_groups(&[], &config.processes).unwrap();
    assert_eq!(stats, BatchStats::default());

    let masses = compute_igu_mass_totals(&[], &stats, Some(&seal()), &config.materials);
    assert_eq!(masses.total_mass_kg, 0.0);
    assert_eq!(masses.avg_mass_per_igu_kg, 0.0);
}

#[test]
fn test_quantity_scales_every_mass_linearly() {
    let config = MockConfig::builtin();
    let base = IguGroupBuilder::new("Base").quantity(12).size(900.0, 1400.0).build();
    let scaled = IguGroupBuilder::new("Base").quantity(36).size(900.0, 1400.0).build();

    let m1 = calculate_material_masses(&base, &seal(), &config.materials);
    let m3 = calculate_material_masses(&scaled, &seal(), &config.materials);
    assert!(close(m3.glass_kg, 3.0 * m1.glass_kg));
    assert!(close(m3.sealant_kg, 3.0 * m1.sealant_kg));
    assert!(close(m3.spacer_kg, 3.0 * m1.spacer_kg));
    assert!(close(m3.spacer_length_m, 3.0 * m1.spacer_length_m));
}

#[test]
fn test_stats_ordering_bounds() {
    let config = MockConfig::builtin();
    let fogged = IGUCondition {
        visible_fogging: true,
        ..IGUCondition::default()
    };
    let groups = vec![
        IguGroupBuilder::new("A").quantity(40).build(),
        IguGroupBuilder::new("B").quantity(25).triple(4.0, 12.0).build(),
        IguGroupBuilder::new("C").quantity(15).condition(fogged).build(),
    ];

    let stats = aggregate_igu_groups(&groups, &config.processes).unwrap();
    assert_eq!(stats.total_igus, 80.0);
    assert_eq!(stats.acceptable_igus, 65.0);
    assert!(stats.surviving_igus <= stats.acceptable_igus);
    assert!(stats.remanufactured_igus <= stats.surviving_igus);
    assert!(stats.acceptable_area_m2 <= stats.total_area_m2);

    // (40 × 2 + 25 × 3) / 65
    assert!(close(stats.panes_per_igu, 155.0 / 65.0));
}

#[test]
fn test_no_eligible_groups_yields_zero_remanufacture() {
    let config = MockConfig::builtin();
    let cracked = IGUCondition {
        cracks_chips: true,
        ..IGUCondition::default()
    };
    let groups = vec![IguGroupBuilder::new("X").condition(cracked).build()];

    let stats = aggregate_igu_groups(&groups, &config.processes).unwrap();
    assert_eq!(stats.total_igus, 10.0);
    assert_eq!(stats.acceptable_igus, 0.0);
    assert_eq!(stats.panes_per_igu, 0.0);
    assert_eq!(stats.remanufactured_igus, 0.0);
}

#[test]
fn test_invalid_group_is_rejected() {
    let config = MockConfig::builtin();
    let groups = vec![IguGroupBuilder::new("Zero").size(0.0, 1000.0).build()];
    assert!(aggregate_igu_groups(&groups, &config.processes).is_err());
}

#[test]
fn test_sealant_volumes_from_cavity() {
    // 周长 4 m; 一道 6 × 12 mm; 二道 16 × 8 mm
    let group = IguGroupBuilder::new("S").quantity(5).build();
    let v = compute_sealant_volumes(&group, &seal());

    assert!(close(v.primary_per_igu_m3, 4.0 * 0.006 * 0.012));
    assert!(close(v.secondary_per_igu_m3, 4.0 * 0.016 * 0.008));
    assert_eq!(v.secondary_thickness_mm, 16.0);
    assert!(close(v.total_m3(), 5.0 * (v.primary_per_igu_m3 + v.secondary_per_igu_m3)));
}

#[test]
fn test_spacer_material_changes_only_spacer_mass() {
    let config = MockConfig::builtin();
    let alu = IguGroupBuilder::new("Alu").build();
    let warm = IguGroupBuilder::new("Warm").spacer(SpacerMaterial::WarmEdgeComposite).build();

    let a = calculate_material_masses(&alu, &seal(), &config.materials);
    let w = calculate_material_masses(&warm, &seal(), &config.materials);
    assert_eq!(a.glass_kg, w.glass_kg);
    assert_eq!(a.sealant_kg, w.sealant_kg);
    assert_eq!(a.spacer_length_m, w.spacer_length_m);
    assert!(w.spacer_kg < a.spacer_kg);
}

#[test]
fn test_coarse_mass_prefers_group_override() {
    let config = MockConfig::builtin();
    let groups = vec![
        IguGroupBuilder::new("Ref").build(),
        IguGroupBuilder::new("Heavy").mass_per_m2(32.5).build(),
    ];
    let stats = aggregate_igu_groups(&groups, &config.processes).unwrap();
    let totals = compute_igu_mass_totals(&groups, &stats, None, &config.materials);

    // 10 m² × 20 + 10 m² × 32.5
    assert!(close(totals.total_mass_kg, 525.0));
    assert!(close(totals.total_mass_t, 0.525));
    assert!(close(totals.avg_mass_per_igu_kg, 525.0 / 20.0));
}
