use super::*;

#[test]
fn defaults_match_service_defaults_and_validate() {
    let cfg = MazeConfig::default();
    assert_eq!(cfg.wall_density, 0.3);
    assert_eq!(cfg.dead_end_density, 0.5);
    assert!(cfg.guaranteed_path);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: MazeConfig = serde_json::from_str(r#"{"width": 40, "no_path": true, "guaranteed_path": false}"#).unwrap();
    assert_eq!(cfg.width, 40);
    assert_eq!(cfg.height, 20);
    assert!(cfg.no_path);
    cfg.validate().unwrap();
}

#[test]
fn validate_rejects_out_of_range_values() {
    let cfg = MazeConfig {
        width: 4,
        ..MazeConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = MazeConfig {
        wall_density: 1.5,
        ..MazeConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = MazeConfig {
        dead_end_density: f64::NAN,
        ..MazeConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_inconsistent_constraints() {
    let cfg = MazeConfig {
        no_path: true,
        ..MazeConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = MazeConfig {
        unique_path: true,
        allow_cycles: true,
        ..MazeConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn reconcile_unique_implies_guaranteed_and_clears_conflicts() {
    let mut cfg = MazeConfig {
        guaranteed_path: false,
        no_path: true,
        allow_cycles: true,
        ..MazeConfig::default()
    };
    cfg.reconcile(ConstraintFlag::UniquePath, true);
    assert!(cfg.unique_path);
    assert!(cfg.guaranteed_path);
    assert!(!cfg.no_path);
    assert!(!cfg.allow_cycles);
    cfg.validate().unwrap();
}

#[test]
fn reconcile_no_path_clears_guaranteed_and_unique() {
    let mut cfg = MazeConfig::default();
    cfg.reconcile(ConstraintFlag::UniquePath, true);
    cfg.reconcile(ConstraintFlag::NoPath, true);
    assert!(cfg.no_path);
    assert!(!cfg.guaranteed_path);
    assert!(!cfg.unique_path);
    cfg.validate().unwrap();
}

#[test]
fn reconcile_cycles_clears_unique_and_off_is_local() {
    let mut cfg = MazeConfig::default();
    cfg.reconcile(ConstraintFlag::UniquePath, true);
    cfg.reconcile(ConstraintFlag::AllowCycles, true);
    assert!(!cfg.unique_path);
    assert!(cfg.guaranteed_path);

    cfg.reconcile(ConstraintFlag::AllowCycles, false);
    assert!(!cfg.allow_cycles);
    assert!(cfg.guaranteed_path);

    cfg.reconcile(ConstraintFlag::GuaranteedPath, false);
    cfg.reconcile(ConstraintFlag::NoPath, true);
    cfg.reconcile(ConstraintFlag::GuaranteedPath, true);
    assert!(!cfg.no_path);
}

#[test]
fn from_path_reports_missing_file_as_io() {
    let err = MazeConfig::from_path("tests/data/no_such_config.json").unwrap_err();
    assert!(matches!(err, MazeError::Other(_)), "{err:?}");
    assert!(err.to_string().contains("no_such_config.json"));
}
