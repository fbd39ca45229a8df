use super::*;

fn maze() -> Maze {
    Maze::open(10, 10, GridPos::new(0, 0), GridPos::new(9, 9)).unwrap()
}

#[test]
fn step_parses_service_payload_and_ignores_extra_fields() {
    let json = r#"[
        {"grid_updates": [[0, 1, 3]], "current_cell": [0, 1], "nodes_expanded": 1, "finished": false},
        {"grid_updates": [[0, 1, 5]], "nodes_expanded": 2, "finished": true, "success": true, "path_length": 1}
    ]"#;
    let steps = steps_from_json(json).unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].grid_updates, vec![GridUpdate::new(0, 1, CellCode::Frontier)]);
    assert!(!steps[0].success);
    assert_eq!(steps[1].path_length, 1);
    validate_steps(&steps, &maze()).unwrap();
}

#[test]
fn missing_fields_default() {
    let steps = steps_from_json(r#"[{"finished": true}]"#).unwrap();
    assert!(steps[0].grid_updates.is_empty());
    assert_eq!(steps[0].nodes_expanded, 0);
}

#[test]
fn validate_requires_finished_tail() {
    let m = maze();
    assert!(validate_steps(&[], &m).is_err());
    let steps = vec![Step::progress(vec![], 1)];
    let err = validate_steps(&steps, &m).unwrap_err();
    assert!(err.to_string().contains("finished"));
}

#[test]
fn validate_rejects_out_of_bounds_updates() {
    let steps = vec![Step::finish(
        vec![GridUpdate::new(3, 10, CellCode::Path)],
        1,
        false,
        0,
    )];
    assert!(validate_steps(&steps, &maze()).is_err());
}

#[test]
fn update_serializes_as_triple() {
    let u = GridUpdate::new(4, 2, CellCode::DeadEnd);
    assert_eq!(serde_json::to_string(&u).unwrap(), "[4,2,4]");
}
