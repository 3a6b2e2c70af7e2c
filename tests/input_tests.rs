use duty_roster::config::SchedulerConfig;
use duty_roster::error::RosterError;
use duty_roster::input::RosterInput;
use duty_roster::scheduler::{Duty, Soldier};
use tempfile::TempDir;

fn sample() -> RosterInput {
    RosterInput::new(
        vec![Duty::new("Gate", 2), Duty::new("Kitchen", 1)],
        vec![
            Soldier::new("Loukas", ["Gate", "Kitchen"]),
            Soldier::new("Sofia", ["Kitchen"]),
            Soldier::new("Chara", ["Gate"]).with_join_order(2),
        ],
    )
}

#[test]
fn test_document_survives_a_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.json");

    let input = sample();
    input.to_path(&path).unwrap();
    let loaded = RosterInput::from_path(&path).unwrap();
    assert_eq!(loaded, input);
}

#[test]
fn test_schedule_loaded_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roster.json");
    sample().to_path(&path).unwrap();

    let input = RosterInput::from_path(&path).unwrap();
    let assignment =
        duty_roster::schedule(input, &SchedulerConfig::default().with_seed(8)).unwrap();
    assert_eq!(
        assignment.soldiers_for("Gate").unwrap(),
        ["Loukas".to_string(), "Chara".to_string()]
    );
    assert_eq!(assignment.soldiers_for("Kitchen").unwrap(), ["Sofia".to_string()]);
}

#[test]
fn test_legacy_document_schedules() {
    let json = r#"{
        "duties": [
            {"name": "Dog", "numberOfSoldiersNeeded": 1},
            {"name": "Watcher", "numberOfSoldiersNeeded": 1}
        ],
        "soldiers": [
            {"name": "STR Loukas0", "orderedPrefs": ["Watcher", "Dog"]},
            {"name": "STR Loukas1", "orderedPrefs": ["Watcher"]}
        ]
    }"#;
    let input = RosterInput::from_json(json).unwrap();
    let assignment =
        duty_roster::schedule(input, &SchedulerConfig::default().with_seed(1)).unwrap();
    assert_eq!(assignment.duty_of("STR Loukas0"), Some("Dog"));
    assert_eq!(assignment.duty_of("STR Loukas1"), Some("Watcher"));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = RosterInput::from_path(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, RosterError::Io(_)));
}

#[test]
fn test_malformed_file_is_a_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"duties\": [").unwrap();
    let err = RosterInput::from_path(&path).unwrap_err();
    assert!(matches!(err, RosterError::Json(_)));
}

#[test]
fn test_assignment_serializes_in_duty_order() {
    let assignment =
        duty_roster::schedule(sample(), &SchedulerConfig::default().with_seed(2)).unwrap();
    let json = serde_json::to_value(&assignment).unwrap();
    assert_eq!(json["duties"][0]["name"], "Gate");
    assert_eq!(json["duties"][1]["name"], "Kitchen");
    assert_eq!(json["duties"][1]["soldiers"][0], "Sofia");
}
