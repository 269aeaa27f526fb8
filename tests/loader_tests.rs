use loadforge::error::LoadForgeError;
use loadforge::instances::{Category, InstanceRepository};
use std::fs::File;
use std::io::Write;

const TWO_INSTANCES: &str = r#"{
  "instances": [
    {
      "name": "tiny",
      "container": { "width": 4.0, "depth": 3.0, "max_weight": 50.0 },
      "items": [
        { "id": 1, "width": 1.0, "depth": 2.0, "weight": 5.0 },
        { "id": 2, "width": 2.0, "depth": 1.0, "weight": 7.5, "rotatable": true }
      ]
    },
    {
      "name": "heavy",
      "category": "impossible",
      "container": { "width": 2.0, "depth": 2.0, "max_weight": 1.0 },
      "items": [ { "id": 9, "width": 1.0, "depth": 1.0, "weight": 3.0 } ]
    }
  ]
}"#;

#[test]
fn test_builtin_set_loads() {
    let repo = InstanceRepository::builtin().unwrap();
    assert!(repo.len() >= 10);
    let names = repo.names();
    assert!(names.contains(&"basic_01_three_identical"));
    assert!(names.contains(&"impossible_01_weight_limit"));

    for cat in [Category::Basic, Category::Challenging, Category::Impossible] {
        assert!(repo.by_category(cat).count() > 0, "no {} instances", cat);
    }
    let basic = repo.get("basic_01_three_identical").unwrap();
    assert_eq!(basic.len(), 3);
    assert_eq!(basic.total_weight(), 30.0);
}

#[test]
fn test_builtin_impossible_weight_instance_is_overweight() {
    let repo = InstanceRepository::builtin().unwrap();
    let inst = repo.get("impossible_01_weight_limit").unwrap();
    assert!(inst.total_weight() > inst.container.max_weight);
}

#[test]
fn test_parse_defaults() {
    let repo = InstanceRepository::from_json_str(TWO_INSTANCES).unwrap();
    let tiny = repo.get("tiny").unwrap();
    assert_eq!(tiny.category, Category::Basic);
    assert!(!tiny.items[0].rotatable);
    assert!(tiny.items[1].rotatable);
    assert_eq!(tiny.items[1].footprint(true), (1.0, 2.0));
    assert_eq!(tiny.items[0].footprint(true), (1.0, 2.0));
    assert_eq!(repo.get("heavy").unwrap().category, Category::Impossible);
}

#[test]
fn test_unknown_instance() {
    let repo = InstanceRepository::builtin().unwrap();
    match repo.get("no_such_instance") {
        Err(LoadForgeError::UnknownInstance(name)) => assert_eq!(name, "no_such_instance"),
        other => panic!("expected UnknownInstance, got {:?}", other),
    }
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("instances.json");
    let mut f = File::create(&path).unwrap();
    f.write_all(TWO_INSTANCES.as_bytes()).unwrap();

    let repo = InstanceRepository::load_from_file(&path).unwrap();
    assert_eq!(repo.len(), 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = InstanceRepository::load_from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, LoadForgeError::Io(_)));
}

#[test]
fn test_malformed_json() {
    let err = InstanceRepository::from_json_str("{ \"instances\": [ { \"name\": 3 } ] }").unwrap_err();
    assert!(matches!(err, LoadForgeError::Json(_)));
}

fn single(container: &str, items: &str) -> String {
    format!(
        r#"{{ "instances": [ {{ "name": "x", "container": {}, "items": [{}] }} ] }}"#,
        container, items
    )
}

#[test]
fn test_validation_rejects_bad_data() {
    let ok_container = r#"{ "width": 5, "depth": 5, "max_weight": 10 }"#;
    let ok_item = r#"{ "id": 1, "width": 1, "depth": 1, "weight": 1 }"#;

    let cases = [
        single(r#"{ "width": 0, "depth": 5, "max_weight": 10 }"#, ok_item),
        single(r#"{ "width": 5, "depth": -1, "max_weight": 10 }"#, ok_item),
        single(ok_container, r#"{ "id": 1, "width": 0, "depth": 1, "weight": 1 }"#),
        single(ok_container, r#"{ "id": 1, "width": 1, "depth": 1, "weight": -2 }"#),
        single(ok_container, &format!("{}, {}", ok_item, ok_item)),
    ];
    for json in &cases {
        let err = InstanceRepository::from_json_str(json).unwrap_err();
        assert!(matches!(err, LoadForgeError::Validation(_)), "{}: {:?}", json, err);
    }
    assert!(InstanceRepository::from_json_str(&single(ok_container, ok_item)).is_ok());
}

#[test]
fn test_duplicate_instance_names_rejected() {
    let inst = r#"{ "name": "dup", "container": { "width": 5, "depth": 5, "max_weight": 10 }, "items": [] }"#;
    let json = format!(r#"{{ "instances": [{}, {}] }}"#, inst, inst);
    let err = InstanceRepository::from_json_str(&json).unwrap_err();
    assert!(matches!(err, LoadForgeError::Validation(_)));
}

#[test]
fn test_empty_item_list_is_valid() {
    let json = single(r#"{ "width": 5, "depth": 5, "max_weight": 10 }"#, "");
    let repo = InstanceRepository::from_json_str(&json).unwrap();
    assert!(repo.get("x").unwrap().is_empty());
}
