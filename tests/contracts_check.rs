use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

mod common;
use common::TestEnv;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

#[test]
fn contracts_check() {
    let env = TestEnv::new();

    let doctor = env.run_json(&["doctor"]);
    assert_eq!(doctor["ok"], true);
    validate("doctor.schema.json", &doctor["data"]);

    // The fixture has a React blocker, so check exits non-zero but still
    // prints the full envelope.
    let out = env
        .cmd()
        .arg("--json")
        .arg("--dir")
        .arg(env.project.to_str().expect("project path utf8"))
        .args(["check", "--target", "react"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let check: Value = serde_json::from_slice(&out).expect("valid json output");
    validate("check.schema.json", &check["data"]);

    let check_node = env
        .cmd()
        .arg("--json")
        .arg("--dir")
        .arg(env.project.to_str().expect("project path utf8"))
        .args(["check", "--target", "node"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let check_node: Value = serde_json::from_slice(&check_node).expect("valid json output");
    validate("check.schema.json", &check_node["data"]);

    let migrate = env.run_json(&["--yes", "react"]);
    assert_eq!(migrate["ok"], true);
    validate("migrate-report.schema.json", &migrate["data"]);

    let migrate_node = env.run_json(&["--yes", "node"]);
    assert_eq!(migrate_node["ok"], true);
    validate("migrate-report.schema.json", &migrate_node["data"]);
}
