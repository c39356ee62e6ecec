use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub project: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let project = make_fixture_project(tmp.path());

        Self {
            _tmp: tmp,
            home,
            project,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("depbump");
        cmd.env("HOME", &self.home);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--dir")
            .arg(self.project.to_str().expect("project path utf8"))
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn read_manifest(&self) -> Value {
        let raw = fs::read_to_string(self.project.join("package.json")).expect("read manifest");
        serde_json::from_str(&raw).expect("manifest json")
    }

    pub fn write_installed(&self, name: &str, manifest: &Value) {
        let dir = self.project.join("node_modules").join(name);
        fs::create_dir_all(&dir).expect("create installed dir");
        fs::write(
            dir.join("package.json"),
            serde_json::to_string_pretty(manifest).expect("serialize installed manifest"),
        )
        .expect("write installed manifest");
    }
}

/// A small JS project with one React-incompatible dependency
/// (`widget-lib`), one Node-incompatible one (`plain-lib`), one
/// dual-range managed dependency, and one dependency that is not
/// installed at all (`ghost-lib`).
pub fn make_fixture_project(base: &Path) -> PathBuf {
    let project = base.join("app");
    fs::create_dir_all(&project).expect("create project dir");

    let manifest = serde_json::json!({
        "name": "fixture-app",
        "version": "1.0.0",
        "engines": {"node": ">=20"},
        "dependencies": {
            "@acme/ui-kit": "^5.1.0",
            "ghost-lib": "^1.0.0",
            "plain-lib": "^3.0.0",
            "react": "^17.0.2",
            "react-dom": "^17.0.2",
            "widget-lib": "^2.0.0"
        },
        "devDependencies": {
            "@types/react": "^17.0.50",
            "jest": "^29.0.0"
        }
    });
    fs::write(
        project.join("package.json"),
        serde_json::to_string_pretty(&manifest).expect("serialize manifest"),
    )
    .expect("write manifest");

    let installed: &[(&str, Value)] = &[
        (
            "widget-lib",
            serde_json::json!({
                "name": "widget-lib",
                "version": "2.4.0",
                "peerDependencies": {"react": "^17.0.0"}
            }),
        ),
        (
            "@acme/ui-kit",
            serde_json::json!({
                "name": "@acme/ui-kit",
                "version": "5.1.0",
                "peerDependencies": {"react": "^17.0.0 || ^18.0.0"}
            }),
        ),
        (
            "plain-lib",
            serde_json::json!({
                "name": "plain-lib",
                "version": "3.2.1",
                "engines": {"node": "^20.0.0"}
            }),
        ),
        (
            "jest",
            serde_json::json!({
                "name": "jest",
                "version": "29.7.0",
                "engines": {"node": "^14.15.0 || ^16.10.0 || >=18.0.0"}
            }),
        ),
        (
            "@types/react",
            serde_json::json!({"name": "@types/react", "version": "17.0.50"}),
        ),
        (
            "react",
            serde_json::json!({"name": "react", "version": "17.0.2"}),
        ),
        (
            "react-dom",
            serde_json::json!({
                "name": "react-dom",
                "version": "17.0.2",
                "peerDependencies": {"react": "^17.0.2"}
            }),
        ),
    ];
    for (name, value) in installed {
        let dir = project.join("node_modules").join(name);
        fs::create_dir_all(&dir).expect("create installed dir");
        fs::write(
            dir.join("package.json"),
            serde_json::to_string_pretty(value).expect("serialize installed manifest"),
        )
        .expect("write installed manifest");
    }

    fs::write(
        project.join("Dockerfile"),
        "FROM node:20-alpine AS build\nWORKDIR /app\nCOPY . .\nRUN npm ci\n",
    )
    .expect("write dockerfile");

    let workflows = project.join(".github/workflows");
    fs::create_dir_all(&workflows).expect("create workflows dir");
    fs::write(
        workflows.join("ci.yml"),
        "jobs:\n  test:\n    steps:\n      - uses: actions/setup-node@v4\n        with:\n          node-version: '20'\n",
    )
    .expect("write workflow");

    fs::write(project.join(".nvmrc"), "20\n").expect("write nvmrc");

    // Point the installer at /bin/true so no real package manager runs.
    fs::write(
        project.join(".depbump.toml"),
        "[general]\ninstaller = \"true\"\n",
    )
    .expect("write config");

    project
}
