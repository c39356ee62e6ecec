use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::domain::models::PeerRequirement;

/// What the inspector learned about one installed dependency. Both
/// `Missing` and `Unparsable` classify as Unknown at the gate; only
/// `Unparsable` is worth a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    Requirements(Vec<PeerRequirement>),
    Missing,
    Unparsable,
}

/// Reads installed-package manifests under `node_modules/`. Read-only and
/// infallible: absence of information is never an error here.
pub struct InstalledInspector {
    modules_dir: PathBuf,
}

impl InstalledInspector {
    pub fn new(project_dir: &Path) -> Self {
        Self {
            modules_dir: project_dir.join("node_modules"),
        }
    }

    pub fn modules_dir_exists(&self) -> bool {
        self.modules_dir.is_dir()
    }

    /// Scoped names (`@scope/pkg`) resolve naturally: the scope segment is
    /// a directory under node_modules.
    pub fn inspect(&self, name: &str) -> Inspection {
        let manifest = self.modules_dir.join(name).join("package.json");
        if !manifest.exists() {
            return Inspection::Missing;
        }
        let Ok(raw) = std::fs::read_to_string(&manifest) else {
            return Inspection::Unparsable;
        };
        let Ok(value) = serde_json::from_str::<Value>(&raw) else {
            return Inspection::Unparsable;
        };

        let mut reqs = Vec::new();
        if let Some(peers) = value.get("peerDependencies").and_then(|v| v.as_object()) {
            for (peer, range) in peers {
                if let Some(r) = range.as_str() {
                    reqs.push(PeerRequirement {
                        owner: name.to_string(),
                        peer: peer.clone(),
                        required_range: r.to_string(),
                    });
                }
            }
        }
        // engines.node is folded in as peer "node"; one gate serves both
        // transitions.
        if let Some(node_range) = value
            .get("engines")
            .and_then(|v| v.get("node"))
            .and_then(|v| v.as_str())
        {
            reqs.push(PeerRequirement {
                owner: name.to_string(),
                peer: "node".to_string(),
                required_range: node_range.to_string(),
            });
        }
        Inspection::Requirements(reqs)
    }
}

#[cfg(test)]
mod tests {
    use super::{Inspection, InstalledInspector};
    use std::fs;

    fn write_installed(root: &std::path::Path, name: &str, manifest: &str) {
        let dir = root.join("node_modules").join(name);
        fs::create_dir_all(&dir).expect("create installed dir");
        fs::write(dir.join("package.json"), manifest).expect("write installed manifest");
    }

    #[test]
    fn missing_package_is_missing() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let inspector = InstalledInspector::new(tmp.path());
        assert_eq!(inspector.inspect("ghost-lib"), Inspection::Missing);
    }

    #[test]
    fn malformed_manifest_is_unparsable() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        write_installed(tmp.path(), "broken-lib", "{ not json");
        let inspector = InstalledInspector::new(tmp.path());
        assert_eq!(inspector.inspect("broken-lib"), Inspection::Unparsable);
    }

    #[test]
    fn peers_and_engines_extracted_for_scoped_package() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        write_installed(
            tmp.path(),
            "@acme/widget",
            r#"{
                "name": "@acme/widget",
                "peerDependencies": {"react": "^17.0.0"},
                "engines": {"node": ">=20"}
            }"#,
        );
        let inspector = InstalledInspector::new(tmp.path());
        let Inspection::Requirements(reqs) = inspector.inspect("@acme/widget") else {
            panic!("expected requirements");
        };
        assert_eq!(reqs.len(), 2);
        assert!(reqs
            .iter()
            .any(|r| r.peer == "react" && r.required_range == "^17.0.0"));
        assert!(reqs
            .iter()
            .any(|r| r.peer == "node" && r.required_range == ">=20"));
    }

    #[test]
    fn package_without_peers_yields_empty_requirements() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        write_installed(tmp.path(), "plain-lib", r#"{"name": "plain-lib"}"#);
        let inspector = InstalledInspector::new(tmp.path());
        assert_eq!(
            inspector.inspect("plain-lib"),
            Inspection::Requirements(vec![])
        );
    }
}
