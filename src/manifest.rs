use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::models::{DependencyGroup, DependencyRecord, PinUpdate};

#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("no package.json found at {0}")]
    NotFound(PathBuf),
    #[error("unreadable package.json at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// The project manifest, kept as raw JSON so a save only rewrites what the
/// migration touched. All mutation goes through the typed helpers below.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    value: Value,
}

const DEPENDENCY_GROUPS: &[DependencyGroup] = &[
    DependencyGroup::Runtime,
    DependencyGroup::Dev,
    DependencyGroup::Peer,
];

impl PackageManifest {
    pub fn load(project_dir: &Path) -> anyhow::Result<Self> {
        let path = project_dir.join("package.json");
        if !path.exists() {
            return Err(ManifestError::NotFound(path).into());
        }
        let raw = std::fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| ManifestError::Parse {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { path, value })
    }

    pub fn save(&self) -> anyhow::Result<()> {
        std::fs::write(&self.path, format!("{}\n", serde_json::to_string_pretty(&self.value)?))?;
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.value.get("name").and_then(|v| v.as_str())
    }

    pub fn dependencies(&self, group: DependencyGroup) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        if let Some(map) = self.value.get(group.manifest_key()).and_then(|v| v.as_object()) {
            for (name, range) in map {
                if let Some(r) = range.as_str() {
                    out.insert(name.clone(), r.to_string());
                }
            }
        }
        out
    }

    /// Runtime and dev dependencies, the candidate set for the gate. Peer
    /// entries of the project itself describe consumers, not installations,
    /// so they are not candidates.
    pub fn dependency_records(&self) -> Vec<DependencyRecord> {
        let mut out = Vec::new();
        for group in [DependencyGroup::Runtime, DependencyGroup::Dev] {
            for (name, declared_range) in self.dependencies(group) {
                out.push(DependencyRecord {
                    name,
                    declared_range,
                    group,
                });
            }
        }
        out
    }

    /// The range the project itself declares for `name`, runtime group first.
    pub fn declared_range(&self, name: &str) -> Option<String> {
        for group in DEPENDENCY_GROUPS {
            if let Some(r) = self.dependencies(*group).get(name) {
                return Some(r.clone());
            }
        }
        None
    }

    /// Rewrite `name` to `range` in every group that already declares it.
    /// Never introduces a new dependency entry.
    pub fn pin_dependency(&mut self, name: &str, range: &str) -> Vec<PinUpdate> {
        let mut updates = Vec::new();
        for group in DEPENDENCY_GROUPS {
            let Some(map) = self
                .value
                .get_mut(group.manifest_key())
                .and_then(|v| v.as_object_mut())
            else {
                continue;
            };
            if let Some(slot) = map.get_mut(name) {
                let old_range = slot.as_str().unwrap_or_default().to_string();
                if old_range == range {
                    continue;
                }
                *slot = Value::String(range.to_string());
                updates.push(PinUpdate {
                    name: name.to_string(),
                    group: *group,
                    old_range,
                    new_range: range.to_string(),
                });
            }
        }
        updates
    }

    /// Set `engines.node`, creating the `engines` object when absent.
    /// Returns the previous range, if any.
    pub fn set_engines_node(&mut self, range: &str) -> Option<String> {
        if self.value.get("engines").map(|v| v.is_object()) != Some(true) {
            self.value["engines"] = serde_json::json!({});
        }
        let engines = self.value.get_mut("engines").and_then(|v| v.as_object_mut())?;
        let old = engines
            .get("node")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        engines.insert("node".to_string(), Value::String(range.to_string()));
        old
    }
}
