use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// One fixed major-version transition. The two plans the tool knows are
/// defined in `constants.rs`; everything downstream is parameterized on this
/// so the gate logic exists exactly once.
#[derive(Debug, Clone, Copy)]
pub struct MigrationPlan {
    pub name: &'static str,
    /// Packages whose major bump triggers the compatibility check. For the
    /// Node plan this is the pseudo-package `node`.
    pub anchors: &'static [&'static str],
    pub old_major: u32,
    pub new_major: u32,
    /// Packages exempted from Incompatible when the project already declares
    /// them at the new major (their own majors track the anchor's).
    pub allow_list: &'static [&'static str],
    /// (name, range) rewrites applied to the project manifest on Proceed,
    /// only where the name is already declared.
    pub pins: &'static [(&'static str, &'static str)],
    /// New `engines.node` range, when the plan bumps the runtime.
    pub engines_node: Option<&'static str>,
    /// Whether Dockerfiles / CI YAML / .nvmrc are rewritten on Proceed.
    pub rewrite_runtime_files: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyGroup {
    Runtime,
    Dev,
    Peer,
}

impl DependencyGroup {
    /// The package.json key this group lives under.
    pub fn manifest_key(self) -> &'static str {
        match self {
            DependencyGroup::Runtime => "dependencies",
            DependencyGroup::Dev => "devDependencies",
            DependencyGroup::Peer => "peerDependencies",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyRecord {
    pub name: String,
    pub declared_range: String,
    pub group: DependencyGroup,
}

/// A version range an installed package declares it needs from another
/// package, independent of what the project itself specifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerRequirement {
    pub owner: String,
    pub peer: String,
    pub required_range: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Compatible,
    Incompatible,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyVerdict {
    pub name: String,
    pub verdict: Verdict,
    /// Peer requirements that produced an Incompatible verdict.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocking: Vec<PeerRequirement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Proceed,
    ProceedForced,
    Abort,
}

#[derive(Serialize, Clone)]
pub struct GateReport {
    /// "managed" or "external" — which dependency family this pass covered.
    pub scope: String,
    pub checked: usize,
    pub incompatible: Vec<DependencyVerdict>,
    pub unknown: Vec<String>,
    pub decision: Decision,
}

#[derive(Serialize, Clone)]
pub struct PinUpdate {
    pub name: String,
    pub group: DependencyGroup,
    pub old_range: String,
    pub new_range: String,
}

#[derive(Serialize, Clone)]
pub struct RewriteOutcome {
    pub file: String,
    pub replacements: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct InstallReport {
    pub manager: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct MigrationReport {
    pub migration: String,
    pub gates: Vec<GateReport>,
    pub pinned: Vec<PinUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engines_node: Option<String>,
    pub install: InstallReport,
    pub rewrites: Vec<RewriteOutcome>,
    pub overall: String,
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
pub struct CheckReport {
    pub target: String,
    pub gates: Vec<GateReport>,
    pub overall: String,
}

#[derive(Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct DoctorReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub general: ConfigGeneral,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigGeneral {
    /// Package-manager binary override; lockfile detection otherwise.
    #[serde(default)]
    pub installer: Option<String>,
    #[serde(default)]
    pub managed_scope: Option<String>,
    /// Additional allow-list entries, merged with the plan's.
    #[serde(default)]
    pub extra_allow: Vec<String>,
    /// Additional directories skipped by the runtime-file scan.
    #[serde(default)]
    pub skip_paths: Vec<String>,
}
