use crate::domain::models::MigrationPlan;

pub const DEFAULT_MANAGED_SCOPE: &str = "@acme/";

/// Operator answers accepted as "continue anyway". Everything else,
/// including an empty line, counts as no.
pub const AFFIRMATIVE_TOKENS: &[&str] = &["y", "yes"];

/// Directories never descended into when scanning for runtime files.
pub const DEFAULT_SKIP_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "coverage"];

/// React 17 -> 18. Anchor pins track the last 18.x line at time of writing;
/// the allow-listed packages version in lockstep with React itself.
pub const REACT_PLAN: MigrationPlan = MigrationPlan {
    name: "react-18",
    anchors: &["react", "react-dom"],
    old_major: 17,
    new_major: 18,
    allow_list: &["react-test-renderer", "react-is"],
    pins: &[
        ("react", "^18.3.1"),
        ("react-dom", "^18.3.1"),
        ("react-test-renderer", "^18.3.1"),
        ("react-is", "^18.3.1"),
        ("@types/react", "^18.3.3"),
        ("@types/react-dom", "^18.3.0"),
    ],
    engines_node: None,
    rewrite_runtime_files: false,
};

/// Node 20 -> 22. The runtime itself is the anchor; installed packages
/// declare support through `engines.node`, which the inspector folds into
/// the same peer-requirement shape.
pub const NODE_PLAN: MigrationPlan = MigrationPlan {
    name: "node-22",
    anchors: &["node"],
    old_major: 20,
    new_major: 22,
    allow_list: &["@types/node"],
    pins: &[("@types/node", "^22.5.0")],
    engines_node: Some(">=22"),
    rewrite_runtime_files: true,
};
