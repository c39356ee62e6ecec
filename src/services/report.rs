use crate::domain::models::{
    CheckReport, Decision, GateReport, InstallReport, MigrationReport, PinUpdate, RewriteOutcome,
};

pub fn build_migration_report(
    migration: &str,
    gates: Vec<GateReport>,
    pinned: Vec<PinUpdate>,
    engines_node: Option<String>,
    install: InstallReport,
    rewrites: Vec<RewriteOutcome>,
) -> MigrationReport {
    let forced = gates.iter().any(|g| g.decision == Decision::ProceedForced);
    let overall = if forced { "forced" } else { "ok" }.to_string();

    let mut warnings = Vec::new();
    let skipped: usize = gates.iter().map(|g| g.unknown.len()).sum();
    if skipped > 0 {
        warnings.push(format!(
            "{} dependencies had no readable installed manifest and were skipped; run `{} install` and `depbump check` to re-verify.",
            skipped, install.manager
        ));
    }
    if forced {
        warnings.push(
            "Incompatible peer requirements were overridden by the operator; compatibility is not guaranteed."
                .to_string(),
        );
    }

    MigrationReport {
        migration: migration.to_string(),
        gates,
        pinned,
        engines_node,
        install,
        rewrites,
        overall,
        warnings,
    }
}

pub fn build_check_report(target: &str, gates: Vec<GateReport>) -> CheckReport {
    let findings: usize = gates.iter().map(|g| g.incompatible.len()).sum();
    let overall = if findings == 0 {
        "ok"
    } else {
        "incompatibilities_found"
    }
    .to_string();
    CheckReport {
        target: target.to_string(),
        gates,
        overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Decision, DependencyVerdict, PeerRequirement, Verdict};

    fn gate(decision: Decision, unknown: Vec<String>, incompatible: usize) -> GateReport {
        GateReport {
            scope: "external".to_string(),
            checked: unknown.len() + incompatible,
            incompatible: (0..incompatible)
                .map(|i| DependencyVerdict {
                    name: format!("lib-{}", i),
                    verdict: Verdict::Incompatible,
                    blocking: vec![PeerRequirement {
                        owner: format!("lib-{}", i),
                        peer: "react".to_string(),
                        required_range: "^17.0.0".to_string(),
                    }],
                    note: None,
                })
                .collect(),
            unknown,
            decision,
        }
    }

    fn install_ok() -> InstallReport {
        InstallReport {
            manager: "npm".to_string(),
            status: "ok".to_string(),
        }
    }

    #[test]
    fn clean_run_is_ok_with_no_warnings() {
        let report = build_migration_report(
            "react-18",
            vec![gate(Decision::Proceed, vec![], 0)],
            vec![],
            None,
            install_ok(),
            vec![],
        );
        assert_eq!(report.overall, "ok");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn forced_gate_marks_the_run_and_warns() {
        let report = build_migration_report(
            "react-18",
            vec![gate(Decision::ProceedForced, vec!["ghost-lib".to_string()], 1)],
            vec![],
            None,
            install_ok(),
            vec![],
        );
        assert_eq!(report.overall, "forced");
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn check_report_flags_incompatibilities() {
        let clean = build_check_report("node-22", vec![gate(Decision::Proceed, vec![], 0)]);
        assert_eq!(clean.overall, "ok");
        let dirty = build_check_report("node-22", vec![gate(Decision::Proceed, vec![], 2)]);
        assert_eq!(dirty.overall, "incompatibilities_found");
    }
}
