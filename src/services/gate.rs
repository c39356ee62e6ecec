use std::collections::HashSet;

use crate::domain::models::{
    Decision, DependencyRecord, DependencyVerdict, GateReport, MigrationPlan, PeerRequirement,
    Verdict,
};
use crate::services::inspector::{Inspection, InstalledInspector};
use crate::services::output;
use crate::services::prompt::Confirm;

#[derive(thiserror::Error, Debug)]
pub enum GateError {
    #[error("migration aborted: {0} dependencies block the target major")]
    Aborted(usize),
}

/// Ranges are opaque strings, not parsed semver: a range blocks the
/// transition when it names the old major (`"17."`) and the new major digits
/// appear nowhere in it. Known limitation: open ranges like `">=20"` carry
/// no `"20."` and therefore never block.
fn range_blocks(range: &str, old_major: u32, new_major: u32) -> bool {
    range.contains(&format!("{}.", old_major)) && !range.contains(&new_major.to_string())
}

/// Does the project's own declared range start at the new major once the
/// usual range operators are stripped?
fn declared_at_new_major(declared: &str, new_major: u32) -> bool {
    let trimmed =
        declared.trim_start_matches(|c: char| matches!(c, '^' | '~' | '>' | '<' | '=' | 'v' | ' '));
    trimmed.starts_with(&new_major.to_string())
}

/// One verdict per dependency, read fresh from disk. Anchor packages are
/// skipped: they are the ones being bumped.
pub fn classify(
    records: &[DependencyRecord],
    inspector: &InstalledInspector,
    plan: &MigrationPlan,
    extra_allow: &[String],
) -> Vec<DependencyVerdict> {
    let mut seen = HashSet::new();
    let mut verdicts = Vec::new();

    for record in records {
        let name = record.name.as_str();
        if plan.anchors.contains(&name) || !seen.insert(name.to_string()) {
            continue;
        }
        let allow_listed =
            plan.allow_list.contains(&name) || extra_allow.iter().any(|a| a == name);

        let verdict = match inspector.inspect(name) {
            Inspection::Missing => DependencyVerdict {
                name: name.to_string(),
                verdict: Verdict::Unknown,
                blocking: vec![],
                note: None,
            },
            Inspection::Unparsable => DependencyVerdict {
                name: name.to_string(),
                verdict: Verdict::Unknown,
                blocking: vec![],
                note: Some("installed manifest unparsable".to_string()),
            },
            Inspection::Requirements(reqs) => {
                let blocking: Vec<PeerRequirement> = reqs
                    .into_iter()
                    .filter(|r| {
                        plan.anchors.contains(&r.peer.as_str())
                            && range_blocks(&r.required_range, plan.old_major, plan.new_major)
                    })
                    .collect();
                if blocking.is_empty() {
                    DependencyVerdict {
                        name: name.to_string(),
                        verdict: Verdict::Compatible,
                        blocking: vec![],
                        note: None,
                    }
                } else if allow_listed
                    && declared_at_new_major(&record.declared_range, plan.new_major)
                {
                    // A known-good override: the project already tracks the
                    // new major, the installed peer declaration is stale.
                    DependencyVerdict {
                        name: name.to_string(),
                        verdict: Verdict::Compatible,
                        blocking: vec![],
                        note: Some(format!(
                            "allow-listed: project declares {}",
                            record.declared_range
                        )),
                    }
                } else {
                    DependencyVerdict {
                        name: name.to_string(),
                        verdict: Verdict::Incompatible,
                        blocking,
                        note: None,
                    }
                }
            }
        };
        verdicts.push(verdict);
    }
    verdicts
}

/// Proceed silently when nothing is Incompatible; otherwise surface the full
/// list and ask once. Unknown verdicts warn but never block. Abort is a
/// deliberate halt decision, not a crash — callers turn it into
/// `GateError::Aborted` before any further mutation.
pub fn decide(
    label: &str,
    verdicts: &[DependencyVerdict],
    confirmer: &mut dyn Confirm,
) -> anyhow::Result<Decision> {
    for v in verdicts.iter().filter(|v| v.verdict == Verdict::Unknown) {
        match &v.note {
            Some(note) => output::warn(&format!("{}: {} ({}), skipping", label, v.name, note)),
            None => output::warn(&format!("{}: {} is not installed, skipping", label, v.name)),
        }
    }

    let incompatible: Vec<&DependencyVerdict> = verdicts
        .iter()
        .filter(|v| v.verdict == Verdict::Incompatible)
        .collect();
    if incompatible.is_empty() {
        return Ok(Decision::Proceed);
    }

    output::warn(&format!(
        "{}: {} dependencies declare no support for the target major:",
        label,
        incompatible.len()
    ));
    for v in &incompatible {
        for req in &v.blocking {
            output::warn(&format!(
                "  {} requires {} {}",
                req.owner, req.peer, req.required_range
            ));
        }
    }

    if confirmer.confirm("Continue with the migration anyway?")? {
        output::warn("continuing; compatibility is not guaranteed");
        Ok(Decision::ProceedForced)
    } else {
        Ok(Decision::Abort)
    }
}

pub fn gate_report(scope: &str, verdicts: Vec<DependencyVerdict>, decision: Decision) -> GateReport {
    let checked = verdicts.len();
    let unknown = verdicts
        .iter()
        .filter(|v| v.verdict == Verdict::Unknown)
        .map(|v| v.name.clone())
        .collect();
    let incompatible = verdicts
        .into_iter()
        .filter(|v| v.verdict == Verdict::Incompatible)
        .collect();
    GateReport {
        scope: scope.to_string(),
        checked,
        incompatible,
        unknown,
        decision,
    }
}
