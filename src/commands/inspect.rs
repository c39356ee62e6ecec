use crate::commands::migrate::effective_scope;
use crate::*;
use std::path::Path;

pub fn handle_inspect_commands(cli: &Cli, config: &ConfigFile) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Check { target } => {
            let plan = match target {
                CheckTarget::React => REACT_PLAN,
                CheckTarget::Node => NODE_PLAN,
            };
            run_check(cli, config, &plan)?;
            Ok(true)
        }
        Commands::Doctor => {
            run_doctor(cli, config)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Gate-only dry run: classify both scopes, never prompt, never mutate.
/// The decision field shows what the default (negative) answer would do.
fn run_check(cli: &Cli, config: &ConfigFile, plan: &MigrationPlan) -> anyhow::Result<()> {
    let project_dir = Path::new(&cli.dir);
    let manifest = PackageManifest::load(project_dir)?;
    let inspector = InstalledInspector::new(project_dir);

    let scope = effective_scope(cli, config);
    let (managed, external): (Vec<DependencyRecord>, Vec<DependencyRecord>) = manifest
        .dependency_records()
        .into_iter()
        .partition(|r| r.name.starts_with(&scope));

    let mut gates = Vec::new();
    for (label, records) in [("managed", managed), ("external", external)] {
        let verdicts = gate::classify(&records, &inspector, plan, &config.general.extra_allow);
        let decision = if verdicts.iter().any(|v| v.verdict == Verdict::Incompatible) {
            Decision::Abort
        } else {
            Decision::Proceed
        };
        gates.push(gate::gate_report(label, verdicts, decision));
    }

    let report = build_check_report(plan.name, gates);
    audit(
        "check",
        serde_json::json!({"target": plan.name, "overall": report.overall}),
    );
    let blocked = report.overall != "ok";
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: !blocked,
                data: report
            })?
        );
    } else {
        println!("check {}: {}", report.target, report.overall);
        for g in &report.gates {
            println!("{}\tchecked={}\tdecision={:?}", g.scope, g.checked, g.decision);
            for v in &g.incompatible {
                for b in &v.blocking {
                    println!("  {}\trequires {} {}", v.name, b.peer, b.required_range);
                }
            }
            for u in &g.unknown {
                println!("  {}\tunknown (not inspectable)", u);
            }
        }
    }
    if blocked {
        std::process::exit(1);
    }
    Ok(())
}

fn run_doctor(cli: &Cli, config: &ConfigFile) -> anyhow::Result<()> {
    let project_dir = Path::new(&cli.dir);
    let manager = detect_manager(project_dir, config.general.installer.as_deref());

    let checks = vec![
        CheckItem {
            name: "package_json".to_string(),
            status: if project_dir.join("package.json").exists() {
                "ok"
            } else {
                "missing"
            }
            .to_string(),
        },
        CheckItem {
            name: "node_modules".to_string(),
            status: if project_dir.join("node_modules").is_dir() {
                "ok"
            } else {
                "missing"
            }
            .to_string(),
        },
        CheckItem {
            name: format!("{}_available", manager),
            status: if manager_available(&manager) {
                "ok"
            } else {
                "missing"
            }
            .to_string(),
        },
        CheckItem {
            name: "config_file".to_string(),
            status: if project_dir.join(".depbump.toml").exists() {
                "ok"
            } else {
                "not_provided"
            }
            .to_string(),
        },
        CheckItem {
            name: "dockerfile".to_string(),
            status: if project_dir.join("Dockerfile").exists() {
                "ok"
            } else {
                "none"
            }
            .to_string(),
        },
        CheckItem {
            name: "workflows_dir".to_string(),
            status: if project_dir.join(".github/workflows").is_dir() {
                "ok"
            } else {
                "none"
            }
            .to_string(),
        },
        CheckItem {
            name: "nvmrc".to_string(),
            status: if project_dir.join(".nvmrc").exists() {
                "ok"
            } else {
                "none"
            }
            .to_string(),
        },
    ];

    let overall = if checks.iter().all(|c| c.status != "missing") {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();
    audit("doctor", serde_json::json!({"overall": overall}));

    let report = DoctorReport { overall, checks };
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: report.overall == "ok",
                data: report
            })?
        );
    } else {
        println!("doctor: {}", report.overall);
        print_out(false, &report.checks, |c| {
            format!("{}\t{}", c.name, c.status)
        })?;
    }
    Ok(())
}
