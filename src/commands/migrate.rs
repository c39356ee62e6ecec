use crate::*;
use std::path::Path;

pub fn handle_migrate_commands(cli: &Cli, config: &ConfigFile) -> anyhow::Result<bool> {
    let plan = match &cli.command {
        Commands::React => REACT_PLAN,
        Commands::Node => NODE_PLAN,
        _ => return Ok(false),
    };
    run_migration(cli, config, &plan)?;
    Ok(true)
}

/// The fixed migration sequence. Steps commit independently: a fatal error
/// after the manifest write leaves the write in place (no rollback).
fn run_migration(cli: &Cli, config: &ConfigFile, plan: &MigrationPlan) -> anyhow::Result<()> {
    let project_dir = Path::new(&cli.dir);
    let mut manifest = PackageManifest::load(project_dir)?;
    output::step(&format!(
        "{}: migrating {} from {} to {}",
        plan.name,
        manifest.name().unwrap_or("project"),
        plan.old_major,
        plan.new_major
    ));

    let inspector = InstalledInspector::new(project_dir);
    if !inspector.modules_dir_exists() {
        output::warn("node_modules not found; all verdicts will be unknown until install");
    }

    let scope = effective_scope(cli, config);
    let (managed, external): (Vec<DependencyRecord>, Vec<DependencyRecord>) = manifest
        .dependency_records()
        .into_iter()
        .partition(|r| r.name.starts_with(&scope));

    let mut confirmer: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirmer)
    };

    let mut gates = Vec::new();
    for (label, records) in [("managed", managed), ("external", external)] {
        output::step(&format!(
            "checking {} {} dependencies against {}",
            records.len(),
            label,
            plan.name
        ));
        let verdicts = gate::classify(&records, &inspector, plan, &config.general.extra_allow);
        let decision = gate::decide(label, &verdicts, confirmer.as_mut())?;
        let report = gate::gate_report(label, verdicts, decision);
        if decision == Decision::Abort {
            audit(
                "abort",
                serde_json::json!({"migration": plan.name, "scope": label}),
            );
            return Err(GateError::Aborted(report.incompatible.len()).into());
        }
        gates.push(report);
    }

    let mut pinned = Vec::new();
    for (name, range) in plan.pins.iter().copied() {
        pinned.extend(manifest.pin_dependency(name, range));
    }
    let engines_node = plan.engines_node.map(|range| {
        manifest.set_engines_node(range);
        range.to_string()
    });
    manifest.save()?;
    output::success(&format!(
        "package.json updated ({} pins)",
        pinned.len()
    ));

    let manager = detect_manager(project_dir, config.general.installer.as_deref());
    output::step(&format!("running {} install", manager));
    let install = run_install(project_dir, &manager)?;

    let rewrites = if plan.rewrite_runtime_files {
        output::step("rewriting Dockerfiles, CI workflows and .nvmrc");
        rewrite_runtime_files(
            project_dir,
            plan.old_major,
            plan.new_major,
            &config.general.skip_paths,
        )?
    } else {
        Vec::new()
    };

    let report = build_migration_report(plan.name, gates, pinned, engines_node, install, rewrites);
    audit(
        "migrate",
        serde_json::json!({"migration": plan.name, "overall": report.overall}),
    );
    for w in &report.warnings {
        output::warn(w);
    }
    print_one(cli.json, report, |r| {
        format!("{}: {}", r.migration, r.overall)
    })?;
    Ok(())
}

/// An explicit `--scope` wins; otherwise the config file may override the
/// built-in default namespace.
pub fn effective_scope(cli: &Cli, config: &ConfigFile) -> String {
    if cli.scope != DEFAULT_MANAGED_SCOPE {
        return cli.scope.clone();
    }
    config
        .general
        .managed_scope
        .clone()
        .unwrap_or_else(|| cli.scope.clone())
}
