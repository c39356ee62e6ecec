use clap::Parser;

mod cli;
mod commands;
mod domain;
mod manifest;
mod services;

pub use cli::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use manifest::{ManifestError, PackageManifest};
pub use services::audit::audit;
pub use services::config::load_config;
pub use services::gate::{self, GateError};
pub use services::inspector::InstalledInspector;
pub use services::installer::{detect_manager, manager_available, run_install, InstallError};
pub use services::output::{self, print_one, print_out};
pub use services::prompt::{AssumeYes, Confirm, TerminalConfirmer};
pub use services::report::{build_check_report, build_migration_report};
pub use services::rewrite::rewrite_runtime_files;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        emit_error(cli.json, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let project_dir = std::path::Path::new(&cli.dir);
    let config = load_config(project_dir)?;

    if commands::handle_migrate_commands(cli, &config)? {
        return Ok(());
    }
    if commands::handle_inspect_commands(cli, &config)? {
        return Ok(());
    }
    unreachable!("every subcommand has a handler")
}

fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(m) = err.downcast_ref::<ManifestError>() {
        return match m {
            ManifestError::NotFound(_) => "MISSING_FILE",
            ManifestError::Parse { .. } => "BAD_MANIFEST",
        };
    }
    if err.downcast_ref::<GateError>().is_some() {
        return "INCOMPATIBILITY_ABORT";
    }
    if err.downcast_ref::<InstallError>().is_some() {
        return "COMMAND_FAILED";
    }
    "ERROR"
}

fn emit_error(json: bool, err: &anyhow::Error) {
    if json {
        let envelope = serde_json::json!({
            "ok": false,
            "error": {"code": error_code(err), "message": err.to_string()}
        });
        println!("{}", serde_json::to_string_pretty(&envelope).unwrap_or_default());
    } else {
        output::fail(&err.to_string());
    }
}
