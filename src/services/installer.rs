use std::path::Path;

use crate::domain::models::InstallReport;

#[derive(thiserror::Error, Debug)]
pub enum InstallError {
    #[error("{manager} install exited with status {status}")]
    Failed { manager: String, status: i32 },
    #[error("package manager not found on PATH: {0}")]
    MissingBinary(String),
}

/// Lockfile wins the detection; a config override wins over the lockfile.
pub fn detect_manager(project_dir: &Path, configured: Option<&str>) -> String {
    if let Some(m) = configured {
        return m.to_string();
    }
    if project_dir.join("pnpm-lock.yaml").exists() {
        "pnpm".to_string()
    } else if project_dir.join("yarn.lock").exists() {
        "yarn".to_string()
    } else {
        "npm".to_string()
    }
}

pub fn manager_available(manager: &str) -> bool {
    which::which(manager).is_ok()
}

/// Run `<manager> install` with inherited stdio so the operator sees the
/// resolver output. A non-zero exit is fatal for the whole migration.
pub fn run_install(project_dir: &Path, manager: &str) -> anyhow::Result<InstallReport> {
    if !manager_available(manager) {
        return Err(InstallError::MissingBinary(manager.to_string()).into());
    }
    let status = std::process::Command::new(manager)
        .arg("install")
        .current_dir(project_dir)
        .status()?;
    if !status.success() {
        return Err(InstallError::Failed {
            manager: manager.to_string(),
            status: status.code().unwrap_or(-1),
        }
        .into());
    }
    Ok(InstallReport {
        manager: manager.to_string(),
        status: "ok".to_string(),
    })
}
