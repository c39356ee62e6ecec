use regex::Regex;
use std::path::Path;
use walkdir::WalkDir;

use crate::domain::constants::DEFAULT_SKIP_DIRS;
use crate::domain::models::RewriteOutcome;
use crate::services::output;

/// Rewrite Node major-version pins in Dockerfiles, CI workflow YAML, and
/// `.nvmrc` files under the project root. Substring/regex substitution on
/// fixed patterns, not Dockerfile/YAML parsing — same deliberate
/// simplification as the gate's range matching.
pub fn rewrite_runtime_files(
    project_dir: &Path,
    old_major: u32,
    new_major: u32,
    extra_skips: &[String],
) -> anyhow::Result<Vec<RewriteOutcome>> {
    // regex has no lookaround; the trailing capture keeps node:200 intact.
    let docker_re = Regex::new(&format!(r"node:{}([^0-9]|$)", old_major))?;
    let docker_sub = format!("node:{}{}", new_major, "${1}");
    let ci_re = Regex::new(&format!(
        r#"(node-version:\s*['"]?){}([^0-9]|$)"#,
        old_major
    ))?;
    let ci_sub = format!("{}{}{}", "${1}", new_major, "${2}");
    let nvmrc_re = Regex::new(&format!(r"^(v?){}(?:\.\S*)?\s*$", old_major))?;
    let nvmrc_sub = format!("{}{}", "${1}", new_major);

    let mut outcomes = Vec::new();
    let walker = WalkDir::new(project_dir).into_iter().filter_entry(|e| {
        let name = e.file_name().to_string_lossy();
        !(e.file_type().is_dir()
            && (DEFAULT_SKIP_DIRS.contains(&name.as_ref())
                || extra_skips.iter().any(|s| s == name.as_ref())))
    });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        let (re, sub) = if is_dockerfile(&name) {
            (&docker_re, docker_sub.as_str())
        } else if is_ci_yaml(path, &name) {
            (&ci_re, ci_sub.as_str())
        } else if name == ".nvmrc" {
            (&nvmrc_re, nvmrc_sub.as_str())
        } else {
            continue;
        };

        let Ok(content) = std::fs::read_to_string(path) else {
            output::warn(&format!("skipping unreadable file {}", path.display()));
            continue;
        };
        let replacements = re.find_iter(&content).count();
        if replacements == 0 {
            continue;
        }
        let rewritten = re.replace_all(&content, sub);
        std::fs::write(path, rewritten.as_ref())?;
        outcomes.push(RewriteOutcome {
            file: path
                .strip_prefix(project_dir)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string(),
            replacements,
        });
    }
    outcomes.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(outcomes)
}

fn is_dockerfile(name: &str) -> bool {
    name == "Dockerfile" || name.starts_with("Dockerfile.") || name.ends_with(".Dockerfile")
}

fn is_ci_yaml(path: &Path, name: &str) -> bool {
    if name == ".gitlab-ci.yml" {
        return true;
    }
    let in_workflows = path
        .parent()
        .map(|p| p.ends_with(Path::new(".github/workflows")))
        .unwrap_or(false);
    in_workflows && (name.ends_with(".yml") || name.ends_with(".yaml"))
}
