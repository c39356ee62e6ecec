use std::path::Path;

use crate::domain::models::ConfigFile;

/// Load `.depbump.toml` from the project directory. An absent file yields
/// the defaults; a present but malformed file is a hard error.
pub fn load_config(project_dir: &Path) -> anyhow::Result<ConfigFile> {
    let path = project_dir.join(".depbump.toml");
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(&path)?;
    Ok(toml::from_str(&raw)?)
}
