use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::{dir::Paths, profile_name::ProfileNameFormat};

const CONFIG_FILE: &str = "config.toml";

/// Defaults for the login flags, read from `~/.config/saml2aws-multi/config.toml`.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub profile_name_format: Option<ProfileNameFormat>,
    /// Seconds.
    pub session_duration: Option<u32>,
    pub browser_autofill: Option<bool>,
}

/// Create config dir if it doesn't exist.
/// Return config dir path.
pub fn create_config_dir(paths: &Paths) -> anyhow::Result<&Utf8Path> {
    if !paths.config_dir.exists() {
        fs_err::create_dir_all(&paths.config_dir)?;
    }
    Ok(paths.config_dir.as_path())
}

pub fn config_file(config_dir: &Utf8Path) -> Utf8PathBuf {
    config_dir.join(CONFIG_FILE)
}

pub fn parse_config(paths: &Paths) -> anyhow::Result<Config> {
    let config_file = config_file(&paths.config_dir);
    if config_file.exists() {
        let content = fs_err::read_to_string(&config_file)?;
        Ok(toml::from_str(&content)?)
    } else {
        Ok(Config::default())
    }
}
