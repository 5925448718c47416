use anyhow::Context as _;
use camino::{Utf8Path, Utf8PathBuf};
use ini::{Ini, Properties};

use crate::{dir, error::Error};

pub const DEFAULT_PROFILE: &str = "default";

/// `~/.aws/config` prefixes every profile but the default one.
const CONFIG_PROFILE_PREFIX: &str = "profile ";

/// An AWS shared credentials or config file.
pub struct ProfileStore {
    path: Utf8PathBuf,
    ini: Ini,
}

/// A profile that assumes a role using the credentials of another profile.
#[derive(Debug, PartialEq)]
pub struct ChainedProfile {
    pub name: String,
    pub source_profile: String,
    pub role_arn: Option<String>,
}

impl ProfileStore {
    /// A missing file is read as an empty store.
    pub fn load(path: &Utf8Path) -> anyhow::Result<Self> {
        let ini = if path.exists() {
            Ini::load_from_file(path).with_context(|| format!("cannot read {path}"))?
        } else {
            Ini::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            ini,
        })
    }

    pub fn save(&self) -> anyhow::Result<()> {
        dir::create_parent_dir(&self.path)?;
        self.ini
            .write_to_file(&self.path)
            .with_context(|| format!("cannot write {}", self.path))
    }

    /// Section names, in file order.
    pub fn sections(&self) -> Vec<&str> {
        self.ini.sections().flatten().collect()
    }

    pub fn section(&self, name: &str) -> Option<&Properties> {
        self.ini.section(Some(name))
    }

    /// Replace the fields of the default profile with the ones of
    /// `profile`, then save the file.
    pub fn switch_default(&mut self, profile: &str) -> anyhow::Result<()> {
        let chosen = self
            .section(profile)
            .cloned()
            .ok_or_else(|| Error::UnknownProfile(profile.to_string()))?;
        match self.ini.section_mut(Some(DEFAULT_PROFILE)) {
            Some(default) => *default = chosen,
            None => {
                for (key, value) in chosen.iter() {
                    self.ini
                        .set_to(Some(DEFAULT_PROFILE), key.to_string(), value.to_string());
                }
            }
        }
        self.save()
    }

    /// Profiles with a `source_profile`, in file order.
    pub fn chained_profiles(&self) -> Vec<ChainedProfile> {
        self.ini
            .iter()
            .filter_map(|(section, props)| {
                let section = section?;
                let source_profile = props.get("source_profile")?;
                let name = section
                    .strip_prefix(CONFIG_PROFILE_PREFIX)
                    .unwrap_or(section)
                    .trim();
                Some(ChainedProfile {
                    name: name.to_string(),
                    source_profile: source_profile.to_string(),
                    role_arn: props.get("role_arn").map(str::to_string),
                })
            })
            .collect()
    }
}
