use anyhow::Context as _;
use camino::{Utf8Path, Utf8PathBuf};

const DATA_DIR: &str = ".saml2aws-multi";
const ROLES_CACHE_FILE: &str = "aws_login_roles.csv";
const LAST_SELECTED_FILE: &str = "aws_login_last_selected.txt";

/// Files read and written by the tool.
#[derive(Debug, Clone)]
pub struct Paths {
    /// `key=value` file owned by saml2aws.
    pub saml2aws_config: Utf8PathBuf,
    pub aws_credentials: Utf8PathBuf,
    pub aws_config: Utf8PathBuf,
    /// `role_arn,account_alias` rows.
    pub roles_cache: Utf8PathBuf,
    /// One profile name per line.
    pub last_selected: Utf8PathBuf,
    pub config_dir: Utf8PathBuf,
}

impl Paths {
    pub fn new(home: &Utf8Path) -> Self {
        let data_dir = home.join(DATA_DIR);
        Self {
            saml2aws_config: home.join(".saml2aws"),
            aws_credentials: home.join(".aws").join("credentials"),
            aws_config: home.join(".aws").join("config"),
            roles_cache: data_dir.join(ROLES_CACHE_FILE),
            last_selected: data_dir.join(LAST_SELECTED_FILE),
            config_dir: home.join(".config").join("saml2aws-multi"),
        }
    }

    pub fn from_home() -> anyhow::Result<Self> {
        Ok(Self::new(&home_dir()?))
    }
}

pub fn home_dir() -> anyhow::Result<Utf8PathBuf> {
    let home_dir = home::home_dir().context("cannot determine home directory")?;
    Utf8PathBuf::from_path_buf(home_dir)
        .map_err(|p| anyhow::anyhow!("home directory is not valid UTF-8: {p:?}"))
}

/// Create the parent directory of `file` if it doesn't exist.
pub fn create_parent_dir(file: &Utf8Path) -> anyhow::Result<()> {
    if let Some(parent) = file.parent() {
        if !parent.as_str().is_empty() && !parent.exists() {
            fs_err::create_dir_all(parent)?;
        }
    }
    Ok(())
}
