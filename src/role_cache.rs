use anyhow::Context as _;
use camino::Utf8Path;
use tracing::{debug, info};

use crate::dir;

/// An assumable role and the alias of the account it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleEntry {
    pub role_arn: String,
    pub account_alias: String,
}

impl RoleEntry {
    pub fn new(role_arn: impl Into<String>, account_alias: impl Into<String>) -> Self {
        Self {
            role_arn: role_arn.into(),
            account_alias: account_alias.into(),
        }
    }
}

/// Something able to list the roles available to the user.
pub trait RoleSource {
    fn list_roles(&mut self) -> anyhow::Result<Vec<RoleEntry>>;
}

/// Return the cached roles, asking `source` for them (and rewriting the
/// cache) when `force_refresh` is set or the cache doesn't exist yet.
pub fn load_roles(
    source: &mut impl RoleSource,
    cache_file: &Utf8Path,
    force_refresh: bool,
) -> anyhow::Result<Vec<RoleEntry>> {
    if force_refresh || !cache_file.exists() {
        info!("Retrieving roles with saml2aws...");
        let roles = source.list_roles()?;
        write_cache(cache_file, &roles)?;
        Ok(roles)
    } else {
        debug!("Reading cached roles from {cache_file}");
        read_cache(cache_file)
    }
}

pub fn write_cache(cache_file: &Utf8Path, roles: &[RoleEntry]) -> anyhow::Result<()> {
    dir::create_parent_dir(cache_file)?;
    let content: String = roles
        .iter()
        .map(|r| {
            format!(
                "{},{}\n",
                quote_field(&r.role_arn),
                quote_field(&r.account_alias)
            )
        })
        .collect();
    fs_err::write(cache_file, content)?;
    Ok(())
}

/// Blank lines and lines starting with `#` are skipped.
pub fn read_cache(cache_file: &Utf8Path) -> anyhow::Result<Vec<RoleEntry>> {
    let content = fs_err::read_to_string(cache_file)?;
    let mut roles = vec![];
    for (n, record) in parse_records(&content).into_iter().enumerate() {
        let fields: Vec<&str> = record.iter().map(|f| f.trim()).collect();
        let Some(&role_arn) = fields.first() else {
            continue;
        };
        if role_arn.is_empty() {
            continue;
        }
        let account_alias = fields
            .get(1)
            .with_context(|| format!("{cache_file}: record {}: missing account alias", n + 1))?;
        roles.push(RoleEntry::new(role_arn, *account_alias));
    }
    Ok(roles)
}

/// Quote a CSV field if it contains a separator, a quote or a line break.
fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split CSV content into records. Quoted fields may contain separators,
/// line breaks and doubled quotes. Records starting with `#` are dropped.
fn parse_records(content: &str) -> Vec<Vec<String>> {
    let mut records = vec![];
    let mut record: Vec<String> = vec![];
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if quoted {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => quoted = false,
                c => field.push(c),
            }
            continue;
        }
        match c {
            '#' if record.is_empty() && field.is_empty() => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '"' => quoted = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            c => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}
