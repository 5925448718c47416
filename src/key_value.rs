use std::collections::BTreeMap;

use camino::Utf8Path;

/// Read a `key=value` file, such as the saml2aws configuration.
///
/// Keys and values are trimmed. Lines without `=`, entries with an empty
/// value and keys starting with `#` are skipped.
pub fn read_key_value_config(path: &Utf8Path) -> anyhow::Result<BTreeMap<String, String>> {
    let content = fs_err::read_to_string(path)?;
    Ok(parse_key_value(&content))
}

fn parse_key_value(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, value)| !value.is_empty() && !key.starts_with('#'))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
