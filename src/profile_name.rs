use serde::{Deserialize, Serialize};

/// How a role is turned into an AWS profile name.
#[derive(clap::ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileNameFormat {
    /// `team-dev`
    #[default]
    #[value(name = "RoleName")]
    #[serde(rename = "RoleName")]
    RoleName,
    /// `team-dev-my-account`
    #[value(name = "RoleName-AccountAlias")]
    #[serde(rename = "RoleName-AccountAlias")]
    RoleNameAccountAlias,
}

/// Profile name for a role: the part of the ARN after the last `role/`,
/// with role path separators replaced by hyphens so the name is a valid
/// INI section.
pub fn derive_profile_name(role_arn: &str, account_alias: &str, format: ProfileNameFormat) -> String {
    let role_name = role_arn
        .rsplit("role/")
        .next()
        .unwrap_or(role_arn)
        .replace('/', "-");
    match format {
        ProfileNameFormat::RoleName => role_name,
        ProfileNameFormat::RoleNameAccountAlias => format!("{role_name}-{account_alias}"),
    }
}
