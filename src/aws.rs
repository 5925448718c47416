use anyhow::Context as _;
use serde::Deserialize;

use crate::cmd::Cmd;

/// Output of `aws sts get-caller-identity`.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    pub user_id: String,
    pub account: String,
    pub arn: String,
}

pub fn caller_identity(profile: &str) -> anyhow::Result<CallerIdentity> {
    let output = Cmd::new(
        "aws",
        [
            "sts",
            "get-caller-identity",
            "--profile",
            profile,
            "--output",
            "json",
        ],
    )
    .run()?;
    anyhow::ensure!(
        output.status().success(),
        "cannot get caller identity of profile `{profile}` (exit code {})",
        output.exit_code()
    );
    parse_caller_identity(output.stdout())
}

fn parse_caller_identity(json: &str) -> anyhow::Result<CallerIdentity> {
    serde_json::from_str(json).context("invalid output of `aws sts get-caller-identity`")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_identity_is_parsed() {
        let json = r#"{
            "UserId": "AROAEXAMPLE:me@example.com",
            "Account": "123456789012",
            "Arn": "arn:aws:sts::123456789012:assumed-role/dev/me@example.com"
        }"#;
        assert_eq!(
            parse_caller_identity(json).unwrap(),
            CallerIdentity {
                user_id: "AROAEXAMPLE:me@example.com".to_string(),
                account: "123456789012".to_string(),
                arn: "arn:aws:sts::123456789012:assumed-role/dev/me@example.com".to_string(),
            }
        );
    }
}
