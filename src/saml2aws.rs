use std::{collections::HashMap, sync::OnceLock};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::{
    cmd::Cmd,
    error::Error,
    role_cache::{RoleEntry, RoleSource},
    session::{Credentials, Prompt, Session},
};

const SAML2AWS: &str = "saml2aws";
/// Alias used for accounts listed without one.
const NO_ALIAS: &str = "None";

/// Flags forwarded to `saml2aws login`.
#[derive(Debug, Default, Clone)]
pub struct LoginOptions {
    pub session_duration: Option<u32>,
    pub browser_autofill: bool,
}

pub struct Saml2Aws<P> {
    session: Session<P>,
    options: LoginOptions,
}

impl<P: Prompt> Saml2Aws<P> {
    pub fn new(session: Session<P>, options: LoginOptions) -> Self {
        Self { session, options }
    }

    /// Write credentials for `role_arn` into the `profile_name` profile.
    /// Returns the exit code of saml2aws.
    pub fn login(&mut self, role_arn: &str, profile_name: &str) -> anyhow::Result<i32> {
        info!("Adding {profile_name}...");
        let credentials = self.session.credentials()?;
        let output = login_cmd(role_arn, profile_name, credentials, &self.options).run()?;
        let exit_code = output.exit_code();
        info!("Response Code: {exit_code}");
        Ok(exit_code)
    }
}

impl<P: Prompt> RoleSource for Saml2Aws<P> {
    fn list_roles(&mut self) -> anyhow::Result<Vec<RoleEntry>> {
        let credentials = self.session.credentials()?;
        let output = list_roles_cmd(credentials).run()?;
        debug!("Response Code: {}", output.exit_code());
        let mut parser = RoleListParser::default();
        for line in output.stdout().lines() {
            parser.feed(line);
        }
        Ok(parser.finish()?)
    }
}

fn list_roles_cmd(credentials: &Credentials) -> Cmd {
    let mut cmd = Cmd::new(SAML2AWS, ["list-roles"]);
    cmd.arg(format!("--username={}", credentials.username))
        .secret_arg("--password=", &credentials.password)
        .arg("--skip-prompt");
    cmd
}

fn login_cmd(
    role_arn: &str,
    profile_name: &str,
    credentials: &Credentials,
    options: &LoginOptions,
) -> Cmd {
    let mut cmd = Cmd::new(SAML2AWS, ["login"]);
    cmd.arg(format!("--role={role_arn}"))
        .arg("-p")
        .arg(profile_name)
        .arg(format!("--username={}", credentials.username))
        .secret_arg("--password=", &credentials.password)
        .arg("--skip-prompt");
    if let Some(session_duration) = options.session_duration {
        cmd.arg(format!("--session-duration={session_duration}"));
    }
    if options.browser_autofill {
        cmd.arg("--browser-autofill");
    }
    cmd
}

/// A line of `saml2aws list-roles` output.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    /// `Account: ALIAS (ID)` or `Account: ID`.
    Account { alias: &'a str, id: &'a str },
    /// An `Account:` line we can't read.
    MalformedAccount,
    /// `arn:aws:iam::ID:role/NAME`.
    Role { arn: &'a str, account_id: Option<&'a str> },
    Other,
}

fn account_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Account:\s+(?:(?P<alias>\S+)\s+\((?P<id>[^()\s]+)\)|(?P<bare_id>[^()\s]+))\s*$")
            .expect("valid regex")
    })
}

fn classify(line: &str) -> Line<'_> {
    if line.starts_with("Account:") {
        let Some(caps) = account_regex().captures(line) else {
            return Line::MalformedAccount;
        };
        return match (caps.name("alias"), caps.name("id"), caps.name("bare_id")) {
            (Some(alias), Some(id), _) => Line::Account {
                alias: alias.as_str(),
                id: id.as_str(),
            },
            (_, _, Some(id)) => Line::Account {
                alias: NO_ALIAS,
                id: id.as_str(),
            },
            _ => Line::MalformedAccount,
        };
    }
    if line.starts_with("arn:") {
        return Line::Role {
            arn: line,
            account_id: line.split(':').nth(4),
        };
    }
    Line::Other
}

/// Collects roles from `saml2aws list-roles` output.
///
/// Account headers announce an alias for an account id; every role line
/// that follows is resolved against the accounts seen so far.
#[derive(Debug, Default)]
pub struct RoleListParser {
    /// account id -> alias
    accounts: HashMap<String, String>,
    roles: Vec<RoleEntry>,
}

impl RoleListParser {
    pub fn feed(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        match classify(line) {
            Line::Account { alias, id } => {
                self.accounts.insert(id.to_string(), alias.to_string());
            }
            Line::MalformedAccount => warn!("Cannot parse account line: {line}"),
            Line::Role { arn, account_id } => {
                let alias = account_id.and_then(|id| self.accounts.get(id));
                match alias {
                    Some(alias) => self.roles.push(RoleEntry::new(arn, alias.clone())),
                    None => warn!("Skipping role of unknown account: {arn}"),
                }
            }
            Line::Other => debug!("Ignoring line: {line}"),
        }
    }

    /// Fails with [`Error::NoRolesRetrieved`] if no role was found.
    pub fn finish(self) -> Result<Vec<RoleEntry>, Error> {
        if self.roles.is_empty() {
            return Err(Error::NoRolesRetrieved);
        }
        Ok(self.roles)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn parse(lines: &[&str]) -> Result<Vec<RoleEntry>, Error> {
        let mut parser = RoleListParser::default();
        for line in lines {
            parser.feed(line);
        }
        parser.finish()
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "testuser".to_string(),
            password: SecretString::new("testpass".to_string()),
        }
    }

    #[test]
    fn roles_are_resolved_against_account_headers() {
        let roles = parse(&[
            "Account: aws-01 (123456789012)",
            "arn:aws:iam::123456789012:role/dev",
            "",
            "Account: aws-02 (213456789012)",
            "arn:aws:iam::213456789012:role/test",
        ])
        .unwrap();
        assert_eq!(
            roles,
            vec![
                RoleEntry::new("arn:aws:iam::123456789012:role/dev", "aws-01"),
                RoleEntry::new("arn:aws:iam::213456789012:role/test", "aws-02"),
            ]
        );
    }

    #[test]
    fn account_without_alias() {
        let roles = parse(&["Account: 123456789012", "arn:aws:iam::123456789012:role/dev"]).unwrap();
        assert_eq!(
            roles,
            vec![RoleEntry::new("arn:aws:iam::123456789012:role/dev", "None")]
        );
    }

    #[test]
    fn no_roles_is_an_error() {
        assert_eq!(
            parse(&["Account: aws-01 (123456789012)"]),
            Err(Error::NoRolesRetrieved)
        );
    }

    #[test]
    fn role_after_malformed_header_is_skipped() {
        assert_eq!(
            parse(&["Account: malformed line", "arn:aws:iam::123456789012:role/dev"]),
            Err(Error::NoRolesRetrieved)
        );
    }

    #[test]
    fn malformed_header_does_not_stop_parsing() {
        let roles = parse(&[
            "Account: malformed line",
            "Account: aws-01 (123456789012)",
            "arn:aws:iam::123456789012:role/dev\r",
        ])
        .unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].role_arn, "arn:aws:iam::123456789012:role/dev");
    }

    #[test]
    fn lines_are_classified() {
        assert_eq!(
            classify("Account: aws-01 (123456789012)"),
            Line::Account {
                alias: "aws-01",
                id: "123456789012"
            }
        );
        assert_eq!(classify("Account: a b c"), Line::MalformedAccount);
        assert_eq!(
            classify("arn:aws:iam::123456789012:role/dev"),
            Line::Role {
                arn: "arn:aws:iam::123456789012:role/dev",
                account_id: Some("123456789012")
            }
        );
        assert_eq!(classify("Using IdP: AzureAD"), Line::Other);
    }

    #[test]
    fn login_command_line() {
        let cmd = login_cmd(
            "arn:aws:iam::123456789012:role/dev",
            "dev",
            &credentials(),
            &LoginOptions::default(),
        );
        assert_eq!(
            cmd.to_string(),
            "saml2aws login --role=arn:aws:iam::123456789012:role/dev -p dev \
             --username=testuser --password=*** --skip-prompt"
        );
    }

    #[test]
    fn login_options_are_appended() {
        let options = LoginOptions {
            session_duration: Some(7200),
            browser_autofill: true,
        };
        let cmd = login_cmd("arn:aws:iam::123456789012:role/dev", "dev", &credentials(), &options);
        let cmd = cmd.to_string();
        assert!(cmd.ends_with("--skip-prompt --session-duration=7200 --browser-autofill"));
    }

    #[test]
    fn list_roles_command_line() {
        assert_eq!(
            list_roles_cmd(&credentials()).to_string(),
            "saml2aws list-roles --username=testuser --password=*** --skip-prompt"
        );
    }
}
