use std::fmt;

use camino::Utf8PathBuf;

/// Conditions that end a run early and are reported differently from
/// unexpected failures.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// saml2aws did not list any role we could resolve.
    NoRolesRetrieved,
    /// There is nothing for the user to choose from.
    NothingToDo(&'static str),
    MissingSaml2AwsConfig(Utf8PathBuf),
    UnknownProfile(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoRolesRetrieved => write!(f, "Failed to retrieve roles with saml2aws."),
            Error::NothingToDo(reason) => write!(f, "{reason}"),
            Error::MissingSaml2AwsConfig(path) => {
                write!(f, "saml2aws config file not found: {path}")
            }
            Error::UnknownProfile(name) => write!(f, "profile `{name}` not found"),
        }
    }
}

impl std::error::Error for Error {}
