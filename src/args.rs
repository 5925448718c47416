use crate::profile_name::ProfileNameFormat;

#[derive(clap::Parser, Debug)]
#[command(about, version, author)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[command(flatten)]
    pub login: LoginArgs,
    /// Print debug logs, including the output of saml2aws.
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Switch the default profile of `~/.aws/credentials`.
    Switch,
    /// List the profiles of `~/.aws/config` that assume a role from another profile.
    #[command(visible_alias = "lc")]
    ListChained,
    /// Print the identity behind a profile.
    Whoami(Whoami),
    /// Create default configuration and print its path.
    Config,
}

#[derive(clap::Args, Debug, Default)]
pub struct LoginArgs {
    /// Pre-select the roles whose ARN contains the given keyword(s).
    #[arg(short = 'k', long = "keyword")]
    pub pre_select: Vec<String>,
    /// Only show the roles whose profile name contains the given keyword(s).
    #[arg(short, long)]
    pub shortlist: Vec<String>,
    /// How profile names are derived from roles.
    #[arg(short, long, value_enum)]
    pub profile_name_format: Option<ProfileNameFormat>,
    /// Retrieve the roles with saml2aws instead of reading the cache.
    #[arg(short, long)]
    pub refresh_cached_roles: bool,
    /// Session duration in seconds.
    #[arg(short = 't', long)]
    pub session_duration: Option<u32>,
    /// Let saml2aws fill in the credentials in the browser.
    #[arg(short, long)]
    pub browser_autofill: bool,
}

#[derive(clap::Args, Debug)]
pub struct Whoami {
    /// AWS profile name.
    #[arg(default_value = "default")]
    pub profile: String,
}
