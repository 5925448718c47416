mod args;
mod aws;
mod cmd;
mod command;
mod config;
mod dir;
mod error;
mod key_value;
mod log;
mod profile_map;
mod profile_name;
mod profile_store;
mod role_cache;
mod saml2aws;
mod select;
mod selection;
mod session;

use args::{CliArgs, Command};
use clap::Parser as _;
use dir::Paths;
use error::Error;
use log::LogConfig;
use select::TerminalPicker;
use tracing::{error, info};

const SAML2AWS_HINT: &str = "See https://github.com/Versent/saml2aws to create one.";

fn main() {
    let args = CliArgs::parse();
    log::init(&LogConfig::new(args.debug));
    if let Err(e) = run(args) {
        report(&e);
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let paths = Paths::from_home()?;
    match args.command {
        None => {
            let config = config::parse_config(&paths)?;
            command::login::login(&args.login, &config, &paths)
        }
        Some(Command::Switch) => command::switch::switch_default(&paths, &TerminalPicker),
        Some(Command::ListChained) => command::list_chained::list_chained(&paths),
        Some(Command::Whoami(whoami)) => command::whoami::whoami(&whoami),
        Some(Command::Config) => command::config_cmd::create_default_config(&paths),
    }
}

/// Log the error that ended the run. The exit code stays 0.
fn report(e: &anyhow::Error) {
    match e.downcast_ref::<Error>() {
        Some(Error::NothingToDo(reason)) => info!("{reason} Aborted."),
        Some(Error::MissingSaml2AwsConfig(_)) => error!("{e}. {SAML2AWS_HINT}"),
        Some(_) => error!("{e}"),
        None => error!("{e:?}"),
    }
}
