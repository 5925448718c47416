use tracing::{debug, info};

use crate::{
    args::LoginArgs,
    config::Config,
    dir::Paths,
    profile_map::ProfileMap,
    profile_name::ProfileNameFormat,
    role_cache::{self, RoleSource},
    saml2aws::{LoginOptions, Saml2Aws},
    select::{Picker, TerminalPicker},
    selection,
    session::{Session, TerminalPrompt},
};

/// Flags resolved against the config file.
#[derive(Debug)]
struct LoginSettings {
    profile_name_format: ProfileNameFormat,
    options: LoginOptions,
}

impl LoginSettings {
    fn new(args: &LoginArgs, config: &Config) -> Self {
        Self {
            profile_name_format: args
                .profile_name_format
                .or(config.profile_name_format)
                .unwrap_or_default(),
            options: LoginOptions {
                session_duration: args.session_duration.or(config.session_duration),
                browser_autofill: args.browser_autofill
                    || config.browser_autofill.unwrap_or(false),
            },
        }
    }
}

pub fn login(args: &LoginArgs, config: &Config, paths: &Paths) -> anyhow::Result<()> {
    let settings = LoginSettings::new(args, config);
    debug!("Login settings: {settings:?}");
    let session = Session::new(paths.saml2aws_config.clone(), TerminalPrompt);
    let mut saml2aws = Saml2Aws::new(session, settings.options);

    let (candidates, chosen) = select_profiles(
        &mut saml2aws,
        &TerminalPicker,
        args,
        settings.profile_name_format,
        paths,
    )?;
    if chosen.is_empty() {
        info!("Nothing selected. Aborted.");
        return Ok(());
    }
    for profile in &chosen {
        if let Some(role_arn) = candidates.get(profile) {
            saml2aws.login(role_arn, profile)?;
        }
    }
    Ok(())
}

/// Load the roles, then let the user choose the profiles to refresh.
fn select_profiles(
    source: &mut impl RoleSource,
    picker: &impl Picker,
    args: &LoginArgs,
    format: ProfileNameFormat,
    paths: &Paths,
) -> anyhow::Result<(ProfileMap, Vec<String>)> {
    let roles = role_cache::load_roles(source, &paths.roles_cache, args.refresh_cached_roles)?;
    let candidates = selection::build_candidates(&roles, format, &args.shortlist);
    debug!("{} of {} roles listed", candidates.len(), roles.len());
    let preselected =
        selection::compute_preselected(&candidates, &paths.last_selected, &args.pre_select)?;
    let chosen =
        selection::run_interactive_selection(picker, &candidates, &preselected, &paths.last_selected)?;
    Ok((candidates, chosen))
}
