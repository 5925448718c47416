use std::collections::HashSet;

use camino::Utf8Path;

use crate::{
    dir,
    error::Error,
    profile_map::ProfileMap,
    profile_name::{derive_profile_name, ProfileNameFormat},
    role_cache::RoleEntry,
    select::Picker,
};

/// Map every role to its profile name. With a non-empty `shortlist`, only
/// profile names containing one of the keywords are kept.
pub fn build_candidates(
    roles: &[RoleEntry],
    format: ProfileNameFormat,
    shortlist: &[String],
) -> ProfileMap {
    let mut candidates = ProfileMap::new();
    for role in roles {
        let profile_name = derive_profile_name(&role.role_arn, &role.account_alias, format);
        if shortlist.is_empty() || shortlist.iter().any(|k| profile_name.contains(k.as_str())) {
            candidates.insert(profile_name, role.role_arn.clone());
        }
    }
    candidates
}

/// Profiles to tick before the user picks: the previous selection that is
/// still available, followed by every profile whose role ARN contains one
/// of the `pre_select` keywords.
///
/// Unlike [`build_candidates`], keywords are matched against the role ARN,
/// not the profile name.
pub fn compute_preselected(
    candidates: &ProfileMap,
    last_selected_file: &Utf8Path,
    pre_select: &[String],
) -> anyhow::Result<Vec<String>> {
    let mut preselected: Vec<String> = read_last_selected(last_selected_file)?
        .into_iter()
        .filter(|name| candidates.contains(name))
        .collect();
    for (profile_name, role_arn) in candidates.iter() {
        if pre_select.iter().any(|k| role_arn.contains(k.as_str())) {
            preselected.push(profile_name.to_string());
        }
    }
    Ok(preselected)
}

/// Let the user choose the profiles to log into, remembering a non-empty
/// choice in `last_selected_file`.
pub fn run_interactive_selection(
    picker: &impl Picker,
    candidates: &ProfileMap,
    preselected: &[String],
    last_selected_file: &Utf8Path,
) -> anyhow::Result<Vec<String>> {
    if candidates.is_empty() {
        return Err(Error::NothingToDo("No roles retrieved for selection.").into());
    }
    let preselected: HashSet<&str> = preselected.iter().map(String::as_str).collect();
    let checked: Vec<usize> = candidates
        .names()
        .enumerate()
        .filter(|(_, name)| preselected.contains(name))
        .map(|(i, _)| i)
        .collect();
    let options = candidates.names().map(str::to_string).collect();

    let chosen = picker.pick_many("Please choose the role", options, &checked)?;
    if !chosen.is_empty() {
        write_last_selected(last_selected_file, &chosen)?;
    }
    Ok(chosen)
}

pub fn read_last_selected(file: &Utf8Path) -> anyhow::Result<Vec<String>> {
    if !file.exists() {
        return Ok(vec![]);
    }
    let content = fs_err::read_to_string(file)?;
    Ok(content.lines().map(|l| l.trim().to_string()).collect())
}

fn write_last_selected(file: &Utf8Path, profiles: &[String]) -> anyhow::Result<()> {
    dir::create_parent_dir(file)?;
    fs_err::write(file, profiles.join("\n"))?;
    Ok(())
}
