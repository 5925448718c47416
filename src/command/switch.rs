use tracing::info;

use crate::{
    dir::Paths,
    profile_store::{ProfileStore, DEFAULT_PROFILE},
    select::Picker,
};

pub fn switch_default(paths: &Paths, picker: &impl Picker) -> anyhow::Result<()> {
    let mut store = ProfileStore::load(&paths.aws_credentials)?;
    let options: Vec<String> = store
        .sections()
        .into_iter()
        .filter(|&profile| profile != DEFAULT_PROFILE)
        .map(str::to_string)
        .collect();
    if options.is_empty() {
        info!("No non default aws profile found. Aborted.");
        return Ok(());
    }
    match picker.pick_one("Please choose the profile", options)? {
        Some(profile) => {
            store.switch_default(&profile)?;
            info!("Set the default profile to {profile}");
        }
        None => info!("Nothing selected. Aborted."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use camino_tempfile::Utf8TempDir;

    use super::*;
    use crate::selection::tests::FakePicker;

    fn credentials(home: &Utf8TempDir, content: &str) -> Paths {
        let paths = Paths::new(home.path());
        fs_err::create_dir_all(paths.aws_credentials.parent().unwrap()).unwrap();
        fs_err::write(&paths.aws_credentials, content).unwrap();
        paths
    }

    #[test]
    fn chosen_profile_becomes_default() {
        let home = Utf8TempDir::new().unwrap();
        let paths = credentials(
            &home,
            "[default]\naws_access_key_id = old\n\n[dev]\naws_access_key_id = dev_key\n",
        );
        let picker = FakePicker {
            answer: Some(vec!["dev".to_string()]),
            ..Default::default()
        };

        switch_default(&paths, &picker).unwrap();

        assert_eq!(picker.seen.borrow()[0].0, vec!["dev".to_string()]);
        let store = ProfileStore::load(&paths.aws_credentials).unwrap();
        assert_eq!(
            store.section("default").unwrap().get("aws_access_key_id"),
            Some("dev_key")
        );
    }

    #[test]
    fn nothing_selected_leaves_file_untouched() {
        let home = Utf8TempDir::new().unwrap();
        let content = "[default]\naws_access_key_id = old\n\n[dev]\naws_access_key_id = dev_key\n";
        let paths = credentials(&home, content);

        switch_default(&paths, &FakePicker::default()).unwrap();

        assert_eq!(fs_err::read_to_string(&paths.aws_credentials).unwrap(), content);
    }

    #[test]
    fn only_default_profile_is_a_no_op() {
        let home = Utf8TempDir::new().unwrap();
        let paths = credentials(&home, "[default]\naws_access_key_id = old\n");
        let picker = FakePicker::default();

        switch_default(&paths, &picker).unwrap();

        assert!(picker.seen.borrow().is_empty());
    }
}
