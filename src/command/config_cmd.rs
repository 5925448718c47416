use crate::{
    config::{self, Config},
    dir::Paths,
    profile_name::ProfileNameFormat,
};

pub fn create_default_config(paths: &Paths) -> anyhow::Result<()> {
    let config_dir = config::create_config_dir(paths)?;
    let default_config = Config {
        profile_name_format: Some(ProfileNameFormat::default()),
        session_duration: None,
        browser_autofill: Some(false),
    };
    let default_config = toml::to_string(&default_config)?;
    let config_file = config::config_file(config_dir);
    if config_file.exists() {
        println!("Config file already exists: {config_file}");
        return Ok(());
    }
    fs_err::write(&config_file, default_config)?;
    println!("{config_file}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use camino_tempfile::Utf8TempDir;

    use super::*;

    #[test]
    fn default_config_is_written_once() {
        let home = Utf8TempDir::new().unwrap();
        let paths = Paths::new(home.path());
        let config_file = config::config_file(&paths.config_dir);

        create_default_config(&paths).unwrap();
        assert_eq!(
            config::parse_config(&paths).unwrap().profile_name_format,
            Some(ProfileNameFormat::RoleName)
        );

        fs_err::write(&config_file, "session_duration = 900\n").unwrap();
        create_default_config(&paths).unwrap();
        assert_eq!(
            fs_err::read_to_string(&config_file).unwrap(),
            "session_duration = 900\n"
        );
    }
}
