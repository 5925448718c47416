use camino::Utf8PathBuf;
use inquire::{Password, PasswordDisplayMode, Text};
use secrecy::SecretString;
use tracing::info;

use crate::{error::Error, key_value};

pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Asks the user for whatever the config file doesn't provide.
pub trait Prompt {
    fn username(&self) -> anyhow::Result<String>;
    fn password(&self) -> anyhow::Result<SecretString>;
}

pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn username(&self) -> anyhow::Result<String> {
        Ok(Text::new("Username:").prompt()?)
    }

    fn password(&self) -> anyhow::Result<SecretString> {
        let password = Password::new("Password:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()?;
        Ok(SecretString::new(password))
    }
}

/// Holds the saml2aws credentials for the lifetime of the process.
/// The password is always prompted for, and only once.
pub struct Session<P> {
    config_file: Utf8PathBuf,
    prompt: P,
    credentials: Option<Credentials>,
}

impl<P: Prompt> Session<P> {
    pub fn new(config_file: Utf8PathBuf, prompt: P) -> Self {
        Self {
            config_file,
            prompt,
            credentials: None,
        }
    }

    pub fn credentials(&mut self) -> anyhow::Result<&Credentials> {
        let credentials = match self.credentials.take() {
            Some(credentials) => credentials,
            None => self.acquire()?,
        };
        Ok(self.credentials.insert(credentials))
    }

    fn acquire(&self) -> anyhow::Result<Credentials> {
        if !self.config_file.exists() {
            return Err(Error::MissingSaml2AwsConfig(self.config_file.clone()).into());
        }
        let config = key_value::read_key_value_config(&self.config_file)?;
        let username = match config.get("username") {
            Some(username) => {
                info!("Username: {username}");
                username.clone()
            }
            None => self.prompt.username()?,
        };
        let password = self.prompt.password()?;
        Ok(Credentials { username, password })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use camino_tempfile::Utf8TempDir;
    use secrecy::ExposeSecret as _;

    use super::*;

    #[derive(Default)]
    struct FakePrompt {
        username_calls: Cell<usize>,
        password_calls: Cell<usize>,
    }

    impl Prompt for &FakePrompt {
        fn username(&self) -> anyhow::Result<String> {
            self.username_calls.set(self.username_calls.get() + 1);
            Ok("typed-user".to_string())
        }

        fn password(&self) -> anyhow::Result<SecretString> {
            self.password_calls.set(self.password_calls.get() + 1);
            Ok(SecretString::new("testpass".to_string()))
        }
    }

    #[test]
    fn username_is_read_from_config() {
        let dir = Utf8TempDir::new().unwrap();
        let config = dir.path().join(".saml2aws");
        fs_err::write(&config, "[default]\nusername = testuser\npassword = ignored\n").unwrap();
        let prompt = FakePrompt::default();
        let mut session = Session::new(config, &prompt);

        let credentials = session.credentials().unwrap();

        assert_eq!(credentials.username, "testuser");
        assert_eq!(credentials.password.expose_secret(), "testpass");
        assert_eq!(prompt.username_calls.get(), 0);
        assert_eq!(prompt.password_calls.get(), 1);
    }

    #[test]
    fn missing_username_is_prompted() {
        let dir = Utf8TempDir::new().unwrap();
        let config = dir.path().join(".saml2aws");
        fs_err::write(&config, "[default]\nurl = https://idp.example.com\n").unwrap();
        let prompt = FakePrompt::default();
        let mut session = Session::new(config, &prompt);

        assert_eq!(session.credentials().unwrap().username, "typed-user");
        assert_eq!(prompt.username_calls.get(), 1);
    }

    #[test]
    fn credentials_are_prompted_once() {
        let dir = Utf8TempDir::new().unwrap();
        let config = dir.path().join(".saml2aws");
        fs_err::write(&config, "username=testuser\n").unwrap();
        let prompt = FakePrompt::default();
        let mut session = Session::new(config, &prompt);

        session.credentials().unwrap();
        session.credentials().unwrap();

        assert_eq!(prompt.password_calls.get(), 1);
    }

    #[test]
    fn missing_config_is_reported() {
        let dir = Utf8TempDir::new().unwrap();
        let config = dir.path().join(".saml2aws");
        let prompt = FakePrompt::default();
        let mut session = Session::new(config.clone(), &prompt);

        let err = session.credentials().err().unwrap();

        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::MissingSaml2AwsConfig(config))
        );
        assert_eq!(prompt.password_calls.get(), 0);
    }
}
