use std::{
    fmt,
    io::{BufRead as _, BufReader},
    process::{Child, Command, ExitStatus, Stdio},
};

use anyhow::Context as _;
use secrecy::{ExposeSecret as _, SecretString};
use tracing::debug;

#[derive(Debug)]
pub struct CmdOutput {
    status: ExitStatus,
    stdout: String,
}

impl CmdOutput {
    pub fn status(&self) -> &ExitStatus {
        &self.status
    }

    /// Exit code of the process, `-1` if it was killed by a signal.
    pub fn exit_code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }
}

enum Arg {
    Plain(String),
    /// Rendered as `{flag}{value}` when running, `{flag}***` when displayed.
    Secret { flag: String, value: SecretString },
}

pub struct Cmd {
    name: String,
    args: Vec<Arg>,
}

impl Cmd {
    pub fn new<I, S>(cmd_name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<Arg> = args
            .into_iter()
            .map(|arg| Arg::Plain(arg.as_ref().to_string()))
            .collect();
        Self {
            name: cmd_name.to_string(),
            args,
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(Arg::Plain(arg.into()));
        self
    }

    pub fn secret_arg(&mut self, flag: impl Into<String>, value: &SecretString) -> &mut Self {
        self.args.push(Arg::Secret {
            flag: flag.into(),
            value: SecretString::new(value.expose_secret().to_string()),
        });
        self
    }

    fn raw_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| match arg {
                Arg::Plain(arg) => arg.clone(),
                Arg::Secret { flag, value } => format!("{flag}{}", value.expose_secret()),
            })
            .collect()
    }

    /// Run the command, logging every stdout line at debug level.
    /// Stderr is inherited, so the tool's diagnostics reach the terminal.
    pub fn run(&self) -> anyhow::Result<CmdOutput> {
        debug!("🚀 {self}");
        let mut child = Command::new(&self.name)
            .args(self.raw_args())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to run `{}`", self.name))?;

        let stdout = read_stdout(&mut child);
        if stdout.is_err() {
            // Don't leave the child running after we stop reading its output.
            let _ = child.kill();
        }
        let status = child.wait()?;
        let stdout = stdout.with_context(|| format!("failed to read `{}` output", self.name))?;

        Ok(CmdOutput { status, stdout })
    }
}

fn read_stdout(child: &mut Child) -> std::io::Result<String> {
    let mut stdout = String::new();
    if let Some(child_stdout) = child.stdout.take() {
        for line in BufReader::new(child_stdout).lines() {
            let line = line?;
            debug!("{line}");
            stdout.push_str(&line);
            stdout.push('\n');
        }
    }
    Ok(stdout)
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            match arg {
                Arg::Plain(arg) => write!(f, " {arg}")?,
                Arg::Secret { flag, .. } => write!(f, " {flag}***")?,
            }
        }
        Ok(())
    }
}
