// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to feed scripts to AIPS through a shell.
//!
//! AIPS is run in "no TV" mode inside a here-document, so a whole script looks
//! like:
//!
//! ```text
//! source $AIPS_ROOT/LOGIN.SH
//! aips notv << EOF | tee aips.log;
//!
//! 1120
//! TASK 'IMLOD'
//! ...
//! CLRMSG
//! KLEENEX
//! EOF
//! ```
//!
//! The first line sets up the AIPS environment, the second starts AIPS and
//! duplicates its output into a log file, and the user number logs in.

mod error;

pub use error::SessionError;

use std::{
    io::{ErrorKind, Write},
    path::PathBuf,
    process::{Command, ExitStatus, Stdio},
};

use log::{debug, trace};

use crate::constants::{
    DEFAULT_END_COMMANDS, DEFAULT_LOG_FILE, DEFAULT_PROGRAM, DEFAULT_SHELL, DEFAULT_USER_ID,
    FALLBACK_INIT_COMMAND, HEREDOC_DELIMITER, INIT_COMMAND_ENV_VAR,
};

/// The AIPS commands that list the open catalogue entries.
pub const PCA_COMMANDS: [&str; 1] = ["pca"];

/// The AIPS commands that clear the busy status of catalogue entry `getn` and
/// then delete it.
pub fn clear_commands(getn: u32) -> Vec<String> {
    vec![format!("GETN {getn}"), "CLRSTAT".to_string(), "ZAP".to_string()]
}

/// Anything that can be handed to a [`Session`] as AIPS commands. A single
/// string is a single command.
pub trait IntoCommands {
    fn into_commands(self) -> Vec<String>;
}

impl IntoCommands for &str {
    fn into_commands(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoCommands for String {
    fn into_commands(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoCommands for Vec<String> {
    fn into_commands(self) -> Vec<String> {
        self
    }
}

impl IntoCommands for Vec<&str> {
    fn into_commands(self) -> Vec<String> {
        self.into_iter().map(|s| s.to_string()).collect()
    }
}

impl IntoCommands for &[String] {
    fn into_commands(self) -> Vec<String> {
        self.to_vec()
    }
}

impl IntoCommands for &[&str] {
    fn into_commands(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> IntoCommands for &[&str; N] {
    fn into_commands(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> IntoCommands for [&str; N] {
    fn into_commands(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> IntoCommands for [String; N] {
    fn into_commands(self) -> Vec<String> {
        self.into()
    }
}

/// How to start AIPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// The AIPS user number.
    pub user_id: u32,

    /// AIPS output is duplicated into this file.
    pub log_file: PathBuf,

    /// A shell command that sets up the AIPS environment, e.g.
    /// `source /path/to/aips/LOGIN.SH`.
    pub init_command: String,

    /// Commands written at the very end of every script. These must close the
    /// here-document that AIPS reads from.
    pub end: Vec<String>,

    /// The AIPS executable.
    pub program: String,

    /// The shell that the script is piped into.
    pub shell: PathBuf,
}

impl Default for SessionConfig {
    /// The initialisation command is taken from the `AIPS_INIT_COMMAND`
    /// environment variable. If that isn't set, `source $AIPS_ROOT/LOGIN.SH` is
    /// used.
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            init_command: init_command_from_env()
                .unwrap_or_else(|| FALLBACK_INIT_COMMAND.to_string()),
            end: DEFAULT_END_COMMANDS.into_commands(),
            program: DEFAULT_PROGRAM.to_string(),
            shell: PathBuf::from(DEFAULT_SHELL),
        }
    }
}

impl SessionConfig {
    /// Replace the commands written at the end of every script.
    pub fn with_end<C: IntoCommands>(mut self, end: C) -> Self {
        self.end = end.into_commands();
        self
    }

    /// The line that starts AIPS, followed by a blank line and the user number.
    pub fn header(&self) -> String {
        format!(
            "{} notv << {HEREDOC_DELIMITER} | tee {};\n\n{}",
            self.program,
            self.log_file.display(),
            self.user_id
        )
    }
}

/// Get the AIPS environment setup command from `AIPS_INIT_COMMAND`, if it's
/// set and not empty.
pub fn init_command_from_env() -> Option<String> {
    std::env::var(INIT_COMMAND_ENV_VAR)
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// Everything captured from a finished session.
#[derive(Debug, Clone)]
pub struct SessionOutput {
    /// Raw bytes the shell wrote to stdout.
    pub stdout: Vec<u8>,

    /// Raw bytes the shell wrote to stderr.
    pub stderr: Vec<u8>,

    /// stdout decoded as UTF-8. Invalid sequences are replaced with U+FFFD.
    pub text: String,

    /// How the shell exited. Note that AIPS itself rarely reports problems
    /// this way; check `text` too.
    pub status: ExitStatus,
}

impl SessionOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// An AIPS session. Commands are accumulated with [`Session::append`] and
/// executed once with [`Session::run`], which consumes the session.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,

    /// The initialisation command, the header and every appended command.
    invoked: Vec<String>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Session {
        Session {
            config,
            invoked: vec![],
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// All commands accumulated so far, not including the end commands.
    pub fn commands(&self) -> &[String] {
        &self.invoked
    }

    /// Add commands to the script. The first call also writes the
    /// initialisation command and the header.
    pub fn append<C: IntoCommands>(&mut self, commands: C) {
        if self.invoked.is_empty() {
            self.invoked.push(self.config.init_command.clone());
            self.invoked.push(self.config.header());
        }
        self.invoked.extend(commands.into_commands());
    }

    /// The commands that [`Session::run`] hands to the shell, i.e. everything
    /// appended followed by the end commands.
    pub fn finalised_commands(&self) -> Vec<String> {
        self.invoked
            .iter()
            .chain(self.config.end.iter())
            .cloned()
            .collect()
    }

    /// The full script text.
    pub fn script(&self) -> String {
        self.finalised_commands().join("\n")
    }

    /// Pipe the script into a new shell and wait for it to finish. This blocks
    /// for as long as AIPS runs; there is no timeout.
    pub fn run(self) -> Result<SessionOutput, SessionError> {
        let mut script = self.script();
        // Shells want the here-document delimiter on a terminated line.
        script.push('\n');
        let shell = self.config.shell.display().to_string();
        debug!(
            "Running {} AIPS commands with {shell}",
            self.invoked.len() + self.config.end.len()
        );
        trace!("AIPS script:\n{script}");

        let mut child = Command::new(&self.config.shell)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| SessionError::Spawn {
                shell: shell.clone(),
                err,
            })?;
        let mut stdin = child.stdin.take().ok_or(SessionError::NoStdin(shell))?;

        // Write from another thread; AIPS can fill the stdout pipe before it
        // has read the whole script.
        let writer = std::thread::spawn(move || stdin.write_all(script.as_bytes()));
        let output = child.wait_with_output().map_err(SessionError::Wait)?;
        match writer.join() {
            Ok(Ok(())) => (),
            // The shell quit before reading everything. Whatever it printed
            // about that is in the output.
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("The shell closed stdin before the whole script was written")
            }
            Ok(Err(e)) => return Err(SessionError::Stdin(e)),
            Err(_) => return Err(SessionError::StdinWriterPanicked),
        }

        debug!("Shell exited with {}", output.status);
        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        Ok(SessionOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            text,
            status: output.status,
        })
    }

    /// Clear the busy status of catalogue entry `getn`, delete it, and print
    /// AIPS's output. A fresh session with this session's config is used, so
    /// commands pending here are neither run nor disturbed.
    pub fn clear(&self, getn: u32) -> Result<SessionOutput, SessionError> {
        let mut session = Session::new(self.config.clone());
        session.append(clear_commands(getn));
        let output = session.run()?;
        print!("{}", output.text);
        Ok(output)
    }

    /// List the open catalogue entries (AIPS's `pca`) and print AIPS's output.
    /// Like [`Session::clear`], this runs in a fresh session.
    pub fn list_open_resources(&self) -> Result<SessionOutput, SessionError> {
        let mut session = Session::new(self.config.clone());
        session.append(PCA_COMMANDS);
        let output = session.run()?;
        print!("{}", output.text);
        Ok(output)
    }
}
