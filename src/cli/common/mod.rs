// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code shared between `aips-driver` subcommands.

mod printers;

pub(crate) use printers::{display_warnings, InfoPrinter, Warn};

use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::AipsDriverError;
use crate::{
    constants::{
        DEFAULT_END_COMMANDS, DEFAULT_LOG_FILE, DEFAULT_PROGRAM, DEFAULT_SHELL, DEFAULT_USER_ID,
        FALLBACK_INIT_COMMAND, HEREDOC_DELIMITER, INIT_COMMAND_ENV_VAR,
    },
    session::{init_command_from_env, IntoCommands, Session, SessionConfig, SessionOutput},
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref USER_ID_HELP: String =
        format!("The AIPS user number. Default: {DEFAULT_USER_ID}");

    static ref LOG_FILE_HELP: String =
        format!("The file that AIPS output is duplicated into. Default: {DEFAULT_LOG_FILE}");

    static ref INIT_COMMAND_HELP: String =
        format!("The shell command that sets up the AIPS environment, e.g. 'source /path/to/aips/LOGIN.SH'. Default: the value of {INIT_COMMAND_ENV_VAR}, or if that isn't set, '{FALLBACK_INIT_COMMAND}'");

    static ref PROGRAM_HELP: String =
        format!("The AIPS executable. Default: {DEFAULT_PROGRAM}");

    static ref SHELL_HELP: String =
        format!("The shell that AIPS scripts are piped into. Default: {DEFAULT_SHELL}");

    static ref END_HELP: String =
        format!("The commands written at the end of every AIPS script. One of these must be '{HEREDOC_DELIMITER}'. Default: {}", DEFAULT_END_COMMANDS.join(" "));
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

/// Read in an argument file and deserialise it into whatever type is expected
/// at the call site. The file type is determined by its extension.
macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::{
            common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED},
            AipsDriverError,
        };

        log::debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                log::debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(AipsDriverError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                log::debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(AipsDriverError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(AipsDriverError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Arguments describing how to start AIPS. Every subcommand takes these.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct SessionArgs {
    #[clap(short, long, help = USER_ID_HELP.as_str(), help_heading = "AIPS SESSION")]
    pub(super) user_id: Option<u32>,

    #[clap(long, parse(from_os_str), help = LOG_FILE_HELP.as_str(), help_heading = "AIPS SESSION")]
    pub(super) log_file: Option<PathBuf>,

    #[clap(long, help = INIT_COMMAND_HELP.as_str(), help_heading = "AIPS SESSION")]
    pub(super) init_command: Option<String>,

    #[clap(long, help = PROGRAM_HELP.as_str(), help_heading = "AIPS SESSION")]
    pub(super) program: Option<String>,

    #[clap(long, parse(from_os_str), help = SHELL_HELP.as_str(), help_heading = "AIPS SESSION")]
    pub(super) shell: Option<PathBuf>,

    #[clap(long, multiple_values(true), help = END_HELP.as_str(), help_heading = "AIPS SESSION")]
    pub(super) end: Option<Vec<String>>,
}

impl SessionArgs {
    /// Merge two sets of session arguments, preferring those in `self`.
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            user_id: self.user_id.or(other.user_id),
            log_file: self.log_file.or(other.log_file),
            init_command: self.init_command.or(other.init_command),
            program: self.program.or(other.program),
            shell: self.shell.or(other.shell),
            end: self.end.or(other.end),
        }
    }

    /// Fill in defaults. Anything worth knowing about is queued as a warning.
    pub(super) fn parse(self) -> SessionConfig {
        let Self {
            user_id,
            log_file,
            init_command,
            program,
            shell,
            end,
        } = self;

        let init_command = match init_command.or_else(init_command_from_env) {
            Some(c) => c,
            None => {
                format!("No AIPS initialisation command was given and {INIT_COMMAND_ENV_VAR} isn't set; using '{FALLBACK_INIT_COMMAND}'").warn();
                FALLBACK_INIT_COMMAND.to_string()
            }
        };

        let end = end.unwrap_or_else(|| DEFAULT_END_COMMANDS.into_commands());
        if !end.iter().any(|c| c.trim() == HEREDOC_DELIMITER) {
            format!("None of the end commands are '{HEREDOC_DELIMITER}'; AIPS may wait forever for more input").warn();
        }

        SessionConfig {
            user_id: user_id.unwrap_or(DEFAULT_USER_ID),
            log_file: log_file.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            init_command,
            end,
            program: program.unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
            shell: shell.unwrap_or_else(|| PathBuf::from(DEFAULT_SHELL)),
        }
    }
}

pub(super) fn display_session_config(config: &SessionConfig) {
    let mut printer = InfoPrinter::new("AIPS session".into());
    printer.push_block(vec![
        format!("User number: {}", config.user_id).into(),
        format!("Log file:    {}", config.log_file.display()).into(),
    ]);
    printer.push_line(format!("Setup: {}", config.init_command).into());
    printer.push_line(
        format!(
            "Running '{}' with {}",
            config.program,
            config.shell.display()
        )
        .into(),
    );
    printer.display();
}

/// Either print the script that would run, or run it and print AIPS's output.
pub(super) fn run_or_print(session: Session, dry_run: bool) -> Result<(), AipsDriverError> {
    if dry_run {
        println!("{}", session.script());
        info!("Dry run -- exiting now.");
        return Ok(());
    }

    let output = session.run()?;
    print!("{}", output.text);
    check_output(output)
}

/// Pass on the shell's stderr, and turn an unsuccessful exit into an error.
pub(super) fn check_output(output: SessionOutput) -> Result<(), AipsDriverError> {
    if !output.stderr.is_empty() {
        eprint!("{}", String::from_utf8_lossy(&output.stderr));
    }
    if output.success() {
        Ok(())
    } else {
        Err(AipsDriverError::Session(format!(
            "The AIPS shell exited unsuccessfully ({})",
            output.status
        )))
    }
}
