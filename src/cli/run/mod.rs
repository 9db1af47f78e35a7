// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Run arbitrary AIPS commands.


use std::{
    io::Read,
    path::{Path, PathBuf},
};

use clap::Parser;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{
    display_session_config, display_warnings, run_or_print, SessionArgs, ARG_FILE_HELP,
};
use crate::{session::Session, AipsDriverError};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct RunArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "session")]
    #[serde(default)]
    pub(super) session_args: SessionArgs,

    /// A file of AIPS commands, one per line. Use "-" to read from stdin.
    /// These commands run before any given with --commands.
    #[clap(short, long, parse(from_os_str), help_heading = "COMMANDS")]
    pub(super) script: Option<PathBuf>,

    /// AIPS commands to run, in order, e.g. -c "TASK 'IMLOD'" DEFAULT "GO; WAIT"
    #[clap(short, long, multiple_values(true), help_heading = "COMMANDS")]
    pub(super) commands: Option<Vec<String>>,
}

impl RunArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<RunArgs, AipsDriverError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let RunArgs {
                args_file: _,
                session_args,
                script,
                commands,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(RunArgs {
                args_file: None,
                session_args: cli_args.session_args.merge(session_args),
                script: cli_args.script.or(script),
                commands: cli_args.commands.or(commands),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<Session, AipsDriverError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            session_args,
            script,
            commands,
        } = self;

        let mut all_commands = vec![];
        if let Some(script) = script {
            all_commands.extend(read_script(&script)?);
        }
        if let Some(commands) = commands {
            all_commands.extend(commands);
        }
        if all_commands.is_empty() {
            return Err(RunArgsError::NoCommands.into());
        }

        let config = session_args.parse();
        display_warnings();
        display_session_config(&config);

        let mut session = Session::new(config);
        session.append(all_commands);
        Ok(session)
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), AipsDriverError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let session = self.parse()?;
        run_or_print(session, dry_run)
    }
}

/// Read AIPS commands from a file, one per line. "-" means stdin.
fn read_script(file: &Path) -> Result<Vec<String>, RunArgsError> {
    let read_err = |err| RunArgsError::ReadScript {
        file: file.display().to_string(),
        err,
    };

    let contents = if file == Path::new("-") {
        debug!("Reading AIPS commands from stdin");
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .map_err(read_err)?;
        contents
    } else {
        debug!("Reading AIPS commands from {}", file.display());
        std::fs::read_to_string(file).map_err(read_err)?
    };
    Ok(contents.lines().map(|l| l.to_string()).collect())
}

#[derive(Error, Debug)]
pub(super) enum RunArgsError {
    #[error("No AIPS commands were given; use --commands and/or --script")]
    NoCommands,

    #[error("Couldn't read AIPS commands from '{file}': {err}")]
    ReadScript { file: String, err: std::io::Error },
}
