// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Free up an AIPS catalogue entry that a crashed or interrupted task left
//! marked as busy.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{
    check_output, display_session_config, display_warnings, SessionArgs, ARG_FILE_HELP,
};
use crate::{
    session::{clear_commands, Session},
    AipsDriverError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ClearArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "session")]
    #[serde(default)]
    pub(super) session_args: SessionArgs,

    /// The AIPS catalogue number to clear and delete.
    #[clap(short = 'n', long)]
    pub(super) getn: Option<u32>,
}

impl ClearArgs {
    pub(super) fn merge(self) -> Result<ClearArgs, AipsDriverError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ClearArgs {
                args_file: _,
                session_args,
                getn,
            } = unpack_arg_file!(arg_file);

            Ok(ClearArgs {
                args_file: None,
                session_args: cli_args.session_args.merge(session_args),
                getn: cli_args.getn.or(getn),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), AipsDriverError> {
        debug!("{:#?}", self);
        let getn = self.getn.ok_or(ClearArgsError::NoGetn)?;
        let config = self.session_args.parse();
        display_warnings();
        display_session_config(&config);
        info!("Clearing AIPS catalogue entry {getn}");

        let session = Session::new(config);
        if dry_run {
            let mut preview = session;
            preview.append(clear_commands(getn));
            println!("{}", preview.script());
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let output = session.clear(getn)?;
        check_output(output)
    }
}

#[derive(Error, Debug)]
pub(super) enum ClearArgsError {
    #[error("No AIPS catalogue number was given; use --getn")]
    NoGetn,
}
