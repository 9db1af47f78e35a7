// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::common::{
    check_output, display_session_config, display_warnings, SessionArgs, ARG_FILE_HELP,
};
use crate::{
    session::{Session, PCA_COMMANDS},
    AipsDriverError,
};

/// List the AIPS catalogue entries that are open.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PcaArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "session")]
    #[serde(default)]
    pub(super) session_args: SessionArgs,
}

impl PcaArgs {
    pub(super) fn merge(self) -> Result<PcaArgs, AipsDriverError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let PcaArgs {
                args_file: _,
                session_args,
            } = unpack_arg_file!(arg_file);

            Ok(PcaArgs {
                args_file: None,
                session_args: cli_args.session_args.merge(session_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), AipsDriverError> {
        debug!("{:#?}", self);
        let config = self.session_args.parse();
        display_warnings();
        display_session_config(&config);

        let session = Session::new(config);
        if dry_run {
            let mut preview = session;
            preview.append(PCA_COMMANDS);
            println!("{}", preview.script());
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let output = session.list_open_resources()?;
        check_output(output)
    }
}
