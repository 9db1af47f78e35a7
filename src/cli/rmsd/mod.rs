// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{
    display_session_config, display_warnings, run_or_print, InfoPrinter, SessionArgs,
    ARG_FILE_HELP,
};
use crate::{
    constants::DEFAULT_GETN,
    scripts::{rmsd, ImageSize},
    session::Session,
    AipsDriverError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct RmsdArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "session")]
    #[serde(default)]
    pub(super) session_args: SessionArgs,

    /// The FITS images to make noise maps of, without their ".fits"
    /// extension. AIPS paths like "k:dir/image" are fine. All images are
    /// processed in the same AIPS session.
    #[clap(short, long = "basename", multiple_values(true), help_heading = "RMSD")]
    pub(super) basenames: Option<Vec<String>>,

    /// The RMSD IMSIZE [pixels]. A single value is the radius of a circle;
    /// two comma-separated values (e.g. 100,-1) are used as given.
    #[clap(long, use_value_delimiter(true), help_heading = "RMSD")]
    pub(super) imsize: Option<Vec<i32>>,

    /// The RMSD XINC; the noise map is computed every XINC pixels along x.
    #[clap(long, help_heading = "RMSD")]
    pub(super) xinc: Option<i32>,

    /// The RMSD YINC. Default: the same as XINC
    #[clap(long, help_heading = "RMSD")]
    pub(super) yinc: Option<i32>,

    /// The AIPS catalogue number each image is loaded into. Its noise map uses
    /// the next number. Both entries are deleted afterwards, so they must not
    /// hold anything you want to keep. Default: 1
    #[clap(short = 'n', long, help_heading = "RMSD")]
    pub(super) getn: Option<u32>,
}

impl RmsdArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<RmsdArgs, AipsDriverError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let RmsdArgs {
                args_file: _,
                session_args,
                basenames,
                imsize,
                xinc,
                yinc,
                getn,
            } = unpack_arg_file!(arg_file);

            Ok(RmsdArgs {
                args_file: None,
                session_args: cli_args.session_args.merge(session_args),
                basenames: cli_args.basenames.or(basenames),
                imsize: cli_args.imsize.or(imsize),
                xinc: cli_args.xinc.or(xinc),
                yinc: cli_args.yinc.or(yinc),
                getn: cli_args.getn.or(getn),
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
            basenames,
            imsize,
            xinc,
            yinc,
            getn,
        } = self;

        let basenames = match basenames {
            Some(b) if !b.is_empty() => b,
            _ => return Err(RmsdArgsError::NoBasenames.into()),
        };
        let imsize = match imsize.as_deref() {
            Some([r]) => ImageSize::Radius(*r),
            Some([a, b]) => ImageSize::Explicit(*a, *b),
            Some(other) => return Err(RmsdArgsError::BadImsize(other.len()).into()),
            None => return Err(RmsdArgsError::NoImsize.into()),
        };
        let xinc = xinc.ok_or(RmsdArgsError::NoXinc)?;

        let config = session_args.parse();
        display_warnings();
        display_session_config(&config);

        let (imsize_a, imsize_b) = imsize.pair();
        let mut printer = InfoPrinter::new("RMSD noise maps".into());
        printer.push_block(vec![
            format!("IMSIZE: {imsize_a}, {imsize_b}").into(),
            format!("XINC: {xinc}, YINC: {}", yinc.unwrap_or(xinc)).into(),
            format!("Catalogue numbers: {}", getn.unwrap_or(DEFAULT_GETN)).into(),
        ]);
        printer.push_block(
            basenames
                .iter()
                .map(|b| format!("{b}.fits -> {b}.rmsd.fits").into())
                .collect(),
        );
        printer.display();

        let mut session = Session::new(config);
        for basename in &basenames {
            session.append(rmsd(basename, imsize, xinc, yinc, getn));
        }
        Ok(session)
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), AipsDriverError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let session = self.parse()?;
        run_or_print(session, dry_run)
    }
}

#[derive(Error, Debug)]
pub(super) enum RmsdArgsError {
    #[error("No images were given; use --basename")]
    NoBasenames,

    #[error("No IMSIZE was given; use --imsize")]
    NoImsize,

    #[error("IMSIZE must be a single radius or two values, but got {0} values")]
    BadImsize(usize),

    #[error("No XINC was given; use --xinc")]
    NoXinc,
}
