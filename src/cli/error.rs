// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all aips-driver-related errors. This should be the *only*
//! error enum that is publicly visible from the CLI.

use thiserror::Error;

use super::{clear::ClearArgsError, rmsd::RmsdArgsError, run::RunArgsError};
use crate::session::SessionError;

const AIPS_COOKBOOK: &str = "http://www.aips.nrao.edu/cook.html";

/// The *only* publicly visible error from the aips-driver CLI.
#[derive(Error, Debug)]
pub enum AipsDriverError {
    /// An error related to running AIPS.
    #[error("{0}\n\nIf AIPS itself is the problem, the AIPS CookBook may help: {AIPS_COOKBOOK}")]
    Session(String),

    /// An error related to the AIPS commands that were asked for.
    #[error("{0}")]
    Script(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files use the same names as the long CLI arguments, with the AIPS session arguments under 'session'.")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<SessionError> for AipsDriverError {
    fn from(e: SessionError) -> Self {
        let s = e.to_string();
        match e {
            SessionError::Spawn { .. }
            | SessionError::NoStdin(_)
            | SessionError::Stdin(_)
            | SessionError::StdinWriterPanicked
            | SessionError::Wait(_) => Self::Session(s),
        }
    }
}

impl From<RunArgsError> for AipsDriverError {
    fn from(e: RunArgsError) -> Self {
        let s = e.to_string();
        match e {
            RunArgsError::NoCommands => Self::Script(s),
            RunArgsError::ReadScript { .. } => Self::Generic(s),
        }
    }
}

impl From<RmsdArgsError> for AipsDriverError {
    fn from(e: RmsdArgsError) -> Self {
        Self::Script(e.to_string())
    }
}

impl From<ClearArgsError> for AipsDriverError {
    fn from(e: ClearArgsError) -> Self {
        Self::Script(e.to_string())
    }
}

impl From<std::io::Error> for AipsDriverError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<log::SetLoggerError> for AipsDriverError {
    fn from(e: log::SetLoggerError) -> Self {
        Self::Generic(format!("Failed to initialise logging: {e}"))
    }
}
