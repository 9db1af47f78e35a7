// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with running AIPS sessions.
//!
//! Problems inside AIPS itself (bad syntax, missing files, etc.) are *not*
//! errors here; they only show up in the captured output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Couldn't start the shell '{shell}': {err}")]
    Spawn { shell: String, err: std::io::Error },

    #[error("The shell '{0}' didn't provide a stdin pipe")]
    NoStdin(String),

    #[error("Couldn't write the AIPS script to the shell: {0}")]
    Stdin(std::io::Error),

    #[error("The thread writing the AIPS script to the shell panicked")]
    StdinWriterPanicked,

    #[error("Couldn't collect the output of the shell: {0}")]
    Wait(std::io::Error),
}
