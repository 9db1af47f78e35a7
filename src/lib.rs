// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Drive AIPS (the Astronomical Image Processing System) from Rust.

AIPS is fed scripts through a shell session; see [`Session`]. Canned AIPS
workflows, such as the RMSD noise-map workflow, live in [`scripts`].
 */

mod cli;
pub mod constants;
pub mod scripts;
pub mod session;

// Re-exports.
pub use cli::{AipsDriver, AipsDriverError};
pub use scripts::{rmsd, ImageSize};
pub use session::{IntoCommands, Session, SessionConfig, SessionError, SessionOutput};
