// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

Most of these are defaults for an AIPS session; all of them can be overridden
by a [`crate::SessionConfig`].
 */

/// The AIPS user number used when none is given.
pub const DEFAULT_USER_ID: u32 = 1120;

/// The file that AIPS session transcripts are `tee`d into.
pub const DEFAULT_LOG_FILE: &str = "aips.log";

/// The AIPS executable named in the boilerplate header.
pub const DEFAULT_PROGRAM: &str = "aips";

/// The shell that scripts are piped into.
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// If this environment variable is set, its value is used as the command that
/// sets up the AIPS environment.
pub const INIT_COMMAND_ENV_VAR: &str = "AIPS_INIT_COMMAND";

/// The AIPS environment setup command used when [`INIT_COMMAND_ENV_VAR`] isn't
/// set. `$AIPS_ROOT` is expanded by the shell, not by us.
pub const FALLBACK_INIT_COMMAND: &str = "source $AIPS_ROOT/LOGIN.SH";

/// Commands written after everything else: clear the message file, release
/// AIPS resources, then close the here-document that AIPS is reading.
pub const DEFAULT_END_COMMANDS: [&str; 3] = ["CLRMSG", "KLEENEX", "EOF"];

/// The here-document delimiter used in the boilerplate header.
pub const HEREDOC_DELIMITER: &str = "EOF";

/// The AIPS catalogue number that generated scripts start from by default.
pub const DEFAULT_GETN: u32 = 1;

/// Paired with a lone radius to make an AIPS `IMSIZE`.
pub const IMSIZE_SENTINEL: i32 = -1;
