// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
//!
//! AIPS is never actually run here. Instead, the initialisation command
//! defines a shell function called "aips" that echoes its input, so the
//! captured output is exactly what AIPS would have been fed.

mod clear_pca;
mod no_stderr;
mod rmsd;
mod run;

use std::{path::Path, process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};

fn aips_driver() -> Command {
    Command::cargo_bin("aips-driver").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Session arguments that swap AIPS for an echoing stub. The log file is put
/// in `tmp_dir`.
fn stub_session_args(tmp_dir: &Path) -> Vec<String> {
    vec![
        "--init-command".to_string(),
        "aips() { cat; }".to_string(),
        "--shell".to_string(),
        "sh".to_string(),
        "--log-file".to_string(),
        tmp_dir.join("aips.log").display().to_string(),
    ]
}
