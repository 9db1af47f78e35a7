// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{aips_driver, get_cmd_output, stub_session_args};

#[test]
fn test_run_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let cmd = aips_driver()
        .arg("run")
        .args(stub_session_args(tmp_dir.path()))
        .args(["--commands", "TASK 'IMLOD'", "DEFAULT", "GO; WAIT"])
        .ok();
    assert!(cmd.is_ok(), "run failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_rmsd_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    #[rustfmt::skip]
    let cmd = aips_driver()
        .arg("rmsd")
        .args(stub_session_args(tmp_dir.path()))
        .args([
            "--basename", "image",
            "--imsize", "100",
            "--xinc", "4",
        ])
        .ok();
    assert!(cmd.is_ok(), "rmsd failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_pca_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let cmd = aips_driver()
        .arg("pca")
        .args(stub_session_args(tmp_dir.path()))
        .ok();
    assert!(cmd.is_ok(), "pca failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
