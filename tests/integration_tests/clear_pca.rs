// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{aips_driver, get_cmd_output, stub_session_args};

#[test]
fn test_clear() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let cmd = aips_driver()
        .args(["clear", "--getn", "4"])
        .args(stub_session_args(tmp_dir.path()))
        .ok();
    assert!(cmd.is_ok(), "clear failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(
        stdout.contains("\n1120\nGETN 4\nCLRSTAT\nZAP\nCLRMSG\nKLEENEX\n"),
        "{stdout}"
    );
}

#[test]
fn test_clear_needs_getn() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let cmd = aips_driver()
        .arg("clear")
        .args(stub_session_args(tmp_dir.path()))
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("--getn"), "{stderr}");
}

#[test]
fn test_clear_dry_run() {
    let cmd = aips_driver()
        .args(["clear", "--dry-run", "-n", "2", "--init-command", "true"])
        .ok();
    assert!(cmd.is_ok(), "clear failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(
        stdout.contains("\n\n1120\nGETN 2\nCLRSTAT\nZAP\nCLRMSG\nKLEENEX\nEOF\n"),
        "{stdout}"
    );
}

#[test]
fn test_pca() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let cmd = aips_driver()
        .arg("pca")
        .args(stub_session_args(tmp_dir.path()))
        .args(["--user-id", "31"])
        .ok();
    assert!(cmd.is_ok(), "pca failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("\n31\npca\nCLRMSG\nKLEENEX\n"), "{stdout}");
}
