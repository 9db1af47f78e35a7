// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indoc::indoc;
use tempfile::TempDir;

use crate::{aips_driver, get_cmd_output, stub_session_args};

#[test]
fn test_rmsd_runs_workflow() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    #[rustfmt::skip]
    let cmd = aips_driver()
        .arg("rmsd")
        .args(stub_session_args(tmp_dir.path()))
        .args([
            "--basename", "k:GMRT610/test.mosaic.1",
            "--imsize", "100",
            "--xinc", "4",
        ])
        .ok();
    assert!(cmd.is_ok(), "rmsd failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    let expected = indoc! {"
        TASK 'IMLOD'
        DEFAULT
        DATAIN='k:GMRT610/test.mosaic.1.fits
        GO; WAIT
        TASK 'RMSD'
        DEFAULT
        GETN 1
        IMSIZE=100, -1
        XINC=4
        YINC=4
        GO; WAIT
        TASK 'FITTP'
        DEFAULT
        GETN 2
        DATAOUT='k:GMRT610/test.mosaic.1.rmsd.fits
        GO; WAIT
        FOR i=1 TO 2; GETN i; ZAP; END;
        CLRMSG
        CLRTEMP
        CLRMSG
        KLEENEX
    "};
    assert!(stdout.contains(expected), "{stdout}");
}

#[test]
fn test_rmsd_dry_run_with_explicit_imsize() {
    #[rustfmt::skip]
    let cmd = aips_driver()
        .args([
            "rmsd",
            "--dry-run",
            "--init-command", "true",
            "--basename", "image",
            "--imsize", "30,40",
            "--xinc", "2",
            "--yinc", "3",
            "--getn", "6",
        ])
        .ok();
    assert!(cmd.is_ok(), "rmsd failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("\nIMSIZE=30, 40\nXINC=2\nYINC=3\n"), "{stdout}");
    assert!(stdout.contains("\nFOR i=6 TO 7; GETN i; ZAP; END;\n"), "{stdout}");
    assert!(stdout.contains("\nCLRTEMP\nCLRMSG\nKLEENEX\nEOF\n"), "{stdout}");
}

#[test]
fn test_rmsd_needs_arguments() {
    let cmd = aips_driver()
        .args(["rmsd", "--init-command", "true", "--basename", "image"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("IMSIZE"), "{stderr}");
}
