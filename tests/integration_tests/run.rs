// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indoc::indoc;
use tempfile::TempDir;

use crate::{aips_driver, get_cmd_output, stub_session_args};

#[test]
fn test_run_echoes_commands() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let cmd = aips_driver()
        .arg("run")
        .args(stub_session_args(tmp_dir.path()))
        .args(["--commands", "TASK 'IMLOD'", "DEFAULT", "GO; WAIT"])
        .ok();
    assert!(cmd.is_ok(), "run failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(
        stdout.contains("\n1120\nTASK 'IMLOD'\nDEFAULT\nGO; WAIT\nCLRMSG\nKLEENEX\n"),
        "{stdout}"
    );

    let log = std::fs::read_to_string(tmp_dir.path().join("aips.log")).unwrap();
    assert_eq!(log, "\n1120\nTASK 'IMLOD'\nDEFAULT\nGO; WAIT\nCLRMSG\nKLEENEX\n");
}

#[test]
fn test_run_script_from_stdin() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let cmd = aips_driver()
        .args(["run", "--script", "-"])
        .args(stub_session_args(tmp_dir.path()))
        .write_stdin(indoc! {"
            TASK 'IMLOD'
            GO; WAIT
        "})
        .ok();
    assert!(cmd.is_ok(), "run failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("TASK 'IMLOD'\nGO; WAIT\nCLRMSG"), "{stdout}");
}

#[test]
fn test_dry_run_prints_script() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let log = tmp_dir.path().join("aips.log");
    #[rustfmt::skip]
    let cmd = aips_driver()
        .args([
            "--dry-run",
            "run",
            "--init-command", "source /opt/aips/LOGIN.SH",
            "--log-file", &log.display().to_string(),
            "--user-id", "42",
            "--commands", "pca",
        ])
        .ok();
    assert!(cmd.is_ok(), "run failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    let expected = format!(
        "source /opt/aips/LOGIN.SH\naips notv << EOF | tee {};\n\n42\npca\nCLRMSG\nKLEENEX\nEOF\n",
        log.display()
    );
    assert!(stdout.contains(&expected), "{stdout}");
    assert!(!log.exists());
}

#[test]
fn test_save_toml_then_reuse() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let toml = tmp_dir.path().join("saved.toml");
    let toml_str = toml.display().to_string();
    #[rustfmt::skip]
    let cmd = aips_driver()
        .args([
            "run",
            "--dry-run",
            "--save-toml", &toml_str,
            "--init-command", "source /opt/aips/LOGIN.SH",
            "--user-id", "77",
            "--commands", "pca",
        ])
        .ok();
    assert!(cmd.is_ok(), "run failed: {}", cmd.err().unwrap());
    assert!(toml.exists());

    let cmd = aips_driver().args(["run", "--dry-run", &toml_str]).ok();
    assert!(cmd.is_ok(), "run failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("\n\n77\npca\nCLRMSG"), "{stdout}");
    assert!(stdout.contains("source /opt/aips/LOGIN.SH\n"), "{stdout}");
}

#[test]
fn test_arg_file_with_cli_override() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let arg_file = tmp_dir.path().join("args.json");
    std::fs::write(
        &arg_file,
        r#"{"commands": ["pca"], "session": {"user_id": 5, "init_command": "true"}}"#,
    )
    .unwrap();

    let arg_file = arg_file.display().to_string();
    let cmd = aips_driver()
        .args(["run", "--dry-run", &arg_file, "--user-id", "6"])
        .ok();
    assert!(cmd.is_ok(), "run failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("true\naips notv << EOF"), "{stdout}");
    assert!(stdout.contains("\n\n6\npca\n"), "{stdout}");
}

#[test]
fn test_unsuccessful_shell_fails() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let cmd = aips_driver()
        .arg("run")
        .args(stub_session_args(tmp_dir.path()))
        .args(["--end", "EOF", "exit 4", "--commands", "pca"])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    // AIPS's output is still shown.
    assert!(stdout.contains("\n1120\npca\n"), "{stdout}");
    assert!(stderr.contains("Error:"), "{stderr}");
}

#[test]
fn test_missing_shell_fails() {
    let cmd = aips_driver()
        .args([
            "run",
            "--init-command",
            "true",
            "--shell",
            "/this/shell/does/not/exist",
            "--commands",
            "pca",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("/this/shell/does/not/exist"), "{stderr}");
}
