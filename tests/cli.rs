use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn php_file(body: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("case.php");
    fs::write(&path, body).unwrap();
    (dir, path)
}

#[test]
fn scan_prints_compact_tokens() {
    let (_dir, path) = php_file("<?php $a;");
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("scan").arg(&path);

    cmd.assert().success().stdout(
        predicate::str::starts_with(r#"[{"kind":"ScriptSectionStartTag","fullStart":0"#)
            .and(predicate::str::contains(r#""kind":"VariableName""#)),
    );
}

#[test]
fn scan_honours_display_flags() {
    let (_dir, path) = php_file("<?php $a;");
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("--pretty")
        .arg("--short-tokens")
        .arg("scan")
        .arg(&path);

    cmd.assert().success().stdout(
        predicate::str::contains("\"textLength\": 2")
            .and(predicate::str::contains("fullStart").not()),
    );
}

#[test]
fn tokens_prints_banner_and_newlines() {
    let (_dir, path) = php_file("<?php\n$x = 1;\n");
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("tokens").arg(&path);

    cmd.assert().success().stdout(
        predicate::str::starts_with("file:\n <?php\n")
            .and(predicate::str::contains("*******************\nT_OPEN_TAG: `<?php`\n"))
            .and(predicate::str::contains("T_NEW_LINE: `\n`\n"))
            .and(predicate::str::contains("T_VARIABLE: `$x`\n")),
    );
}

#[test]
fn parse_prints_tree() {
    let (_dir, path) = php_file("<?php return 1;");
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("parse").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"ReturnStatement\": {"));
}

#[test]
fn gencase_tokens_writes_fixture() {
    let (dir, path) = php_file("<?php echo 1;");
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("gencase-tokens").arg(dir.path());

    cmd.assert().success().stdout(predicate::str::is_empty());
    let fixture = fs::read_to_string(path.with_extension("php.tokens")).unwrap();
    assert!(fixture.starts_with('['));
}

#[test]
fn unknown_command_exits_with_one() {
    let (_dir, path) = php_file("<?php");
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("lint").arg(&path);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("unknown command `lint`"));
}

#[test]
fn missing_path_exits_with_one() {
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("parse").arg("/definitely/not/here.php");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn directory_for_single_file_command_exits_with_one() {
    let (dir, _path) = php_file("<?php");
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("tokens").arg(dir.path());

    cmd.assert().code(1).stdout(predicate::str::is_empty());
}

#[test]
fn wrong_arity_exits_with_one() {
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("scan");
    cmd.assert().code(1);

    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.assert().code(1);

    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.args(["scan", "a.php", "extra"]);
    cmd.assert().code(1);
}

#[test]
fn help_exits_with_zero() {
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gencase-parser"));
}

#[test]
fn missing_config_file_exits_with_one() {
    let (_dir, path) = php_file("<?php");
    let mut cmd = cargo_bin_cmd!("phpcase");
    cmd.arg("--config")
        .arg("/definitely/not/here.toml")
        .arg("scan")
        .arg(&path);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("configuration error"));
}
