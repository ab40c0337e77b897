//! Integration tests for folder_digest


use harness::Workspace;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_usage_error_without_folder() {
    let ws = Workspace::new();
    ws.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_usage_error_with_extra_argument() {
    let ws = Workspace::new();
    ws.command().args(["proj", "other"]).assert().failure();
}

#[test]
fn test_missing_folder_fails() {
    let ws = Workspace::new();
    ws.command()
        .arg("does-not-exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_unrestricted_includes_hidden() {
    let ws = Workspace::new();
    ws.add_file("src/main.txt", "fn main\n");
    ws.add_file(".secret/data.txt", "token\n");

    ws.command()
        .arg("proj")
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let report = ws.report();
    assert_eq!(
        report,
        "proj\n├─.secret\n│  └─data.txt\n└─src\n   └─main.txt\n\n\
         【.secret/data.txt】\ntoken\n\n\n\
         【src/main.txt】\nfn main\n\n\n"
    );
}

#[test]
fn test_ignore_file_filters_logs() {
    let ws = Workspace::new();
    ws.add_control("ignore.txt", "# build noise\n*.log\n");
    ws.add_file("app.log", "noise");
    ws.add_file("app.txt", "signal");
    ws.add_file(".env", "KEY=1");

    ws.command().arg("proj").assert().success();

    let report = ws.report();
    assert!(report.contains("└─app.txt"), "report: {}", report);
    assert!(report.contains("【app.txt】\nsignal"));
    assert!(!report.contains("app.log"), "report: {}", report);
    assert!(!report.contains(".env"), "report: {}", report);
}

#[test]
fn test_obey_file_selects_files() {
    let ws = Workspace::new();
    ws.add_control("obey.txt", "src/*\n");
    ws.add_file("src/a.txt", "alpha");
    ws.add_file("readme.txt", "readme");

    ws.command().arg("proj").assert().success();

    let report = ws.report();
    assert_eq!(report, "proj\n└─src\n   └─a.txt\n\n【src/a.txt】\nalpha\n\n");
}

#[test]
fn test_both_control_files_prompt() {
    let ws = Workspace::new();
    ws.add_control("ignore.txt", "*.log\n");
    ws.add_control("obey.txt", "src/*\n");
    ws.add_file("src/a.txt", "alpha");
    ws.add_file("readme.txt", "readme");
    ws.add_file("x.log", "noise");

    ws.command()
        .arg("proj")
        .write_stdin("ignore\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("'ignore'"));

    let report = ws.report();
    assert!(report.contains("readme.txt"));
    assert!(report.contains("src/a.txt"));
    assert!(!report.contains("x.log"));
}

#[test]
fn test_invalid_prompt_answer_fails() {
    let ws = Workspace::new();
    ws.add_control("ignore.txt", "*.log\n");
    ws.add_control("obey.txt", "src/*\n");
    ws.add_file("a.txt", "alpha");

    ws.command()
        .arg("proj")
        .write_stdin("maybe\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid choice"));
    assert!(!ws.path().join("output.txt").exists());
}

#[test]
fn test_mode_flag_skips_prompt() {
    let ws = Workspace::new();
    ws.add_control("ignore.txt", "*.log\n");
    ws.add_control("obey.txt", "src/*\n");
    ws.add_file("src/a.txt", "alpha");
    ws.add_file("readme.txt", "readme");

    ws.command().args(["proj", "--mode", "obey"]).assert().success();

    assert!(!ws.report().contains("readme.txt"));
}

#[test]
fn test_tree_flag_and_output_path() {
    let ws = Workspace::new();
    ws.add_file("a.txt", "alpha");

    ws.command()
        .args(["proj", "--tree", "-o", "tree.txt"])
        .assert()
        .success();

    let report = fs::read_to_string(ws.path().join("tree.txt")).unwrap();
    assert_eq!(report, "proj\n└─a.txt\n\n");
}

#[test]
fn test_settings_file_sets_default_output() {
    let ws = Workspace::new();
    let config_dir = ws.path().join("home/.config/folder_digest");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("settings.toml"), "output = \"digest.txt\"\n").unwrap();
    ws.add_file("a.txt", "alpha");

    ws.command().arg("proj").assert().success();

    assert!(ws.path().join("digest.txt").exists());
    assert!(!ws.path().join("output.txt").exists());
}

#[test]
fn test_non_utf8_file_does_not_abort() {
    let ws = Workspace::new();
    ws.add_file("good.txt", "fine");
    fs::write(ws.path().join("proj/bad.bin"), [0xffu8, 0xfe, 0xfd]).unwrap();

    ws.command().arg("proj").assert().success();

    let report = ws.report();
    assert!(report.contains("【bad.bin】\nError reading file bad.bin"));
    assert!(report.contains("【good.txt】\nfine"));
}

#[cfg(unix)]
#[test]
fn test_symlinked_folder_keeps_link_name() {
    let ws = Workspace::new();
    ws.add_file("a.txt", "alpha");
    std::os::unix::fs::symlink(ws.path().join("proj"), ws.path().join("link")).unwrap();

    ws.command().arg("link").assert().success();

    assert!(ws.report().starts_with("link\n└─a.txt\n"), "report: {}", ws.report());
}

#[test]
fn test_shell_literal_patterns_do_not_abort() {
    let ws = Workspace::new();
    ws.add_control("ignore.txt", "file[1.txt\n{a,b}.txt\n");
    ws.add_file("file[1.txt", "bracket");
    ws.add_file("a.txt", "alpha");

    ws.command().arg("proj").assert().success();

    let report = ws.report();
    assert!(!report.contains("file[1.txt"), "report: {}", report);
    assert!(report.contains("【a.txt】\nalpha"), "report: {}", report);
}
