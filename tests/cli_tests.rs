// End-to-end tests for the jellyfy binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const USAGE: &str = "Usage: jellyfy -series=<series> -season=<season> <folder>\n";

fn jellyfy() -> Command {
    Command::cargo_bin("jellyfy").unwrap()
}

#[test]
fn test_version() {
    jellyfy()
        .args(["-version", "-season=abc"])
        .assert()
        .success()
        .stdout("jellyfy version 0.1.2\n");
}

#[test]
fn test_usage_when_arguments_missing() {
    jellyfy()
        .args(["-series=MyShow", "-season=1"])
        .assert()
        .code(1)
        .stdout(USAGE);

    jellyfy().assert().code(1).stdout(USAGE);
}

#[test]
fn test_usage_on_bad_season() {
    jellyfy()
        .args(["-series=MyShow", "-season=abc", "dir"])
        .assert()
        .code(1)
        .stdout(USAGE)
        .stderr(predicate::str::contains("abc"));
}

#[test]
fn test_renames_folder_and_episodes() {
    let root = tempfile::tempdir().unwrap();
    let folder = root.path().join("MyShow");
    fs::create_dir(&folder).unwrap();
    fs::write(folder.join("ep.s1e2.mkv"), b"").unwrap();
    fs::write(folder.join("random.mkv"), b"").unwrap();

    jellyfy()
        .arg("-series=MyShow")
        .arg("-season=1")
        .arg(&folder)
        .assert()
        .success()
        .stdout("Folder renamed successfully\nep.s1e2.mkv -> MyShow S01E02.mkv\n");

    let season = root.path().join("Season 01");
    assert!(season.join("MyShow S01E02.mkv").is_file());
    assert!(season.join("random.mkv").is_file());
}

#[test]
fn test_destination_exists() {
    let root = tempfile::tempdir().unwrap();
    let folder = root.path().join("MyShow");
    fs::create_dir(&folder).unwrap();
    fs::create_dir(root.path().join("Season 02")).unwrap();

    jellyfy()
        .arg("-series=MyShow")
        .arg("-season=2")
        .arg(&folder)
        .assert()
        .code(2)
        .stdout("Error renaming folder: target folder already exists: 'Season 02'\n");

    assert!(folder.is_dir());
}

#[test]
fn test_title_editor_failure_is_a_warning() {
    let root = tempfile::tempdir().unwrap();
    let folder = root.path().join("MyShow");
    fs::create_dir(&folder).unwrap();
    fs::write(folder.join("a.s1e1.mkv"), b"").unwrap();
    fs::write(folder.join("b.s1e2.mkv"), b"").unwrap();

    jellyfy()
        .arg("-series=MyShow")
        .arg("-season=1")
        .arg("-replace_title")
        .arg("-mkvpropedit=/nonexistent/mkvpropedit_xyz_12345")
        .arg(&folder)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("a.s1e1.mkv -> MyShow S01E01.mkv"))
        .stdout(predicate::str::contains("b.s1e2.mkv -> MyShow S01E02.mkv"))
        .stdout(predicate::str::contains("Error modifying title:").count(2));

    let season = root.path().join("Season 01");
    assert!(season.join("MyShow S01E01.mkv").is_file());
    assert!(season.join("MyShow S01E02.mkv").is_file());
}

#[test]
fn test_missing_source_folder() {
    let root = tempfile::tempdir().unwrap();
    let folder = root.path().join("MyShow");

    jellyfy()
        .arg("-series=MyShow")
        .arg("-season=1")
        .arg(&folder)
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with(
            "Error renaming folder: error renaming folder: ",
        ))
        .stdout(predicate::str::contains("Usage:").not());

    assert!(!root.path().join("Season 01").exists());
}

#[test]
fn test_force_folder_reuses_existing_season() {
    let root = tempfile::tempdir().unwrap();
    let folder = root.path().join("MyShow");
    let season = root.path().join("Season 01");
    fs::create_dir(&folder).unwrap();
    fs::create_dir(&season).unwrap();
    fs::write(season.join("old.S01E04.MKV"), b"").unwrap();

    jellyfy()
        .arg("-series=MyShow")
        .arg("-season=1")
        .arg("-force_folder")
        .arg(&folder)
        .assert()
        .success()
        .stdout("old.S01E04.MKV -> MyShow S01E04.mkv\n");

    assert!(folder.is_dir());
    assert!(season.join("MyShow S01E04.mkv").is_file());
}

#[test]
fn test_version_false_is_not_version() {
    jellyfy()
        .arg("-version=false")
        .assert()
        .code(1)
        .stdout(USAGE);
}
