use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::{fs, path::Path};

fn bin_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("faultloc").expect("faultloc built");
    cmd.current_dir(dir);
    cmd
}

fn write_doc(root: &Path, name: &str, value: serde_json::Value) {
    fs::write(root.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

// Technical codes only, so no run here ever needs a translation backend.
fn technical_fr(file_name: &str) -> serde_json::Value {
    json!({
        "Header": {"Language": "fr", "FileName": file_name},
        "FaultDetailList": [
            {"Id": 1, "Description": "4095", "IsExpandable": false},
            {"Id": 2, "Description": "E:21", "IsExpandable": true}
        ]
    })
}

#[test]
fn sync_one_creates_sibling_variants() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(
        tmp.path(),
        "faults_000_255_255_255_fr.json",
        technical_fr("faults_000_255_255_255_fr.json"),
    );

    bin_cmd(tmp.path())
        .args(["sync-one", "--file", "faults_000_255_255_255_fr.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("synchronized 2 sibling variants"));

    let en_raw = fs::read_to_string(tmp.path().join("faults_000_255_255_255_en.json")).unwrap();
    let en: serde_json::Value = serde_json::from_str(&en_raw).unwrap();
    assert_eq!(en["Header"]["Language"], "en");
    assert_eq!(en["Header"]["FileName"], "faults_000_255_255_255_en.json");
    assert_eq!(en["FaultDetailList"][0]["Description"], "4095");
    assert_eq!(en["FaultDetailList"][1]["IsExpandable"], true);
    assert!(tmp.path().join("faults_000_255_255_255_es.json").exists());
}

#[test]
fn sync_all_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(
        tmp.path(),
        "faults_001_255_255_255_fr.json",
        technical_fr("faults_001_255_255_255_fr.json"),
    );

    bin_cmd(tmp.path())
        .args(["sync-all", "--root", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("faults_001_255_255_255_en.json (created"))
        .stdout(predicate::str::contains("faults_001_255_255_255_es.json (created"));
    bin_cmd(tmp.path())
        .args(["sync-all", "--root", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 variants created, 0 updated"));
}

#[test]
fn check_coherence_flags_an_extra_entry() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(
        tmp.path(),
        "faults_000_255_255_255_fr.json",
        technical_fr("faults_000_255_255_255_fr.json"),
    );
    write_doc(
        tmp.path(),
        "faults_000_255_255_255_en.json",
        json!({
            "Header": {"Language": "en", "FileName": "faults_000_255_255_255_en.json"},
            "FaultDetailList": [
                {"Id": 1, "Description": "4095", "IsExpandable": false}
            ]
        }),
    );

    bin_cmd(tmp.path())
        .args(["check-coherence", "--root", "."])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("length-mismatch"));
}

#[test]
fn failing_run_still_flushes_file_logs() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(
        tmp.path(),
        "faults_000_255_255_255_fr.json",
        technical_fr("faults_000_255_255_255_fr.json"),
    );
    write_doc(
        tmp.path(),
        "faults_000_255_255_255_en.json",
        json!({
            "Header": {"Language": "en", "FileName": "faults_000_255_255_255_en.json"},
            "FaultDetailList": []
        }),
    );

    bin_cmd(tmp.path())
        .args(["check-coherence", "--root", "."])
        .assert()
        .code(1);

    let logged: u64 = fs::read_dir(tmp.path().join("logs"))
        .expect("log directory")
        .map(|e| e.unwrap().metadata().unwrap().len())
        .sum();
    assert!(logged > 0, "file log is empty");
}

#[test]
fn check_coherence_clean_corpus_reports_json() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(
        tmp.path(),
        "faults_000_255_255_255_fr.json",
        technical_fr("faults_000_255_255_255_fr.json"),
    );

    bin_cmd(tmp.path())
        .args(["check-coherence", "--root", ".", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"issues\": []"));
}

#[test]
fn fix_headers_dry_run_does_not_write() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(
        tmp.path(),
        "faults_002_255_255_255_es.json",
        json!({
            "Header": {"Language": "fr", "FileName": "wrong.json"},
            "FaultDetailList": []
        }),
    );
    let before = fs::read_to_string(tmp.path().join("faults_002_255_255_255_es.json")).unwrap();

    bin_cmd(tmp.path())
        .args(["fix-headers", "--root", ".", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 need fixing"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("faults_002_255_255_255_es.json")).unwrap(),
        before
    );

    bin_cmd(tmp.path())
        .args(["fix-headers", "--root", "."])
        .assert()
        .success();
    let fixed: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(tmp.path().join("faults_002_255_255_255_es.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(fixed["Header"]["Language"], "es");
    assert_eq!(fixed["Header"]["FileName"], "faults_002_255_255_255_es.json");
}

#[test]
fn gen_missing_without_yes_only_lists() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(
        tmp.path(),
        "faults_003_255_255_255_fr.json",
        technical_fr("faults_003_255_255_255_fr.json"),
    );

    bin_cmd(tmp.path())
        .args(["gen-missing", "--root", "."])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 variants missing"))
        .stdout(predicate::str::contains("re-run with --yes"));
    assert!(!tmp.path().join("faults_003_255_255_255_en.json").exists());
}

#[test]
fn gen_missing_with_yes_generates() {
    let tmp = tempfile::tempdir().unwrap();
    write_doc(
        tmp.path(),
        "faults_003_255_255_255_fr.json",
        technical_fr("faults_003_255_255_255_fr.json"),
    );

    bin_cmd(tmp.path())
        .args(["gen-missing", "--root", ".", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generated 2 variants"));
    assert!(tmp.path().join("faults_003_255_255_255_en.json").exists());
    assert!(tmp.path().join("faults_003_255_255_255_es.json").exists());

    bin_cmd(tmp.path())
        .args(["gen-missing", "--root", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("corpus is complete"));
}
