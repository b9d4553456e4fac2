use std::fs;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn write_snapshots(dir: &tempfile::TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let source_path = dir.path().join("before.json");
    let target_path = dir.path().join("after.json");
    fs::write(
        &source_path,
        r#"[{ "_id": 1, "someKey": "RINGING", "meta": { "subKey1": 1234, "subKey2": 52 } }]"#,
    )
    .expect("write source snapshot");
    fs::write(
        &target_path,
        r#"[
            { "_id": 1, "someKey": "HANGUP", "meta": { "subKey1": 1234 } },
            { "_id": 2, "someKey": "RINGING", "meta": { "subKey1": 5678, "subKey2": 207, "subKey3": 52 } }
        ]"#,
    )
    .expect("write target snapshot");
    (source_path, target_path)
}

#[test]
fn diff_writes_html_report_by_extension() {
    let dir = tempdir().expect("temp dir");
    let (source, target) = write_snapshots(&dir);
    let output = dir.path().join("report.html");

    Command::cargo_bin("record-delta")
        .expect("binary exists")
        .args([
            "diff",
            "-s",
            source.to_str().unwrap(),
            "-t",
            target.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let html = fs::read_to_string(&output).expect("read report");
    assert!(html.contains("Legend"));
    assert!(html.contains("<th data-column=\"meta.subKey3\">meta.subKey3</th>"));
    assert!(html.contains("HANGUP"));
}

#[test]
fn diff_writes_csv_report_by_extension() {
    let dir = tempdir().expect("temp dir");
    let (source, target) = write_snapshots(&dir);
    let output = dir.path().join("report.csv");

    Command::cargo_bin("record-delta")
        .expect("binary exists")
        .args([
            "diff",
            "-s",
            source.to_str().unwrap(),
            "-t",
            target.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let csv = fs::read_to_string(&output).expect("read report");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "\"_id\",\"someKey\",\"meta.subKey1\",\"meta.subKey2\",\"meta.subKey3\""
    );
    assert!(lines[1].starts_with("\"1\",\"HANGUP\""));
}

#[test]
fn diff_defaults_to_console_table_on_stdout() {
    let dir = tempdir().expect("temp dir");
    let (source, target) = write_snapshots(&dir);

    Command::cargo_bin("record-delta")
        .expect("binary exists")
        .args([
            "diff",
            "-s",
            source.to_str().unwrap(),
            "-t",
            target.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("_id"))
        .stdout(contains("DELETED"));
}

#[test]
fn diff_renders_json_with_explicit_format() {
    let dir = tempdir().expect("temp dir");
    let (source, target) = write_snapshots(&dir);

    Command::cargo_bin("record-delta")
        .expect("binary exists")
        .args([
            "diff",
            "-s",
            source.to_str().unwrap(),
            "-t",
            target.to_str().unwrap(),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(contains("\"columns\""))
        .stdout(contains("\"someKey\""));
}

#[test]
fn diff_reads_source_from_stdin() {
    let dir = tempdir().expect("temp dir");
    let (_, target) = write_snapshots(&dir);

    Command::cargo_bin("record-delta")
        .expect("binary exists")
        .args([
            "diff",
            "-s",
            "-",
            "-t",
            target.to_str().unwrap(),
            "-f",
            "csv",
        ])
        .write_stdin(r#"[{ "_id": 2, "someKey": "HOLD" }]"#)
        .assert()
        .success()
        .stdout(contains("\"RINGING\""));
}

#[test]
fn diff_rejects_non_array_snapshot() {
    let dir = tempdir().expect("temp dir");
    let (source, _) = write_snapshots(&dir);
    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{ "_id": 1 }"#).expect("write bad snapshot");

    Command::cargo_bin("record-delta")
        .expect("binary exists")
        .args([
            "diff",
            "-s",
            source.to_str().unwrap(),
            "-t",
            bad.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("array"));
}

#[test]
fn diff_rejects_record_without_identity() {
    let dir = tempdir().expect("temp dir");
    let (source, _) = write_snapshots(&dir);
    let orphan = dir.path().join("orphan.json");
    fs::write(&orphan, r#"[{ "someKey": "RINGING" }]"#).expect("write orphan snapshot");

    Command::cargo_bin("record-delta")
        .expect("binary exists")
        .args([
            "diff",
            "-s",
            source.to_str().unwrap(),
            "-t",
            orphan.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("'_id'"));
}

#[test]
fn ids_lists_the_identity_index() {
    let dir = tempdir().expect("temp dir");
    let (_, target) = write_snapshots(&dir);

    Command::cargo_bin("record-delta")
        .expect("binary exists")
        .args(["ids", "-i", target.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("_id  fields"))
        .stdout(contains("1"))
        .stdout(contains("2"));
}
