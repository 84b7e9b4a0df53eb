// CLI integration tests covering the main rosterlite flows.
use std::process::Command;

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_rosterlite");
    Command::new(exe)
}

fn parse_json(text: &str) -> Value {
    serde_json::from_str(text).expect("valid json")
}

fn json_lines(output: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(output)
        .lines()
        .map(parse_json)
        .collect()
}

#[test]
fn add_list_find_flow() {
    let temp = tempfile::tempdir().expect("tempdir");
    let db = temp.path().join("people.db");
    let db = db.to_str().unwrap();

    let add = cmd()
        .args(["--db", db, "add", "--name", "ada", "--age", "36"])
        .output()
        .expect("add");
    assert!(add.status.success());
    let added = parse_json(std::str::from_utf8(&add.stdout).expect("utf8"));
    assert_eq!(added["id"], 0);
    assert_eq!(added["name"], "ada");
    assert_eq!(added["age"], 36);

    let add = cmd()
        .args(["--db", db, "add", "--name", "grace", "--age", "45"])
        .output()
        .expect("add");
    assert!(add.status.success());

    let list = cmd().args(["--db", db, "list"]).output().expect("list");
    assert!(list.status.success());
    let people = json_lines(&list.stdout);
    assert_eq!(people.len(), 2);
    assert_eq!(people[0]["name"], "ada");
    assert_eq!(people[1]["id"], 1);

    let find = cmd()
        .args(["--db", db, "find", "grace"])
        .output()
        .expect("find");
    assert!(find.status.success());
    let found = parse_json(std::str::from_utf8(&find.stdout).expect("utf8"));
    assert_eq!(found["id"], 1);
    assert_eq!(found["age"], 45);
}

#[test]
fn info_reports_metadata() {
    let temp = tempfile::tempdir().expect("tempdir");
    let db = temp.path().join("people.db");
    let db = db.to_str().unwrap();

    cmd()
        .args(["--db", db, "add", "--name", "ada", "--age", "36"])
        .output()
        .expect("add");

    let info = cmd().args(["--db", db, "info"]).output().expect("info");
    assert!(info.status.success());
    let meta = parse_json(std::str::from_utf8(&info.stdout).expect("utf8"));
    assert_eq!(meta["autoIncrementId"], 1);
    assert_eq!(meta["count"], 1);
    assert!(meta["path"].as_str().unwrap().ends_with("people.db"));
}

#[test]
fn export_then_import_restores_the_roster() {
    let temp = tempfile::tempdir().expect("tempdir");
    let source = temp.path().join("source.db");
    let copy = temp.path().join("copy.db");
    let export = temp.path().join("people.json");

    for (name, age) in [("ada", "36"), ("grace", "45")] {
        let add = cmd()
            .args(["--db", source.to_str().unwrap(), "add", "--name", name, "--age", age])
            .output()
            .expect("add");
        assert!(add.status.success());
    }

    let exported = cmd()
        .args([
            "--db",
            source.to_str().unwrap(),
            "export",
            "--out",
            export.to_str().unwrap(),
        ])
        .output()
        .expect("export");
    assert!(exported.status.success());

    let imported = cmd()
        .args(["--db", copy.to_str().unwrap(), "import", export.to_str().unwrap()])
        .output()
        .expect("import");
    assert!(imported.status.success());
    let report = parse_json(std::str::from_utf8(&imported.stdout).expect("utf8"));
    assert_eq!(report["imported"], 2);

    let list = cmd()
        .args(["--db", copy.to_str().unwrap(), "list"])
        .output()
        .expect("list");
    let people = json_lines(&list.stdout);
    assert_eq!(people.len(), 2);
    assert_eq!(people[1]["name"], "grace");

    // Imported metadata keeps counting where the source left off.
    let add = cmd()
        .args(["--db", copy.to_str().unwrap(), "add", "--name", "alan", "--age", "41"])
        .output()
        .expect("add");
    let added = parse_json(std::str::from_utf8(&add.stdout).expect("utf8"));
    assert_eq!(added["id"], 2);
}

#[test]
fn find_missing_person_exits_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");
    let db = temp.path().join("people.db");

    let find = cmd()
        .args(["--db", db.to_str().unwrap(), "find", "nobody"])
        .output()
        .expect("find");
    assert_eq!(find.status.code(), Some(3));
    let error = parse_json(std::str::from_utf8(&find.stderr).expect("utf8"));
    assert_eq!(error["error"]["kind"], "not-found");
}

#[test]
fn unknown_flag_exits_usage() {
    let output = cmd().args(["--bogus"]).output().expect("run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn inspect_prints_the_tree_outline() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("sample.json");
    std::fs::write(&file, br#"{"a":1,"b":[true,null,"s"]}"#).expect("write");

    let inspect = cmd()
        .args(["inspect", file.to_str().unwrap()])
        .output()
        .expect("inspect");
    assert!(inspect.status.success());
    let text = std::str::from_utf8(&inspect.stdout).expect("utf8");
    assert_eq!(text, "- a: 1\n- b:\n  - true\n  - (null)\n  - s\n");
}

#[test]
fn inspect_tokens_lists_the_token_stream() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("sample.json");
    std::fs::write(&file, br#"{"a":1,"b":[true,null,"s"]}"#).expect("write");

    let inspect = cmd()
        .args(["inspect", file.to_str().unwrap(), "--tokens"])
        .output()
        .expect("inspect");
    assert!(inspect.status.success());
    let tokens = json_lines(&inspect.stdout);
    assert_eq!(tokens.len(), 15);
    assert_eq!(tokens[0]["kind"], "curly-open");
    assert_eq!(tokens[1]["text"], "a");
    assert_eq!(tokens[1]["line"], 1);
}

#[test]
fn inspect_malformed_file_exits_usage() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("broken.json");
    std::fs::write(&file, b"{\"a\":").expect("write");

    let inspect = cmd()
        .args(["inspect", file.to_str().unwrap()])
        .output()
        .expect("inspect");
    assert_eq!(inspect.status.code(), Some(2));
    let error = parse_json(std::str::from_utf8(&inspect.stderr).expect("utf8"));
    assert_eq!(error["error"]["kind"], "usage");
}

#[test]
fn locked_roster_exits_busy() {
    let temp = tempfile::tempdir().expect("tempdir");
    let db = temp.path().join("people.db");
    let _held = rosterlite::core::roster::Roster::open(&db).expect("open");

    let add = cmd()
        .args(["--db", db.to_str().unwrap(), "add", "--name", "ada", "--age", "36"])
        .output()
        .expect("add");
    assert_eq!(add.status.code(), Some(4));
    let error = parse_json(std::str::from_utf8(&add.stderr).expect("utf8"));
    assert_eq!(error["error"]["kind"], "busy");
}
