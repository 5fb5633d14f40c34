use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lx(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lx").unwrap();
    cmd.env("LX_LEDGER_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn list_shows_seed_data_on_first_run() {
    let dir = TempDir::new().unwrap();

    lx(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("接上月"))
        .stdout(predicate::str::contains("8 entries"));
}

#[test]
fn add_persists_and_logs() {
    let dir = TempDir::new().unwrap();

    lx(&dir)
        .args(["add", "--date", "2025-1-30", "--summary", "月末盘点", "--expense", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added entry"));

    lx(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("月末盘点"))
        .stdout(predicate::str::contains("9 entries"));

    lx(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("快速录入"));

    assert!(dir.path().join("data").join("lx_ledger_data_v1.json").exists());
    assert!(dir.path().join("data").join("lx_ledger_logs_v1.json").exists());
}

#[test]
fn delete_with_yes_removes_entry() {
    let dir = TempDir::new().unwrap();

    lx(&dir)
        .args(["delete", "3", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted entry: 张纯芳酒"));

    lx(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("张纯芳酒").not());
}

#[test]
fn delete_declined_keeps_entry() {
    let dir = TempDir::new().unwrap();

    lx(&dir)
        .args(["delete", "3"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    lx(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("张纯芳酒"));
}

#[test]
fn delete_unknown_id_fails() {
    let dir = TempDir::new().unwrap();

    lx(&dir)
        .args(["delete", "does-not-exist", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn export_writes_dated_report() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    lx(&dir)
        .args(["export", "--from", "2025-1-1", "--to", "2025-1-9", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 5 entries"));

    let files: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
    assert_eq!(files.len(), 1);
    let path = files[0].as_ref().unwrap().path();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("财务报表_"));
    assert!(name.ends_with(".xls"));

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("2025-1-1 ~ 2025-1-9"));
}

#[test]
fn clear_requires_force() {
    let dir = TempDir::new().unwrap();

    lx(&dir)
        .args(["add", "--date", "2025-1-2", "--summary", "临时"])
        .assert()
        .success();

    lx(&dir)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    lx(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("9 entries"));

    lx(&dir).args(["clear", "--force"]).assert().success();

    lx(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("8 entries"));
}

#[test]
fn backup_then_import_round_trip() {
    let dir = TempDir::new().unwrap();

    lx(&dir)
        .args(["add", "--date", "2025-1-30", "--summary", "备份前", "--income", "10"])
        .assert()
        .success();

    lx(&dir)
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created: backup-"));

    let backup = std::fs::read_dir(dir.path().join("backups"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();

    lx(&dir).args(["clear", "--force"]).assert().success();

    lx(&dir)
        .arg("import")
        .arg(&backup)
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 9 entries"));

    lx(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("备份前"));
}

#[test]
fn summary_shows_closing_balance() {
    let dir = TempDir::new().unwrap();

    lx(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("328171.27"))
        .stdout(predicate::str::contains("人力成本"));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    lx(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup retention: 30"));
}

#[test]
fn ai_without_api_key_fails_cleanly() {
    let dir = TempDir::new().unwrap();

    lx(&dir)
        .env_remove("DEEPSEEK_API_KEY")
        .args(["ai", "昨天", "打车", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DEEPSEEK_API_KEY"));

    lx(&dir)
        .arg("history")
        .assert()
        .stdout(predicate::str::contains("No activity recorded."));
}
