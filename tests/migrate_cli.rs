use std::path::PathBuf;
use std::process::Command;

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("winmix_cli_{name}_{}", std::process::id()))
}

fn run_migrate(db: &PathBuf) -> (Option<i32>, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_migrate"))
        .arg("--db")
        .arg(db)
        .output()
        .expect("run migrate binary");
    (
        output.status.code(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
    )
}

#[test]
fn success_prints_status_then_usage() {
    let dir = scratch("ok");
    let (code, stdout) = run_migrate(&dir.join("winmix.sqlite"));
    assert_eq!(code, Some(0), "{stdout}");
    assert!(stdout.contains("Migration completed successfully!"));
    assert!(stdout.contains("Usage:"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failure_prints_banner_then_usage_and_exits_1() {
    let blocker = scratch("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let (code, stdout) = run_migrate(&blocker.join("nested").join("winmix.sqlite"));
    assert_eq!(code, Some(1), "{stdout}");
    let failed = stdout.find("Migration failed").expect("failure banner");
    let usage = stdout.find("Usage:").expect("usage block");
    assert!(failed < usage);
    let _ = std::fs::remove_file(&blocker);
}
