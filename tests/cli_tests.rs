use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn eventfeed() -> Command {
    let mut cmd = cargo_bin_cmd!("eventfeed");
    cmd.env_remove("EVENTFEED_DATABASE_URL")
        .env_remove("EVENTFEED_BIND");
    cmd
}

fn temp_path(ext: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("eventfeed-cli-test-{nanos}-{suffix}.{ext}"));
    path
}

fn write_temp_config(contents: &str) -> PathBuf {
    let path = temp_path("toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn help_lists_subcommands() {
    eventfeed()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn check_prints_summary_for_valid_config() {
    let path = write_temp_config("[server]\nbind = \"127.0.0.1:4100\"\n");

    eventfeed()
        .args(["check", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"))
        .stdout(predicate::str::contains("127.0.0.1:4100"));

    let _ = fs::remove_file(&path);
}

#[test]
fn check_fails_on_invalid_config() {
    let path = write_temp_config("[listing]\npage_size = 0\n");

    eventfeed()
        .args(["check", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("listing.page_size"));

    let _ = fs::remove_file(&path);
}

#[test]
fn migrate_creates_the_database() {
    let db_path = temp_path("db");
    let config = write_temp_config(&format!(
        "[database]\nurl = \"{}\"\n\n[logging]\nlevel = \"warn\"\n",
        db_path.display()
    ));

    eventfeed()
        .args(["migrate", "--config"])
        .arg(&config)
        .assert()
        .success();
    assert!(db_path.exists());

    let _ = fs::remove_file(&config);
    let _ = fs::remove_file(&db_path);
}
