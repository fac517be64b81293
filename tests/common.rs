#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, with HOME pointed at a per-test directory so no real
/// configuration is read or written.
pub fn cr(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("cadetroster");
    cmd.env("HOME", home).env("APPDATA", home);
    cmd
}

/// Fresh scratch directory inside the system temp dir.
pub fn temp_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("cadetroster_{name}"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path.to_string_lossy().to_string()
}

/// Scratch directory plus a store path inside it.
pub fn setup_test_db(name: &str) -> (String, String) {
    let home = temp_dir(name);
    let db = PathBuf::from(&home)
        .join("roster.sqlite")
        .to_string_lossy()
        .to_string();
    (home, db)
}

pub fn init(home: &str, db: &str) {
    cr(home)
        .args(["--db", db, "--test", "init"])
        .assert()
        .success();
}

pub fn add_cadet(home: &str, db: &str, name: &str, gender: &str, reg: &str) {
    cr(home)
        .args([
            "--db",
            db,
            "add",
            "--name",
            name,
            "--gender",
            gender,
            "--regimental",
            reg,
            "--phone",
            "9876543210",
            "--email",
            &format!("{}@unit.in", name.to_lowercase()),
        ])
        .assert()
        .success();
}

/// Initialized store with two cadets: Asha (SW/001) and Ravi (SD/002).
pub fn init_db_with_cadets(name: &str) -> (String, String) {
    let (home, db) = setup_test_db(name);
    init(&home, &db);
    add_cadet(&home, &db, "Asha", "F", "001");
    add_cadet(&home, &db, "Ravi", "M", "002");
    (home, db)
}
