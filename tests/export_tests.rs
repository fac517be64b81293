use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

mod common;
use common::{cr, init_db_with_cadets, temp_dir};

#[test]
fn test_export_roster_csv_with_selection() {
    let (home, db) = init_db_with_cadets("export_roster_csv");
    let out = temp_dir("export_roster_csv_out");

    cr(&home)
        .args([
            "--db", &db, "export", "roster", "--select", "SD/002", "--format", "csv", "--dir",
            &out,
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let file = fs::read_dir(&out)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.extension().is_some_and(|x| x == "csv"))
        .expect("csv written");
    let name = file.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("attendance_") && name.ends_with(".csv"));

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.starts_with(
        "Unique ID,Name,Regimental Number,Phone,Email,University Roll,Department,DOB,Father Name"
    ));
    assert!(content.contains("SD/002,Ravi,002"));
    assert!(!content.contains("Asha"));
}

#[test]
fn test_export_selection_matching_nobody_fails() {
    let (home, db) = init_db_with_cadets("export_select_none");
    let out = temp_dir("export_select_none_out");

    cr(&home)
        .args(["--db", &db, "export", "roster", "--select", "SD/999", "--dir", &out])
        .assert()
        .failure()
        .stderr(contains("Please select at least one cadet to export"));
}

#[test]
fn test_export_attendance_day_lists_present_cadets() {
    let (home, db) = init_db_with_cadets("export_attendance");
    let out = temp_dir("export_attendance_out");

    cr(&home)
        .args(["--db", &db, "mark", "2025-06-01", "--set", "SW/001=P"])
        .assert()
        .success();

    cr(&home)
        .args([
            "--db", &db, "export", "attendance", "--date", "2025-06-01", "--format", "json",
            "--dir", &out,
        ])
        .assert()
        .success();

    let path = PathBuf::from(&out).join("attendance_2025_06_01.json");
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["fullName"], "Asha");
    assert_eq!(arr[0]["attendanceDate"], "2025-06-01");

    cr(&home)
        .args([
            "--db", &db, "export", "attendance", "--date", "2025-06-02", "--dir", &out,
        ])
        .assert()
        .failure()
        .stderr(contains("No cadets marked present"));
}

#[test]
fn test_export_monthly_xlsx_and_overwrite_guard() {
    let (home, db) = init_db_with_cadets("export_monthly");
    let out = temp_dir("export_monthly_out");

    cr(&home)
        .args(["--db", &db, "mark", "2025-06-01", "--all", "P"])
        .assert()
        .success();

    let args = [
        "--db", &db, "export", "monthly", "--from", "2025-06-01", "--to", "2025-06-30", "--dir",
        &out,
    ];
    cr(&home).args(args).assert().success().stdout(contains("XLSX export completed"));

    let path = PathBuf::from(&out).join("monthly_attendance_2025_06_01_2025_06_30.xlsx");
    assert!(path.exists());
    assert!(fs::metadata(&path).unwrap().len() > 0);

    // existing file, declined at the prompt
    cr(&home)
        .args(args)
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("Export cancelled"));

    cr(&home)
        .args(args)
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn test_export_monthly_csv_matrix() {
    let (home, db) = init_db_with_cadets("export_monthly_csv");
    let out = temp_dir("export_monthly_csv_out");

    cr(&home)
        .args(["--db", &db, "mark", "2025-06-02", "--set", "SD/002=C", "--set", "SW/001=P"])
        .assert()
        .success();

    cr(&home)
        .args([
            "--db", &db, "export", "monthly", "--from", "2025-06-01", "--to", "2025-06-02",
            "--format", "csv", "--dir", &out,
        ])
        .assert()
        .success();

    let content =
        fs::read_to_string(PathBuf::from(&out).join("monthly_attendance_2025_06_01_2025_06_02.csv"))
            .unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Unique ID,Name,2025-06-01,2025-06-02,Total Present");
    assert_eq!(lines[1], "SW/001,Asha,A,P,1");
    assert_eq!(lines[2], "SD/002,Ravi,A,C,0");
}

#[test]
fn test_export_logged() {
    let (home, db) = init_db_with_cadets("export_logged");
    let out = temp_dir("export_logged_out");

    cr(&home)
        .args(["--db", &db, "export", "roster", "--format", "json", "--dir", &out])
        .assert()
        .success();

    cr(&home)
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("export").and(contains("Exported")));
}
