use env_guard::check::{CheckOptions, CheckOutcome, EnvCheck};
use env_guard::wizard;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

fn options(dir: &TempDir, ignore_patterns: Vec<String>) -> CheckOptions {
  CheckOptions {
    env_file: Some(dir.path().join(".env")),
    template_file: dir.path().join(".env.example"),
    ignore_patterns,
  }
}

#[test]
fn test_check_integration() {
  let dir = TempDir::new().unwrap();

  let template_content = "# Database configuration
DB_HOST=localhost
DB_PORT=5432 # Default postgres port

# Secret token
API_KEY=\"dummy # not a comment\"

DEBUG=true";
  let env_content = "DB_PORT=5432
DEBUG=false";

  fs::write(dir.path().join(".env.example"), template_content).unwrap();
  fs::write(dir.path().join(".env"), env_content).unwrap();

  let outcome = EnvCheck::check_with_options(options(&dir, Vec::new())).unwrap();
  let CheckOutcome::Report(report) = outcome else {
    panic!("Expected a report");
  };

  assert_eq!(report.missing.len(), 2);

  assert_eq!(report.missing[0].key, "DB_HOST");
  assert_eq!(report.missing[0].value, "localhost");
  assert_eq!(
    report.missing[0].comment.as_deref(),
    Some("Database configuration")
  );
  assert_eq!(report.missing[0].line, 2);

  assert_eq!(report.missing[1].key, "API_KEY");
  assert_eq!(report.missing[1].value, "dummy # not a comment");
  assert_eq!(report.missing[1].comment.as_deref(), Some("Secret token"));
  assert_eq!(report.missing[1].line, 6);
}

#[test]
fn test_missing_env_file_reports_whole_template() {
  let dir = TempDir::new().unwrap();
  fs::write(dir.path().join(".env.example"), "A=1\nB=2\nC=3").unwrap();

  let outcome = EnvCheck::check_with_options(options(&dir, Vec::new())).unwrap();
  let CheckOutcome::Report(report) = outcome else {
    panic!("Expected a report");
  };

  let keys: Vec<&str> = report.missing.iter().map(|e| e.key.as_ref()).collect();
  assert_eq!(keys, ["A", "B", "C"]);
}

#[test]
fn test_missing_template_skips_the_check() {
  let dir = TempDir::new().unwrap();
  fs::write(dir.path().join(".env"), "A=1").unwrap();

  let outcome = EnvCheck::check_with_options(options(&dir, Vec::new())).unwrap();

  assert_eq!(
    outcome,
    CheckOutcome::TemplateMissing(dir.path().join(".env.example"))
  );
}

#[test]
fn test_ignore_patterns_with_invalid_pattern() {
  let dir = TempDir::new().unwrap();
  fs::write(
    dir.path().join(".env.example"),
    "DB_HOST=\nOPTIONAL_KEY=\nTEST_KEY=",
  )
  .unwrap();

  let patterns = vec![String::from("[invalid"), String::from("^OPTIONAL_")];
  let outcome = EnvCheck::check_with_options(options(&dir, patterns)).unwrap();
  let CheckOutcome::Report(report) = outcome else {
    panic!("Expected a report");
  };

  // The invalid pattern is dropped, the valid one still applies.
  let keys: Vec<&str> = report.missing.iter().map(|e| e.key.as_ref()).collect();
  assert_eq!(keys, ["DB_HOST", "TEST_KEY"]);
}

#[test]
fn test_remediation_flow_integration() {
  let dir = TempDir::new().unwrap();

  let template_content = "# Database configuration
DB_HOST=localhost
DB_PORT=5432

# Secret token
API_KEY=

EXISTING=";
  fs::write(dir.path().join(".env.example"), template_content).unwrap();
  fs::write(dir.path().join(".env"), "EXISTING=1").unwrap();

  let outcome = EnvCheck::check_with_options(options(&dir, Vec::new())).unwrap();
  let CheckOutcome::Report(report) = outcome else {
    panic!("Expected a report");
  };
  assert_eq!(report.missing.len(), 3);

  // Answer the first prompt, skip the second, hit end of input for the rest.
  let mut input = Cursor::new("db.internal\n\n");
  let mut output = Vec::new();
  let resolutions = wizard::run(&mut input, &mut output, &report.missing).unwrap();

  let appended = EnvCheck::append_resolutions(&report.env_path, &resolutions).unwrap();
  assert_eq!(appended, 3);

  let env_content = fs::read_to_string(&report.env_path).unwrap();
  let expected = "EXISTING=1
DB_HOST=db.internal
# DB_PORT=
# API_KEY=
";
  assert_eq!(env_content, expected);

  // Skipped keys stay commented out, so a re-check still reports them.
  let outcome = EnvCheck::check_with_options(options(&dir, Vec::new())).unwrap();
  let CheckOutcome::Report(after) = outcome else {
    panic!("Expected a report");
  };
  let keys: Vec<&str> = after.missing.iter().map(|e| e.key.as_ref()).collect();
  assert_eq!(keys, ["DB_PORT", "API_KEY"]);
}
