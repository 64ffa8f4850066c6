// Tests for selector list loading

use std::io::Write;
use std::path::PathBuf;
use tagcheck_core::CheckError;
use tagcheck_core::checks::{load_checks, parse_checks};
use tempfile::NamedTempFile;

fn checks_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_parse_checks_sorts_ascending() {
    let checks = parse_checks(r##"["h1", "#profilelink", "a[href]", ".bio"]"##).unwrap();
    assert_eq!(checks, vec!["#profilelink", ".bio", "a[href]", "h1"]);
}

#[test]
fn test_parse_checks_empty_array() {
    let checks = parse_checks("[]").unwrap();
    assert!(checks.is_empty());
}

#[test]
fn test_parse_checks_keeps_duplicates() {
    let checks = parse_checks(r#"["p", "div", "p"]"#).unwrap();
    assert_eq!(checks, vec!["div", "p", "p"]);
}

#[test]
fn test_parse_checks_sort_is_case_sensitive() {
    let checks = parse_checks(r#"["b", "B", "a", "A"]"#).unwrap();
    assert_eq!(checks, vec!["A", "B", "a", "b"]);
}

#[test]
fn test_parse_checks_rejects_malformed_json() {
    let result = parse_checks(r##"["h1", "#bar""##);
    assert!(matches!(result, Err(CheckError::ParseError(_))));
}

#[test]
fn test_parse_checks_rejects_object() {
    let result = parse_checks(r#"{"h1": true}"#);
    assert!(matches!(result, Err(CheckError::ParseError(_))));
}

#[test]
fn test_parse_checks_rejects_non_string_entries() {
    let result = parse_checks(r#"["h1", 42]"#);
    assert!(matches!(result, Err(CheckError::ParseError(_))));
}

// ============================================================================
// File Loading Tests
// ============================================================================

#[test]
fn test_load_checks_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_file = checks_file(r#"["title", "body", "a[href]"]"#);

    let checks = load_checks(temp_file.path())?;

    assert_eq!(checks, vec!["a[href]", "body", "title"]);
    Ok(())
}

#[test]
fn test_load_checks_missing_file() {
    let path = PathBuf::from("/no/such/dir/checks.json");
    let result = load_checks(&path);
    match result {
        Err(CheckError::MissingFile(missing)) => assert_eq!(missing, path),
        other => panic!("expected MissingFile, got {:?}", other),
    }
}

#[test]
fn test_load_checks_parse_error_names_file() {
    let temp_file = checks_file("not json at all");
    let err = load_checks(temp_file.path()).unwrap_err();

    assert!(matches!(err, CheckError::ParseError(_)));
    assert!(
        err.to_string()
            .contains(&temp_file.path().display().to_string())
    );
}
