// Selector list loading

use std::fs;
use std::path::Path;
use tagcheck_scanner::CheckError;
use tagcheck_scanner::error::Result;
use tagcheck_scanner::fetcher::ensure_file_exists;
use tracing::debug;

/// Parse a JSON array of selector strings and return it sorted ascending
pub fn parse_checks(content: &str) -> Result<Vec<String>> {
    let mut checks: Vec<String> = serde_json::from_str(content)
        .map_err(|e| CheckError::ParseError(format!("expected a JSON array of strings: {}", e)))?;
    checks.sort();
    Ok(checks)
}

/// Load the selector list stored at `path`
pub fn load_checks(path: &Path) -> Result<Vec<String>> {
    ensure_file_exists(path)?;

    let content = fs::read_to_string(path)?;
    let checks = parse_checks(&content).map_err(|e| match e {
        CheckError::ParseError(msg) => {
            CheckError::ParseError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    debug!("Loaded {} selectors from {}", checks.len(), path.display());
    Ok(checks)
}
