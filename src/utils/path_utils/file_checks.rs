use super::expansion::expand_tilde;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Checks that a file holds a single JSON object
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object.
pub fn check_valid_json_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    let expanded_path = expand_tilde(&path)?;

    let content =
        fs::read_to_string(&expanded_path).map_err(|e| format!("Unable to read '{file}': {e}"))?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| format!("Invalid JSON in '{file}': {e}"))?;

    if value.is_object() {
        Ok(expanded_path)
    } else {
        Err(format!("'{file}' must contain a JSON object."))
    }
}
