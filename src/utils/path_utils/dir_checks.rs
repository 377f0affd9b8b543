use super::expansion::expand_tilde;
use std::fs;
use std::path::PathBuf;

/// Checks if a directory is readable.
///
/// # Errors
///
/// Returns an error if the directory does not exist, cannot be read, or metadata lookups fail.
pub fn check_readable_dir(dir: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(dir);
    let expanded_path = expand_tilde(&path)?;

    if expanded_path.is_dir()
        && fs::metadata(&expanded_path).is_ok()
        && fs::read_dir(&expanded_path).is_ok()
    {
        Ok(expanded_path)
    } else {
        Err(format!("The directory '{dir}' is not readable."))
    }
}
