use super::types::Args;

/// Validate argument combinations
///
/// # Errors
///
/// Returns an error message naming the offending flag.
pub fn validate(args: &Args) -> Result<(), String> {
    if args.config.is_none() && args.bucket.as_deref().is_none_or(|b| b.trim().is_empty()) {
        return Err("--bucket is required unless --config provides it.".to_string());
    }

    if args.key.is_some() != args.secret.is_some() && args.config.is_none() {
        return Err("--key and --secret must be given together.".to_string());
    }

    if args.quiet && args.verbose > 0 {
        return Err("--quiet and --verbose cannot be combined.".to_string());
    }

    Ok(())
}
