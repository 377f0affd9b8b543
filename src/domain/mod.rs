//! Asset naming and filtering rules shared by the orchestrator and adapters.

use crate::errors::PusherError;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Strip leading and trailing `/` from a key.
///
/// Every slash run at either end is removed (`//a.js` becomes `a.js`, not
/// `/a.js`), so applying it twice yields the same result as applying it once.
#[must_use]
pub fn remove_slashes(key: &str) -> &str {
    key.trim_matches('/')
}

/// Drop a `?query` suffix some bundlers append to emitted asset names.
#[must_use]
pub fn strip_query(filename: &str) -> &str {
    filename.split('?').next().unwrap_or(filename)
}

/// Relative asset path used both on disk and as the unprefixed remote key.
#[must_use]
pub fn normalized_name(filename: &str) -> &str {
    remove_slashes(strip_query(filename))
}

/// Remote key for an emitted asset. `prefix` is expected to be slash-trimmed already.
#[must_use]
pub fn remote_key(filename: &str, prefix: Option<&str>) -> String {
    let name = normalized_name(filename);
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}/{name}"),
        _ => name.to_string(),
    }
}

/// Location of an emitted asset inside the build output directory.
#[must_use]
pub fn local_path(output_dir: &Path, filename: &str) -> PathBuf {
    output_dir.join(normalized_name(filename))
}

// Entries where mime_guess disagrees with the mime-db table build tools use
const CONTENT_TYPE_OVERRIDES: &[(&str, &str)] = &[
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
];

/// Content type sniffed from the key's extension, if one is known.
#[must_use]
pub fn content_type_for(key: &str) -> Option<String> {
    let ext = Path::new(key).extension().and_then(|e| e.to_str());
    if let Some(ext) = ext
        && let Some((_, ct)) = CONTENT_TYPE_OVERRIDES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
    {
        return Some((*ct).to_string());
    }
    mime_guess::from_path(key).first_raw().map(str::to_string)
}

/// Include/exclude rules applied to raw emitted asset names.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl AssetFilter {
    #[must_use]
    pub fn new(include: Option<Regex>, exclude: Option<Regex>) -> Self {
        Self { include, exclude }
    }

    /// True when the name matches `include` (if set) and does not match `exclude` (if set).
    #[must_use]
    pub fn should_upload(&self, filename: &str) -> bool {
        self.include.as_ref().is_none_or(|re| re.is_match(filename))
            && self.exclude.as_ref().is_none_or(|re| !re.is_match(filename))
    }
}

/// One asset ready to be written to the bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub name: String,
    pub key: String,
    pub local_path: PathBuf,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl UploadJob {
    /// Read the asset from `output_dir` and resolve its remote key and content type.
    ///
    /// # Errors
    /// Returns `PusherError::ReadAsset` when the local file cannot be read.
    pub fn load(
        output_dir: &Path,
        filename: &str,
        prefix: Option<&str>,
    ) -> Result<Self, PusherError> {
        let local_path = local_path(output_dir, filename);
        let body = std::fs::read(&local_path).map_err(|source| PusherError::ReadAsset {
            path: local_path.clone(),
            source,
        })?;
        let key = remote_key(filename, prefix);
        let content_type = content_type_for(&key);
        Ok(Self {
            name: normalized_name(filename).to_string(),
            key,
            local_path,
            body,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: Option<&str>, exclude: Option<&str>) -> AssetFilter {
        AssetFilter::new(
            include.map(|p| Regex::new(p).expect("include regex")),
            exclude.map(|p| Regex::new(p).expect("exclude regex")),
        )
    }

    #[test]
    fn remove_slashes_is_idempotent() {
        for key in ["/a/b/", "a/b", "//a//", "/", "", "plain", "dir/"] {
            let once = remove_slashes(key);
            assert_eq!(remove_slashes(once), once, "key {key:?}");
        }
        assert_eq!(remove_slashes("/v1/"), "v1");
        assert_eq!(remove_slashes("js/app.js"), "js/app.js");
        assert_eq!(remove_slashes("//a.js"), "a.js");
    }

    #[test]
    fn no_patterns_uploads_everything() {
        let f = AssetFilter::default();
        for name in ["app.js", "LICENSE", "img/logo.png?v=3", ""] {
            assert!(f.should_upload(name), "{name}");
        }
    }

    #[test]
    fn include_and_exclude_combine() {
        let f = filter(Some(r"\.css$"), Some("vendor"));
        assert!(f.should_upload("app.css"));
        assert!(!f.should_upload("vendor/app.css"));
        assert!(!f.should_upload("app.js"));
    }

    #[test]
    fn patterns_see_the_raw_name() {
        let f = filter(Some(r"\.css$"), None);
        assert!(!f.should_upload("app.css?id=abc"));
        let f = filter(None, Some(r"\?"));
        assert!(!f.should_upload("app.css?id=abc"));
    }

    #[test]
    fn extensionless_names_are_testable() {
        let f = filter(Some("^LICENSE"), None);
        assert!(f.should_upload("LICENSE"));
        assert!(!f.should_upload("README"));
    }

    #[test]
    fn remote_key_strips_query_and_applies_prefix() {
        assert_eq!(remote_key("js/app.js?hash123", Some("static")), "static/js/app.js");
        assert_eq!(remote_key("/css/site.css", None), "css/site.css");
        assert_eq!(remote_key("index.html", None), "index.html");
        assert_eq!(remote_key("index.html", Some("")), "index.html");
    }

    #[test]
    fn local_path_uses_normalized_name() {
        let p = local_path(Path::new("/out"), "/js/app.js?x=1");
        assert_eq!(p, PathBuf::from("/out/js/app.js"));
    }

    #[test]
    fn content_type_sniffing() {
        assert_eq!(content_type_for("v1/b.css").as_deref(), Some("text/css"));
        assert_eq!(
            content_type_for("v1/a.js").as_deref(),
            Some("application/javascript")
        );
        assert_eq!(
            content_type_for("chunks/entry.MJS").as_deref(),
            Some("application/javascript")
        );
        assert_eq!(content_type_for("index.html").as_deref(), Some("text/html"));
        assert_eq!(content_type_for("LICENSE"), None);
    }
}
