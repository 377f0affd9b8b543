use crate::domain::{AssetFilter, remove_slashes};
use crate::errors::PusherError;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_REGION: &str = "us-west-2";

/// Raw plugin options, as written in a JSON config file or assembled from flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PusherOptions {
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
    pub prefix: Option<String>,
    pub include: Option<String>,
    pub exclude: Option<String>,
    #[serde(default)]
    pub quiet: bool,
    pub acl: Option<String>,
    pub cache: Option<String>,
    #[serde(default)]
    pub remove: Vec<String>,
    #[serde(default)]
    pub force_path_style: bool,
    #[serde(default)]
    pub verbose: u8,
}

impl PusherOptions {
    /// Load options from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid options object.
    pub fn from_json_file(path: &Path) -> Result<Self, PusherError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PusherError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| PusherError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay `other` on top of `self`; any value set in `other` wins.
    #[must_use]
    pub fn merge(self, other: PusherOptions) -> Self {
        Self {
            bucket: other.bucket.or(self.bucket),
            region: other.region.or(self.region),
            endpoint: other.endpoint.or(self.endpoint),
            key: other.key.or(self.key),
            secret: other.secret.or(self.secret),
            prefix: other.prefix.or(self.prefix),
            include: other.include.or(self.include),
            exclude: other.exclude.or(self.exclude),
            quiet: other.quiet || self.quiet,
            acl: other.acl.or(self.acl),
            cache: other.cache.or(self.cache),
            remove: if other.remove.is_empty() {
                self.remove
            } else {
                other.remove
            },
            force_path_style: other.force_path_style || self.force_path_style,
            verbose: other.verbose.max(self.verbose),
        }
    }
}

/// Static access key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub key: String,
    pub secret: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("key", &format!("{}****", self.key.chars().take(4).collect::<String>()))
            .field("secret", &"****")
            .finish()
    }
}

/// Connection settings for the storage client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub region: String,
    pub endpoint: Option<String>,
    pub credentials: Option<StaticCredentials>,
    pub force_path_style: bool,
}

/// Validated, immutable plugin configuration.
#[derive(Debug, Clone)]
pub struct PusherConfig {
    pub bucket: String,
    pub storage: StorageSettings,
    pub prefix: Option<String>,
    pub filter: AssetFilter,
    pub quiet: bool,
    pub verbose: u8,
    pub acl: Option<String>,
    pub cache_control: Option<String>,
    pub remove: Vec<String>,
}

impl PusherConfig {
    /// Validate raw options.
    ///
    /// # Errors
    /// Fails on a missing bucket, an invalid include/exclude pattern, or a
    /// credential pair with only one half present.
    pub fn from_options(options: PusherOptions) -> Result<Self, PusherError> {
        let bucket = non_empty(options.bucket).ok_or(PusherError::MissingBucket)?;

        let credentials = match (non_empty(options.key), non_empty(options.secret)) {
            (Some(key), Some(secret)) => Some(StaticCredentials { key, secret }),
            (None, None) => None,
            _ => return Err(PusherError::PartialCredentials),
        };

        let include = compile("include", options.include)?;
        let exclude = compile("exclude", options.exclude)?;

        let prefix = options
            .prefix
            .as_deref()
            .map(remove_slashes)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let remove = options
            .remove
            .iter()
            .map(|k| remove_slashes(k))
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            bucket,
            storage: StorageSettings {
                region: non_empty(options.region).unwrap_or_else(|| DEFAULT_REGION.to_string()),
                endpoint: non_empty(options.endpoint),
                credentials,
                force_path_style: options.force_path_style,
            },
            prefix,
            filter: AssetFilter::new(include, exclude),
            quiet: options.quiet,
            verbose: options.verbose,
            acl: non_empty(options.acl),
            cache_control: non_empty(options.cache),
            remove,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn compile(which: &'static str, pattern: Option<String>) -> Result<Option<Regex>, PusherError> {
    match non_empty(pattern) {
        Some(pattern) => Regex::new(&pattern)
            .map(Some)
            .map_err(|source| PusherError::InvalidPattern {
                which,
                pattern,
                source,
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(bucket: &str) -> PusherOptions {
        PusherOptions {
            bucket: Some(bucket.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_bucket_fails_fast() {
        let err = PusherConfig::from_options(PusherOptions::default()).unwrap_err();
        assert!(matches!(err, PusherError::MissingBucket));
        let err = PusherConfig::from_options(opts("  ")).unwrap_err();
        assert!(matches!(err, PusherError::MissingBucket));
    }

    #[test]
    fn defaults_region_and_trims_prefix() {
        let config = PusherConfig::from_options(PusherOptions {
            prefix: Some("/v1/".into()),
            ..opts("b")
        })
        .expect("valid config");
        assert_eq!(config.storage.region, DEFAULT_REGION);
        assert_eq!(config.prefix.as_deref(), Some("v1"));
        assert!(config.storage.credentials.is_none());
    }

    #[test]
    fn slash_only_prefix_means_no_prefix() {
        let config = PusherConfig::from_options(PusherOptions {
            prefix: Some("/".into()),
            ..opts("b")
        })
        .expect("valid config");
        assert_eq!(config.prefix, None);
    }

    #[test]
    fn bad_pattern_is_reported() {
        let err = PusherConfig::from_options(PusherOptions {
            exclude: Some("(unclosed".into()),
            ..opts("b")
        })
        .unwrap_err();
        assert!(matches!(err, PusherError::InvalidPattern { which: "exclude", .. }));
    }

    #[test]
    fn half_a_credential_pair_is_rejected() {
        let err = PusherConfig::from_options(PusherOptions {
            key: Some("AKIA".into()),
            ..opts("b")
        })
        .unwrap_err();
        assert!(matches!(err, PusherError::PartialCredentials));
    }

    #[test]
    fn remove_keys_are_slash_trimmed() {
        let config = PusherConfig::from_options(PusherOptions {
            remove: vec!["/old1.js".into(), "old2.js/".into(), "/".into()],
            ..opts("b")
        })
        .expect("valid config");
        assert_eq!(config.remove, vec!["old1.js", "old2.js"]);
    }

    #[test]
    fn flags_override_file_values() {
        let file = PusherOptions {
            bucket: Some("from-file".into()),
            region: Some("eu-west-1".into()),
            remove: vec!["a".into()],
            ..Default::default()
        };
        let flags = PusherOptions {
            bucket: Some("from-flags".into()),
            quiet: true,
            ..Default::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.bucket.as_deref(), Some("from-flags"));
        assert_eq!(merged.region.as_deref(), Some("eu-west-1"));
        assert_eq!(merged.remove, vec!["a".to_string()]);
        assert!(merged.quiet);
    }

    #[test]
    fn parses_json_options() {
        let parsed: PusherOptions = serde_json::from_str(
            r#"{"bucket":"b","prefix":"static","include":"\\.js$","remove":["x.js"],"quiet":true}"#,
        )
        .expect("json");
        assert_eq!(parsed.bucket.as_deref(), Some("b"));
        assert_eq!(parsed.include.as_deref(), Some(r"\.js$"));
        assert!(parsed.quiet);
        assert!(serde_json::from_str::<PusherOptions>(r#"{"buckt":"b"}"#).is_err());
    }
}
