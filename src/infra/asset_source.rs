use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::PusherError;
use crate::ports::AssetSourcePort;

/// Every regular file under the build output directory, as `/`-separated relative names.
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSourcePort for FsAssetSource {
    fn emitted_assets(&self) -> Result<Vec<String>, PusherError> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| PusherError::AssetScan {
                path: self.root.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            names.push(relative_name(&self.root, entry.path())?);
        }
        Ok(names)
    }
}

/// Asset names handed over explicitly, e.g. on the command line.
pub struct ListedAssets {
    names: Vec<String>,
}

impl ListedAssets {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl AssetSourcePort for ListedAssets {
    fn emitted_assets(&self) -> Result<Vec<String>, PusherError> {
        Ok(self.names.clone())
    }
}

fn relative_name(root: &Path, path: &Path) -> Result<String, PusherError> {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut parts = Vec::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| PusherError::AssetScan {
                path: path.to_path_buf(),
                message: "path contains invalid UTF-8".to_string(),
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn walks_output_dir_in_sorted_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("js")).expect("mkdir");
        fs::write(dir.path().join("index.html"), "<html>").expect("write");
        fs::write(dir.path().join("js/app.js"), "x").expect("write");
        fs::write(dir.path().join("app.css"), "y").expect("write");

        let names = FsAssetSource::new(dir.path())
            .emitted_assets()
            .expect("scan");
        assert_eq!(names, vec!["app.css", "index.html", "js/app.js"]);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = FsAssetSource::new(dir.path().join("nope"));
        assert!(matches!(
            source.emitted_assets(),
            Err(PusherError::AssetScan { .. })
        ));
    }

    #[test]
    fn listed_assets_keep_their_order() {
        let names = vec!["b.css?x".to_string(), "a.js".to_string()];
        let source = ListedAssets::new(names.clone());
        assert_eq!(source.emitted_assets().expect("names"), names);
    }
}
