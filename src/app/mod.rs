use std::collections::HashSet;
use std::path::Path;

use crate::config::PusherConfig;
use crate::domain::UploadJob;
use crate::errors::PusherError;
use crate::ports::{ObjectStorePort, ObjectUpload, ProgressPort};
use crate::utils::log_utils::Logger;

/// Outcome of a successful upload pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub bucket: String,
    pub keys: Vec<String>,
}

/// Uploads the assets a build emits to a bucket, one at a time.
pub struct S3Pusher {
    config: PusherConfig,
    store: Box<dyn ObjectStorePort>,
    progress: Box<dyn ProgressPort>,
    logger: Logger,
    assets: Vec<String>,
}

impl S3Pusher {
    /// Build the pusher and run the configured startup deletions.
    ///
    /// A failed deletion is logged and otherwise ignored.
    pub fn new(
        config: PusherConfig,
        store: Box<dyn ObjectStorePort>,
        progress: Box<dyn ProgressPort>,
        logger: Logger,
    ) -> Self {
        let pusher = Self {
            config,
            store,
            progress,
            logger,
            assets: Vec::new(),
        };
        if let Err(e) = pusher.remove_paths() {
            pusher.logger.warn(&e.to_string());
        }
        pusher
    }

    /// Issue one batch delete for every configured removal key.
    ///
    /// # Errors
    /// Returns `PusherError::Delete` when the storage backend rejects the request.
    pub fn remove_paths(&self) -> Result<(), PusherError> {
        if self.config.remove.is_empty() {
            return Ok(());
        }
        self.logger.info(&format!(
            "Removing {} object(s) from '{}'",
            self.config.remove.len(),
            self.config.bucket
        ));
        self.store
            .delete_objects(&self.config.bucket, &self.config.remove)
            .map_err(|source| PusherError::Delete {
                bucket: self.config.bucket.clone(),
                count: self.config.remove.len(),
                source,
            })
    }

    /// Record the emitted names that pass the include/exclude filter, keeping their order.
    pub fn on_assets_emitted<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<String> = self.assets.iter().cloned().collect();
        for name in names {
            let name = name.as_ref();
            if !self.config.filter.should_upload(name) {
                self.logger.debug(&format!("Skipping {name}"));
                continue;
            }
            if seen.insert(name.to_string()) {
                self.assets.push(name.to_string());
            }
        }
    }

    /// Assets recorded for the next pass.
    #[must_use]
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Upload every recorded asset from `output_dir`, stopping at the first failure.
    ///
    /// The progress sink is stopped on every exit path.
    ///
    /// # Errors
    /// Returns the first local read or remote write error; later assets are not attempted.
    pub fn after_emit(&mut self, output_dir: &Path) -> Result<UploadSummary, PusherError> {
        let assets = std::mem::take(&mut self.assets);

        self.logger.normal(&format!(
            "Uploading {} assets to '{}'...",
            assets.len(),
            self.config.bucket
        ));

        self.progress.start(assets.len());
        let result = self.upload_all(output_dir, &assets);
        self.progress.stop();

        let summary = result?;
        self.logger.normal("Finished!");
        Ok(summary)
    }

    fn upload_all(
        &mut self,
        output_dir: &Path,
        assets: &[String],
    ) -> Result<UploadSummary, PusherError> {
        let mut summary = UploadSummary {
            bucket: self.config.bucket.clone(),
            keys: Vec::with_capacity(assets.len()),
        };

        for (idx, asset) in assets.iter().enumerate() {
            let job = UploadJob::load(output_dir, asset, self.config.prefix.as_deref())?;
            self.logger.debug(&format!(
                "{} -> {} ({} bytes, {})",
                job.local_path.display(),
                job.key,
                job.body.len(),
                job.content_type.as_deref().unwrap_or("no content type")
            ));

            self.store
                .put_object(ObjectUpload {
                    bucket: self.config.bucket.clone(),
                    key: job.key.clone(),
                    body: job.body,
                    content_type: job.content_type,
                    acl: self.config.acl.clone(),
                    cache_control: self.config.cache_control.clone(),
                })
                .map_err(|source| PusherError::Upload {
                    key: job.key.clone(),
                    bucket: self.config.bucket.clone(),
                    source,
                })?;

            self.progress.update(idx + 1, &job.name);
            summary.keys.push(job.key);
        }

        Ok(summary)
    }
}
