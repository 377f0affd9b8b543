use crate::errors::{PusherError, StorageError};
use mockall::automock;

/// A single object write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUpload {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub acl: Option<String>,
    pub cache_control: Option<String>,
}

/// Remote object storage the pusher writes to.
#[automock]
pub trait ObjectStorePort: Send + Sync {
    fn put_object(&self, upload: ObjectUpload) -> Result<(), StorageError>;
    fn delete_objects(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError>;
}

/// Sink for discrete progress updates during an upload pass.
#[automock]
pub trait ProgressPort: Send {
    fn start(&mut self, total: usize);
    fn update(&mut self, current: usize, context: &str);
    fn stop(&mut self);
}

/// Stand-in for the build pipeline's "assets finalized" hook.
#[automock]
pub trait AssetSourcePort {
    /// Emitted asset names, in the order the pipeline enumerates them.
    fn emitted_assets(&self) -> Result<Vec<String>, PusherError>;
}
