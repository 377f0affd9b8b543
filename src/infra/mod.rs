pub mod asset_source;
pub mod interrupt_adapter;
pub mod progress_adapter;
pub mod s3_adapter;

pub use asset_source::{FsAssetSource, ListedAssets};
pub use progress_adapter::{HiddenProgress, TerminalProgressBar};
pub use s3_adapter::S3ObjectStore;
