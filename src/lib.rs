pub mod app;
pub mod args;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod ports;
pub mod start;
pub mod utils;

pub use app::{S3Pusher, UploadSummary};
pub use args::Args;
pub use config::{PusherConfig, PusherOptions};
pub use errors::{PusherError, StorageError};
pub use start::run_app;
