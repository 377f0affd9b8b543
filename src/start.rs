use std::path::Path;

use crate::Args;
use crate::app::{S3Pusher, UploadSummary};
use crate::config::{PusherConfig, PusherOptions};
use crate::errors::PusherError;
use crate::infra::{
    FsAssetSource, HiddenProgress, ListedAssets, S3ObjectStore, TerminalProgressBar,
    interrupt_adapter,
};
use crate::ports::{AssetSourcePort, ObjectStorePort, ProgressPort};
use crate::utils::log_utils::Logger;

/// Merge the optional config file with command-line flags (flags win).
///
/// # Errors
/// Returns an error if the config file cannot be read or parsed.
pub fn load_options(args: &Args) -> Result<PusherOptions, PusherError> {
    let base = match &args.config {
        Some(path) => PusherOptions::from_json_file(path)?,
        None => PusherOptions::default(),
    };
    Ok(base.merge(args.to_options()))
}

/// Entry point for the binary: validate config, connect, discover and upload.
///
/// # Errors
/// Returns the configuration, scan, read or upload error that stopped the run.
pub fn run_app(args: &Args) -> Result<UploadSummary, PusherError> {
    let config = PusherConfig::from_options(load_options(args)?)?;
    let logger = Logger::new(config.verbose).with_quiet(config.quiet);

    let store = S3ObjectStore::new(&config.storage, logger.clone())?;

    let progress: Box<dyn ProgressPort> = if config.quiet {
        Box::new(HiddenProgress)
    } else {
        if let Err(e) = interrupt_adapter::restore_cursor_on_interrupt() {
            logger.warn(&e.to_string());
        }
        Box::new(TerminalProgressBar::new())
    };

    let source: Box<dyn AssetSourcePort> = if args.assets.is_empty() {
        logger.info(&format!("Scanning {}", args.output_dir.display()));
        Box::new(FsAssetSource::new(&args.output_dir))
    } else {
        Box::new(ListedAssets::new(args.assets.clone()))
    };

    run_with(
        config,
        Box::new(store),
        progress,
        source.as_ref(),
        &args.output_dir,
        logger,
    )
}

/// Drive one build's worth of hooks against the given collaborators.
///
/// # Errors
/// Returns the first error raised while enumerating or uploading assets.
pub fn run_with(
    config: PusherConfig,
    store: Box<dyn ObjectStorePort>,
    progress: Box<dyn ProgressPort>,
    source: &dyn AssetSourcePort,
    output_dir: &Path,
    logger: Logger,
) -> Result<UploadSummary, PusherError> {
    let mut pusher = S3Pusher::new(config, store, progress, logger);
    pusher.on_assets_emitted(source.emitted_assets()?);
    pusher.after_emit(output_dir)
}
