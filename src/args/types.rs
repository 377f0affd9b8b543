use clap::Parser;
use std::path::PathBuf;

use super::validators::validate;
use crate::config::PusherOptions;
use crate::utils::path_utils::{check_readable_dir, check_valid_json_file};

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file with plugin options; flags given on the command line take precedence
    #[arg(short = 'c', long, value_name = "FILE", value_parser = check_valid_json_file)]
    pub config: Option<PathBuf>,

    /// Build output directory the assets were written to
    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        default_value = ".",
        value_parser = check_readable_dir
    )]
    pub output_dir: PathBuf,

    /// Target bucket
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Storage region (defaults to us-west-2)
    #[arg(short, long)]
    pub region: Option<String>,

    /// Custom S3-compatible endpoint, e.g. http://localhost:9000
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Access key id for static credentials
    #[arg(long)]
    pub key: Option<String>,

    /// Secret access key for static credentials
    #[arg(long)]
    pub secret: Option<String>,

    /// Prefix prepended to every remote key
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Regex an emitted asset name must match to be uploaded
    #[arg(short, long)]
    pub include: Option<String>,

    /// Regex excluding emitted asset names from upload
    #[arg(short, long)]
    pub exclude: Option<String>,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Canned ACL applied to each uploaded object, e.g. public-read
    #[arg(long)]
    pub acl: Option<String>,

    /// Cache-Control header value applied to each uploaded object
    #[arg(long, value_name = "HEADER")]
    pub cache: Option<String>,

    /// Remote key to delete before uploading. Can be used multiple times.
    #[arg(long, value_name = "KEY")]
    pub remove: Vec<String>,

    /// Use path-style bucket addressing (needed by most custom endpoints)
    #[arg(long)]
    pub force_path_style: bool,

    /// Print extra stuff (use -v -v or --verbose --verbose for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Asset names relative to the output directory; when omitted every file in it is uploaded
    #[arg(value_name = "ASSET")]
    pub assets: Vec<String>,
}

impl Args {
    /// Check flag combinations clap cannot express
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are inconsistent.
    pub fn validate(&self) -> Result<(), String> {
        validate(self)
    }

    /// Options given as flags, to be layered over a config file
    #[must_use]
    pub fn to_options(&self) -> PusherOptions {
        PusherOptions {
            bucket: self.bucket.clone(),
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
            key: self.key.clone(),
            secret: self.secret.clone(),
            prefix: self.prefix.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            quiet: self.quiet,
            acl: self.acl.clone(),
            cache: self.cache.clone(),
            remove: self.remove.clone(),
            force_path_style: self.force_path_style,
            verbose: self.verbose,
        }
    }
}
