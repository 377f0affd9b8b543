use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectCannedAcl, ObjectIdentifier};

use crate::config::StorageSettings;
use crate::errors::{PusherError, StorageError};
use crate::ports::{ObjectStorePort, ObjectUpload};
use crate::utils::log_utils::Logger;

/// S3 (or S3-compatible) bucket access through the AWS SDK.
pub struct S3ObjectStore {
    client: Client,
    runtime: tokio::runtime::Runtime,
    logger: Logger,
}

impl S3ObjectStore {
    /// Create a client from the configured region, endpoint and credentials.
    ///
    /// Without static credentials the default AWS provider chain is used.
    ///
    /// # Errors
    /// Returns an error if the async runtime cannot be created.
    pub fn new(settings: &StorageSettings, logger: Logger) -> Result<Self, PusherError> {
        // Reused for every request this store makes
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| PusherError::Runtime(format!("Failed to create runtime: {e}")))?;

        logger.debug("Creating S3 client with these parameters:");
        logger.debug(&format!("Region: {}", settings.region));
        logger.debug(&format!(
            "Endpoint: {}",
            settings.endpoint.as_deref().unwrap_or("(default)")
        ));
        logger.debug(&format!("Credentials: {:?}", settings.credentials));

        let sdk_config = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(settings.region.clone()));

            if let Some(endpoint) = &settings.endpoint {
                loader = loader.endpoint_url(endpoint.clone());
            }

            if let Some(creds) = &settings.credentials {
                loader = loader.credentials_provider(Credentials::new(
                    creds.key.clone(),
                    creds.secret.clone(),
                    None, // No session token
                    None, // No expiry
                    "S3PusherStaticCredentials",
                ));
            }

            loader.load().await
        });

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.force_path_style)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            runtime,
            logger,
        })
    }
}

impl ObjectStorePort for S3ObjectStore {
    fn put_object(&self, upload: ObjectUpload) -> Result<(), StorageError> {
        let ObjectUpload {
            bucket,
            key,
            body,
            content_type,
            acl,
            cache_control,
        } = upload;

        self.runtime
            .block_on(async {
                self.client
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .body(ByteStream::from(body))
                    .set_content_type(content_type)
                    .set_acl(acl.as_deref().map(ObjectCannedAcl::from))
                    .set_cache_control(cache_control)
                    .send()
                    .await
            })
            .map(|_| ())
            .map_err(|e| sdk_error(&e))
    }

    fn delete_objects(&self, bucket: &str, keys: &[String]) -> Result<(), StorageError> {
        let objects = keys
            .iter()
            .map(|k| ObjectIdentifier::builder().key(k).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::new("BuildError", e.to_string()))?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(false)
            .build()
            .map_err(|e| StorageError::new("BuildError", e.to_string()))?;

        let output = self
            .runtime
            .block_on(async {
                self.client
                    .delete_objects()
                    .bucket(bucket)
                    .delete(delete)
                    .send()
                    .await
            })
            .map_err(|e| sdk_error(&e))?;

        for deleted in output.deleted() {
            self.logger
                .debug(&format!("Deleted {}", deleted.key().unwrap_or("(unknown)")));
        }

        // DeleteObjects answers 200 even when individual keys fail
        let errors = output.errors();
        if let Some(first) = errors.first() {
            return Err(StorageError::new(
                first.code().unwrap_or("DeleteError"),
                format!(
                    "{} of {} key(s) not deleted, first was '{}': {}",
                    errors.len(),
                    keys.len(),
                    first.key().unwrap_or("(unknown)"),
                    first.message().unwrap_or("no message")
                ),
            ));
        }

        Ok(())
    }
}

fn sdk_error<E>(err: &E) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let name = err.code().unwrap_or("SdkError");
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(err).to_string(),
    };
    StorageError::new(name, message)
}
