use std::fs;

use s3_asset_pusher::ports::{MockObjectStorePort, MockProgressPort, ObjectUpload};
use s3_asset_pusher::utils::log_utils::Logger;
use s3_asset_pusher::{PusherConfig, PusherError, PusherOptions, S3Pusher, StorageError};

fn pusher(store: MockObjectStorePort, progress: MockProgressPort) -> S3Pusher {
    let config = PusherConfig::from_options(PusherOptions {
        bucket: Some("b".into()),
        ..Default::default()
    })
    .expect("valid config");
    S3Pusher::new(config, Box::new(store), Box::new(progress), Logger::quiet())
}

#[test]
fn first_remote_failure_stops_the_pass() -> Result<(), Box<dyn std::error::Error>> {
    let out = tempfile::tempdir()?;
    for name in ["a.js", "b.js", "c.js"] {
        fs::write(out.path().join(name), name)?;
    }

    let mut store = MockObjectStorePort::new();
    store
        .expect_put_object()
        .withf(|u: &ObjectUpload| u.key == "a.js")
        .times(1)
        .returning(|_| Ok(()));
    store
        .expect_put_object()
        .withf(|u: &ObjectUpload| u.key == "b.js")
        .times(1)
        .returning(|_| Err(StorageError::new("AccessDenied", "Access Denied")));
    store
        .expect_put_object()
        .withf(|u: &ObjectUpload| u.key == "c.js")
        .never();

    let mut progress = MockProgressPort::new();
    progress.expect_start().times(1).return_const(());
    progress
        .expect_update()
        .withf(|current, context| *current == 1 && context.to_string() == "a.js")
        .times(1)
        .return_const(());
    progress.expect_stop().times(1).return_const(());

    let mut pusher = pusher(store, progress);
    pusher.on_assets_emitted(["a.js", "b.js", "c.js"]);

    let err = pusher.after_emit(out.path()).unwrap_err();
    match &err {
        PusherError::Upload {
            key,
            bucket,
            source,
        } => {
            assert_eq!(key, "b.js");
            assert_eq!(bucket, "b");
            assert_eq!(source.name, "AccessDenied");
        }
        other => panic!("expected upload error, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Could not upload b.js to b: AccessDenied - Access Denied"
    );
    Ok(())
}

#[test]
fn missing_local_file_fails_before_any_remote_call() -> Result<(), Box<dyn std::error::Error>> {
    let out = tempfile::tempdir()?;
    fs::write(out.path().join("present.js"), "1")?;

    let mut store = MockObjectStorePort::new();
    store.expect_put_object().never();

    let mut progress = MockProgressPort::new();
    progress.expect_start().times(1).return_const(());
    progress.expect_update().never();
    progress.expect_stop().times(1).return_const(());

    let mut pusher = pusher(store, progress);
    pusher.on_assets_emitted(["gone.js", "present.js"]);

    let err = pusher.after_emit(out.path()).unwrap_err();
    match err {
        PusherError::ReadAsset { path, .. } => {
            assert_eq!(path, out.path().join("gone.js"));
        }
        other => panic!("expected read error, got {other:?}"),
    }
    Ok(())
}
