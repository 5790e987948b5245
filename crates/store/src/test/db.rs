//! Database test utilities and shared infrastructure

use std::{
    future::Future,
    panic::{self, AssertUnwindSafe},
};

use futures::FutureExt;
use mongodb::error::{Error, ErrorKind};
use once_cell::sync::Lazy;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::mongo::Mongo;
use testresult::TestResult;
use tokio::{
    runtime::{Builder, Runtime},
    sync::{Mutex, OnceCell},
};
use tracing::{debug, warn};

use crate::database::{self, Db};

use super::TestContext;

/// Database every test in the binary shares.
const TEST_DATABASE: &str = "store_test";

/// Server error code for a missing collection or database.
const NAMESPACE_NOT_FOUND: i32 = 26;

/// Runtime owning the session client.
///
/// The driver's background tasks live on the runtime that created the client,
/// so every test body runs here rather than on a per-test runtime.
static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build test session runtime")
});

/// Session database, connected on first use and reused by every test.
static SESSION: OnceCell<TestSession> = OnceCell::const_new();

/// Held for the duration of a test plus its cleanup; tests share one database.
static SERIAL: Mutex<()> = Mutex::const_new(());

struct TestSession {
    db: Db,
    _container: Option<ContainerAsync<Mongo>>,
}

impl TestSession {
    /// Connect to `MONGODB_TEST_URL` when set, otherwise start a container.
    async fn start() -> Self {
        if let Ok(url) = std::env::var("MONGODB_TEST_URL") {
            let db = database::connect(&url, Some(TEST_DATABASE))
                .await
                .expect("Failed to connect to MONGODB_TEST_URL");

            return Self {
                db,
                _container: None,
            };
        }

        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get container port");

        let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
            .unwrap_or_else(|_| "localhost".to_string());

        let db = database::connect(&format!("mongodb://{host}:{port}"), Some(TEST_DATABASE))
            .await
            .expect("Failed to connect to MongoDB container");

        Self {
            db,
            _container: Some(container),
        }
    }
}

/// Run a database-backed test against the session database.
///
/// Collections are cleared once the test finishes, whether it returned an
/// error, succeeded or panicked. A panic is re-raised after cleanup.
pub(crate) fn run<F, Fut>(test: F) -> TestResult
where
    F: FnOnce(TestContext) -> Fut,
    Fut: Future<Output = TestResult>,
{
    RUNTIME.block_on(async move {
        let _serial = SERIAL.lock().await;

        let session = SESSION.get_or_init(TestSession::start).await;

        let outcome = AssertUnwindSafe(test(TestContext::new(session.db.clone())))
            .catch_unwind()
            .await;

        clear_collections(&session.db).await;

        match outcome {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

/// Empty every non-system collection. Never fails.
pub(crate) async fn clear_collections(db: &Db) {
    match db.purge_collections().await {
        Ok(removed) => debug!(removed, "cleared test collections"),
        Err(error) if is_expected_cleanup_error(&error) => {
            debug!("skipped test collection cleanup: {error}");
        }
        Err(error) => warn!("failed to clear test collections: {error}"),
    }
}

fn is_expected_cleanup_error(error: &Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Command(command) if command.code == NAMESPACE_NOT_FOUND
    )
}

#[cfg(test)]
mod tests {
    use std::io;

    use mongodb::bson::doc;

    use super::*;

    #[test]
    fn test_purge_clears_user_collections_and_spares_system_ones() -> TestResult {
        run(|ctx| async move {
            ctx.db
                .collection("widgets")
                .insert_many([doc! { "n": 1 }, doc! { "n": 2 }])
                .await?;

            let reserved = ctx.db.collection("system_settings");
            reserved.insert_one(doc! { "keep": true }).await?;

            let removed = ctx.db.purge_collections().await?;

            let widgets = ctx.db.collection("widgets").count_documents(doc! {}).await?;
            let kept = reserved.count_documents(doc! {}).await?;

            reserved.drop().await?;

            assert!(removed >= 2, "expected both widgets to be removed");
            assert_eq!(widgets, 0);
            assert_eq!(kept, 1);

            Ok(())
        })
    }

    #[test]
    fn test_collections_are_cleared_after_a_panicking_test() -> TestResult {
        let outcome = panic::catch_unwind(|| {
            run(|ctx| async move {
                ctx.db
                    .collection("widgets")
                    .insert_one(doc! { "n": 1 })
                    .await?;

                panic!("deliberate failure after inserting");
            })
        });

        assert!(outcome.is_err(), "the panic should propagate to the caller");

        run(|ctx| async move {
            let remaining = ctx.db.collection("widgets").count_documents(doc! {}).await?;

            assert_eq!(remaining, 0);

            Ok(())
        })
    }

    #[tokio::test]
    async fn test_cleanup_swallows_unreachable_server() -> TestResult {
        let db = database::connect(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200",
            Some(TEST_DATABASE),
        )
        .await?;

        clear_collections(&db).await;

        assert!(
            db.purge_collections().await.is_err(),
            "listing collections on an unreachable server should fail"
        );

        Ok(())
    }

    #[test]
    fn test_io_errors_are_not_expected_cleanup_errors() {
        let error = Error::from(io::Error::other("connection reset"));

        assert!(!is_expected_cleanup_error(&error));
    }
}
