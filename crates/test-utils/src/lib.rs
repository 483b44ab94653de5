pub mod builders;
pub mod fake_catalog;
pub mod recording_sink;

use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for one session test, from the catalog fetch to the final
/// save or close.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(2);

static INIT: Once = Once::new();

/// Route session and engine logs into the test harness's captured output.
///
/// Defaults to `info`; `RUST_LOG=pipeline_builder=debug` shows each edit and
/// catalog query.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await a session or catalog fetch, failing the test if it does not
/// finish within [`SESSION_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    match tokio::time::timeout(SESSION_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("session did not finish within {SESSION_TIMEOUT:?}"),
    }
}
