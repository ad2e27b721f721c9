//! Logging setup.
//!
//! The library only emits `tracing` events and spans. Applications that want
//! them printed call [`init_tracing`] once per process.
//!
//! Spans carry lengths and public digests only. Secrets, nonces and blindings
//! are never recorded.

use crate::hash::hash;
use std::fmt;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global compact subscriber filtered by `RUST_LOG` (default `zkbox=info`).
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zkbox=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .try_init()?;

    info!("zkbox logging initialized");
    Ok(())
}

/// Render bytes for a log line without exposing their content
#[must_use]
pub fn sanitize_data(data: &[u8]) -> SanitizedData<'_> {
    SanitizedData(data)
}

/// Display wrapper returned by [`sanitize_data`]
pub struct SanitizedData<'a>(&'a [u8]);

impl fmt::Display for SanitizedData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() <= 32 {
            write!(f, "[{} bytes]", self.0.len())
        } else {
            let digest = hex::encode(hash(self.0));
            write!(f, "[{} bytes, hash: {}]", self.0.len(), &digest[..16])
        }
    }
}

/// Short hex prefix of a public digest, for span fields
pub(crate) fn digest_prefix(digest: &[u8]) -> String {
    hex::encode(&digest[..digest.len().min(8)])
}
