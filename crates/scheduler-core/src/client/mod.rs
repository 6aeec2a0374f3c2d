//! Bundle API client capability.
//!
//! The publisher depends on the [`BundleClient`] trait rather than a concrete
//! transport, so tests can substitute a scripted client. [`HttpBundleClient`]
//! is the production implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::bundle::{Bundle, BundleDetail, BundleList, BundleState};

mod http;

pub use http::HttpBundleClient;

// ---------------------------------------------------------------------------
// ClientError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ClientError {
    /// The bundle API answered with a non-success HTTP status.
    #[error("bundle API returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a usable response (connection, timeout,
    /// or body-decoding failure inside the transport).
    #[error("bundle API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// True when the API signalled "no matching resource" (HTTP 404). The
    /// listing endpoint reports an empty candidate set this way, so callers
    /// must treat it as "nothing to do" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

// ---------------------------------------------------------------------------
// BundleClient
// ---------------------------------------------------------------------------

/// Abstract capability over the remote bundle API.
#[async_trait]
pub trait BundleClient: Send + Sync {
    /// List bundles scheduled for release at or before `not_after`.
    async fn list_scheduled(
        &self,
        auth_token: &str,
        not_after: DateTime<Utc>,
    ) -> Result<BundleList, ClientError>;

    /// Fetch a single bundle, returning the raw document plus its ETag.
    /// The listing response carries no ETags, so this extra round trip is
    /// required before any conditional update.
    async fn fetch_bundle(&self, auth_token: &str, id: &str) -> Result<BundleDetail, ClientError>;

    /// Conditionally transition a bundle's lifecycle state. `if_match` must
    /// be the ETag most recently observed for this bundle; the API rejects
    /// the update when the token is stale rather than overwriting.
    async fn update_state(
        &self,
        auth_token: &str,
        id: &str,
        if_match: &str,
        state: BundleState,
    ) -> Result<Bundle, ClientError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
