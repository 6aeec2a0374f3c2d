//! Bundle data model, mirroring the bundle API wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// BundleState
// ---------------------------------------------------------------------------

/// Lifecycle state of a bundle.
///
/// Only `Approved` bundles are acted on by the scheduler; the publish pass
/// transitions them to `Published`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BundleState {
    Draft,
    InReview,
    Approved,
    Published,
}

impl BundleState {
    pub fn as_str(self) -> &'static str {
        match self {
            BundleState::Draft => "DRAFT",
            BundleState::InReview => "IN_REVIEW",
            BundleState::Approved => "APPROVED",
            BundleState::Published => "PUBLISHED",
        }
    }
}

impl fmt::Display for BundleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BundleType {
    Scheduled,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ManagedBy {
    DataAdmin,
    Wagtail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewTeam {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// A content release package as returned by the bundle API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,
    pub title: String,
    pub bundle_type: BundleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<User>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preview_teams: Vec<PreviewTeam>,
    /// Instant at which the bundle becomes eligible for publication. Manual
    /// bundles may carry no schedule at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub state: BundleState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub managed_by: ManagedBy,
}

impl Bundle {
    /// True when the bundle's scheduled instant has passed. A bundle with no
    /// schedule is never due.
    pub fn is_due(&self, at: DateTime<Utc>) -> bool {
        self.scheduled_at.is_some_and(|scheduled| scheduled <= at)
    }
}

// ---------------------------------------------------------------------------
// API response envelopes
// ---------------------------------------------------------------------------

/// Listing response. Items carry no concurrency token; the ETag is only
/// available via the per-bundle fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleList {
    #[serde(default)]
    pub items: Vec<Bundle>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
}

/// Per-bundle fetch response: the raw document plus its ETag.
///
/// The body is kept undecoded so a malformed document is a per-bundle failure
/// at the decode stage rather than a transport error.
#[derive(Debug, Clone)]
pub struct BundleDetail {
    pub body: Vec<u8>,
    pub etag: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
