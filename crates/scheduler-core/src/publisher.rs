//! Publish orchestrator: one complete pass of "find due, approved bundles
//! and publish them".
//!
//! The pass tolerates per-bundle failures. A bundle whose fetch, decode, or
//! update fails never blocks the rest of the batch; only a listing-stage
//! error aborts the pass.

use std::sync::Arc;

use chrono::{DurationRound, TimeDelta, Utc};
use tracing::{error, info, warn};

use crate::bundle::{Bundle, BundleState};
use crate::client::BundleClient;
use crate::config::Config;
use crate::error::{Result, SchedulerError};

// ---------------------------------------------------------------------------
// PublishOutcome / PublishResult
// ---------------------------------------------------------------------------

/// Per-bundle record of an attempted state transition.
///
/// Produced only for bundles that reach the update stage. Candidates filtered
/// out earlier (fetch failure, decode failure, not yet due, wrong state)
/// leave no record at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub bundle_id: String,
    pub success: bool,
    /// Reserved for a failure description. Update errors are currently only
    /// logged, so this stays `None`; callers can see which bundles failed
    /// but not why.
    pub error: Option<String>,
}

/// Aggregate result of one publish pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishResult {
    pub outcomes: Vec<PublishOutcome>,
    /// True whenever the listing stage succeeded and the batch ran to
    /// completion, regardless of individual outcomes. Callers must inspect
    /// `outcomes` to detect partial failure.
    pub success: bool,
}

impl PublishResult {
    fn completed(outcomes: Vec<PublishOutcome>) -> Self {
        Self {
            outcomes,
            success: true,
        }
    }

    /// IDs of bundles whose update attempt failed.
    pub fn failed_ids(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.success)
            .map(|outcome| outcome.bundle_id.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

pub struct Publisher {
    client: Arc<dyn BundleClient>,
    config: Config,
}

impl Publisher {
    pub fn new(config: Config, client: Arc<dyn BundleClient>) -> Self {
        Self { client, config }
    }

    /// Execute one complete publish pass.
    ///
    /// Returns `Err` only when the listing stage fails for a reason other
    /// than "nothing matched"; every per-bundle failure is absorbed into the
    /// returned [`PublishResult`] or skipped.
    pub async fn run(&self) -> Result<PublishResult> {
        // Release times are entered at minute granularity, so the evaluation
        // instant is rounded to the whole minute; sub-minute clock skew must
        // not hold back a due bundle. Early publication is prevented by the
        // per-bundle check below.
        let publish_date = Utc::now()
            .duration_round(TimeDelta::minutes(1))
            .expect("infallible");

        info!(%publish_date, "retrieving bundles scheduled for release");

        let token = &self.config.service_token;
        let list = match self.client.list_scheduled(token, publish_date).await {
            Ok(list) => list,
            Err(err) if err.is_not_found() => {
                info!(%publish_date, "no bundles ready for publication");
                return Ok(PublishResult::completed(Vec::new()));
            }
            Err(err) => {
                error!(%publish_date, error = %err, "failed to list scheduled bundles");
                return Err(SchedulerError::Listing(err));
            }
        };

        info!(count = list.count, "bundles scheduled for publication");

        let mut outcomes = Vec::new();

        for item in &list.items {
            // The listing response carries no ETags, so a per-bundle fetch is
            // required to obtain the concurrency token for the conditional
            // update.
            let detail = match self.client.fetch_bundle(token, &item.id).await {
                Ok(detail) => detail,
                Err(err) => {
                    warn!(bundle_id = %item.id, error = %err, "failed to fetch bundle, moving to next");
                    continue;
                }
            };

            let bundle: Bundle = match serde_json::from_slice(&detail.body) {
                Ok(bundle) => bundle,
                Err(err) => {
                    warn!(bundle_id = %item.id, error = %err, "failed to decode bundle, moving to next");
                    continue;
                }
            };

            // Re-measured per bundle: the wall clock has moved on since the
            // listing call, and a bundle must never publish early.
            let check = Utc::now();
            if !bundle.is_due(check) || bundle.state != BundleState::Approved {
                continue;
            }

            match self
                .client
                .update_state(token, &item.id, &detail.etag, BundleState::Published)
                .await
            {
                Ok(updated) => {
                    info!(bundle_id = %updated.id, "bundle published");
                    outcomes.push(PublishOutcome {
                        bundle_id: updated.id,
                        success: true,
                        error: None,
                    });
                }
                Err(err) => {
                    error!(bundle_id = %item.id, error = %err, "failed to publish bundle, moving to next");
                    outcomes.push(PublishOutcome {
                        bundle_id: item.id.clone(),
                        success: false,
                        error: None,
                    });
                }
            }
        }

        Ok(PublishResult::completed(outcomes))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
