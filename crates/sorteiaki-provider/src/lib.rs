// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Where participant pools come from.
//!
//! Every backend implements [`EngagementProvider`]. Callers treat a failed
//! fetch as an empty pool, see [`participants_or_empty`].

mod credential;
mod demo;
mod error;
mod fixture;
mod graph;

use async_trait::async_trait;
use sorteiaki_model::{EngagementType, MediaId, MediaItem, Participant};
use tracing::warn;

pub use credential::AccessToken;
pub use demo::{DemoProvider, DEMO_COMMENT_COUNT, DEMO_LIKE_COUNT, DEMO_MEDIA_ID};
pub use error::ProviderError;
pub use fixture::{FixtureProvider, FIXTURE_CREDENTIAL, MEDIA_FILE, PARTICIPANTS_DIR};
pub use graph::{
    GraphApiProvider, GraphConfig, RetryPolicy, DEFAULT_COMMENT_PAGE_LIMIT,
    DEFAULT_GRAPH_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_MEDIA_PAGE_LIMIT, FALLBACK_USERNAME,
};

pub const CRATE_NAME: &str = "sorteiaki-provider";

#[async_trait]
pub trait EngagementProvider: Send + Sync {
    fn provider_tag(&self) -> &'static str;

    /// Obtains a credential, or `None` when none is available.
    async fn authenticate(&self) -> Result<Option<AccessToken>, ProviderError>;

    async fn list_media(&self, credential: &AccessToken) -> Result<Vec<MediaItem>, ProviderError>;

    async fn fetch_participants(
        &self,
        media_id: &MediaId,
        engagement_type: EngagementType,
        credential: &AccessToken,
    ) -> Result<Vec<Participant>, ProviderError>;
}

/// Collapses a failed fetch into an empty pool, logging the failure.
///
/// Callers that must not draw from a partial or unsupported pool check
/// [`ProviderError::is_fatal_for_draw`] first.
#[must_use]
pub fn participants_or_empty(
    fetched: Result<Vec<Participant>, ProviderError>,
) -> Vec<Participant> {
    match fetched {
        Ok(participants) => participants,
        Err(err) => {
            warn!(error = %err, "participant fetch failed; using empty pool");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{participants_or_empty, ProviderError};

    #[test]
    fn failed_fetch_becomes_empty_pool() {
        let pool = participants_or_empty(Err(ProviderError::Http("boom".to_string())));
        assert!(pool.is_empty());
    }
}
