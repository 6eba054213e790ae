// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sorteiaki_model::{EngagementType, MediaId, MediaItem, Participant};
use tracing::{debug, instrument};

use crate::{AccessToken, EngagementProvider, ProviderError};

pub const MEDIA_FILE: &str = "media.json";
pub const PARTICIPANTS_DIR: &str = "participants";
/// Credential handed out when no token is configured.
pub const FIXTURE_CREDENTIAL: &str = "fixture-local";

/// Serves media and participants from JSON files under one directory:
///
/// ```text
/// <root>/media.json
/// <root>/participants/<media_id>/comments.json
/// <root>/participants/<media_id>/likes.json
/// ```
///
/// A missing participant file is an empty pool.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    root: PathBuf,
    credential: Option<AccessToken>,
}

impl FixtureProvider {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            credential: None,
        }
    }

    #[must_use]
    pub fn with_credential(mut self, credential: Option<AccessToken>) -> Self {
        self.credential = credential;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn participants_path(&self, media_id: &MediaId, file: &str) -> PathBuf {
        self.root
            .join(PARTICIPANTS_DIR)
            .join(media_id.as_str())
            .join(file)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ProviderError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ProviderError::Io(format!(
                "read {} failed: {e}",
                path.display()
            )))
        }
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| ProviderError::Decode(format!("parse {} failed: {e}", path.display())))
}

#[async_trait]
impl EngagementProvider for FixtureProvider {
    fn provider_tag(&self) -> &'static str {
        "fixture"
    }

    async fn authenticate(&self) -> Result<Option<AccessToken>, ProviderError> {
        Ok(self
            .credential
            .clone()
            .or_else(|| AccessToken::new(FIXTURE_CREDENTIAL)))
    }

    #[instrument(name = "fixture_list_media", skip(self, _credential), fields(root = %self.root.display()))]
    async fn list_media(&self, _credential: &AccessToken) -> Result<Vec<MediaItem>, ProviderError> {
        let path = self.root.join(MEDIA_FILE);
        read_json(&path)?.ok_or_else(|| {
            ProviderError::Io(format!("media list {} does not exist", path.display()))
        })
    }

    #[instrument(name = "fixture_fetch_participants", skip(self, _credential))]
    async fn fetch_participants(
        &self,
        media_id: &MediaId,
        engagement_type: EngagementType,
        _credential: &AccessToken,
    ) -> Result<Vec<Participant>, ProviderError> {
        let file = match engagement_type {
            EngagementType::Comments => "comments.json",
            EngagementType::Likes => "likes.json",
            other => {
                return Err(ProviderError::Unsupported(format!(
                    "engagement type {other}"
                )))
            }
        };
        let path = self.participants_path(media_id, file);
        let participants: Vec<Participant> = read_json(&path)?.unwrap_or_default();
        debug!(path = %path.display(), count = participants.len(), "fixture participants");
        Ok(participants)
    }
}
