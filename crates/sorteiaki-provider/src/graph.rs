// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sorteiaki_model::{EngagementType, MediaId, MediaItem, MediaType, Participant, ParticipantId};
use tracing::{debug, instrument, warn};

use crate::{AccessToken, EngagementProvider, ProviderError};

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com/v19.0";
pub const DEFAULT_MEDIA_PAGE_LIMIT: u32 = 30;
pub const DEFAULT_COMMENT_PAGE_LIMIT: u32 = 5000;
/// Username used when a comment's author is hidden.
pub const FALLBACK_USERNAME: &str = "usuario_instagram";

/// Pages followed per listing before the fetch is abandoned as truncated.
pub const DEFAULT_MAX_PAGES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub media_page_limit: u32,
    pub comment_page_limit: u32,
    pub max_pages: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
            retry: RetryPolicy::default(),
            media_page_limit: DEFAULT_MEDIA_PAGE_LIMIT,
            comment_page_limit: DEFAULT_COMMENT_PAGE_LIMIT,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    paging: Option<Paging>,
}

impl<T> Page<T> {
    fn next(&self) -> Option<&str> {
        self.paging.as_ref().and_then(|p| p.next.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct Paging {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct BusinessAccountLookup {
    #[serde(default)]
    instagram_business_account: Option<IdRef>,
}

#[derive(Debug, Deserialize)]
struct GraphMedia {
    id: String,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    media_url: Option<String>,
    #[serde(default)]
    media_type: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    permalink: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphAuthor {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphComment {
    id: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    from: Option<GraphAuthor>,
}

fn map_media(raw: GraphMedia) -> Option<MediaItem> {
    let id = match MediaId::parse(&raw.id) {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "skipping media with invalid id");
            return None;
        }
    };
    let kind = raw.media_type.unwrap_or_default();
    let media_type = match kind.as_str() {
        "IMAGE" => MediaType::Image,
        "VIDEO" => MediaType::Video,
        "CAROUSEL_ALBUM" => MediaType::CarouselAlbum,
        other => {
            warn!(media_id = %id, media_type = other, "skipping media of unknown type");
            return None;
        }
    };
    Some(MediaItem {
        id,
        caption: raw.caption.unwrap_or_default(),
        media_url: raw.media_url.unwrap_or_default(),
        media_type,
        timestamp: raw.timestamp.unwrap_or_default(),
        permalink: raw.permalink.unwrap_or_default(),
    })
}

fn map_comment(raw: GraphComment) -> Option<Participant> {
    let id = ParticipantId::parse(&raw.id).ok()?;
    let username = raw
        .from
        .and_then(|author| author.username)
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| FALLBACK_USERNAME.to_string());
    let mut participant = Participant::new(id, username);
    participant.content = raw.text;
    participant.timestamp = raw.timestamp;
    Some(participant)
}

/// Graph API client for an Instagram business account.
///
/// The account is discovered through the pages the token can see. Likes
/// are not exposed by the platform and come back as
/// [`ProviderError::Unsupported`].
pub struct GraphApiProvider {
    config: GraphConfig,
    credential: Option<AccessToken>,
    client: reqwest::Client,
}

impl GraphApiProvider {
    pub fn new(config: GraphConfig, credential: Option<AccessToken>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Http(format!("client build failed: {e}")))?;
        Ok(Self {
            config: GraphConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            credential,
            client,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    fn auth_headers(credential: &AccessToken) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map_err(|e| ProviderError::Http(format!("invalid auth header: {e}")))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    #[instrument(name = "graph_get_with_retry", skip(self, credential))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        credential: &AccessToken,
    ) -> Result<T, ProviderError> {
        let headers = Self::auth_headers(credential)?;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.get(url).headers(headers.clone()).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let bytes = resp
                        .bytes()
                        .await
                        .map_err(|e| ProviderError::Http(format!("read body failed: {e}")))?;
                    return serde_json::from_slice(&bytes)
                        .map_err(|e| ProviderError::Decode(format!("{url}: {e}")));
                }
                Ok(resp) => {
                    let status = resp.status();
                    let retryable =
                        status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
                    if !retryable || attempt >= self.config.retry.max_attempts {
                        let body = resp.text().await.unwrap_or_default();
                        return Err(ProviderError::Http(format!(
                            "request failed status={status} url={url}: {body}"
                        )));
                    }
                    debug!(attempt, %status, "retrying graph request");
                }
                Err(e) => {
                    if attempt >= self.config.retry.max_attempts {
                        return Err(ProviderError::Http(format!("request failed url={url}: {e}")));
                    }
                    debug!(attempt, error = %e, "retrying graph request");
                }
            }
            tokio::time::sleep(Duration::from_millis(
                self.config
                    .retry
                    .base_backoff_ms
                    .saturating_mul(attempt as u64),
            ))
            .await;
        }
    }

    /// Next page to request, refusing to stop short of the end of a listing.
    fn follow<T>(
        &self,
        page: &Page<T>,
        pages_seen: usize,
        listing: &str,
    ) -> Result<Option<String>, ProviderError> {
        match page.next() {
            Some(_) if pages_seen >= self.config.max_pages => {
                warn!(listing, pages = pages_seen, "graph listing exceeds page cap");
                Err(ProviderError::Truncated {
                    listing: listing.to_string(),
                    pages: pages_seen,
                })
            }
            next => Ok(next.map(ToString::to_string)),
        }
    }

    /// First Instagram business account linked to any page of the user.
    #[instrument(name = "graph_business_account", skip(self, credential))]
    pub async fn business_account_id(
        &self,
        credential: &AccessToken,
    ) -> Result<String, ProviderError> {
        let mut next = Some(self.endpoint("me/accounts"));
        let mut pages_seen = 0;
        while let Some(url) = next.take() {
            pages_seen += 1;
            let page: Page<IdRef> = self.get_json(&url, credential).await?;
            for account in &page.data {
                let lookup: BusinessAccountLookup = self
                    .get_json(
                        &self.endpoint(&format!("{}?fields=instagram_business_account", account.id)),
                        credential,
                    )
                    .await?;
                if let Some(found) = lookup.instagram_business_account {
                    debug!(page = %account.id, account = %found.id, "business account found");
                    return Ok(found.id);
                }
            }
            next = self.follow(&page, pages_seen, "me/accounts")?;
        }
        Err(ProviderError::NoBusinessAccount)
    }
}

#[async_trait]
impl EngagementProvider for GraphApiProvider {
    fn provider_tag(&self) -> &'static str {
        "graph"
    }

    async fn authenticate(&self) -> Result<Option<AccessToken>, ProviderError> {
        Ok(self.credential.clone())
    }

    #[instrument(name = "graph_list_media", skip(self, credential))]
    async fn list_media(&self, credential: &AccessToken) -> Result<Vec<MediaItem>, ProviderError> {
        let account = self.business_account_id(credential).await?;
        let url = self.endpoint(&format!(
            "{account}/media?fields=id,caption,media_url,media_type,timestamp,permalink&limit={}",
            self.config.media_page_limit
        ));
        let page: Page<GraphMedia> = self.get_json(&url, credential).await?;
        Ok(page.data.into_iter().filter_map(map_media).collect())
    }

    #[instrument(name = "graph_fetch_participants", skip(self, credential))]
    async fn fetch_participants(
        &self,
        media_id: &MediaId,
        engagement_type: EngagementType,
        credential: &AccessToken,
    ) -> Result<Vec<Participant>, ProviderError> {
        if engagement_type != EngagementType::Comments {
            return Err(ProviderError::Unsupported(format!(
                "{engagement_type} are not exposed by the Graph API"
            )));
        }
        let mut next = Some(self.endpoint(&format!(
            "{media_id}/comments?fields=from,text,timestamp,id&limit={}",
            self.config.comment_page_limit
        )));
        let mut participants = Vec::new();
        let mut pages_seen = 0;
        while let Some(url) = next.take() {
            pages_seen += 1;
            let page: Page<GraphComment> = self.get_json(&url, credential).await?;
            next = self.follow(&page, pages_seen, "comments")?;
            participants.extend(page.data.into_iter().filter_map(map_comment));
        }
        debug!(count = participants.len(), "graph comments fetched");
        Ok(participants)
    }
}
