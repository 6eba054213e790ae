use async_trait::async_trait;
use sorteiaki_model::{
    EngagementType, MediaId, MediaItem, MediaType, Participant, ParticipantId,
};

use crate::{AccessToken, EngagementProvider, ProviderError};

pub const DEMO_COMMENT_COUNT: usize = 150;
pub const DEMO_LIKE_COUNT: usize = 12;
pub const DEMO_MEDIA_ID: &str = "demo-post";

/// Deterministic synthetic account for demos and offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProvider;

impl DemoProvider {
    fn media() -> Result<MediaItem, ProviderError> {
        Ok(MediaItem {
            id: MediaId::parse(DEMO_MEDIA_ID).map_err(|e| ProviderError::Decode(e.to_string()))?,
            caption: "Sorteio de demonstração #SorteiAki".to_string(),
            media_url: "https://picsum.photos/seed/sorteiaki/600/600".to_string(),
            media_type: MediaType::Image,
            timestamp: "2024-01-01T12:00:00+0000".to_string(),
            permalink: "https://www.instagram.com/p/demo-post/".to_string(),
        })
    }

    fn entrant(id: String, username: String) -> Result<Participant, ProviderError> {
        let id = ParticipantId::parse(&id).map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(Participant::new(id, username))
    }

    fn commenters() -> Result<Vec<Participant>, ProviderError> {
        (0..DEMO_COMMENT_COUNT)
            .map(|i| {
                Ok(
                    Self::entrant(format!("ig-user-{i}"), format!("perfil_sortudo_{i}"))?
                        .with_content(format!("Eu quero ganhar este sorteio! #SorteiAki #{i}"))
                        .with_avatar_url(format!("https://picsum.photos/seed/{i}/100/100")),
                )
            })
            .collect()
    }

    fn likers() -> Result<Vec<Participant>, ProviderError> {
        (0..DEMO_LIKE_COUNT)
            .map(|i| Self::entrant(format!("like-{i}"), format!("curtida_user_{i}")))
            .collect()
    }
}

#[async_trait]
impl EngagementProvider for DemoProvider {
    fn provider_tag(&self) -> &'static str {
        "demo"
    }

    async fn authenticate(&self) -> Result<Option<AccessToken>, ProviderError> {
        Ok(AccessToken::new("demo"))
    }

    async fn list_media(&self, _credential: &AccessToken) -> Result<Vec<MediaItem>, ProviderError> {
        Ok(vec![Self::media()?])
    }

    async fn fetch_participants(
        &self,
        media_id: &MediaId,
        engagement_type: EngagementType,
        _credential: &AccessToken,
    ) -> Result<Vec<Participant>, ProviderError> {
        if media_id.as_str() != DEMO_MEDIA_ID {
            return Ok(Vec::new());
        }
        match engagement_type {
            EngagementType::Comments => Self::commenters(),
            EngagementType::Likes => Self::likers(),
            other => Err(ProviderError::Unsupported(format!(
                "engagement type {other}"
            ))),
        }
    }
}
