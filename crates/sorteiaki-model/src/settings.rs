use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::ValidationError;

/// Upper bound accepted for `min_mentions`.
pub const MAX_MIN_MENTIONS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum EngagementType {
    #[default]
    Comments,
    Likes,
}

impl EngagementType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comments => "COMMENTS",
            Self::Likes => "LIKES",
        }
    }
}

impl Display for EngagementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngagementType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COMMENTS" => Ok(Self::Comments),
            "LIKES" => Ok(Self::Likes),
            other => Err(ValidationError(format!(
                "unknown engagement type `{other}`; expected COMMENTS or LIKES"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RaffleSettings {
    pub winners_count: u32,
    pub engagement_type: EngagementType,
    pub min_mentions: u32,
    pub required_keyword: String,
    pub allow_duplicates: bool,
}

impl Default for RaffleSettings {
    fn default() -> Self {
        Self {
            winners_count: 1,
            engagement_type: EngagementType::Comments,
            min_mentions: 0,
            required_keyword: String::new(),
            allow_duplicates: false,
        }
    }
}

impl RaffleSettings {
    /// Winner count with the `>= 1` floor applied.
    #[must_use]
    pub fn effective_winners_count(&self) -> usize {
        usize::try_from(self.winners_count.max(1)).unwrap_or(usize::MAX)
    }

    /// Keyword after trimming, or `None` when the keyword filter is off.
    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        let trimmed = self.required_keyword.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.winners_count = self.winners_count.max(1);
        self.min_mentions = self.min_mentions.min(MAX_MIN_MENTIONS);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.winners_count < 1 {
            return Err(ValidationError(
                "winners_count must be at least 1".to_string(),
            ));
        }
        if self.min_mentions > MAX_MIN_MENTIONS {
            return Err(ValidationError(format!(
                "min_mentions must be <= {MAX_MIN_MENTIONS}"
            )));
        }
        Ok(())
    }
}
