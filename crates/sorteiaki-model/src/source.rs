use serde::{Deserialize, Serialize};

use crate::MediaItem;

/// Where a raffle pool came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RaffleSource {
    /// Names typed in by the organizer; never filtered.
    Manual,
    Platform { media: MediaItem },
}

impl RaffleSource {
    #[must_use]
    pub const fn run_id_prefix(&self) -> &'static str {
        match self {
            Self::Manual => "man-res",
            Self::Platform { .. } => "res",
        }
    }

    #[must_use]
    pub fn media(&self) -> Option<&MediaItem> {
        match self {
            Self::Manual => None,
            Self::Platform { media } => Some(media),
        }
    }
}
