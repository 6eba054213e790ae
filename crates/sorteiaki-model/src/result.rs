// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::{MediaItem, Participant, RaffleSettings, ValidationError};

pub const VERIFICATION_TOKEN_PREFIX: &str = "SAK-";

const RUN_ID_MAX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunId(String);

impl RunId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError("run id must not be empty".to_string()));
        }
        if input.len() > RUN_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "run id exceeds max length {RUN_ID_MAX_LEN}"
            )));
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ValidationError(format!(
                "run id `{input}` must contain only [a-z0-9-]"
            )));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RunId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RunId> for String {
    fn from(value: RunId) -> Self {
        value.0
    }
}

impl TryFrom<String> for RunId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Record of one completed raffle.
///
/// Fields are read-only after construction; a new draw produces a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RaffleResult {
    id: RunId,
    timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media_info: Option<MediaItem>,
    settings: RaffleSettings,
    winners: Vec<Participant>,
    verification_hash: String,
}

impl RaffleResult {
    #[must_use]
    pub fn new(
        id: RunId,
        timestamp: i64,
        media_info: Option<MediaItem>,
        settings: RaffleSettings,
        winners: Vec<Participant>,
        verification_hash: String,
    ) -> Self {
        Self {
            id,
            timestamp,
            media_info,
            settings,
            winners,
            verification_hash,
        }
    }

    #[must_use]
    pub fn id(&self) -> &RunId {
        &self.id
    }

    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub fn media_info(&self) -> Option<&MediaItem> {
        self.media_info.as_ref()
    }

    #[must_use]
    pub fn settings(&self) -> &RaffleSettings {
        &self.settings
    }

    #[must_use]
    pub fn winners(&self) -> &[Participant] {
        &self.winners
    }

    #[must_use]
    pub fn verification_hash(&self) -> &str {
        &self.verification_hash
    }
}
