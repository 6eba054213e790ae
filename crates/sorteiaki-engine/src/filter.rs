// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use sorteiaki_model::{EngagementType, Participant, RaffleSettings};
use tracing::debug;

// Handles are ASCII word characters only.
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]+").expect("mention pattern compiles"));

/// Number of `@handle` tokens in `content`.
#[must_use]
pub fn count_mentions(content: &str) -> usize {
    MENTION.find_iter(content).count()
}

/// Reduces `raw` to the participants eligible under `settings`.
///
/// Only comment pools are filtered; like pools come back unchanged. Stages run
/// in a fixed order (dedup, keyword, mentions) and the input order is kept.
#[must_use]
pub fn filter_participants(raw: &[Participant], settings: &RaffleSettings) -> Vec<Participant> {
    if settings.engagement_type != EngagementType::Comments {
        debug!(
            engagement = %settings.engagement_type,
            raw = raw.len(),
            "content filters skipped"
        );
        return raw.to_vec();
    }

    let mut eligible: Vec<&Participant> = raw.iter().collect();

    if !settings.allow_duplicates {
        let before = eligible.len();
        let mut seen: HashSet<&str> = HashSet::with_capacity(before);
        eligible.retain(|p| seen.insert(p.username.as_str()));
        debug!(before, after = eligible.len(), "dedup by username");
    }

    if let Some(keyword) = settings.keyword() {
        let before = eligible.len();
        let needle = keyword.to_lowercase();
        eligible.retain(|p| {
            p.content
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
        });
        debug!(before, after = eligible.len(), keyword, "keyword filter");
    }

    if settings.min_mentions > 0 {
        let before = eligible.len();
        let min = usize::try_from(settings.min_mentions).unwrap_or(usize::MAX);
        eligible.retain(|p| p.content.as_deref().map_or(0, count_mentions) >= min);
        debug!(before, after = eligible.len(), min, "mention filter");
    }

    eligible.into_iter().cloned().collect()
}
