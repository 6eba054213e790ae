use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Phases of one raffle run, in the order a run moves through them.
///
/// `Connecting` and `SelectingMedia` are skipped for manual lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RaffleState {
    #[default]
    Idle,
    Connecting,
    SelectingMedia,
    Processing,
    Countdown,
    Revealed,
}

impl RaffleState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Connecting => "CONNECTING",
            Self::SelectingMedia => "SELECTING_MEDIA",
            Self::Processing => "PROCESSING",
            Self::Countdown => "COUNTDOWN",
            Self::Revealed => "REVEALED",
        }
    }

    /// Whether `self -> next` is an edge of the run graph.
    ///
    /// Every non-idle state may fall back to `Idle` except `Countdown`,
    /// which always ends in `Revealed`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Connecting)
                | (Self::Idle, Self::Processing)
                | (Self::Connecting, Self::SelectingMedia)
                | (Self::Connecting, Self::Idle)
                | (Self::SelectingMedia, Self::Processing)
                | (Self::SelectingMedia, Self::Idle)
                | (Self::Processing, Self::Countdown)
                | (Self::Processing, Self::Idle)
                | (Self::Countdown, Self::Revealed)
                | (Self::Revealed, Self::Idle)
        )
    }
}

impl Display for RaffleState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
