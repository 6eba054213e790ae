use std::fmt;

use sorteiaki_model::{Participant, RaffleResult, RaffleState};
use tracing::debug;

use crate::DrawOutcome;

pub const DEFAULT_COUNTDOWN_TICKS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub from: RaffleState,
    pub to: RaffleState,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid raffle transition {} -> {}", self.from, self.to)
    }
}

impl std::error::Error for TransitionError {}

/// Presentation-side driver for one run at a time.
///
/// Holds the result between `Processing` and the return to `Idle`, counts
/// the countdown down and hands winners out one by one for the reveal.
#[derive(Debug, Clone)]
pub struct RaffleSession {
    state: RaffleState,
    countdown_ticks: u8,
    remaining: u8,
    result: Option<RaffleResult>,
    revealed: usize,
}

impl Default for RaffleSession {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_TICKS)
    }
}

impl RaffleSession {
    #[must_use]
    pub fn new(countdown_ticks: u8) -> Self {
        Self {
            state: RaffleState::Idle,
            countdown_ticks,
            remaining: 0,
            result: None,
            revealed: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> RaffleState {
        self.state
    }

    #[must_use]
    pub const fn remaining_ticks(&self) -> u8 {
        self.remaining
    }

    #[must_use]
    pub fn result(&self) -> Option<&RaffleResult> {
        self.result.as_ref()
    }

    fn transition(&mut self, to: RaffleState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(to) {
            return Err(TransitionError {
                from: self.state,
                to,
            });
        }
        debug!(from = %self.state, to = %to, "raffle state");
        self.state = to;
        Ok(())
    }

    pub fn begin_connect(&mut self) -> Result<(), TransitionError> {
        self.transition(RaffleState::Connecting)
    }

    pub fn media_listed(&mut self) -> Result<(), TransitionError> {
        self.transition(RaffleState::SelectingMedia)
    }

    pub fn begin_processing(&mut self) -> Result<(), TransitionError> {
        self.transition(RaffleState::Processing)
    }

    /// Leaves `Processing` with the outcome of the draw.
    ///
    /// A drawn result starts the countdown (or reveals straight away when the
    /// session has zero ticks); an empty pool returns to `Idle`.
    pub fn finish_processing(&mut self, outcome: DrawOutcome) -> Result<(), TransitionError> {
        if self.state != RaffleState::Processing {
            let to = match outcome {
                DrawOutcome::NoEligibleParticipants { .. } => RaffleState::Idle,
                DrawOutcome::Drawn { .. } => RaffleState::Countdown,
            };
            return Err(TransitionError {
                from: self.state,
                to,
            });
        }
        match outcome {
            DrawOutcome::NoEligibleParticipants { .. } => self.transition(RaffleState::Idle),
            DrawOutcome::Drawn { result, .. } => {
                self.transition(RaffleState::Countdown)?;
                self.result = Some(result);
                self.revealed = 0;
                self.remaining = self.countdown_ticks;
                if self.remaining == 0 {
                    self.transition(RaffleState::Revealed)?;
                }
                Ok(())
            }
        }
    }

    /// Advances the countdown by one tick and returns the ticks left.
    pub fn tick(&mut self) -> Result<u8, TransitionError> {
        if self.state != RaffleState::Countdown {
            return Err(TransitionError {
                from: self.state,
                to: RaffleState::Revealed,
            });
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.transition(RaffleState::Revealed)?;
        }
        Ok(self.remaining)
    }

    /// Reveals the next winner, or `None` once all are shown.
    pub fn reveal_next(&mut self) -> Option<&Participant> {
        if self.state != RaffleState::Revealed {
            return None;
        }
        let winner = self.result.as_ref()?.winners().get(self.revealed)?;
        self.revealed += 1;
        Some(winner)
    }

    #[must_use]
    pub fn revealed_winners(&self) -> &[Participant] {
        match (&self.result, self.state) {
            (Some(result), RaffleState::Revealed) => &result.winners()[..self.revealed],
            _ => &[],
        }
    }

    /// Returns to `Idle`, discarding any held result.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.transition(RaffleState::Idle)?;
        self.result = None;
        self.revealed = 0;
        self.remaining = 0;
        Ok(())
    }
}
