use rand::Rng;
use sorteiaki_core::{ClockPort, SystemClock};
use sorteiaki_model::{Participant, RaffleResult, RaffleSettings, RaffleSource, RunId};
use tracing::{info, warn};

use crate::{compute_verification_token, filter_participants, select_winners_with, EngineError};

/// Hex digits of the random suffix that keeps run ids unique within one
/// millisecond.
pub const RUN_NONCE_HEX_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Nobody survived filtering; no result was produced.
    NoEligibleParticipants { raw_count: usize },
    Drawn {
        result: RaffleResult,
        raw_count: usize,
        eligible_count: usize,
    },
}

impl DrawOutcome {
    #[must_use]
    pub fn result(&self) -> Option<&RaffleResult> {
        match self {
            Self::NoEligibleParticipants { .. } => None,
            Self::Drawn { result, .. } => Some(result),
        }
    }
}

/// Runs one complete raffle: filter, select, timestamp and token.
///
/// Manual pools skip the filter pipeline. `raw` is never modified.
pub fn draw<C, R>(
    source: &RaffleSource,
    raw: &[Participant],
    settings: &RaffleSettings,
    clock: &C,
    rng: &mut R,
) -> Result<DrawOutcome, EngineError>
where
    C: ClockPort + ?Sized,
    R: Rng + ?Sized,
{
    let raw_count = raw.len();
    let eligible = match source {
        RaffleSource::Manual => raw.to_vec(),
        RaffleSource::Platform { .. } => filter_participants(raw, settings),
    };
    if eligible.is_empty() {
        warn!(raw_count, "no eligible participants");
        return Ok(DrawOutcome::NoEligibleParticipants { raw_count });
    }

    let winners = select_winners_with(&eligible, settings.effective_winners_count(), rng);
    let timestamp = clock.now_millis().map_err(EngineError::Clock)?;
    let nonce: u32 = rng.random();
    let run_id = RunId::parse(&format!(
        "{}-{timestamp}-{nonce:0width$x}",
        source.run_id_prefix(),
        width = RUN_NONCE_HEX_LEN
    ))
    .map_err(EngineError::InvalidRunId)?;
    let verification_hash = compute_verification_token(&winners, timestamp);

    info!(
        run_id = %run_id,
        raw_count,
        eligible_count = eligible.len(),
        winners = winners.len(),
        token = %verification_hash,
        "raffle drawn"
    );

    let result = RaffleResult::new(
        run_id,
        timestamp,
        source.media().cloned(),
        settings.clone(),
        winners,
        verification_hash,
    );
    Ok(DrawOutcome::Drawn {
        result,
        raw_count,
        eligible_count: eligible.len(),
    })
}

/// [`draw`] against the system clock and the thread-local CSPRNG.
pub fn draw_now(
    source: &RaffleSource,
    raw: &[Participant],
    settings: &RaffleSettings,
) -> Result<DrawOutcome, EngineError> {
    draw(source, raw, settings, &SystemClock, &mut rand::rng())
}
