#![forbid(unsafe_code)]
//! The raffle pipeline: filter the raw pool, draw winners, stamp a token.
//!
//! Everything here is synchronous and free of I/O apart from the clock and
//! random source handed in by the caller.

mod draw;
mod error;
mod filter;
mod manual;
mod selection;
mod session;
mod verification;

pub use draw::{draw, draw_now, DrawOutcome, RUN_NONCE_HEX_LEN};
pub use error::EngineError;
pub use filter::{count_mentions, filter_participants};
pub use manual::{parse_manual_list, MANUAL_ID_PREFIX};
pub use selection::{select_winners, select_winners_with};
pub use session::{RaffleSession, TransitionError, DEFAULT_COUNTDOWN_TICKS};
pub use verification::{
    compute_verification_token, is_well_formed_token, record_digest, rolling_hash,
    token_from_hash, verify_result, VerificationReport,
};

pub const CRATE_NAME: &str = "sorteiaki-engine";
