#![forbid(unsafe_code)]
//! Raffle domain records.
//!
//! Identifiers are validated on construction and on deserialization, so a
//! [`Participant`] can never carry an empty id.
//!
//! ```compile_fail
//! use sorteiaki_model::EngagementType;
//!
//! fn exhaustive_match(kind: EngagementType) -> &'static str {
//!     match kind {
//!         EngagementType::Comments => "c",
//!         EngagementType::Likes => "l",
//!     }
//! }
//! ```

mod media;
mod participant;
mod result;
mod settings;
mod source;
mod state;
mod validation;

pub use media::{MediaId, MediaItem, MediaType};
pub use participant::{Participant, ParticipantId, PARTICIPANT_ID_MAX_LEN};
pub use result::{RaffleResult, RunId, VERIFICATION_TOKEN_PREFIX};
pub use settings::{EngagementType, RaffleSettings, MAX_MIN_MENTIONS};
pub use source::RaffleSource;
pub use state::RaffleState;
pub use validation::ValidationError;

pub const CRATE_NAME: &str = "sorteiaki-model";
