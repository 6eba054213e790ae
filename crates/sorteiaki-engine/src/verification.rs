// SPDX-License-Identifier: Apache-2.0

//! Verification tokens.
//!
//! A token binds the winner ids (in draw order) and the draw timestamp to a
//! short `SAK-XXXXXXXX` string users can compare by eye. It is a 31-multiplier
//! rolling hash over UTF-16 code units with 32-bit wraparound, so tokens
//! issued by the web client still verify. It offers no tamper resistance;
//! [`record_digest`] is the SHA-256 audit digest.

use serde::Serialize;
use sorteiaki_core::canonical;
use sorteiaki_model::{Participant, RaffleResult, VERIFICATION_TOKEN_PREFIX};

use crate::EngineError;

const ID_SEPARATOR: &str = "-";
const TOKEN_HEX_DIGITS: usize = 8;

#[must_use]
pub fn rolling_hash(data: &str) -> i32 {
    data.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

#[must_use]
pub fn token_from_hash(hash: i32) -> String {
    format!(
        "{VERIFICATION_TOKEN_PREFIX}{:0width$X}",
        hash.unsigned_abs(),
        width = TOKEN_HEX_DIGITS
    )
}

#[must_use]
pub fn compute_verification_token(winners: &[Participant], timestamp_millis: i64) -> String {
    let mut data = winners
        .iter()
        .map(|w| w.id.as_str())
        .collect::<Vec<_>>()
        .join(ID_SEPARATOR);
    data.push_str(&timestamp_millis.to_string());
    token_from_hash(rolling_hash(&data))
}

/// Whether `token` has the `SAK-` prefix followed by eight uppercase hex digits.
#[must_use]
pub fn is_well_formed_token(token: &str) -> bool {
    token
        .strip_prefix(VERIFICATION_TOKEN_PREFIX)
        .is_some_and(|hex| {
            hex.len() == TOKEN_HEX_DIGITS
                && hex
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub run_id: String,
    pub stored_token: String,
    pub expected_token: String,
    pub matches: bool,
    pub record_digest: String,
}

/// Recomputes the token of `result` and compares it with the stored one.
pub fn verify_result(result: &RaffleResult) -> Result<VerificationReport, EngineError> {
    let expected = compute_verification_token(result.winners(), result.timestamp());
    Ok(VerificationReport {
        run_id: result.id().to_string(),
        stored_token: result.verification_hash().to_string(),
        matches: expected == result.verification_hash(),
        expected_token: expected,
        record_digest: record_digest(result)?,
    })
}

/// SHA-256 over the canonical JSON of the whole record.
pub fn record_digest(result: &RaffleResult) -> Result<String, EngineError> {
    canonical::canonical_digest_hex(result).map_err(EngineError::Digest)
}

#[cfg(test)]
mod tests {
    use super::{
        compute_verification_token, is_well_formed_token, rolling_hash, token_from_hash,
    };
    use sorteiaki_model::{Participant, ParticipantId};

    fn winner(id: &str) -> Participant {
        Participant::new(ParticipantId::parse(id).expect("id"), id)
    }

    #[test]
    fn single_winner_vector() {
        assert_eq!(
            compute_verification_token(&[winner("x")], 1000),
            "SAK-06B204D7"
        );
    }

    #[test]
    fn ids_are_dash_joined_before_the_timestamp() {
        let winners = [winner("ig-user-1"), winner("ig-user-2"), winner("ig-user-3")];
        assert_eq!(
            compute_verification_token(&winners, 1_700_000_000_000),
            "SAK-31733707"
        );
    }

    #[test]
    fn empty_draw_hashes_the_timestamp_alone() {
        assert_eq!(compute_verification_token(&[], 1000), "SAK-0017005F");
    }

    #[test]
    fn hashes_utf16_code_units() {
        assert_eq!(token_from_hash(rolling_hash("ação-😀1")), "SAK-5B1B2E0D");
    }

    #[test]
    fn minimum_hash_keeps_its_magnitude() {
        assert_eq!(token_from_hash(i32::MIN), "SAK-80000000");
        assert_eq!(token_from_hash(-5), "SAK-00000005");
    }

    #[test]
    fn token_shape_check() {
        assert!(is_well_formed_token("SAK-0A1B2C3D"));
        assert!(!is_well_formed_token("SAK-0a1b2c3d"));
        assert!(!is_well_formed_token("SAK-0A1B2C3"));
        assert!(!is_well_formed_token("XYZ-0A1B2C3D"));
    }
}
