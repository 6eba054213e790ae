use proptest::prelude::*;
use sorteiaki_engine::{compute_verification_token, is_well_formed_token};
use sorteiaki_model::{Participant, ParticipantId};

fn winners(ids: &[String]) -> Vec<Participant> {
    ids.iter()
        .map(|id| Participant::new(ParticipantId::parse(id).expect("id"), id.clone()))
        .collect()
}

#[test]
fn same_input_same_token() {
    let w = winners(&["x".to_string()]);
    assert_eq!(
        compute_verification_token(&w, 1000),
        compute_verification_token(&w, 1000)
    );
}

#[test]
fn token_changes_with_order_and_timestamp() {
    let ab = winners(&["a".to_string(), "b".to_string()]);
    let ba = winners(&["b".to_string(), "a".to_string()]);
    assert_ne!(
        compute_verification_token(&ab, 1000),
        compute_verification_token(&ba, 1000)
    );
    assert_ne!(
        compute_verification_token(&ab, 1000),
        compute_verification_token(&ab, 1001)
    );
}

proptest! {
    #[test]
    fn tokens_are_always_well_formed(
        ids in proptest::collection::vec("[a-z0-9_-]{1,24}", 0..8),
        ts in any::<i64>()
    ) {
        let token = compute_verification_token(&winners(&ids), ts);
        prop_assert!(is_well_formed_token(&token), "{}", token);
        prop_assert_eq!(token.len(), 12);
    }
}
