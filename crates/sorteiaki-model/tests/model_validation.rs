use sorteiaki_model::{
    EngagementType, MediaId, ParticipantId, RaffleSettings, RaffleState, RunId, MAX_MIN_MENTIONS,
};

#[test]
fn participant_id_rejects_empty_and_padded_values() {
    assert!(ParticipantId::parse("").is_err());
    assert!(ParticipantId::parse(" ig-user-1").is_err());
    assert!(ParticipantId::parse(&"x".repeat(257)).is_err());
    assert_eq!(
        ParticipantId::parse("ig-user-1").expect("id").as_str(),
        "ig-user-1"
    );
}

#[test]
fn media_and_run_ids_are_path_safe() {
    assert!(MediaId::parse("17895695668004550").is_ok());
    assert!(MediaId::parse("../etc").is_err());
    assert!(RunId::parse("res-1700000000000-0a1b2c3d").is_ok());
    assert!(RunId::parse("RES-1").is_err());
    assert!(RunId::parse("").is_err());
}

#[test]
fn settings_default_matches_form_defaults() {
    let settings = RaffleSettings::default();
    assert_eq!(settings.winners_count, 1);
    assert_eq!(settings.engagement_type, EngagementType::Comments);
    assert_eq!(settings.min_mentions, 0);
    assert!(settings.required_keyword.is_empty());
    assert!(!settings.allow_duplicates);
    assert!(settings.validate().is_ok());
}

#[test]
fn settings_validation_and_clamping() {
    let zero = RaffleSettings {
        winners_count: 0,
        ..RaffleSettings::default()
    };
    assert!(zero.validate().is_err());
    assert_eq!(zero.effective_winners_count(), 1);
    assert_eq!(zero.clone().clamped().winners_count, 1);

    let too_many_mentions = RaffleSettings {
        min_mentions: MAX_MIN_MENTIONS + 1,
        ..RaffleSettings::default()
    };
    assert!(too_many_mentions.validate().is_err());
    assert_eq!(too_many_mentions.clamped().min_mentions, MAX_MIN_MENTIONS);
}

#[test]
fn keyword_is_trimmed_and_blank_disables() {
    let mut settings = RaffleSettings::default();
    settings.required_keyword = "   ".to_string();
    assert_eq!(settings.keyword(), None);
    settings.required_keyword = "  #quero ".to_string();
    assert_eq!(settings.keyword(), Some("#quero"));
}

#[test]
fn engagement_type_parses_case_insensitively() {
    assert_eq!(
        "comments".parse::<EngagementType>().expect("comments"),
        EngagementType::Comments
    );
    assert_eq!(
        " LIKES ".parse::<EngagementType>().expect("likes"),
        EngagementType::Likes
    );
    assert!("shares".parse::<EngagementType>().is_err());
}

#[test]
fn run_graph_follows_the_raffle_lifecycle() {
    use RaffleState::*;
    let platform_run = [Idle, Connecting, SelectingMedia, Processing, Countdown, Revealed, Idle];
    for pair in platform_run.windows(2) {
        assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
    }
    assert!(Idle.can_transition_to(Processing));
    assert!(!Countdown.can_transition_to(Idle));
    assert!(!Revealed.can_transition_to(Processing));
    assert!(!Idle.can_transition_to(Revealed));
}
