use serde_json::json;
use sorteiaki_model::{
    MediaId, MediaItem, MediaType, Participant, ParticipantId, RaffleResult, RaffleSettings,
    RaffleSource, RunId,
};

#[test]
fn participant_omits_absent_optionals() {
    let p = Participant::new(ParticipantId::parse("like-1").expect("id"), "curtida_user_1");
    let value = serde_json::to_value(&p).expect("encode");
    assert_eq!(value, json!({"id": "like-1", "username": "curtida_user_1"}));
}

#[test]
fn participant_decode_rejects_empty_id() {
    let err = serde_json::from_value::<Participant>(json!({"id": "", "username": "a"}));
    assert!(err.is_err());
}

#[test]
fn settings_use_upper_case_engagement_and_reject_unknown_fields() {
    let value = serde_json::to_value(RaffleSettings::default()).expect("encode");
    assert_eq!(value["engagement_type"], "COMMENTS");

    let unknown = json!({
        "winners_count": 1,
        "engagement_type": "LIKES",
        "min_mentions": 0,
        "required_keyword": "",
        "allow_duplicates": false,
        "seed": 42
    });
    assert!(serde_json::from_value::<RaffleSettings>(unknown).is_err());
}

#[test]
fn media_item_decodes_graph_field_names() {
    let media: MediaItem = serde_json::from_value(json!({
        "id": "17900000000000001",
        "caption": "Sorteio!",
        "media_url": "https://cdn.example/1.jpg",
        "media_type": "CAROUSEL_ALBUM",
        "timestamp": "2024-05-01T12:00:00+0000",
        "permalink": "https://instagram.example/p/abc"
    }))
    .expect("decode");
    assert_eq!(media.media_type, MediaType::CarouselAlbum);
    assert_eq!(media.id, MediaId::parse("17900000000000001").expect("id"));
}

#[test]
fn result_record_survives_json_and_hides_media_for_manual_runs() {
    let winner = Participant::new(ParticipantId::parse("man-0").expect("id"), "Ana");
    let result = RaffleResult::new(
        RunId::parse("man-res-1000-00000000").expect("run id"),
        1000,
        RaffleSource::Manual.media().cloned(),
        RaffleSettings::default(),
        vec![winner],
        "SAK-00000001".to_string(),
    );
    let value = serde_json::to_value(&result).expect("encode");
    assert!(value.get("media_info").is_none());
    let decoded: RaffleResult = serde_json::from_value(value).expect("decode");
    assert_eq!(decoded, result);
    assert_eq!(decoded.winners()[0].username, "Ana");
}

#[test]
fn raffle_source_prefixes_run_ids() {
    let media = MediaItem {
        id: MediaId::parse("m1").expect("id"),
        caption: String::new(),
        media_url: String::new(),
        media_type: MediaType::Image,
        timestamp: String::new(),
        permalink: String::new(),
    };
    assert_eq!(RaffleSource::Manual.run_id_prefix(), "man-res");
    assert_eq!(
        RaffleSource::Platform { media }.run_id_prefix(),
        "res"
    );
}
