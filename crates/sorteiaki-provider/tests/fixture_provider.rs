use std::fs;

use sorteiaki_model::{EngagementType, MediaId, MediaType};
use sorteiaki_provider::{
    participants_or_empty, AccessToken, EngagementProvider, FixtureProvider, ProviderError,
    FIXTURE_CREDENTIAL,
};

fn write_fixture(root: &std::path::Path) {
    fs::write(
        root.join("media.json"),
        r#"[{"id":"post-1","caption":"Sorteio","media_type":"IMAGE","permalink":"https://x/p/1"}]"#,
    )
    .expect("media");
    let dir = root.join("participants").join("post-1");
    fs::create_dir_all(&dir).expect("dir");
    fs::write(
        dir.join("comments.json"),
        r#"[
            {"id":"c-1","username":"ana","content":"quero @bia"},
            {"id":"c-2","username":"bia"}
        ]"#,
    )
    .expect("comments");
}

#[tokio::test]
async fn fixture_serves_media_and_comments() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_fixture(tmp.path());
    let provider = FixtureProvider::new(tmp.path().to_path_buf());

    let credential = provider.authenticate().await.expect("auth").expect("credential");
    assert_eq!(credential.expose(), FIXTURE_CREDENTIAL);

    let media = provider.list_media(&credential).await.expect("media");
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].media_type, MediaType::Image);

    let comments = provider
        .fetch_participants(&media[0].id, EngagementType::Comments, &credential)
        .await
        .expect("comments");
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content.as_deref(), Some("quero @bia"));
}

#[tokio::test]
async fn missing_participant_file_is_an_empty_pool() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_fixture(tmp.path());
    let provider = FixtureProvider::new(tmp.path().to_path_buf())
        .with_credential(AccessToken::new("configured"));
    let credential = provider.authenticate().await.expect("auth").expect("credential");
    assert_eq!(credential.expose(), "configured");

    let likes = provider
        .fetch_participants(
            &MediaId::parse("post-1").expect("id"),
            EngagementType::Likes,
            &credential,
        )
        .await
        .expect("likes");
    assert!(likes.is_empty());
}

#[tokio::test]
async fn malformed_participants_surface_decode_errors() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_fixture(tmp.path());
    fs::write(
        tmp.path().join("participants/post-1/comments.json"),
        r#"[{"id":"","username":"ghost"}]"#,
    )
    .expect("write");
    let provider = FixtureProvider::new(tmp.path().to_path_buf());
    let credential = AccessToken::new("t").expect("token");
    let fetched = provider
        .fetch_participants(
            &MediaId::parse("post-1").expect("id"),
            EngagementType::Comments,
            &credential,
        )
        .await;
    assert!(matches!(fetched, Err(ProviderError::Decode(_))));
    assert!(participants_or_empty(fetched).is_empty());
}

#[tokio::test]
async fn missing_media_list_is_an_io_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let provider = FixtureProvider::new(tmp.path().to_path_buf());
    let credential = AccessToken::new("t").expect("token");
    let err = provider.list_media(&credential).await.expect_err("no media");
    assert!(matches!(err, ProviderError::Io(_)));
}
