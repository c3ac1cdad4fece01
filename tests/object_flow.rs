//! Integration tests for the framed object transfer flow.

mod common;

use bytes::Bytes;
use http::StatusCode;

use vaultkeep_client::transfer::{build_upload_body, read_download_body};
use vaultkeep_core::wire::{TransferFrame, encode_frame};
use vaultkeep_entity::tier::SubscriptionTier;

#[tokio::test]
async fn upload_download_roundtrip() {
    let app = common::TestApp::new().await;
    let token = app.session_for(1, SubscriptionTier::Regular).await;

    let data = Bytes::from(vec![0xabu8; 100 * 1024]);
    let body = build_upload_body("backup.tar", &data).unwrap();

    let response = app
        .request_raw("POST", "/api/objects/upload", body, &token)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "backup.tar");
    assert_eq!(response.body["data"]["bytes"], 100 * 1024);

    let (status, framed) = app
        .download("/api/objects/backup.tar/download", &token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(framed) });
    let (name, downloaded) = read_download_body(Box::pin(stream)).await.unwrap();
    assert_eq!(name, "backup.tar");
    assert_eq!(downloaded, data);
}

#[tokio::test]
async fn listing_reflects_uploads_and_deletes() {
    let app = common::TestApp::new().await;
    let token = app.session_for(7, SubscriptionTier::Premium).await;

    for name in ["b.bin", "a.bin"] {
        let body = build_upload_body(name, &Bytes::from_static(b"data")).unwrap();
        let response = app
            .request_raw("POST", "/api/objects/upload", body, &token)
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app.request("GET", "/api/objects", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["objects"],
        serde_json::json!(["a.bin", "b.bin"])
    );
    assert_eq!(response.body["data"]["used_bytes"], 8);

    let response = app
        .request("DELETE", "/api/objects/a.bin", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/objects", None, Some(&token)).await;
    assert_eq!(
        response.body["data"]["objects"],
        serde_json::json!(["b.bin"])
    );
}

#[tokio::test]
async fn chunk_before_name_is_a_bad_request() {
    let app = common::TestApp::new().await;
    let token = app.session_for(2, SubscriptionTier::Regular).await;

    let body = encode_frame(TransferFrame::Chunk(Bytes::from_static(b"rogue"))).unwrap();
    let response = app
        .request_raw("POST", "/api/objects/upload", body, &token)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_FRAME");
}

#[tokio::test]
async fn empty_upload_is_a_bad_request() {
    let app = common::TestApp::new().await;
    let token = app.session_for(2, SubscriptionTier::Regular).await;

    let response = app
        .request_raw("POST", "/api/objects/upload", Bytes::new(), &token)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quota_exceeded_maps_to_precondition_failed() {
    let app = common::TestApp::new().await;
    let token = app.session_for(3, SubscriptionTier::Regular).await;

    // Over the 10 MiB regular ceiling in one shot.
    let data = Bytes::from(vec![0u8; 11 * 1024 * 1024]);
    let body = build_upload_body("too-big.bin", &data).unwrap();

    let response = app
        .request_raw("POST", "/api/objects/upload", body, &token)
        .await;

    assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(response.body["error"], "QUOTA_EXCEEDED");

    // Nothing was admitted.
    let response = app.request("GET", "/api/objects", None, Some(&token)).await;
    assert_eq!(response.body["data"]["used_bytes"], 0);
}

#[tokio::test]
async fn unknown_tier_account_cannot_store_anything() {
    let app = common::TestApp::new().await;
    let token = app.session_for(4, SubscriptionTier::Unknown).await;

    let body = build_upload_body("tiny.bin", &Bytes::from_static(b"x")).unwrap();
    let response = app
        .request_raw("POST", "/api/objects/upload", body, &token)
        .await;

    assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);
}

#[tokio::test]
async fn download_of_missing_object_is_not_found() {
    let app = common::TestApp::new().await;
    let token = app.session_for(5, SubscriptionTier::Regular).await;

    let (status, _) = app.download("/api/objects/ghost.bin/download", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", "/api/objects/ghost.bin", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn accounts_cannot_see_each_other() {
    let app = common::TestApp::new().await;
    let owner = app.session_for(10, SubscriptionTier::Regular).await;
    let other = app.session_for(11, SubscriptionTier::Regular).await;

    let body = build_upload_body("private.bin", &Bytes::from_static(b"mine")).unwrap();
    app.request_raw("POST", "/api/objects/upload", body, &owner)
        .await;

    let response = app.request("GET", "/api/objects", None, Some(&other)).await;
    assert_eq!(response.body["data"]["objects"], serde_json::json!([]));

    let (status, _) = app
        .download("/api/objects/private.bin/download", &other)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
