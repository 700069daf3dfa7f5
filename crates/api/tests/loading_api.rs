//! Integration tests for the loading workflow and medication endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, patch_json, post_multipart};
use serde_json::json;

const MED_FIELDS: &[(&str, &str)] = &[("name", "Med1"), ("weight", "5.2"), ("code", "ABC123")];

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_medication_onto_idle_drone() {
    let app = common::build_test_app();
    common::register_drone(&app, "D1", "IDLE", 80.0).await;

    let response = post_multipart(&app, "/drones/D1/load", MED_FIELDS, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("Med1"));

    let loaded = body_json(get(&app, "/drones/D1/loaded-medications").await).await;
    let meds = loaded.as_array().unwrap();
    assert_eq!(meds.len(), 1);
    assert_eq!(meds[0]["name"], "Med1");
    assert_eq!(meds[0]["weight"], 5.2);
    assert_eq!(meds[0]["code"], "ABC123");

    // The medication also shows up in the global listing.
    let all = body_json(get(&app, "/medication/all").await).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    // A successful load transitions the drone out of IDLE.
    let available = body_json(get(&app, "/drones/available").await).await;
    assert!(available.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn drone_can_be_loaded_again_after_returning_to_idle() {
    let app = common::build_test_app();
    common::register_drone(&app, "D1", "IDLE", 80.0).await;

    let first = post_multipart(&app, "/drones/D1/load", MED_FIELDS, None).await;
    assert_eq!(first.status(), StatusCode::OK);

    // While in LOADING, further loads are refused.
    let during = post_multipart(
        &app,
        "/drones/D1/load",
        &[("name", "Med2"), ("weight", "3.0"), ("code", "XYZ789")],
        None,
    )
    .await;
    assert_eq!(during.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(during).await["code"], "INVALID_STATE");

    // Abort the load back to IDLE and load again.
    let reset = patch_json(&app, "/drones/D1/state", json!({ "state": "IDLE" })).await;
    assert_eq!(reset.status(), StatusCode::OK);

    let second = post_multipart(
        &app,
        "/drones/D1/load",
        &[("name", "Med2"), ("weight", "3.0"), ("code", "XYZ789")],
        None,
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);

    let loaded = body_json(get(&app, "/drones/D1/loaded-medications").await).await;
    assert_eq!(loaded.as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Failure paths: no rows may be created
// ---------------------------------------------------------------------------

#[tokio::test]
async fn overweight_medication_is_rejected_without_side_effects() {
    let app = common::build_test_app();
    common::register_drone(&app, "D1", "IDLE", 80.0).await;

    // 300g against a 250g limit.
    let response = post_multipart(
        &app,
        "/drones/D1/load",
        &[("name", "Med1"), ("weight", "300"), ("code", "ABC123")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CAPACITY_EXCEEDED");

    // No Medication or DroneMedication row was created.
    let all = body_json(get(&app, "/medication/all").await).await;
    assert!(all.as_array().unwrap().is_empty());
    let loaded = body_json(get(&app, "/drones/D1/loaded-medications").await).await;
    assert!(loaded.as_array().unwrap().is_empty());

    // And the drone is still available.
    let available = body_json(get(&app, "/drones/available").await).await;
    assert_eq!(available.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn loading_a_non_idle_drone_is_rejected() {
    let app = common::build_test_app();
    common::register_drone(&app, "D1", "DELIVERING", 80.0).await;

    let response = post_multipart(&app, "/drones/D1/load", MED_FIELDS, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_STATE");
    assert!(json["error"].as_str().unwrap().contains("IDLE"));
}

#[tokio::test]
async fn loading_an_unknown_drone_is_404() {
    let app = common::build_test_app();

    let response = post_multipart(&app, "/drones/ghost/load", MED_FIELDS, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn loading_a_low_battery_idle_drone_is_rejected() {
    let app = common::build_test_app();
    common::register_drone(&app, "D1", "IDLE", 10.0).await;

    let response = post_multipart(&app, "/drones/D1/load", MED_FIELDS, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PRECONDITION_FAILED");
}

#[tokio::test]
async fn malformed_medication_fields_are_rejected() {
    let app = common::build_test_app();
    common::register_drone(&app, "D1", "IDLE", 80.0).await;

    // Name with a space.
    let response = post_multipart(
        &app,
        "/drones/D1/load",
        &[("name", "Med 1"), ("weight", "5.2"), ("code", "ABC123")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_INPUT");

    // Lowercase code.
    let response = post_multipart(
        &app,
        "/drones/D1/load",
        &[("name", "Med1"), ("weight", "5.2"), ("code", "abc123")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_INPUT");

    // Unparseable weight.
    let response = post_multipart(
        &app,
        "/drones/D1/load",
        &[("name", "Med1"), ("weight", "heavy"), ("code", "ABC123")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_INPUT");

    // Missing code field entirely.
    let response = post_multipart(
        &app,
        "/drones/D1/load",
        &[("name", "Med1"), ("weight", "5.2")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_INPUT");
    assert!(json["error"].as_str().unwrap().contains("code"));

    // None of the failures committed anything.
    let all = body_json(get(&app, "/medication/all").await).await;
    assert!(all.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Image handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn image_upload_is_stored_and_served_by_reference() {
    let app = common::build_test_app();
    common::register_drone(&app, "D1", "IDLE", 80.0).await;

    let png = [0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
    let response = post_multipart(&app, "/drones/D1/load", MED_FIELDS, Some(("med.png", &png))).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The record carries only the opaque reference, never the bytes.
    let loaded = body_json(get(&app, "/drones/D1/loaded-medications").await).await;
    let image_ref = loaded[0]["image"].as_str().expect("image reference").to_string();

    let image = get(&app, &format!("/medication/image/{image_ref}")).await;
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(
        image.headers().get("content-type").unwrap(),
        "image/png"
    );

    use http_body_util::BodyExt;
    let bytes = image.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), &png);
}

#[tokio::test]
async fn load_without_image_omits_the_reference() {
    let app = common::build_test_app();
    common::register_drone(&app, "D1", "IDLE", 80.0).await;

    let response = post_multipart(&app, "/drones/D1/load", MED_FIELDS, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let loaded = body_json(get(&app, "/drones/D1/loaded-medications").await).await;
    assert!(loaded[0].get("image").is_none());
}

#[tokio::test]
async fn unknown_image_reference_is_404() {
    let app = common::build_test_app();

    let response = get(
        &app,
        "/medication/image/00000000-0000-0000-0000-000000000000",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
