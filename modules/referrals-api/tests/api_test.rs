//! End-to-end tests for the HTTP layer over a migrated in-memory database.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use referrals_api::config::RedirectConfig;
use referrals_api::{build_router, AppState};
use referrals_core::DbHandles;

const SIGNUP_URL: &str = "https://example.com/signup";

async fn test_app() -> Router {
    let db = DbHandles::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let redirect = RedirectConfig {
        signup_url: SIGNUP_URL.to_string(),
        cookie_path: "/".to_string(),
        cookie_domain: "example.com".to_string(),
    };
    build_router(Arc::new(AppState::new(db, redirect)))
}

/// A 43 character address that passes validation.
fn address(c: char) -> String {
    format!("tp1{}", c.to_string().repeat(40))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create_campaign(app: &Router, owner: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        with_json(
            "POST",
            "/referrals/api/v1/campaigns",
            json!({ "address": owner, "name": name }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["campaign"]["id"].as_i64().unwrap()
}

// =========================================================================
// Campaigns
// =========================================================================

#[tokio::test]
async fn create_and_fetch_campaign() {
    let app = test_app().await;
    let owner = address('a');

    let id = create_campaign(&app, &format!("  {owner} "), "  Launch ").await;

    let (status, body) = send(&app, get(&format!("/referrals/api/v1/campaigns/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["campaign"]["address"], owner.as_str());
    assert_eq!(body["campaign"]["name"], "Launch");
    assert!(body["campaign"]["createdAt"].is_string());
    assert!(body["campaign"]["updatedAt"].is_string());
}

#[tokio::test]
async fn create_campaign_validates_address() {
    let app = test_app().await;

    let rejected = vec![
        String::new(),
        "tpabc123".to_string(),
        address('a').to_uppercase(),
        format!("xx{}", "a".repeat(41)),
    ];
    for bad in rejected {
        let (status, body) = send(
            &app,
            with_json("POST", "/referrals/api/v1/campaigns", json!({ "address": bad.clone() })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
        assert!(body["error"].is_string());
    }

    let (status, _) = send(
        &app,
        with_json("POST", "/referrals/api/v1/campaigns", json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_campaign_errors() {
    let app = test_app().await;

    let (status, _) = send(&app, get("/referrals/api/v1/campaigns/77")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/referrals/api/v1/campaigns/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_campaigns_pages_by_cursor() {
    let app = test_app().await;
    let owner = address('a');

    let mut ids = Vec::new();
    for name in ["one", "two", "three"] {
        ids.push(create_campaign(&app, &owner, name).await);
    }

    let uri = format!("/referrals/api/v1/campaigns?address={owner}&limit=2");
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    let page: Vec<i64> = body["campaigns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(page, ids[..2]);
    assert_eq!(body["cursor"], ids[1]);

    let uri = format!("/referrals/api/v1/campaigns?address={owner}&limit=2&cursor={}", ids[1]);
    let (_, body) = send(&app, get(&uri)).await;
    assert_eq!(body["campaigns"].as_array().unwrap().len(), 1);
    assert_eq!(body["cursor"], ids[2]);

    let uri = format!("/referrals/api/v1/campaigns?address={owner}&cursor={}", ids[2]);
    let (_, body) = send(&app, get(&uri)).await;
    assert!(body["campaigns"].as_array().unwrap().is_empty());
    assert_eq!(body["cursor"], 0);
}

#[tokio::test]
async fn list_campaigns_requires_address() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/referrals/api/v1/campaigns")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "address query param is required");
}

#[tokio::test]
async fn malformed_paging_params_get_json_errors() {
    let app = test_app().await;
    let owner = address('a');
    let id = create_campaign(&app, &owner, "Launch").await;

    let uri = format!("/referrals/api/v1/campaigns?address={owner}&limit=abc");
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("limit"));

    let uri = format!("/referrals/api/v1/campaigns/{id}/signups?cursor=zz");
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cursor"));
}

// =========================================================================
// Signups
// =========================================================================

#[tokio::test]
async fn signup_lifecycle() {
    let app = test_app().await;
    let owner = address('a');
    let referee = address('b');
    let id = create_campaign(&app, &owner, "Launch").await;
    let signups_uri = format!("/referrals/api/v1/campaigns/{id}/signups");

    let (status, body) = send(&app, with_json("POST", &signups_uri, json!({ "address": referee }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signup"]["status"], "pending");
    assert_eq!(body["signup"]["campaignId"], id);
    let sid = body["signup"]["id"].as_i64().unwrap();

    // Self referral
    let (status, _) = send(&app, with_json("POST", &signups_uri, json!({ "address": owner }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Duplicate address
    let (status, _) = send(&app, with_json("POST", &signups_uri, json!({ "address": referee }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, get(&signups_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signups"].as_array().unwrap().len(), 1);
    assert_eq!(body["cursor"], sid);

    let (status, body) = send(
        &app,
        with_json("PATCH", &format!("{signups_uri}/{sid}"), json!({ "status": " Verified " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signup"]["status"], "verified");
}

#[tokio::test]
async fn signup_routes_require_existing_campaign() {
    let app = test_app().await;

    let (status, _) = send(&app, get("/referrals/api/v1/campaigns/5/signups")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        with_json(
            "POST",
            "/referrals/api/v1/campaigns/5/signups",
            json!({ "address": address('b') }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        with_json(
            "PATCH",
            "/referrals/api/v1/campaigns/5/signups/1",
            json!({ "status": "verified" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_signup_rejects_other_campaign_and_bad_status() {
    let app = test_app().await;
    let first = create_campaign(&app, &address('a'), "First").await;
    let second = create_campaign(&app, &address('b'), "Second").await;

    let (_, body) = send(
        &app,
        with_json(
            "POST",
            &format!("/referrals/api/v1/campaigns/{first}/signups"),
            json!({ "address": address('c') }),
        ),
    )
    .await;
    let sid = body["signup"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        with_json(
            "PATCH",
            &format!("/referrals/api/v1/campaigns/{second}/signups/{sid}"),
            json!({ "status": "verified" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        with_json(
            "PATCH",
            &format!("/referrals/api/v1/campaigns/{first}/signups/{sid}"),
            json!({ "status": "rejected" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid status variant: rejected");

    let (_, body) = send(&app, get(&format!("/referrals/api/v1/campaigns/{first}/signups"))).await;
    assert_eq!(body["signups"][0]["status"], "pending");
}

// =========================================================================
// Redirect flow
// =========================================================================

#[tokio::test]
async fn signup_redirect_sets_cookie_for_known_campaign() {
    let app = test_app().await;
    let id = create_campaign(&app, &address('a'), "Launch").await;

    let response = app
        .clone()
        .oneshot(get(&format!("/referrals/{id}/signup")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], SIGNUP_URL);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("_referral_campaign={id};")));
    assert!(cookie.contains("Domain=example.com"));
}

#[tokio::test]
async fn signup_redirect_without_campaign_sets_no_cookie() {
    let app = test_app().await;

    for uri in ["/referrals/404/signup", "/referrals/nope/signup"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], SIGNUP_URL);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}

#[tokio::test]
async fn referral_cookie_records_signup() {
    let app = test_app().await;
    let id = create_campaign(&app, &address('a'), "Launch").await;
    let referee = address('b');

    let request = Request::builder()
        .uri("/referrals?url=https://example.com/welcome")
        .header("x-account-address", referee.as_str())
        .header(header::COOKIE, format!("theme=dark; _referral_campaign={id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/welcome"
    );

    let (_, body) = send(&app, get(&format!("/referrals/api/v1/campaigns/{id}/signups"))).await;
    let signups = body["signups"].as_array().unwrap();
    assert_eq!(signups.len(), 1);
    assert_eq!(signups[0]["address"], referee.as_str());
}

#[tokio::test]
async fn referral_without_cookie_or_address_only_redirects() {
    let app = test_app().await;
    let id = create_campaign(&app, &address('a'), "Launch").await;

    let no_cookie = Request::builder()
        .uri("/referrals")
        .header("x-account-address", address('b').as_str())
        .body(Body::empty())
        .unwrap();
    let no_address = Request::builder()
        .uri("/referrals")
        .header(header::COOKIE, format!("_referral_campaign={id}"))
        .body(Body::empty())
        .unwrap();
    let self_referral = Request::builder()
        .uri("/referrals")
        .header("x-account-address", address('a').as_str())
        .header(header::COOKIE, format!("_referral_campaign={id}"))
        .body(Body::empty())
        .unwrap();

    for request in [no_cookie, no_address, self_referral] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], SIGNUP_URL);
    }

    let (_, body) = send(&app, get(&format!("/referrals/api/v1/campaigns/{id}/signups"))).await;
    assert!(body["signups"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_is_ok() {
    let app = test_app().await;
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
