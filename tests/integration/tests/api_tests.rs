//! API integration tests
//!
//! Each test spawns the real router over TCP with in-memory stores, so no
//! PostgreSQL or Redis is needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{unique_email, Reply, TestServer, TEST_PASSWORD};
use matchday_common::{messages::codes, t};
use matchday_core::value_objects::AccessFlags;
use reqwest::{Method, StatusCode};
use serde_json::json;

const ME: &str = "/api/v1/users/@me";

fn access_cookie(reply: &Reply) -> String {
    reply.cookies["access_token"].value.clone()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let reply = server.anonymous_browser().get("/health").await.unwrap();
    reply.expect_status(StatusCode::OK);
    assert_eq!(reply.body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_database_outage() {
    let server = TestServer::start().await.unwrap();
    let browser = server.anonymous_browser();

    browser
        .get("/health/ready")
        .await
        .unwrap()
        .expect_status(StatusCode::OK);

    server.stores.database.set_down(true);
    let reply = browser.get("/health/ready").await.unwrap();
    reply.expect_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(reply.body["checks"]["database"], "unhealthy");
    assert_eq!(reply.body["checks"]["cache"], "healthy");
}

// ============================================================================
// Login, gate and refresh
// ============================================================================

#[tokio::test]
async fn test_login_gate_refresh_cycle_picks_up_current_flags() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    let user = server
        .stores
        .users
        .seed(&email, AccessFlags::member(), true);
    let browser = server.browser("1.1.1.1");

    let login = browser.login(&email, TEST_PASSWORD).await.unwrap();
    login.expect_status(StatusCode::OK);
    assert_eq!(login.body["success"], true);
    assert_eq!(login.body["message"], t(codes::LOGIN_SUCCESS));
    assert_eq!(login.data()["id"], user.id.to_string());

    let access = &login.cookies["access_token"];
    assert!(access.http_only());
    assert_eq!(access.attribute("SameSite"), Some("Strict"));
    assert_eq!(access.attribute("Max-Age"), Some("1800"));
    let refresh = &login.cookies["refresh_token"];
    assert!(refresh.http_only());
    assert_eq!(refresh.attribute("SameSite"), Some("Strict"));
    assert_eq!(refresh.attribute("Max-Age"), Some("604800"));
    let csrf = &login.cookies["csrf_token"];
    assert!(!csrf.http_only());
    assert_eq!(csrf.attribute("SameSite"), Some("Lax"));

    let token = access_cookie(&login);
    let me = browser.get_bearer(ME, &token).await.unwrap();
    me.expect_status(StatusCode::OK);
    assert_eq!(me.data()["id"], user.id.to_string());
    assert_eq!(me.data()["isAdmin"], false);
    assert_eq!(me.data()["hasAccess"], true);

    // The gate trusts the token until the next refresh
    server.stores.users.set_flags(user.id, AccessFlags::admin());
    let me = browser.get_bearer(ME, &token).await.unwrap();
    assert_eq!(me.data()["isAdmin"], false);

    // Access token gone; only the refresh token is left
    browser.remove_cookie("access_token");
    let session = browser.get("/api/v1/auth/session").await.unwrap();
    session.expect_status(StatusCode::OK);
    assert_eq!(session.data()["refreshed"], true);
    assert_eq!(session.data()["isAdmin"], true);
    assert_eq!(session.data()["userId"], user.id.to_string());

    let new_token = access_cookie(&session);
    assert_ne!(new_token, token);
    let me = browser.get_bearer(ME, &new_token).await.unwrap();
    me.expect_status(StatusCode::OK);
    assert_eq!(me.data()["isAdmin"], true);
}

#[tokio::test]
async fn test_session_probe_with_live_access_token() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.browser("1.1.1.1");
    browser.login(&email, TEST_PASSWORD).await.unwrap();

    let session = browser.get("/api/v1/auth/session").await.unwrap();
    session.expect_status(StatusCode::OK);
    assert_eq!(session.data()["refreshed"], false);
    assert!(!session.cookies.contains_key("access_token"));
}

#[tokio::test]
async fn test_session_probe_without_cookies_clears_refresh_cookie() {
    let server = TestServer::start().await.unwrap();
    let browser = server.browser("1.1.1.1");
    browser.set_cookie("refresh_token", "not-a-real-token");

    let reply = browser.get("/api/v1/auth/session").await.unwrap();
    reply.expect_status(StatusCode::UNAUTHORIZED);
    assert!(reply.cookies["refresh_token"].is_removal());
    assert_eq!(browser.cookie("refresh_token"), None);
}

#[tokio::test]
async fn test_refresh_does_not_rotate_refresh_token() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    let user = server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.browser("1.1.1.1");
    browser.login(&email, TEST_PASSWORD).await.unwrap();
    let refresh_before = browser.cookie("refresh_token").unwrap();

    let reply = browser.post("/api/v1/auth/refresh").await.unwrap();
    reply.expect_status(StatusCode::OK);
    assert_eq!(reply.body["message"], t(codes::TOKEN_REFRESHED));
    assert!(reply.cookies.contains_key("access_token"));
    assert!(!reply.cookies.contains_key("refresh_token"));
    assert_eq!(
        server.stores.refresh_tokens.token_for(user.id),
        Some(refresh_before)
    );
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_fail_alike() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.browser("1.1.1.1");

    let wrong_password = browser.login(&email, "Wrong-password-1").await.unwrap();
    let unknown_email = browser
        .login(&unique_email(), TEST_PASSWORD)
        .await
        .unwrap();

    wrong_password.expect_status(StatusCode::UNAUTHORIZED);
    unknown_email.expect_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.code(), Some("INVALID_CREDENTIALS"));
}

// ============================================================================
// Authorization gate
// ============================================================================

#[tokio::test]
async fn test_gate_rejects_missing_or_non_bearer_header() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.browser("1.1.1.1");
    browser.login(&email, TEST_PASSWORD).await.unwrap();

    // Cookies alone do not pass the gate
    let reply = browser.get(ME).await.unwrap();
    reply.expect_status(StatusCode::UNAUTHORIZED);
    assert_eq!(reply.code(), Some("MISSING_AUTH"));

    let token = browser.cookie("access_token").unwrap();
    let reply = browser
        .send(
            browser
                .request(Method::GET, ME)
                .header("authorization", format!("Basic {token}")),
        )
        .await
        .unwrap();
    reply.expect_status(StatusCode::UNAUTHORIZED);
    assert_eq!(reply.code(), Some("MISSING_AUTH"));

    let reply = browser.get_bearer(ME, "garbage").await.unwrap();
    reply.expect_status(StatusCode::UNAUTHORIZED);
    assert_eq!(reply.code(), Some("INVALID_TOKEN"));
}

#[tokio::test]
async fn test_gate_scheme_is_case_insensitive() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.browser("1.1.1.1");
    browser.login(&email, TEST_PASSWORD).await.unwrap();
    let token = browser.cookie("access_token").unwrap();

    for scheme in ["bearer", "BEARER"] {
        browser
            .send(
                browser
                    .request(Method::GET, ME)
                    .header("authorization", format!("{scheme} {token}")),
            )
            .await
            .unwrap()
            .expect_status(StatusCode::OK);
    }

    // A scheme with no credentials is not a bearer header at all
    let reply = browser
        .send(browser.request(Method::GET, ME).header("authorization", "Bearer"))
        .await
        .unwrap();
    reply.expect_status(StatusCode::UNAUTHORIZED);
    assert_eq!(reply.code(), Some("MISSING_AUTH"));
}

#[tokio::test]
async fn test_token_replayed_from_other_client_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.browser("1.1.1.1");
    let token = access_cookie(&browser.login(&email, TEST_PASSWORD).await.unwrap());

    browser
        .get_bearer(ME, &token)
        .await
        .unwrap()
        .expect_status(StatusCode::OK);

    let other_ip = browser.moved_to("2.2.2.2");
    let reply = other_ip.get_bearer(ME, &token).await.unwrap();
    reply.expect_status(StatusCode::UNAUTHORIZED);
    assert_eq!(reply.code(), Some("INVALID_TOKEN"));

    let mut other_agent = server.browser("1.1.1.1");
    other_agent.user_agent = Some("curl/8.5.0".to_string());
    other_agent
        .get_bearer(ME, &token)
        .await
        .unwrap()
        .expect_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn test_sixth_login_in_window_is_rate_limited() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.browser("3.3.3.3");

    for _ in 0..5 {
        browser
            .login(&email, "Wrong-password-1")
            .await
            .unwrap()
            .expect_status(StatusCode::UNAUTHORIZED);
    }

    // Denied before the credentials are even looked at
    let reply = browser.login(&email, TEST_PASSWORD).await.unwrap();
    reply.expect_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(reply.code(), Some("RATE_LIMIT_EXCEEDED"));
    assert_eq!(reply.headers["retry-after"], "60");
    assert_eq!(reply.data()["retryAfter"], 60);

    // Other clients are counted separately
    server
        .browser("4.4.4.4")
        .login(&email, TEST_PASSWORD)
        .await
        .unwrap()
        .expect_status(StatusCode::OK);

    // A new window starts once the counter expires
    server.stores.cache.advance(60);
    browser
        .login(&email, TEST_PASSWORD)
        .await
        .unwrap()
        .expect_status(StatusCode::OK);
}

#[tokio::test]
async fn test_login_without_client_address_fails_closed() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.anonymous_browser();

    let reply = browser.login(&email, TEST_PASSWORD).await.unwrap();
    reply.expect_status(StatusCode::BAD_REQUEST);
    assert_eq!(reply.code(), Some("CLIENT_IP_UNKNOWN"));

    let reply = browser
        .send(
            browser
                .request(Method::POST, "/api/v1/auth/login")
                .header("x-real-ip", "5.5.5.5")
                .json(&json!({ "email": email, "password": TEST_PASSWORD })),
        )
        .await
        .unwrap();
    reply.expect_status(StatusCode::OK);
}

// ============================================================================
// Refresh token slot
// ============================================================================

#[tokio::test]
async fn test_second_login_replaces_refresh_token() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    let user = server.stores.users.seed(&email, AccessFlags::member(), true);
    let laptop = server.browser("1.1.1.1");
    let phone = server.browser("6.6.6.6");

    laptop.login(&email, TEST_PASSWORD).await.unwrap();
    phone.login(&email, TEST_PASSWORD).await.unwrap();

    assert_eq!(server.stores.refresh_tokens.len(), 1);
    assert_eq!(
        server.stores.refresh_tokens.token_for(user.id),
        phone.cookie("refresh_token")
    );

    let reply = laptop.post("/api/v1/auth/refresh").await.unwrap();
    reply.expect_status(StatusCode::UNAUTHORIZED);
    assert_eq!(reply.code(), Some("INVALID_REFRESH_TOKEN"));
    assert!(reply.cookies["refresh_token"].is_removal());

    phone
        .post("/api/v1/auth/refresh")
        .await
        .unwrap()
        .expect_status(StatusCode::OK);
}

// ============================================================================
// Unverified accounts
// ============================================================================

#[tokio::test]
async fn test_unverified_login_resends_mail_once_per_cooldown() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    server.stores.users.seed(&email, AccessFlags::default(), false);
    let browser = server.browser("7.7.7.7");

    let reply = browser.login(&email, TEST_PASSWORD).await.unwrap();
    reply.expect_status(StatusCode::FORBIDDEN);
    assert_eq!(reply.code(), Some("ACCOUNT_NOT_VERIFIED"));
    assert_eq!(reply.data()["remainingTime"], 300);
    assert!(!reply.cookies.contains_key("access_token"));
    assert_eq!(server.stores.mailer.sent_to(&email), 1);

    let reply = browser.login(&email, TEST_PASSWORD).await.unwrap();
    reply.expect_status(StatusCode::FORBIDDEN);
    let remaining = reply.data()["remainingTime"].as_u64().unwrap();
    assert!(remaining > 0 && remaining <= 300);
    assert_eq!(server.stores.mailer.sent_to(&email), 1);

    server.stores.cache.advance(300);
    browser
        .login(&email, TEST_PASSWORD)
        .await
        .unwrap()
        .expect_status(StatusCode::FORBIDDEN);
    assert_eq!(server.stores.mailer.sent_to(&email), 2);
}

#[tokio::test]
async fn test_unverified_login_reports_mailer_failure() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    server.stores.users.seed(&email, AccessFlags::default(), false);
    server.stores.mailer.set_failing(true);

    let browser = server.browser("7.7.7.8");
    let reply = browser.login(&email, TEST_PASSWORD).await.unwrap();
    reply.expect_status(StatusCode::BAD_GATEWAY);
    assert_eq!(reply.code(), Some("EXTERNAL_SERVICE_ERROR"));

    // The failed send leaves the cooldown open for the next attempt
    server.stores.mailer.set_failing(false);
    browser
        .login(&email, TEST_PASSWORD)
        .await
        .unwrap()
        .expect_status(StatusCode::FORBIDDEN);
    assert_eq!(server.stores.mailer.sent_to(&email), 1);
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_creates_unverified_account() {
    let server = TestServer::start().await.unwrap();
    let browser = server.browser("8.8.8.8");
    let email = unique_email();

    let reply = browser
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": email.to_uppercase(), "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();
    reply.expect_status(StatusCode::CREATED);
    assert_eq!(reply.data()["email"], email);
    assert_eq!(reply.data()["isVerified"], false);
    assert_eq!(reply.data()["isAdmin"], false);
    assert_eq!(reply.data()["hasAccess"], false);
    assert_eq!(server.stores.mailer.sent_to(&email), 1);

    let duplicate = browser
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": email, "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();
    duplicate.expect_status(StatusCode::CONFLICT);

    let login = browser.login(&email, TEST_PASSWORD).await.unwrap();
    login.expect_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_survives_mailer_failure() {
    let server = TestServer::start().await.unwrap();
    server.stores.mailer.set_failing(true);
    let email = unique_email();

    server
        .browser("8.8.8.9")
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": email, "password": TEST_PASSWORD }),
        )
        .await
        .unwrap()
        .expect_status(StatusCode::CREATED);
    assert!(server.stores.users.find_email(&email).is_some());
}

#[tokio::test]
async fn test_register_rejects_bad_input_and_is_rate_limited() {
    let server = TestServer::start().await.unwrap();
    let browser = server.browser("9.9.9.9");

    let weak = browser
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": unique_email(), "password": "alllowercase1" }),
        )
        .await
        .unwrap();
    weak.expect_status(StatusCode::BAD_REQUEST);

    let bad_email = browser
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": "not-an-email", "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();
    bad_email.expect_status(StatusCode::BAD_REQUEST);

    browser
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": unique_email(), "password": TEST_PASSWORD }),
        )
        .await
        .unwrap()
        .expect_status(StatusCode::CREATED);

    let limited = browser
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": unique_email(), "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();
    limited.expect_status(StatusCode::TOO_MANY_REQUESTS);
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_requires_matching_csrf_header() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    let user = server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.browser("1.1.1.1");
    browser.login(&email, TEST_PASSWORD).await.unwrap();

    let reply = browser.post("/api/v1/auth/logout").await.unwrap();
    reply.expect_status(StatusCode::FORBIDDEN);
    assert_eq!(reply.code(), Some("CSRF_MISMATCH"));
    assert!(reply.cookies.is_empty());

    let reply = browser
        .send(
            browser
                .request(Method::POST, "/api/v1/auth/logout")
                .header("x-csrf-token", "forged"),
        )
        .await
        .unwrap();
    reply.expect_status(StatusCode::FORBIDDEN);
    assert!(server.stores.refresh_tokens.token_for(user.id).is_some());

    let refresh_token = browser.cookie("refresh_token").unwrap();
    let reply = browser.logout().await.unwrap();
    reply.expect_status(StatusCode::OK);
    assert_eq!(reply.body["message"], t(codes::LOGOUT_SUCCESS));
    for name in ["access_token", "refresh_token", "csrf_token"] {
        assert!(reply.cookies[name].is_removal(), "{name} not cleared");
    }
    assert!(server.stores.refresh_tokens.is_empty());

    // The revoked refresh token is dead
    browser.set_cookie("refresh_token", &refresh_token);
    browser
        .post("/api/v1/auth/refresh")
        .await
        .unwrap()
        .expect_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_falls_back_to_refresh_token() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.browser("1.1.1.1");
    browser.login(&email, TEST_PASSWORD).await.unwrap();

    browser.remove_cookie("access_token");
    let reply = browser.logout().await.unwrap();
    reply.expect_status(StatusCode::OK);
    assert_eq!(reply.body["message"], t(codes::LOGOUT_SUCCESS));
    assert!(server.stores.refresh_tokens.is_empty());
}

#[tokio::test]
async fn test_logout_without_session_is_idempotent() {
    let server = TestServer::start().await.unwrap();
    let browser = server.browser("1.1.1.1");
    browser.set_cookie("csrf_token", "abc");

    let reply = browser.logout().await.unwrap();
    reply.expect_status(StatusCode::OK);
    assert_eq!(reply.body["message"], t(codes::SESSION_ALREADY_ENDED));
    assert!(reply.cookies["csrf_token"].is_removal());
}

// ============================================================================
// Administration
// ============================================================================

#[tokio::test]
async fn test_admin_purges_user() {
    let server = TestServer::start().await.unwrap();
    let admin_email = unique_email();
    let member_email = unique_email();
    let admin = server
        .stores
        .users
        .seed(&admin_email, AccessFlags::admin(), true);
    let member = server
        .stores
        .users
        .seed(&member_email, AccessFlags::member(), true);

    let admin_browser = server.browser("10.0.0.1");
    let admin_token = access_cookie(&admin_browser.login(&admin_email, TEST_PASSWORD).await.unwrap());
    let member_browser = server.browser("10.0.0.2");
    let member_token =
        access_cookie(&member_browser.login(&member_email, TEST_PASSWORD).await.unwrap());

    // Members cannot purge
    let reply = member_browser
        .delete_bearer(&format!("/api/v1/admin/users/{}", admin.id), &member_token)
        .await
        .unwrap();
    reply.expect_status(StatusCode::FORBIDDEN);
    assert_eq!(reply.code(), Some("INSUFFICIENT_PERMISSIONS"));

    // Nor can admins purge themselves
    admin_browser
        .delete_bearer(&format!("/api/v1/admin/users/{}", admin.id), &admin_token)
        .await
        .unwrap()
        .expect_status(StatusCode::BAD_REQUEST);

    admin_browser
        .delete_bearer("/api/v1/admin/users/not-a-uuid", &admin_token)
        .await
        .unwrap()
        .expect_status(StatusCode::BAD_REQUEST);

    let reply = admin_browser
        .delete_bearer(&format!("/api/v1/admin/users/{}", member.id), &admin_token)
        .await
        .unwrap();
    reply.expect_status(StatusCode::OK);
    assert_eq!(reply.body["message"], t(codes::USER_DELETED));
    assert!(server.stores.users.get(member.id).is_none());
    assert!(server.stores.refresh_tokens.token_for(member.id).is_none());

    admin_browser
        .delete_bearer(&format!("/api/v1/admin/users/{}", member.id), &admin_token)
        .await
        .unwrap()
        .expect_status(StatusCode::NOT_FOUND);

    member_browser
        .post("/api/v1/auth/refresh")
        .await
        .unwrap()
        .expect_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_revokes_sessions() {
    let server = TestServer::start().await.unwrap();
    let admin_email = unique_email();
    let member_email = unique_email();
    server
        .stores
        .users
        .seed(&admin_email, AccessFlags::admin(), true);
    let member = server
        .stores
        .users
        .seed(&member_email, AccessFlags::member(), true);

    let admin_browser = server.browser("10.0.0.1");
    let admin_token = access_cookie(&admin_browser.login(&admin_email, TEST_PASSWORD).await.unwrap());
    server
        .browser("10.0.0.2")
        .login(&member_email, TEST_PASSWORD)
        .await
        .unwrap();

    let path = format!("/api/v1/admin/users/{}/sessions", member.id);
    let reply = admin_browser.delete_bearer(&path, &admin_token).await.unwrap();
    reply.expect_status(StatusCode::OK);
    assert_eq!(reply.data()["revoked"], 1);
    assert_eq!(reply.data()["userId"], member.id.to_string());
    assert!(server.stores.users.get(member.id).is_some());

    let reply = admin_browser.delete_bearer(&path, &admin_token).await.unwrap();
    assert_eq!(reply.data()["revoked"], 0);
}

// ============================================================================
// Internal endpoints
// ============================================================================

#[tokio::test]
async fn test_internal_revoke_requires_internal_token() {
    let server = TestServer::start().await.unwrap();
    let email = unique_email();
    let user = server.stores.users.seed(&email, AccessFlags::member(), true);
    let browser = server.browser("1.1.1.1");
    let user_token = access_cookie(&browser.login(&email, TEST_PASSWORD).await.unwrap());
    let path = format!("/internal/users/{}/revoke-sessions", user.id);

    let reply = browser.post(&path).await.unwrap();
    reply.expect_status(StatusCode::UNAUTHORIZED);
    assert_eq!(reply.code(), Some("MISSING_AUTH"));

    // A user access token is not an internal token
    browser
        .send(
            browser
                .request(Method::POST, &path)
                .header("authorization", format!("Bearer {user_token}")),
        )
        .await
        .unwrap()
        .expect_status(StatusCode::UNAUTHORIZED);

    let internal = server.internal_token("scheduler");

    // ...and the other way round
    browser
        .get_bearer(ME, &internal)
        .await
        .unwrap()
        .expect_status(StatusCode::UNAUTHORIZED);

    let reply = browser
        .send(
            browser
                .request(Method::POST, &path)
                .header("authorization", format!("Bearer {internal}")),
        )
        .await
        .unwrap();
    reply.expect_status(StatusCode::OK);
    assert_eq!(reply.data()["revoked"], 1);
    assert!(server.stores.refresh_tokens.is_empty());
}
