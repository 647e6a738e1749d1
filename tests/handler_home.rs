mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use axum_extra::extract::cookie::Cookie;
use common::{StubAuthApi, StubResponse, create_test_state, sample_profile};
use login_portal::web::routes::router;

const SUCCESS_NOTICE: &str = "Login successful!";

#[tokio::test]
async fn test_home_without_session_redirects_to_login() {
    let ctx = create_test_state(StubAuthApi::default());
    let server = TestServer::new(router(ctx.state)).unwrap();

    let response = server.get("/").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/login");
}

#[tokio::test]
async fn test_home_with_unknown_session_redirects_to_login() {
    let ctx = create_test_state(StubAuthApi::default());
    let server = TestServer::new(router(ctx.state)).unwrap();

    let response = server
        .get("/")
        .add_cookie(Cookie::new("sid", "does-not-exist"))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/login");
}

#[tokio::test]
async fn test_success_notice_is_shown_once_after_login() {
    let ctx = create_test_state(StubAuthApi::new(vec![StubResponse::Success(
        sample_profile("access-1", 4),
    )]));
    let server = TestServer::new(router(ctx.state)).unwrap();

    let login = server
        .post("/login")
        .form(&[("identifier", "student01"), ("password", "secret")])
        .await;
    login.assert_status(StatusCode::SEE_OTHER);
    let sid = login.cookie("sid");

    let home = server
        .get("/")
        .add_cookie(sid.clone())
        .add_cookie(login.cookie("flash"))
        .await;

    home.assert_status_ok();
    let body = home.text();
    assert_eq!(body.matches(SUCCESS_NOTICE).count(), 1);
    assert!(body.contains("Welcome, minji"));
    assert!(body.contains("kakao-access-1"));
    assert_eq!(home.cookie("flash").value(), "");

    let again = server.get("/").add_cookie(sid).await;

    again.assert_status_ok();
    assert!(!again.text().contains(SUCCESS_NOTICE));
}

#[tokio::test]
async fn test_missing_kakao_account_renders_placeholder() {
    let mut profile = sample_profile("access-1", 1);
    profile.kakao_account = None;
    let ctx = create_test_state(StubAuthApi::new(vec![StubResponse::Success(profile)]));
    let server = TestServer::new(router(ctx.state)).unwrap();

    let login = server
        .post("/login")
        .form(&[("identifier", "student01"), ("password", "secret")])
        .await;
    assert_eq!(ctx.store.len(), 11);

    let home = server.get("/").add_cookie(login.cookie("sid")).await;

    home.assert_status_ok();
    home.assert_text_contains("Welcome, minji");
    home.assert_text_contains("Not linked");
    assert!(!home.text().contains("undefined"));
}

#[tokio::test]
async fn test_null_descriptive_fields_render_fallbacks() {
    let mut profile = sample_profile("access-1", 1);
    profile.nickname = None;
    profile.minor = None;
    let ctx = create_test_state(StubAuthApi::new(vec![StubResponse::Success(profile)]));
    let server = TestServer::new(router(ctx.state)).unwrap();

    let login = server
        .post("/login")
        .form(&[("identifier", "student01"), ("password", "secret")])
        .await;

    let home = server.get("/").add_cookie(login.cookie("sid")).await;

    home.assert_status_ok();
    home.assert_text_contains("Welcome, Kim Minji");
    home.assert_text_contains("<dt>Minor</dt><dd>-</dd>");
}
