//! Integration tests for page initializers and actions.
//!
//! Pages talk to a wiremock server; alerts and confirmations are captured
//! by a scripted prompter.

use peerskill::pages::{self, profile::ProfileEdits};
use peerskill::prompt::ScriptedPrompter;
use peerskill::server::types::SignupForm;
use peerskill::{AppContext, Page, Theme};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(server: &MockServer, confirm: bool) -> (AppContext, ScriptedPrompter) {
    let prompter = ScriptedPrompter::answering(confirm);
    let app = AppContext::in_memory(&server.uri(), Arc::new(prompter.clone())).unwrap();
    (app, prompter)
}

fn student(app: &AppContext) {
    app.session.set_token("abc").unwrap();
    app.session.set_subject_email("ada@example.com").unwrap();
}

async fn reply(server: &MockServer, verb: &str, endpoint: &str, status: u16, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

// ----------------------------------------------------------------------
// Login / signup
// ----------------------------------------------------------------------

#[tokio::test]
async fn test_admin_login_sets_flag_and_credential() {
    let server = MockServer::start().await;
    reply(&server, "POST", "/login", 200, json!({ "status": "ok", "role": "admin", "token": "abc" })).await;
    let (app, prompter) = app(&server, true);

    pages::login::submit(&app, "admin@peerskill.com", "pw").await.unwrap();

    assert!(app.session.is_privileged());
    assert_eq!(app.session.token().as_deref(), Some("abc"));
    assert_eq!(app.session.subject_email(), None);
    assert_eq!(app.navigator.pending(), Some(Page::Admin));
    assert!(prompter.alerts().is_empty());
}

#[tokio::test]
async fn test_student_login_stores_email() {
    let server = MockServer::start().await;
    reply(
        &server,
        "POST",
        "/login",
        200,
        json!({ "status": "ok", "token": "t1", "email": "ada@example.com" }),
    )
    .await;
    let (app, _) = app(&server, true);

    pages::login::submit(&app, "ada@example.com", "pw").await.unwrap();

    assert!(!app.session.is_privileged());
    assert_eq!(app.session.subject_email().as_deref(), Some("ada@example.com"));
    assert_eq!(app.navigator.pending(), Some(Page::Dashboard));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "email": "ada@example.com", "password": "pw" }));
}

#[tokio::test]
async fn test_refused_login_alerts_and_changes_nothing() {
    let server = MockServer::start().await;
    reply(&server, "POST", "/login", 200, json!({ "status": "fail" })).await;
    let (app, prompter) = app(&server, true);
    app.session.set_theme(Theme::Dark).unwrap();

    pages::login::submit(&app, "ada@example.com", "wrong").await.unwrap();

    assert_eq!(prompter.alerts(), vec!["Login failed"]);
    assert_eq!(app.session.snapshot(), Default::default());
    assert_eq!(app.session.theme(), Theme::Dark);
    assert!(app.navigator.pending().is_none());
}

#[tokio::test]
async fn test_login_transport_error_is_reported() {
    let prompter = ScriptedPrompter::default();
    let app = AppContext::in_memory("http://127.0.0.1:9", Arc::new(prompter.clone())).unwrap();

    pages::login::submit(&app, "ada@example.com", "pw").await.unwrap();

    let alert = prompter.last_alert().unwrap();
    assert!(alert.starts_with("Login Error: "), "got {alert}");
    assert!(!app.session.is_signed_in());
}

#[tokio::test]
async fn test_signup_needs_both_skill_lists() {
    let server = MockServer::start().await;
    let (app, prompter) = app(&server, true);
    let form = SignupForm {
        email: "bo@example.com".into(),
        teach: vec!["Go".into()],
        ..SignupForm::default()
    };

    pages::signup::submit(&app, form).await.unwrap();

    assert_eq!(prompter.alerts(), vec!["Add skills!"]);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_signup_success_uses_default_avatar() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    let (app, _) = app(&server, true);
    let form = SignupForm {
        name: "Bo".into(),
        email: "bo@example.com".into(),
        teach: vec!["Go".into()],
        learn: vec!["Rust".into()],
        ..SignupForm::default()
    };

    pages::signup::submit(&app, form).await.unwrap();

    assert_eq!(app.session.subject_email().as_deref(), Some("bo@example.com"));
    assert_eq!(app.navigator.pending(), Some(Page::Dashboard));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["avatar"], "profile_pictures/bot.png");
    assert_eq!(body["studyYear"], "");
}

#[tokio::test]
async fn test_signup_rejection_shows_server_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Email already registered"))
        .mount(&server)
        .await;
    let (app, prompter) = app(&server, true);
    let form = SignupForm {
        email: "bo@example.com".into(),
        teach: vec!["Go".into()],
        learn: vec!["Rust".into()],
        ..SignupForm::default()
    };

    pages::signup::submit(&app, form).await.unwrap();

    assert_eq!(prompter.alerts(), vec!["Email already registered"]);
    assert!(!app.session.is_signed_in());
}

// ----------------------------------------------------------------------
// Dashboard
// ----------------------------------------------------------------------

#[tokio::test]
async fn test_dashboard_without_identity_redirects_to_login() {
    let server = MockServer::start().await;
    let (app, _) = app(&server, true);

    pages::show(&app, Page::Dashboard).await.unwrap();

    assert_eq!(app.navigator.pending(), Some(Page::Login));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_expiry_clears_session_keeps_theme() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let (app, prompter) = app(&server, true);
    student(&app);
    app.session.set_theme(Theme::Dark).unwrap();

    pages::show(&app, Page::Dashboard).await.unwrap();

    assert!(!app.session.is_signed_in());
    assert_eq!(app.session.token(), None);
    assert_eq!(app.session.theme(), Theme::Dark);
    assert_eq!(app.navigator.pending(), Some(Page::Login));
    assert!(prompter.alerts().is_empty());
}

#[tokio::test]
async fn test_request_skill_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request-skill"))
        .and(body_json(json!({ "email": "ada@example.com", "skill": "Docker" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;
    let (app, prompter) = app(&server, true);
    student(&app);

    pages::dashboard::request_skill(&app, "  ").await.unwrap();
    pages::dashboard::request_skill(&app, "Docker").await.unwrap();

    assert_eq!(prompter.alerts(), vec!["Enter a skill", "Request Posted!"]);
}

#[tokio::test]
async fn test_request_skill_refused() {
    let server = MockServer::start().await;
    reply(&server, "POST", "/request-skill", 200, json!({ "status": "error" })).await;
    let (app, prompter) = app(&server, true);
    student(&app);

    pages::dashboard::request_skill(&app, "Docker").await.unwrap();

    assert_eq!(prompter.alerts(), vec!["Failed"]);
}

#[tokio::test]
async fn test_schedule_joins_date_and_time() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/schedule-session"))
        .and(body_json(json!({
            "scheduler": "ada@example.com",
            "peer": "bo@example.com",
            "skill": "Go",
            "dateTime": "2026-10-20 at 18:00"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/my-sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let (app, prompter) = app(&server, true);
    student(&app);

    pages::dashboard::schedule(&app, "bo@example.com", "Go", "2026-10-20", "").await.unwrap();
    pages::dashboard::schedule(&app, "bo@example.com", "Go", "2026-10-20", "18:00").await.unwrap();

    assert_eq!(prompter.alerts(), vec!["Pick date/time", "Scheduled!"]);
}

#[tokio::test]
async fn test_rating_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rate-peer"))
        .and(body_json(json!({ "targetEmail": "bo@example.com", "rating": 4 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rate-peer"))
        .and(body_json(json!({ "targetEmail": "ada@example.com", "rating": 5 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "error", "error": "You cannot rate yourself" })),
        )
        .mount(&server)
        .await;
    let (app, prompter) = app(&server, true);
    student(&app);

    pages::dashboard::rate(&app, "bo@example.com", 0).await.unwrap();
    pages::dashboard::rate(&app, "bo@example.com", 4).await.unwrap();
    pages::dashboard::rate(&app, "ada@example.com", 5).await.unwrap();

    assert_eq!(
        prompter.alerts(),
        vec![
            "Select a star rating",
            "Rating Submitted! +10 Points to Peer.",
            "You cannot rate yourself"
        ]
    );
}

#[tokio::test]
async fn test_blank_search_lists_random_peers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/peers/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/peers/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let (app, _) = app(&server, true);
    student(&app);

    pages::dashboard::search(&app, "   ").await.unwrap();
}

// ----------------------------------------------------------------------
// Profile
// ----------------------------------------------------------------------

#[tokio::test]
async fn test_profile_load_error_is_alerted() {
    let server = MockServer::start().await;
    reply(&server, "POST", "/me", 200, json!({ "error": "User not found" })).await;
    let (app, prompter) = app(&server, true);
    student(&app);

    pages::profile::edit(&app, &ProfileEdits::default()).await.unwrap();

    assert_eq!(prompter.alerts(), vec!["Error loading profile"]);
    assert!(app.navigator.pending().is_none());
}

#[tokio::test]
async fn test_profile_update_round() {
    let server = MockServer::start().await;
    reply(
        &server,
        "POST",
        "/me",
        200,
        json!({ "name": "Ada", "email": "ada@example.com", "teach": ["Rust"], "learn": [] }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/update-profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    let (app, prompter) = app(&server, true);
    student(&app);

    let edits = ProfileEdits {
        branch: Some("ECE".into()),
        add_learn: Some("Piano, piano".into()),
        ..ProfileEdits::default()
    };
    pages::profile::edit(&app, &edits).await.unwrap();

    assert!(prompter.alerts().is_empty());
    assert_eq!(app.navigator.pending(), Some(Page::Dashboard));

    let requests = server.received_requests().await.unwrap();
    let update = requests
        .iter()
        .find(|r| r.url.path() == "/update-profile")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&update.body).unwrap();
    assert_eq!(body["branch"], "ECE");
    assert_eq!(body["learn"], json!(["Piano"]));
    assert_eq!(body["teach"], json!(["Rust"]));
}

#[tokio::test]
async fn test_profile_update_failure() {
    let server = MockServer::start().await;
    reply(&server, "POST", "/me", 200, json!({ "email": "ada@example.com" })).await;
    reply(&server, "POST", "/update-profile", 200, json!({ "status": "error" })).await;
    let (app, prompter) = app(&server, true);
    student(&app);

    pages::profile::edit(&app, &ProfileEdits::default()).await.unwrap();

    assert_eq!(prompter.alerts(), vec!["Update Failed"]);
}

// ----------------------------------------------------------------------
// Admin
// ----------------------------------------------------------------------

#[tokio::test]
async fn test_admin_page_requires_flag() {
    let server = MockServer::start().await;
    let (app, _) = app(&server, true);
    student(&app);

    pages::show(&app, Page::Admin).await.unwrap();

    assert_eq!(app.navigator.pending(), Some(Page::Login));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_points_update() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/update-points"))
        .and(body_json(json!({ "email": "bo@example.com", "points": 120 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;
    let (app, prompter) = app(&server, true);
    app.session.set_privileged(true).unwrap();

    pages::admin::update_points(&app, "bo@example.com", 120).await.unwrap();

    assert_eq!(prompter.alerts(), vec!["Points Updated"]);
}

#[tokio::test]
async fn test_admin_delete_asks_first() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/user"))
        .and(body_json(json!({ "email": "bo@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let (declining, prompter) = app(&server, false);
    declining.session.set_privileged(true).unwrap();
    pages::admin::delete_user(&declining, "bo@example.com").await.unwrap();
    assert_eq!(prompter.questions(), vec!["Delete bo@example.com?"]);
    assert!(declining.navigator.pending().is_none());

    let (confirming, _) = app(&server, true);
    confirming.session.set_privileged(true).unwrap();
    pages::admin::delete_user(&confirming, "bo@example.com").await.unwrap();
    assert_eq!(confirming.navigator.pending(), Some(Page::Admin));
}

// ----------------------------------------------------------------------
// Session lifecycle
// ----------------------------------------------------------------------

#[tokio::test]
async fn test_theme_survives_expiry_but_not_logout() {
    let server = MockServer::start().await;
    reply(&server, "POST", "/me", 403, json!({})).await;
    let (app, _) = app(&server, true);
    student(&app);
    app.session.set_theme(Theme::Dark).unwrap();

    pages::profile::show(&app).await.unwrap();
    assert!(!app.session.is_signed_in());
    assert_eq!(app.session.theme(), Theme::Dark);

    student(&app);
    assert!(pages::account::logout(&app).unwrap());
    assert_eq!(app.session.theme(), Theme::Light);
    assert!(!app.session.is_signed_in());
}

// ----------------------------------------------------------------------
// Notifications on page load
// ----------------------------------------------------------------------

async fn hits(server: &MockServer, endpoint: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == endpoint)
        .count()
}

#[tokio::test]
async fn test_signed_in_page_load_polls_once() {
    let server = MockServer::start().await;
    reply(
        &server,
        "POST",
        "/notifications",
        200,
        json!([
            { "_id": "n1", "message": "Bo scheduled a Go session" },
            { "_id": "n2", "message": "You earned 10 points" }
        ]),
    )
    .await;
    reply(&server, "POST", "/notifications/mark-read", 200, json!({ "status": "ok" })).await;
    let (app, _) = app(&server, true);
    student(&app);

    let poller = app.start_notifications().expect("email is stored");
    pages::show(&app, Page::Home).await.unwrap();
    let shown = app.finish_notifications(poller).await;

    assert_eq!(shown, vec!["Bo scheduled a Go session", "You earned 10 points"]);
    assert_eq!(hits(&server, "/notifications").await, 1);
    assert_eq!(hits(&server, "/notifications/mark-read").await, 1);
}

#[tokio::test]
async fn test_signed_out_page_load_does_not_poll() {
    let server = MockServer::start().await;
    let (app, _) = app(&server, true);

    assert!(app.start_notifications().is_none());
    pages::show(&app, Page::Home).await.unwrap();

    assert_eq!(hits(&server, "/notifications").await, 0);
}
