//! API client for the PeerSkill backend.
//!
//! This module provides the [`ApiClient`] struct, one method per endpoint.
//! Page calls go through [`SessionGate::fetch`](crate::gate::SessionGate::fetch),
//! so an expired credential is handled in one place. `/login` and `/signup`
//! are sent without credential. The two notification endpoints carry the
//! credential but never expire the session.

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::types::{
    LoginRequest, LoginResponse, MarkReadRequest, Notification, ProfileUpdate, RatingRequest,
    ScheduleRequest, ScheduledSession, SignupForm, SkillRequest, StatusResponse, UserProfile,
};
use crate::error::{ClientError, ClientResult};
use crate::gate::{RequestOptions, SessionGate};
use crate::session::SessionContext;

/// Typed client for the PeerSkill API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    gate: SessionGate,
}

impl ApiClient {
    /// Creates a client on top of a session gate.
    pub fn new(gate: SessionGate) -> Self {
        Self { gate }
    }

    /// The gate requests go through.
    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    /// Session state shared with the gate.
    pub fn session(&self) -> &SessionContext {
        self.gate.session()
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    /// Signs in. Sent without credential; the reply is returned whatever
    /// its `status`, the caller decides what a refusal means.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = to_body(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        let response = self
            .gate
            .fetch_unauthenticated("/login", RequestOptions::post(body))
            .await?;
        Ok(response.json().await?)
    }

    /// Creates an account. A non-2xx reply fails with the body text as the
    /// application message.
    pub async fn signup(&self, form: &SignupForm) -> ClientResult<()> {
        let response = self
            .gate
            .fetch_unauthenticated("/signup", RequestOptions::post(to_body(form)?))
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let text = response.text().await?;
        log::warn!("Signup rejected: {status}");
        Err(ClientError::Application(Some(text).filter(|t| !t.is_empty())))
    }

    /// Loads a user's own profile.
    pub async fn me(&self, email: &str) -> ClientResult<UserProfile> {
        let profile: UserProfile = self
            .post("/me", json!({ "email": email }))
            .await?
            .json()
            .await?;

        if let Some(error) = profile.error {
            return Err(ClientError::Application(Some(error)));
        }
        Ok(profile)
    }

    /// Saves profile edits.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<()> {
        expect_ok(self.post("/update-profile", to_body(update)?).await?).await
    }

    // ------------------------------------------------------------------
    // Matchmaking
    // ------------------------------------------------------------------

    /// Peers whose teach list matches what `email` wants to learn.
    pub async fn recommendations(&self, email: &str) -> ClientResult<Vec<UserProfile>> {
        list(self.post("/recommendations", json!({ "email": email })).await?).await
    }

    /// A random sample of other users.
    pub async fn random_peers(&self, email: &str) -> ClientResult<Vec<UserProfile>> {
        list(self.post("/peers/random", json!({ "email": email })).await?).await
    }

    /// Free-text peer search.
    pub async fn search_peers(&self, email: &str, query: &str) -> ClientResult<Vec<UserProfile>> {
        list(
            self.post("/peers/search", json!({ "email": email, "query": query }))
                .await?,
        )
        .await
    }

    /// Users ordered by skill points.
    pub async fn leaderboard(&self) -> ClientResult<Vec<UserProfile>> {
        list(self.get("/peers/leaderboard").await?).await
    }

    /// Open community skill requests.
    pub async fn active_requests(&self) -> ClientResult<Vec<SkillRequest>> {
        list(self.get("/active-requests").await?).await
    }

    /// Posts a community request for `skill`.
    pub async fn request_skill(&self, email: &str, skill: &str) -> ClientResult<()> {
        expect_ok(
            self.post("/request-skill", json!({ "email": email, "skill": skill }))
                .await?,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Sessions & ratings
    // ------------------------------------------------------------------

    /// Sessions `email` takes part in.
    pub async fn my_sessions(&self, email: &str) -> ClientResult<Vec<ScheduledSession>> {
        list(self.post("/my-sessions", json!({ "email": email })).await?).await
    }

    /// Books a session with a peer.
    pub async fn schedule_session(&self, request: &ScheduleRequest) -> ClientResult<()> {
        expect_ok(self.post("/schedule-session", to_body(request)?).await?).await
    }

    /// Rates a peer.
    pub async fn rate_peer(&self, target_email: &str, rating: u8) -> ClientResult<()> {
        let body = to_body(&RatingRequest {
            target_email: target_email.to_string(),
            rating,
        })?;
        expect_ok(self.post("/rate-peer", body).await?).await
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// Unread notifications for `email`. A rejected credential is an
    /// ordinary failure here, the session is left alone.
    pub async fn notifications(&self, email: &str) -> ClientResult<Vec<Notification>> {
        let response = self
            .gate
            .fetch_with_credential(
                "/notifications",
                RequestOptions::post(json!({ "email": email })),
            )
            .await?;
        let status = response.status();
        if !status.is_success() {
            log::debug!("/notifications answered {status}");
            return Err(ClientError::Application(None));
        }
        list(response).await
    }

    /// Marks notifications read. The reply is not inspected.
    pub async fn mark_notifications_read(&self, ids: Vec<String>) -> ClientResult<()> {
        let body = to_body(&MarkReadRequest { ids })?;
        let response = self
            .gate
            .fetch_with_credential("/notifications/mark-read", RequestOptions::post(body))
            .await?;
        log::debug!("mark-read answered {}", response.status());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Administration
    // ------------------------------------------------------------------

    /// Every registered user.
    pub async fn admin_users(&self) -> ClientResult<Vec<UserProfile>> {
        list(self.get("/admin/users").await?).await
    }

    /// Every community request.
    pub async fn admin_requests(&self) -> ClientResult<Vec<SkillRequest>> {
        list(self.get("/admin/requests").await?).await
    }

    /// Every scheduled session.
    pub async fn admin_sessions(&self) -> ClientResult<Vec<ScheduledSession>> {
        list(self.get("/admin/sessions").await?).await
    }

    /// Overwrites a user's skill points.
    pub async fn admin_update_points(&self, email: &str, points: i64) -> ClientResult<()> {
        expect_ok(
            self.post(
                "/admin/update-points",
                json!({ "email": email, "points": points }),
            )
            .await?,
        )
        .await
    }

    /// Deletes a user account.
    pub async fn admin_delete_user(&self, email: &str) -> ClientResult<()> {
        let response = self
            .gate
            .fetch("/admin/user", RequestOptions::delete(json!({ "email": email })))
            .await?;
        expect_ok(response).await
    }

    async fn post(&self, path: &str, body: Value) -> ClientResult<Response> {
        self.gate.fetch(path, RequestOptions::post(body)).await
    }

    async fn get(&self, path: &str) -> ClientResult<Response> {
        self.gate.fetch(path, RequestOptions::get()).await
    }
}

fn to_body<T: Serialize>(value: &T) -> ClientResult<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Decodes a `{ "status": ... }` reply into success or an application error.
async fn expect_ok(response: Response) -> ClientResult<()> {
    let reply: StatusResponse = response.json().await?;
    if reply.is_ok() {
        Ok(())
    } else {
        Err(ClientError::Application(reply.error))
    }
}

/// Decodes a JSON array. Any other JSON shape is an application failure.
async fn list<T: DeserializeOwned>(response: Response) -> ClientResult<Vec<T>> {
    let value: Value = response.json().await?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    let message = value.get("error").and_then(Value::as_str).map(String::from);
    log::debug!("Expected a list, got {value}");
    Err(ClientError::Application(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Navigator;

    #[test]
    fn test_api_client_creation() {
        let gate = SessionGate::new(
            "https://example.com",
            std::time::Duration::from_secs(5),
            SessionContext::in_memory(),
            Navigator::new(),
        );

        assert!(gate.is_ok());
        let client = ApiClient::new(gate.unwrap());
        assert_eq!(client.gate().base_url(), "https://example.com");
    }

    #[test]
    fn test_to_body_keeps_field_names() {
        let body = to_body(&MarkReadRequest {
            ids: vec!["a".to_string(), "b".to_string()],
        })
        .unwrap();
        assert_eq!(body, json!({ "ids": ["a", "b"] }));
    }
}
