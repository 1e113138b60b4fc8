//! Wire types for the PeerSkill API.
//!
//! Field names follow the server's JSON (camelCase, Mongo `_id`). Reply
//! types default every optional field so a sparse document still decodes.

use serde::{Deserialize, Serialize};

/// Generic `{ "status": "ok" }` style reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    /// `"ok"` on success, anything else on failure.
    #[serde(default)]
    pub status: String,
    /// Optional human-readable failure reason.
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    /// Whether the server reported success.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Reply of `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    /// `"ok"` on success.
    #[serde(default)]
    pub status: String,
    /// `"admin"` for administrators.
    #[serde(default)]
    pub role: Option<String>,
    /// Bearer credential.
    #[serde(default)]
    pub token: Option<String>,
    /// Email of the signed-in account.
    #[serde(default)]
    pub email: Option<String>,
}

impl LoginResponse {
    /// Whether the credentials were accepted.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Whether the account is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Body of `POST /signup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Contact details shown to matched peers.
    pub contact: String,
    /// Account password.
    pub password: String,
    /// Year of study.
    pub study_year: String,
    /// Branch / major.
    pub branch: String,
    /// Avatar image path.
    pub avatar: String,
    /// Skills the user can teach.
    pub teach: Vec<String>,
    /// Skills the user wants to learn.
    pub learn: Vec<String>,
}

/// Body of `POST /update-profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Account email (identifies the profile).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Contact details.
    pub contact: String,
    /// Year of study.
    pub study_year: String,
    /// Branch / major.
    pub branch: String,
    /// Avatar image path.
    pub avatar: String,
    /// Skills the user can teach.
    pub teach: Vec<String>,
    /// Skills the user wants to learn.
    pub learn: Vec<String>,
}

/// A user document as returned by `/me`, peer lists, the leaderboard and
/// the admin user list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Database identifier.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact details.
    #[serde(default)]
    pub contact: Option<String>,
    /// Year of study.
    #[serde(default)]
    pub study_year: Option<String>,
    /// Branch / major.
    #[serde(default)]
    pub branch: Option<String>,
    /// Avatar image path.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Points earned by teaching.
    #[serde(default)]
    pub skill_points: Option<i64>,
    /// Skills taught.
    #[serde(default)]
    pub teach: Vec<String>,
    /// Skills wanted.
    #[serde(default)]
    pub learn: Vec<String>,
    /// `"admin"` for administrators.
    #[serde(default)]
    pub role: Option<String>,
    /// Set by `/me` when the profile could not be loaded.
    #[serde(default)]
    pub error: Option<String>,
}

impl UserProfile {
    /// Display name, empty when missing.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Email, empty when missing.
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    /// Points, zero when missing.
    pub fn points(&self) -> i64 {
        self.skill_points.unwrap_or(0)
    }
}

/// A community "I want to learn X" request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillRequest {
    /// Requested skill.
    #[serde(default)]
    pub skill: String,
    /// Requester's name.
    #[serde(default)]
    pub name: String,
    /// Requester's email.
    #[serde(default)]
    pub email: String,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub date: Option<String>,
    /// Moderation status.
    #[serde(default)]
    pub status: Option<String>,
}

/// A scheduled learning session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSession {
    /// Email of the user who scheduled it.
    #[serde(default)]
    pub scheduler: String,
    /// Email of the invited peer.
    #[serde(default)]
    pub peer: String,
    /// Topic.
    #[serde(default)]
    pub skill: String,
    /// Human-readable `"<date> at <time>"`.
    #[serde(default)]
    pub date_time: String,
    /// Meeting link.
    #[serde(default)]
    pub link: String,
}

/// Body of `POST /schedule-session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Email of the scheduling user.
    pub scheduler: String,
    /// Email of the invited peer.
    pub peer: String,
    /// Topic.
    pub skill: String,
    /// `"<date> at <time>"`.
    pub date_time: String,
}

/// Body of `POST /rate-peer`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    /// Email of the rated peer.
    pub target_email: String,
    /// Star rating.
    pub rating: u8,
}

/// An unread notification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notification {
    /// Identifier used to acknowledge it.
    #[serde(rename = "_id")]
    pub id: String,
    /// Text shown in the toast.
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /notifications/mark-read`.
#[derive(Debug, Clone, Serialize)]
pub struct MarkReadRequest {
    /// Identifiers of the notifications shown.
    pub ids: Vec<String>,
}
