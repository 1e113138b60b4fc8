//! Plain-text rendering of API data.
//!
//! Every function returns the full text of one panel so commands can print
//! it and tests can assert on it. Empty lists render a one-line notice.

use chrono::{DateTime, NaiveDate};
use std::fmt::Write;

use crate::constants::{ADMIN_EMAIL, DEFAULT_AVATAR, PEER_CARD_SKILL_PREVIEW};
use crate::server::types::{ScheduledSession, SkillRequest};
use crate::server::UserProfile;

/// Role shown in the admin user table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Administrator. Points are not editable.
    Admin,
    /// Regular user.
    Student,
}

impl Role {
    /// Label shown in tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Student => "Student",
        }
    }
}

/// Role of a user: the built-in admin account or anyone with role `admin`.
pub fn admin_role(user: &UserProfile) -> Role {
    if user.email.as_deref() == Some(ADMIN_EMAIL) || user.role.as_deref() == Some("admin") {
        Role::Admin
    } else {
        Role::Student
    }
}

/// `"<year> • <branch>"`, year defaulting to "Student".
pub fn meta_line(user: &UserProfile, missing_branch: &str) -> String {
    let year = user
        .study_year
        .as_deref()
        .filter(|y| !y.is_empty())
        .unwrap_or("Student");
    let branch = user
        .branch
        .as_deref()
        .filter(|b| !b.is_empty())
        .unwrap_or(missing_branch);
    format!("{year} • {branch}")
}

/// Calendar date of an ISO 8601 timestamp. Unparseable input is shown as is.
pub fn calendar_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return "-".to_string();
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.date_naive().format("%Y-%m-%d").to_string();
    }
    // Some documents carry a bare date
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

fn skills(list: &[String]) -> String {
    if list.is_empty() {
        "No skills".to_string()
    } else {
        list.join(", ")
    }
}

fn avatar(user: &UserProfile) -> &str {
    user.avatar
        .as_deref()
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_AVATAR)
}

/// Header panel of the dashboard.
pub fn profile(user: &UserProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", user.display_name());
    let _ = writeln!(out, "{}", meta_line(user, ""));
    let _ = writeln!(out, "Avatar:  {}", avatar(user));
    let _ = writeln!(out, "Points:  {}", user.points());
    let _ = writeln!(out, "Teaches: {}", skills(&user.teach));
    let _ = writeln!(out, "Learns:  {}", skills(&user.learn));
    out
}

/// Peers matched to what the user wants to learn.
pub fn recommendations(list: &[UserProfile]) -> String {
    if list.is_empty() {
        return "No matches yet.\n".to_string();
    }

    let mut out = String::new();
    for m in list {
        let _ = writeln!(
            out,
            "{} <{}>\n  Teaches: {}\n  {}",
            m.display_name(),
            m.email_or_empty(),
            m.teach.join(", "),
            meta_line(m, "N/A")
        );
    }
    out
}

/// Peer cards (random sample or search results).
pub fn peers(list: &[UserProfile]) -> String {
    if list.is_empty() {
        return "No peers found.\n".to_string();
    }

    let mut out = String::new();
    for p in list {
        let preview: Vec<&str> = p
            .teach
            .iter()
            .take(PEER_CARD_SKILL_PREVIEW)
            .map(String::as_str)
            .collect();
        let _ = writeln!(
            out,
            "{} ({} pts) <{}>\n  Teaches: {}",
            p.display_name(),
            p.points(),
            p.email_or_empty(),
            preview.join(", ")
        );
    }
    out
}

/// Open community requests.
pub fn requests(list: &[SkillRequest]) -> String {
    if list.is_empty() {
        return "No requests.\n".to_string();
    }

    let mut out = String::new();
    for r in list {
        let _ = writeln!(out, "{}\n  Requested by {} <{}>", r.skill, r.name, r.email);
    }
    out
}

/// Upcoming sessions.
pub fn sessions(list: &[ScheduledSession]) -> String {
    if list.is_empty() {
        return "No sessions.\n".to_string();
    }

    let mut out = String::new();
    for s in list {
        let _ = writeln!(out, "{}  {}\n  Join: {}", s.date_time, s.skill, s.link);
    }
    out
}

/// Ranked by points, as returned by the server.
pub fn leaderboard(list: &[UserProfile]) -> String {
    let mut out = String::new();
    for (i, u) in list.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {} ({} Pts)", i + 1, u.display_name(), u.points());
    }
    out
}

/// Admin user table with total.
pub fn admin_users(users: &[UserProfile]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Users: {}", users.len());
    for u in users {
        let role = admin_role(u);
        let points = match role {
            Role::Admin => "N/A".to_string(),
            Role::Student => u.points().to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<24} {:<32} {:<8} {}",
            u.display_name(),
            u.email_or_empty(),
            role.as_str(),
            points
        );
    }
    out
}

/// Admin request table with total.
pub fn admin_requests(requests: &[SkillRequest]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Requests: {}", requests.len());
    for r in requests {
        let _ = writeln!(
            out,
            "  {}  {:<24} {:<20} {}",
            calendar_date(r.date.as_deref()),
            r.name,
            r.skill,
            r.status.as_deref().unwrap_or("")
        );
    }
    out
}

/// Admin session table with total.
pub fn admin_sessions(sessions: &[ScheduledSession]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sessions: {}", sessions.len());
    for s in sessions {
        let _ = writeln!(
            out,
            "  {}  {} with {}  {}",
            s.date_time, s.scheduler, s.peer, s.link
        );
    }
    out
}
