//! Student dashboard.
//!
//! Loading the page fetches six panels concurrently. A panel that fails is
//! left out; an expired session abandons the page (the gate already queued
//! the login redirect).

use anyhow::Result;
use tokio::sync::mpsc;

use super::{report, require_student};
use crate::app::AppContext;
use crate::constants::MAX_RATING;
use crate::error::ClientResult;
use crate::navigation::Page;
use crate::search::PeerSearch;
use crate::server::types::ScheduleRequest;
use crate::views;

fn panel<T>(title: &str, result: ClientResult<T>, render: impl FnOnce(&T) -> String) -> Option<String> {
    match result {
        Ok(value) => Some(format!("== {title} ==\n{}", render(&value))),
        Err(e) => {
            if !e.is_session_expired() {
                log::warn!("Could not load {title}: {e}");
            }
            None
        }
    }
}

/// Loads and prints every dashboard panel.
pub async fn show(app: &AppContext) -> Result<()> {
    let Some(email) = require_student(app) else {
        return Ok(());
    };

    let api = &app.api;
    let (profile, recommendations, peers, requests, leaderboard, sessions) = tokio::join!(
        api.me(&email),
        api.recommendations(&email),
        api.random_peers(&email),
        api.active_requests(),
        api.leaderboard(),
        api.my_sessions(&email),
    );

    if app.navigator.pending() == Some(Page::Login) {
        // Credential rejected while loading
        return Ok(());
    }

    let panels = [
        panel("Profile", profile, views::profile),
        panel("Recommended for you", recommendations, |l| views::recommendations(l)),
        panel("Peers", peers, |l| views::peers(l)),
        panel("Community requests", requests, |l| views::requests(l)),
        panel("Leaderboard", leaderboard, |l| views::leaderboard(l)),
        panel("Upcoming sessions", sessions, |l| views::sessions(l)),
    ];

    for text in panels.into_iter().flatten() {
        println!("{text}");
    }
    Ok(())
}

/// Posts a community request for `skill`.
pub async fn request_skill(app: &AppContext, skill: &str) -> Result<()> {
    let Some(email) = require_student(app) else {
        return Ok(());
    };

    let skill = skill.trim();
    if skill.is_empty() {
        app.alert("Enter a skill");
        return Ok(());
    }

    match app.api.request_skill(&email, skill).await {
        Ok(()) => app.alert("Request Posted!"),
        Err(e) => report(app, &e, "Failed"),
    }
    Ok(())
}

/// Books a session with `peer` and reloads the session list.
///
/// `date` and `time` are taken as typed; the server receives
/// `"<date> at <time>"`.
pub async fn schedule(app: &AppContext, peer: &str, topic: &str, date: &str, time: &str) -> Result<()> {
    let Some(email) = require_student(app) else {
        return Ok(());
    };

    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() || time.is_empty() {
        app.alert("Pick date/time");
        return Ok(());
    }

    let request = ScheduleRequest {
        scheduler: email.clone(),
        peer: peer.to_string(),
        skill: topic.to_string(),
        date_time: format!("{date} at {time}"),
    };

    match app.api.schedule_session(&request).await {
        Ok(()) => {
            app.alert("Scheduled!");
            match app.api.my_sessions(&email).await {
                Ok(sessions) => print!("{}", views::sessions(&sessions)),
                Err(e) => log::warn!("Could not reload sessions: {e}"),
            }
        }
        Err(e) => report(app, &e, "Error"),
    }
    Ok(())
}

/// Rates a peer with 1 to 5 stars.
pub async fn rate(app: &AppContext, peer: &str, rating: u8) -> Result<()> {
    if rating == 0 || rating > MAX_RATING {
        app.alert("Select a star rating");
        return Ok(());
    }

    match app.api.rate_peer(peer, rating).await {
        Ok(()) => app.alert("Rating Submitted! +10 Points to Peer."),
        Err(e) if e.is_session_expired() => {}
        Err(e) => {
            log::warn!("Rating failed: {e}");
            app.alert(e.server_message().unwrap_or("Error"));
        }
    }
    Ok(())
}

/// Runs one debounced peer search and prints the results.
///
/// A blank query lists random peers.
pub async fn search(app: &AppContext, query: &str) -> Result<()> {
    let Some(email) = require_student(app) else {
        return Ok(());
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut search = PeerSearch::new(app.api.clone(), email, tx);
    search.input(query);

    match rx.recv().await {
        Some(Ok(peers)) => print!("{}", views::peers(&peers)),
        Some(Err(e)) => report(app, &e, "Search failed"),
        None => log::debug!("Search dropped before completing"),
    }
    Ok(())
}
