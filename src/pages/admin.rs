//! Moderation console.

use anyhow::Result;

use super::{report, require_admin};
use crate::app::AppContext;
use crate::navigation::Page;
use crate::views;

/// Lists users, requests and sessions with their totals.
pub async fn show(app: &AppContext) -> Result<()> {
    if !require_admin(app) {
        return Ok(());
    }

    let api = &app.api;
    let (users, requests, sessions) =
        tokio::join!(api.admin_users(), api.admin_requests(), api.admin_sessions());

    // A panel whose reply was not a list is skipped
    match users {
        Ok(users) => println!("{}", views::admin_users(&users)),
        Err(e) => log::warn!("Could not load users: {e}"),
    }
    match requests {
        Ok(requests) => println!("{}", views::admin_requests(&requests)),
        Err(e) => log::warn!("Could not load requests: {e}"),
    }
    match sessions {
        Ok(sessions) => println!("{}", views::admin_sessions(&sessions)),
        Err(e) => log::warn!("Could not load sessions: {e}"),
    }
    Ok(())
}

/// Overwrites a student's points.
pub async fn update_points(app: &AppContext, email: &str, points: i64) -> Result<()> {
    if !require_admin(app) {
        return Ok(());
    }

    match app.api.admin_update_points(email, points).await {
        Ok(()) => app.alert("Points Updated"),
        Err(e) => report(app, &e, "Error"),
    }
    Ok(())
}

/// Deletes a user after confirmation, then reloads the console.
pub async fn delete_user(app: &AppContext, email: &str) -> Result<()> {
    if !require_admin(app) {
        return Ok(());
    }
    if !app.confirm(&format!("Delete {email}?")) {
        return Ok(());
    }

    match app.api.admin_delete_user(email).await {
        Ok(()) => {
            log::info!("Deleted user {email}");
            app.navigator.redirect(Page::Admin);
        }
        Err(e) => report(app, &e, "Error"),
    }
    Ok(())
}
