//! Page initializers.
//!
//! Each page module owns what happens when its page is shown and the
//! actions available on it. Pages never print errors themselves; outcomes
//! go through the context's prompter as alerts.
//!
//! - [`account`] - Logout and theme preference (shared by every page)
//! - [`admin`] - Moderation console
//! - [`dashboard`] - Student dashboard, requests, scheduling, ratings, search
//! - [`home`] - Landing page
//! - [`login`] - Sign-in
//! - [`profile`] - Profile editor
//! - [`signup`] - Account creation
//!
//! # Usage
//!
//! ```ignore
//! use peerskill::pages;
//!
//! pages::login::submit(&app, "ada@example.com", "hunter2").await?;
//! pages::follow_redirects(&app).await?;
//! ```

pub mod account;
pub mod admin;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod profile;
pub mod signup;

use anyhow::Result;

use crate::app::AppContext;
use crate::constants::MAX_REDIRECTS;
use crate::error::ClientError;
use crate::navigation::Page;

/// Runs the initializer of `page`.
pub async fn show(app: &AppContext, page: Page) -> Result<()> {
    log::debug!("Showing page {page}");
    match page {
        Page::Home => home::show(app),
        Page::Login => login::show(app),
        Page::Signup => signup::show(app),
        Page::Dashboard => dashboard::show(app).await,
        Page::EditProfile => profile::show(app).await,
        Page::Admin => admin::show(app).await,
    }
}

/// Shows pages queued on the navigator until none is pending.
///
/// Returns the last page shown, if any.
pub async fn follow_redirects(app: &AppContext) -> Result<Option<Page>> {
    let mut last = None;
    for _ in 0..MAX_REDIRECTS {
        let Some(page) = app.navigator.take_redirect() else {
            return Ok(last);
        };
        show(app, page).await?;
        last = Some(page);
    }

    if let Some(page) = app.navigator.take_redirect() {
        log::warn!("Redirect loop, not following to {page}");
    }
    Ok(last)
}

/// Alerts `fallback` for a failed call.
///
/// An expired session was already handled by the gate (state cleared,
/// login queued) and shows nothing.
pub(crate) fn report(app: &AppContext, err: &ClientError, fallback: &str) {
    if err.is_session_expired() {
        log::info!("Session expired, returning to login");
        return;
    }
    log::warn!("{fallback}: {err}");
    app.alert(fallback);
}

/// Email of the signed-in student, or a queued login redirect.
pub(crate) fn require_student(app: &AppContext) -> Option<String> {
    let email = app.session.subject_email();
    if email.is_none() {
        log::info!("Not signed in");
        app.navigator.redirect(Page::Login);
    }
    email
}

/// Whether the admin flag is set. Queues a login redirect when it is not.
pub(crate) fn require_admin(app: &AppContext) -> bool {
    let privileged = app.session.is_privileged();
    if !privileged {
        log::info!("Admin page requested without admin flag");
        app.navigator.redirect(Page::Login);
    }
    privileged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use std::sync::Arc;

    fn app() -> (AppContext, ScriptedPrompter) {
        let prompter = ScriptedPrompter::default();
        let app = AppContext::in_memory("http://127.0.0.1:9", Arc::new(prompter.clone())).unwrap();
        (app, prompter)
    }

    #[test]
    fn test_require_student_redirects_when_signed_out() {
        let (app, _) = app();
        assert!(require_student(&app).is_none());
        assert_eq!(app.navigator.pending(), Some(Page::Login));

        app.navigator.take_redirect();
        app.session.set_subject_email("ada@x.io").unwrap();
        assert_eq!(require_student(&app).as_deref(), Some("ada@x.io"));
        assert!(app.navigator.pending().is_none());
    }

    #[test]
    fn test_require_admin_checks_flag() {
        let (app, _) = app();
        assert!(!require_admin(&app));
        app.navigator.take_redirect();

        app.session.set_privileged(true).unwrap();
        assert!(require_admin(&app));
        assert!(app.navigator.pending().is_none());
    }

    #[test]
    fn test_expired_session_is_not_alerted() {
        let (app, prompter) = app();
        report(&app, &ClientError::SessionExpired, "Error");
        report(&app, &ClientError::Application(None), "Failed");
        assert_eq!(prompter.alerts(), vec!["Failed"]);
    }

    #[tokio::test]
    async fn test_follow_redirects_stops_when_queue_empty() {
        let (app, _) = app();
        assert_eq!(follow_redirects(&app).await.unwrap(), None);

        app.navigator.redirect(Page::Login);
        assert_eq!(follow_redirects(&app).await.unwrap(), Some(Page::Login));
    }
}
