//! Sign-in.

use anyhow::Result;

use crate::app::AppContext;
use crate::navigation::Page;

/// Sign-in form. Nothing is loaded.
pub fn show(_app: &AppContext) -> Result<()> {
    println!("Please sign in: peerskill login <email>");
    Ok(())
}

/// Submits the sign-in form.
///
/// On success the credential is stored when the server sent one. Admins get
/// the admin flag and the admin console, everyone else their email and the
/// dashboard. A refusal alerts "Login failed" and leaves the state alone.
pub async fn submit(app: &AppContext, email: &str, password: &str) -> Result<()> {
    let reply = match app.api.login(email, password).await {
        Ok(reply) => reply,
        Err(e) => {
            log::warn!("Login request failed: {e}");
            app.alert(&format!("Login Error: {e}"));
            return Ok(());
        }
    };

    if !reply.is_ok() {
        log::info!("Login refused for {email}");
        app.alert("Login failed");
        return Ok(());
    }

    if let Some(token) = reply.token.as_deref().filter(|t| !t.is_empty()) {
        app.session.set_token(token)?;
    }

    if reply.is_admin() {
        app.session.set_privileged(true)?;
        app.navigator.redirect(Page::Admin);
    } else {
        let subject = reply.email.as_deref().unwrap_or(email);
        app.session.set_subject_email(subject)?;
        app.navigator.redirect(Page::Dashboard);
    }

    log::info!("Signed in as {email}");
    Ok(())
}
