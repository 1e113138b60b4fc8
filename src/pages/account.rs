//! Logout and theme, available on every page.

use anyhow::Result;

use crate::app::AppContext;
use crate::navigation::Page;
use crate::session::Theme;

/// Confirmation asked before signing out.
pub const LOGOUT_QUESTION: &str = "Are you sure you want to logout?";

/// Signs out after confirmation.
///
/// Unlike an expired session this wipes the whole store, theme included.
/// Returns whether the user went through with it.
pub fn logout(app: &AppContext) -> Result<bool> {
    if !app.confirm(LOGOUT_QUESTION) {
        return Ok(false);
    }

    app.session.clear_all()?;
    app.navigator.redirect(Page::Login);
    log::info!("Signed out");
    Ok(true)
}

/// Sets the theme, or flips it when `theme` is `None`. Returns the new one.
pub fn set_theme(app: &AppContext, theme: Option<Theme>) -> Result<Theme> {
    let next = theme.unwrap_or_else(|| app.session.theme().toggled());
    app.session.set_theme(next)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use std::sync::Arc;

    fn app(answer: bool) -> (AppContext, ScriptedPrompter) {
        let prompter = ScriptedPrompter::answering(answer);
        let app = AppContext::in_memory("http://127.0.0.1:9", Arc::new(prompter.clone())).unwrap();
        (app, prompter)
    }

    #[test]
    fn test_logout_wipes_everything() {
        let (app, prompter) = app(true);
        app.session.set_subject_email("ada@x.io").unwrap();
        app.session.set_theme(Theme::Dark).unwrap();

        assert!(logout(&app).unwrap());
        assert_eq!(prompter.questions(), vec![LOGOUT_QUESTION]);
        assert!(!app.session.is_signed_in());
        assert_eq!(app.session.theme(), Theme::Light);
        assert_eq!(app.navigator.pending(), Some(Page::Login));
    }

    #[test]
    fn test_declined_logout_keeps_session() {
        let (app, _) = app(false);
        app.session.set_subject_email("ada@x.io").unwrap();

        assert!(!logout(&app).unwrap());
        assert!(app.session.is_signed_in());
        assert!(app.navigator.pending().is_none());
    }

    #[test]
    fn test_theme_toggle() {
        let (app, _) = app(true);
        assert_eq!(set_theme(&app, None).unwrap(), Theme::Dark);
        assert_eq!(set_theme(&app, None).unwrap(), Theme::Light);
        assert_eq!(set_theme(&app, Some(Theme::Dark)).unwrap(), Theme::Dark);
        assert_eq!(app.session.theme(), Theme::Dark);
    }
}
