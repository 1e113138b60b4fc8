//! Account creation.

use anyhow::Result;

use crate::app::AppContext;
use crate::avatars::AvatarPicker;
use crate::constants::DEFAULT_AVATAR;
use crate::error::ClientError;
use crate::navigation::Page;
use crate::server::types::SignupForm;

/// Signup form with the avatar catalog.
pub fn show(_app: &AppContext) -> Result<()> {
    let picker = AvatarPicker::with_default();
    println!("Create an account: peerskill signup --name <name> --email <email> --teach <skills> --learn <skills>");
    println!("Avatars:");
    for (avatar, selected) in picker.options() {
        let mark = if selected { "*" } else { " " };
        println!("  {mark} {:<8} {}", avatar.name, avatar.image);
    }
    Ok(())
}

/// Submits the signup form.
///
/// Both skill lists must be non-empty. A blank avatar becomes the default
/// one. On success the email is stored and the dashboard opens; a refusal
/// alerts the server's reply text.
pub async fn submit(app: &AppContext, mut form: SignupForm) -> Result<()> {
    if form.teach.is_empty() || form.learn.is_empty() {
        app.alert("Add skills!");
        return Ok(());
    }

    form.avatar = AvatarPicker::new(Some(&form.avatar), DEFAULT_AVATAR)
        .value()
        .to_string();

    match app.api.signup(&form).await {
        Ok(()) => {
            app.session.set_subject_email(&form.email)?;
            app.navigator.redirect(Page::Dashboard);
            log::info!("Account created for {}", form.email);
        }
        Err(ClientError::Application(message)) => {
            app.alert(message.as_deref().unwrap_or("Signup Failed"));
        }
        Err(e) => {
            log::warn!("Signup request failed: {e}");
            app.alert("Signup Failed");
        }
    }
    Ok(())
}
