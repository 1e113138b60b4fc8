//! Profile editor.
//!
//! The form is loaded from `/me`, edits are applied on top through the same
//! tag widgets and avatar picker the signup form uses, and the result is
//! saved with `/update-profile`.

use anyhow::Result;

use super::{report, require_student};
use crate::app::AppContext;
use crate::avatars::AvatarPicker;
use crate::constants::DEFAULT_AVATAR;
use crate::navigation::Page;
use crate::server::types::ProfileUpdate;
use crate::server::UserProfile;
use crate::tags::{TagInput, TagSet};
use crate::views;

/// Changes requested on the command line. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileEdits {
    /// New display name.
    pub name: Option<String>,
    /// New contact details.
    pub contact: Option<String>,
    /// New year of study.
    pub study_year: Option<String>,
    /// New branch.
    pub branch: Option<String>,
    /// Avatar short name or image path.
    pub avatar: Option<String>,
    /// Comma-separated skills to add to the teach list.
    pub add_teach: Option<String>,
    /// Skills to drop from the teach list.
    pub remove_teach: Vec<String>,
    /// Comma-separated skills to add to the learn list.
    pub add_learn: Option<String>,
    /// Skills to drop from the learn list.
    pub remove_learn: Vec<String>,
}

fn edit_tags(current: &[String], add: Option<&str>, remove: &[String]) -> Vec<String> {
    let mut input = TagInput::with_tags(TagSet::from_labels(current));
    for label in remove {
        input.tags_mut().remove(label);
    }
    if let Some(add) = add {
        input.type_str(add);
    }
    input.finish()
}

/// Applies `edits` to a loaded profile.
///
/// Returns the update to send and the sound cue of a newly picked avatar.
pub fn apply_edits(
    user: &UserProfile,
    fallback_email: &str,
    edits: &ProfileEdits,
) -> (ProfileUpdate, Option<&'static str>) {
    let mut picker = AvatarPicker::new(user.avatar.as_deref(), DEFAULT_AVATAR);
    let cue = edits.avatar.as_deref().and_then(|key| picker.select(key));

    let pick = |edit: &Option<String>, stored: &Option<String>| {
        edit.clone().or_else(|| stored.clone()).unwrap_or_default()
    };

    let update = ProfileUpdate {
        email: user
            .email
            .clone()
            .unwrap_or_else(|| fallback_email.to_string()),
        name: pick(&edits.name, &user.name),
        contact: pick(&edits.contact, &user.contact),
        study_year: pick(&edits.study_year, &user.study_year),
        branch: pick(&edits.branch, &user.branch),
        avatar: picker.value().to_string(),
        teach: edit_tags(&user.teach, edits.add_teach.as_deref(), &edits.remove_teach),
        learn: edit_tags(&user.learn, edits.add_learn.as_deref(), &edits.remove_learn),
    };
    (update, cue)
}

async fn load(app: &AppContext, email: &str) -> Option<UserProfile> {
    match app.api.me(email).await {
        Ok(user) => Some(user),
        Err(e) => {
            report(app, &e, "Error loading profile");
            None
        }
    }
}

/// Shows the editable profile.
pub async fn show(app: &AppContext) -> Result<()> {
    let Some(email) = require_student(app) else {
        return Ok(());
    };
    let Some(user) = load(app, &email).await else {
        return Ok(());
    };

    print!("{}", views::profile(&user));
    println!("Email:   {}", user.email_or_empty());
    println!("Contact: {}", user.contact.as_deref().unwrap_or_default());

    let picker = AvatarPicker::new(user.avatar.as_deref(), DEFAULT_AVATAR);
    println!("Avatars:");
    for (avatar, selected) in picker.options() {
        let mark = if selected { "*" } else { " " };
        println!("  {mark} {:<8} {}", avatar.name, avatar.image);
    }
    Ok(())
}

/// Loads the profile, applies `edits` and saves it.
///
/// On success the dashboard opens; otherwise "Update Failed" is shown.
pub async fn edit(app: &AppContext, edits: &ProfileEdits) -> Result<()> {
    let Some(email) = require_student(app) else {
        return Ok(());
    };
    let Some(user) = load(app, &email).await else {
        return Ok(());
    };

    let (update, cue) = apply_edits(&user, &email, edits);
    if let Some(cue) = cue {
        log::info!("Avatar changed (cue {cue})");
    }

    match app.api.update_profile(&update).await {
        Ok(()) => app.navigator.redirect(Page::Dashboard),
        Err(e) => report(app, &e, "Update Failed"),
    }
    Ok(())
}
