//! Avatar catalog and picker.
//!
//! Each avatar pairs an image with a short sound cue. The picker keeps
//! exactly one avatar selected and reports the cue of a new selection so
//! the front end can play it.

use crate::constants::DEFAULT_AVATAR;

/// One selectable avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avatar {
    /// Short name used on the command line.
    pub name: &'static str,
    /// Image path stored on the profile.
    pub image: &'static str,
    /// Sound cue played on selection.
    pub sound: &'static str,
}

/// Built-in catalog.
pub const AVATARS: &[Avatar] = &[
    Avatar { name: "clove", image: "profile_pictures/Clove_icon.webp", sound: "avatar_sounds/Clove.mpeg" },
    Avatar { name: "iso", image: "profile_pictures/Iso_icon.webp", sound: "avatar_sounds/Iso.mpeg" },
    Avatar { name: "omen", image: "profile_pictures/Omen_icon.webp", sound: "avatar_sounds/Omen.mpeg" },
    Avatar { name: "phoenix", image: "profile_pictures/Phoenix_icon.webp", sound: "avatar_sounds/Phoenix.mpeg" },
    Avatar { name: "raze", image: "profile_pictures/Raze_icon.webp", sound: "avatar_sounds/Raze.mpeg" },
    Avatar { name: "reyna", image: "profile_pictures/Reyna_icon.webp", sound: "avatar_sounds/Reyna.mpeg" },
    Avatar { name: "bot", image: DEFAULT_AVATAR, sound: "avatar_sounds/Bot.mp3" },
];

/// Finds an avatar by short name (case-insensitive) or image path.
pub fn find(key: &str) -> Option<&'static Avatar> {
    AVATARS
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(key) || a.image == key)
}

/// Sound cue for an image path.
pub fn sound_for(image: &str) -> Option<&'static str> {
    AVATARS.iter().find(|a| a.image == image).map(|a| a.sound)
}

/// Single-choice avatar selector.
#[derive(Debug, Clone)]
pub struct AvatarPicker {
    value: String,
}

impl AvatarPicker {
    /// Picker showing `current`, or `default` when `current` is blank.
    pub fn new(current: Option<&str>, default: &str) -> Self {
        let value = current
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(default)
            .to_string();
        Self { value }
    }

    /// Picker preselecting the bot avatar.
    pub fn with_default() -> Self {
        Self::new(None, DEFAULT_AVATAR)
    }

    /// Selects an avatar by name or image path and returns its sound cue.
    ///
    /// Unknown keys leave the selection unchanged.
    pub fn select(&mut self, key: &str) -> Option<&'static str> {
        let avatar = find(key)?;
        self.value = avatar.image.to_string();
        log::debug!("Avatar selected: {} (cue {})", avatar.name, avatar.sound);
        Some(avatar.sound)
    }

    /// Image path to store on the profile.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Catalog entries with their selection flag.
    pub fn options(&self) -> impl Iterator<Item = (&'static Avatar, bool)> + '_ {
        AVATARS.iter().map(move |a| (a, a.image == self.value))
    }
}
