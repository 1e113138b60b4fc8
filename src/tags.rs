//! Tag widget for skill lists.
//!
//! [`TagSet`] holds the committed labels; [`TagInput`] adds the text buffer
//! and key handling on top:
//!
//! - `Enter` or `,` commits the buffer
//! - losing focus commits the buffer
//! - `Backspace` on an empty buffer removes the last tag
//!
//! Labels are trimmed, blank input is ignored and duplicates are rejected
//! case-insensitively (first spelling wins).

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    /// Commit.
    Enter,
    /// Commit.
    Comma,
    /// Delete a character, or the last tag when the buffer is empty.
    Backspace,
    /// Any other character.
    Char(char),
}

/// Ordered set of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set seeded from existing labels, applying the usual rules.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for label in labels {
            set.add(label.as_ref());
        }
        set
    }

    /// Adds a label. Returns `false` when it was blank or already present.
    pub fn add(&mut self, value: &str) -> bool {
        let clean = value.trim();
        if clean.is_empty() || self.contains(clean) {
            return false;
        }
        self.tags.push(clean.to_string());
        true
    }

    /// Removes a label (case-insensitive). Returns whether it existed.
    pub fn remove(&mut self, label: &str) -> bool {
        let before = self.tags.len();
        let needle = label.trim().to_lowercase();
        self.tags.retain(|t| t.to_lowercase() != needle);
        self.tags.len() != before
    }

    /// Removes and returns the most recent label.
    pub fn pop(&mut self) -> Option<String> {
        self.tags.pop()
    }

    /// Case-insensitive membership.
    pub fn contains(&self, label: &str) -> bool {
        let needle = label.trim().to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.tags
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether no labels are present.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Consumes the set.
    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

/// Tag set plus an input buffer.
#[derive(Debug, Clone, Default)]
pub struct TagInput {
    tags: TagSet,
    buffer: String,
}

impl TagInput {
    /// Empty widget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Widget pre-filled with labels.
    pub fn with_tags(tags: TagSet) -> Self {
        Self {
            tags,
            buffer: String::new(),
        }
    }

    /// Handles one key press.
    pub fn key(&mut self, key: TagKey) {
        match key {
            TagKey::Enter | TagKey::Comma => self.commit(),
            TagKey::Backspace => {
                if self.buffer.pop().is_none() {
                    self.tags.pop();
                }
            }
            TagKey::Char(c) => self.buffer.push(c),
        }
    }

    /// Types a string, treating `,` as a commit.
    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                ',' => self.key(TagKey::Comma),
                '\n' => self.key(TagKey::Enter),
                other => self.key(TagKey::Char(other)),
            }
        }
    }

    /// Focus left the input: commit whatever is typed.
    pub fn blur(&mut self) {
        self.commit();
    }

    /// Current uncommitted text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Committed tags.
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Mutable access to the committed tags.
    pub fn tags_mut(&mut self) -> &mut TagSet {
        &mut self.tags
    }

    /// Commits the buffer and returns the labels.
    pub fn finish(mut self) -> Vec<String> {
        self.blur();
        self.tags.into_vec()
    }

    fn commit(&mut self) {
        let value = std::mem::take(&mut self.buffer);
        self.tags.add(&value);
    }
}

/// Parses a comma-separated list the way the widget would if it were typed.
pub fn parse_tag_list(text: &str) -> Vec<String> {
    let mut input = TagInput::new();
    input.type_str(text);
    input.finish()
}
