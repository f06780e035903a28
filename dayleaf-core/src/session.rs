use chrono::NaiveDate;

/// The currently loaded entry plus its dirty state.
///
/// `saved_text` is the text as last loaded or saved; `dirty` always equals
/// `text != saved_text`. A session is replaced wholesale whenever navigation
/// changes the active date.
#[derive(Debug, Clone)]
pub struct Session {
    pub date: NaiveDate,
    text: String,
    saved_text: String,
    dirty: bool,
}

impl Session {
    /// A freshly loaded session: `text` is both current content and baseline.
    pub fn clean(date: NaiveDate, text: String) -> Self {
        Self {
            date,
            saved_text: text.clone(),
            text,
            dirty: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the current text, re-deriving the dirty flag. Editing back to
    /// the saved baseline makes the session clean again.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = self.text != self.saved_text;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Records `snapshot` as the new saved baseline and clears the dirty flag.
    pub fn mark_clean(&mut self, snapshot: impl Into<String>) {
        self.saved_text = snapshot.into();
        self.dirty = false;
    }
}
