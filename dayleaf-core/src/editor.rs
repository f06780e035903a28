//! The central `DiaryEditor`: navigation between dates, save, and the
//! unsaved-changes gate every navigation passes through.
use crate::{Config, EntryStore, Session};
use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use std::fs;
use std::path::PathBuf;

/// The three-way answer to "you have unsaved changes".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardChoice {
    /// Save the current entry, then proceed with the navigation.
    Save,
    /// Throw the edits away and proceed.
    Discard,
    /// Abort the navigation; date and text stay untouched.
    Cancel,
}

/// Synchronous decision port for the unsaved-changes prompt.
///
/// A GUI host backs this with a modal dialog; tests and the CLI supply a
/// closure. The editor blocks on the answer before any navigation applies.
pub trait DiscardPrompt {
    fn unsaved_changes(&mut self) -> DiscardChoice;
}

impl<F: FnMut() -> DiscardChoice> DiscardPrompt for F {
    fn unsaved_changes(&mut self) -> DiscardChoice {
        self()
    }
}

/// Whether a gated operation ran or was cancelled at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Done,
    Cancelled,
}

/// One open diary: configuration, the entry store, and the active session.
///
/// All operations run on the caller's thread and complete (or fail) before
/// the next one starts; the session is replaced wholesale on navigation,
/// never mutated concurrently.
#[derive(Debug)]
pub struct DiaryEditor {
    pub config: Config,
    store: EntryStore,
    pub session: Session,
}

impl DiaryEditor {
    /// Creates a new `DiaryEditor`, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `DiaryEditor` with a specific `Config`.
    ///
    /// This also ensures the diary directory exists, and opens today's entry
    /// as the initial clean session.
    pub fn with_config(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.diary_dir)
            .with_context(|| format!("creating diary dir {}", config.diary_dir.display()))?;
        let store = EntryStore::new(config.diary_dir.clone());
        let today = Local::now().date_naive();
        let text = store.load(today)?;
        Ok(Self {
            config,
            store,
            session: Session::clean(today, text),
        })
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Runs the unsaved-changes gate. Returns `Ok(true)` to proceed.
    ///
    /// A clean session proceeds without prompting. `Save` persists first and
    /// a failed save aborts the navigation with the error, leaving the
    /// session dirty and unchanged.
    fn confirm_discard(&mut self, prompt: &mut impl DiscardPrompt) -> Result<bool> {
        if !self.session.is_dirty() {
            return Ok(true);
        }
        match prompt.unsaved_changes() {
            DiscardChoice::Save => {
                self.save()?;
                Ok(true)
            }
            DiscardChoice::Discard => Ok(true),
            DiscardChoice::Cancel => Ok(false),
        }
    }

    /// Clears the current text to an empty, clean entry. Touches no file; the
    /// date stays the same.
    pub fn new_entry(&mut self, prompt: &mut impl DiscardPrompt) -> Result<NavOutcome> {
        if !self.confirm_discard(prompt)? {
            return Ok(NavOutcome::Cancelled);
        }
        self.session.set_text(String::new());
        self.session.mark_clean(String::new());
        Ok(NavOutcome::Done)
    }

    /// Moves the active date by `delta` days (negative for past) and loads
    /// that date's entry. Calendar math is proleptic and unbounded.
    pub fn shift_day(&mut self, delta: i64, prompt: &mut impl DiscardPrompt) -> Result<NavOutcome> {
        if !self.confirm_discard(prompt)? {
            return Ok(NavOutcome::Cancelled);
        }
        let target = self.session.date + Duration::days(delta);
        self.switch_to(target)?;
        Ok(NavOutcome::Done)
    }

    /// Jumps straight to `date` (e.g. from a date picker) and loads its entry.
    pub fn go_to_date(
        &mut self,
        date: NaiveDate,
        prompt: &mut impl DiscardPrompt,
    ) -> Result<NavOutcome> {
        if !self.confirm_discard(prompt)? {
            return Ok(NavOutcome::Cancelled);
        }
        self.switch_to(date)?;
        Ok(NavOutcome::Done)
    }

    /// The close gate: `Done` means the host may exit, `Cancelled` keeps the
    /// session open and untouched.
    pub fn close(&mut self, prompt: &mut impl DiscardPrompt) -> Result<NavOutcome> {
        if self.confirm_discard(prompt)? {
            Ok(NavOutcome::Done)
        } else {
            Ok(NavOutcome::Cancelled)
        }
    }

    /// Persists the current text for the active date and marks the session
    /// clean. On failure the dirty state is left as it was.
    pub fn save(&mut self) -> Result<PathBuf> {
        let path = self.store.save(self.session.date, self.session.text())?;
        let snapshot = self.session.text().to_string();
        self.session.mark_clean(snapshot);
        Ok(path)
    }

    /// Replaces the session with a clean one for `date`. When the load fails
    /// the session falls back to empty text at `date`, still clean, and the
    /// error is returned for display.
    fn switch_to(&mut self, date: NaiveDate) -> Result<()> {
        match self.store.load(date) {
            Ok(text) => {
                self.session = Session::clean(date, text);
                Ok(())
            }
            Err(e) => {
                self.session = Session::clean(date, String::new());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::mk_config;
    use tempfile::tempdir;

    fn mk_editor() -> (DiaryEditor, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let config = mk_config(tmp.path().join("diary"));
        let editor = DiaryEditor::with_config(config).expect("editor with config");
        (editor, tmp)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn save_choice() -> impl DiscardPrompt {
        || DiscardChoice::Save
    }
    fn discard_choice() -> impl DiscardPrompt {
        || DiscardChoice::Discard
    }
    fn cancel_choice() -> impl DiscardPrompt {
        || DiscardChoice::Cancel
    }

    #[test]
    fn starts_clean_on_today() {
        let (editor, _tmp) = mk_editor();
        assert_eq!(editor.session.date, Local::now().date_naive());
        assert_eq!(editor.session.text(), "");
        assert!(!editor.session.is_dirty());
    }

    #[test]
    fn go_to_date_loads_that_entry() {
        let (mut editor, _tmp) = mk_editor();
        let date = d(2025, 8, 15);
        editor.store().save(date, "fifteenth").unwrap();

        let out = editor.go_to_date(date, &mut discard_choice()).unwrap();
        assert_eq!(out, NavOutcome::Done);
        assert_eq!(editor.session.date, date);
        assert_eq!(editor.session.text(), "fifteenth");
        assert!(!editor.session.is_dirty());
    }

    #[test]
    fn shift_day_round_trip_restores_date_and_text() {
        let (mut editor, _tmp) = mk_editor();
        let start = d(2025, 8, 15);
        editor.store().save(start, "original").unwrap();
        editor.go_to_date(start, &mut discard_choice()).unwrap();

        editor.shift_day(1, &mut discard_choice()).unwrap();
        assert_eq!(editor.session.date, d(2025, 8, 16));
        assert_eq!(editor.session.text(), "");

        editor.shift_day(-1, &mut discard_choice()).unwrap();
        assert_eq!(editor.session.date, start);
        assert_eq!(editor.session.text(), "original");
    }

    #[test]
    fn shift_day_handles_month_year_and_leap_rollover() {
        let (mut editor, _tmp) = mk_editor();
        editor
            .go_to_date(d(2023, 12, 31), &mut discard_choice())
            .unwrap();
        editor.shift_day(1, &mut discard_choice()).unwrap();
        assert_eq!(editor.session.date, d(2024, 1, 1));

        editor
            .go_to_date(d(2024, 2, 28), &mut discard_choice())
            .unwrap();
        editor.shift_day(1, &mut discard_choice()).unwrap();
        assert_eq!(editor.session.date, d(2024, 2, 29));
    }

    struct CountingPrompt {
        hits: usize,
        answer: DiscardChoice,
    }
    impl DiscardPrompt for CountingPrompt {
        fn unsaved_changes(&mut self) -> DiscardChoice {
            self.hits += 1;
            self.answer
        }
    }

    #[test]
    fn clean_session_never_prompts() {
        let (mut editor, _tmp) = mk_editor();
        let mut counting = CountingPrompt {
            hits: 0,
            answer: DiscardChoice::Cancel,
        };
        let out = editor.shift_day(1, &mut counting).unwrap();
        assert_eq!(out, NavOutcome::Done);
        assert_eq!(counting.hits, 0);
    }

    #[test]
    fn dirty_session_prompts_exactly_once_per_operation() {
        let (mut editor, _tmp) = mk_editor();
        editor.session.set_text("draft");
        let mut counting = CountingPrompt {
            hits: 0,
            answer: DiscardChoice::Discard,
        };
        editor.shift_day(1, &mut counting).unwrap();
        assert_eq!(counting.hits, 1);
    }

    #[test]
    fn cancel_leaves_date_and_text_unchanged() {
        let (mut editor, _tmp) = mk_editor();
        let date = d(2025, 8, 15);
        editor.go_to_date(date, &mut discard_choice()).unwrap();
        editor.session.set_text("work in progress");

        for _ in 0..2 {
            assert_eq!(
                editor.shift_day(1, &mut cancel_choice()).unwrap(),
                NavOutcome::Cancelled
            );
            assert_eq!(
                editor
                    .go_to_date(d(2030, 1, 1), &mut cancel_choice())
                    .unwrap(),
                NavOutcome::Cancelled
            );
            assert_eq!(
                editor.new_entry(&mut cancel_choice()).unwrap(),
                NavOutcome::Cancelled
            );
            assert_eq!(
                editor.close(&mut cancel_choice()).unwrap(),
                NavOutcome::Cancelled
            );
        }
        assert_eq!(editor.session.date, date);
        assert_eq!(editor.session.text(), "work in progress");
        assert!(editor.session.is_dirty());
    }

    #[test]
    fn save_choice_persists_before_navigating() {
        let (mut editor, _tmp) = mk_editor();
        let date = d(2025, 8, 15);
        editor.go_to_date(date, &mut discard_choice()).unwrap();
        editor.session.set_text("keep me");

        editor.shift_day(1, &mut save_choice()).unwrap();
        assert_eq!(editor.session.date, d(2025, 8, 16));
        assert_eq!(editor.store().load(date).unwrap(), "keep me");
    }

    #[test]
    fn discard_choice_navigates_without_saving() {
        let (mut editor, _tmp) = mk_editor();
        let date = d(2025, 8, 15);
        editor.go_to_date(date, &mut discard_choice()).unwrap();
        editor.session.set_text("throwaway");

        editor.shift_day(1, &mut discard_choice()).unwrap();
        assert_eq!(editor.store().load(date).unwrap(), "");
    }

    #[test]
    fn new_entry_clears_text_without_touching_disk() {
        let (mut editor, _tmp) = mk_editor();
        let date = d(2025, 8, 15);
        editor.store().save(date, "on disk").unwrap();
        editor.go_to_date(date, &mut discard_choice()).unwrap();
        editor.session.set_text("edited");

        editor.new_entry(&mut discard_choice()).unwrap();
        assert_eq!(editor.session.date, date);
        assert_eq!(editor.session.text(), "");
        assert!(!editor.session.is_dirty());
        assert_eq!(editor.store().load(date).unwrap(), "on disk");
    }

    #[test]
    fn save_writes_active_date_and_marks_clean() {
        let (mut editor, _tmp) = mk_editor();
        let date = d(2025, 8, 15);
        editor.go_to_date(date, &mut discard_choice()).unwrap();
        editor.session.set_text("dear diary");

        let path = editor.save().unwrap();
        assert_eq!(path, editor.store().path_for(date));
        assert!(!editor.session.is_dirty());
        assert_eq!(editor.store().load(date).unwrap(), "dear diary");
    }

    #[test]
    fn close_proceeds_when_clean() {
        let (mut editor, _tmp) = mk_editor();
        assert_eq!(
            editor.close(&mut cancel_choice()).unwrap(),
            NavOutcome::Done
        );
    }

    // a plain file squatting on the diary dir makes every save fail
    fn break_diary_dir(editor: &DiaryEditor) {
        let dir = editor.config.diary_dir.clone();
        fs::remove_dir_all(&dir).unwrap();
        fs::write(&dir, "").unwrap();
    }

    #[test]
    fn failed_save_leaves_session_dirty_and_text_intact() {
        let (mut editor, _tmp) = mk_editor();
        let date = d(2025, 8, 15);
        editor.go_to_date(date, &mut discard_choice()).unwrap();
        editor.session.set_text("not yet persisted");
        break_diary_dir(&editor);

        assert!(editor.save().is_err());
        assert_eq!(editor.session.date, date);
        assert_eq!(editor.session.text(), "not yet persisted");
        assert!(editor.session.is_dirty());
    }

    #[test]
    fn failed_save_choice_aborts_navigation_unchanged() {
        let (mut editor, _tmp) = mk_editor();
        let date = d(2025, 8, 15);
        editor.go_to_date(date, &mut discard_choice()).unwrap();
        editor.session.set_text("not yet persisted");
        break_diary_dir(&editor);

        assert!(editor.shift_day(1, &mut save_choice()).is_err());
        assert_eq!(editor.session.date, date);
        assert_eq!(editor.session.text(), "not yet persisted");
        assert!(editor.session.is_dirty());
    }

    #[test]
    fn failed_load_falls_back_to_empty_clean_session() {
        let (mut editor, _tmp) = mk_editor();
        let date = d(2025, 8, 15);
        // a directory squatting on the entry's name makes the load fail
        fs::create_dir_all(editor.store().path_for(date)).unwrap();

        let result = editor.go_to_date(date, &mut discard_choice());
        assert!(result.is_err());
        assert_eq!(editor.session.date, date);
        assert_eq!(editor.session.text(), "");
        assert!(!editor.session.is_dirty());
    }
}
