//! Reading and writing one plain-text entry file per calendar date.
use crate::paths::entry_path;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Maps dates to files under the diary directory and performs the I/O.
///
/// An absent file is not an error: a date with no entry loads as an empty
/// string, and the file is only created on first save.
#[derive(Debug, Clone)]
pub struct EntryStore {
    diary_dir: PathBuf,
}

impl EntryStore {
    pub fn new(diary_dir: impl Into<PathBuf>) -> Self {
        Self {
            diary_dir: diary_dir.into(),
        }
    }

    pub fn diary_dir(&self) -> &Path {
        &self.diary_dir
    }

    /// The file a date's entry lives in: `{diary_dir}/YYYY-MM-DD.txt`.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        entry_path(&self.diary_dir, date)
    }

    /// Returns the stored text for `date`, or an empty string if no entry
    /// exists yet. Only a failed read of an existing file is an error.
    pub fn load(&self, date: NaiveDate) -> Result<String> {
        let path = self.path_for(date);
        if !path.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }

    /// Writes `text` verbatim as the entry for `date`, replacing any prior
    /// content, and returns the entry's path.
    ///
    /// The text is written to a temp file in the diary directory and renamed
    /// into place, so a failed write never leaves a half-written entry under
    /// the entry's name.
    pub fn save(&self, date: NaiveDate, text: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.diary_dir)
            .with_context(|| format!("creating diary dir {}", self.diary_dir.display()))?;
        let path = self.path_for(date);
        let mut tmp = NamedTempFile::new_in(&self.diary_dir)
            .with_context(|| format!("creating temp file in {}", self.diary_dir.display()))?;
        tmp.write_all(text.as_bytes())
            .with_context(|| format!("writing entry for {date}"))?;
        tmp.persist(&path)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(path)
    }
}
