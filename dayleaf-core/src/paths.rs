use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub fn entry_file_name(date: NaiveDate) -> String {
    format!("{}.txt", date.format("%Y-%m-%d"))
}

pub fn entry_path(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(entry_file_name(date))
}
