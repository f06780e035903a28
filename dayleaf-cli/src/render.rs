use chrono::NaiveDate;
use dayleaf_core::stats::{char_count, word_count};

/// Plain-text output for the terminal: status lines and entry bodies.
pub struct Renderer {
    date_format: String,
}

impl Renderer {
    pub fn new(date_format: String) -> Self {
        Self { date_format }
    }

    pub fn print_info(&self, msg: &str) {
        println!("{msg}");
    }

    /// One status line: saved marker, date, counts.
    pub fn status_line(&self, date: NaiveDate, dirty: bool, text: &str) -> String {
        let marker = if dirty { "● Unsaved" } else { "✔ Saved" };
        format!(
            "{marker}  |  {}  |  {} words, {} chars",
            date.format(&self.date_format),
            word_count(text),
            char_count(text)
        )
    }

    pub fn print_entry(&self, date: NaiveDate, text: &str) {
        self.print_info(&self.status_line(date, false, text));
        if !text.is_empty() {
            println!();
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
}
