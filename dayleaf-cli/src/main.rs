mod render;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use dayleaf_core::{Config, DiaryEditor, DiscardChoice, dates::parse_date, search, stats};
use render::Renderer;
use std::io::Write;
use std::{
    fs,
    process::{Command, ExitCode},
};

/// dayleaf — one plain-text diary entry per day
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Prints the diary directory
    #[arg(long, short, exclusive = true)]
    path: bool,
    /// Work on a specific date (e.g. `dayleaf --on yesterday`, `dayleaf --on 2025-08-15`)
    #[arg(long)]
    on: Option<String>,
    /// Work on the entry this many days from today (e.g. `--shift -1` for yesterday)
    #[arg(long, conflicts_with = "on", allow_hyphen_values = true)]
    shift: Option<i64>,
    /// Open a date's entry in your editor (e.g. `dayleaf --edit yesterday`).
    /// Editing today is the default when no action is given.
    #[arg(long, short, conflicts_with_all = ["on", "shift"])]
    edit: Option<String>,
    /// Search the entry's text and list every match with its char offsets
    #[arg(long, short, conflicts_with_all = ["edit", "wc"])]
    search: Option<String>,
    /// Word and character count of the entry
    #[arg(long, conflicts_with = "edit")]
    wc: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dayleaf: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut editor = DiaryEditor::new()?;
    let renderer = Renderer::new(editor.config.date_format.clone());

    if cli.path {
        renderer.print_info(&format!("{}", editor.config.diary_dir.display()));
        return Ok(());
    }

    // Move the session to the requested date first. The session is freshly
    // loaded and clean here, so the discard prompt never fires.
    let mut no_prompt = || DiscardChoice::Discard;
    let navigated = cli.on.is_some() || cli.shift.is_some();
    if let Some(token) = &cli.edit {
        let date = parse_date_arg(token, editor.session.date)?;
        editor.go_to_date(date, &mut no_prompt)?;
        return edit_mode(&mut editor, &renderer);
    }
    if let Some(token) = &cli.on {
        let date = parse_date_arg(token, editor.session.date)?;
        editor.go_to_date(date, &mut no_prompt)?;
    } else if let Some(delta) = cli.shift {
        editor.shift_day(delta, &mut no_prompt)?;
    }

    if let Some(query) = &cli.search {
        return search_mode(&editor, &renderer, query);
    }
    if cli.wc {
        let text = editor.session.text();
        renderer.print_info(&format!(
            "{} words, {} chars",
            stats::word_count(text),
            stats::char_count(text)
        ));
        return Ok(());
    }
    if !navigated {
        return edit_mode(&mut editor, &renderer);
    }

    // Read mode (--on/--shift with no other action).
    renderer.print_entry(editor.session.date, editor.session.text());
    Ok(())
}

fn parse_date_arg(token: &str, today: NaiveDate) -> Result<NaiveDate> {
    let Some(date) = parse_date(token, today) else {
        bail!("'{token}' is not a date I understand (try 2025-08-15, today, yesterday)");
    };
    Ok(date)
}

/// Lists every match in the current entry, forward from the start.
fn search_mode(editor: &DiaryEditor, renderer: &Renderer, query: &str) -> Result<()> {
    let text = editor.session.text();
    let mut from = 0;
    let mut hits = 0;
    while let Some(m) = search::find_next(text, query, from) {
        if m.start < from {
            // wrapped around, we've seen everything
            break;
        }
        renderer.print_info(&format!("match at chars {}..{}", m.start, m.end));
        hits += 1;
        from = m.end;
    }
    if hits == 0 {
        renderer.print_info(&format!("No matches for '{query}'."));
    } else {
        renderer.print_info(&format!("{hits} matches."));
    }
    Ok(())
}

/// Round-trips the entry through the user's editor and saves if it changed.
fn edit_mode(editor: &mut DiaryEditor, renderer: &Renderer) -> Result<()> {
    let editor_cmd = resolve_editor(&editor.config);
    let buffer = edit_in_buffer(&editor_cmd, editor.session.text())?;
    editor.session.set_text(buffer);
    if editor.session.is_dirty() {
        let path = editor.save()?;
        renderer.print_info(&format!("Saved: {}", path.display()));
    } else {
        renderer.print_info("No changes.");
    }
    renderer.print_info(&renderer.status_line(
        editor.session.date,
        editor.session.is_dirty(),
        editor.session.text(),
    ));
    Ok(())
}

fn resolve_editor(config: &Config) -> String {
    config
        .editor
        .as_deref()
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

fn edit_in_buffer(editor_cmd: &str, initial: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("dayleaf")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    let path = file.path().to_path_buf();
    let status = Command::new(editor_cmd).arg(&path).status()?;
    if !status.success() {
        bail!("Editor exited with status {}", status);
    }
    Ok(fs::read_to_string(&path)?)
}
