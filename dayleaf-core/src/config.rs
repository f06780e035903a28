use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute directory where daily entry files live.
    pub diary_dir: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// Display format for dates in the status line (e.g. "%A, %d %b %Y").
    pub date_format: String,
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    diary_dir: Option<PathBuf>,
    editor: Option<String>,
    date_format: Option<String>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|_| FileConfig {
            diary_dir: None,
            editor: None,
            date_format: None,
        });

        let date_format = file_config
            .date_format
            .and_then(Self::validated_date_format)
            .unwrap_or_else(|| "%A, %d %b %Y".to_string());

        let diary_dir = file_config.diary_dir.unwrap_or_else(Self::default_diary_dir);

        Ok(Self {
            diary_dir,
            editor: file_config.editor,
            date_format,
        })
    }

    /// Accepts a strftime display format only if chrono recognizes every
    /// specifier in it; formatting with a bad one panics at display time.
    fn validated_date_format(fmt: String) -> Option<String> {
        let ok = !StrftimeItems::new(&fmt).any(|item| matches!(item, Item::Error));
        ok.then_some(fmt)
    }

    /// Default diary root: `{data_dir}/diary`
    /// - macOS:   `~/Library/Application Support/diary`
    /// - Linux:   `$XDG_DATA_HOME/diary` or `~/.local/share/diary`
    /// - Windows: `%APPDATA%\diary`
    fn default_diary_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("diary");
            p
        } else {
            PathBuf::from("./diary")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("dayleaf")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("dayleaf").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig {
            diary_dir: None,
            editor: None,
            date_format: None,
        })
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}
