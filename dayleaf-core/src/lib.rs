pub mod config;
pub mod dates;
pub mod editor;
pub mod paths;
pub mod search;
pub mod session;
pub mod stats;
pub mod store;

pub use config::Config;
pub use editor::{DiaryEditor, DiscardChoice, DiscardPrompt, NavOutcome};
pub use search::Match;
pub use session::Session;
pub use store::EntryStore;
