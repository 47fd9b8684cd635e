use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use global_notifications::NotificationKind;
use humantime::parse_duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Show toast notifications in the terminal", long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Kind of the notifications to enqueue.
    #[arg(long, default_value = "info", value_parser = parse_kind)]
    pub kind: NotificationKind,

    /// Per-notification duration (e.g. "3s"); falls back to the configured default.
    #[arg(long, value_parser = parse_duration)]
    pub duration: Option<Duration>,

    /// List newest first.
    #[arg(long, action = ArgAction::SetTrue)]
    pub reverse: bool,

    /// Add a confirmation toast that only resolves through its OK button.
    #[arg(long, action = ArgAction::SetTrue)]
    pub confirm: bool,

    /// Emit logs as JSON (needs `--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "global_notifications=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Messages to show, one notification each.
    #[arg(value_name = "MESSAGE", required = true)]
    pub messages: Vec<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn parse_kind(raw: &str) -> Result<NotificationKind, String> {
    raw.parse()
}
