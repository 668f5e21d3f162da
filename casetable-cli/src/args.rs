//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;

/// Browse client and case records as a searchable, paginated table.
#[derive(Debug, Parser)]
#[command(name = "casetable", version)]
pub struct Args {
    /// JSON file holding an array of row objects.
    pub rows: PathBuf,

    /// Use the column set of a record page.
    #[arg(long, value_enum, conflicts_with = "columns")]
    pub preset: Option<Preset>,

    /// Column as `key[:label[:kind[:arg]]]`. Kinds: text, text_or, badge,
    /// status, date, money, related. Repeat for each column.
    #[arg(long = "column", short = 'c')]
    pub columns: Vec<String>,

    /// Table config file (JSON). Defaults to `table.json` in the config dir.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rows per page.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Show a search box with this placeholder.
    #[arg(long)]
    pub search: Option<String>,

    /// Caption printed above the table.
    #[arg(long)]
    pub caption: Option<String>,

    /// Filter by this query before printing.
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Page to print, starting at 1.
    #[arg(long, short = 'p')]
    pub page: Option<usize>,

    /// Read search text and paging commands from stdin.
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Log verbosity.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log file. Defaults to `latest.log` in the cache dir.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Column sets matching the record pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Clients list.
    Clients,
    /// Cases of one client, or today's cases.
    Cases,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_columns() {
        let args = Args::parse_from([
            "casetable",
            "cases.json",
            "-c",
            "case_title:Title",
            "-c",
            "next_date:Next Date:date:%d/%m/%Y",
            "--page-size",
            "10",
        ]);
        assert_eq!(args.columns.len(), 2);
        assert_eq!(args.page_size, Some(10));
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn test_preset_conflicts_with_columns() {
        let result = Args::try_parse_from([
            "casetable",
            "cases.json",
            "--preset",
            "cases",
            "-c",
            "case_title",
        ]);
        assert!(result.is_err());
    }
}
