//! Interactive session: stdin lines drive the table like a search box and
//! pagination buttons would.
//!
//! - `:n` / `:p`: next / previous page
//! - `:g N`: go to page N (1-indexed)
//! - `:a ROW ACTION`: trigger an action on a visible row. ROW is a row id, or
//!   `pos:P-N` for a row without one
//! - `:q`: quit
//! - anything else: new search text (an empty line clears the search)
//!
//! Search lines are debounced on the tokio timer: lines arriving within the
//! quiet interval of each other commit once, with the last text.

use std::io::{self, BufRead, Write};
use std::thread;

use casetable::search::AsyncDebouncer;
use casetable::{DataTable, RowKey};
use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::error::CliError;

const ACTIONS_COLUMN: &str = "actions";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    GoTo(usize),
    Action { row: RowKey, action: String },
    Quit,
    Search(String),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return Command::Search(line.to_string());
        };

        let mut words = command.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("n"), None, _) => Command::Next,
            (Some("p"), None, _) => Command::Prev,
            (Some("q"), None, _) => Command::Quit,
            (Some("g"), Some(page), None) => match page.parse::<usize>() {
                Ok(page) => Command::GoTo(page),
                Err(_) => Command::Unknown(line.to_string()),
            },
            (Some("a"), Some(row), Some(action)) => Command::Action {
                row: RowKey::parse(row),
                action: action.to_string(),
            },
            _ => Command::Unknown(line.to_string()),
        }
    }
}

enum Event {
    Line(Option<String>),
    Commit,
}

/// Lines of stdin, read on a dedicated thread.
///
/// A blocked stdin read cannot be cancelled, so it stays off the runtime.
pub fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Run until `:q` or the end of `lines`.
///
/// A search still waiting for its quiet interval when `lines` ends is
/// committed; one pending at `:q` is dropped.
pub async fn run(
    table: &mut DataTable,
    mut lines: mpsc::UnboundedReceiver<String>,
    mut output: impl Write,
) -> Result<(), CliError> {
    let (mut debouncer, mut commits) = AsyncDebouncer::new(table.config().debounce);
    render(table, &mut output)?;

    loop {
        let event = tokio::select! {
            line = lines.recv() => Event::Line(line),
            Some(()) = commits.recv() => Event::Commit,
        };

        let line = match event {
            Event::Commit => {
                table.flush();
                render(table, &mut output)?;
                continue;
            }
            Event::Line(None) => {
                debouncer.cancel();
                if table.flush() {
                    render(table, &mut output)?;
                }
                break;
            }
            Event::Line(Some(line)) => line,
        };

        let command = Command::parse(&line);
        debug!("Session command: {:?}", command);

        match command {
            Command::Quit => break,
            Command::Next => {
                table.next_page();
            }
            Command::Prev => {
                table.prev_page();
            }
            Command::GoTo(page) => {
                table.go_to_page(page.saturating_sub(1));
            }
            Command::Action { row, action } => {
                if !table.trigger(&row, ACTIONS_COLUMN, &action) {
                    writeln!(output, "No action '{action}' for row {row} on this page")?;
                }
            }
            Command::Search(text) => {
                table.input(text);
                debouncer.schedule(());
                continue;
            }
            Command::Unknown(line) => {
                writeln!(output, "Unknown command: {line}")?;
                continue;
            }
        }

        render(table, &mut output)?;
    }

    table.teardown();
    info!("Session ended");
    Ok(())
}

fn render(table: &DataTable, output: &mut impl Write) -> Result<(), CliError> {
    write!(output, "{}", table.layout().to_text())?;
    output.flush()?;
    Ok(())
}
