mod args;
mod columns;
mod error;
mod paths;
mod session;

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::process::ExitCode;

use casetable::model::rows_from_path;
use casetable::{DataTable, TableConfig};
use clap::Parser;
use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::args::Args;
use crate::error::CliError;
use crate::paths::Paths;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    init_logging(&args)?;

    let config = load_config(&args)?;
    let rows = rows_from_path(&args.rows)?;
    info!("Loaded {} rows from {}", rows.len(), args.rows.display());

    let columns = if let Some(preset) = args.preset {
        columns::preset(preset, &config.placeholder)
    } else if !args.columns.is_empty() {
        args.columns
            .iter()
            .map(|spec| columns::parse(spec, &config.placeholder))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        columns::infer(&rows)
    };

    let mut table = DataTable::new(columns, rows, config)?;

    if let Some(query) = &args.query {
        table.input(query.as_str());
        table.flush();
    }
    if let Some(page) = args.page {
        table.go_to_page(page.saturating_sub(1));
    }

    if args.interactive {
        session::run(&mut table, session::stdin_lines(), io::stdout()).await
    } else {
        print!("{}", table.layout().to_text());
        Ok(())
    }
}

fn init_logging(args: &Args) -> Result<(), CliError> {
    let level = LevelFilter::from(args.log_level);
    if level == LevelFilter::Off {
        return Ok(());
    }
    let default_log = || Paths::resolve().map(|paths| paths.log_file().to_path_buf());
    let Some(path) = args.log_file.clone().or_else(default_log) else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let log_file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), log_file)
        .map_err(|e| CliError::Logger(e.to_string()))?;
    debug!("Logging to {}", path.display());
    Ok(())
}

/// Config file (explicit, or the default one if present) plus flag overrides.
fn load_config(args: &Args) -> Result<TableConfig, CliError> {
    let defaults = Paths::resolve();
    let path = args
        .config
        .as_deref()
        .or_else(|| defaults.as_ref().and_then(Paths::table_config));
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => TableConfig::default(),
    };

    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(search) = &args.search {
        config.search_placeholder = Some(search.clone());
    }
    if let Some(caption) = &args.caption {
        config.caption = Some(caption.clone());
    }
    if args.interactive && config.search_placeholder.is_none() {
        config.search_placeholder = Some("Search...".to_string());
    }

    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<TableConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&text).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded table config from {}", path.display());
    Ok(config)
}
