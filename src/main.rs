mod cli;

use anyhow::{Context, Result};
use category_filter::{
    Catalog, Command, FileStore, FilterSession, KeyValueStore, MemoryStore,
    consts::{DEFAULT_LOG_FILTER, EXIT_COMMAND, PROMPT},
};
use clap::Parser;
use cli::Cli;
use std::io::{BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store: Box<dyn KeyValueStore> = if cli.memory {
        info!("Using in-memory category catalog");
        Box::new(MemoryStore::new())
    } else {
        let dir = cli.store_dir();
        info!(store = %dir.display(), "Using category catalog on disk");
        Box::new(FileStore::new(dir))
    };

    let mut session = FilterSession::open(Catalog::open(store), &cli.expression);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    writeln!(stdout, "filter: {}", session.draft())?;
    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read command")?;
        if read == 0 || line.trim() == EXIT_COMMAND {
            break;
        }
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        command
            .execute(&mut session, &mut stdout)
            .context("Failed to run command")?;
    }

    info!(filter = %session.draft(), "Filter session closed");
    Ok(())
}
