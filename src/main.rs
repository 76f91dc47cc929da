//! Binary entry point that glues the CSV-backed record store to the TUI: parse
//! the command line, start logging, load the directory, and drive the Ratatui
//! event loop until the user exits.
use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use business_directory::config::{CliArgs, Config};
use business_directory::{logging, run_app, App, RecordStore};

/// A load failure is reported before the terminal is touched, so the error
/// chain lands on stderr instead of a half-drawn screen.
fn main() -> anyhow::Result<()> {
    let config = Config::from_args(CliArgs::parse())?;
    logging::init(&config.log_file, &config.log_filter)?;
    info!(file = %config.data_file.display(), "starting business directory");

    let store = RecordStore::open(&config.data_file)
        .inspect_err(|err| error!("{err}"))
        .context("the business directory cannot start without its data file")?;

    let mut app = App::new(store);
    run_app(&mut app)
}
