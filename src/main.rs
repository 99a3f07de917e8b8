// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Result};
use std::env;
use std::io;

// Use library instead of local modules
use campus_records::{Config, Console, Directory};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let config = load_config(&args)?;
    tracing::info!(institution = %config.institution_name, seed = config.id_seed, "starting");

    let mut directory = Directory::new(config);
    run_console(&mut directory)?;

    Ok(())
}

/// Logs go to stderr so they never interleave with the menu on stdout
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

/// `--config <path>` wins; otherwise CAMPUS_* environment variables
fn load_config(args: &[String]) -> Result<Config> {
    match args.iter().position(|a| a == "--config") {
        Some(i) => match args.get(i + 1) {
            Some(path) => Config::from_file(path),
            None => bail!("--config requires a path"),
        },
        None => Config::from_env(),
    }
}

#[cfg(feature = "tui")]
fn run_console(directory: &mut Directory) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(directory, stdin.lock(), stdout.lock())
        .with_browser(Box::new(ui::TerminalBrowser))
        .run()
}

#[cfg(not(feature = "tui"))]
fn run_console(directory: &mut Directory) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(directory, stdin.lock(), stdout.lock()).run()
}
