//! ecodash entry point: list, run or configure the dashboards headless.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use ecodash::apps;
use ecodash::config::{AppConfig, LogLevel};
use ecodash::console::Console;
use ecodash::services::{EcoServices, LocalServices};

#[derive(Parser, Debug)]
#[command(name = "ecodash", version, about = "Headless geospatial dashboards")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered applications
    List,
    /// Run one application, reading commands from a script or stdin
    Run {
        /// URL stem of the application, e.g. tracks_explorer_app
        url: String,
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Print the effective configuration as JSON
    Config,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(AppConfig::load(path)?),
        None => Ok(AppConfig::load_from_default_path().unwrap_or_default()),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli.config.as_ref())?;
    let level = cli.log_level.unwrap_or(config.preferences.log_level);
    env_logger::Builder::from_default_env()
        .filter_level(level.to_level_filter())
        .init();
    log::debug!("Log level: {}", level.name());

    match cli.command {
        Command::Config => println!("{}", config.to_json()?),
        Command::List => {
            let services: Rc<dyn EcoServices> = Rc::new(LocalServices::new());
            for entry in apps::registry(services, config).entries() {
                println!("/{}\t{}", entry.url(), entry.name());
            }
        }
        Command::Run { url, script } => {
            let services: Rc<dyn EcoServices> = Rc::new(LocalServices::new());
            let registry = apps::registry(services, config);
            let entry = registry
                .get(&url)
                .ok_or_else(|| format!("No application at '{}' (try `ecodash list`)", url))?;
            log::info!("Starting {}", entry.name());

            let mut app = entry.create();
            let stdout = io::stdout();
            let mut console = Console::new(app.as_mut(), stdout.lock());
            match script {
                Some(path) => console.run(BufReader::new(File::open(path)?))?,
                None => console.run(io::stdin().lock())?,
            }
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
