use clap::{Arg, Command};
use log::info;
use std::io;
use std::path::PathBuf;

use todolist::tasks::run_screen;
use todolist::utils::logging::initialize_logging;
use todolist::{AppConfig, FileStorage, TaskStore};

fn cli() -> Command {
    Command::new("todolist")
        .about("A single-screen to-do list kept on this device")
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a config file (default: standard locations)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Directory the task list is saved in")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log level: error, warn, info, debug, trace or off")
                .value_name("LEVEL"),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(dir) = matches.get_one::<PathBuf>("data-dir") {
        config.data_dir = dir.clone();
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log_level = level.clone();
    }

    initialize_logging(config.level_filter()?, &config.log_path())?;
    info!(
        "Starting with data_dir={}, slot={}",
        config.data_dir.display(),
        config.storage_key
    );

    // A missing or unusable directory is not fatal; the first save reports it
    let storage = FileStorage::new(&config.data_dir);
    let mut store = TaskStore::load(storage, config.storage_key.clone());

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_screen(&mut store, &mut stdin.lock(), &mut stdout.lock())?;

    info!("Exiting with {} task(s)", store.tasks().len());
    Ok(())
}
