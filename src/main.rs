mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use cli::{Cli, Command};
use doit::{output, Config, TaskStore};

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_secs()
        .init();
}

/// Run a single parsed command against the store.
fn dispatch(store: &TaskStore, command: Command) -> Result<()> {
    match command {
        Command::Init => {
            store.init()?;
            eprintln!("Initialized empty task list at {}", store.path().display());
        }

        Command::Add { description } => {
            let task = store.add(&description.join(" "))?;
            eprintln!("Added task {}: {}", task.id, task.description);
        }

        Command::List { all, json } => {
            let tasks = store.list(all)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print!("{}", output::format_task_table(&tasks));
            }
        }

        Command::Complete { id } => {
            let task = store.complete(id)?;
            print!("{}", output::format_task_row(&task));
            eprintln!("Completed task {id}");
        }

        Command::Delete { id } => {
            let task = store.delete(id)?;
            print!("{}", output::format_task_row(&task));
            eprintln!("Deleted task {id}");
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = Config::resolve(cli.file).context("failed to locate task file")?;
    log::debug!("using task file {}", config.path.display());
    let store = TaskStore::new(config);
    dispatch(&store, cli.command)
}
