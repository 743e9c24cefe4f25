use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "doit", about = "Personal todo list")]
pub struct Cli {
    /// Path to the task file [default: data.csv next to the executable]
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reset the task file to an empty list
    Init,

    /// Add a task
    Add {
        /// Task description (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// List incomplete tasks
    List {
        /// Include completed tasks
        #[arg(short, long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a task as complete
    Complete {
        /// Task id
        id: u64,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::try_parse_from(["doit", "add", "buy", "milk"]).unwrap();
        match cli.command {
            Command::Add { description } => assert_eq!(description.join(" "), "buy milk"),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn list_short_all_flag() {
        let cli = Cli::try_parse_from(["doit", "list", "-a"]).unwrap();
        assert!(matches!(cli.command, Command::List { all: true, json: false }));
    }

    #[test]
    fn global_file_after_subcommand() {
        let cli =
            Cli::try_parse_from(["doit", "complete", "3", "--file", "/tmp/t.csv", "-vv"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/t.csv")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Complete { id: 3 }));
    }

    #[test]
    fn id_must_be_numeric() {
        assert!(Cli::try_parse_from(["doit", "delete", "first"]).is_err());
    }

    #[test]
    fn add_requires_description() {
        assert!(Cli::try_parse_from(["doit", "add"]).is_err());
    }
}
