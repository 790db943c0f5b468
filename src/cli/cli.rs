use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Inspect and modify files through the node interface")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// The directory all paths are resolved against
    #[clap(long, short, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Refuse every modification, regardless of the settings file
    #[clap(long, global = true)]
    pub read_only: bool,

    /// Remove directories together with their content
    #[clap(long, global = true)]
    pub recursive: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show name, path, kind and size of an entry
    Info { path: String },
    /// List the children of a directory
    Ls {
        #[clap(default_value = ".")]
        path: String,
    },
    /// Create a directory and its missing parents
    Mkdirs { path: String },
    /// Create an empty file if it does not exist yet
    Touch { path: String },
    /// Remove a file or directory
    Rm { path: String },
    /// Print the content of a file
    Cat { path: String },
    /// Replace the content of a file with standard input
    Write { path: String },
    /// Print the size of a file in bytes
    Size { path: String },
}

impl Command {
    pub fn target(&self) -> &str {
        match self {
            Command::Info { path }
            | Command::Ls { path }
            | Command::Mkdirs { path }
            | Command::Touch { path }
            | Command::Rm { path }
            | Command::Cat { path }
            | Command::Write { path }
            | Command::Size { path } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["filenode", "rm", "build", "--recursive", "-r", "/tmp"])
            .expect("Failed to parse arguments");

        assert_eq!(
            cli.command,
            Command::Rm {
                path: "build".into()
            }
        );
        assert!(cli.recursive);
        assert_eq!(cli.root, PathBuf::from("/tmp"));
        assert!(!cli.read_only);
    }

    #[test]
    fn ls_defaults_to_the_root() {
        let cli = Cli::try_parse_from(["filenode", "ls"]).expect("Failed to parse arguments");

        assert_eq!(cli.command.target(), ".");
        assert_eq!(cli.root, PathBuf::from("."));
    }
}
