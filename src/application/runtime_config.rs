use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::config::{Settings, SettingsError};
use crate::node::RemovePolicy;

/// Everything a single run needs: the CLI request merged over the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub command: Command,
    pub read_only: bool,
    pub remove_policy: RemovePolicy,
}

impl RuntimeConfig {
    pub fn resolve(cli: Cli) -> Result<Self, SettingsError> {
        let settings = Settings::read(&cli.root)?;
        Ok(Self::from_parts(cli, settings))
    }

    /// Flags can turn on read-only mode or recursive removal but cannot turn off
    /// what the settings file enables.
    pub fn from_parts(cli: Cli, settings: Settings) -> Self {
        let remove_policy = if cli.recursive {
            RemovePolicy::Recursive
        } else {
            settings.remove_policy
        };

        Self {
            root: cli.root,
            command: cli.command,
            read_only: cli.read_only || settings.read_only,
            remove_policy,
        }
    }
}
