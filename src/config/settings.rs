use std::fs;
use std::path::{Path, PathBuf};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, info};

use crate::ext::BestEffortPathExt;
use crate::node::RemovePolicy;

const SETTINGS_FILE_NAME: &str = "filenode.yaml";

const READ_ONLY_KEY: &str = "read_only";
const REMOVE_KEY: &str = "remove";

fn get_settings_file_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE_NAME)
}

/// Settings read from `filenode.yaml` in the root directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub read_only: bool,
    pub remove_policy: RemovePolicy,
}

impl Settings {
    /// Reads the settings file of `root`, falling back to defaults when there is none.
    pub fn read(root: &Path) -> Result<Self, SettingsError> {
        let path = get_settings_file_path(root);
        if !path.is_file() {
            info!(
                "No settings file at {}, using defaults",
                path.best_effort_path_display()
            );
            return Ok(Self::default());
        }

        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        debug!("Reading settings file: {}", path.best_effort_path_display());
        let contents = fs::read_to_string(path).context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    fn parse_read_only(value: &Yaml) -> Result<bool, SettingsError> {
        match value {
            Yaml::Value(Scalar::Boolean(flag)) => Ok(*flag),
            _ => InvalidValueSnafu {
                key: READ_ONLY_KEY,
                expected: "a boolean",
            }
            .fail(),
        }
    }

    fn parse_remove_policy(value: &Yaml) -> Result<RemovePolicy, SettingsError> {
        let policy = value.as_str().context(InvalidValueSnafu {
            key: REMOVE_KEY,
            expected: "a string",
        })?;

        match policy {
            "empty-only" => Ok(RemovePolicy::EmptyOnly),
            "recursive" => Ok(RemovePolicy::Recursive),
            other => UnknownRemovePolicySnafu { policy: other }.fail(),
        }
    }

    fn from_mapping(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Self, SettingsError> {
        let mut settings = Settings::default();

        for (key, value) in top_level {
            match key.as_str() {
                Some(READ_ONLY_KEY) => settings.read_only = Self::parse_read_only(value)?,
                Some(REMOVE_KEY) => settings.remove_policy = Self::parse_remove_policy(value)?,
                _ => debug!("Skipping unknown settings entry: {:?}", key),
            }
        }

        Ok(settings)
    }
}

impl TryFrom<&str> for Settings {
    type Error = SettingsError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents =
            Yaml::load_from_str(contents).map_err(|e| SettingsError::ParseError { source: e })?;

        // An empty file is a valid way of asking for the defaults
        let Some(document) = documents.first() else {
            return Ok(Settings::default());
        };

        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;
        Self::from_mapping(top_level)
    }
}

#[derive(Debug, Snafu)]
pub enum SettingsError {
    #[snafu(display("Failed to read the settings file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the settings file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of the settings file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Setting '{}' should be {}", key, expected))]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
    },
    #[snafu(display("Unknown remove policy '{}', expected 'empty-only' or 'recursive'", policy))]
    UnknownRemovePolicy { policy: String },
}
