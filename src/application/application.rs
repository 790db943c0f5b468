use std::io::{self, Read, Write};
use std::path::{Component, Path};

use colored::Colorize;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::cli::{Cli, Command};
use crate::config::SettingsError;
use crate::local::LocalNode;
use crate::node::{FilesystemError, Node, ReadOnlyNode};

pub struct Application;

impl Application {
    pub fn run(
        cli: Cli,
        input: &mut impl Read,
        output: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let config = RuntimeConfig::resolve(cli).context(SettingsReadSnafu)?;
        debug!("Resolved runtime config: {:?}", config);

        Self::execute(&config, input, output)
    }

    pub fn execute(
        config: &RuntimeConfig,
        input: &mut impl Read,
        output: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let target = config.command.target();
        let node = Self::resolve_target(Self::open_root(config), target)?;
        debug!("Resolved '{}' to {}", target, node.path());

        match &config.command {
            Command::Info { .. } => Self::print_info(&*node, target, output),
            Command::Ls { .. } => Self::print_children(&*node, target, output),
            Command::Mkdirs { .. } => {
                node.make_directories().context(NodeSnafu {
                    operation: "create directories",
                    target,
                })?;
                info!("Created directory {}", node.path());
                Ok(())
            }
            Command::Touch { .. } => {
                node.touch().context(NodeSnafu {
                    operation: "touch",
                    target,
                })?;
                info!("Touched {}", node.path());
                Ok(())
            }
            Command::Rm { .. } => {
                node.remove().context(NodeSnafu {
                    operation: "remove",
                    target,
                })?;
                info!("Removed {} ({})", node.path(), config.remove_policy);
                Ok(())
            }
            Command::Cat { .. } => {
                let mut stream = node.open_for_reading().context(NodeSnafu {
                    operation: "read",
                    target,
                })?;
                io::copy(&mut stream, output).context(TransferSnafu { target })?;
                Ok(())
            }
            Command::Write { .. } => {
                let mut stream = node.open_for_writing().context(NodeSnafu {
                    operation: "write",
                    target,
                })?;
                let written = io::copy(input, &mut stream)
                    .and_then(|written| stream.flush().map(|_| written))
                    .context(TransferSnafu { target })?;
                info!("Wrote {} bytes to {}", written, node.path());
                Ok(())
            }
            Command::Size { .. } => {
                let size = node.size().context(NodeSnafu {
                    operation: "determine the size of",
                    target,
                })?;
                writeln!(output, "{size}").context(TransferSnafu { target })
            }
        }
    }

    fn open_root(config: &RuntimeConfig) -> Box<dyn Node> {
        let root = LocalNode::new(&config.root).with_remove_policy(config.remove_policy);
        if config.read_only {
            debug!("Opening {} read-only", config.root.display());
            Box::new(ReadOnlyNode::new(root))
        } else {
            Box::new(root)
        }
    }

    /// Walks `target` from `root` one component at a time through [`Node::child`].
    fn resolve_target(root: Box<dyn Node>, target: &str) -> Result<Box<dyn Node>, ApplicationError> {
        Path::new(target)
            .components()
            .try_fold(root, |node, component| match component {
                Component::CurDir => Ok(node),
                Component::Normal(name) => Ok(node.child(&name.to_string_lossy())),
                _ => InvalidTargetSnafu { target }.fail(),
            })
    }

    fn print_info(
        node: &dyn Node,
        target: &str,
        output: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let kind = node.kind();
        writeln!(output, "name: {}", node.name())
            .and_then(|_| writeln!(output, "path: {}", node.path()))
            .and_then(|_| writeln!(output, "kind: {kind}"))
            .context(TransferSnafu { target })?;

        if kind.is_file() {
            let size = node.size().context(NodeSnafu {
                operation: "determine the size of",
                target,
            })?;
            writeln!(output, "size: {size}").context(TransferSnafu { target })?;
        }

        Ok(())
    }

    fn print_children(
        node: &dyn Node,
        target: &str,
        output: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        ensure!(node.exists(), MissingTargetSnafu { target });

        let names = node.children().context(NodeSnafu {
            operation: "list",
            target,
        })?;
        debug!("Listing {} children of {}", names.len(), node.path());

        for name in names {
            let line = if node.child(&name).is_directory() {
                format!("{name}/").blue().bold().to_string()
            } else {
                name
            };
            writeln!(output, "{line}").context(TransferSnafu { target })?;
        }

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while reading settings"))]
    SettingsReadError { source: SettingsError },
    #[snafu(display("Target '{}' must be a relative path inside the root", target))]
    InvalidTarget { target: String },
    #[snafu(display("Target '{}' does not exist", target))]
    MissingTarget { target: String },
    #[snafu(display("Failed to {} '{}'", operation, target))]
    NodeError {
        operation: &'static str,
        target: String,
        source: FilesystemError,
    },
    #[snafu(display("Failed to transfer data for '{}'", target))]
    TransferError { target: String, source: io::Error },
}
