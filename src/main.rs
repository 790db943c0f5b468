use std::io;

use clap::Parser as _;
use filenode::application::{Application, ApplicationError};
use filenode::cli::Cli;
use supports_color::Stream;
use tracing::debug;

#[snafu::report]
fn main() -> Result<(), ApplicationError> {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    setup_color();
    debug!("Parsed CLI arguments: {cli_args:?}");

    Application::run(cli_args, &mut io::stdin().lock(), &mut io::stdout().lock())?;

    Ok(())
}

fn setup_tracing(cli_args: &Cli) {
    if let Some(level) = cli_args.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

fn setup_color() {
    colored::control::set_override(supports_color::on(Stream::Stdout).is_some());
}
