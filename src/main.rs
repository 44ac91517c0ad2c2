use std::process;

use clap::Parser;

use quadriclass::cli::{execute_command, output, Cli, CliError};
use quadriclass::config::Settings;
use quadriclass::infrastructure::di::ServiceContainer;
use quadriclass::util::logging::setup_logging;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&e);
            e.exit_code()
        }
    };
    process::exit(code);
}

fn run(cli: &Cli) -> Result<i32, CliError> {
    let settings = Settings::load(cli.config.as_deref())?;
    tracing::debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings)?;
    execute_command(cli, &container)
}
