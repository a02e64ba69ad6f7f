//! agent-notify CLI entry point

use std::process::ExitCode;

use clap::Parser;

use agent_notify::cli::{app, args::Cli, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    app::block_on(app::run(cli), app::SHUTDOWN_GRACE)
}
