mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use std::io;
use std::process::ExitCode;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::report_cmd::report_command;
use crate::commands::result_format::format_form;
use crate::commands::simulate_cmd::simulate_command;
use crate::domain::form_state::FormState;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roi_sim=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    match args.command {
        Commands::Simulate {
            form,
            config,
            base_url,
            output,
        } => simulate_command(form, config, base_url, output).await,
        Commands::Report { email } => report_command(email),
        Commands::Defaults => {
            println!("{}", format_form(&FormState::new()));
            ExitCode::SUCCESS
        }
        Commands::Completions { shell } => {
            let mut cmd = CliArgs::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
            ExitCode::SUCCESS
        }
    }
}
