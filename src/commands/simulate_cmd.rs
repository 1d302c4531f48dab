use std::process::ExitCode;

use chrono::Utc;

use crate::commands::base_commands::FormArgs;
use crate::commands::result_format::{format_form, format_result, simulation_record_yaml};
use crate::domain::form_state::{FormState, RequestState};
use crate::services::client_config::ClientConfig;
use crate::services::simulation_api::HttpSimulationClient;
use crate::services::simulation_session::SimulationSession;

pub async fn simulate_command(
    form_args: FormArgs,
    config: Option<String>,
    base_url: Option<String>,
    output: Option<String>,
) -> ExitCode {
    let config = match ClientConfig::load(config.as_deref(), base_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load client config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match HttpSimulationClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create simulation client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut form = FormState::new();
    if let Err(e) = form_args.apply_to(&mut form) {
        eprintln!("Failed to apply form input: {e}");
        return ExitCode::FAILURE;
    }
    println!("{}", format_form(&form));
    println!();

    let mut session = SimulationSession::new(form, client);
    let state = match session.run_simulation().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to run simulation: {e}");
            return ExitCode::FAILURE;
        }
    };
    session.acknowledge();
    let form = session.into_form();

    if state != RequestState::Success {
        eprintln!("{}", form.message());
        return ExitCode::FAILURE;
    }
    let Some(result) = form.result() else {
        eprintln!("{}", form.message());
        return ExitCode::FAILURE;
    };
    println!("{}", format_result(result));

    if let Some(output) = output {
        let yaml = match simulation_record_yaml(form.input(), result, Utc::now()) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize simulation output: {e}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = tokio::fs::write(&output, yaml).await {
            eprintln!("Failed to write simulation output: {e}");
            return ExitCode::FAILURE;
        }
        println!("Simulation result written to {output}");
    }
    ExitCode::SUCCESS
}
