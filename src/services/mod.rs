pub mod client_config;
pub mod report;
pub mod simulation_api;
pub mod simulation_session;
