pub mod form_state;
pub mod scenario;
pub mod simulation_result;
