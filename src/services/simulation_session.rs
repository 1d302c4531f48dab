use thiserror::Error;
use tracing::{info, warn};

use crate::domain::form_state::{FormState, RequestState};
use crate::domain::scenario::{ScenarioParameters, ValidationError};
use crate::domain::simulation_result::SimulationResult;
use crate::services::simulation_api::{SimulationApi, SimulationApiError};

pub const SIMULATION_FAILED: &str = "Simulation failed";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("a simulation is already in flight")]
    AlreadySubmitting,
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

/// Drives the form through one simulate round trip at a time.
pub struct SimulationSession<A: SimulationApi> {
    form: FormState,
    api: A,
}

impl<A: SimulationApi> SimulationSession<A> {
    pub fn new(form: FormState, api: A) -> Self {
        Self { form, api }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn into_form(self) -> FormState {
        self.form
    }

    /// Moves the form into `Submitting` and returns the payload to send.
    /// Input that does not parse ends the attempt as a failure without
    /// entering `Submitting`.
    pub fn begin_submission(&mut self) -> Result<ScenarioParameters, SessionError> {
        if self.form.is_loading() {
            return Err(SessionError::AlreadySubmitting);
        }

        match self.form.input().to_parameters() {
            Ok(params) => {
                self.form.set_request_state(RequestState::Submitting);
                Ok(params)
            }
            Err(err) => {
                warn!(field = %err.field, value = %err.value, "rejected scenario input");
                self.form.set_message(format!("Invalid input: {err}"));
                self.form.set_request_state(RequestState::Failure);
                Err(SessionError::InvalidInput(err))
            }
        }
    }

    /// Applies the outcome of a request started with `begin_submission`.
    /// A failure keeps whatever result was shown before.
    pub fn finish_submission(&mut self, outcome: Result<SimulationResult, SimulationApiError>) {
        match outcome {
            Ok(result) => {
                info!(
                    monthly_savings = %result.monthly_savings,
                    roi_percentage = %result.roi_percentage,
                    "simulation succeeded"
                );
                self.form.replace_result(result);
                self.form.set_message("");
                self.form.set_request_state(RequestState::Success);
            }
            Err(err) => {
                warn!(error = %err, "simulation failed");
                self.form.set_message(SIMULATION_FAILED);
                self.form.set_request_state(RequestState::Failure);
            }
        }
    }

    pub async fn run_simulation(&mut self) -> Result<RequestState, SessionError> {
        let params = match self.begin_submission() {
            Ok(params) => params,
            Err(SessionError::InvalidInput(_)) => return Ok(self.form.request_state()),
            Err(err) => return Err(err),
        };
        let outcome = self.api.simulate(&params).await;
        self.finish_submission(outcome);
        Ok(self.form.request_state())
    }

    /// Returns a finished round trip to `Idle`; result and message stay.
    pub fn acknowledge(&mut self) {
        if matches!(
            self.form.request_state(),
            RequestState::Success | RequestState::Failure
        ) {
            self.form.set_request_state(RequestState::Idle);
        }
    }
}
