use thiserror::Error;

use crate::domain::scenario::{FormField, ScenarioInput, UnknownFieldError};
use crate::domain::simulation_result::SimulationResult;

/// Lifecycle of the simulate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failure,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
}

/// In-memory state behind the scenario form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    input: ScenarioInput,
    state: RequestState,
    result: Option<SimulationResult>,
    message: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &ScenarioInput {
        &self.input
    }

    pub fn field(&self, field: FormField) -> &str {
        self.input.get(field)
    }

    /// Replaces the raw text of one field. No parsing happens here.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.input.set(field, value);
    }

    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = name.parse::<FormField>()?;
        self.set_field(field, value);
        Ok(())
    }

    pub fn request_state(&self) -> RequestState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == RequestState::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Calculating..."
        } else {
            "Run Simulation"
        }
    }

    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub(crate) fn set_request_state(&mut self, state: RequestState) {
        self.state = state;
    }

    pub(crate) fn replace_result(&mut self, result: SimulationResult) {
        self.result = Some(result);
    }
}
