use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::domain::scenario::ScenarioParameters;
use crate::domain::simulation_result::{Figure, SimulationResult};
use crate::services::simulation_api::{SimulationApi, SimulationApiError};

pub fn sample_result() -> SimulationResult {
    SimulationResult {
        monthly_savings: Figure::new(1000),
        cumulative_savings: Figure::new(36000),
        net_savings: Figure::new(-14000),
        payback_months: Figure::new(50),
        roi_percentage: Figure::new(-28),
    }
}

// A SimulationApi that replays canned outcomes and counts calls
pub struct StubApi {
    repeat: Option<SimulationResult>,
    outcomes: RefCell<VecDeque<Result<SimulationResult, SimulationApiError>>>,
    calls: Rc<Cell<usize>>,
}

impl StubApi {
    pub fn succeeding(result: SimulationResult) -> Self {
        Self {
            repeat: Some(result),
            outcomes: RefCell::new(VecDeque::new()),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn sequence(outcomes: Vec<Result<SimulationResult, SimulationApiError>>) -> Self {
        Self {
            repeat: None,
            outcomes: RefCell::new(outcomes.into()),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn calls(&self) -> Rc<Cell<usize>> {
        self.calls.clone()
    }
}

impl SimulationApi for StubApi {
    async fn simulate(
        &self,
        _params: &ScenarioParameters,
    ) -> Result<SimulationResult, SimulationApiError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(result) = &self.repeat {
            return Ok(result.clone());
        }
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(SimulationApiError::Connection))
    }
}
