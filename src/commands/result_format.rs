use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::form_state::FormState;
use crate::domain::scenario::{FormField, ScenarioInput};
use crate::domain::simulation_result::SimulationResult;

#[derive(Serialize)]
struct SimulationRecord<'a> {
    generated_at: String,
    scenario: &'a ScenarioInput,
    results: &'a SimulationResult,
}

pub fn format_form(form: &FormState) -> String {
    let mut lines = Vec::new();
    lines.push("Invoicing ROI Simulator".to_string());
    for field in FormField::ALL {
        lines.push(format!("{}: {}", field.label(), form.field(field)));
    }
    lines.push(format!("[{}]", form.submit_label()));
    lines.join("\n")
}

pub fn format_result(result: &SimulationResult) -> String {
    let lines = [
        format!("Monthly Savings: ${}", result.monthly_savings),
        format!("Cumulative Savings: ${}", result.cumulative_savings),
        format!("Net Savings: ${}", result.net_savings),
        format!("Payback (months): {}", result.payback_months),
        format!("ROI (%): {}", result.roi_percentage),
    ];
    lines.join("\n")
}

pub fn simulation_record_yaml(
    input: &ScenarioInput,
    result: &SimulationResult,
    generated_at: DateTime<Utc>,
) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&SimulationRecord {
        generated_at: generated_at.to_rfc3339(),
        scenario: input,
        results: result,
    })
}
