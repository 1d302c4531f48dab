use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Names of the editable form fields, spelled as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ScenarioName,
    MonthlyInvoiceVolume,
    NumApStaff,
    AvgHoursPerInvoice,
    HourlyWage,
    ErrorRateManual,
    ErrorCost,
    TimeHorizonMonths,
    OneTimeImplementationCost,
    Email,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::ScenarioName,
        FormField::MonthlyInvoiceVolume,
        FormField::NumApStaff,
        FormField::AvgHoursPerInvoice,
        FormField::HourlyWage,
        FormField::ErrorRateManual,
        FormField::ErrorCost,
        FormField::TimeHorizonMonths,
        FormField::OneTimeImplementationCost,
        FormField::Email,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::ScenarioName => "scenario_name",
            FormField::MonthlyInvoiceVolume => "monthly_invoice_volume",
            FormField::NumApStaff => "num_ap_staff",
            FormField::AvgHoursPerInvoice => "avg_hours_per_invoice",
            FormField::HourlyWage => "hourly_wage",
            FormField::ErrorRateManual => "error_rate_manual",
            FormField::ErrorCost => "error_cost",
            FormField::TimeHorizonMonths => "time_horizon_months",
            FormField::OneTimeImplementationCost => "one_time_implementation_cost",
            FormField::Email => "email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::ScenarioName => "Scenario Name",
            FormField::MonthlyInvoiceVolume => "Monthly Invoice Volume",
            FormField::NumApStaff => "Number of AP Staff",
            FormField::AvgHoursPerInvoice => "Average Hours per Invoice",
            FormField::HourlyWage => "Hourly Wage",
            FormField::ErrorRateManual => "Manual Error Rate (%)",
            FormField::ErrorCost => "Error Cost",
            FormField::TimeHorizonMonths => "Time Horizon (Months)",
            FormField::OneTimeImplementationCost => "One-Time Implementation Cost",
            FormField::Email => "Email",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown form field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for FormField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// The scenario form as the user typed it. Every value is kept as raw text
/// until the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioInput {
    pub scenario_name: String,
    pub monthly_invoice_volume: String,
    pub num_ap_staff: String,
    pub avg_hours_per_invoice: String,
    pub hourly_wage: String,
    pub error_rate_manual: String,
    pub error_cost: String,
    pub time_horizon_months: String,
    pub one_time_implementation_cost: String,
    pub email: String,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            scenario_name: String::new(),
            monthly_invoice_volume: "2000".to_string(),
            num_ap_staff: "3".to_string(),
            avg_hours_per_invoice: "0.17".to_string(),
            hourly_wage: "30".to_string(),
            error_rate_manual: "0.5".to_string(),
            error_cost: "100".to_string(),
            time_horizon_months: "36".to_string(),
            one_time_implementation_cost: "50000".to_string(),
            email: String::new(),
        }
    }
}

impl ScenarioInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ScenarioName => &self.scenario_name,
            FormField::MonthlyInvoiceVolume => &self.monthly_invoice_volume,
            FormField::NumApStaff => &self.num_ap_staff,
            FormField::AvgHoursPerInvoice => &self.avg_hours_per_invoice,
            FormField::HourlyWage => &self.hourly_wage,
            FormField::ErrorRateManual => &self.error_rate_manual,
            FormField::ErrorCost => &self.error_cost,
            FormField::TimeHorizonMonths => &self.time_horizon_months,
            FormField::OneTimeImplementationCost => &self.one_time_implementation_cost,
            FormField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::ScenarioName => &mut self.scenario_name,
            FormField::MonthlyInvoiceVolume => &mut self.monthly_invoice_volume,
            FormField::NumApStaff => &mut self.num_ap_staff,
            FormField::AvgHoursPerInvoice => &mut self.avg_hours_per_invoice,
            FormField::HourlyWage => &mut self.hourly_wage,
            FormField::ErrorRateManual => &mut self.error_rate_manual,
            FormField::ErrorCost => &mut self.error_cost,
            FormField::TimeHorizonMonths => &mut self.time_horizon_months,
            FormField::OneTimeImplementationCost => &mut self.one_time_implementation_cost,
            FormField::Email => &mut self.email,
        };
        *slot = value.into();
    }

    /// Parses the raw text into the typed payload sent to the simulation
    /// service. Fields are checked in declaration order and the first
    /// failure is returned.
    pub fn to_parameters(&self) -> Result<ScenarioParameters, ValidationError> {
        Ok(ScenarioParameters {
            scenario_name: self.scenario_name.clone(),
            monthly_invoice_volume: parse_count(self, FormField::MonthlyInvoiceVolume)?,
            num_ap_staff: parse_count(self, FormField::NumApStaff)?,
            avg_hours_per_invoice: parse_amount(self, FormField::AvgHoursPerInvoice)?,
            hourly_wage: parse_amount(self, FormField::HourlyWage)?,
            error_rate_manual: parse_decimal(self, FormField::ErrorRateManual)?,
            error_cost: parse_amount(self, FormField::ErrorCost)?,
            time_horizon_months: parse_months(self, FormField::TimeHorizonMonths)?,
            one_time_implementation_cost: parse_amount(
                self,
                FormField::OneTimeImplementationCost,
            )?,
            email: self.email.clone(),
        })
    }
}

/// Validated scenario, serialized as the body of `POST /simulate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioParameters {
    pub scenario_name: String,
    pub monthly_invoice_volume: u64,
    pub num_ap_staff: u64,
    pub avg_hours_per_invoice: f64,
    pub hourly_wage: f64,
    pub error_rate_manual: f64,
    pub error_cost: f64,
    pub time_horizon_months: u64,
    pub one_time_implementation_cost: f64,
    pub email: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} {reason} (got {value:?})", .field.label())]
pub struct ValidationError {
    pub field: FormField,
    pub value: String,
    pub reason: &'static str,
}

impl ValidationError {
    fn new(field: FormField, value: &str, reason: &'static str) -> Self {
        Self {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

fn parse_count(input: &ScenarioInput, field: FormField) -> Result<u64, ValidationError> {
    let raw = input.get(field);
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::new(field, raw, "must be a whole number of zero or more"))
}

fn parse_months(input: &ScenarioInput, field: FormField) -> Result<u64, ValidationError> {
    let months = parse_count(input, field)?;
    if months == 0 {
        return Err(ValidationError::new(
            field,
            input.get(field),
            "must be at least 1",
        ));
    }
    Ok(months)
}

fn parse_decimal(input: &ScenarioInput, field: FormField) -> Result<f64, ValidationError> {
    let raw = input.get(field);
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::new(field, raw, "must be a number")),
    }
}

fn parse_amount(input: &ScenarioInput, field: FormField) -> Result<f64, ValidationError> {
    let value = parse_decimal(input, field)?;
    if value < 0.0 {
        return Err(ValidationError::new(
            field,
            input.get(field),
            "must not be negative",
        ));
    }
    Ok(value)
}
