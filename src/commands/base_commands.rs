use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::form_state::{FormError, FormState};
use crate::domain::scenario::FormField;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a scenario to the simulation service and print the ROI figures
    Simulate {
        #[command(flatten)]
        form: FormArgs,
        /// Path to a client config YAML
        #[arg(short, long)]
        config: Option<String>,
        /// Base URL of the simulation service (overrides config and environment)
        #[arg(short, long)]
        base_url: Option<String>,
        /// Optional YAML file receiving the scenario and its results
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate a scenario report (mock)
    Report {
        /// Email address the report is sent to
        #[arg(short, long, default_value = "")]
        email: String,
    },
    /// Print the default scenario form
    Defaults,
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Form inputs. Values are taken as raw text and only parsed on submit.
#[derive(Args, Debug, Default, Clone)]
pub struct FormArgs {
    /// Scenario name
    #[arg(long)]
    pub scenario_name: Option<String>,
    /// Monthly invoice volume
    #[arg(long, allow_hyphen_values = true)]
    pub monthly_invoice_volume: Option<String>,
    /// Number of AP staff
    #[arg(long, allow_hyphen_values = true)]
    pub num_ap_staff: Option<String>,
    /// Average hours per invoice
    #[arg(long, allow_hyphen_values = true)]
    pub avg_hours_per_invoice: Option<String>,
    /// Hourly wage
    #[arg(long, allow_hyphen_values = true)]
    pub hourly_wage: Option<String>,
    /// Manual error rate in percent
    #[arg(long, allow_hyphen_values = true)]
    pub error_rate_manual: Option<String>,
    /// Cost per error
    #[arg(long, allow_hyphen_values = true)]
    pub error_cost: Option<String>,
    /// Time horizon in months
    #[arg(long, allow_hyphen_values = true)]
    pub time_horizon_months: Option<String>,
    /// One-time implementation cost
    #[arg(long, allow_hyphen_values = true)]
    pub one_time_implementation_cost: Option<String>,
    /// Contact email
    #[arg(long)]
    pub email: Option<String>,
    /// Set a field by its wire name, e.g. --set hourly_wage=32
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(String, String)>,
}

impl FormArgs {
    /// Applies the given values to the form as individual edits, named
    /// flags first and `--set` assignments after in the order given.
    pub fn apply_to(&self, form: &mut FormState) -> Result<(), FormError> {
        let named = [
            (FormField::ScenarioName, &self.scenario_name),
            (FormField::MonthlyInvoiceVolume, &self.monthly_invoice_volume),
            (FormField::NumApStaff, &self.num_ap_staff),
            (FormField::AvgHoursPerInvoice, &self.avg_hours_per_invoice),
            (FormField::HourlyWage, &self.hourly_wage),
            (FormField::ErrorRateManual, &self.error_rate_manual),
            (FormField::ErrorCost, &self.error_cost),
            (FormField::TimeHorizonMonths, &self.time_horizon_months),
            (FormField::OneTimeImplementationCost, &self.one_time_implementation_cost),
            (FormField::Email, &self.email),
        ];
        for (field, value) in named {
            if let Some(value) = value {
                form.set_field(field, value.as_str());
            }
        }
        for (name, value) in &self.assignments {
            form.set_field_by_name(name, value.as_str())?;
        }
        Ok(())
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got {raw:?}"))
}
