use std::process::ExitCode;

use crate::domain::form_state::FormState;
use crate::domain::scenario::FormField;
use crate::services::report::{ReportOutcome, request_report};

pub fn report_command(email: String) -> ExitCode {
    let mut form = FormState::new();
    form.set_field(FormField::Email, email);

    match request_report(&mut form) {
        ReportOutcome::Generated { email } => {
            println!("{}", form.message());
            println!("Recipient: {email}");
            ExitCode::SUCCESS
        }
        ReportOutcome::MissingEmail => {
            eprintln!("{}", form.message());
            ExitCode::FAILURE
        }
    }
}
