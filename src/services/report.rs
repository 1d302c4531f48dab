use tracing::info;

use crate::domain::form_state::FormState;

pub const MISSING_EMAIL: &str = "Please enter email for report";
pub const REPORT_SENT: &str = "Report generated (mock) and sent to email!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    MissingEmail,
    Generated { email: String },
}

/// Mock report generation. Nothing is rendered or sent; only the status
/// message changes.
pub fn request_report(form: &mut FormState) -> ReportOutcome {
    let email = form.input().email.trim().to_string();
    if email.is_empty() {
        form.set_message(MISSING_EMAIL);
        return ReportOutcome::MissingEmail;
    }

    info!(%email, "report requested (mock)");
    form.set_message(REPORT_SENT);
    ReportOutcome::Generated { email }
}
