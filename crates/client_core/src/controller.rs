//! The form controller: owns the values for one form session and walks the
//! submit state machine.
//!
//! ```text
//! Idle -> Validating -> Blocked -> Idle
//!                    -> Submitting -> Success (reset) -> Idle
//!                                  -> Failure (kept)  -> Idle
//! ```
//!
//! `begin_submit` covers everything up to `Submitting` and hands back the
//! payload; `finish_submit` takes the network outcome and produces the
//! notification. Callers that can await in place use `submit_with`.

use shared::protocol::{SubmissionPayload, SubmitResponse};
use tracing::{error, info, warn};

use crate::{
    error::{SubmitBlocked, TransportError},
    form::{assemble_payload, has_language, has_patient_type, FormValues},
    notification::Notification,
    phone::format_phone,
    transport::FormSubmitter,
    validation::{group_warnings, validate, FieldErrors},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    /// A payload is with the network; further submits are refused.
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptResult {
    Blocked,
    Succeeded,
    Failed,
}

/// What came back from the collaborator for one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { message: Option<String> },
    /// Detail is for logs only.
    TransportFailed { detail: String },
}

impl SubmitOutcome {
    pub fn from_result(result: Result<SubmitResponse, TransportError>) -> Self {
        match result {
            Ok(response) if response.success => SubmitOutcome::Accepted,
            Ok(response) => SubmitOutcome::Rejected {
                message: response.message,
            },
            Err(err) => {
                error!(error = %err, "intake submission failed before a response was read");
                SubmitOutcome::TransportFailed {
                    detail: err.to_string(),
                }
            }
        }
    }

    pub fn notification(&self) -> Notification {
        match self {
            SubmitOutcome::Accepted => Notification::success(),
            SubmitOutcome::Rejected { message } => Notification::error(message.as_deref()),
            SubmitOutcome::TransportFailed { .. } => Notification::error(None),
        }
    }
}

#[derive(Debug, Default)]
pub struct FormController {
    values: FormValues,
    phase: FormPhase,
    submit_attempted: bool,
    last_result: Option<AttemptResult>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Applies an edit, then re-masks the phone field so the stored value is
    /// always the formatted one.
    pub fn update(&mut self, edit: impl FnOnce(&mut FormValues)) {
        edit(&mut self.values);
        let formatted = format_phone(&self.values.phone);
        if formatted != self.values.phone {
            self.values.phone = formatted;
        }
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.values.phone = format_phone(raw);
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_result(&self) -> Option<AttemptResult> {
        self.last_result
    }

    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Idle
    }

    pub fn has_language(&self) -> bool {
        has_language(&self.values)
    }

    pub fn has_patient_type(&self) -> bool {
        has_patient_type(&self.values)
    }

    /// Messages to render inline right now. Group warnings are always live;
    /// the remaining rules only show once a submit has been attempted.
    pub fn visible_errors(&self) -> FieldErrors {
        if self.submit_attempted {
            validate(&self.values)
        } else {
            group_warnings(&self.values)
        }
    }

    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, SubmitBlocked> {
        if self.phase == FormPhase::Submitting {
            warn!("submit ignored while a previous submission is in flight");
            return Err(SubmitBlocked::InFlight);
        }

        self.submit_attempted = true;
        let errors = validate(&self.values);
        let payload = if errors.is_empty() {
            assemble_payload(&self.values)
        } else {
            None
        };

        match payload {
            Some(payload) => {
                self.phase = FormPhase::Submitting;
                info!(
                    languages = payload.languages.len(),
                    patient_types = payload.patient_types.len(),
                    "submitting intake form"
                );
                Ok(payload)
            }
            None => {
                self.last_result = Some(AttemptResult::Blocked);
                Err(SubmitBlocked::Invalid(errors))
            }
        }
    }

    /// Applies the outcome of the in-flight submission. An outcome with
    /// nothing in flight leaves the form untouched.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) -> Notification {
        let notification = outcome.notification();
        if self.phase != FormPhase::Submitting {
            warn!(?outcome, "submit outcome arrived with no submission in flight");
            return notification;
        }
        self.phase = FormPhase::Idle;

        match outcome {
            SubmitOutcome::Accepted => {
                info!("intake form accepted");
                self.reset();
                self.last_result = Some(AttemptResult::Succeeded);
            }
            SubmitOutcome::Rejected { message } => {
                warn!(message = message.as_deref().unwrap_or_default(), "intake form rejected");
                self.last_result = Some(AttemptResult::Failed);
            }
            SubmitOutcome::TransportFailed { .. } => {
                self.last_result = Some(AttemptResult::Failed);
            }
        }
        notification
    }

    pub async fn submit_with<S>(&mut self, submitter: &S) -> Result<Notification, SubmitBlocked>
    where
        S: FormSubmitter + ?Sized,
    {
        let payload = self.begin_submit()?;
        let outcome = SubmitOutcome::from_result(submitter.submit(&payload).await);
        Ok(self.finish_submit(outcome))
    }

    /// Back to an empty, untouched form.
    pub fn reset(&mut self) {
        self.values = FormValues::default();
        self.submit_attempted = false;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
