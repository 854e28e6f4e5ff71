//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFailure {
    QueueFull,
    Disconnected,
}

impl DispatchFailure {
    pub fn describe(self) -> &'static str {
        match self {
            DispatchFailure::QueueFull => "Submission queue is full; please retry",
            DispatchFailure::Disconnected => {
                "Submission worker disconnected (possible startup/runtime failure)"
            }
        }
    }
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), DispatchFailure> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(DispatchFailure::QueueFull)
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Err(DispatchFailure::Disconnected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossbeam_channel::bounded;
    use shared::{
        domain::{ExperienceDuration, HealthcareHistory, PatientType},
        protocol::SubmissionPayload,
    };

    fn submit_command() -> BackendCommand {
        BackendCommand::SubmitForm {
            payload: SubmissionPayload {
                first_name: "Ana".to_string(),
                last_name: "Reyes".to_string(),
                email: "ana@example.org".to_string(),
                phone: "(212) 555-0100".to_string(),
                address: "Queens".to_string(),
                dob: NaiveDate::from_ymd_opt(1990, 1, 2).expect("valid date"),
                healthcare: HealthcareHistory::Yes,
                experience: ExperienceDuration::MoreThanThreeMonths,
                languages: vec!["Spanish".to_string()],
                patient_types: vec![PatientType::Adults],
            },
        }
    }

    #[test]
    fn queued_command_reaches_the_worker() {
        let (tx, rx) = bounded(1);
        assert_eq!(dispatch_backend_command(&tx, submit_command()), Ok(()));
        assert_eq!(rx.try_recv().expect("queued").name(), "submit_form");
    }

    #[test]
    fn full_queue_is_reported() {
        let (tx, _rx) = bounded(1);
        dispatch_backend_command(&tx, submit_command()).expect("first fits");
        assert_eq!(
            dispatch_backend_command(&tx, submit_command()),
            Err(DispatchFailure::QueueFull)
        );
    }

    #[test]
    fn dropped_worker_is_reported() {
        let (tx, rx) = bounded(1);
        drop(rx);
        assert_eq!(
            dispatch_backend_command(&tx, submit_command()),
            Err(DispatchFailure::Disconnected)
        );
    }
}
