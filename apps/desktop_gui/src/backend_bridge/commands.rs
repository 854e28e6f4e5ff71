//! Backend commands queued from UI to backend worker.

use shared::protocol::SubmissionPayload;

pub enum BackendCommand {
    SubmitForm { payload: SubmissionPayload },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SubmitForm { .. } => "submit_form",
        }
    }
}
