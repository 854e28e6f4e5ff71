//! UI/backend events and error modeling for the intake window.

use client_core::SubmitOutcome;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    SubmissionFinished(SubmitOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("settings")
            || message_lower.contains("base url")
            || message_lower.contains("scheme")
            || message_lower.contains("intake.toml")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("runtime")
            || message_lower.contains("queue")
            || message_lower.contains("disconnect")
            || message_lower.contains("connection")
            || message_lower.contains("timed out")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Banner heading for this error.
    pub fn title(&self) -> &'static str {
        match (self.context, self.category) {
            (UiErrorContext::BackendStartup, UiErrorCategory::Configuration) => {
                "Intake endpoint is not configured"
            }
            (UiErrorContext::BackendStartup, _) => "Submission service failed to start",
            (UiErrorContext::Submit, UiErrorCategory::Transport) => "Submission could not be sent",
            (UiErrorContext::Submit, _) => "Submission error",
        }
    }
}
