//! Runtime bridge between the UI command queue and the intake endpoint.

use std::thread;

use client_core::{ConfigError, FormSubmitter, HttpFormSubmitter, IntakeSettings, SubmitOutcome};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{UiError, UiErrorContext, UiEvent},
};

/// Spawns the worker thread. On a startup failure the thread reports it and
/// exits, which drops `cmd_rx` so later dispatches see a disconnected queue.
pub fn launch(
    settings: Result<IntakeSettings, ConfigError>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let settings = match settings {
            Ok(settings) => settings,
            Err(err) => {
                tracing::error!(error = %err, "intake settings are unusable");
                report_startup_failure(&ui_tx, format!("invalid settings: {err}"));
                return;
            }
        };

        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!(error = %err, "failed to build backend runtime");
                report_startup_failure(&ui_tx, format!("failed to build backend runtime: {err}"));
                return;
            }
        };

        let submitter = HttpFormSubmitter::new(&settings.api_base_url);
        tracing::info!(endpoint = submitter.endpoint(), "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Submitting to {}",
            submitter.endpoint()
        )));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SubmitForm { payload } => {
                        let outcome = SubmitOutcome::from_result(submitter.submit(&payload).await);
                        if ui_tx.send(UiEvent::SubmissionFinished(outcome)).is_err() {
                            tracing::debug!("ui event queue closed; stopping backend worker");
                            break;
                        }
                    }
                }
            }
        });
    });
}

fn report_startup_failure(ui_tx: &Sender<UiEvent>, detail: String) {
    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
        UiErrorContext::BackendStartup,
        format!("backend worker startup failure: {detail}"),
    )));
}
