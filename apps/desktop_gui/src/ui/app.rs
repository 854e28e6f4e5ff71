use std::time::{Duration, Instant};

use client_core::{
    phone::PHONE_MAX_LEN, FieldErrors, FormController, FormValues, Notification,
    NotificationKind, SubmitBlocked, SubmitOutcome, TransportError,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{ExperienceDuration, FormField, HealthcareHistory, Language, PatientType};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{UiError, UiErrorContext, UiEvent},
        orchestration::dispatch_backend_command,
    },
};

const SUCCESS_TOAST_TTL: Duration = Duration::from_secs(3);
const ERROR_TOAST_TTL: Duration = Duration::from_secs(5);
const FORM_MAX_WIDTH: f32 = 880.0;
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

const INTRO_TEXT: &str = "This is not a formal application but a way for us to know you're \
interested. Once you've submitted the form, one of our coordinators will reach out to you as \
soon as possible to provide further details and guide you through the next steps.";
const CLOSING_TEXT: &str = "Thank you for your interest. This preliminary form helps us understand \
your intent to join our program. Upon submission, our program coordinator will contact you \
directly to provide comprehensive information and guide you through the formal application \
process.";

struct Toast {
    notification: Notification,
    shown_at: Instant,
}

impl Toast {
    fn new(notification: Notification) -> Self {
        Self {
            notification,
            shown_at: Instant::now(),
        }
    }

    fn ttl(&self) -> Duration {
        match self.notification.kind {
            NotificationKind::Success => SUCCESS_TOAST_TTL,
            NotificationKind::Error => ERROR_TOAST_TTL,
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.ttl()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    title: &'static str,
    message: String,
}

impl From<&UiError> for StatusBanner {
    fn from(err: &UiError) -> Self {
        Self {
            severity: StatusBannerSeverity::Error,
            title: err.title(),
            message: err.message().to_string(),
        }
    }
}

pub struct IntakeApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    form: FormController,
    toast: Option<Toast>,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl IntakeApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: FormController::new(),
            toast: None,
            status: "Starting...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => {
                    tracing::warn!(
                        category = ?err.category(),
                        context = ?err.context(),
                        "{}",
                        err.message()
                    );
                    self.status = err.title().to_string();
                    self.status_banner = Some(StatusBanner::from(&err));
                }
                UiEvent::SubmissionFinished(outcome) => self.finish_submission(outcome),
            }
        }
    }

    fn finish_submission(&mut self, outcome: SubmitOutcome) {
        let notification = self.form.finish_submit(outcome);
        self.status = if notification.is_success() {
            "Ready".to_string()
        } else {
            "Last submission failed".to_string()
        };
        self.toast = Some(Toast::new(notification));
    }

    fn try_submit(&mut self) {
        let payload = match self.form.begin_submit() {
            Ok(payload) => payload,
            Err(SubmitBlocked::InFlight) => return,
            Err(SubmitBlocked::Invalid(errors)) => {
                self.status = format!("{} field(s) need attention", errors.len());
                return;
            }
        };

        self.status = "Submitting...".to_string();
        if let Err(failure) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::SubmitForm { payload })
        {
            let err = UiError::from_message(UiErrorContext::Submit, failure.describe());
            self.status_banner = Some(StatusBanner::from(&err));
            self.finish_submission(SubmitOutcome::from_result(Err(
                TransportError::Unavailable(failure.describe().to_string()),
            )));
        }
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expired(now)) {
            self.toast = None;
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            egui::RichText::new(banner.title)
                                .strong()
                                .color(egui::Color32::WHITE),
                        );
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_toast(&mut self, ctx: &egui::Context) {
        let Some(toast) = &self.toast else {
            return;
        };
        let (fill, stroke) = match toast.notification.kind {
            NotificationKind::Success => (
                egui::Color32::from_rgb(22, 101, 52),
                egui::Color32::from_rgb(74, 222, 128),
            ),
            NotificationKind::Error => (
                egui::Color32::from_rgb(127, 29, 29),
                egui::Color32::from_rgb(248, 113, 113),
            ),
        };
        let message = toast.notification.message.clone();
        let mut dismissed = false;

        egui::Area::new(egui::Id::new("intake_toast"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 16.0))
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(fill)
                    .stroke(egui::Stroke::new(1.0, stroke))
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(14, 10))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(message)
                                    .strong()
                                    .color(egui::Color32::WHITE),
                            );
                            if ui.small_button("x").clicked() {
                                dismissed = true;
                            }
                        });
                    });
            });

        if dismissed {
            self.toast = None;
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let mut draft = self.form.values().clone();
        let errors = self.form.visible_errors();
        let can_submit = self.form.can_submit();
        let mut submit_clicked = false;

        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("Training School Form Filling").size(26.0));
        });
        ui.add_space(8.0);
        ui.label(INTRO_TEXT);
        ui.add_space(6.0);
        ui.label(egui::RichText::new("Required fields are marked with *").color(ERROR_TEXT));
        ui.add_space(12.0);

        ui.columns(2, |columns| {
            personal_details(&mut columns[0], &mut draft, &errors);
            background_details(&mut columns[1], &mut draft, &errors);
        });

        ui.add_space(16.0);
        let label = if can_submit { "Submit" } else { "Submitting..." };
        let button = egui::Button::new(egui::RichText::new(label).strong().size(16.0))
            .min_size(egui::vec2(ui.available_width(), 40.0));
        if ui.add_enabled(can_submit, button).clicked() {
            submit_clicked = true;
        }

        ui.add_space(12.0);
        ui.label(CLOSING_TEXT);

        if draft != *self.form.values() {
            self.form.update(|values| *values = draft);
        }
        if submit_clicked {
            self.try_submit();
        }
    }
}

fn required_label(ui: &mut egui::Ui, field: FormField) {
    ui.label(egui::RichText::new(format!("{}*", field.label())).strong());
}

fn field_error(ui: &mut egui::Ui, errors: &FieldErrors, field: FormField) {
    if let Some(message) = errors.get(field) {
        ui.label(egui::RichText::new(message).small().color(ERROR_TEXT));
    }
}

fn text_field(
    ui: &mut egui::Ui,
    errors: &FieldErrors,
    field: FormField,
    hint: &str,
    value: &mut String,
    char_limit: Option<usize>,
) {
    required_label(ui, field);
    let mut edit = egui::TextEdit::singleline(value)
        .id_salt(field.label())
        .hint_text(hint)
        .desired_width(f32::INFINITY);
    if let Some(limit) = char_limit {
        edit = edit.char_limit(limit);
    }
    ui.add(edit);
    field_error(ui, errors, field);
    ui.add_space(8.0);
}

fn personal_details(ui: &mut egui::Ui, values: &mut FormValues, errors: &FieldErrors) {
    text_field(ui, errors, FormField::FirstName, "First name", &mut values.first_name, None);
    text_field(ui, errors, FormField::LastName, "Last name", &mut values.last_name, None);
    text_field(ui, errors, FormField::Email, "name@example.com", &mut values.email, None);
    text_field(ui, errors, FormField::DateOfBirth, "YYYY-MM-DD", &mut values.dob, None);
    text_field(
        ui,
        errors,
        FormField::Phone,
        "(XXX) XXX-XXXX",
        &mut values.phone,
        Some(PHONE_MAX_LEN),
    );
    text_field(ui, errors, FormField::Address, "County", &mut values.address, None);

    required_label(ui, FormField::Languages);
    for language in Language::ALL {
        ui.checkbox(
            values.languages.flag_mut(*language),
            language.display_label(),
        );
    }
    if values.languages.other {
        ui.add(
            egui::TextEdit::singleline(&mut values.other_language)
                .id_salt("other_language")
                .hint_text("Please specify")
                .desired_width(f32::INFINITY),
        );
    }
    field_error(ui, errors, FormField::Languages);
}

fn background_details(ui: &mut egui::Ui, values: &mut FormValues, errors: &FieldErrors) {
    required_label(ui, FormField::Healthcare);
    ui.horizontal(|ui| {
        for answer in HealthcareHistory::ALL {
            ui.radio_value(&mut values.healthcare, Some(*answer), answer.display_label());
        }
    });
    field_error(ui, errors, FormField::Healthcare);
    ui.add_space(8.0);

    required_label(ui, FormField::Experience);
    for duration in ExperienceDuration::ALL {
        ui.radio_value(&mut values.experience, Some(*duration), duration.display_label());
    }
    field_error(ui, errors, FormField::Experience);
    ui.add_space(8.0);

    required_label(ui, FormField::PatientTypes);
    for patient_type in PatientType::ALL {
        ui.checkbox(
            values.patient_types.flag_mut(*patient_type),
            patient_type.display_label(),
        );
    }
    field_error(ui, errors, FormField::PatientTypes);
}

impl eframe::App for IntakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.expire_toast(Instant::now());

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(egui::RichText::new(&self.status).small());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(FORM_MAX_WIDTH);
                    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                        self.show_status_banner(ui);
                        self.show_form(ui);
                    });
                });
            });
        });

        self.show_toast(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
