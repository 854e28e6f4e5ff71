use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    config::DEFAULT_LOG_FILTER, load_settings, FormController, HttpFormSubmitter, SubmitBlocked,
};
use shared::domain::{ExperienceDuration, HealthcareHistory, Language, PatientType};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "intake",
    about = "Fill in and submit the training school intake form from the command line",
    version
)]
struct Args {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// Any spelling; digits are kept and re-masked as (XXX) YYY-ZZZZ
    #[arg(long)]
    phone: Option<String>,
    /// County
    #[arg(long)]
    address: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    dob: Option<String>,
    /// Worked in the healthcare sector within the last 3 years: yes | no
    #[arg(long)]
    healthcare: Option<HealthcareHistory>,
    /// more-than-3-months | less-than-3-months
    #[arg(long)]
    experience: Option<ExperienceDuration>,
    /// Repeatable: english, bengali, spanish, chinese, hindi, other
    #[arg(long = "language")]
    languages: Vec<Language>,
    /// Custom language; implies --language other
    #[arg(long)]
    other_language: Option<String>,
    /// Repeatable: elderly, adults, children, disabilities
    #[arg(long = "patient-type")]
    patient_types: Vec<PatientType>,
    /// Override the configured intake API base URL
    #[arg(long)]
    api_url: Option<String>,
    /// Validate and print the JSON payload without sending it
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn fill_form(controller: &mut FormController, args: Args) {
    controller.update(|values| {
        values.first_name = args.first_name.unwrap_or_default();
        values.last_name = args.last_name.unwrap_or_default();
        values.email = args.email.unwrap_or_default();
        values.phone = args.phone.unwrap_or_default();
        values.address = args.address.unwrap_or_default();
        values.dob = args.dob.unwrap_or_default();
        values.healthcare = args.healthcare;
        values.experience = args.experience;
        for language in args.languages {
            values.languages.set(language, true);
        }
        if let Some(other) = args.other_language {
            values.languages.set(Language::Other, true);
            values.other_language = other;
        }
        for patient_type in args.patient_types {
            values.patient_types.set(patient_type, true);
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let dry_run = args.dry_run;

    let settings = if dry_run {
        None
    } else {
        Some(load_settings(args.api_url.as_deref()).context("failed to load intake settings")?)
    };
    init_tracing(
        settings
            .as_ref()
            .map_or(DEFAULT_LOG_FILTER, |s| s.log_filter.as_str()),
    );

    let mut controller = FormController::new();
    fill_form(&mut controller, args);

    let Some(settings) = settings else {
        return match controller.begin_submit() {
            Ok(payload) => {
                println!("{}", serde_json::to_string_pretty(&payload)?);
                Ok(())
            }
            Err(blocked) => report_blocked(&blocked),
        };
    };

    let submitter = HttpFormSubmitter::new(&settings.api_base_url);
    tracing::info!(endpoint = submitter.endpoint(), "sending intake form");

    match controller.submit_with(&submitter).await {
        Ok(notification) if notification.is_success() => {
            println!("{}", notification.message);
            Ok(())
        }
        Ok(notification) => bail!("{}", notification.message),
        Err(blocked) => report_blocked(&blocked),
    }
}

fn report_blocked(blocked: &SubmitBlocked) -> Result<()> {
    if let SubmitBlocked::Invalid(errors) = blocked {
        for (field, message) in errors.iter() {
            eprintln!("{field}: {message}");
        }
    }
    bail!("form not submitted: {blocked}")
}
