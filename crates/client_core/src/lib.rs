//! Client-side core of the training school intake form: typed form state,
//! validation, phone masking, payload assembly, and submission.

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod notification;
pub mod phone;
pub mod transport;
pub mod validation;

pub use config::{load_settings, IntakeSettings};
pub use controller::{AttemptResult, FormController, FormPhase, SubmitOutcome};
pub use error::{ConfigError, SubmitBlocked, TransportError};
pub use form::{FormValues, LanguageFlags, PatientTypeFlags};
pub use notification::{Notification, NotificationKind};
pub use transport::{FormSubmitter, HttpFormSubmitter};
pub use validation::FieldErrors;
