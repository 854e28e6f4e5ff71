//! UI layer for the intake window.

pub mod app;

pub use app::IntakeApp;
