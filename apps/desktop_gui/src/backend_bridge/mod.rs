//! Worker-side half of the GUI: the command type and the thread that serves it.

pub mod commands;
pub mod runtime;
