// src/lib.rs
//! Form-driven resume builder: record editing, live preview in four layouts,
//! AI-assisted summary and skills, and PDF export.

pub mod cli;
pub mod core;
pub mod environment;
pub mod session;
pub mod types;
pub mod web;

pub use crate::core::{ConfigManager, Layout};
pub use crate::session::{EditAction, Session, SessionError, SessionStore};
pub use crate::types::ResumeData;
pub use crate::web::start_web_server;

/// Log through `tracing` at the given level: `app_log!(info, "...", args)`.
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

/// Enter-able span for a unit of work: `let _span = app_span!("export", name = %n).entered();`
#[macro_export]
macro_rules! app_span {
    ($name:expr) => {
        ::tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)+) => {
        ::tracing::info_span!($name, $($field)+)
    };
}
