//! Application-level error type returned by all Tauri command handlers.
//!
//! `AppError` is serialized to `{ kind, message }` JSON payloads so the
//! TypeScript frontend can pattern-match on a stable `kind` string.

use crate::pricing::RateScheduleError;

/// Top-level error returned by Tauri command handlers.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
///
/// The TypeScript counterpart is:
/// ```ts
/// type AppError = { kind: string; message: string };
/// ```
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum AppError {
    /// A generic I/O error (including poisoned locks); converted to a string
    /// at the system boundary so it remains serializable.
    #[error("{0}")]
    Io(String),

    /// A requested resource (vehicle, part) was not found on the active job.
    #[error("{0}")]
    NotFound(String),

    /// The rate schedule could not be read, parsed, or validated; the inner
    /// message comes from [`RateScheduleError`].
    #[error("{0}")]
    RateConfig(String),
}

impl From<RateScheduleError> for AppError {
    /// Convert a [`RateScheduleError`] into an [`AppError::RateConfig`].
    ///
    /// The schedule error is stringified here so that the enum variant stores
    /// a plain `String`, keeping the serialized shape as `{ kind, message }`.
    fn from(e: RateScheduleError) -> Self {
        Self::RateConfig(e.to_string())
    }
}
