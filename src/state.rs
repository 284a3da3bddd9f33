//! Application state managed by Tauri.
//!
//! [`AppState`] is registered with `tauri::Builder::manage` and accessed from
//! command handlers via `tauri::State<AppState>`.

use std::sync::RwLock;

use crate::models::Job;
use crate::pricing::RateSchedule;

/// Root application state managed by Tauri.
///
/// Both fields are wrapped in [`RwLock`] so that multiple concurrent read
/// commands (e.g. "get job snapshot" alongside "list vehicles") do not block
/// each other. Every edit completes under a single write lock, so the stored
/// record never carries stale derived totals between commands.
pub struct AppState {
    /// The active job, guarded for concurrent read access.
    pub job: RwLock<Job>,
    /// The rate schedule in force, guarded for concurrent read access.
    pub rates: RwLock<RateSchedule>,
}

impl AppState {
    /// Fresh state pricing against the given schedule, typically the one
    /// loaded from the rates file at startup.
    pub fn with_rates(rates: RateSchedule) -> Self {
        Self {
            job: RwLock::new(Job::new()),
            rates: RwLock::new(rates),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_rates(RateSchedule::default())
    }
}
