pub mod commands;
pub mod error;
pub mod logging;
pub mod models;
pub mod pricing;
pub mod state;

#[cfg(feature = "tauri-app")]
use state::AppState;

/// GlassQuote Tauri application library entry point.
///
/// All Tauri builder setup lives here so it can be tested and referenced
/// by the thin `main.rs` binary wrapper.
#[cfg(feature = "tauri-app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Tracing must come up before anything else so startup problems land in
    // the log. The guard flushes buffered lines when `run` returns.
    let _tracing_guard = logging::init();

    tracing::info!("GlassQuote starting");

    // ── Rate schedule ────────────────────────────────────────────────────────
    //
    // Read once at startup from the OS data dir:
    //   Linux    ~/.local/share/glassquote/rates.toml
    //   macOS    ~/Library/Application Support/glassquote/rates.toml
    //   Windows  %LOCALAPPDATA%\glassquote\rates.toml
    //
    // A missing file means the shop runs on the built-in rate card. A file
    // that is present but broken is an operator mistake: log it loudly and
    // fall back rather than refuse to start.
    let rates_path = dirs::data_local_dir()
        .unwrap_or_default()
        .join("glassquote")
        .join("rates.toml");
    let rates = pricing::schedule::load_or_default(&rates_path).unwrap_or_else(|e| {
        tracing::warn!(
            path = %rates_path.display(),
            error = %e,
            "rates file rejected, using built-in rate card"
        );
        pricing::RateSchedule::default()
    });

    // ── Application state ────────────────────────────────────────────────────
    let state = AppState::with_rates(rates);

    // ── Tauri builder ────────────────────────────────────────────────────────
    tauri::Builder::default()
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            commands::job::new_job,
            commands::job::load_job,
            commands::job::get_job,
            commands::job::get_job_snapshot,
            commands::job::set_job_number,
            commands::job::set_customer_type,
            commands::job::set_amount_paid,
            commands::job::set_deductible,
            commands::job::set_rebate,
            commands::vehicle::add_vehicle,
            commands::vehicle::remove_vehicle,
            commands::vehicle::set_vehicle_year,
            commands::vehicle::set_body_style,
            commands::vehicle::list_vehicles,
            commands::part::add_part,
            commands::part::remove_part,
            commands::part::set_part_service_type,
            commands::part::set_part_glass_type,
            commands::part::set_part_price,
            commands::part::update_part_cost,
            commands::part::update_part_details,
            commands::part::list_parts,
            commands::rates::load_rate_schedule,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
