fn main() {
    // Declare the cfg tauri_build would register so rustc does not warn on
    // #[cfg_attr(mobile, ...)] in headless builds.
    println!("cargo:rustc-check-cfg=cfg(mobile)");

    // Tauri-generated build configuration. Only wanted when the desktop shell
    // is compiled in; build scripts cannot use #[cfg(feature)], so the
    // feature is detected through the environment variable cargo sets.
    if std::env::var_os("CARGO_FEATURE_TAURI_APP").is_some() {
        tauri_build::build();
    }
}
