//! Environment-backed defaults.
//!
//! A `.env` file is honored when present, then `PRINTDESK_*` variables
//! fill in whatever the command line left unset.

use std::path::PathBuf;

use tracing::info;

/// Load environment variables from a `.env` file if one exists nearby.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];

    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            info!("Loaded environment variables from: {}", path);
            return;
        }
    }

    info!("No .env file found, using system environment variables");
}

/// Printer queue fallback, used when `--printer` is not given.
pub fn printer_from_env() -> Option<String> {
    non_empty_var("PRINTDESK_PRINTER")
}

/// Label font fallback, used when `--font` is not given.
pub fn font_from_env() -> Option<PathBuf> {
    non_empty_var("PRINTDESK_FONT").map(PathBuf::from)
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
