//! Centralized configuration (environment variables + defaults).

use std::path::PathBuf;

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Address the API server binds to. Defaults to port 5000 on all interfaces;
/// override with `PORT` or a full `BIND_ADDR`.
pub fn bind_addr() -> String {
    if let Ok(addr) = std::env::var("BIND_ADDR") {
        return addr;
    }
    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    format!("0.0.0.0:{}", port)
}

/// Directory where uploaded poster images are stored and served from.
pub fn upload_dir() -> PathBuf {
    std::env::var("UPLOAD_DIR")
        .unwrap_or_else(|_| "uploads".to_string())
        .into()
}

/// Upload size cap for poster images (bytes).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
