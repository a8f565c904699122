//! Built single-page app.
//!
//! Any path that isn't an API route or an existing asset gets `index.html`,
//! so client-side routes survive a reload.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

pub const INDEX_FILE: &str = "index.html";

/// Static file service for `dir` with the `index.html` fallback.
#[must_use]
pub fn service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join(INDEX_FILE)))
}
