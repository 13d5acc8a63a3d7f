// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runtime configuration loaded from environment variables.

use drawscan_processing::DEFAULT_PDF_DPI;

/// Process-wide settings independent of a single drawing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads for batch analysis.
    pub worker_threads: usize,
    /// Tesseract language override (e.g. `jpn+eng`).
    pub ocr_language: Option<String>,
    /// Resolution for rendering PDF pages.
    pub pdf_dpi: f32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            worker_threads: var("DRAWSCAN_WORKER_THREADS")
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or_else(num_cpus::get),
            ocr_language: var("DRAWSCAN_OCR_LANG")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            pdf_dpi: var("DRAWSCAN_PDF_DPI")
                .and_then(|v| v.parse().ok())
                .filter(|dpi: &f32| *dpi > 0.0)
                .unwrap_or(DEFAULT_PDF_DPI),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
