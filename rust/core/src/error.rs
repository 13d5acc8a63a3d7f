// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use thiserror::Error;

/// Result type for drawing analysis
pub type Result<T> = std::result::Result<T, Error>;

/// Optional runtime capabilities an analysis may depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// OCR yielding per-token text and bounding boxes
    TextLocalization,
    /// Structured CAD (DXF) document parsing
    CadParsing,
    /// Rendering PDF pages to raster images
    PdfRendering,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::TextLocalization => "text-localization",
            Capability::CadParsing => "cad-parsing",
            Capability::PdfRendering => "pdf-rendering",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during drawing analysis
#[derive(Error, Debug)]
pub enum Error {
    /// The raster input could not be decoded. Fatal for the raster path.
    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    /// An optional capability is missing or failed at runtime.
    /// Analysis stages recover from this locally and never surface it.
    #[error("{capability} unavailable: {reason}")]
    CapabilityUnavailable {
        capability: Capability,
        reason: String,
    },

    /// A single OCR token or CAD entity could not be interpreted.
    #[error("Malformed token {token:?}: {reason}")]
    MalformedToken { token: String, reason: String },

    /// An input conversion (e.g. PDF rendering) is not available in this build or environment.
    #[error("Conversion unavailable: {0}")]
    ConversionUnavailable(String),

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("Failed to parse {format} document: {reason}")]
    Parse {
        format: &'static str,
        reason: String,
    },

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unavailable(capability: Capability, reason: impl Into<String>) -> Self {
        Error::CapabilityUnavailable {
            capability,
            reason: reason.into(),
        }
    }

    pub fn malformed(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedToken {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// True for errors that analysis stages recover from locally
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::CapabilityUnavailable { .. } | Error::MalformedToken { .. }
        )
    }
}
