// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared drawing processing used by the command-line front end.
//!
//! Detects the input format, dispatches to the raster, PDF or DXF producer
//! and runs batches of independent files on a rayon pool.

pub mod format;
pub mod pdf;
pub mod pipeline;

pub use format::InputFormat;
pub use pdf::{PdfProducer, DEFAULT_PDF_DPI};
pub use pipeline::{BatchJob, BatchOutcome, CapabilityStatus, Pipeline};

use drawscan_core::{AnalysisResult, Error, Result};

/// Serialize a result as the JSON document consumers expect
pub fn to_json(result: &AnalysisResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    json.map_err(|e| Error::Conversion(format!("failed to serialize result: {e}")))
}
