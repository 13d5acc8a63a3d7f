// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Producer dispatch and batch analysis

use crate::format::InputFormat;
use crate::pdf::{PdfProducer, DEFAULT_PDF_DPI};
use drawscan_cad::DxfAdapter;
use drawscan_core::{AnalysisRequest, AnalysisResult, Capability, DrawingProducer, Error, Result};
use drawscan_vision::RasterAnalyzer;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Routes each input format to the producer that understands it
#[derive(Debug, Clone)]
pub struct Pipeline {
    raster: RasterAnalyzer,
    pdf: PdfProducer,
    dxf: DxfAdapter,
}

impl Pipeline {
    pub fn new(raster: RasterAnalyzer) -> Self {
        Self::with_pdf_dpi(raster, DEFAULT_PDF_DPI)
    }

    pub fn with_pdf_dpi(raster: RasterAnalyzer, dpi: f32) -> Self {
        Self {
            pdf: PdfProducer::new(raster.clone()).with_dpi(dpi),
            raster,
            dxf: DxfAdapter::new(),
        }
    }

    pub fn producer(&self, format: InputFormat) -> &dyn DrawingProducer {
        match format {
            InputFormat::Raster(_) => &self.raster,
            InputFormat::Pdf => &self.pdf,
            InputFormat::Dxf => &self.dxf,
        }
    }

    /// Analyze in-memory bytes of a known format
    pub fn analyze_bytes(
        &self,
        format: InputFormat,
        bytes: &[u8],
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult> {
        let producer = self.producer(format);
        let start = Instant::now();
        let result = producer.analyze(bytes, request)?;
        debug!(
            producer = producer.name(),
            %format,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "analysis finished"
        );
        Ok(result)
    }

    /// Read a file, detect its format and analyze it
    pub fn analyze_file(&self, path: &Path, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let bytes = std::fs::read(path)?;
        let format = InputFormat::detect(Some(path), &bytes)?;
        self.analyze_bytes(format, &bytes, request)
    }

    /// Analyze independent files in parallel on the current rayon pool
    ///
    /// Outcomes are returned in input order; a failing job never affects
    /// the others.
    pub fn analyze_batch(&self, jobs: &[BatchJob]) -> Vec<BatchOutcome> {
        let start = Instant::now();
        let outcomes: Vec<BatchOutcome> = jobs
            .par_iter()
            .map(|job| {
                let result = self.analyze_file(&job.path, &job.request);
                if let Err(ref e) = result {
                    warn!(path = %job.path.display(), error = %e, "batch job failed");
                }
                BatchOutcome {
                    path: job.path.clone(),
                    result,
                }
            })
            .collect();

        info!(
            jobs = jobs.len(),
            failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch complete"
        );
        outcomes
    }

    /// Availability of each optional capability, evaluated now
    pub fn probe(&self) -> Vec<CapabilityStatus> {
        let text = self.raster.localizer().probe();
        vec![
            CapabilityStatus::new(Capability::TextLocalization, text),
            CapabilityStatus::new(Capability::CadParsing, self.dxf.probe()),
            CapabilityStatus::new(Capability::PdfRendering, self.pdf.probe()),
        ]
    }
}

/// One file to analyze in a batch
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub path: PathBuf,
    pub request: AnalysisRequest,
}

impl BatchJob {
    pub fn new(path: impl Into<PathBuf>, request: AnalysisRequest) -> Self {
        Self {
            path: path.into(),
            request,
        }
    }
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub path: PathBuf,
    pub result: Result<AnalysisResult>,
}

/// Probe report for one capability
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatus {
    pub capability: &'static str,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CapabilityStatus {
    fn new(capability: Capability, probe: Result<()>) -> Self {
        let reason = probe.err().map(|e| match e {
            Error::CapabilityUnavailable { reason, .. } => reason,
            other => other.to_string(),
        });
        Self {
            capability: capability.as_str(),
            available: reason.is_none(),
            reason,
        }
    }
}
