// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PDF drawings: first page rendered to a raster, then analyzed as an image

use drawscan_core::{AnalysisRequest, AnalysisResult, DrawingProducer, Result};
use drawscan_vision::RasterAnalyzer;
use image::RgbImage;
use tracing::debug;

/// Rendering resolution for PDF pages
pub const DEFAULT_PDF_DPI: f32 = 150.0;

/// PDF points per inch
const POINTS_PER_INCH: f32 = 72.0;

/// Converts the first page of a PDF and hands it to the raster pipeline
#[derive(Debug, Clone)]
pub struct PdfProducer {
    raster: RasterAnalyzer,
    dpi: f32,
}

impl PdfProducer {
    pub fn new(raster: RasterAnalyzer) -> Self {
        Self {
            raster,
            dpi: DEFAULT_PDF_DPI,
        }
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Whether a pdfium library can be bound right now
    pub fn probe(&self) -> Result<()> {
        render::probe()
    }

    /// Render the first page at the configured resolution
    pub fn render_first_page(&self, bytes: &[u8]) -> Result<RgbImage> {
        render::first_page(bytes, self.dpi / POINTS_PER_INCH)
    }
}

impl DrawingProducer for PdfProducer {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn analyze(&self, bytes: &[u8], request: &AnalysisRequest) -> Result<AnalysisResult> {
        let page = self.render_first_page(bytes)?;
        debug!(
            width = page.width(),
            height = page.height(),
            dpi = self.dpi,
            "rendered first PDF page"
        );
        Ok(self.raster.analyze_image(&page, request))
    }
}

#[cfg(feature = "pdf")]
mod render {
    use drawscan_core::{Error, Result};
    use image::RgbImage;
    use pdfium_render::prelude::*;

    fn bind() -> Result<Pdfium> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Error::ConversionUnavailable(format!("pdfium library not found: {e}")))?;
        Ok(Pdfium::new(bindings))
    }

    pub(super) fn probe() -> Result<()> {
        bind().map(|_| ())
    }

    pub(super) fn first_page(bytes: &[u8], scale: f32) -> Result<RgbImage> {
        let pdfium = bind()?;
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| Error::Parse {
                format: "pdf",
                reason: e.to_string(),
            })?;

        let pages = document.pages();
        if pages.is_empty() {
            return Err(Error::Conversion("PDF has no pages".to_string()));
        }
        let page = pages
            .get(0)
            .map_err(|e| Error::Conversion(format!("cannot open first page: {e}")))?;

        let width = (page.width().value * scale) as i32;
        let height = (page.height().value * scale) as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height)
                    .render_form_data(true)
                    .render_annotations(true),
            )
            .map_err(|e| Error::Conversion(format!("failed to render PDF page: {e}")))?;

        Ok(bitmap.as_image().to_rgb8())
    }
}

#[cfg(not(feature = "pdf"))]
mod render {
    use drawscan_core::{Error, Result};
    use image::RgbImage;

    const REASON: &str = "built without the `pdf` feature";

    pub(super) fn probe() -> Result<()> {
        Err(Error::ConversionUnavailable(REASON.to_string()))
    }

    pub(super) fn first_page(_bytes: &[u8], _scale: f32) -> Result<RgbImage> {
        Err(Error::ConversionUnavailable(REASON.to_string()))
    }
}
