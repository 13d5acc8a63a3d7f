// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Architectural drawing recognition from raster images
//!
//! This crate provides the raster analysis pipeline:
//! 1. Binarizing and cleaning the drawing (threshold + morphology)
//! 2. Extracting building outlines as simplified external contours
//! 3. Detecting entrances from OCR keywords, or door swing arcs without OCR
//! 4. Reading dimension values from OCR tokens
//! 5. Estimating the pixel-per-millimeter scale
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use drawscan_core::AnalysisRequest;
//! use drawscan_vision::{RasterAnalyzer, VisionConfig, text::DisabledTextLocalizer};
//!
//! let analyzer = RasterAnalyzer::new(VisionConfig::default(), Arc::new(DisabledTextLocalizer));
//! let result = analyzer.analyze_image(&rgb_image, &AnalysisRequest::for_floor(2));
//! ```

pub mod circle_ops;
pub mod dimension;
pub mod entrance;
pub mod image_ops;
pub mod outline;
pub mod scale;
pub mod text;
pub mod types;

pub use dimension::extract_dimensions;
pub use entrance::{detect_entrances, EntranceStrategy};
pub use image_ops::{decode_image, preprocess, rgb_to_grayscale};
pub use outline::extract_outlines;
pub use scale::estimate_scale;
pub use text::{DisabledTextLocalizer, StaticTextLocalizer, TextLocalizer, TextToken};
pub use types::{DetectedCircle, VisionConfig};

#[cfg(feature = "tesseract")]
pub use text::TesseractLocalizer;

use drawscan_core::{AnalysisRequest, AnalysisResult, DrawingProducer, Result};
use image::RgbImage;
use std::sync::Arc;
use tracing::debug;

/// Raster drawing analyzer
///
/// Holds immutable configuration and the injected text localizer, so one
/// analyzer can serve concurrent calls.
#[derive(Clone)]
pub struct RasterAnalyzer {
    config: VisionConfig,
    localizer: Arc<dyn TextLocalizer>,
}

impl RasterAnalyzer {
    pub fn new(config: VisionConfig, localizer: Arc<dyn TextLocalizer>) -> Self {
        Self { config, localizer }
    }

    /// Analyzer using the best localizer this build offers
    pub fn with_default_localizer(config: VisionConfig) -> Self {
        let localizer = default_localizer(&config);
        Self::new(config, localizer)
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    pub fn localizer(&self) -> &dyn TextLocalizer {
        self.localizer.as_ref()
    }

    /// Run the full pipeline on a decoded image
    ///
    /// Outlines come from the binarized mask; entrances and dimensions are
    /// read from the color image; the scale uses the dimensions found.
    pub fn analyze_image(&self, image: &RgbImage, request: &AnalysisRequest) -> AnalysisResult {
        let floor = request.floor();
        let gray = rgb_to_grayscale(image);

        let binary = preprocess(&gray, &self.config);
        let outlines = extract_outlines(&binary, floor, &self.config);

        let entrances = detect_entrances(image, &gray, self.localizer.as_ref(), &self.config);
        let dimensions = extract_dimensions(image, self.localizer.as_ref(), &self.config);

        let scale = estimate_scale(image.width(), image.height(), &dimensions);

        let result = AnalysisResult::new(outlines, entrances, dimensions, scale);
        debug!(
            width = image.width(),
            height = image.height(),
            floor,
            outlines = result.outlines.len(),
            entrances = result.entrances.len(),
            dimensions = result.dimensions.len(),
            scale = result.scale,
            "raster analysis complete"
        );
        result
    }
}

impl std::fmt::Debug for RasterAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterAnalyzer")
            .field("config", &self.config)
            .field("localizer", &self.localizer.name())
            .finish()
    }
}

impl DrawingProducer for RasterAnalyzer {
    fn name(&self) -> &'static str {
        "raster"
    }

    fn analyze(&self, bytes: &[u8], request: &AnalysisRequest) -> Result<AnalysisResult> {
        let image = decode_image(bytes)?;
        Ok(self.analyze_image(&image, request))
    }
}

/// Tesseract when compiled in, otherwise a disabled localizer
pub fn default_localizer(config: &VisionConfig) -> Arc<dyn TextLocalizer> {
    #[cfg(feature = "tesseract")]
    {
        Arc::new(TesseractLocalizer::new(config.tesseract_language.clone()))
    }
    #[cfg(not(feature = "tesseract"))]
    {
        let _ = config;
        Arc::new(DisabledTextLocalizer)
    }
}
