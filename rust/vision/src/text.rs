// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Text localization (OCR) capability
//!
//! Analysis stages receive a [`TextLocalizer`] from the caller and probe it
//! on every call. Three providers exist:
//!
//! - [`TesseractLocalizer`] runs the system `tesseract` binary (feature `tesseract`)
//! - [`StaticTextLocalizer`] replays precomputed tokens, e.g. from a JSON file
//! - [`DisabledTextLocalizer`] always reports the capability as unavailable

use drawscan_core::{Capability, Error, Result};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recognized word with its bounding box in pixels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextToken {
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Recognition confidence as reported by the engine (0-100, -1 when unknown)
    #[serde(default = "unknown_confidence")]
    pub confidence: f32,
}

fn unknown_confidence() -> f32 {
    -1.0
}

impl TextToken {
    pub fn new(text: impl Into<String>, left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            text: text.into(),
            left,
            top,
            width,
            height,
            confidence: unknown_confidence(),
        }
    }

    /// Box center, halving with integer division
    pub fn center(&self) -> (i32, i32) {
        (self.left + self.width / 2, self.top + self.height / 2)
    }
}

/// Provider of per-token text and bounding boxes for an image
pub trait TextLocalizer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Check that the capability can run right now.
    /// Returns [`Error::CapabilityUnavailable`] when it cannot.
    fn probe(&self) -> Result<()>;

    /// Localize text tokens in `image`
    fn localize(&self, image: &RgbImage) -> Result<Vec<TextToken>>;
}

/// Localizer that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTextLocalizer;

impl TextLocalizer for DisabledTextLocalizer {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn probe(&self) -> Result<()> {
        Err(Error::unavailable(
            Capability::TextLocalization,
            "text localization disabled",
        ))
    }

    fn localize(&self, _image: &RgbImage) -> Result<Vec<TextToken>> {
        self.probe().map(|_| Vec::new())
    }
}

/// Localizer returning a fixed token list regardless of the image
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticTextLocalizer {
    tokens: Vec<TextToken>,
}

impl StaticTextLocalizer {
    pub fn new(tokens: Vec<TextToken>) -> Self {
        Self { tokens }
    }

    /// Load tokens from a JSON array of `{text, left, top, width, height}` objects
    pub fn from_json(json: &str) -> Result<Self> {
        let tokens: Vec<TextToken> = serde_json::from_str(json).map_err(|e| Error::Parse {
            format: "ocr-tokens",
            reason: e.to_string(),
        })?;
        Ok(Self::new(tokens))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn tokens(&self) -> &[TextToken] {
        &self.tokens
    }
}

impl TextLocalizer for StaticTextLocalizer {
    fn name(&self) -> &'static str {
        "static"
    }

    fn probe(&self) -> Result<()> {
        Ok(())
    }

    fn localize(&self, _image: &RgbImage) -> Result<Vec<TextToken>> {
        Ok(self.tokens.clone())
    }
}

#[cfg(feature = "tesseract")]
pub use tesseract::TesseractLocalizer;

#[cfg(feature = "tesseract")]
mod tesseract {
    use super::{TextLocalizer, TextToken};
    use drawscan_core::{Capability, Error, Result};
    use image::{DynamicImage, RgbImage};
    use rusty_tesseract::{Args, Image};
    use std::collections::HashMap;
    use tracing::debug;

    /// OCR through the system `tesseract` binary
    #[derive(Debug, Clone)]
    pub struct TesseractLocalizer {
        language: String,
        dpi: Option<i32>,
    }

    impl TesseractLocalizer {
        pub fn new(language: impl Into<String>) -> Self {
            Self {
                language: language.into(),
                dpi: Some(150),
            }
        }

        pub fn with_dpi(mut self, dpi: i32) -> Self {
            self.dpi = Some(dpi);
            self
        }

        pub fn language(&self) -> &str {
            &self.language
        }

        fn args(&self) -> Args {
            Args {
                lang: self.language.clone(),
                config_variables: HashMap::new(),
                dpi: self.dpi,
                psm: Some(3), // Fully automatic page segmentation
                oem: Some(3), // Default OCR Engine Mode
            }
        }
    }

    impl Default for TesseractLocalizer {
        fn default() -> Self {
            Self::new("jpn+eng")
        }
    }

    impl TextLocalizer for TesseractLocalizer {
        fn name(&self) -> &'static str {
            "tesseract"
        }

        fn probe(&self) -> Result<()> {
            let version = rusty_tesseract::get_tesseract_version().map_err(|e| {
                Error::unavailable(Capability::TextLocalization, e.to_string())
            })?;
            debug!(version = %version.trim(), "tesseract available");
            Ok(())
        }

        fn localize(&self, image: &RgbImage) -> Result<Vec<TextToken>> {
            let dynamic = DynamicImage::ImageRgb8(image.clone());
            let tess_image = Image::from_dynamic_image(&dynamic).map_err(|e| {
                Error::unavailable(Capability::TextLocalization, e.to_string())
            })?;

            let output = rusty_tesseract::image_to_data(&tess_image, &self.args()).map_err(|e| {
                Error::unavailable(Capability::TextLocalization, e.to_string())
            })?;

            let tokens: Vec<TextToken> = output
                .data
                .into_iter()
                .filter(|d| !d.text.trim().is_empty())
                .map(|d| TextToken {
                    text: d.text,
                    left: d.left,
                    top: d.top,
                    width: d.width,
                    height: d.height,
                    confidence: d.conf,
                })
                .collect();

            debug!(count = tokens.len(), lang = %self.language, "tesseract tokens");
            Ok(tokens)
        }
    }
}
