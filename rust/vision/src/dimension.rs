// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimension value extraction from localized text

use crate::text::{TextLocalizer, TextToken};
use crate::types::VisionConfig;
use drawscan_core::{fold_digits, DimensionLine, Error, Point2D, Result};
use image::RgbImage;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// One or two digits, an optional `,` or `.` thousands separator, then three digits
static DIMENSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}[,.]?\d{3})").expect("valid dimension regex"));

/// Extract dimension lines from a drawing
///
/// Runs its own localization call. When the capability is unavailable or
/// fails, the drawing simply has no dimensions.
pub fn extract_dimensions(
    image: &RgbImage,
    localizer: &dyn TextLocalizer,
    config: &VisionConfig,
) -> Vec<DimensionLine> {
    let tokens = match localizer.probe().and_then(|_| localizer.localize(image)) {
        Ok(tokens) => tokens,
        Err(e) => {
            debug!(localizer = localizer.name(), error = %e, "no dimensions without text localization");
            return Vec::new();
        }
    };

    let dimensions = dimensions_from_tokens(&tokens, config);
    debug!(count = dimensions.len(), "extracted dimensions");
    dimensions
}

/// Dimension lines from OCR tokens
///
/// The segment spans the label box widened by `dimension_padding` on each
/// side, at the box top. It marks where the value was written, not the
/// measured extent.
pub fn dimensions_from_tokens(tokens: &[TextToken], config: &VisionConfig) -> Vec<DimensionLine> {
    let mut dimensions = Vec::new();

    for token in tokens {
        if token.text.trim().is_empty() {
            continue;
        }

        let value = match parse_dimension_value(&token.text) {
            Ok(Some(value)) => value,
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "skipping dimension token");
                continue;
            }
        };

        let top = token.top as f64;
        let start = Point2D::new(token.left as f64 - config.dimension_padding, top);
        let end = Point2D::new(
            (token.left + token.width) as f64 + config.dimension_padding,
            top,
        );

        match DimensionLine::new(dimensions.len(), start, end, value) {
            Some(line) => dimensions.push(line),
            None => debug!(value, text = %token.text, "dimension value out of range"),
        }
    }

    dimensions
}

/// Parse the first dimension-like number in `text`
///
/// Full-width digits are folded to ASCII first. `Ok(None)` when nothing
/// matches; a matched digit run that still is not an ASCII integer (e.g.
/// Arabic-Indic digits) is a [`Error::MalformedToken`].
pub fn parse_dimension_value(text: &str) -> Result<Option<u32>> {
    let folded = fold_digits(text);
    let Some(found) = DIMENSION_PATTERN.find(&folded) else {
        return Ok(None);
    };

    let digits: String = found
        .as_str()
        .chars()
        .filter(|c| *c != ',' && *c != '.')
        .collect();

    digits
        .parse::<u32>()
        .map(Some)
        .map_err(|e| Error::malformed(text, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{DisabledTextLocalizer, StaticTextLocalizer};

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_dimension_value("3640").unwrap(), Some(3640));
        assert_eq!(parse_dimension_value("3,640").unwrap(), Some(3640));
        assert_eq!(parse_dimension_value("12.345").unwrap(), Some(12345));
        assert_eq!(parse_dimension_value("W=1820mm").unwrap(), Some(1820));
        assert_eq!(parse_dimension_value("LDK").unwrap(), None);
    }

    #[test]
    fn test_three_digit_values_do_not_match() {
        assert_eq!(parse_dimension_value("910").unwrap(), None);
        assert_eq!(parse_dimension_value("50").unwrap(), None);
    }

    #[test]
    fn test_full_width_digits_accepted() {
        assert_eq!(parse_dimension_value("３６４０").unwrap(), Some(3640));
        assert_eq!(parse_dimension_value("３,６４０").unwrap(), Some(3640));
        assert_eq!(parse_dimension_value("９，１００ｍｍ").unwrap(), Some(9100));
    }

    #[test]
    fn test_other_script_digits_are_malformed() {
        let err = parse_dimension_value("٣٦٤٠").unwrap_err();
        assert!(matches!(err, Error::MalformedToken { .. }));
    }

    #[test]
    fn test_segment_synthesis() {
        let tokens = vec![TextToken::new("3,640", 200, 80, 60, 14)];
        let dims = dimensions_from_tokens(&tokens, &VisionConfig::default());

        assert_eq!(dims.len(), 1);
        let dim = &dims[0];
        assert_eq!(dim.value, 3640);
        assert_eq!(dim.label, "3,640mm");
        assert_eq!(dim.start, Point2D::new(150.0, 80.0));
        assert_eq!(dim.end, Point2D::new(310.0, 80.0));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let tokens = vec![
            TextToken::new("45000", 0, 0, 10, 10),
            TextToken::new("0050", 0, 0, 10, 10),
            TextToken::new("30000", 0, 0, 10, 10),
        ];
        let dims = dimensions_from_tokens(&tokens, &VisionConfig::default());

        assert_eq!(dims.len(), 1);
        assert_eq!(dims[0].value, 30000);
    }

    #[test]
    fn test_malformed_tokens_skipped() {
        let tokens = vec![
            TextToken::new("٣٦٤٠", 0, 0, 10, 10),
            TextToken::new("2730", 0, 0, 10, 10),
        ];
        let dims = dimensions_from_tokens(&tokens, &VisionConfig::default());

        assert_eq!(dims.len(), 1);
        assert_eq!(dims[0].value, 2730);
    }

    #[test]
    fn test_full_width_tokens_become_dimensions() {
        let tokens = vec![
            TextToken::new("３６４０", 0, 0, 10, 10),
            TextToken::new("３,６４０", 40, 0, 10, 10),
        ];
        let dims = dimensions_from_tokens(&tokens, &VisionConfig::default());

        assert_eq!(dims.len(), 2);
        assert!(dims.iter().all(|d| d.value == 3640 && d.label == "3,640mm"));
    }

    #[test]
    fn test_unavailable_localizer_gives_no_dimensions() {
        let image = RgbImage::new(10, 10);
        let dims = extract_dimensions(&image, &DisabledTextLocalizer, &VisionConfig::default());
        assert!(dims.is_empty());
    }

    #[test]
    fn test_extract_with_static_tokens() {
        let image = RgbImage::new(10, 10);
        let localizer = StaticTextLocalizer::new(vec![
            TextToken::new("1,820", 0, 0, 10, 10),
            TextToken::new("玄関", 0, 0, 10, 10),
        ]);
        let dims = extract_dimensions(&image, &localizer, &VisionConfig::default());
        assert_eq!(dims.len(), 1);
        assert_eq!(dims[0].value, 1820);
    }
}
