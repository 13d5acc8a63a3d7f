// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entrance detection
//!
//! Entrances are found from OCR keywords when text localization works, and
//! from door swing arcs otherwise.

use crate::circle_ops::{detect_circles, CircleParams};
use crate::image_ops::canny_edges;
use crate::text::{TextLocalizer, TextToken};
use crate::types::VisionConfig;
use drawscan_core::{Entrance, EntranceKind, Point2D, DEFAULT_ENTRANCE_WIDTH_MM};
use image::{GrayImage, RgbImage};
use tracing::{debug, warn};

/// Label of the first door swing
const MAIN_ARC_LABEL: &str = "玄関";
/// Label prefix of subsequent door swings
const OTHER_ARC_LABEL: &str = "出入口";
/// Millimeters per pixel assumed when converting a swing radius to a door width
const ARC_WIDTH_MM_PER_PX: u32 = 10;

/// How entrances are located for one analysis call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntranceStrategy {
    /// Match entrance keywords in localized text
    TextKeyword,
    /// Detect door swing arcs in the edge image
    DoorArc,
}

impl EntranceStrategy {
    /// Pick the strategy from a fresh capability probe
    pub fn select(localizer: &dyn TextLocalizer) -> Self {
        match localizer.probe() {
            Ok(()) => EntranceStrategy::TextKeyword,
            Err(e) => {
                debug!(localizer = localizer.name(), error = %e, "text localization unavailable");
                EntranceStrategy::DoorArc
            }
        }
    }
}

/// Detect entrances on a drawing
///
/// Uses keyword matching when the localizer probes available. A localizer
/// failure during the call falls back to arc detection as well.
pub fn detect_entrances(
    image: &RgbImage,
    gray: &GrayImage,
    localizer: &dyn TextLocalizer,
    config: &VisionConfig,
) -> Vec<Entrance> {
    let entrances = match EntranceStrategy::select(localizer) {
        EntranceStrategy::TextKeyword => match localizer.localize(image) {
            Ok(tokens) => entrances_from_tokens(&tokens, config),
            Err(e) => {
                warn!(localizer = localizer.name(), error = %e, "text localization failed, using door arcs");
                entrances_from_arcs(gray, config)
            }
        },
        EntranceStrategy::DoorArc => entrances_from_arcs(gray, config),
    };

    debug!(count = entrances.len(), "detected entrances");
    entrances
}

/// Entrances from OCR tokens containing an entrance keyword
pub fn entrances_from_tokens(tokens: &[TextToken], config: &VisionConfig) -> Vec<Entrance> {
    let keywords: Vec<String> = config
        .entrance_keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect();
    let back_markers: Vec<String> = config
        .back_door_keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect();

    let mut entrances = Vec::new();
    for token in tokens {
        let label = token.text.trim();
        if label.is_empty() {
            continue;
        }

        let lowered = label.to_lowercase();
        if !keywords.iter().any(|k| lowered.contains(k.as_str())) {
            continue;
        }

        let kind = if back_markers.iter().any(|m| lowered.contains(m.as_str())) {
            EntranceKind::BackDoor
        } else {
            EntranceKind::MainEntrance
        };

        let (cx, cy) = token.center();
        entrances.push(Entrance::new(
            entrances.len(),
            Point2D::new(cx as f64, cy as f64),
            kind,
            DEFAULT_ENTRANCE_WIDTH_MM,
            label,
        ));
    }

    entrances
}

/// Entrances from door swing arcs
///
/// The strongest arc is the main entrance, the rest are numbered openings.
pub fn entrances_from_arcs(gray: &GrayImage, config: &VisionConfig) -> Vec<Entrance> {
    let edges = canny_edges(gray, config.canny_low, config.canny_high);
    let params = CircleParams {
        min_radius: config.min_door_radius,
        max_radius: config.max_door_radius,
        min_distance: config.min_door_distance,
        threshold: config.door_vote_threshold,
        max_circles: config.max_door_arcs,
    };

    detect_circles(gray, &edges, &params)
        .into_iter()
        .enumerate()
        .map(|(i, circle)| {
            let (kind, label) = if i == 0 {
                (EntranceKind::MainEntrance, MAIN_ARC_LABEL.to_string())
            } else {
                (EntranceKind::Other, format!("{OTHER_ARC_LABEL}{}", i + 1))
            };
            Entrance::new(
                i,
                Point2D::new(circle.center.x.round(), circle.center.y.round()),
                kind,
                arc_door_width(circle.radius),
                label,
            )
        })
        .collect()
}

/// Door width in millimeters from a swing radius in pixels
pub fn arc_door_width(radius: f64) -> u32 {
    radius.round() as u32 * 2 * ARC_WIDTH_MM_PER_PX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_ops::rgb_to_grayscale;
    use crate::text::{DisabledTextLocalizer, StaticTextLocalizer};
    use drawscan_core::{Capability, Error, Result};
    use image::Rgb;
    use imageproc::drawing::draw_hollow_circle_mut;

    struct FailingLocalizer;

    impl TextLocalizer for FailingLocalizer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn probe(&self) -> Result<()> {
            Ok(())
        }

        fn localize(&self, _image: &RgbImage) -> Result<Vec<TextToken>> {
            Err(Error::unavailable(Capability::TextLocalization, "engine crashed"))
        }
    }

    fn ring_image() -> RgbImage {
        let mut img = RgbImage::from_pixel(200, 200, Rgb([255, 255, 255]));
        for r in 39..=41 {
            draw_hollow_circle_mut(&mut img, (100, 100), r, Rgb([0, 0, 0]));
        }
        img
    }

    #[test]
    fn test_keyword_main_entrance() {
        let tokens = vec![TextToken::new(" 玄関 ", 100, 200, 40, 20)];
        let entrances = entrances_from_tokens(&tokens, &VisionConfig::default());

        assert_eq!(entrances.len(), 1);
        assert_eq!(entrances[0].kind, EntranceKind::MainEntrance);
        assert_eq!(entrances[0].position, Point2D::new(120.0, 210.0));
        assert_eq!(entrances[0].width, 900);
        assert_eq!(entrances[0].label, "玄関");
    }

    #[test]
    fn test_keyword_back_door() {
        let tokens = vec![
            TextToken::new("勝手口", 0, 0, 30, 10),
            TextToken::new("Back-Door", 50, 50, 30, 10),
        ];
        let entrances = entrances_from_tokens(&tokens, &VisionConfig::default());

        assert_eq!(entrances.len(), 2);
        assert!(entrances.iter().all(|e| e.kind == EntranceKind::BackDoor));
    }

    #[test]
    fn test_keyword_case_insensitive() {
        let tokens = vec![TextToken::new("Entrance", 10, 10, 20, 10)];
        let entrances = entrances_from_tokens(&tokens, &VisionConfig::default());
        assert_eq!(entrances.len(), 1);
        assert_eq!(entrances[0].kind, EntranceKind::MainEntrance);
    }

    #[test]
    fn test_non_keywords_and_blanks_skipped() {
        let tokens = vec![
            TextToken::new("   ", 0, 0, 10, 10),
            TextToken::new("LDK", 0, 0, 10, 10),
            TextToken::new("3,640", 0, 0, 10, 10),
        ];
        assert!(entrances_from_tokens(&tokens, &VisionConfig::default()).is_empty());
    }

    #[test]
    fn test_one_entrance_per_token() {
        // Matches both 入口 and 出入口, still a single entrance
        let tokens = vec![TextToken::new("出入口", 0, 0, 10, 10)];
        assert_eq!(entrances_from_tokens(&tokens, &VisionConfig::default()).len(), 1);
    }

    #[test]
    fn test_arcs_beyond_first_are_numbered_and_capped() {
        // Seven separated swings; only max_door_arcs (5) are reported
        let mut img = RgbImage::from_pixel(900, 200, Rgb([255, 255, 255]));
        for i in 0..7 {
            for r in 29..=31 {
                draw_hollow_circle_mut(&mut img, (60 + i * 120, 100), r, Rgb([0, 0, 0]));
            }
        }
        let gray = rgb_to_grayscale(&img);

        let entrances = entrances_from_arcs(&gray, &VisionConfig::default());

        assert_eq!(entrances.len(), 5);
        assert_eq!(entrances[0].kind, EntranceKind::MainEntrance);
        assert_eq!(entrances[0].label, "玄関");
        for (i, door) in entrances.iter().enumerate().skip(1) {
            assert_eq!(door.kind, EntranceKind::Other);
            assert_eq!(door.label, format!("出入口{}", i + 1));
        }
    }

    #[test]
    fn test_arc_door_width() {
        assert_eq!(arc_door_width(20.0), 400);
        assert_eq!(arc_door_width(45.6), 920);
    }

    #[test]
    fn test_strategy_selection() {
        assert_eq!(
            EntranceStrategy::select(&DisabledTextLocalizer),
            EntranceStrategy::DoorArc
        );
        assert_eq!(
            EntranceStrategy::select(&StaticTextLocalizer::default()),
            EntranceStrategy::TextKeyword
        );
    }

    #[test]
    fn test_arc_fallback_when_unavailable() {
        let img = ring_image();
        let gray = rgb_to_grayscale(&img);

        let entrances = detect_entrances(&img, &gray, &DisabledTextLocalizer, &VisionConfig::default());

        assert_eq!(entrances.len(), 1);
        let door = &entrances[0];
        assert_eq!(door.kind, EntranceKind::MainEntrance);
        assert_eq!(door.label, "玄関");
        assert!((door.position.x - 100.0).abs() <= 3.0);
        assert!((door.position.y - 100.0).abs() <= 3.0);
        assert!((740..=860).contains(&door.width), "width {}", door.width);
        assert_eq!(door.width % 20, 0);
    }

    #[test]
    fn test_arc_fallback_when_localize_fails() {
        let img = ring_image();
        let gray = rgb_to_grayscale(&img);

        let entrances = detect_entrances(&img, &gray, &FailingLocalizer, &VisionConfig::default());

        assert_eq!(entrances.len(), 1);
        assert_eq!(entrances[0].label, "玄関");
    }

    #[test]
    fn test_keywords_used_when_available() {
        let img = ring_image();
        let gray = rgb_to_grayscale(&img);
        let localizer = StaticTextLocalizer::new(vec![TextToken::new("DOOR", 10, 10, 20, 10)]);

        let entrances = detect_entrances(&img, &gray, &localizer, &VisionConfig::default());

        assert_eq!(entrances.len(), 1);
        assert_eq!(entrances[0].label, "DOOR");
        assert_eq!(entrances[0].width, 900);
    }
}
