// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subcommand implementations.

use crate::config::Config;
use crate::{emit, AnalysisArgs};
use anyhow::{bail, Context, Result};
use drawscan_core::{AnalysisRequest, AnalysisResult};
use drawscan_processing::{to_json, BatchJob, Pipeline};
use drawscan_vision::{
    default_localizer, DisabledTextLocalizer, RasterAnalyzer, StaticTextLocalizer, TextLocalizer,
    VisionConfig,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// One line of batch output on stdout
#[derive(Serialize)]
struct BatchLine<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn vision_config(config: &Config, path: Option<&Path>) -> Result<VisionConfig> {
    let mut vision = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            VisionConfig::from_json(&json)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?
        }
        None => VisionConfig::default(),
    };
    if let Some(language) = &config.ocr_language {
        vision.tesseract_language = language.clone();
    }
    Ok(vision)
}

fn build_pipeline(
    config: &Config,
    analysis: &AnalysisArgs,
    ocr_tokens: Option<&Path>,
) -> Result<Pipeline> {
    let vision = vision_config(config, analysis.config.as_deref())?;

    let localizer: Arc<dyn TextLocalizer> = if let Some(path) = ocr_tokens {
        let tokens = StaticTextLocalizer::from_file(path)
            .with_context(|| format!("Failed to load OCR tokens from {}", path.display()))?;
        Arc::new(tokens)
    } else if analysis.no_ocr {
        Arc::new(DisabledTextLocalizer)
    } else {
        default_localizer(&vision)
    };

    let raster = RasterAnalyzer::new(vision, localizer);
    Ok(Pipeline::with_pdf_dpi(raster, config.pdf_dpi))
}

pub fn analyze(
    config: &Config,
    file: &Path,
    analysis: &AnalysisArgs,
    ocr_tokens: Option<&Path>,
    pretty: bool,
    output: Option<&Path>,
) -> Result<()> {
    let pipeline = build_pipeline(config, analysis, ocr_tokens)?;
    let request = AnalysisRequest {
        floor: analysis.floor,
    };

    let result = pipeline
        .analyze_file(file, &request)
        .with_context(|| format!("Failed to analyze {}", file.display()))?;

    info!(
        file = %file.display(),
        outlines = result.outlines.len(),
        entrances = result.entrances.len(),
        dimensions = result.dimensions.len(),
        scale = result.scale,
        "analyzed drawing"
    );

    emit(&to_json(&result, pretty)?, output)
}

pub fn batch(
    config: &Config,
    files: &[PathBuf],
    analysis: &AnalysisArgs,
    output_dir: Option<&Path>,
) -> Result<()> {
    let pipeline = build_pipeline(config, analysis, None)?;
    let request = AnalysisRequest {
        floor: analysis.floor,
    };

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let jobs: Vec<BatchJob> = files
        .iter()
        .map(|path| BatchJob::new(path.clone(), request))
        .collect();
    let outcomes = pipeline.analyze_batch(&jobs);

    let mut failed = 0;
    for outcome in &outcomes {
        match (&outcome.result, output_dir) {
            (Ok(result), Some(dir)) => {
                let target = dir.join(output_name(&outcome.path));
                emit(&to_json(result, true)?, Some(&target))?;
            }
            (Ok(result), None) => {
                let line = BatchLine {
                    path: outcome.path.display().to_string(),
                    result: Some(result),
                    error: None,
                };
                emit(&serde_json::to_string(&line)?, None)?;
            }
            (Err(e), _) => {
                failed += 1;
                error!(path = %outcome.path.display(), error = %e, "analysis failed");
                if output_dir.is_none() {
                    let line = BatchLine {
                        path: outcome.path.display().to_string(),
                        result: None,
                        error: Some(e.to_string()),
                    };
                    emit(&serde_json::to_string(&line)?, None)?;
                }
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} drawings failed", outcomes.len());
    }
    Ok(())
}

pub fn probe(config: &Config) -> Result<()> {
    let vision = vision_config(config, None)?;
    let raster = RasterAnalyzer::with_default_localizer(vision);
    let statuses = Pipeline::with_pdf_dpi(raster, config.pdf_dpi).probe();

    for status in &statuses {
        info!(
            capability = status.capability,
            available = status.available,
            "capability probed"
        );
    }
    emit(&serde_json::to_string_pretty(&statuses)?, None)
}

/// `plans/first-floor.png` -> `first-floor.json`
fn output_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "drawing".to_string());
    format!("{stem}.json")
}
