// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input format detection

use drawscan_core::{Error, Result};
use image::ImageFormat;
use std::fmt;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";
const BINARY_DXF_SENTINEL: &[u8] = b"AutoCAD Binary DXF";

/// Bytes inspected when sniffing an ASCII DXF header
const DXF_SNIFF_LEN: usize = 1024;

/// Kind of drawing document, deciding which producer handles it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Raster(ImageFormat),
    Pdf,
    Dxf,
}

impl InputFormat {
    /// Format implied by a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "dxf" => Some(Self::Dxf),
            other => ImageFormat::from_extension(other).map(Self::Raster),
        }
    }

    /// Format recognized from leading bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PDF_MAGIC) {
            return Some(Self::Pdf);
        }
        if bytes.starts_with(BINARY_DXF_SENTINEL) || looks_like_ascii_dxf(bytes) {
            return Some(Self::Dxf);
        }
        image::guess_format(bytes).ok().map(Self::Raster)
    }

    /// Extension first, content second
    pub fn detect(path: Option<&Path>, bytes: &[u8]) -> Result<Self> {
        let ext = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str());

        if let Some(format) = ext.and_then(Self::from_extension) {
            return Ok(format);
        }

        Self::sniff(bytes).ok_or_else(|| {
            Error::UnsupportedFormat(match ext {
                Some(ext) => format!(".{ext}"),
                None => "unrecognized content".to_string(),
            })
        })
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Dxf)
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster(format) => {
                let name = format.extensions_str().first().copied().unwrap_or("image");
                f.write_str(name)
            }
            Self::Pdf => f.write_str("pdf"),
            Self::Dxf => f.write_str("dxf"),
        }
    }
}

/// ASCII DXF opens with a `0` group code followed by `SECTION`,
/// optionally preceded by `999` comment pairs.
fn looks_like_ascii_dxf(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(DXF_SNIFF_LEN)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };

    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    while let Some(code) = lines.next() {
        let value = lines.next();
        match (code, value) {
            ("999", Some(_)) => continue,
            ("0", Some("SECTION")) => return true,
            _ => return false,
        }
    }
    false
}
