// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface shared by every analysis path

use crate::error::Result;
use crate::floor::resolve_floor;
use crate::types::AnalysisResult;
use serde::{Deserialize, Serialize};

/// Per-call analysis options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Floor to tag raster outlines with. `None` and `0` mean floor 1.
    pub floor: Option<u32>,
}

impl AnalysisRequest {
    pub fn for_floor(floor: u32) -> Self {
        Self { floor: Some(floor) }
    }

    /// Effective floor number (always >= 1)
    pub fn floor(&self) -> u32 {
        resolve_floor(self.floor)
    }
}

/// Turns the bytes of one drawing into an [`AnalysisResult`]
///
/// Implementations hold only immutable configuration, so a single producer
/// can serve concurrent calls.
pub trait DrawingProducer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Analyze one drawing
    fn analyze(&self, bytes: &[u8], request: &AnalysisRequest) -> Result<AnalysisResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_floor_defaults() {
        assert_eq!(AnalysisRequest::default().floor(), 1);
        assert_eq!(AnalysisRequest { floor: Some(0) }.floor(), 1);
        assert_eq!(AnalysisRequest::for_floor(2).floor(), 2);
    }
}
