use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{CropRegion, DimensionOrder, Extents};
use crate::select::{AxisRange, SeriesRanges};
use crate::stack::{ScalePolicy, SplitAxes};

use super::{OptionsError, Result};

fn enabled_by_default() -> bool {
    true
}

/// Choices for one series. Missing ranges select the whole axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesOptions {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub z: Option<AxisRange>,
    #[serde(default)]
    pub c: Option<AxisRange>,
    #[serde(default)]
    pub t: Option<AxisRange>,
    #[serde(default)]
    pub crop: Option<CropRegion>,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            z: None,
            c: None,
            t: None,
            crop: None,
        }
    }
}

impl SeriesOptions {
    pub fn ranges(&self, extents: Extents) -> SeriesRanges {
        let full = SeriesRanges::full(extents);
        SeriesRanges {
            z: self.z.unwrap_or(full.z),
            c: self.c.unwrap_or(full.c),
            t: self.t.unwrap_or(full.t),
        }
    }

    fn validate(&self, series: usize) -> Result<()> {
        for (name, range) in [("z", self.z), ("c", self.c), ("t", self.t)] {
            if let Some(range) = range {
                if range.step == 0 || range.begin > range.end {
                    return Err(OptionsError::Parse(format!(
                        "series {series}: {name} range {}..={} step {} is empty",
                        range.begin, range.end, range.step
                    )));
                }
            }
        }
        if let Some(crop) = self.crop {
            if crop.width == 0 || crop.height == 0 {
                return Err(OptionsError::Parse(format!(
                    "series {series}: crop region must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Everything the importer needs to know besides the reader itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Per-series choices keyed by series index.
    pub series: BTreeMap<usize, SeriesOptions>,
    /// Import only the series listed in `series`.
    pub only_listed_series: bool,
    pub merge_channels: bool,
    pub split_channels: bool,
    pub split_focal_planes: bool,
    pub split_timepoints: bool,
    pub concatenate: bool,
    pub virtual_stack: bool,
    /// Slice order of the output stacks; the reader's order when unset.
    pub stack_order: Option<DimensionOrder>,
    pub scale_policy: ScalePolicy,
    /// Use the observed data range as display range instead of the full
    /// range of the bit depth.
    pub autoscale: bool,
}

impl ImportOptions {
    pub fn series_options(&self, series: usize) -> SeriesOptions {
        self.series.get(&series).copied().unwrap_or_default()
    }

    pub fn is_series_enabled(&self, series: usize) -> bool {
        match self.series.get(&series) {
            Some(options) => options.enabled,
            None => !self.only_listed_series,
        }
    }

    pub fn split_axes(&self) -> SplitAxes {
        SplitAxes {
            channels: self.split_channels,
            focal_planes: self.split_focal_planes,
            timepoints: self.split_timepoints,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (series, options) in &self.series {
            options.validate(*series)?;
        }
        if let ScalePolicy::Fixed { min, max } = self.scale_policy {
            if max <= min || !min.is_finite() || !max.is_finite() {
                return Err(OptionsError::Parse(format!(
                    "fixed scale window {min}..{max} is empty"
                )));
            }
        }
        Ok(())
    }
}
