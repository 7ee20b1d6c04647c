use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::PixelKind;
use crate::options::save_document;

use super::{HyperDims, ImportedImage, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    pub series: usize,
    pub name: Option<String>,
    pub selected_planes: usize,
    pub decoded_planes: usize,
    pub stacks: Vec<PixelKind>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSummary {
    pub title: String,
    pub kind: PixelKind,
    pub width: usize,
    pub height: usize,
    pub slices: usize,
    pub deferred: bool,
    pub dims: HyperDims,
    pub display_range: Option<(f64, f64)>,
}

impl From<&ImportedImage> for StackSummary {
    fn from(image: &ImportedImage) -> Self {
        Self {
            title: image.title.clone(),
            kind: image.stack.kind(),
            width: image.stack.width(),
            height: image.stack.height(),
            slices: image.stack.len(),
            deferred: image.stack.is_deferred(),
            dims: image.dims,
            display_range: image.display_range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub series: Vec<SeriesReport>,
    pub outputs: Vec<StackSummary>,
    pub cancelled: bool,
}

pub fn save_report(path: impl AsRef<Path>, report: &ImportReport) -> Result<()> {
    save_document(path, report)?;
    Ok(())
}
