use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{DimensionOrder, LookupTable};
use crate::stack::{Concatenate, ImageStack, ShapeKey, SplitAxes, split_stack};

/// Channel, slice and frame counts of an imported stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperDims {
    pub channels: usize,
    pub slices: usize,
    pub frames: usize,
}

impl HyperDims {
    pub fn new(channels: usize, slices: usize, frames: usize) -> Self {
        Self {
            channels,
            slices,
            frames,
        }
    }

    pub fn len(&self) -> usize {
        self.channels * self.slices * self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adjusts the counts to a stack of `len` slices. The channel count
    /// absorbs the difference first; a single flat Z series is the last
    /// resort.
    pub fn fit(self, len: usize) -> Self {
        if self.len() == len {
            return self;
        }
        let planes = self.slices * self.frames;
        if planes > 0 && len % planes == 0 && len > 0 {
            return Self::new(len / planes, self.slices, self.frames);
        }
        Self::new(1, len, 1)
    }

    /// Counts after appending stacks along time.
    fn extend_frames(self, len: usize) -> Self {
        let per_frame = self.channels * self.slices;
        if per_frame > 0 && len % per_frame == 0 {
            Self::new(self.channels, self.slices, len / per_frame)
        } else {
            Self::new(1, len, 1)
        }
    }
}

/// One finished output stack with its presentation attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedImage {
    pub title: String,
    /// Series that contributed slices, in arrival order.
    pub series: Vec<usize>,
    pub stack: ImageStack,
    pub dims: HyperDims,
    pub display_range: Option<(f64, f64)>,
    /// Lookup table per channel, for indexed-color series.
    pub channel_luts: BTreeMap<usize, LookupTable>,
    pub dimension_order: DimensionOrder,
}

impl ImportedImage {
    /// Breaks the image into one image per combination of the split axes.
    pub fn split(self, axes: SplitAxes) -> Vec<ImportedImage> {
        if !axes.any() {
            return vec![self];
        }
        let dims = HyperDims::new(
            if axes.channels { 1 } else { self.dims.channels },
            if axes.focal_planes { 1 } else { self.dims.slices },
            if axes.timepoints { 1 } else { self.dims.frames },
        );
        let ImportedImage {
            title,
            series,
            stack,
            display_range,
            channel_luts,
            dimension_order,
            ..
        } = self;
        split_stack(stack, axes)
            .into_iter()
            .map(|part| {
                let len = part.stack.len();
                ImportedImage {
                    title: format!("{title}{}", part.suffix),
                    series: series.clone(),
                    stack: part.stack,
                    dims: dims.fit(len),
                    display_range,
                    channel_luts: channel_luts.clone(),
                    dimension_order,
                }
            })
            .collect()
    }
}

impl Concatenate for ImportedImage {
    fn shape_key(&self) -> ShapeKey {
        self.stack.shape_key()
    }

    fn absorb(&mut self, other: Self) {
        self.stack.extend_from(other.stack);
        self.dims = self.dims.extend_frames(self.stack.len());
        self.display_range = match (self.display_range, other.display_range) {
            (Some((min, max)), Some((low, high))) => Some((min.min(low), max.max(high))),
            (range, None) | (None, range) => range,
        };
        for series in other.series {
            if !self.series.contains(&series) {
                self.series.push(series);
            }
        }
        for (channel, lut) in other.channel_luts {
            self.channel_luts.entry(channel).or_insert(lut);
        }
    }
}
