use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::{Coordinate, PixelKind, PlaneData};
use crate::select::AxisRange;

use super::{Result, StackError};

/// Where the pixels of a not-yet-decoded slice live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredPlane {
    pub series: usize,
    /// Plane index, or the merged index when `composite` is set.
    pub index: usize,
    /// Whether the channels at this slice's (Z, T) are fused on decode.
    pub composite: bool,
    /// Channels fused by a composite slice.
    pub channels: AxisRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SliceContent {
    Pixels(PlaneData),
    Deferred(DeferredPlane),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub coordinate: Coordinate,
    pub content: SliceContent,
}

impl Slice {
    pub fn pixels(&self) -> Option<&PlaneData> {
        match &self.content {
            SliceContent::Pixels(plane) => Some(plane),
            SliceContent::Deferred(_) => None,
        }
    }
}

/// Concatenation key of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeKey {
    pub width: usize,
    pub height: usize,
    pub bit_depth: u32,
}

/// Ordered slices sharing one pixel representation and one plane size.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageStack {
    kind: PixelKind,
    width: usize,
    height: usize,
    slices: Vec<Slice>,
}

impl ImageStack {
    pub fn new(kind: PixelKind, width: usize, height: usize) -> Self {
        Self {
            kind,
            width,
            height,
            slices: Vec::new(),
        }
    }

    pub fn kind(&self) -> PixelKind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bit_depth(&self) -> u32 {
        self.kind.bit_depth()
    }

    pub fn shape_key(&self) -> ShapeKey {
        ShapeKey {
            width: self.width,
            height: self.height,
            bit_depth: self.bit_depth(),
        }
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn slice(&self, index: usize) -> Result<&Slice> {
        self.slices.get(index).ok_or(StackError::SliceOutOfRange {
            index,
            len: self.slices.len(),
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.slices.iter().map(|slice| slice.label.as_str())
    }

    pub fn is_deferred(&self) -> bool {
        self.slices
            .iter()
            .any(|slice| matches!(slice.content, SliceContent::Deferred(_)))
    }

    pub fn push(&mut self, label: String, coordinate: Coordinate, plane: PlaneData) -> Result<()> {
        if plane.kind() != self.kind {
            return Err(StackError::KindMismatch {
                expected: self.kind,
                found: plane.kind(),
            });
        }
        let (found_width, found_height) = plane.dimensions();
        if (found_width, found_height) != (self.width, self.height) {
            return Err(StackError::ShapeMismatch {
                width: self.width,
                height: self.height,
                found_width,
                found_height,
            });
        }
        self.slices.push(Slice {
            label,
            coordinate,
            content: SliceContent::Pixels(plane),
        });
        Ok(())
    }

    pub fn push_deferred(&mut self, label: String, coordinate: Coordinate, plane: DeferredPlane) {
        self.slices.push(Slice {
            label,
            coordinate,
            content: SliceContent::Deferred(plane),
        });
    }

    /// Appends every slice of `other`, which must share this stack's shape key.
    pub fn append(&mut self, other: ImageStack) -> Result<()> {
        if other.kind != self.kind {
            return Err(StackError::KindMismatch {
                expected: self.kind,
                found: other.kind,
            });
        }
        if (other.width, other.height) != (self.width, self.height) {
            return Err(StackError::ShapeMismatch {
                width: self.width,
                height: self.height,
                found_width: other.width,
                found_height: other.height,
            });
        }
        self.slices.extend(other.slices);
        Ok(())
    }

    /// Appends `other` without checks; callers guarantee equal shape keys.
    pub(crate) fn extend_from(&mut self, other: ImageStack) {
        self.slices.extend(other.slices);
    }

    pub(crate) fn push_slice(&mut self, slice: Slice) {
        self.slices.push(slice);
    }

    pub(crate) fn into_slices(self) -> Vec<Slice> {
        self.slices
    }

    /// Full representable range for gray stacks, `None` for color.
    pub fn default_display_range(&self) -> Option<(f64, f64)> {
        match self.kind {
            PixelKind::Rgb24 => None,
            kind => Some((0.0, 2f64.powi(kind.bit_depth() as i32) - 1.0)),
        }
    }

    /// Observed min/max over all decoded slices.
    pub fn data_range(&self) -> Option<(f64, f64)> {
        self.slices
            .par_iter()
            .filter_map(|slice| slice.pixels().and_then(PlaneData::min_max))
            .reduce_with(|(min, max), (low, high)| (min.min(low), max.max(high)))
    }
}
