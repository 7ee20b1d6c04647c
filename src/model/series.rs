use serde::{Deserialize, Serialize};

use super::{AxisKind, CoreError, DimensionOrder, PixelKind, Result};

/// Semantic type reported for a plain channel sub-dimension.
pub const CHANNEL_DIM_TYPE: &str = "Channel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub z: usize,
    pub c: usize,
    pub t: usize,
}

impl Coordinate {
    pub fn new(z: usize, c: usize, t: usize) -> Self {
        Self { z, c, t }
    }

    pub fn get(&self, axis: AxisKind) -> usize {
        match axis {
            AxisKind::Z => self.z,
            AxisKind::Channel => self.c,
            AxisKind::Time => self.t,
        }
    }

    pub fn set(&mut self, axis: AxisKind, value: usize) {
        match axis {
            AxisKind::Z => self.z = value,
            AxisKind::Channel => self.c = value,
            AxisKind::Time => self.t = value,
        }
    }
}

/// Z, C and T extents of a series. `size_c` counts planes, so it is the
/// effective channel count for series with interleaved color samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extents {
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
}

impl Extents {
    pub fn new(size_z: usize, size_c: usize, size_t: usize) -> Self {
        Self {
            size_z,
            size_c,
            size_t,
        }
    }

    pub fn size(&self, axis: AxisKind) -> usize {
        match axis {
            AxisKind::Z => self.size_z,
            AxisKind::Channel => self.size_c,
            AxisKind::Time => self.size_t,
        }
    }

    pub fn plane_count(&self) -> usize {
        self.size_z * self.size_c * self.size_t
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CropRegion {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn fits(&self, size_x: usize, size_y: usize) -> bool {
        self.width > 0
            && self.height > 0
            && self.x + self.width <= size_x
            && self.y + self.height <= size_y
    }
}

/// One semantic dimension of a decomposed channel axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubDimension {
    pub length: usize,
    pub kind: String,
}

impl SubDimension {
    pub fn new(length: usize, kind: impl Into<String>) -> Self {
        Self {
            length,
            kind: kind.into(),
        }
    }

    pub fn channel(length: usize) -> Self {
        Self::new(length, CHANNEL_DIM_TYPE)
    }

    pub fn is_channel(&self) -> bool {
        self.kind.eq_ignore_ascii_case(CHANNEL_DIM_TYPE)
    }

    /// Short label tag: `c` for plain channels, the raw type otherwise.
    pub fn tag(&self) -> &str {
        if self.is_channel() { "c" } else { &self.kind }
    }
}

/// Snapshot of one series as reported by a reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub index: usize,
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub effective_size_c: usize,
    pub image_count: usize,
    pub dimension_order: DimensionOrder,
    pub rgb_channel_count: usize,
    pub pixel_kind: PixelKind,
    pub indexed: bool,
    pub channel_dims: Vec<SubDimension>,
}

impl SeriesInfo {
    pub fn new(
        size_x: usize,
        size_y: usize,
        extents: Extents,
        dimension_order: DimensionOrder,
        pixel_kind: PixelKind,
    ) -> Self {
        Self {
            index: 0,
            size_x,
            size_y,
            size_z: extents.size_z,
            size_c: extents.size_c,
            size_t: extents.size_t,
            effective_size_c: extents.size_c,
            image_count: extents.plane_count(),
            dimension_order,
            rgb_channel_count: 1,
            pixel_kind,
            indexed: false,
            channel_dims: vec![SubDimension::channel(extents.size_c)],
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Marks `samples` channels as interleaved into each plane.
    pub fn with_rgb_channels(mut self, samples: usize) -> Self {
        let samples = samples.max(1);
        self.rgb_channel_count = samples;
        self.effective_size_c = (self.size_c / samples).max(1);
        self.image_count = self.size_z * self.effective_size_c * self.size_t;
        self.channel_dims = vec![SubDimension::channel(self.effective_size_c)];
        self
    }

    pub fn with_channel_dims(mut self, channel_dims: Vec<SubDimension>) -> Result<Self> {
        let product = channel_dims
            .iter()
            .map(|dimension| dimension.length)
            .product::<usize>();
        if channel_dims.is_empty() || product < self.effective_size_c {
            return Err(CoreError::InvalidMetadata(format!(
                "channel sub-dimensions cover {product} positions but the series has {} channels",
                self.effective_size_c
            )));
        }
        self.channel_dims = channel_dims;
        Ok(self)
    }

    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    pub fn extents(&self) -> Extents {
        Extents::new(self.size_z, self.effective_size_c, self.size_t)
    }

    pub fn is_rgb(&self) -> bool {
        self.rgb_channel_count > 1
    }

    /// Plane `(width, height)` after an optional crop.
    pub fn plane_size(&self, crop: Option<CropRegion>) -> Result<(usize, usize)> {
        match crop {
            None => Ok((self.size_x, self.size_y)),
            Some(region) if region.fits(self.size_x, self.size_y) => {
                Ok((region.width, region.height))
            }
            Some(region) => Err(CoreError::CropOutOfBounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                size_x: self.size_x,
                size_y: self.size_y,
            }),
        }
    }
}
