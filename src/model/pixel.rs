use std::fmt;

use ndarray::{Array2, Array3, s};
use serde::{Deserialize, Serialize};

use super::{CoreError, CropRegion, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelKind {
    Gray8,
    Gray16,
    Float32,
    Rgb24,
}

impl PixelKind {
    pub const ALL: [PixelKind; 4] = [
        PixelKind::Gray8,
        PixelKind::Gray16,
        PixelKind::Float32,
        PixelKind::Rgb24,
    ];

    pub fn bit_depth(self) -> u32 {
        match self {
            PixelKind::Gray8 => 8,
            PixelKind::Gray16 => 16,
            PixelKind::Float32 => 32,
            PixelKind::Rgb24 => 24,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PixelKind::Gray8 => "uint8",
            PixelKind::Gray16 => "uint16",
            PixelKind::Float32 => "float",
            PixelKind::Rgb24 => "rgb",
        }
    }
}

impl fmt::Display for PixelKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// One decoded 2D plane. Gray planes are `[row, column]`, color planes
/// `[row, column, sample]` with three interleaved samples.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaneData {
    Gray8(Array2<u8>),
    Gray16(Array2<u16>),
    Float32(Array2<f32>),
    Rgb24(Array3<u8>),
}

impl PlaneData {
    pub fn zeros(kind: PixelKind, width: usize, height: usize) -> Self {
        match kind {
            PixelKind::Gray8 => PlaneData::Gray8(Array2::zeros((height, width))),
            PixelKind::Gray16 => PlaneData::Gray16(Array2::zeros((height, width))),
            PixelKind::Float32 => PlaneData::Float32(Array2::zeros((height, width))),
            PixelKind::Rgb24 => PlaneData::Rgb24(Array3::zeros((height, width, 3))),
        }
    }

    pub fn kind(&self) -> PixelKind {
        match self {
            PlaneData::Gray8(_) => PixelKind::Gray8,
            PlaneData::Gray16(_) => PixelKind::Gray16,
            PlaneData::Float32(_) => PixelKind::Float32,
            PlaneData::Rgb24(_) => PixelKind::Rgb24,
        }
    }

    pub fn width(&self) -> usize {
        self.shape()[1]
    }

    pub fn height(&self) -> usize {
        self.shape()[0]
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn shape(&self) -> &[usize] {
        match self {
            PlaneData::Gray8(data) => data.shape(),
            PlaneData::Gray16(data) => data.shape(),
            PlaneData::Float32(data) => data.shape(),
            PlaneData::Rgb24(data) => data.shape(),
        }
    }

    pub fn crop(&self, region: CropRegion) -> Result<Self> {
        let (size_x, size_y) = self.dimensions();
        if !region.fits(size_x, size_y) {
            return Err(CoreError::CropOutOfBounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                size_x,
                size_y,
            });
        }
        let rows = region.y..region.y + region.height;
        let columns = region.x..region.x + region.width;
        let cropped = match self {
            PlaneData::Gray8(data) => PlaneData::Gray8(data.slice(s![rows, columns]).to_owned()),
            PlaneData::Gray16(data) => {
                PlaneData::Gray16(data.slice(s![rows, columns]).to_owned())
            }
            PlaneData::Float32(data) => {
                PlaneData::Float32(data.slice(s![rows, columns]).to_owned())
            }
            PlaneData::Rgb24(data) => PlaneData::Rgb24(data.slice(s![rows, columns, ..]).to_owned()),
        };
        Ok(cropped)
    }

    /// Smallest and largest sample, ignoring NaN. `None` for an empty plane.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let values: Box<dyn Iterator<Item = f64> + '_> = match self {
            PlaneData::Gray8(data) => Box::new(data.iter().map(|value| f64::from(*value))),
            PlaneData::Gray16(data) => Box::new(data.iter().map(|value| f64::from(*value))),
            PlaneData::Float32(data) => Box::new(
                data.iter()
                    .filter(|value| !value.is_nan())
                    .map(|value| f64::from(*value)),
            ),
            PlaneData::Rgb24(data) => Box::new(data.iter().map(|value| f64::from(*value))),
        };
        values.fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
    }
}

/// Color lookup table of an indexed-color channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTable {
    red: Vec<u8>,
    green: Vec<u8>,
    blue: Vec<u8>,
}

impl LookupTable {
    pub const ENTRIES: usize = 256;

    pub fn new(red: Vec<u8>, green: Vec<u8>, blue: Vec<u8>) -> Result<Self> {
        for (name, table) in [("red", &red), ("green", &green), ("blue", &blue)] {
            if table.len() != Self::ENTRIES {
                return Err(CoreError::InvalidMetadata(format!(
                    "{name} lookup table has {} entries, expected {}",
                    table.len(),
                    Self::ENTRIES
                )));
            }
        }
        Ok(Self { red, green, blue })
    }

    pub fn grayscale() -> Self {
        let ramp = (0..=u8::MAX).collect::<Vec<_>>();
        Self {
            red: ramp.clone(),
            green: ramp.clone(),
            blue: ramp,
        }
    }

    pub fn color(&self, index: u8) -> [u8; 3] {
        let index = usize::from(index);
        [self.red[index], self.green[index], self.blue[index]]
    }
}
