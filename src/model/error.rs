use thiserror::Error;

use super::AxisKind;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Contract violations: indices, coordinates or ranges outside a series' extents.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid dimension order `{0}`: expected XY followed by a permutation of Z, C and T")]
    InvalidDimensionOrder(String),

    #[error("plane index {index} out of range for {count} planes")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("{axis} coordinate {value} out of range for size {size}")]
    CoordinateOutOfRange {
        axis: AxisKind,
        value: usize,
        size: usize,
    },

    #[error("invalid {axis} range {begin}..={end} step {step} for size {size}")]
    InvalidRange {
        axis: AxisKind,
        begin: usize,
        end: usize,
        step: usize,
        size: usize,
    },

    #[error("raster index {raster} out of range for {capacity} positions")]
    RasterOutOfRange { raster: usize, capacity: usize },

    #[error("position {value} out of range at dimension {dimension} of length {length}")]
    PositionOutOfRange {
        dimension: usize,
        value: usize,
        length: usize,
    },

    #[error(
        "crop region {width}x{height}+{x}+{y} does not fit a {size_x}x{size_y} plane"
    )]
    CropOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        size_x: usize,
        size_y: usize,
    },

    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
}
