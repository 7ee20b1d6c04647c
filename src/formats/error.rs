use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported plane layout: {0}")]
    UnsupportedLayout(String),

    #[error("series {series} out of range for {count} series")]
    SeriesOutOfRange { series: usize, count: usize },

    #[error("plane {index} out of range for {count} planes in series {series}")]
    PlaneOutOfRange {
        series: usize,
        index: usize,
        count: usize,
    },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decode/encode failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF decode/encode failure: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("series metadata violates core contract: {0}")]
    Core(#[from] CoreError),
}
