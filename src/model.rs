mod axis;
mod error;
mod metadata;
mod order;
mod pixel;
mod series;

#[cfg(test)]
mod tests;

pub use axis::AxisKind;
pub use error::{CoreError, Result};
pub use metadata::OriginalMetadata;
pub use order::DimensionOrder;
pub use pixel::{LookupTable, PixelKind, PlaneData};
pub use series::{CHANNEL_DIM_TYPE, Coordinate, CropRegion, Extents, SeriesInfo, SubDimension};
