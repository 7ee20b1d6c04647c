use std::path::Path;

use image::DynamicImage;
use ndarray::{Array2, Array3};
use tracing::debug;

use crate::model::{PixelKind, PlaneData};

use super::util::file_name;
use super::{IoError, MemorySeries, Result};

/// Reads a PNG or JPEG as a single-plane series. Color images become one
/// interleaved RGB plane with three samples per pixel.
pub(crate) fn read_raster_series(path: &Path) -> Result<MemorySeries> {
    let image = image::open(path)?;
    let (width, height) = (image.width() as usize, image.height() as usize);
    let plane = match image {
        DynamicImage::ImageLuma8(buffer) => PlaneData::Gray8(
            Array2::from_shape_vec((height, width), buffer.into_raw())
                .map_err(|error| IoError::UnsupportedLayout(error.to_string()))?,
        ),
        DynamicImage::ImageLuma16(buffer) => PlaneData::Gray16(
            Array2::from_shape_vec((height, width), buffer.into_raw())
                .map_err(|error| IoError::UnsupportedLayout(error.to_string()))?,
        ),
        other => PlaneData::Rgb24(
            Array3::from_shape_vec((height, width, 3), other.to_rgb8().into_raw())
                .map_err(|error| IoError::UnsupportedLayout(error.to_string()))?,
        ),
    };

    let kind = plane.kind();
    let mut series = if kind == PixelKind::Rgb24 {
        MemorySeries::new(width, height, (1, 3, 1), "XYCZT", kind).with_rgb_channels(3)
    } else {
        MemorySeries::new(width, height, (1, 1, 1), "XYCZT", kind)
    };
    series.metadata.insert("FileName".into(), file_name(path));
    series.source = Some(path.to_path_buf());
    series.push_plane(plane);
    debug!(path = %path.display(), width, height, kind = %kind, "read_raster_series");
    Ok(series)
}
