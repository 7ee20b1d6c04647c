use std::fs::File;
use std::path::Path;

use ndarray::{Array2, Array3};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{TiffEncoder, colortype};
use tracing::debug;

use crate::model::{PixelKind, PlaneData};
use crate::stack::ImageStack;

use super::util::{file_name, plane_len};
use super::{IoError, MemorySeries, Result};

/// Reads every page of a TIFF file as one focal plane of a single series.
pub(crate) fn read_tiff_series(path: &Path) -> Result<MemorySeries> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;
    let mut pages = Vec::new();

    loop {
        pages.push(decode_tiff_page(&mut decoder, width, height)?);
        if !decoder.more_images() {
            break;
        }
        decoder.next_image()?;
        let (other_width, other_height) = decoder.dimensions()?;
        if other_width != width || other_height != height {
            return Err(IoError::UnsupportedLayout(
                "TIFF pages must have identical dimensions".into(),
            ));
        }
    }

    let kind = pages[0].kind();
    if let Some(other) = pages.iter().find(|page| page.kind() != kind) {
        return Err(IoError::UnsupportedLayout(format!(
            "TIFF pages mix {kind} and {} samples",
            other.kind()
        )));
    }

    let size_c = if kind == PixelKind::Rgb24 { 3 } else { 1 };
    let mut series = MemorySeries::new(
        width as usize,
        height as usize,
        (pages.len(), size_c, 1),
        "XYCZT",
        kind,
    );
    if kind == PixelKind::Rgb24 {
        series = series.with_rgb_channels(3);
    }
    series.metadata.insert("PageCount".into(), pages.len().to_string());
    series.metadata.insert("FileName".into(), file_name(path));
    series.source = Some(path.to_path_buf());
    for page in pages {
        series.push_plane(page);
    }
    debug!(
        path = %path.display(),
        width,
        height,
        pages = series.planes.len(),
        kind = %kind,
        "read_tiff_series"
    );
    Ok(series)
}

fn decode_tiff_page(decoder: &mut Decoder<File>, width: u32, height: u32) -> Result<PlaneData> {
    let (rows, columns) = (height as usize, width as usize);
    let samples = plane_len(width, height);
    let plane = match decoder.read_image()? {
        DecodingResult::U8(buffer) if buffer.len() == samples => {
            PlaneData::Gray8(gray_array(rows, columns, buffer)?)
        }
        DecodingResult::U8(buffer) if buffer.len() == samples * 3 => PlaneData::Rgb24(
            Array3::from_shape_vec((rows, columns, 3), buffer)
                .map_err(|error| IoError::UnsupportedLayout(error.to_string()))?,
        ),
        DecodingResult::U16(buffer) if buffer.len() == samples => {
            PlaneData::Gray16(gray_array(rows, columns, buffer)?)
        }
        DecodingResult::F32(buffer) if buffer.len() == samples => {
            PlaneData::Float32(gray_array(rows, columns, buffer)?)
        }
        DecodingResult::U8(_) | DecodingResult::U16(_) | DecodingResult::F32(_) => {
            return Err(IoError::UnsupportedLayout(
                "TIFF pages with alpha or extra samples are not supported".into(),
            ));
        }
        other => {
            return Err(IoError::UnsupportedLayout(format!(
                "unsupported TIFF sample type: {}",
                sample_type_name(&other)
            )));
        }
    };
    Ok(plane)
}

fn gray_array<T>(rows: usize, columns: usize, buffer: Vec<T>) -> Result<Array2<T>> {
    Array2::from_shape_vec((rows, columns), buffer)
        .map_err(|error| IoError::UnsupportedLayout(error.to_string()))
}

fn sample_type_name(result: &DecodingResult) -> &'static str {
    match result {
        DecodingResult::U32(_) => "u32",
        DecodingResult::U64(_) => "u64",
        DecodingResult::I8(_) => "i8",
        DecodingResult::I16(_) => "i16",
        DecodingResult::I32(_) => "i32",
        DecodingResult::I64(_) => "i64",
        DecodingResult::F64(_) => "f64",
        _ => "other",
    }
}

/// Writes a decoded stack as a multi-page TIFF, one page per slice.
pub fn write_stack_tiff(path: impl AsRef<Path>, stack: &ImageStack) -> Result<()> {
    let path = path.as_ref();
    if stack.is_empty() {
        return Err(IoError::UnsupportedLayout("cannot write an empty stack".into()));
    }
    let width = stack.width() as u32;
    let height = stack.height() as u32;
    let file = File::create(path)?;
    let mut encoder = TiffEncoder::new(file)?;

    for (index, slice) in stack.slices().iter().enumerate() {
        let plane = slice.pixels().ok_or_else(|| {
            IoError::UnsupportedLayout(format!("slice {index} has not been decoded"))
        })?;
        match plane {
            PlaneData::Gray8(data) => {
                let page = data.iter().copied().collect::<Vec<_>>();
                encoder.write_image::<colortype::Gray8>(width, height, &page)?;
            }
            PlaneData::Gray16(data) => {
                let page = data.iter().copied().collect::<Vec<_>>();
                encoder.write_image::<colortype::Gray16>(width, height, &page)?;
            }
            PlaneData::Float32(data) => {
                let page = data.iter().copied().collect::<Vec<_>>();
                encoder.write_image::<colortype::Gray32Float>(width, height, &page)?;
            }
            PlaneData::Rgb24(data) => {
                let page = data.iter().copied().collect::<Vec<_>>();
                encoder.write_image::<colortype::RGB8>(width, height, &page)?;
            }
        }
    }
    debug!(path = %path.display(), slices = stack.len(), kind = %stack.kind(), "write_stack_tiff");
    Ok(())
}
