use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::{
    CoreError, CropRegion, DimensionOrder, Extents, LookupTable, PixelKind, PlaneData, SeriesInfo,
    SubDimension,
};

use super::raster::read_raster_series;
use super::tiff::read_tiff_series;
use super::util::extension;
use super::{MemoryReader, MemorySeries, Result};

/// Source of decoded planes, addressed by series and plane index.
///
/// Series selection is stateful: every per-series query answers for the
/// series last passed to [`PlaneReader::set_series`].
pub trait PlaneReader {
    fn series_count(&self) -> usize;
    fn set_series(&mut self, series: usize) -> Result<()>;
    fn series(&self) -> usize;

    fn image_count(&self) -> usize;
    fn size_x(&self) -> usize;
    fn size_y(&self) -> usize;
    fn size_z(&self) -> usize;
    fn size_c(&self) -> usize;
    fn size_t(&self) -> usize;
    fn effective_size_c(&self) -> usize;
    fn dimension_order(&self) -> String;
    fn rgb_channel_count(&self) -> usize;
    fn pixel_kind(&self) -> PixelKind;
    fn is_indexed(&self) -> bool;
    fn channel_dim_lengths(&self) -> Vec<usize>;
    fn channel_dim_types(&self) -> Vec<String>;

    /// Decodes one plane of the current series. More than one component
    /// means the plane must be composed into a color plane.
    fn decode_plane(&mut self, index: usize, crop: Option<CropRegion>) -> Result<Vec<PlaneData>>;

    fn lookup_table(&mut self, _index: usize) -> Result<Option<LookupTable>> {
        Ok(None)
    }

    fn global_metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn series_metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn used_files(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Per-series descriptive metadata kept apart from the pixel reader.
pub trait MetadataStore {
    fn series_name(&self, series: usize) -> Option<String>;
}

/// Selects `series` and snapshots its geometry.
pub fn probe_series<R: PlaneReader + ?Sized>(reader: &mut R, series: usize) -> Result<SeriesInfo> {
    reader.set_series(series)?;
    let order = DimensionOrder::parse(&reader.dimension_order())?;
    let extents = Extents::new(reader.size_z(), reader.size_c(), reader.size_t());
    let mut info = SeriesInfo::new(reader.size_x(), reader.size_y(), extents, order, reader.pixel_kind())
        .with_index(series)
        .with_indexed(reader.is_indexed());
    if reader.rgb_channel_count() > 1 {
        info = info.with_rgb_channels(reader.rgb_channel_count());
    }
    info.effective_size_c = reader.effective_size_c();
    info.image_count = reader.image_count();

    let lengths = reader.channel_dim_lengths();
    let types = reader.channel_dim_types();
    if lengths.len() != types.len() {
        return Err(CoreError::InvalidMetadata(format!(
            "{} channel dimension lengths but {} types",
            lengths.len(),
            types.len()
        ))
        .into());
    }
    info.channel_dims = vec![SubDimension::channel(info.effective_size_c)];
    if !lengths.is_empty() {
        let dims = lengths
            .into_iter()
            .zip(types)
            .map(|(length, kind)| SubDimension::new(length, kind))
            .collect();
        info = info.with_channel_dims(dims)?;
    }
    debug!(
        series,
        size_x = info.size_x,
        size_y = info.size_y,
        image_count = info.image_count,
        order = %info.dimension_order,
        kind = %info.pixel_kind,
        "probe_series"
    );
    Ok(info)
}

pub fn supported_formats() -> &'static [&'static str] {
    &["png", "jpg", "jpeg", "tif", "tiff"]
}

/// Loads one file as a single series.
pub fn read_series(path: impl AsRef<Path>) -> Result<MemorySeries> {
    let path = path.as_ref();
    let extension = extension(path)?;
    match extension.as_str() {
        "png" | "jpg" | "jpeg" => read_raster_series(path),
        "tif" | "tiff" => read_tiff_series(path),
        other => Err(super::IoError::UnsupportedFormat(other.to_string())),
    }
}

/// Opens several files as one multi-series source, one series per file.
pub fn open_files<P: AsRef<Path>>(paths: &[P]) -> Result<MemoryReader> {
    let series = paths
        .iter()
        .map(read_series)
        .collect::<Result<Vec<_>>>()?;
    Ok(MemoryReader::new(series))
}
