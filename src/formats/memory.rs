use std::collections::BTreeMap;
use std::path::PathBuf;

use ndarray::{Array2, Array3};

use crate::model::{CHANNEL_DIM_TYPE, CropRegion, LookupTable, PixelKind, PlaneData};

use super::{IoError, MetadataStore, PlaneReader, Result};

/// One series held fully in memory: geometry plus the decoded components
/// of every plane, in the series' own plane order.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySeries {
    pub name: Option<String>,
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub dimension_order: String,
    pub rgb_channel_count: usize,
    pub pixel_kind: PixelKind,
    pub indexed: bool,
    pub channel_dim_lengths: Vec<usize>,
    pub channel_dim_types: Vec<String>,
    pub planes: Vec<Vec<PlaneData>>,
    pub luts: BTreeMap<usize, LookupTable>,
    pub metadata: BTreeMap<String, String>,
    pub source: Option<PathBuf>,
}

impl MemorySeries {
    pub fn new(
        size_x: usize,
        size_y: usize,
        (size_z, size_c, size_t): (usize, usize, usize),
        dimension_order: &str,
        pixel_kind: PixelKind,
    ) -> Self {
        Self {
            name: None,
            size_x,
            size_y,
            size_z,
            size_c,
            size_t,
            dimension_order: dimension_order.to_string(),
            rgb_channel_count: 1,
            pixel_kind,
            indexed: false,
            channel_dim_lengths: Vec::new(),
            channel_dim_types: Vec::new(),
            planes: Vec::new(),
            luts: BTreeMap::new(),
            metadata: BTreeMap::new(),
            source: None,
        }
    }

    /// Fills every plane with a constant derived from its index, so tests
    /// and demos can tell planes apart after routing.
    pub fn synthetic(
        size_x: usize,
        size_y: usize,
        extents: (usize, usize, usize),
        dimension_order: &str,
        pixel_kind: PixelKind,
    ) -> Self {
        let mut series = Self::new(size_x, size_y, extents, dimension_order, pixel_kind);
        for index in 0..series.image_count() {
            let plane = match pixel_kind {
                PixelKind::Gray8 => PlaneData::Gray8(Array2::from_elem((size_y, size_x), index as u8)),
                PixelKind::Gray16 => {
                    PlaneData::Gray16(Array2::from_elem((size_y, size_x), index as u16))
                }
                PixelKind::Float32 => {
                    PlaneData::Float32(Array2::from_elem((size_y, size_x), index as f32))
                }
                PixelKind::Rgb24 => {
                    PlaneData::Rgb24(Array3::from_elem((size_y, size_x, 3), index as u8))
                }
            };
            series.planes.push(vec![plane]);
        }
        series
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rgb_channels(mut self, samples: usize) -> Self {
        self.rgb_channel_count = samples.max(1);
        self
    }

    pub fn with_channel_dims(mut self, lengths: Vec<usize>, types: Vec<String>) -> Self {
        self.channel_dim_lengths = lengths;
        self.channel_dim_types = types;
        self
    }

    pub fn with_lut(mut self, index: usize, lut: LookupTable) -> Self {
        self.indexed = true;
        self.luts.insert(index, lut);
        self
    }

    pub fn push_plane(&mut self, plane: PlaneData) {
        self.planes.push(vec![plane]);
    }

    /// Replaces plane `index` with several components to be composed.
    pub fn set_components(&mut self, index: usize, components: Vec<PlaneData>) {
        if let Some(slot) = self.planes.get_mut(index) {
            *slot = components;
        }
    }

    pub fn effective_size_c(&self) -> usize {
        (self.size_c / self.rgb_channel_count.max(1)).max(1).min(self.size_c)
    }

    pub fn image_count(&self) -> usize {
        self.size_z * self.effective_size_c() * self.size_t
    }
}

/// [`PlaneReader`] over in-memory series. Records every decode request.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    series: Vec<MemorySeries>,
    current: usize,
    global: BTreeMap<String, String>,
    decode_log: Vec<(usize, usize)>,
}

impl MemoryReader {
    pub fn new(series: Vec<MemorySeries>) -> Self {
        Self {
            series,
            ..Self::default()
        }
    }

    pub fn with_global_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.global.insert(key.into(), value.into());
        self
    }

    /// `(series, plane)` of every `decode_plane` call so far.
    pub fn decode_log(&self) -> &[(usize, usize)] {
        &self.decode_log
    }

    pub fn series_data(&self, series: usize) -> Option<&MemorySeries> {
        self.series.get(series)
    }

    /// The selected series, or `None` for a reader without series.
    fn current(&self) -> Option<&MemorySeries> {
        self.series.get(self.current)
    }

    fn current_or<T>(&self, empty: T, read: impl FnOnce(&MemorySeries) -> T) -> T {
        self.current().map_or(empty, read)
    }

    fn current_series(&self) -> Result<&MemorySeries> {
        self.current().ok_or(IoError::SeriesOutOfRange {
            series: self.current,
            count: self.series.len(),
        })
    }
}

impl PlaneReader for MemoryReader {
    fn series_count(&self) -> usize {
        self.series.len()
    }

    fn set_series(&mut self, series: usize) -> Result<()> {
        if series >= self.series.len() {
            return Err(IoError::SeriesOutOfRange {
                series,
                count: self.series.len(),
            });
        }
        self.current = series;
        Ok(())
    }

    fn series(&self) -> usize {
        self.current
    }

    fn image_count(&self) -> usize {
        self.current_or(0, MemorySeries::image_count)
    }

    fn size_x(&self) -> usize {
        self.current_or(0, |series| series.size_x)
    }

    fn size_y(&self) -> usize {
        self.current_or(0, |series| series.size_y)
    }

    fn size_z(&self) -> usize {
        self.current_or(0, |series| series.size_z)
    }

    fn size_c(&self) -> usize {
        self.current_or(0, |series| series.size_c)
    }

    fn size_t(&self) -> usize {
        self.current_or(0, |series| series.size_t)
    }

    fn effective_size_c(&self) -> usize {
        self.current_or(0, MemorySeries::effective_size_c)
    }

    fn dimension_order(&self) -> String {
        self.current_or(String::new(), |series| series.dimension_order.clone())
    }

    fn rgb_channel_count(&self) -> usize {
        self.current_or(0, |series| series.rgb_channel_count)
    }

    fn pixel_kind(&self) -> PixelKind {
        self.current_or(PixelKind::Gray8, |series| series.pixel_kind)
    }

    fn is_indexed(&self) -> bool {
        self.current_or(false, |series| series.indexed)
    }

    fn channel_dim_lengths(&self) -> Vec<usize> {
        self.current_or(Vec::new(), |series| {
            if series.channel_dim_lengths.is_empty() {
                vec![series.effective_size_c()]
            } else {
                series.channel_dim_lengths.clone()
            }
        })
    }

    fn channel_dim_types(&self) -> Vec<String> {
        self.current_or(Vec::new(), |series| {
            if series.channel_dim_types.is_empty() {
                vec![CHANNEL_DIM_TYPE.to_string()]
            } else {
                series.channel_dim_types.clone()
            }
        })
    }

    fn decode_plane(&mut self, index: usize, crop: Option<CropRegion>) -> Result<Vec<PlaneData>> {
        self.decode_log.push((self.current, index));
        let series = self.current_series()?;
        let components = series.planes.get(index).ok_or(IoError::PlaneOutOfRange {
            series: self.current,
            index,
            count: series.planes.len(),
        })?;
        match crop {
            None => Ok(components.clone()),
            Some(region) => Ok(components
                .iter()
                .map(|plane| plane.crop(region))
                .collect::<std::result::Result<Vec<_>, _>>()?),
        }
    }

    fn lookup_table(&mut self, index: usize) -> Result<Option<LookupTable>> {
        Ok(self.current_series()?.luts.get(&index).cloned())
    }

    fn global_metadata(&self) -> BTreeMap<String, String> {
        self.global.clone()
    }

    fn series_metadata(&self) -> BTreeMap<String, String> {
        self.current_or(BTreeMap::new(), |series| series.metadata.clone())
    }

    fn used_files(&self) -> Vec<PathBuf> {
        self.series
            .iter()
            .filter_map(|series| series.source.clone())
            .collect()
    }
}

impl MetadataStore for MemoryReader {
    fn series_name(&self, series: usize) -> Option<String> {
        self.series.get(series).and_then(|series| series.name.clone())
    }
}
