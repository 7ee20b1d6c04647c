use std::path::Path;

use crate::formats::{MemoryReader, PlaneReader, open_files, probe_series, write_stack_tiff};
use crate::model::SeriesInfo;
use crate::stack::ImageStack;

use super::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct IoService;

impl IoService {
    pub fn open<P: AsRef<Path>>(&self, paths: &[P]) -> Result<MemoryReader> {
        Ok(open_files(paths)?)
    }

    /// Geometry of every series of `reader`.
    pub fn probe<R: PlaneReader + ?Sized>(&self, reader: &mut R) -> Result<Vec<SeriesInfo>> {
        let mut series = Vec::with_capacity(reader.series_count());
        for index in 0..reader.series_count() {
            series.push(probe_series(reader, index)?);
        }
        Ok(series)
    }

    pub fn write(&self, path: impl AsRef<Path>, stack: &ImageStack) -> Result<()> {
        write_stack_tiff(path, stack)?;
        Ok(())
    }
}
