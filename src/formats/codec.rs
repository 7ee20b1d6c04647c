use std::path::Path;

use crate::stack::ImageStack;

use super::{MemorySeries, Result, read_series, supported_formats, write_stack_tiff};

pub trait SeriesSource {
    fn supports_extension(&self, extension: &str) -> bool;
    fn read(&self, path: &Path) -> Result<MemorySeries>;
}

pub trait StackSink {
    fn supports_extension(&self, extension: &str) -> bool;
    fn write(&self, path: &Path, stack: &ImageStack) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCodec;

impl SeriesSource for DefaultCodec {
    fn supports_extension(&self, extension: &str) -> bool {
        supported_formats().contains(&extension)
    }

    fn read(&self, path: &Path) -> Result<MemorySeries> {
        read_series(path)
    }
}

impl StackSink for DefaultCodec {
    fn supports_extension(&self, extension: &str) -> bool {
        matches!(extension, "tif" | "tiff")
    }

    fn write(&self, path: &Path, stack: &ImageStack) -> Result<()> {
        write_stack_tiff(path, stack)
    }
}
