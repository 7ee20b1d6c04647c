mod api;
mod codec;
mod error;
mod memory;
mod raster;
mod tiff;
mod util;

#[cfg(test)]
mod tests;

pub use api::{MetadataStore, PlaneReader, open_files, probe_series, read_series, supported_formats};
pub use codec::{DefaultCodec, SeriesSource, StackSink};
pub use error::{IoError, Result};
pub use memory::{MemoryReader, MemorySeries};
pub use self::tiff::write_stack_tiff;
