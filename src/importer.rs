//! Series-by-series import: selection, decoding, routing and assembly of
//! output stacks.

mod cancel;
mod engine;
mod error;
mod metadata;
mod output;
mod progress;
mod report;
mod virtual_stack;


pub use cancel::CancelToken;
pub use engine::{ImportOutcome, Importer};
pub use error::{ImportError, Result};
pub use metadata::collect_original_metadata;
pub use output::{HyperDims, ImportedImage};
pub use progress::{NoProgress, ProgressSink, ThrottledProgress, TracingProgress};
pub use report::{ImportReport, SeriesReport, StackSummary, save_report};
pub use virtual_stack::{fuses_on_decode, materialize_slice, materialize_stack};
