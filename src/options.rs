//! User-facing import options, loaded from JSON or YAML files.

mod error;
mod io;
mod settings;

#[cfg(test)]
mod tests;

pub use error::{OptionsError, Result};
pub use io::{load_options, save_document};
pub use settings::{ImportOptions, SeriesOptions};
