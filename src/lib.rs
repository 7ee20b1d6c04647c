//! Plane selection and stack assembly for multi-dimensional microscopy
//! imports.

pub mod cli;
pub mod dims;
pub mod formats;
pub mod importer;
pub mod label;
pub mod model;
pub mod options;
pub mod runtime;
pub mod select;
pub mod stack;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
