//! Expansion of per-axis ranges into the set of planes to read.

mod range;
mod selection;

#[cfg(test)]
mod tests;

pub use range::{AxisRange, SeriesRanges};
pub use selection::{PlaneSelection, select_planes};
