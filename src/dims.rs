//! Linear plane index <-> (Z, C, T) coordinate mapping.

mod mapper;
mod raster;

#[cfg(test)]
mod tests;

pub use mapper::DimensionMapper;
pub use raster::{position_to_raster, raster_to_position};
