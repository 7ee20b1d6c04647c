use crate::model::{CoreError, Result};

/// Splits `raster` into one position per dimension, least significant first:
/// `position[0]` varies fastest.
pub fn raster_to_position(lengths: &[usize], raster: usize) -> Result<Vec<usize>> {
    let capacity = lengths.iter().product::<usize>();
    if raster >= capacity {
        return Err(CoreError::RasterOutOfRange { raster, capacity });
    }
    let mut remainder = raster;
    let position = lengths
        .iter()
        .map(|length| {
            let value = remainder % length;
            remainder /= length;
            value
        })
        .collect();
    Ok(position)
}

/// Inverse of [`raster_to_position`].
pub fn position_to_raster(lengths: &[usize], position: &[usize]) -> Result<usize> {
    if lengths.len() != position.len() {
        return Err(CoreError::InvalidMetadata(format!(
            "position has {} dimensions but lengths have {}",
            position.len(),
            lengths.len()
        )));
    }
    let mut raster = 0;
    let mut stride = 1;
    for (dimension, (length, value)) in lengths.iter().zip(position).enumerate() {
        if value >= length {
            return Err(CoreError::PositionOutOfRange {
                dimension,
                value: *value,
                length: *length,
            });
        }
        raster += value * stride;
        stride *= length;
    }
    Ok(raster)
}
