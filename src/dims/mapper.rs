use crate::model::{AxisKind, CoreError, Coordinate, DimensionOrder, Extents, Result, SeriesInfo};

use super::{position_to_raster, raster_to_position};

/// Maps linear plane indices of one series to coordinates and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionMapper {
    order: DimensionOrder,
    extents: Extents,
}

impl DimensionMapper {
    pub fn new(order: DimensionOrder, extents: Extents) -> Self {
        Self { order, extents }
    }

    pub fn for_series(info: &SeriesInfo) -> Self {
        Self::new(info.dimension_order, info.extents())
    }

    /// Same planes enumerated in another nesting order.
    pub fn with_order(&self, order: DimensionOrder) -> Self {
        Self::new(order, self.extents)
    }

    /// View of the series with every channel fused into one.
    pub fn merged(&self) -> Self {
        let extents = Extents::new(self.extents.size_z, 1, self.extents.size_t);
        Self::new(self.order, extents)
    }

    pub fn order(&self) -> DimensionOrder {
        self.order
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    pub fn image_count(&self) -> usize {
        self.extents.plane_count()
    }

    pub fn to_linear(&self, coordinate: Coordinate) -> Result<usize> {
        for axis in AxisKind::ALL {
            let value = coordinate.get(axis);
            let size = self.extents.size(axis);
            if value >= size {
                return Err(CoreError::CoordinateOutOfRange { axis, value, size });
            }
        }
        let axes = self.order.axes();
        position_to_raster(&self.lengths(), &axes.map(|axis| coordinate.get(axis)))
    }

    pub fn to_coordinate(&self, index: usize) -> Result<Coordinate> {
        let count = self.image_count();
        if index >= count {
            return Err(CoreError::IndexOutOfRange { index, count });
        }
        let position = raster_to_position(&self.lengths(), index)?;
        let mut coordinate = Coordinate::default();
        for (axis, value) in self.order.axes().into_iter().zip(position) {
            coordinate.set(axis, value);
        }
        Ok(coordinate)
    }

    fn lengths(&self) -> [usize; 3] {
        self.order.axes().map(|axis| self.extents.size(axis))
    }
}
