use crate::model::{Coordinate, CoreError, DimensionOrder, Extents};

use super::{DimensionMapper, position_to_raster, raster_to_position};

#[test]
fn linear_index_roundtrips_for_every_order() {
    let extents = Extents::new(3, 2, 4);
    for order in DimensionOrder::ALL {
        let mapper = DimensionMapper::new(order, extents);
        for index in 0..mapper.image_count() {
            let coordinate = mapper.to_coordinate(index).expect("coordinate");
            assert_eq!(mapper.to_linear(coordinate).expect("index"), index, "{order}");
        }
    }
}

#[test]
fn first_axis_after_xy_varies_fastest() {
    let mapper = DimensionMapper::new(DimensionOrder::XYZCT, Extents::new(3, 2, 2));
    assert_eq!(mapper.to_coordinate(1).expect("z step"), Coordinate::new(1, 0, 0));
    assert_eq!(mapper.to_coordinate(3).expect("c step"), Coordinate::new(0, 1, 0));
    assert_eq!(mapper.to_coordinate(6).expect("t step"), Coordinate::new(0, 0, 1));

    let mapper = DimensionMapper::new(DimensionOrder::XYCTZ, Extents::new(3, 2, 2));
    assert_eq!(mapper.to_linear(Coordinate::new(0, 1, 0)).expect("c"), 1);
    assert_eq!(mapper.to_linear(Coordinate::new(0, 0, 1)).expect("t"), 2);
    assert_eq!(mapper.to_linear(Coordinate::new(1, 0, 0)).expect("z"), 4);
}

#[test]
fn out_of_range_values_are_contract_errors() {
    let mapper = DimensionMapper::new(DimensionOrder::XYZCT, Extents::new(2, 2, 2));
    assert!(matches!(
        mapper.to_coordinate(8),
        Err(CoreError::IndexOutOfRange { index: 8, count: 8 })
    ));
    assert!(matches!(
        mapper.to_linear(Coordinate::new(0, 2, 0)),
        Err(CoreError::CoordinateOutOfRange { value: 2, size: 2, .. })
    ));
}

#[test]
fn merged_view_collapses_channels() {
    let mapper = DimensionMapper::new(DimensionOrder::XYCZT, Extents::new(2, 3, 2));
    let merged = mapper.merged();
    assert_eq!(merged.image_count(), 4);
    assert_eq!(merged.to_linear(Coordinate::new(1, 0, 1)).expect("merged"), 3);
}

#[test]
fn raster_positions_are_least_significant_first() {
    let lengths = [2, 3, 4];
    assert_eq!(raster_to_position(&lengths, 0).expect("zero"), vec![0, 0, 0]);
    assert_eq!(raster_to_position(&lengths, 1).expect("one"), vec![1, 0, 0]);
    assert_eq!(raster_to_position(&lengths, 2).expect("two"), vec![0, 1, 0]);
    assert_eq!(raster_to_position(&lengths, 23).expect("last"), vec![1, 2, 3]);
    for raster in 0..24 {
        let position = raster_to_position(&lengths, raster).expect("position");
        assert_eq!(position_to_raster(&lengths, &position).expect("raster"), raster);
    }
    assert!(raster_to_position(&lengths, 24).is_err());
    assert!(position_to_raster(&lengths, &[0, 3, 0]).is_err());
    assert!(position_to_raster(&lengths, &[0, 0]).is_err());
}
