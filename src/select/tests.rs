use crate::dims::DimensionMapper;
use crate::model::{CoreError, DimensionOrder, Extents};

use super::{AxisRange, SeriesRanges, select_planes};

#[test]
fn selected_count_matches_product_of_axis_counts() {
    let extents = Extents::new(7, 3, 5);
    let mapper = DimensionMapper::new(DimensionOrder::XYCZT, extents);
    let cases = [
        SeriesRanges::full(extents),
        SeriesRanges {
            z: AxisRange::new(1, 6, 2),
            c: AxisRange::new(0, 2, 2),
            t: AxisRange::new(4, 4, 1),
        },
        SeriesRanges {
            z: AxisRange::new(0, 6, 4),
            c: AxisRange::single(1),
            t: AxisRange::new(0, 4, 3),
        },
    ];
    for ranges in cases {
        let selection = select_planes(&mapper, &ranges).expect("selection");
        let expected = [ranges.z, ranges.c, ranges.t]
            .iter()
            .map(|range| (range.end - range.begin) / range.step + 1)
            .product::<usize>();
        assert_eq!(selection.selected_count(), expected);
        assert_eq!(selection.indices().count(), expected);
    }
}

#[test]
fn selection_marks_linear_indices_of_the_ranges() {
    let extents = Extents::new(3, 2, 1);
    let mapper = DimensionMapper::new(DimensionOrder::XYZCT, extents);
    let ranges = SeriesRanges {
        z: AxisRange::new(0, 2, 2),
        c: AxisRange::single(1),
        t: AxisRange::full(1),
    };
    let selection = select_planes(&mapper, &ranges).expect("selection");
    assert_eq!(selection.indices().collect::<Vec<_>>(), vec![3, 5]);
    assert!(selection.contains(5));
    assert!(!selection.contains(4));
    assert!(!selection.contains(99));
}

#[test]
fn invalid_ranges_are_rejected() {
    let extents = Extents::new(3, 1, 1);
    let mapper = DimensionMapper::new(DimensionOrder::XYZCT, extents);
    for z in [
        AxisRange::new(0, 3, 1),
        AxisRange::new(2, 1, 1),
        AxisRange::new(0, 2, 0),
    ] {
        let ranges = SeriesRanges {
            z,
            ..SeriesRanges::full(extents)
        };
        assert!(matches!(
            select_planes(&mapper, &ranges),
            Err(CoreError::InvalidRange { .. })
        ));
    }
}

#[test]
fn empty_series_selects_nothing() {
    let extents = Extents::new(0, 1, 1);
    let mapper = DimensionMapper::new(DimensionOrder::XYZCT, extents);
    let selection = select_planes(&mapper, &SeriesRanges::full(extents)).expect("empty");
    assert!(selection.is_empty());
    assert_eq!(selection.image_count(), 0);
}

#[test]
fn axis_range_values_and_membership() {
    let range = AxisRange::new(2, 9, 3);
    assert_eq!(range.values().collect::<Vec<_>>(), vec![2, 5, 8]);
    assert_eq!(range.count(), 3);
    assert!(range.contains(5));
    assert!(!range.contains(6));
}

#[test]
fn axis_range_step_defaults_to_one() {
    let range: AxisRange = serde_json::from_str(r#"{"begin": 1, "end": 4}"#).expect("range");
    assert_eq!(range, AxisRange::new(1, 4, 1));
}
