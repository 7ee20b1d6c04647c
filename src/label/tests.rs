use crate::model::{Coordinate, DimensionOrder, Extents, PixelKind, SeriesInfo, SubDimension};
use crate::select::{AxisRange, SeriesRanges};

use super::{MAX_TITLE_LENGTH, SliceLabeler, stack_title};

fn series(size_z: usize, size_c: usize, size_t: usize) -> SeriesInfo {
    SeriesInfo::new(
        16,
        16,
        Extents::new(size_z, size_c, size_t),
        DimensionOrder::XYZCT,
        PixelKind::Gray8,
    )
}

fn labeler(info: &SeriesInfo, name: Option<&str>) -> SliceLabeler {
    SliceLabeler::new(info, &SeriesRanges::full(info.extents()), name.map(String::from))
}

#[test]
fn z_only_label() {
    let info = series(5, 1, 1);
    let label = labeler(&info, None).label(Coordinate::new(2, 0, 0)).expect("label");
    assert_eq!(label, "z:3/5");
}

#[test]
fn name_only_label_has_no_separator() {
    let info = series(1, 1, 1);
    let label = labeler(&info, Some("Sample A"))
        .label(Coordinate::default())
        .expect("label");
    assert_eq!(label, "Sample A");
}

#[test]
fn empty_label_without_parts_or_name() {
    let info = series(1, 1, 1);
    assert_eq!(labeler(&info, None).label(Coordinate::default()).expect("label"), "");
    assert_eq!(labeler(&info, Some("   ")).label(Coordinate::default()).expect("label"), "");
}

#[test]
fn full_label_orders_channel_z_time_then_name() {
    let info = series(4, 3, 2);
    let label = labeler(&info, Some("Well B2"))
        .label(Coordinate::new(3, 1, 0))
        .expect("label");
    assert_eq!(label, "c:2/3; z:4/4; t:1/2 - Well B2");
}

#[test]
fn sub_channel_dimensions_are_listed() {
    let info = series(1, 6, 1)
        .with_channel_dims(vec![SubDimension::channel(2), SubDimension::new(3, "Lifetime")])
        .expect("dims");
    let labeler = labeler(&info, None);
    assert_eq!(labeler.label(Coordinate::new(0, 0, 0)).expect("first"), "c:1/2, Lifetime:1/3");
    assert_eq!(labeler.label(Coordinate::new(0, 3, 0)).expect("fourth"), "c:2/2, Lifetime:2/3");
    assert_eq!(labeler.label(Coordinate::new(0, 5, 0)).expect("last"), "c:2/2, Lifetime:3/3");
}

#[test]
fn parts_follow_selected_counts_not_extents() {
    let info = series(5, 2, 3);
    let ranges = SeriesRanges {
        z: AxisRange::new(0, 4, 1),
        c: AxisRange::single(1),
        t: AxisRange::single(2),
    };
    let labeler = SliceLabeler::new(&info, &ranges, None);
    assert_eq!(labeler.label(Coordinate::new(1, 1, 2)).expect("label"), "z:2/5");
}

#[test]
fn merged_labeler_collapses_channel_part() {
    let info = series(2, 3, 1);
    let merged = labeler(&info, Some("cells")).merged();
    assert_eq!(merged.label(Coordinate::new(1, 0, 0)).expect("label"), "c:1/1; z:2/2 - cells");
    assert!(merged.label(Coordinate::new(1, 1, 0)).is_err());

    let ranges = SeriesRanges {
        z: AxisRange::full(2),
        c: AxisRange::single(2),
        t: AxisRange::full(1),
    };
    let single = SliceLabeler::new(&info, &ranges, None).merged();
    assert_eq!(single.label(Coordinate::new(0, 0, 0)).expect("label"), "z:1/2");
}

#[test]
fn channel_beyond_sub_dimensions_is_an_error() {
    let info = series(1, 2, 1);
    assert!(labeler(&info, None).label(Coordinate::new(0, 2, 0)).is_err());
}

#[test]
fn title_uses_file_name_and_series_name() {
    assert_eq!(stack_title("/data/run1/cells.lif", Some("Position 3"), 4), "cells.lif - Position 3");
    assert_eq!(stack_title("/data/run1/cells.lif", Some("Position 3"), 1), "cells.lif");
    assert_eq!(stack_title("/data/run1/cells.lif", Some("cells.lif"), 4), "cells.lif");
    assert_eq!(stack_title("cells.tif", None, 4), "cells.tif");
}

#[test]
fn long_titles_are_shortened_in_the_middle() {
    let file = format!("{}.tif", "a".repeat(80));
    let title = stack_title(&file, Some(&"b".repeat(80)), 2);
    assert_eq!(title.chars().count(), 62 + 3 + 62);
    assert!(title.len() <= MAX_TITLE_LENGTH + 3);
    assert!(title.starts_with(&"a".repeat(62)));
    assert!(title.ends_with(&"b".repeat(62)));
    assert_eq!(&title[62..65], "...");
}
