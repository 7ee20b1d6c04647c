use std::collections::BTreeMap;

use ndarray::Array2;

use super::{
    AxisKind, CropRegion, DimensionOrder, Extents, OriginalMetadata, PixelKind, PlaneData,
    SeriesInfo, SubDimension,
};

#[test]
fn dimension_order_parses_all_permutations() {
    for order in DimensionOrder::ALL {
        let text = order.to_string();
        assert_eq!(DimensionOrder::parse(&text).expect("parse"), order);
        assert_eq!(DimensionOrder::parse(&text[2..]).expect("short form"), order);
    }
    assert_eq!(
        DimensionOrder::parse("xyczt").expect("lowercase").axes(),
        [AxisKind::Channel, AxisKind::Z, AxisKind::Time]
    );
}

#[test]
fn dimension_order_rejects_malformed_strings() {
    for bad in ["", "XY", "XYZZT", "XYZCQ", "ABZCT", "XYZCTT"] {
        assert!(DimensionOrder::parse(bad).is_err(), "{bad} must be rejected");
    }
}

#[test]
fn dimension_order_serializes_as_string() {
    let serialized = serde_json::to_string(&DimensionOrder::XYTCZ).expect("serialize");
    assert_eq!(serialized, "\"XYTCZ\"");
    let restored: DimensionOrder = serde_json::from_str("\"XYCTZ\"").expect("deserialize");
    assert_eq!(restored, DimensionOrder::XYCTZ);
    assert!(serde_json::from_str::<DimensionOrder>("\"XYCC\"").is_err());
}

#[test]
fn plane_crop_keeps_requested_window() {
    let plane = PlaneData::Gray16(
        Array2::from_shape_vec((3, 4), (0..12).collect::<Vec<u16>>()).expect("shape"),
    );
    let cropped = plane.crop(CropRegion::new(1, 1, 2, 2)).expect("crop");
    assert_eq!(cropped.dimensions(), (2, 2));
    match cropped {
        PlaneData::Gray16(data) => assert_eq!(data.iter().copied().collect::<Vec<_>>(), [5, 6, 9, 10]),
        other => panic!("unexpected plane {other:?}"),
    }
    assert!(plane.crop(CropRegion::new(3, 0, 2, 1)).is_err());
}

#[test]
fn rgb_series_counts_effective_channels() {
    let info = SeriesInfo::new(8, 8, Extents::new(2, 3, 1), DimensionOrder::XYCZT, PixelKind::Gray8)
        .with_rgb_channels(3);
    assert!(info.is_rgb());
    assert_eq!(info.effective_size_c, 1);
    assert_eq!(info.image_count, 2);
    assert_eq!(info.extents(), Extents::new(2, 1, 1));
}

#[test]
fn channel_dims_must_cover_channels() {
    let info = SeriesInfo::new(4, 4, Extents::new(1, 6, 1), DimensionOrder::XYZCT, PixelKind::Gray8);
    assert!(
        info.clone()
            .with_channel_dims(vec![SubDimension::channel(2), SubDimension::new(3, "Lifetime")])
            .is_ok()
    );
    assert!(info.with_channel_dims(vec![SubDimension::channel(2)]).is_err());
}

#[test]
fn sub_dimension_tags() {
    assert_eq!(SubDimension::channel(3).tag(), "c");
    assert_eq!(SubDimension::new(3, "channel").tag(), "c");
    assert_eq!(SubDimension::new(3, "Lifetime").tag(), "Lifetime");
}

#[test]
fn metadata_table_sorts_core_values_first() {
    let info = SeriesInfo::new(4, 3, Extents::new(2, 1, 1), DimensionOrder::XYZCT, PixelKind::Gray16);
    let mut metadata = OriginalMetadata::new();
    let mut series = BTreeMap::new();
    series.insert("Objective".to_string(), "40x".to_string());
    let prefix = OriginalMetadata::series_prefix(None, 2, 12);
    assert_eq!(prefix, "Series 03 ");
    metadata.merge_prefixed(&series, &prefix);
    metadata.add_core_values(&prefix, &info);

    let text = metadata.to_lines(" = ");
    let first = text.lines().next().expect("first line");
    assert!(first.starts_with(" Series 03 "));
    assert!(text.contains(" Series 03 PixelType = uint16\n"));
    assert!(text.ends_with("Series 03 Objective = 40x\n"));
}

#[test]
fn series_prefix_prefers_names() {
    assert_eq!(OriginalMetadata::series_prefix(Some("Well A1"), 0, 3), "Well A1 ");
    assert_eq!(OriginalMetadata::series_prefix(Some("  "), 0, 1), "");
    assert_eq!(OriginalMetadata::series_prefix(None, 9, 10), "Series 10 ");
}

#[test]
fn metadata_roundtrip_json() {
    let mut metadata = OriginalMetadata::new();
    metadata.insert("Location", "/data/cells.tif");
    metadata.insert(" SizeZ", 12);
    let serialized = serde_json::to_string_pretty(&metadata).expect("serialize metadata");
    let restored: OriginalMetadata = serde_json::from_str(&serialized).expect("deserialize");
    assert_eq!(restored, metadata);
}
