use std::fs;

use tempfile::tempdir;

use super::{ImportOptions, OptionsError, SeriesOptions, load_options, save_document};
use crate::model::{CropRegion, DimensionOrder, Extents};
use crate::select::AxisRange;
use crate::stack::ScalePolicy;

#[test]
fn json_options_parse_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("import.json");
    fs::write(
        &path,
        r#"{
            "series": { "1": { "z": { "begin": 2, "end": 6, "step": 2 }, "crop": { "x": 0, "y": 0, "width": 8, "height": 4 } } },
            "merge_channels": true,
            "stack_order": "XYCZT",
            "scale_policy": { "mode": "fixed", "min": 0.0, "max": 10.0 }
        }"#,
    )
    .expect("write options");

    let options = load_options(&path).expect("load");
    assert!(options.merge_channels);
    assert!(!options.concatenate);
    assert_eq!(options.stack_order, Some(DimensionOrder::XYCZT));
    assert_eq!(options.scale_policy, ScalePolicy::Fixed { min: 0.0, max: 10.0 });

    let series = options.series_options(1);
    assert!(series.enabled);
    assert_eq!(series.z, Some(AxisRange::new(2, 6, 2)));
    assert_eq!(series.crop, Some(CropRegion::new(0, 0, 8, 4)));
    assert_eq!(options.series_options(0), SeriesOptions::default());
}

#[test]
fn yaml_options_parse() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("import.yml");
    fs::write(
        &path,
        "only_listed_series: true\nsplit_channels: true\nseries:\n  0:\n    c: { begin: 1, end: 1 }\n  2:\n    enabled: false\n",
    )
    .expect("write options");

    let options = load_options(&path).expect("load");
    assert!(options.is_series_enabled(0));
    assert!(!options.is_series_enabled(1));
    assert!(!options.is_series_enabled(2));
    assert!(options.split_axes().channels);
    assert!(!options.split_axes().timepoints);
    assert_eq!(options.series_options(0).c, Some(AxisRange::single(1)));
}

#[test]
fn unlisted_series_are_enabled_by_default() {
    let options = ImportOptions::default();
    assert!(options.is_series_enabled(7));
    assert_eq!(options.scale_policy, ScalePolicy::Auto);
}

#[test]
fn missing_ranges_select_whole_axes() {
    let options = SeriesOptions {
        t: Some(AxisRange::new(1, 3, 1)),
        ..SeriesOptions::default()
    };
    let ranges = options.ranges(Extents::new(4, 2, 5));
    assert_eq!(ranges.z, AxisRange::full(4));
    assert_eq!(ranges.c, AxisRange::full(2));
    assert_eq!(ranges.t.count(), 3);
}

#[test]
fn invalid_options_are_rejected() {
    let mut options = ImportOptions::default();
    options.series.insert(
        0,
        SeriesOptions {
            z: Some(AxisRange::new(3, 1, 1)),
            ..SeriesOptions::default()
        },
    );
    assert!(matches!(options.validate(), Err(OptionsError::Parse(_))));

    let options = ImportOptions {
        scale_policy: ScalePolicy::Fixed { min: 5.0, max: 5.0 },
        ..ImportOptions::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn malformed_file_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"stack_order\": \"XYQQ\" }").expect("write options");
    assert!(matches!(load_options(&path), Err(OptionsError::SerdeJson(_))));
}

#[test]
fn saved_options_load_back() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("saved.yaml");
    let mut options = ImportOptions {
        concatenate: true,
        virtual_stack: true,
        ..ImportOptions::default()
    };
    options.series.insert(3, SeriesOptions::default());
    save_document(&path, &options).expect("save");
    assert_eq!(load_options(&path).expect("load"), options);
}
