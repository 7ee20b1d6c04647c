use image::{ImageBuffer, Luma, Rgb};
use ndarray::Array2;
use tempfile::tempdir;

use super::{
    DefaultCodec, IoError, MemoryReader, MemorySeries, MetadataStore, PlaneReader, SeriesSource,
    StackSink, open_files, probe_series, read_series, write_stack_tiff,
};
use crate::model::{Coordinate, CropRegion, DimensionOrder, PixelKind, PlaneData};
use crate::stack::ImageStack;

fn gray16_stack(values: &[[u16; 4]]) -> ImageStack {
    let mut stack = ImageStack::new(PixelKind::Gray16, 2, 2);
    for (z, page) in values.iter().enumerate() {
        let plane = Array2::from_shape_vec((2, 2), page.to_vec()).expect("shape");
        stack
            .push(format!("z:{}/{}", z + 1, values.len()), Coordinate::new(z, 0, 0), PlaneData::Gray16(plane))
            .expect("push");
    }
    stack
}

#[test]
fn tiff_stack_roundtrip_keeps_pages_and_type() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("stack.tif");
    let stack = gray16_stack(&[[0, 1, 2, 3], [100, 200, 300, 65_535]]);
    write_stack_tiff(&path, &stack).expect("write tiff");

    let series = read_series(&path).expect("read tiff");
    assert_eq!((series.size_x, series.size_y, series.size_z), (2, 2, 2));
    assert_eq!(series.pixel_kind, PixelKind::Gray16);
    assert_eq!(series.planes[1][0], stack.slices()[1].pixels().cloned().expect("pixels"));
    assert_eq!(series.source.as_deref(), Some(path.as_path()));
}

#[test]
fn tiff_float_pages_stay_float() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("float.tiff");
    let mut stack = ImageStack::new(PixelKind::Float32, 2, 1);
    stack
        .push(
            "z:1/1".into(),
            Coordinate::default(),
            PlaneData::Float32(Array2::from_shape_vec((1, 2), vec![-0.5, 2.25]).expect("shape")),
        )
        .expect("push");
    DefaultCodec.write(&path, &stack).expect("write");
    let series = DefaultCodec.read(&path).expect("read");
    assert_eq!(series.pixel_kind, PixelKind::Float32);
    assert_eq!(series.image_count(), 1);
}

#[test]
fn deferred_stacks_cannot_be_written() {
    let dir = tempdir().expect("tempdir");
    let mut stack = ImageStack::new(PixelKind::Gray8, 2, 2);
    stack.push_deferred(
        "z:1/1".into(),
        Coordinate::default(),
        crate::stack::DeferredPlane {
            series: 0,
            index: 0,
            composite: false,
            channels: crate::select::AxisRange::single(0),
        },
    );
    let err = write_stack_tiff(dir.path().join("deferred.tif"), &stack).expect_err("must fail");
    assert!(err.to_string().contains("has not been decoded"));
}

#[test]
fn png_color_becomes_rgb_series() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("color.png");
    let mut image = ImageBuffer::<Rgb<u8>, Vec<u8>>::new(2, 1);
    image.put_pixel(0, 0, Rgb([255, 0, 0]));
    image.put_pixel(1, 0, Rgb([0, 255, 0]));
    image.save(&path).expect("save png");

    let series = read_series(&path).expect("read png");
    assert_eq!(series.pixel_kind, PixelKind::Rgb24);
    assert_eq!(series.size_c, 3);
    assert_eq!(series.effective_size_c(), 1);
    assert_eq!(series.image_count(), 1);
}

#[test]
fn png_gray_becomes_gray8_series() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("gray.png");
    let image =
        ImageBuffer::<Luma<u8>, Vec<u8>>::from_vec(2, 2, vec![0, 50, 100, 255]).expect("image");
    image.save(&path).expect("save png");

    let series = read_series(&path).expect("read png");
    assert_eq!(series.pixel_kind, PixelKind::Gray8);
    match &series.planes[0][0] {
        PlaneData::Gray8(data) => assert_eq!(data.iter().copied().collect::<Vec<_>>(), [0, 50, 100, 255]),
        other => panic!("unexpected plane {other:?}"),
    }
}

#[test]
fn unknown_extensions_are_rejected() {
    let err = read_series("notes.txt").expect_err("must fail");
    assert!(matches!(err, IoError::UnsupportedFormat(ref ext) if ext == "txt"));
    assert!(!SeriesSource::supports_extension(&DefaultCodec, "txt"));
    assert!(!StackSink::supports_extension(&DefaultCodec, "png"));
}

#[test]
fn open_files_yields_one_series_per_file() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("a.tif");
    let second = dir.path().join("b.tif");
    write_stack_tiff(&first, &gray16_stack(&[[1, 2, 3, 4]])).expect("write a");
    write_stack_tiff(&second, &gray16_stack(&[[5, 6, 7, 8], [9, 10, 11, 12]])).expect("write b");

    let mut reader = open_files(&[&first, &second]).expect("open");
    assert_eq!(reader.series_count(), 2);
    assert_eq!(reader.used_files(), vec![first.clone(), second.clone()]);
    reader.set_series(1).expect("select");
    assert_eq!(reader.size_z(), 2);
}

#[test]
fn memory_reader_decodes_and_crops() {
    let series = MemorySeries::synthetic(4, 3, (2, 1, 1), "XYZCT", PixelKind::Gray8);
    let mut reader = MemoryReader::new(vec![series]);
    let full = reader.decode_plane(1, None).expect("decode");
    assert_eq!(full[0].dimensions(), (4, 3));
    let cropped = reader
        .decode_plane(1, Some(CropRegion::new(1, 1, 2, 2)))
        .expect("crop");
    assert_eq!(cropped[0], PlaneData::Gray8(Array2::from_elem((2, 2), 1)));
    assert_eq!(reader.decode_log(), &[(0, 1), (0, 1)]);

    let err = reader.decode_plane(5, None).expect_err("out of range");
    assert!(matches!(err, IoError::PlaneOutOfRange { index: 5, count: 2, .. }));
    assert!(reader.decode_plane(0, Some(CropRegion::new(3, 0, 2, 2))).is_err());
}

#[test]
fn memory_reader_rejects_unknown_series() {
    let mut reader = MemoryReader::new(vec![MemorySeries::synthetic(
        2,
        2,
        (1, 1, 1),
        "XYZCT",
        PixelKind::Gray8,
    )]);
    let err = reader.set_series(3).expect_err("must fail");
    assert!(matches!(err, IoError::SeriesOutOfRange { series: 3, count: 1 }));
}

#[test]
fn empty_memory_reader_answers_queries_without_series() {
    let mut reader = MemoryReader::default();
    assert_eq!(reader.series_count(), 0);
    assert_eq!(reader.image_count(), 0);
    assert_eq!(reader.size_x(), 0);
    assert!(reader.channel_dim_lengths().is_empty());
    assert!(reader.series_metadata().is_empty());
    let err = reader.decode_plane(0, None).expect_err("no series");
    assert!(matches!(err, IoError::SeriesOutOfRange { series: 0, count: 0 }));
    assert!(reader.lookup_table(0).is_err());
}

#[test]
fn probe_reads_geometry_of_selected_series() {
    let first = MemorySeries::synthetic(2, 2, (1, 1, 1), "XYZCT", PixelKind::Gray8);
    let second = MemorySeries::synthetic(6, 5, (3, 2, 4), "XYCTZ", PixelKind::Gray16)
        .with_name("Well B2");
    let mut reader = MemoryReader::new(vec![first, second]);

    let info = probe_series(&mut reader, 1).expect("probe");
    assert_eq!(reader.series(), 1);
    assert_eq!((info.size_x, info.size_y), (6, 5));
    assert_eq!(info.dimension_order, DimensionOrder::XYCTZ);
    assert_eq!(info.image_count, 24);
    assert_eq!(info.channel_dims.len(), 1);
    assert!(info.channel_dims[0].is_channel());
    assert_eq!(reader.series_name(1).as_deref(), Some("Well B2"));
    assert_eq!(reader.series_name(0), None);
}

#[test]
fn probe_rejects_bad_dimension_order() {
    let series = MemorySeries::synthetic(2, 2, (1, 1, 1), "XYZQT", PixelKind::Gray8);
    let mut reader = MemoryReader::new(vec![series]);
    let err = probe_series(&mut reader, 0).expect_err("must fail");
    assert!(matches!(err, IoError::Core(_)));
}

#[test]
fn probe_accepts_channel_sub_dimensions() {
    let series = MemorySeries::synthetic(2, 2, (1, 6, 1), "XYZCT", PixelKind::Gray8)
        .with_channel_dims(vec![2, 3], vec!["Channel".into(), "Lifetime".into()]);
    let mut reader = MemoryReader::new(vec![series]);
    let info = probe_series(&mut reader, 0).expect("probe");
    assert_eq!(info.channel_dims.len(), 2);
    assert_eq!(info.channel_dims[1].tag(), "Lifetime");
}
