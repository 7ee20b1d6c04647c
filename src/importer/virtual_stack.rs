use tracing::debug;

use crate::dims::DimensionMapper;
use crate::formats::{PlaneReader, probe_series};
use crate::label::SliceLabeler;
use crate::model::{Coordinate, CropRegion, PixelKind, PlaneData, SeriesInfo};
use crate::select::AxisRange;
use crate::stack::{DeferredPlane, ImageStack, ScalePolicy, SliceContent, compose_rgb};

use super::{ImportError, Result};

/// Whether a merged slice of `info` can be fused into one RGB plane on
/// decode: 8-bit data with at most three channels.
pub fn fuses_on_decode(info: &SeriesInfo) -> bool {
    info.pixel_kind == PixelKind::Gray8 && info.effective_size_c <= 3
}

/// Kind of the pixels a deferred slice of `info` will decode to.
fn deferred_kind(info: &SeriesInfo, composite: bool) -> PixelKind {
    if composite || info.is_rgb() {
        PixelKind::Rgb24
    } else {
        info.pixel_kind
    }
}

/// Registers one deferred slice per plane in `planes`, in the given order.
/// Callers pass every plane of the series.
pub(crate) fn register_planes(
    info: &SeriesInfo,
    mapper: &DimensionMapper,
    labeler: &SliceLabeler,
    planes: &[usize],
    (width, height): (usize, usize),
) -> Result<ImageStack> {
    let series = info.index;
    let mut stack = ImageStack::new(deferred_kind(info, false), width, height);
    for &index in planes {
        let coordinate = mapper
            .to_coordinate(index)
            .map_err(|source| ImportError::Contract { series, source })?;
        let label = labeler
            .label(coordinate)
            .map_err(|source| ImportError::Contract { series, source })?;
        stack.push_deferred(
            label,
            coordinate,
            DeferredPlane {
                series,
                index,
                composite: false,
                channels: AxisRange::single(coordinate.c),
            },
        );
    }
    Ok(stack)
}

/// Registers one deferred slice per (Z, T) position of the series: every
/// plane of channel 0 is mapped to its index in the merged view and labeled
/// with the merged labeler. Slices are ordered by ascending merged index.
/// Composite slices fuse the `channels` selection on decode.
pub(crate) fn register_merged(
    info: &SeriesInfo,
    mapper: &DimensionMapper,
    labeler: &SliceLabeler,
    channels: AxisRange,
    (width, height): (usize, usize),
) -> Result<ImageStack> {
    let series = info.index;
    let contract = |source| ImportError::Contract { series, source };
    let merged = mapper.merged();
    let merged_labeler = labeler.merged();
    let composite = fuses_on_decode(info);

    let mut entries = Vec::new();
    for index in 0..mapper.image_count() {
        let coordinate = mapper.to_coordinate(index).map_err(contract)?;
        if coordinate.c != 0 {
            continue;
        }
        let merged_coordinate = Coordinate::new(coordinate.z, 0, coordinate.t);
        let merged_index = merged.to_linear(merged_coordinate).map_err(contract)?;
        let target = if composite { merged_index } else { index };
        entries.push((merged_index, merged_coordinate, target));
    }
    entries.sort_by_key(|(merged_index, _, _)| *merged_index);

    let mut stack = ImageStack::new(deferred_kind(info, composite), width, height);
    for (_, coordinate, index) in entries {
        let label = merged_labeler.label(coordinate).map_err(contract)?;
        stack.push_deferred(
            label,
            coordinate,
            DeferredPlane {
                series,
                index,
                composite,
                channels,
            },
        );
    }
    debug!(series, slices = stack.len(), composite, "register_merged");
    Ok(stack)
}

/// Decodes the pixels of one deferred slice. Composite slices decode their
/// selected channels at their (Z, T) position and fuse them into one RGB
/// plane.
pub fn materialize_slice<R: PlaneReader + ?Sized>(
    reader: &mut R,
    plane: &DeferredPlane,
    crop: Option<CropRegion>,
    policy: ScalePolicy,
) -> Result<PlaneData> {
    let series = plane.series;
    if !plane.composite {
        reader
            .set_series(series)
            .map_err(|source| ImportError::Reader { series, source })?;
        let components = decode(reader, series, plane.index, crop)?;
        return compose(components, series, plane.index, policy);
    }

    let info = probe_series(reader, series).map_err(|source| ImportError::Reader { series, source })?;
    let mapper = DimensionMapper::for_series(&info);
    let position = mapper
        .merged()
        .to_coordinate(plane.index)
        .map_err(|source| ImportError::Contract { series, source })?;
    let mut channels = Vec::with_capacity(plane.channels.count());
    for c in plane.channels.values() {
        let index = mapper
            .to_linear(Coordinate::new(position.z, c, position.t))
            .map_err(|source| ImportError::Contract { series, source })?;
        reader
            .set_series(series)
            .map_err(|source| ImportError::Reader { series, source })?;
        channels.extend(decode(reader, series, index, crop)?);
    }
    compose_rgb(&channels, policy).map_err(|source| ImportError::Stack {
        series,
        plane: Some(plane.index),
        source,
    })
}

/// Returns a copy of `stack` with every deferred slice decoded. `crop`
/// yields the crop region of a series.
pub fn materialize_stack<R, F>(
    reader: &mut R,
    stack: &ImageStack,
    crop: F,
    policy: ScalePolicy,
) -> Result<ImageStack>
where
    R: PlaneReader + ?Sized,
    F: Fn(usize) -> Option<CropRegion>,
{
    let mut decoded = ImageStack::new(stack.kind(), stack.width(), stack.height());
    for slice in stack.slices() {
        let (origin, plane) = match &slice.content {
            SliceContent::Pixels(plane) => (None, plane.clone()),
            SliceContent::Deferred(deferred) => (
                Some(deferred),
                materialize_slice(reader, deferred, crop(deferred.series), policy)?,
            ),
        };
        decoded
            .push(slice.label.clone(), slice.coordinate, plane)
            .map_err(|source| ImportError::Stack {
                series: origin.map_or(0, |deferred| deferred.series),
                plane: origin.map(|deferred| deferred.index),
                source,
            })?;
    }
    Ok(decoded)
}

pub(super) fn decode<R: PlaneReader + ?Sized>(
    reader: &mut R,
    series: usize,
    index: usize,
    crop: Option<CropRegion>,
) -> Result<Vec<PlaneData>> {
    let components = reader
        .decode_plane(index, crop)
        .map_err(|source| ImportError::Decode {
            series,
            plane: index,
            source,
        })?;
    if components.is_empty() {
        return Err(ImportError::EmptyPlane {
            series,
            plane: index,
        });
    }
    Ok(components)
}

fn compose(
    mut components: Vec<PlaneData>,
    series: usize,
    index: usize,
    policy: ScalePolicy,
) -> Result<PlaneData> {
    if components.len() == 1 {
        return Ok(components.remove(0));
    }
    compose_rgb(&components, policy).map_err(|source| ImportError::Stack {
        series,
        plane: Some(index),
        source,
    })
}
