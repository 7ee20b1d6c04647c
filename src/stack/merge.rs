use crate::label::SliceLabeler;
use crate::model::{Coordinate, PixelKind};

use super::{ImageStack, Result, ScalePolicy, Slice, compose_rgb};

/// Fuses the channel planes at each (Z, T) of an 8-bit stack into one RGB
/// slice labeled by `labeler` (normally the merged view of the series).
///
/// Returns `None` when the stack does not qualify: not 8-bit, a channel
/// count outside 2..=3, deferred slices, or a (Z, T) position that does not
/// hold exactly `channels` slices.
pub fn fuse_channels(
    stack: &ImageStack,
    channels: usize,
    labeler: &SliceLabeler,
) -> Result<Option<ImageStack>> {
    if stack.kind() != PixelKind::Gray8
        || !(2..=3).contains(&channels)
        || stack.is_empty()
        || stack.len() % channels != 0
        || stack.is_deferred()
    {
        return Ok(None);
    }

    let mut groups: Vec<((usize, usize), Vec<&Slice>)> = Vec::new();
    for slice in stack.slices() {
        let key = (slice.coordinate.z, slice.coordinate.t);
        match groups.iter_mut().find(|(candidate, _)| *candidate == key) {
            Some((_, members)) => members.push(slice),
            None => groups.push((key, vec![slice])),
        }
    }

    let mut fused = ImageStack::new(PixelKind::Rgb24, stack.width(), stack.height());
    for ((z, t), mut members) in groups {
        if members.len() != channels {
            return Ok(None);
        }
        members.sort_by_key(|slice| slice.coordinate.c);
        let planes = members
            .iter()
            .filter_map(|slice| slice.pixels().cloned())
            .collect::<Vec<_>>();
        let plane = compose_rgb(&planes, ScalePolicy::default())?;
        let coordinate = Coordinate::new(z, 0, t);
        fused.push(labeler.label(coordinate)?, coordinate, plane)?;
    }
    Ok(Some(fused))
}
