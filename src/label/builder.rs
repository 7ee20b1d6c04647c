use crate::dims::raster_to_position;
use crate::model::{Coordinate, Result, SeriesInfo, SubDimension};
use crate::select::SeriesRanges;

/// Builds the per-slice label of one series.
///
/// Parts appear in channel, Z, T order, each only when more than one value
/// of that axis is selected, joined with `"; "`. A non-blank series name is
/// appended last as `" - name"`, or stands alone when no part was emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceLabeler {
    channel_dims: Vec<SubDimension>,
    size_z: usize,
    size_t: usize,
    z_count: usize,
    c_count: usize,
    t_count: usize,
    series_name: Option<String>,
}

impl SliceLabeler {
    pub fn new(info: &SeriesInfo, ranges: &SeriesRanges, series_name: Option<String>) -> Self {
        let channel_dims = if info.channel_dims.is_empty() {
            vec![SubDimension::channel(info.effective_size_c)]
        } else {
            info.channel_dims.clone()
        };
        Self {
            channel_dims,
            size_z: info.size_z,
            size_t: info.size_t,
            z_count: ranges.z.count(),
            c_count: ranges.c.count(),
            t_count: ranges.t.count(),
            series_name: series_name.filter(|name| !name.trim().is_empty()),
        }
    }

    /// Labeler for the series seen with all channels fused into one. The
    /// selected channel count still decides whether the channel part appears.
    pub fn merged(&self) -> Self {
        Self {
            channel_dims: vec![SubDimension::channel(1)],
            ..self.clone()
        }
    }

    pub fn series_name(&self) -> Option<&str> {
        self.series_name.as_deref()
    }

    pub fn label(&self, coordinate: Coordinate) -> Result<String> {
        let mut parts = Vec::with_capacity(3);
        if self.c_count > 1 {
            let lengths = self
                .channel_dims
                .iter()
                .map(|dimension| dimension.length)
                .collect::<Vec<_>>();
            let position = raster_to_position(&lengths, coordinate.c)?;
            let channel = self
                .channel_dims
                .iter()
                .zip(position)
                .map(|(dimension, value)| {
                    format!("{}:{}/{}", dimension.tag(), value + 1, dimension.length)
                })
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(channel);
        }
        if self.z_count > 1 {
            parts.push(format!("z:{}/{}", coordinate.z + 1, self.size_z));
        }
        if self.t_count > 1 {
            parts.push(format!("t:{}/{}", coordinate.t + 1, self.size_t));
        }

        let mut label = parts.join("; ");
        if let Some(name) = &self.series_name {
            if !label.is_empty() {
                label.push_str(" - ");
            }
            label.push_str(name);
        }
        Ok(label)
    }
}
