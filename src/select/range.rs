use serde::{Deserialize, Serialize};

use crate::model::{AxisKind, CoreError, Extents, Result};

fn default_step() -> usize {
    1
}

/// Inclusive `begin..=end` range over one axis, taking every `step`-th value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRange {
    pub begin: usize,
    pub end: usize,
    #[serde(default = "default_step")]
    pub step: usize,
}

impl AxisRange {
    pub fn new(begin: usize, end: usize, step: usize) -> Self {
        Self { begin, end, step }
    }

    pub fn full(size: usize) -> Self {
        Self::new(0, size.saturating_sub(1), 1)
    }

    pub fn single(value: usize) -> Self {
        Self::new(value, value, 1)
    }

    pub fn validate(&self, axis: AxisKind, size: usize) -> Result<()> {
        if self.step == 0 || self.begin > self.end || self.end >= size {
            return Err(CoreError::InvalidRange {
                axis,
                begin: self.begin,
                end: self.end,
                step: self.step,
                size,
            });
        }
        Ok(())
    }

    /// Number of selected values. Only meaningful for a validated range.
    pub fn count(&self) -> usize {
        (self.end - self.begin) / self.step.max(1) + 1
    }

    pub fn values(&self) -> impl Iterator<Item = usize> + use<> {
        (self.begin..=self.end).step_by(self.step.max(1))
    }

    pub fn contains(&self, value: usize) -> bool {
        value >= self.begin && value <= self.end && (value - self.begin) % self.step.max(1) == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRanges {
    pub z: AxisRange,
    pub c: AxisRange,
    pub t: AxisRange,
}

impl SeriesRanges {
    pub fn full(extents: Extents) -> Self {
        Self {
            z: AxisRange::full(extents.size_z),
            c: AxisRange::full(extents.size_c),
            t: AxisRange::full(extents.size_t),
        }
    }

    pub fn get(&self, axis: AxisKind) -> AxisRange {
        match axis {
            AxisKind::Z => self.z,
            AxisKind::Channel => self.c,
            AxisKind::Time => self.t,
        }
    }

    pub fn validate(&self, extents: Extents) -> Result<()> {
        for axis in AxisKind::ALL {
            self.get(axis).validate(axis, extents.size(axis))?;
        }
        Ok(())
    }

    pub fn selected_count(&self) -> usize {
        self.z.count() * self.c.count() * self.t.count()
    }
}
