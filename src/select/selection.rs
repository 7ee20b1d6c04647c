use tracing::trace;

use crate::dims::DimensionMapper;
use crate::model::{Coordinate, Result};

use super::SeriesRanges;

/// Membership mask over the planes of one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneSelection {
    mask: Vec<bool>,
    selected: usize,
}

impl PlaneSelection {
    pub fn empty(image_count: usize) -> Self {
        Self {
            mask: vec![false; image_count],
            selected: 0,
        }
    }

    pub fn image_count(&self) -> usize {
        self.mask.len()
    }

    pub fn selected_count(&self) -> usize {
        self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    /// Selected plane indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(index, selected)| selected.then_some(index))
    }

    fn insert(&mut self, index: usize) {
        if !self.mask[index] {
            self.mask[index] = true;
            self.selected += 1;
        }
    }
}

/// Marks every plane inside `ranges`. A series without planes yields an
/// empty selection.
pub fn select_planes(mapper: &DimensionMapper, ranges: &SeriesRanges) -> Result<PlaneSelection> {
    let mut selection = PlaneSelection::empty(mapper.image_count());
    if mapper.image_count() == 0 {
        return Ok(selection);
    }
    ranges.validate(mapper.extents())?;

    for t in ranges.t.values() {
        for z in ranges.z.values() {
            for c in ranges.c.values() {
                let index = mapper.to_linear(Coordinate::new(z, c, t))?;
                selection.insert(index);
            }
        }
    }
    trace!(
        selected = selection.selected_count(),
        image_count = selection.image_count(),
        "select_planes"
    );
    Ok(selection)
}
