use tracing::debug;

use super::{ImageStack, ShapeKey};

/// Something that can be grouped and merged by shape.
pub trait Concatenate {
    fn shape_key(&self) -> ShapeKey;

    /// Appends all slices of `other`, whose key equals this one.
    fn absorb(&mut self, other: Self);
}

impl Concatenate for ImageStack {
    fn shape_key(&self) -> ShapeKey {
        ImageStack::shape_key(self)
    }

    fn absorb(&mut self, other: Self) {
        self.extend_from(other);
    }
}

/// Groups items by exact `(width, height, bit depth)`, joining each item
/// into the first group seen with its key. Group order and slice order
/// follow arrival order.
pub fn concatenate<S: Concatenate>(items: Vec<S>) -> Vec<S> {
    let input = items.len();
    let mut groups: Vec<S> = Vec::new();
    for item in items {
        let key = item.shape_key();
        match groups.iter_mut().find(|group| group.shape_key() == key) {
            Some(group) => group.absorb(item),
            None => groups.push(item),
        }
    }
    debug!(input, groups = groups.len(), "concatenate");
    groups
}
