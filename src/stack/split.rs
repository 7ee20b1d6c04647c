use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

use super::ImageStack;

/// Axes along which an output stack is broken into separate stacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitAxes {
    pub channels: bool,
    pub focal_planes: bool,
    pub timepoints: bool,
}

type PartKey = (Option<usize>, Option<usize>, Option<usize>);

impl SplitAxes {
    pub fn any(&self) -> bool {
        self.channels || self.focal_planes || self.timepoints
    }

    fn key(&self, coordinate: Coordinate) -> PartKey {
        (
            self.channels.then_some(coordinate.c),
            self.focal_planes.then_some(coordinate.z),
            self.timepoints.then_some(coordinate.t),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitPart {
    /// Title suffix such as ` - C=1 - T=0`; empty when nothing was split.
    pub suffix: String,
    pub stack: ImageStack,
}

fn suffix((c, z, t): PartKey) -> String {
    let mut suffix = String::new();
    for (name, value) in [("C", c), ("Z", z), ("T", t)] {
        if let Some(value) = value {
            suffix.push_str(&format!(" - {name}={value}"));
        }
    }
    suffix
}

/// Partitions `stack` by the coordinates of the chosen axes. Parts are
/// ordered by first appearance and keep the original slice order.
pub fn split_stack(stack: ImageStack, axes: SplitAxes) -> Vec<SplitPart> {
    if !axes.any() {
        return vec![SplitPart {
            suffix: String::new(),
            stack,
        }];
    }

    let (kind, width, height) = (stack.kind(), stack.width(), stack.height());
    let mut parts: Vec<(PartKey, SplitPart)> = Vec::new();
    for slice in stack.into_slices() {
        let key = axes.key(slice.coordinate);
        let index = match parts.iter().position(|(candidate, _)| *candidate == key) {
            Some(index) => index,
            None => {
                parts.push((
                    key,
                    SplitPart {
                        suffix: suffix(key),
                        stack: ImageStack::new(kind, width, height),
                    },
                ));
                parts.len() - 1
            }
        };
        parts[index].1.stack.push_slice(slice);
    }
    parts.into_iter().map(|(_, part)| part).collect()
}
