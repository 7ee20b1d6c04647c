use tracing::trace;

use crate::model::{Coordinate, PixelKind, PlaneData};

use super::{ImageStack, Result, ScalePolicy, StackError, compose_rgb};

/// Sorts decoded planes of one series into per-representation stacks.
///
/// Stacks are created lazily with the router's plane size. Float planes
/// join an existing 8-bit stack, else an existing 16-bit stack, and only
/// open a float stack of their own when neither exists.
#[derive(Debug, Clone)]
pub struct StackRouter {
    width: usize,
    height: usize,
    policy: ScalePolicy,
    gray8: Option<ImageStack>,
    gray16: Option<ImageStack>,
    float32: Option<ImageStack>,
    rgb24: Option<ImageStack>,
}

impl StackRouter {
    pub fn new(width: usize, height: usize, policy: ScalePolicy) -> Self {
        Self {
            width,
            height,
            policy,
            gray8: None,
            gray16: None,
            float32: None,
            rgb24: None,
        }
    }

    /// Routes the components of one decoded plane; several components are
    /// composed into a color plane first.
    pub fn route_components(
        &mut self,
        label: String,
        coordinate: Coordinate,
        mut components: Vec<PlaneData>,
    ) -> Result<PixelKind> {
        let plane = match components.len() {
            0 => return Err(StackError::NoComponents),
            1 => components.remove(0),
            _ => compose_rgb(&components, self.policy)?,
        };
        self.route(label, coordinate, plane)
    }

    /// Appends `plane` to its stack and returns the kind of that stack.
    pub fn route(
        &mut self,
        label: String,
        coordinate: Coordinate,
        plane: PlaneData,
    ) -> Result<PixelKind> {
        let (found_width, found_height) = plane.dimensions();
        if (found_width, found_height) != (self.width, self.height) {
            return Err(StackError::ShapeMismatch {
                width: self.width,
                height: self.height,
                found_width,
                found_height,
            });
        }

        let (width, height) = (self.width, self.height);
        let target = match plane {
            PlaneData::Gray8(_) => {
                slot(&mut self.gray8, PixelKind::Gray8, width, height).push(label, coordinate, plane)?;
                PixelKind::Gray8
            }
            PlaneData::Gray16(_) => {
                slot(&mut self.gray16, PixelKind::Gray16, width, height).push(label, coordinate, plane)?;
                PixelKind::Gray16
            }
            PlaneData::Rgb24(_) => {
                slot(&mut self.rgb24, PixelKind::Rgb24, width, height).push(label, coordinate, plane)?;
                PixelKind::Rgb24
            }
            PlaneData::Float32(values) => {
                if let Some(stack) = self.gray8.as_mut() {
                    let converted = PlaneData::Gray8(self.policy.to_gray8(&values));
                    stack.push(label, coordinate, converted)?;
                    PixelKind::Gray8
                } else if let Some(stack) = self.gray16.as_mut() {
                    let converted = PlaneData::Gray16(self.policy.to_gray16(&values));
                    stack.push(label, coordinate, converted)?;
                    PixelKind::Gray16
                } else {
                    slot(&mut self.float32, PixelKind::Float32, width, height).push(
                        label,
                        coordinate,
                        PlaneData::Float32(values),
                    )?;
                    PixelKind::Float32
                }
            }
        };
        trace!(kind = %target, z = coordinate.z, c = coordinate.c, t = coordinate.t, "route");
        Ok(target)
    }

    pub fn stack(&self, kind: PixelKind) -> Option<&ImageStack> {
        match kind {
            PixelKind::Gray8 => self.gray8.as_ref(),
            PixelKind::Gray16 => self.gray16.as_ref(),
            PixelKind::Float32 => self.float32.as_ref(),
            PixelKind::Rgb24 => self.rgb24.as_ref(),
        }
    }

    pub fn slice_count(&self) -> usize {
        PixelKind::ALL
            .iter()
            .filter_map(|kind| self.stack(*kind))
            .map(ImageStack::len)
            .sum()
    }

    /// Stacks in 8-bit, 16-bit, float, color order.
    pub fn finish(self) -> Vec<ImageStack> {
        [self.gray8, self.gray16, self.float32, self.rgb24]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn slot(
    stack: &mut Option<ImageStack>,
    kind: PixelKind,
    width: usize,
    height: usize,
) -> &mut ImageStack {
    stack.get_or_insert_with(|| ImageStack::new(kind, width, height))
}
