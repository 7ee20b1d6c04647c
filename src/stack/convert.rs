use ndarray::{Array2, Array3, Axis};
use serde::{Deserialize, Serialize};

use crate::model::PlaneData;

use super::{Result, StackError};

/// How floating-point samples are brought into an integer range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum ScalePolicy {
    /// Keep values already inside the target range (rounded), otherwise
    /// stretch the plane's min..max over the whole range.
    #[default]
    Auto,
    /// Always stretch the plane's min..max over the whole range.
    MinMax,
    /// Round and clamp; never rescale.
    Clip,
    /// Map `min..max` onto the whole range, clamping outside values.
    Fixed { min: f32, max: f32 },
}

impl ScalePolicy {
    pub fn to_gray8(self, plane: &Array2<f32>) -> Array2<u8> {
        self.rescale(plane, f32::from(u8::MAX)).mapv(|value| value as u8)
    }

    pub fn to_gray16(self, plane: &Array2<f32>) -> Array2<u16> {
        self.rescale(plane, f32::from(u16::MAX)).mapv(|value| value as u16)
    }

    fn window(self, plane: &Array2<f32>, target_max: f32) -> Option<(f32, f32)> {
        match self {
            ScalePolicy::Clip => None,
            ScalePolicy::Fixed { min, max } => Some((min, max)),
            ScalePolicy::MinMax => Some(min_max(plane)),
            ScalePolicy::Auto => {
                let (min, max) = min_max(plane);
                if min >= 0.0 && max <= target_max {
                    None
                } else {
                    Some((min, max))
                }
            }
        }
    }

    fn rescale(self, plane: &Array2<f32>, target_max: f32) -> Array2<f32> {
        let mut output = plane.to_owned();
        match self.window(plane, target_max) {
            None => output.par_mapv_inplace(|value| value.round().clamp(0.0, target_max)),
            Some((min, max)) if (max - min).abs() < f32::EPSILON => output.fill(0.0),
            Some((min, max)) => {
                let scale = target_max / (max - min);
                output.par_mapv_inplace(|value| {
                    ((value - min) * scale).round().clamp(0.0, target_max)
                });
            }
        }
        output
    }
}

fn min_max(plane: &Array2<f32>) -> (f32, f32) {
    let mut values = plane.iter().copied().filter(|value| !value.is_nan());
    let first = values.next().unwrap_or(0.0);
    values.fold((first, first), |(min, max), value| (min.min(value), max.max(value)))
}

/// Converts any gray plane to 8 bits.
pub fn to_gray8(plane: &PlaneData, policy: ScalePolicy) -> Result<Array2<u8>> {
    match plane {
        PlaneData::Gray8(data) => Ok(data.clone()),
        PlaneData::Gray16(data) => Ok(policy.to_gray8(&data.mapv(f32::from))),
        PlaneData::Float32(data) => Ok(policy.to_gray8(data)),
        PlaneData::Rgb24(_) => Err(StackError::Compose(
            "a color plane cannot be used as a single component".into(),
        )),
    }
}

/// Composes up to three single-component planes into one RGB plane; missing
/// components stay black.
pub fn compose_rgb(components: &[PlaneData], policy: ScalePolicy) -> Result<PlaneData> {
    let first = components.first().ok_or(StackError::NoComponents)?;
    if components.len() > 3 {
        return Err(StackError::Compose(format!(
            "{} components do not fit into red, green and blue",
            components.len()
        )));
    }
    let (width, height) = first.dimensions();
    let mut rgb = Array3::<u8>::zeros((height, width, 3));
    for (sample, component) in components.iter().enumerate() {
        let (found_width, found_height) = component.dimensions();
        if (found_width, found_height) != (width, height) {
            return Err(StackError::ShapeMismatch {
                width,
                height,
                found_width,
                found_height,
            });
        }
        rgb.index_axis_mut(Axis(2), sample)
            .assign(&to_gray8(component, policy)?);
    }
    Ok(PlaneData::Rgb24(rgb))
}
