use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{AxisKind, CoreError, Result};

/// Nesting of the Z, C and T axes in a linear plane index, fastest axis first.
///
/// Written the usual way as `XYZCT`, `XYCZT`, ... where the two spatial axes
/// lead and the first letter after them varies fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DimensionOrder {
    axes: [AxisKind; 3],
}

impl DimensionOrder {
    pub const XYZCT: Self = Self::from_axes([AxisKind::Z, AxisKind::Channel, AxisKind::Time]);
    pub const XYZTC: Self = Self::from_axes([AxisKind::Z, AxisKind::Time, AxisKind::Channel]);
    pub const XYCZT: Self = Self::from_axes([AxisKind::Channel, AxisKind::Z, AxisKind::Time]);
    pub const XYCTZ: Self = Self::from_axes([AxisKind::Channel, AxisKind::Time, AxisKind::Z]);
    pub const XYTZC: Self = Self::from_axes([AxisKind::Time, AxisKind::Z, AxisKind::Channel]);
    pub const XYTCZ: Self = Self::from_axes([AxisKind::Time, AxisKind::Channel, AxisKind::Z]);

    pub const ALL: [Self; 6] = [
        Self::XYZCT,
        Self::XYZTC,
        Self::XYCZT,
        Self::XYCTZ,
        Self::XYTZC,
        Self::XYTCZ,
    ];

    const fn from_axes(axes: [AxisKind; 3]) -> Self {
        Self { axes }
    }

    /// Accepts the five-letter form (`XYZCT`) and the bare three-letter form (`ZCT`).
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim().to_ascii_uppercase();
        let tail = match trimmed.len() {
            5 if trimmed.starts_with("XY") => &trimmed[2..],
            3 => trimmed.as_str(),
            _ => return Err(CoreError::InvalidDimensionOrder(value.to_string())),
        };

        let mut axes = Vec::with_capacity(3);
        for letter in tail.chars() {
            let axis = AxisKind::from_letter(letter)
                .ok_or_else(|| CoreError::InvalidDimensionOrder(value.to_string()))?;
            if axes.contains(&axis) {
                return Err(CoreError::InvalidDimensionOrder(value.to_string()));
            }
            axes.push(axis);
        }
        Ok(Self::from_axes([axes[0], axes[1], axes[2]]))
    }

    /// Axes from fastest (innermost) to slowest (outermost).
    pub fn axes(&self) -> [AxisKind; 3] {
        self.axes
    }

    pub fn position(&self, axis: AxisKind) -> usize {
        self.axes
            .iter()
            .position(|candidate| *candidate == axis)
            .unwrap_or_default()
    }
}

impl Default for DimensionOrder {
    fn default() -> Self {
        Self::XYZCT
    }
}

impl fmt::Display for DimensionOrder {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "XY")?;
        for axis in self.axes {
            write!(formatter, "{}", axis.letter())?;
        }
        Ok(())
    }
}

impl FromStr for DimensionOrder {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for DimensionOrder {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DimensionOrder> for String {
    fn from(order: DimensionOrder) -> Self {
        order.to_string()
    }
}
