use thiserror::Error;

use crate::model::{CoreError, PixelKind};

pub type Result<T> = std::result::Result<T, StackError>;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("plane is {found_width}x{found_height} but the stack is {width}x{height}")]
    ShapeMismatch {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("cannot add a {found} plane to a {expected} stack")]
    KindMismatch { expected: PixelKind, found: PixelKind },

    #[error("cannot compose color plane: {0}")]
    Compose(String),

    #[error("decoder returned no plane components")]
    NoComponents,

    #[error("slice {index} is out of range for a stack of {len} slices")]
    SliceOutOfRange { index: usize, len: usize },

    #[error("slice {index} holds no pixel data")]
    MissingPixels { index: usize },

    #[error("core contract violation: {0}")]
    Core(#[from] CoreError),
}
