//! Accumulating image stacks and the operations that build and combine them.

mod concat;
mod convert;
mod error;
mod image;
mod merge;
mod router;
mod split;


pub use concat::{Concatenate, concatenate};
pub use convert::{ScalePolicy, compose_rgb, to_gray8};
pub use error::{Result, StackError};
pub use image::{DeferredPlane, ImageStack, ShapeKey, Slice, SliceContent};
pub use merge::fuse_channels;
pub use router::StackRouter;
pub use split::{SplitAxes, SplitPart, split_stack};
