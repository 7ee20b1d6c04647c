//! Slice labels and stack titles.

mod builder;
mod title;

#[cfg(test)]
mod tests;

pub use builder::SliceLabeler;
pub use title::{MAX_TITLE_LENGTH, stack_title};
