//! Resume Model - Resume content and render style types
//!
//! This crate holds the plain data object the form editor produces and the
//! export pipeline consumes: personal details, the ordered resume sections,
//! and the style choices already baked into the on-screen preview.

mod error;
mod lines;
mod resume;
mod section;
mod style;

pub use error::*;
pub use resume::*;
pub use section::*;
pub use style::*;
