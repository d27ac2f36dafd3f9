//! Preview DOM - In-memory host document for the live resume preview
//!
//! The export pipeline never owns the on-screen preview. It reads it through
//! this tree: elements and text nodes with inline and stylesheet
//! declarations, computed-style resolution with inheritance, deep cloning,
//! and attach/detach against the document body.

mod document;
mod error;
mod node_id;
mod spec;
mod style;
mod units;

pub use document::*;
pub use error::*;
pub use node_id::*;
pub use spec::*;
pub use style::*;
pub use units::*;
