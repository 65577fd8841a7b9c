//! Data model
//!
//! Designers own objects; the snapshot holds both collections and is the unit
//! of persistence.

mod designer;
mod object;
mod snapshot;

pub use designer::*;
pub use object::*;
pub use snapshot::Snapshot;
