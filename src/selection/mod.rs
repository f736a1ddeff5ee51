//! Selection and navigation over the table grid.
//!
//! The selection is a transient reference into current table coordinates.
//! It never survives a structural change unchecked: the editor re-resolves
//! it after every mutation, so a dangling rule or column id is never
//! observable.

mod navigation;
mod state;

pub use state::{CellRange, CellRef, Selection};
