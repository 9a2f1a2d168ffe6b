//! The path data structure and its geometric builders: rectangles, rounded
//! rectangles, ellipses, unit arcs, and SVG-style endpoint arcs.
#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod builder;
mod path;

pub use path::{Bounds, CapStyle, Path, PathState};
