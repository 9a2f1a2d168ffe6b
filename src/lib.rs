//! A TinyVG v1 decoder: parses the binary format and drives a
//! caller-supplied [`RasterSink`] through [`tinyvg_path`]'s path model and
//! [`tinyvg_geom`]'s fixed-point geometry.
//!
//! Initializing a logger (`env_logger::init()` or equivalent) is the
//! embedding application's job; this crate only emits `log` records.

mod color;
mod decoder;
mod error;
mod header;
mod sink;
mod style;
mod varuint;

pub use color::Argb8888;
pub use decoder::{document_dimensions, render};
pub use error::TinyVgError;
pub use sink::{NullSink, RasterSink};
pub use style::{Gradient, Style};

pub use tinyvg_geom as geom;
pub use tinyvg_path as path;
