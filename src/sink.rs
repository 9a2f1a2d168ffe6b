//! The output side of a decode: a host-supplied rasterizer that a document
//! paints its shapes into. Decoupling the command loop from any particular
//! pixel format mirrors how a path builder doesn't know what renders it.

use tinyvg_geom::Fixed;
use tinyvg_path::Path;

use crate::color::Argb8888;

/// Receives the shapes a TinyVG document paints, already flattened into
/// device-space polylines by [`tinyvg_path::Path`].
///
/// A host with no interest in actual pixels (bounds-only tooling, tests)
/// can implement this with empty bodies.
pub trait RasterSink {
    /// Fills `path` (which may hold several subpaths, each implicitly
    /// closed by the nonzero winding rule) with a flat color.
    fn fill_path(&mut self, path: &Path, color: Argb8888);

    /// Strokes `path` with a flat color and a device-space pen width.
    fn stroke_path(&mut self, path: &Path, color: Argb8888, width: Fixed);
}

/// A [`RasterSink`] that discards everything; useful for validating a
/// document (dimensions, structure) without rendering it.
#[derive(Default)]
pub struct NullSink;

impl RasterSink for NullSink {
    fn fill_path(&mut self, _path: &Path, _color: Argb8888) {}
    fn stroke_path(&mut self, _path: &Path, _color: Argb8888, _width: Fixed) {}
}
