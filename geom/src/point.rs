//! Coordinate spaces, tagged with `euclid` marker units the way
//! `lyon_geom` tags its `Point<S> = euclid::Point2D<S, UnknownUnit>` — here
//! the tag distinguishes user-space (`Fixed`) points from already
//! transformed, screen-space (`SFixed`) points, so the two can't be mixed
//! up at a call site.

pub use crate::fixed::{Fixed, SFixed};

/// User-space coordinates, pre-transform. Builder arguments live here.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldSpace;

/// Post-transform coordinates, as stored by a [`crate::Matrix`] and by a
/// path's point buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScreenSpace;

pub type Point = euclid::Point2D<Fixed, WorldSpace>;
pub type Vector = euclid::Vector2D<Fixed, WorldSpace>;
pub type SPoint = euclid::Point2D<SFixed, ScreenSpace>;
pub type SVector = euclid::Vector2D<SFixed, ScreenSpace>;

#[inline]
pub fn point(x: Fixed, y: Fixed) -> Point {
    euclid::Point2D::new(x, y)
}

#[inline]
pub fn vector(x: Fixed, y: Fixed) -> Vector {
    euclid::Vector2D::new(x, y)
}

#[inline]
pub fn spoint(x: SFixed, y: SFixed) -> SPoint {
    euclid::Point2D::new(x, y)
}

#[inline]
pub fn svector(x: SFixed, y: SFixed) -> SVector {
    euclid::Vector2D::new(x, y)
}
