//! Fixed-point arithmetic, trigonometry, matrices, and the bezier/arc math
//! that the TinyVG decoder and its path builders sit on top of.
//!
//! This crate is `no_std` and performs no allocation: it only ever hands
//! points to a caller-supplied callback. See [`cubic_bezier`] and
//! [`quadratic_bezier`] for the spline flattener, [`arc`] for the SVG
//! endpoint-arc-to-center conversion, and [`fixed`]/[`angle`]/[`trig`] for
//! the numeric substrate everything else is built on.
#![no_std]

#[cfg(test)]
extern crate std;

mod angle;
pub mod arc;
pub mod cubic_bezier;
mod fixed;
mod flatten_common;
mod matrix;
mod point;
pub mod quadratic_bezier;
mod sqrt;
mod trig;

pub use angle::{Angle, ANGLE_0, ANGLE_180, ANGLE_270, ANGLE_360, ANGLE_90};
pub use fixed::{DFixed, Fixed, SFixed};
pub use matrix::Matrix;
pub use point::{point, spoint, svector, vector, Point, SPoint, SVector, ScreenSpace, Vector, WorldSpace};
pub use sqrt::sqrt;
pub use trig::{acos, atan2, cos, sin, sincos, tan};
