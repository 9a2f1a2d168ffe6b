//! Paint styles: a flat color-table index, or a gradient between two.
//!
//! A gradient only honors its `color0` endpoint (§9): there is no pixel
//! shader here, so a linear or radial gradient paints as a flat fill of
//! its first stop. `color1` and both points are still parsed and carried,
//! so a future renderer with a shader can use them without a format
//! change.

use std::io::Read;

use crate::error::{Result, TinyVgError};
use crate::varuint::read_varuint;
use tinyvg_geom::Point;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gradient {
    pub point0: Point,
    pub point1: Point,
    pub color0: u32,
    pub color1: u32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Style {
    Flat(u32),
    Linear(Gradient),
    Radial(Gradient),
}

impl Style {
    /// The color table index this style paints with, under the
    /// color0-only gradient approximation.
    pub fn color_index(self) -> u32 {
        match self {
            Style::Flat(index) => index,
            Style::Linear(g) | Style::Radial(g) => g.color0,
        }
    }
}

fn check_index(index: u32, color_count: u32) -> Result<u32> {
    if index >= color_count {
        Err(TinyVgError::InvalidFormat { reason: "color index out of range" })
    } else {
        Ok(index)
    }
}

fn read_gradient<R: Read>(r: &mut R, color_count: u32, mut read_point: impl FnMut(&mut R) -> Result<Point>) -> Result<Gradient> {
    let point0 = read_point(r)?;
    let point1 = read_point(r)?;
    let color0 = check_index(read_varuint(r)?, color_count)?;
    let color1 = check_index(read_varuint(r)?, color_count)?;
    Ok(Gradient { point0, point1, color0, color1 })
}

/// Reads a style tagged by `kind` (0 = flat, 1 = linear, 2 = radial),
/// validating every color index it reads against `color_count`.
pub fn parse_style<R: Read>(r: &mut R, kind: u8, color_count: u32, read_point: impl FnMut(&mut R) -> Result<Point>) -> Result<Style> {
    match kind {
        0 => {
            let index = check_index(read_varuint(r)?, color_count)?;
            Ok(Style::Flat(index))
        }
        1 => Ok(Style::Linear(read_gradient(r, color_count, read_point)?)),
        2 => Ok(Style::Radial(read_gradient(r, color_count, read_point)?)),
        _ => Err(TinyVgError::InvalidFormat { reason: "unknown style kind" }),
    }
}
