//! The command loop: walks a TinyVG document's fill/stroke commands,
//! building each shape into a reusable [`Path`] and handing it to a
//! [`RasterSink`].

use std::io::Read;

use log::{debug, trace, warn};
use tinyvg_geom::{point, Angle, Fixed, Point, ANGLE_360};
use tinyvg_path::Path;

use crate::color::{self, Argb8888};
use crate::error::{Result, TinyVgError};
use crate::header::{self, Header};
use crate::sink::RasterSink;
use crate::style::{self, Style};
use crate::varuint::read_varuint;

const SENTINEL_LINE_WIDTH: Fixed = Fixed(Fixed::ONE.0 / 100); // 0.01
const SENTINEL_LINE_WIDTH_FILLED: Fixed = Fixed(Fixed::ONE.0 / 10); // 0.1

const CMD_END_DOCUMENT: u8 = 0;
const CMD_FILL_POLYGON: u8 = 1;
const CMD_FILL_RECTANGLES: u8 = 2;
const CMD_FILL_PATH: u8 = 3;
const CMD_DRAW_LINES: u8 = 4;
const CMD_DRAW_LINE_LOOP: u8 = 5;
const CMD_DRAW_LINE_STRIP: u8 = 6;
const CMD_DRAW_LINE_PATH: u8 = 7;
const CMD_OUTLINE_FILL_POLYGON: u8 = 8;
const CMD_OUTLINE_FILL_RECTANGLES: u8 = 9;
const CMD_OUTLINE_FILL_PATH: u8 = 10;

const PATH_LINE: u8 = 0;
const PATH_HLINE: u8 = 1;
const PATH_VLINE: u8 = 2;
const PATH_CUBIC: u8 = 3;
const PATH_ARC_CIRCLE: u8 = 4;
const PATH_ARC_ELLIPSE: u8 = 5;
const PATH_CLOSE: u8 = 6;
const PATH_QUAD: u8 = 7;

/// Converts a raw coordinate into a `Fixed`, dividing by `2^scale` exactly
/// via a bit shift rather than a float division: a `Fixed` already *is*
/// `value * 2^16`, so `raw / 2^scale` as `Fixed` is `raw * 2^(16 - scale)`.
fn scale_to_fixed(raw: u32, scale: u8) -> Fixed {
    let shift = 16i32 - scale as i32;
    let widened = raw as i64;
    let scaled = if shift >= 0 { widened << shift } else { widened >> (-shift) };
    Fixed(scaled as i32)
}

fn degrees_to_angle(degrees: Fixed) -> Angle {
    let units = (degrees.0 as i64 * ANGLE_360 as i64) / (360i64 << 16);
    Angle(units as i32)
}

fn substitute_zero(width: Fixed, sentinel: Fixed) -> Fixed {
    if width == Fixed::ZERO {
        sentinel
    } else {
        width
    }
}

struct Decoder<R> {
    reader: R,
    header: Header,
    colors: Vec<Argb8888>,
    path: Path,
}

impl<R: Read> Decoder<R> {
    fn read_byte(&mut self) -> Result<u8> {
        let mut b = [0u8; 1];
        self.reader.read_exact(&mut b)?;
        Ok(b[0])
    }

    fn read_varuint(&mut self) -> Result<u32> {
        read_varuint(&mut self.reader)
    }

    fn read_unit(&mut self) -> Result<Fixed> {
        let raw = header::read_raw_coord(&mut self.reader, self.header.coord_range)?;
        Ok(scale_to_fixed(raw, self.header.scale))
    }

    fn read_point(&mut self) -> Result<Point> {
        let x = self.read_unit()?;
        let y = self.read_unit()?;
        Ok(point(x, y))
    }

    fn read_style(&mut self, kind: u8) -> Result<Style> {
        let count = self.colors.len() as u32;
        // `parse_style` needs to read points for gradients but can't hold
        // a borrow of `self`; thread the byte source through a closure
        // instead of the whole decoder.
        let reader = &mut self.reader;
        let range = self.header.coord_range;
        let scale = self.header.scale;
        style::parse_style(reader, kind, count, |r| {
            let raw_x = header::read_raw_coord(r, range)?;
            let raw_y = header::read_raw_coord(r, range)?;
            Ok(point(scale_to_fixed(raw_x, scale), scale_to_fixed(raw_y, scale)))
        })
    }

    fn color_of(&self, style: Style) -> Argb8888 {
        self.colors[style.color_index() as usize]
    }

    fn paint_fill<S: RasterSink>(&mut self, sink: &mut S, style: Style) {
        self.path.finalize();
        sink.fill_path(&self.path, self.color_of(style));
    }

    fn paint_stroke<S: RasterSink>(&mut self, sink: &mut S, style: Style, width: Fixed) {
        self.path.finalize();
        sink.stroke_path(&self.path, self.color_of(style), width);
    }

    /// Reads one rectangle: point, width, height.
    fn read_rect(&mut self) -> Result<(Point, Fixed, Fixed)> {
        let origin = self.read_point()?;
        let w = self.read_unit()?;
        let h = self.read_unit()?;
        Ok((origin, w, h))
    }

    /// Reads `size` subpath lengths, then parses that many subpaths into
    /// `self.path`, appending (not replacing) whatever's already there.
    fn read_path_tape(&mut self, size: u32) -> Result<()> {
        let mut lengths = Vec::new();
        lengths.try_reserve_exact(size as usize).map_err(|_| TinyVgError::OutOfMemory)?;
        for _ in 0..size {
            lengths.push(self.read_varuint()? + 1);
        }
        for len in lengths {
            self.parse_subpath(len)?;
        }
        Ok(())
    }

    fn parse_subpath(&mut self, commands: u32) -> Result<()> {
        let start = self.read_point()?;
        self.path.move_to(start.x, start.y);

        for _ in 0..commands {
            let cmd = self.read_byte()?;
            let index = cmd & 0x07;
            let has_line_width = (cmd >> 4) & 0x01 != 0;
            if has_line_width {
                // Per-segment line width isn't modeled by this path ABI
                // (the sink strokes a whole path at one width); read and
                // discard it the way the rest of the decoder treats
                // fields it has no representation for.
                self.read_unit()?;
            }

            match index {
                PATH_LINE => {
                    let p = self.read_point()?;
                    self.path.draw(p.x, p.y);
                }
                PATH_HLINE => {
                    let x = self.read_unit()?;
                    let y = self.path.current_point().y;
                    self.path.draw(x, y);
                }
                PATH_VLINE => {
                    let y = self.read_unit()?;
                    let x = self.path.current_point().x;
                    self.path.draw(x, y);
                }
                PATH_CUBIC => {
                    let c1 = self.read_point()?;
                    let c2 = self.read_point()?;
                    let end = self.read_point()?;
                    self.path.cubic_to(c1, c2, end);
                }
                PATH_ARC_CIRCLE => {
                    let d = self.read_byte()?;
                    let radius = self.read_unit()?;
                    let end = self.read_point()?;
                    let start = self.path.current_point();
                    self.path.arc_circle(d & 0x01 != 0, (d >> 1) & 0x01 != 0, radius, start, end);
                }
                PATH_ARC_ELLIPSE => {
                    let d = self.read_byte()?;
                    let rx = self.read_unit()?;
                    let ry = self.read_unit()?;
                    let rotation = self.read_unit()?;
                    let end = self.read_point()?;
                    let start = self.path.current_point();
                    self.path.arc_ellipse(
                        d & 0x01 != 0,
                        (d >> 1) & 0x01 != 0,
                        rx,
                        ry,
                        start,
                        end,
                        degrees_to_angle(rotation),
                    );
                }
                PATH_CLOSE => {
                    self.path.draw(start.x, start.y);
                }
                PATH_QUAD => {
                    let c = self.read_point()?;
                    let end = self.read_point()?;
                    self.path.quad_to(c, end);
                }
                _ => return Err(TinyVgError::InvalidFormat { reason: "unknown path command" }),
            }
        }
        Ok(())
    }

    fn run_command<S: RasterSink>(&mut self, cmd: u8, sink: &mut S) -> Result<bool> {
        let index = cmd & 0x3F;
        let fill_kind = (cmd >> 6) & 0x03;

        match index {
            CMD_END_DOCUMENT => return Ok(false),
            CMD_FILL_POLYGON => {
                let count = self.read_varuint()? + 1;
                let style = self.read_style(fill_kind)?;
                let first = self.read_point()?;
                self.path.move_to(first.x, first.y);
                for _ in 1..count {
                    let p = self.read_point()?;
                    self.path.draw(p.x, p.y);
                }
                self.path.close();
                self.paint_fill(sink, style);
                self.path.empty();
            }
            CMD_FILL_RECTANGLES => {
                let count = self.read_varuint()? + 1;
                let style = self.read_style(fill_kind)?;
                for _ in 0..count {
                    let (origin, w, h) = self.read_rect()?;
                    self.path.rectangle(origin.x, origin.y, w, h);
                    self.paint_fill(sink, style);
                    self.path.empty();
                }
            }
            CMD_FILL_PATH => {
                let size = self.read_varuint()? + 1;
                let style = self.read_style(fill_kind)?;
                self.read_path_tape(size)?;
                self.paint_fill(sink, style);
                self.path.empty();
            }
            CMD_DRAW_LINES => {
                let count = self.read_varuint()? + 1;
                let style = self.read_style(fill_kind)?;
                let width = self.read_unit()?;
                for _ in 0..count {
                    let a = self.read_point()?;
                    let b = self.read_point()?;
                    self.path.move_to(a.x, a.y);
                    self.path.draw(b.x, b.y);
                }
                self.paint_stroke(sink, style, substitute_zero(width, SENTINEL_LINE_WIDTH));
                self.path.empty();
            }
            CMD_DRAW_LINE_LOOP | CMD_DRAW_LINE_STRIP => {
                let count = self.read_varuint()? + 1;
                let style = self.read_style(fill_kind)?;
                let width = self.read_unit()?;
                let first = self.read_point()?;
                self.path.move_to(first.x, first.y);
                for _ in 1..count {
                    let p = self.read_point()?;
                    self.path.draw(p.x, p.y);
                }
                if index == CMD_DRAW_LINE_LOOP {
                    self.path.close();
                }
                self.paint_stroke(sink, style, substitute_zero(width, SENTINEL_LINE_WIDTH));
                self.path.empty();
            }
            CMD_DRAW_LINE_PATH => {
                let size = self.read_varuint()? + 1;
                let style = self.read_style(fill_kind)?;
                let width = self.read_unit()?;
                self.read_path_tape(size)?;
                self.paint_stroke(sink, style, substitute_zero(width, SENTINEL_LINE_WIDTH));
                self.path.empty();
            }
            CMD_OUTLINE_FILL_POLYGON => {
                let d = self.read_byte()?;
                let count = (d as u32 & 0x3F) + 1;
                let line_kind = (d >> 6) & 0x03;
                let fill_style = self.read_style(fill_kind)?;
                let line_style = self.read_style(line_kind)?;
                let width = self.read_unit()?;
                let first = self.read_point()?;
                self.path.move_to(first.x, first.y);
                for _ in 1..count {
                    let p = self.read_point()?;
                    self.path.draw(p.x, p.y);
                }
                self.path.close();
                self.paint_fill(sink, fill_style);
                self.paint_stroke(sink, line_style, substitute_zero(width, SENTINEL_LINE_WIDTH));
                self.path.empty();
            }
            CMD_OUTLINE_FILL_RECTANGLES => {
                let d = self.read_byte()?;
                let count = (d as u32 & 0x3F) + 1;
                let line_kind = (d >> 6) & 0x03;
                let fill_style = self.read_style(fill_kind)?;
                let line_style = self.read_style(line_kind)?;
                let width = self.read_unit()?;
                let width = substitute_zero(width, SENTINEL_LINE_WIDTH);
                for _ in 0..count {
                    let (origin, w, h) = self.read_rect()?;
                    self.path.rectangle(origin.x, origin.y, w, h);
                    self.paint_fill(sink, fill_style);
                    self.paint_stroke(sink, line_style, width);
                    self.path.empty();
                }
            }
            CMD_OUTLINE_FILL_PATH => {
                let d = self.read_byte()?;
                let size = (d as u32 & 0x3F) + 1;
                let line_kind = (d >> 6) & 0x03;
                let fill_style = self.read_style(fill_kind)?;
                let line_style = self.read_style(line_kind)?;
                let width = self.read_unit()?;
                self.read_path_tape(size)?;
                self.paint_fill(sink, fill_style);
                self.paint_stroke(sink, line_style, substitute_zero(width, SENTINEL_LINE_WIDTH_FILLED));
                self.path.empty();
            }
            _ => {
                warn!("unknown command id {index}");
                return Err(TinyVgError::InvalidFormat { reason: "unknown command id" });
            }
        }
        Ok(true)
    }
}

/// Parses only the header, returning `(width, height)` without touching
/// the color table or command stream.
pub fn document_dimensions<R: Read>(mut r: R) -> Result<(u32, u32)> {
    let header = header::parse_header(&mut r)?;
    Ok((header.width, header.height))
}

/// Fully decodes a document, painting every shape into `sink`.
pub fn render<R: Read, S: RasterSink>(mut r: R, sink: &mut S) -> Result<()> {
    let header = header::parse_header(&mut r)?;
    debug!("decoding {}x{} document", header.width, header.height);
    let colors = color::parse_color_table(&mut r, header.color_encoding)?;

    let mut decoder = Decoder { reader: r, header, colors, path: Path::new() };

    loop {
        let cmd = decoder.read_byte()?;
        trace!("command byte {cmd:#04x}");
        if !decoder.run_command(cmd, sink)? {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    // magic, v1, scale=0 enc=U8888 range=REDUCED, w=16 h=16, 1 color red, END.
    // Width/height are one byte each under REDUCED, and the color-table
    // count is a plain (non-biased) VarUInt, per the header format.
    const SCENARIO_1: &[u8] =
        &[0x72, 0x56, 0x01, 0x40, 0x10, 0x10, 0x01, 0xFF, 0x00, 0x00, 0xFF, 0x00];

    #[test]
    fn document_dimensions_reads_only_the_header() {
        let (w, h) = document_dimensions(SCENARIO_1).unwrap();
        assert_eq!((w, h), (16, 16));
    }

    #[test]
    fn render_an_empty_document_paints_nothing_and_succeeds() {
        let mut sink = NullSink;
        assert!(render(SCENARIO_1, &mut sink).is_ok());
    }

    #[test]
    fn rejects_an_unknown_command_id() {
        let mut data = SCENARIO_1[..SCENARIO_1.len() - 1].to_vec();
        data.push(63); // command id 63, not a defined command
        let mut sink = NullSink;
        assert!(matches!(render(&data[..], &mut sink), Err(TinyVgError::InvalidFormat { .. })));
    }

    #[test]
    fn scale_to_fixed_matches_plain_division() {
        assert_eq!(scale_to_fixed(16, 0), Fixed::from_int(16));
        assert_eq!(scale_to_fixed(16, 4), Fixed::ONE); // 16 / 2^4 == 1
    }

    #[test]
    fn zero_line_width_is_replaced_by_the_sentinel() {
        assert_eq!(substitute_zero(Fixed::ZERO, SENTINEL_LINE_WIDTH), SENTINEL_LINE_WIDTH);
        assert_eq!(substitute_zero(Fixed::ONE, SENTINEL_LINE_WIDTH), Fixed::ONE);
    }
}
