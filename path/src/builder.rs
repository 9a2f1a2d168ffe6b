//! Geometric builders: shapes expressed as `move`/`draw`/`close` sequences
//! over [`Path`], plus the unit-arc polygon approximation they and the
//! decoder's `ARC_CIRCLE`/`ARC_ELLIPSE` path commands are built on.

use tinyvg_geom::{arc as geom_arc, cubic_bezier::flatten_cubic, quadratic_bezier::flatten_quadratic};
use tinyvg_geom::{sincos, Angle, Fixed, Point, ANGLE_270};

use crate::path::Path;

/// Number of device pixels of error the unit-arc polygon approximation is
/// allowed before another doubling of side count is warranted.
const ARC_TOLERANCE_PIXELS: i32 = 1;

impl Path {
    /// Derives the side count for a unit-arc approximation from how much
    /// the current matrix magnifies it: the matrix's maximum absolute row
    /// sum approximates the device-pixel radius of a unit circle passed
    /// through it.
    fn unit_arc_sides(&self) -> u32 {
        let m = self.current_matrix();
        let row_x = m.a.abs() + m.c.abs();
        let row_y = m.b.abs() + m.d.abs();
        let max_radius = row_x.max(row_y);

        let tolerance = Fixed::from_int(ARC_TOLERANCE_PIXELS);
        let n = max_radius.div(tolerance).round_to_int().max(1) as u32;
        n.min(1024).next_power_of_two()
    }

    /// Walks a unit circle from `start` to `start + extent` at the current
    /// matrix's resolution, emitting `(cos, sin)` samples through `draw`.
    /// Boundary samples land exactly on `start` and `start + extent`.
    fn sample_unit_arc(&mut self, start: Angle, extent: Angle) {
        let sides = self.unit_arc_sides();
        let step = tinyvg_geom::ANGLE_360 >> sides.trailing_zeros();
        let direction: i32 = if extent.units() < 0 { -1 } else { 1 };
        let step_signed = direction * step;
        let end = start.units() + extent.units();

        let mut theta = start.units();
        loop {
            let (sin_t, cos_t) = sincos(Angle(theta));
            self.draw(cos_t, sin_t);

            let reached = if direction > 0 { theta >= end } else { theta <= end };
            if reached {
                break;
            }
            theta += step_signed;
            if direction > 0 && theta > end {
                theta = end;
            }
            if direction < 0 && theta < end {
                theta = end;
            }
        }
    }

    /// A polygonal approximation of the unit arc, scaled to `(rx, ry)` and
    /// translated to `(x, y)`, under a save/restore so the caller's matrix
    /// is unaffected.
    pub fn arc(&mut self, x: Fixed, y: Fixed, rx: Fixed, ry: Fixed, start: Angle, extent: Angle) {
        self.save();
        self.scale(rx, ry);
        self.translate(x, y);
        self.sample_unit_arc(start, extent);
        self.restore();
    }

    /// SVG-style endpoint arc to a circle: recovers the center and sweep
    /// from the chord and radius, then dispatches to [`Path::arc`].
    pub fn arc_circle(&mut self, large: bool, sweep: bool, r: Fixed, p0: Point, p1: Point) {
        let (r, params) = geom_arc::circle_endpoint_to_center(large, sweep, r, p0, p1);
        self.arc(params.center.x, params.center.y, r, r, params.start, params.extent);
    }

    /// SVG-style endpoint elliptical arc: recovers the center and sweep in
    /// the ellipse's own rotated frame, then samples the unit arc under a
    /// scale/rotate/translate composed so the result is rotated about the
    /// ellipse's center rather than the origin.
    pub fn arc_ellipse(
        &mut self,
        large: bool,
        sweep: bool,
        rx: Fixed,
        ry: Fixed,
        p0: Point,
        p1: Point,
        phi: Angle,
    ) {
        let params = geom_arc::ellipse_endpoint_to_center(large, sweep, rx, ry, p0, p1, phi);
        self.save();
        self.scale(rx, ry);
        self.rotate(phi);
        self.translate(params.center.x, params.center.y);
        self.sample_unit_arc(params.start, params.extent);
        self.restore();
    }

    /// Flattens a cubic bezier from the current point through `(c1, c2)`
    /// to `end`, all in user space, entirely in device space so the
    /// flattener's tolerance is in pixels rather than user units.
    pub fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) {
        let m = self.current_matrix();
        let a = m.transform_point(self.current_point());
        let b = m.transform_point(c1);
        let c = m.transform_point(c2);
        let d = m.transform_point(end);
        flatten_cubic(a, b, c, d, &mut |p| self.push_flattened(p));
        self.set_current_point(end);
    }

    /// Flattens a quadratic bezier from the current point through `c` to
    /// `end`, the same way [`Path::cubic_to`] does for cubics.
    pub fn quad_to(&mut self, c: Point, end: Point) {
        let m = self.current_matrix();
        let a = m.transform_point(self.current_point());
        let b = m.transform_point(c);
        let d = m.transform_point(end);
        flatten_quadratic(a, b, d, &mut |p| self.push_flattened(p));
        self.set_current_point(end);
    }

    pub fn rectangle(&mut self, x: Fixed, y: Fixed, w: Fixed, h: Fixed) {
        self.move_to(x, y);
        self.draw(x + w, y);
        self.draw(x + w, y + h);
        self.draw(x, y + h);
        self.close();
    }

    /// Four quarter-arcs joined by straight edges, traversed starting on
    /// the left edge at the top-left corner and proceeding counter-
    /// clockwise (increasing angle), under a save/restore local
    /// translation to `(x, y)`.
    pub fn rounded_rectangle(&mut self, x: Fixed, y: Fixed, w: Fixed, h: Fixed, rx: Fixed, ry: Fixed) {
        self.save();
        self.translate(x, y);

        self.move_to(Fixed::ZERO, ry);
        self.arc(rx, ry, rx, ry, Angle::HALF, Angle::QUARTER);
        self.draw(w - rx, Fixed::ZERO);
        self.arc(w - rx, ry, rx, ry, Angle(ANGLE_270), Angle::QUARTER);
        self.draw(w, h - ry);
        self.arc(w - rx, h - ry, rx, ry, Angle::ZERO, Angle::QUARTER);
        self.draw(rx, h);
        self.arc(rx, h - ry, rx, ry, Angle::QUARTER, Angle::QUARTER);
        self.close();

        self.restore();
    }

    pub fn lozenge(&mut self, x: Fixed, y: Fixed, w: Fixed, h: Fixed) {
        let r = w.min(h).mul(Fixed::HALF);
        self.rounded_rectangle(x, y, w, h, r, r);
    }

    /// A rectangle with the two upper corners rounded and the two lower
    /// corners square.
    pub fn tab(&mut self, x: Fixed, y: Fixed, w: Fixed, h: Fixed, rx: Fixed, ry: Fixed) {
        self.save();
        self.translate(x, y);

        self.move_to(Fixed::ZERO, ry);
        self.arc(rx, ry, rx, ry, Angle::HALF, Angle::QUARTER);
        self.draw(w - rx, Fixed::ZERO);
        self.arc(w - rx, ry, rx, ry, Angle(ANGLE_270), Angle::QUARTER);
        self.draw(w, h);
        self.draw(Fixed::ZERO, h);
        self.close();

        self.restore();
    }

    pub fn circle(&mut self, x: Fixed, y: Fixed, r: Fixed) {
        self.ellipse(x, y, r, r);
    }

    pub fn ellipse(&mut self, x: Fixed, y: Fixed, rx: Fixed, ry: Fixed) {
        self.move_to(x + rx, y);
        self.arc(x, y, rx, ry, Angle::ZERO, Angle::FULL);
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyvg_geom::point;

    fn f(n: i32) -> Fixed {
        Fixed::from_int(n)
    }

    #[test]
    fn rectangle_has_four_corners_plus_the_closing_point() {
        let mut path = Path::new();
        path.rectangle(f(0), f(0), f(10), f(5));
        assert_eq!(path.points().len(), 5);
        assert_eq!(path.points()[0], path.points()[4]);
    }

    #[test]
    fn circle_starts_and_ends_at_the_same_point() {
        let mut path = Path::new();
        path.circle(f(0), f(0), f(10));
        assert!(path.points().len() > 2);
        assert_eq!(path.points()[0], *path.points().last().unwrap());
    }

    #[test]
    fn rounded_rectangle_closes_back_to_its_start() {
        let mut path = Path::new();
        path.rounded_rectangle(f(0), f(0), f(20), f(10), f(3), f(3));
        assert!(path.points().len() > 8);
        assert_eq!(path.points()[0], *path.points().last().unwrap());
    }

    #[test]
    fn lozenge_uses_half_the_smaller_dimension_as_radius() {
        let mut a = Path::new();
        a.lozenge(f(0), f(0), f(10), f(20));
        let mut b = Path::new();
        b.rounded_rectangle(f(0), f(0), f(10), f(20), f(5), f(5));
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn arc_circle_produces_a_polyline_from_p0_towards_p1() {
        let mut path = Path::new();
        let p0 = point(f(0), f(0));
        let p1 = point(f(10), f(0));
        path.move_to(p0.x, p0.y);
        path.arc_circle(false, false, f(10), p0, p1);
        assert!(path.points().len() >= 2);
    }

    #[test]
    fn full_turn_arc_closes_a_loop() {
        let mut path = Path::new();
        path.move_to(f(0), f(0));
        path.arc(f(0), f(0), f(1), f(1), Angle::ZERO, Angle::FULL);
        path.close();
        assert_eq!(path.points()[0], *path.points().last().unwrap());
    }
}
