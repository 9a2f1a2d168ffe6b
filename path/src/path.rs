//! The path data structure: a flat buffer of device-space points split into
//! subpaths, plus the transform and paint state `save`/`restore` snapshot.

use alloc::vec::Vec;
use core::mem;

use tinyvg_geom::{point, Angle, Fixed, Matrix, Point, SFixed, SPoint};

/// Stroke end-cap style, carried through `save`/`restore` alongside the
/// matrix. The decoder doesn't vary this per TinyVG has no line-cap
/// encoding of its own, but the path model keeps the field so a host
/// embedding richer paint state doesn't need a second save/restore stack.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CapStyle {
    #[default]
    Butt,
    Round,
    Square,
}

/// The part of a path's state that `save`/`restore` snapshots.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathState {
    pub matrix: Matrix,
    pub font_size: Fixed,
    pub font_style: u8,
    pub cap_style: CapStyle,
}

impl Default for PathState {
    fn default() -> PathState {
        PathState {
            matrix: Matrix::IDENTITY,
            font_size: Fixed::ZERO,
            font_style: 0,
            cap_style: CapStyle::Butt,
        }
    }
}

/// Integer-pixel bounding rectangle; `{0, 0, 0, 0}` for an empty path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

fn ceil_to_pixel(s: SFixed) -> i32 {
    -((-s).floor_to_pixel())
}

/// A recorded sequence of subpaths, already flattened into device-space
/// points by whatever matrix was current when each point was appended.
///
/// `points` holds every vertex back to back; `sublens` holds, for each
/// *finished* subpath in order, the index one past its last point —
/// cumulative and monotonically increasing, so the k-th subpath's points
/// are `points[sublens[k-1]..sublens[k]]` (or `points[..sublens[0]]` for
/// the first). The subpath currently being built (since the last `move`)
/// isn't in `sublens` yet; its length is `points.len() - current_start`.
#[derive(Clone)]
pub struct Path {
    points: Vec<SPoint>,
    sublens: Vec<u32>,
    current_start: usize,
    current_user: Point,
    state: PathState,
    saved: Vec<PathState>,
}

impl Default for Path {
    fn default() -> Path {
        Path::new()
    }
}

impl Path {
    pub fn new() -> Path {
        Path {
            points: Vec::new(),
            sublens: Vec::new(),
            current_start: 0,
            current_user: point(Fixed::ZERO, Fixed::ZERO),
            state: PathState::default(),
            saved: Vec::new(),
        }
    }

    pub fn points(&self) -> &[SPoint] {
        &self.points
    }

    /// Cumulative one-past-end index of each finalized subpath's points.
    pub fn sublens(&self) -> &[u32] {
        &self.sublens
    }

    fn try_push_point(&mut self, p: SPoint) -> bool {
        if self.points.len() == self.points.capacity() {
            let target = if self.points.capacity() == 0 { 16 } else { self.points.capacity() * 2 };
            if self.points.try_reserve_exact(target - self.points.len()).is_err() {
                return false;
            }
        }
        self.points.push(p);
        true
    }

    fn try_push_sublen(&mut self, len: u32) -> bool {
        if self.sublens.len() == self.sublens.capacity() {
            let target = if self.sublens.capacity() == 0 { 1 } else { self.sublens.capacity() * 2 };
            if self.sublens.try_reserve_exact(target - self.sublens.len()).is_err() {
                return false;
            }
        }
        self.sublens.push(len);
        true
    }

    /// Seals off the subpath currently being built. A length-0 run is a
    /// no-op; a singleton (a lone `move` with no `draw`) is dropped
    /// entirely rather than finalized; anything longer records the index
    /// one past its last point in `sublens`.
    fn finalize_current_subpath(&mut self) -> bool {
        let len = self.points.len() - self.current_start;
        if len == 1 {
            self.points.pop();
        } else if len >= 2 {
            if !self.try_push_sublen(self.points.len() as u32) {
                return false;
            }
        }
        self.current_start = self.points.len();
        true
    }

    /// Seals off the subpath currently being built, so `sublens` accounts
    /// for every subpath including the trailing one. Callers about to
    /// hand the path to a sink should call this first: otherwise the
    /// pending subpath's points are present but its boundary is not.
    pub fn finalize(&mut self) {
        self.finalize_current_subpath();
    }

    pub fn move_to(&mut self, x: Fixed, y: Fixed) {
        if !self.finalize_current_subpath() {
            return;
        }
        let user = point(x, y);
        let device = self.state.matrix.transform_point(user);
        if self.try_push_point(device) {
            self.current_user = user;
        }
    }

    pub fn rmove(&mut self, dx: Fixed, dy: Fixed) {
        let x = self.current_user.x + dx;
        let y = self.current_user.y + dy;
        self.move_to(x, y);
    }

    /// Appends `(x, y)` to the current subpath, skipping it if it would
    /// duplicate the last point already stored.
    pub fn draw(&mut self, x: Fixed, y: Fixed) {
        let user = point(x, y);
        let device = self.state.matrix.transform_point(user);
        self.current_user = user;
        if self.points.last() == Some(&device) {
            return;
        }
        self.try_push_point(device);
    }

    pub fn rdraw(&mut self, dx: Fixed, dy: Fixed) {
        let x = self.current_user.x + dx;
        let y = self.current_user.y + dy;
        self.draw(x, y);
    }

    /// The current subpath's pen position, in user space.
    pub fn current_point(&self) -> Point {
        self.current_user
    }

    /// Sets the pen position without appending a point, for builders that
    /// flatten a curve directly into device space and need to leave the
    /// pen at the curve's (user-space) endpoint afterwards.
    pub(crate) fn set_current_point(&mut self, p: Point) {
        self.current_user = p;
    }

    /// Appends an already device-space point, skipping it if it would
    /// duplicate the last point stored. Used by curve flatteners, which
    /// work entirely in device space so their tolerance is in pixels.
    pub(crate) fn push_flattened(&mut self, p: SPoint) {
        if self.points.last() == Some(&p) {
            return;
        }
        self.try_push_point(p);
    }

    /// Closes the current subpath by repeating its first point, if it has
    /// at least two points already.
    pub fn close(&mut self) {
        let len = self.points.len() - self.current_start;
        if len >= 2 {
            let first = self.points[self.current_start];
            self.try_push_point(first);
        }
    }

    pub fn empty(&mut self) {
        self.points.clear();
        self.sublens.clear();
        self.current_start = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copies `src`'s points into `self`, preserving `src`'s subpath
    /// boundaries (including its not-yet-finalized trailing subpath, which
    /// carries over as `self`'s own pending subpath rather than being
    /// finalized early).
    pub fn append(&mut self, src: &Path) {
        if !self.finalize_current_subpath() {
            return;
        }
        let mut start = 0usize;
        for &end in &src.sublens {
            let end = end as usize;
            for &p in &src.points[start..end] {
                if !self.try_push_point(p) {
                    return;
                }
            }
            if !self.finalize_current_subpath() {
                return;
            }
            start = end;
        }
        self.current_start = self.points.len();
        for &p in &src.points[start..] {
            if !self.try_push_point(p) {
                return;
            }
        }
    }

    pub fn bounds(&self) -> Bounds {
        if self.points.is_empty() {
            return Bounds::default();
        }
        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        for p in &self.points {
            min_x = min_x.min(p.x.floor_to_pixel());
            min_y = min_y.min(p.y.floor_to_pixel());
            max_x = max_x.max(ceil_to_pixel(p.x));
            max_y = max_y.max(ceil_to_pixel(p.y));
        }
        Bounds { x: min_x, y: min_y, w: max_x - min_x, h: max_y - min_y }
    }

    pub fn save(&mut self) {
        self.saved.push(self.state);
    }

    pub fn restore(&mut self) {
        if let Some(s) = self.saved.pop() {
            self.state = s;
        }
    }

    pub fn identity(&mut self) {
        self.state.matrix = Matrix::IDENTITY;
    }

    pub fn translate(&mut self, dx: Fixed, dy: Fixed) {
        self.state.matrix = Matrix::translation(dx, dy).pre_concat(&self.state.matrix);
    }

    pub fn scale(&mut self, sx: Fixed, sy: Fixed) {
        self.state.matrix = Matrix::scaling(sx, sy).pre_concat(&self.state.matrix);
    }

    pub fn rotate(&mut self, angle: Angle) {
        self.state.matrix = Matrix::rotation(angle).pre_concat(&self.state.matrix);
    }

    pub fn set_matrix(&mut self, matrix: Matrix) -> Matrix {
        mem::replace(&mut self.state.matrix, matrix)
    }

    pub fn current_matrix(&self) -> Matrix {
        self.state.matrix
    }

    pub fn cap_style(&self) -> CapStyle {
        self.state.cap_style
    }

    pub fn set_cap_style(&mut self, cap_style: CapStyle) {
        self.state.cap_style = cap_style;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyvg_geom::Fixed;

    fn f(n: i32) -> Fixed {
        Fixed::from_int(n)
    }

    #[test]
    fn move_then_draw_builds_one_subpath() {
        let mut path = Path::new();
        path.move_to(f(0), f(0));
        path.draw(f(10), f(0));
        path.draw(f(10), f(10));
        assert_eq!(path.points().len(), 3);
        assert!(path.sublens().is_empty()); // current subpath not finalized yet
    }

    #[test]
    fn move_finalizes_the_previous_subpath() {
        let mut path = Path::new();
        path.move_to(f(0), f(0));
        path.draw(f(1), f(0));
        path.move_to(f(5), f(5));
        assert_eq!(path.sublens(), &[2]);
        assert_eq!(path.points().len(), 3);
    }

    #[test]
    fn draw_deduplicates_repeated_points() {
        let mut path = Path::new();
        path.move_to(f(0), f(0));
        path.draw(f(0), f(0));
        path.draw(f(1), f(0));
        assert_eq!(path.points().len(), 2);
    }

    #[test]
    fn close_repeats_the_first_point_when_there_are_enough() {
        let mut path = Path::new();
        path.move_to(f(0), f(0));
        path.draw(f(1), f(0));
        path.close();
        assert_eq!(path.points().len(), 3);
        assert_eq!(path.points()[0], path.points()[2]);
    }

    #[test]
    fn close_is_a_no_op_on_a_singleton_subpath() {
        let mut path = Path::new();
        path.move_to(f(0), f(0));
        path.close();
        assert_eq!(path.points().len(), 1);
    }

    #[test]
    fn move_overwrites_a_pending_singleton_instead_of_starting_a_new_one() {
        let mut path = Path::new();
        path.move_to(f(0), f(0));
        path.move_to(f(5), f(5));
        assert!(path.sublens().is_empty());
        assert_eq!(path.points().len(), 1);
        path.draw(f(6), f(5));
        assert_eq!(path.points().len(), 2);
    }

    #[test]
    fn empty_path_has_zero_bounds() {
        let path = Path::new();
        assert_eq!(path.bounds(), Bounds::default());
    }

    #[test]
    fn bounds_covers_all_points() {
        let mut path = Path::new();
        path.move_to(f(1), f(2));
        path.draw(f(5), f(8));
        let b = path.bounds();
        assert_eq!(b.x, 1);
        assert_eq!(b.y, 2);
        assert_eq!(b.w, 4);
        assert_eq!(b.h, 6);
    }

    #[test]
    fn save_and_restore_round_trips_the_matrix_without_touching_geometry() {
        let mut path = Path::new();
        path.move_to(f(0), f(0));
        path.save();
        path.translate(f(10), f(0));
        path.restore();
        path.draw(f(1), f(0));
        let unit = tinyvg_geom::SFixed::from_fixed(f(1));
        assert_eq!(path.points()[1].x - path.points()[0].x, unit);
        assert_eq!(path.points()[1].y, path.points()[0].y);
    }

    #[test]
    fn append_preserves_subpath_boundaries() {
        let mut a = Path::new();
        a.move_to(f(0), f(0));
        a.draw(f(1), f(0));

        let mut b = Path::new();
        b.move_to(f(10), f(10));
        b.draw(f(11), f(10));
        b.move_to(f(20), f(20));

        a.append(&b);
        assert_eq!(a.sublens(), &[2, 4]);
        assert_eq!(a.points().len(), 5);
    }
}
