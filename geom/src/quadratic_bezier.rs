//! Adaptive de Casteljau flattening for quadratic bezier curves.

use crate::fixed::SFixed;
use crate::flatten_common::{dist_sq_to_chord, lerp_shift, MAX_SHIFT, TOLERANCE};
use crate::point::SPoint;

type Quadratic = (SPoint, SPoint, SPoint);

fn is_flat(q: Quadratic) -> bool {
    let (p0, p1, p2) = q;
    dist_sq_to_chord(p1, p0, p2) <= TOLERANCE * TOLERANCE
}

/// Splits a quadratic at `t = 2^-shift` via one pass of de Casteljau,
/// returning the `(left, right)` sub-curves.
fn split(q: Quadratic, shift: u32) -> (Quadratic, Quadratic) {
    let (p0, p1, p2) = q;

    let l1 = lerp_shift(p0, p1, shift);
    let l2 = lerp_shift(p1, p2, shift);
    let l3 = lerp_shift(l1, l2, shift);

    ((p0, l1, l3), (l3, l2, p2))
}

/// Flattens a quadratic bezier `(p0, p1, p2)` the same way
/// [`crate::cubic_bezier::flatten_cubic`] flattens a cubic: iterative
/// adaptive de Casteljau subdivision with a cached, amortized shift
/// search.
pub fn flatten_quadratic<F: FnMut(SPoint)>(p0: SPoint, p1: SPoint, p2: SPoint, emit: &mut F) {
    emit(p0);

    let mut working = (p0, p1, p2);
    let mut shift: u32 = 2;

    loop {
        if is_flat(working) {
            break;
        }

        let (mut left, mut right) = loop {
            let (l, r) = split(working, shift);
            if is_flat(l) || shift >= MAX_SHIFT {
                break (l, r);
            }
            shift += 1;
        };

        if shift > 1 {
            let (l2, r2) = split(working, shift - 1);
            if is_flat(l2) {
                shift -= 1;
                left = l2;
                right = r2;
            }
        }

        emit(left.2);
        working = right;
    }

    emit(working.2);
}

/// Elevates a quadratic `(p0, p1, p2)` to the equivalent cubic control
/// points `(p0, p0 + 2/3(p1-p0), p2 + 2/3(p1-p2), p2)`, used by the
/// quad-to-cubic equivalence property of §8.
pub fn quadratic_to_cubic(p0: SPoint, p1: SPoint, p2: SPoint) -> (SPoint, SPoint, SPoint, SPoint) {
    // a + 2/3*(b - a), computed with a 64-bit intermediate so the *2
    // doesn't overflow SFixed's i32 before the division by 3 brings it
    // back down.
    let two_thirds = |a: SFixed, b: SFixed| -> SFixed {
        let d = (b - a).0 as i64;
        SFixed(a.0 + ((d * 2) / 3) as i32)
    };
    let c1 = euclid::Point2D::new(two_thirds(p0.x, p1.x), two_thirds(p0.y, p1.y));
    let c2 = euclid::Point2D::new(two_thirds(p2.x, p1.x), two_thirds(p2.y, p1.y));
    (p0, c1, c2, p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::SFixed;
    use crate::point::spoint;
    use std::{vec, vec::Vec};

    fn collect(p0: SPoint, p1: SPoint, p2: SPoint) -> Vec<SPoint> {
        let mut out = Vec::new();
        flatten_quadratic(p0, p1, p2, &mut |p| out.push(p));
        out
    }

    #[test]
    fn straight_line_quadratic_emits_two_points() {
        let p0 = spoint(SFixed(0), SFixed(0));
        let p1 = spoint(SFixed(150), SFixed(0));
        let p2 = spoint(SFixed(300), SFixed(0));
        let pts = collect(p0, p1, p2);
        assert_eq!(pts, vec![p0, p2]);
    }

    #[test]
    fn curved_quadratic_emits_more_than_two_points() {
        let p0 = spoint(SFixed(0), SFixed(0));
        let p1 = spoint(SFixed(0), SFixed(5000));
        let p2 = spoint(SFixed(5000), SFixed(5000));
        let pts = collect(p0, p1, p2);
        assert!(pts.len() > 2);
        assert_eq!(pts[0], p0);
        assert_eq!(*pts.last().unwrap(), p2);
    }

    #[test]
    fn quad_to_cubic_preserves_endpoints() {
        let p0 = spoint(SFixed(0), SFixed(0));
        let p1 = spoint(SFixed(100), SFixed(200));
        let p2 = spoint(SFixed(300), SFixed(0));
        let (a, _, _, d) = quadratic_to_cubic(p0, p1, p2);
        assert_eq!(a, p0);
        assert_eq!(d, p2);
    }
}
