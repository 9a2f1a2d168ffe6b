//! Adaptive de Casteljau flattening for cubic bezier curves.

use crate::flatten_common::{dist_sq_to_chord, lerp_shift, MAX_SHIFT, TOLERANCE};
use crate::point::SPoint;

type Cubic = (SPoint, SPoint, SPoint, SPoint);

fn is_flat(c: Cubic) -> bool {
    let (a, b, c2, d) = c;
    let tol_sq = TOLERANCE * TOLERANCE;
    dist_sq_to_chord(b, a, d) <= tol_sq && dist_sq_to_chord(c2, a, d) <= tol_sq
}

/// Splits a cubic at `t = 2^-shift` via one pass of de Casteljau,
/// returning the `(left, right)` sub-curves.
fn split(c: Cubic, shift: u32) -> (Cubic, Cubic) {
    let (p0, p1, p2, p3) = c;

    let l1 = lerp_shift(p0, p1, shift);
    let l2 = lerp_shift(p1, p2, shift);
    let l3 = lerp_shift(p2, p3, shift);

    let l4 = lerp_shift(l1, l2, shift);
    let l5 = lerp_shift(l2, l3, shift);

    let l6 = lerp_shift(l4, l5, shift);

    ((p0, l1, l4, l6), (l6, l5, l3, p3))
}

/// Flattens a cubic bezier `(a, b, c, d)` into line segments, invoking
/// `emit` with the start point, each intermediate vertex, and the final
/// endpoint, in order.
///
/// Implements the iterative adaptive de Casteljau subdivision of §4.D:
/// the working curve is repeatedly split at `t = 2^-shift`, the smallest
/// `shift` for which the left half is flat (to within `TOLERANCE`), with
/// the search amortized by caching `shift` across outer iterations and a
/// one-step decrease attempt to keep chunks as large as the curvature
/// allows.
pub fn flatten_cubic<F: FnMut(SPoint)>(a: SPoint, b: SPoint, c: SPoint, d: SPoint, emit: &mut F) {
    emit(a);

    let mut working = (a, b, c, d);
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

        emit(left.3);
        working = right;
    }

    emit(working.3);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::SFixed;
    use crate::point::spoint;
    use std::{vec, vec::Vec};

    fn collect(a: SPoint, b: SPoint, c: SPoint, d: SPoint) -> Vec<SPoint> {
        let mut out = Vec::new();
        flatten_cubic(a, b, c, d, &mut |p| out.push(p));
        out
    }

    #[test]
    fn straight_line_cubic_emits_two_points() {
        let a = spoint(SFixed(0), SFixed(0));
        let b = spoint(SFixed(100), SFixed(0));
        let c = spoint(SFixed(200), SFixed(0));
        let d = spoint(SFixed(300), SFixed(0));
        let pts = collect(a, b, c, d);
        assert_eq!(pts, vec![a, d]);
    }

    #[test]
    fn curved_cubic_stays_within_tolerance_of_the_chord() {
        let a = spoint(SFixed(0), SFixed(0));
        let b = spoint(SFixed(0), SFixed(5000));
        let c = spoint(SFixed(5000), SFixed(5000));
        let d = spoint(SFixed(5000), SFixed(0));
        let pts = collect(a, b, c, d);
        assert!(pts.len() > 2);
        assert_eq!(pts[0], a);
        assert_eq!(*pts.last().unwrap(), d);
    }

    #[test]
    fn flattening_terminates_for_a_point_like_curve() {
        let a = spoint(SFixed(10), SFixed(10));
        let pts = collect(a, a, a, a);
        assert_eq!(pts, vec![a, a]);
    }
}
