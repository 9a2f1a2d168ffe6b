//! Helpers shared by the cubic and quadratic flatteners: the de Casteljau
//! `_lerp` step and the convex-hull flatness test, both operating
//! entirely in `SFixed` with no allocation.

use crate::point::SPoint;

/// Maximum perpendicular distance, in screen-space subpixels, between a
/// curve and the line segments approximating it.
pub const TOLERANCE: i64 = 64; // 0.25px at Q24.8 (SCREEN_FRAC_BITS = 8)

/// Upper bound on the adaptive subdivision shift: beyond this the
/// interpolation step itself underflows to zero, so there is no point
/// searching further.
pub const MAX_SHIFT: u32 = 24;

/// `a + ((b - a) >> shift)`: linear interpolation at `t = 2^-shift`.
#[inline]
pub fn lerp_shift(a: SPoint, b: SPoint, shift: u32) -> SPoint {
    euclid::Point2D::new(a.x + (b.x - a.x).shr(shift), a.y + (b.y - a.y).shr(shift))
}

/// Squared perpendicular distance from `p` to the line through `a` and
/// `d`, computed via the cross-product form (`cross^2 / |ad|^2`) so no
/// square root is needed. Degenerates to the squared distance to `a` when
/// `a == d`.
pub fn dist_sq_to_chord(p: SPoint, a: SPoint, d: SPoint) -> i64 {
    let vx = (d.x - a.x).0 as i64;
    let vy = (d.y - a.y).0 as i64;
    let wx = (p.x - a.x).0 as i64;
    let wy = (p.y - a.y).0 as i64;

    let len_sq = vx * vx + vy * vy;
    if len_sq == 0 {
        return wx * wx + wy * wy;
    }

    let cross = vx * wy - vy * wx;
    (cross * cross) / len_sq
}
