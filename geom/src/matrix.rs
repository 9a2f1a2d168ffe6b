use crate::angle::Angle;
use crate::fixed::{DFixed, Fixed, SFixed};
use crate::point::{Point, SPoint, Vector};
use crate::trig::sincos;

/// A 3x2 affine transform: two columns of three `Fixed` entries, the
/// implicit third row being `[0 0 1]`.
///
/// ```text
/// x' = a*x + c*y + e
/// y' = b*x + d*y + f
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
    pub a: Fixed,
    pub b: Fixed,
    pub c: Fixed,
    pub d: Fixed,
    pub e: Fixed,
    pub f: Fixed,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: Fixed::ONE,
        b: Fixed::ZERO,
        c: Fixed::ZERO,
        d: Fixed::ONE,
        e: Fixed::ZERO,
        f: Fixed::ZERO,
    };

    pub fn translation(dx: Fixed, dy: Fixed) -> Matrix {
        Matrix {
            a: Fixed::ONE,
            b: Fixed::ZERO,
            c: Fixed::ZERO,
            d: Fixed::ONE,
            e: dx,
            f: dy,
        }
    }

    pub fn scaling(sx: Fixed, sy: Fixed) -> Matrix {
        Matrix {
            a: sx,
            b: Fixed::ZERO,
            c: Fixed::ZERO,
            d: sy,
            e: Fixed::ZERO,
            f: Fixed::ZERO,
        }
    }

    pub fn rotation(angle: Angle) -> Matrix {
        let (s, c) = sincos(angle);
        Matrix {
            a: c,
            b: s,
            c: -s,
            d: c,
            e: Fixed::ZERO,
            f: Fixed::ZERO,
        }
    }

    /// Pre-concatenates `other` onto `self`: the result maps a point `p`
    /// to `self.transform_point(other.transform_point(p))`, i.e. `other`
    /// is applied first. This is how the path's state mutators enter a
    /// nested local frame (e.g. `rounded_rectangle`'s per-corner
    /// translate): `current = current.pre_concat(&delta)` composes the new
    /// local transform *inside* the existing one.
    pub fn pre_concat(&self, other: &Matrix) -> Matrix {
        // widened products since entries can be large after repeated
        // scaling/composition.
        let mul = |x: Fixed, y: Fixed| DFixed::widen_mul(x, y);
        let a = mul(self.a, other.a).add(mul(self.c, other.b)).narrow();
        let b = mul(self.b, other.a).add(mul(self.d, other.b)).narrow();
        let c = mul(self.a, other.c).add(mul(self.c, other.d)).narrow();
        let d = mul(self.b, other.c).add(mul(self.d, other.d)).narrow();
        let e = mul(self.a, other.e)
            .add(mul(self.c, other.f))
            .add(DFixed::from_fixed(self.e))
            .narrow();
        let f = mul(self.b, other.e)
            .add(mul(self.d, other.f))
            .add(DFixed::from_fixed(self.f))
            .narrow();
        Matrix { a, b, c, d, e, f }
    }

    /// Transforms a point: `m . (x, y, 1)`, producing a screen-space
    /// `SFixed` point via a rounding shift from the widened product.
    pub fn transform_point(&self, p: Point) -> SPoint {
        let x = DFixed::widen_mul(self.a, p.x)
            .add(DFixed::widen_mul(self.c, p.y))
            .add(DFixed::from_fixed(self.e))
            .saturating_narrow();
        let y = DFixed::widen_mul(self.b, p.x)
            .add(DFixed::widen_mul(self.d, p.y))
            .add(DFixed::from_fixed(self.f))
            .saturating_narrow();
        euclid::Point2D::new(SFixed::from_fixed(x), SFixed::from_fixed(y))
    }

    /// Transforms a delta: `m . (dx, dy, 0)`, dropping the translation.
    pub fn transform_vector(&self, v: Vector) -> Vector {
        let x = DFixed::widen_mul(self.a, v.x)
            .add(DFixed::widen_mul(self.c, v.y))
            .saturating_narrow();
        let y = DFixed::widen_mul(self.b, v.x)
            .add(DFixed::widen_mul(self.d, v.y))
            .saturating_narrow();
        euclid::Vector2D::new(x, y)
    }
}

impl Default for Matrix {
    fn default() -> Matrix {
        Matrix::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::point;

    #[test]
    fn identity_is_a_no_op() {
        let p = point(Fixed::from_int(3), Fixed::from_int(-2));
        let sp = Matrix::IDENTITY.transform_point(p);
        assert_eq!(sp.x.to_fixed(), Fixed::from_int(3));
        assert_eq!(sp.y.to_fixed(), Fixed::from_int(-2));
    }

    #[test]
    fn translation_moves_points() {
        let m = Matrix::translation(Fixed::from_int(10), Fixed::from_int(5));
        let sp = m.transform_point(point(Fixed::ZERO, Fixed::ZERO));
        assert_eq!(sp.x.to_fixed(), Fixed::from_int(10));
        assert_eq!(sp.y.to_fixed(), Fixed::from_int(5));
    }

    #[test]
    fn composition_applies_inner_first() {
        let translate = Matrix::translation(Fixed::from_int(1), Fixed::ZERO);
        let scale = Matrix::scaling(Fixed::from_int(2), Fixed::from_int(2));
        // scale.pre_concat(translate): translate first, then scale -> (0+1)*2 = 2
        let m = scale.pre_concat(&translate);
        let sp = m.transform_point(point(Fixed::ZERO, Fixed::ZERO));
        assert_eq!(sp.x.to_fixed(), Fixed::from_int(2));
    }
}
