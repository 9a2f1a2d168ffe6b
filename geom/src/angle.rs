use core::ops::{Add, Neg, Sub};

/// A signed integer on a 4096-unit full-turn scale.
///
/// `Angle` is a wrapping integer type: values outside `[0, ANGLE_360)` are
/// valid intermediate results (e.g. `start + extent` while building an
/// arc) and are only normalized when an operation needs a quadrant or a
/// table lookup.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Angle(pub i32);

pub const ANGLE_360: i32 = 4096;
pub const ANGLE_180: i32 = 2048;
pub const ANGLE_90: i32 = 1024;
pub const ANGLE_270: i32 = 3072;
pub const ANGLE_0: i32 = 0;

impl Angle {
    pub const ZERO: Angle = Angle(ANGLE_0);
    pub const QUARTER: Angle = Angle(ANGLE_90);
    pub const HALF: Angle = Angle(ANGLE_180);
    pub const FULL: Angle = Angle(ANGLE_360);

    /// Normalizes into `[0, ANGLE_360)`.
    #[inline]
    pub fn normalized(self) -> Angle {
        Angle(self.0.rem_euclid(ANGLE_360))
    }

    #[inline]
    pub fn units(self) -> i32 {
        self.0
    }
}

impl From<i32> for Angle {
    #[inline]
    fn from(v: i32) -> Angle {
        Angle(v)
    }
}

impl Add for Angle {
    type Output = Angle;
    #[inline]
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Angle {
    type Output = Angle;
    #[inline]
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Angle {
    type Output = Angle;
    #[inline]
    fn neg(self) -> Angle {
        Angle(self.0.wrapping_neg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_negative_angles() {
        assert_eq!(Angle(-ANGLE_90).normalized().0, ANGLE_270);
    }

    #[test]
    fn normalizes_overflowing_angles() {
        assert_eq!(Angle(ANGLE_360 + ANGLE_90).normalized().0, ANGLE_90);
    }
}
