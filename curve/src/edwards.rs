//! Twisted Edwards curve arithmetic for -x^2 + y^2 = 1 + d*x^2*y^2.
//!
//! Points are kept in extended coordinates (X : Y : Z : T) with
//! x = X/Z, y = Y/Z, T = XY/Z, using the unified a = -1 addition and
//! doubling formulas. Scalar multiplication runs a fixed 256-iteration
//! double-and-add with a conditional select per bit, so its timing does
//! not depend on the scalar.

#![allow(non_snake_case)]

use core::ops::{Add, Neg};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::constants;
use crate::field::FieldElement;
use crate::scalar::Scalar;

/// A curve point in extended coordinates.
#[derive(Copy, Clone, Debug)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl EdwardsPoint {
    /// The neutral element (0 : 1 : 1 : 0).
    pub const IDENTITY: EdwardsPoint = EdwardsPoint {
        X: FieldElement::ZERO,
        Y: FieldElement::ONE,
        Z: FieldElement::ONE,
        T: FieldElement::ZERO,
    };

    /// Point doubling (dbl-2008-hwcd, a = -1).
    pub fn double(&self) -> EdwardsPoint {
        let A = self.X.square();
        let B = self.Y.square();
        let zz = self.Z.square();
        let C = zz + zz;
        let D = -A;
        let E = (self.X + self.Y).square() - A - B;
        let G = D + B;
        let F = G - C;
        let H = D - B;

        EdwardsPoint {
            X: E * F,
            Y: G * H,
            Z: F * G,
            T: E * H,
        }
    }

    /// Constant-time scalar multiplication over the full 256-bit scalar
    /// encoding: double unconditionally, add under a per-bit select.
    pub fn mul(&self, scalar: &Scalar) -> EdwardsPoint {
        let bytes = scalar.to_bytes();
        let mut acc = EdwardsPoint::IDENTITY;

        for i in (0..256).rev() {
            acc = acc.double();
            let with_add = acc + *self;
            let bit = Choice::from((bytes[i >> 3] >> (i & 7)) & 1);
            acc = EdwardsPoint::conditional_select(&acc, &with_add, bit);
        }

        acc
    }
}

impl Add for EdwardsPoint {
    type Output = EdwardsPoint;

    /// Unified point addition (add-2008-hwcd-3, a = -1); also valid for
    /// doubling and for either operand being the identity.
    fn add(self, rhs: EdwardsPoint) -> EdwardsPoint {
        let A = (self.Y - self.X) * (rhs.Y - rhs.X);
        let B = (self.Y + self.X) * (rhs.Y + rhs.X);
        let C = self.T * constants::EDWARDS_D2 * rhs.T;
        let zz = self.Z * rhs.Z;
        let D = zz + zz;
        let E = B - A;
        let F = D - C;
        let G = D + C;
        let H = B + A;

        EdwardsPoint {
            X: E * F,
            Y: G * H,
            Z: F * G,
            T: E * H,
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -self.X,
            Y: self.Y,
            Z: self.Z,
            T: -self.T,
        }
    }
}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &EdwardsPoint, b: &EdwardsPoint, choice: Choice) -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T: FieldElement::conditional_select(&a.T, &b.T, choice),
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    /// Projective equality: X1/Z1 == X2/Z2 and Y1/Z1 == Y2/Z2, checked
    /// by cross-multiplication.
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        (self.X * other.Z).ct_eq(&(other.X * self.Z))
            & (self.Y * other.Z).ct_eq(&(other.Y * self.Z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_u64(n: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        Scalar::from_bytes_mod_order(bytes)
    }

    #[test]
    fn test_identity_laws() {
        let b = constants::ED25519_BASEPOINT;
        assert_eq!(b + EdwardsPoint::IDENTITY, b);
        assert_eq!(EdwardsPoint::IDENTITY + b, b);
        assert_eq!(EdwardsPoint::IDENTITY.double(), EdwardsPoint::IDENTITY);
    }

    #[test]
    fn test_double_matches_add() {
        let b = constants::ED25519_BASEPOINT;
        assert_eq!(b.double(), b + b);
    }

    #[test]
    fn test_scalar_mul_small() {
        let b = constants::ED25519_BASEPOINT;
        assert_eq!(b.mul(&Scalar::ZERO), EdwardsPoint::IDENTITY);
        assert_eq!(b.mul(&Scalar::ONE), b);
        assert_eq!(b.mul(&scalar_u64(2)), b.double());
        assert_eq!(b.mul(&scalar_u64(5)), b.double().double() + b);
    }

    #[test]
    fn test_mul_distributes_over_add() {
        let b = constants::ED25519_BASEPOINT;
        let left = b.mul(&(scalar_u64(7) + scalar_u64(11)));
        let right = b.mul(&scalar_u64(7)) + b.mul(&scalar_u64(11));
        assert_eq!(left, right);
    }

    #[test]
    fn test_negation() {
        let b = constants::ED25519_BASEPOINT;
        assert_eq!(b + (-b), EdwardsPoint::IDENTITY);
    }
}
