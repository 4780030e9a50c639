//! Ristretto255: a prime-order group built on the Edwards curve.
//!
//! Ristretto quotients away the curve's cofactor-8 structure, so every
//! group element has exactly one canonical 32-byte encoding and the
//! small-order points that complicate raw Edwards protocols cannot be
//! represented at all. Encoding and decoding follow the extraction and
//! validation procedure from RFC 9496.

#![allow(non_snake_case)]

use core::ops::{Add, Mul, Neg};

use serde::{Deserialize, Serialize};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::constants;
use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::scalar::Scalar;

/// A Ristretto point in its canonical 32-byte wire encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedRistretto(pub [u8; 32]);

impl CompressedRistretto {
    /// Views the encoding as a byte slice.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copies the encoding out.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Decodes the 32 bytes back into a group element.
    ///
    /// Returns `None` unless the bytes are the canonical encoding of a
    /// valid point: the field element must be reduced, non-negative,
    /// and the recovered coordinates must satisfy the curve equation
    /// with the required sign conventions.
    pub fn decompress(&self) -> Option<RistrettoPoint> {
        let s = FieldElement::from_bytes(&self.0);
        let s_canonical: bool = s.to_bytes().ct_eq(&self.0).into();
        let s_negative: bool = s.is_negative().into();
        if !s_canonical || s_negative {
            return None;
        }

        let ss = s.square();
        let u1 = FieldElement::ONE - ss;
        let u2 = FieldElement::ONE + ss;
        let u2_sqr = u2.square();

        // v = -d * u1^2 - u2^2
        let v = -constants::EDWARDS_D * u1.square() - u2_sqr;
        let (ok, inv_sqrt) = FieldElement::sqrt_ratio_i(&FieldElement::ONE, &(v * u2_sqr));

        let den_x = inv_sqrt * u2;
        let den_y = inv_sqrt * den_x * v;

        let mut x = (s + s) * den_x;
        let x_negative = x.is_negative();
        x.conditional_negate(x_negative);
        let y = u1 * den_y;
        let t = x * y;

        let ok: bool = ok.into();
        let t_negative: bool = t.is_negative().into();
        let y_zero: bool = y.is_zero().into();
        if !ok || t_negative || y_zero {
            return None;
        }

        Some(RistrettoPoint(EdwardsPoint {
            X: x,
            Y: y,
            Z: FieldElement::ONE,
            T: t,
        }))
    }
}

/// An element of the Ristretto group.
#[derive(Copy, Clone, Debug)]
pub struct RistrettoPoint(pub(crate) EdwardsPoint);

impl RistrettoPoint {
    /// The group's neutral element.
    pub fn identity() -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::IDENTITY)
    }

    /// The canonical generator.
    pub fn basepoint() -> RistrettoPoint {
        constants::RISTRETTO_BASEPOINT
    }

    /// Whether this is the neutral element.
    pub fn is_identity(&self) -> bool {
        self.ct_eq(&RistrettoPoint::identity()).into()
    }

    /// Encodes the point to its canonical 32-byte form.
    pub fn compress(&self) -> CompressedRistretto {
        let mut X = self.0.X;
        let mut Y = self.0.Y;
        let Z = self.0.Z;
        let T = self.0.T;

        let u1 = (Z + Y) * (Z - Y);
        let u2 = X * Y;

        let (_, inv_sqrt) = FieldElement::sqrt_ratio_i(&FieldElement::ONE, &(u1 * u2.square()));
        let i1 = inv_sqrt * u1;
        let i2 = inv_sqrt * u2;
        let z_inv = i1 * i2 * T;

        let iX = X * constants::SQRT_M1;
        let iY = Y * constants::SQRT_M1;
        let rotated_denominator = i1 * constants::INVSQRT_A_MINUS_D;

        // If T*z_inv is negative the encoding uses the 4-isogeny
        // "rotated" coordinates instead.
        let rotate = (T * z_inv).is_negative();
        X.conditional_assign(&iY, rotate);
        Y.conditional_assign(&iX, rotate);
        let mut den_inv = i2;
        den_inv.conditional_assign(&rotated_denominator, rotate);

        let y_negative = (X * z_inv).is_negative();
        Y.conditional_negate(y_negative);

        let mut s = den_inv * (Z - Y);
        let s_negative = s.is_negative();
        s.conditional_negate(s_negative);

        CompressedRistretto(s.to_bytes())
    }
}

impl Add for RistrettoPoint {
    type Output = RistrettoPoint;

    fn add(self, rhs: RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(self.0 + rhs.0)
    }
}

impl Neg for RistrettoPoint {
    type Output = RistrettoPoint;

    fn neg(self) -> RistrettoPoint {
        RistrettoPoint(-self.0)
    }
}

impl Mul<&Scalar> for &RistrettoPoint {
    type Output = RistrettoPoint;

    fn mul(self, scalar: &Scalar) -> RistrettoPoint {
        RistrettoPoint(self.0.mul(scalar))
    }
}

impl Mul<&Scalar> for RistrettoPoint {
    type Output = RistrettoPoint;

    fn mul(self, scalar: &Scalar) -> RistrettoPoint {
        &self * scalar
    }
}

impl ConstantTimeEq for RistrettoPoint {
    /// Ristretto equality: two Edwards representatives encode the same
    /// group element iff X1*Y2 == Y1*X2 or X1*X2 == Y1*Y2.
    fn ct_eq(&self, other: &RistrettoPoint) -> Choice {
        let XY = self.0.X * other.0.Y;
        let YX = self.0.Y * other.0.X;
        let XX = self.0.X * other.0.X;
        let YY = self.0.Y * other.0.Y;
        XY.ct_eq(&YX) | XX.ct_eq(&YY)
    }
}

impl PartialEq for RistrettoPoint {
    fn eq(&self, other: &RistrettoPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for RistrettoPoint {}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_hex(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&hex::decode(s).unwrap());
        out
    }

    #[test]
    fn test_basepoint_encoding() {
        assert_eq!(
            RistrettoPoint::basepoint().compress(),
            constants::RISTRETTO_BASEPOINT_COMPRESSED
        );
    }

    #[test]
    fn test_basepoint_decodes_to_basepoint() {
        let decoded = constants::RISTRETTO_BASEPOINT_COMPRESSED
            .decompress()
            .unwrap();
        assert_eq!(decoded, RistrettoPoint::basepoint());
    }

    #[test]
    fn test_small_multiples_of_basepoint() {
        let b = RistrettoPoint::basepoint();
        let two_b = CompressedRistretto(decode_hex(
            "6a493210f7499cd17fecb510ae0cea23a110e8d5b901f8acadd3095c73a3b919",
        ));
        let five_b = CompressedRistretto(decode_hex(
            "e882b131016b52c1d3337080187cf768423efccbb517bb495ab812c4160ff44e",
        ));
        assert_eq!((b + b).compress(), two_b);
        assert_eq!(
            (b + b + b + b + b).compress(),
            five_b
        );
    }

    #[test]
    fn test_scalar_mul_matches_vector() {
        let a = Scalar::from_bytes_mod_order(decode_hex(
            "214c854c2edfc64e27f8eca85b64630efb6f74538b54ca4e8310e620d5521203",
        ));
        let expected = CompressedRistretto(decode_hex(
            "422d3150e49bac0a811ab4bc53b3ccaf768366106b98397f67669f2c7816f210",
        ));
        assert_eq!((RistrettoPoint::basepoint() * &a).compress(), expected);
    }

    #[test]
    fn test_identity_encodes_as_zero() {
        let identity = RistrettoPoint::identity();
        assert!(identity.is_identity());
        assert_eq!(identity.compress().to_bytes(), [0u8; 32]);
        let decoded = CompressedRistretto([0u8; 32]).decompress().unwrap();
        assert!(decoded.is_identity());
    }

    #[test]
    fn test_compress_decompress_round_trip() {
        let a = Scalar::from_bytes_mod_order(decode_hex(
            "b35a4659af59867d3fee418ea8f6ea4232a2effccdd2511caf271ab14940960f",
        ));
        let p = RistrettoPoint::basepoint() * &a;
        let decoded = p.compress().decompress().unwrap();
        assert_eq!(decoded, p);
    }

    #[test]
    fn test_non_canonical_encoding_rejected() {
        // Encodes 2^255 - 1, which reduces mod p, so the round trip
        // does not reproduce the input bytes.
        assert!(CompressedRistretto([0xff; 32]).decompress().is_none());
    }

    #[test]
    fn test_negative_field_element_rejected() {
        // s = 1 is odd, hence negative under the encoding convention.
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        assert!(CompressedRistretto(bytes).decompress().is_none());
    }

    #[test]
    fn test_scalar_mul_ignores_representative() {
        let b = RistrettoPoint::basepoint();
        let six = Scalar::from_bytes_mod_order({
            let mut s = [0u8; 32];
            s[0] = 6;
            s
        });
        let three = Scalar::from_bytes_mod_order({
            let mut s = [0u8; 32];
            s[0] = 3;
            s
        });
        assert_eq!(b * &six, (b + b) * &three);
    }
}
