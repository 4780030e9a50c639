//! Fixed curve constants, as radix-2^51 field limbs.
//!
//! All values were computed offline with a big-integer model and
//! cross-checked against the published compressed encoding of the
//! Ristretto generator.

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::ristretto::{CompressedRistretto, RistrettoPoint};

/// Edwards curve constant d = -121665/121666.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    0x34dca135978a3,
    0x1a8283b156ebd,
    0x5e7a26001c029,
    0x739c663a03cbb,
    0x52036cee2b6ff,
]);

/// 2*d, used by the extended-coordinate addition formulas.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement([
    0x69b9426b2f159,
    0x35050762add7a,
    0x3cf44c0038052,
    0x6738cc7407977,
    0x2406d9dc56dff,
]);

/// sqrt(-1) mod p.
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    0x61b274a0ea0b0,
    0x0d5a5fc8f189d,
    0x7ef5e9cbd0c60,
    0x78595a6804c9e,
    0x2b8324804fc1d,
]);

/// 1/sqrt(a - d) with a = -1, used by Ristretto compression.
pub(crate) const INVSQRT_A_MINUS_D: FieldElement = FieldElement([
    0x0fdaa805d40ea,
    0x2eb482e57d339,
    0x007610274bc58,
    0x6510b613dc8ff,
    0x786c8905cfaff,
]);

/// The Ed25519 basepoint (x, 4/5) in extended coordinates.
pub(crate) const ED25519_BASEPOINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement([
        0x62d608f25d51a,
        0x412a4b4f6592a,
        0x75b7171a4b31d,
        0x1ff60527118fe,
        0x216936d3cd6e5,
    ]),
    Y: FieldElement([
        0x6666666666658,
        0x4cccccccccccc,
        0x1999999999999,
        0x3333333333333,
        0x6666666666666,
    ]),
    Z: FieldElement::ONE,
    T: FieldElement([
        0x68ab3a5b7dda3,
        0x00eea2a5eadbb,
        0x2af8df483c27e,
        0x332b375274732,
        0x67875f0fd78b7,
    ]),
};

/// The Ristretto generator (the Ed25519 basepoint's coset).
pub const RISTRETTO_BASEPOINT: RistrettoPoint = RistrettoPoint(ED25519_BASEPOINT);

/// Canonical compressed encoding of [`RISTRETTO_BASEPOINT`].
pub const RISTRETTO_BASEPOINT_COMPRESSED: CompressedRistretto = CompressedRistretto([
    0xe2, 0xf2, 0xae, 0x0a, 0x6a, 0xbc, 0x4e, 0x71, 0xa8, 0x84, 0xa9, 0x61, 0xc5, 0x00, 0x51,
    0x5f, 0x58, 0xe3, 0x0b, 0x6a, 0xa5, 0x82, 0xdd, 0x8d, 0xb6, 0xa6, 0x59, 0x45, 0xe0, 0x8d,
    0x2d, 0x76,
]);
