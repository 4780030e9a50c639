//! Field arithmetic modulo p = 2^255 - 19.
//!
//! Elements are held as five 51-bit limbs in little-endian order, the
//! standard unpacked representation for this prime. All arithmetic is
//! constant time: carries are propagated unconditionally and the final
//! reduction in `to_bytes` is computed with shifts rather than compares.

use core::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// An element of GF(2^255 - 19), as five 51-bit limbs.
///
/// Limbs may grow slightly above 2^51 between operations; multiplication
/// and subtraction re-normalize, and `to_bytes` performs the full
/// canonical reduction.
#[derive(Copy, Clone, Debug)]
pub struct FieldElement(pub(crate) [u64; 5]);

impl FieldElement {
    pub const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0]);
    pub const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0]);

    /// Carry-propagate limbs so each fits in 51 bits (plus a small excess
    /// in limb 0 from the 19-fold wraparound).
    fn reduce(mut limbs: [u64; 5]) -> FieldElement {
        let c0 = limbs[0] >> 51;
        let c1 = limbs[1] >> 51;
        let c2 = limbs[2] >> 51;
        let c3 = limbs[3] >> 51;
        let c4 = limbs[4] >> 51;

        limbs[0] &= LOW_51_BIT_MASK;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        limbs[0] += c4 * 19;
        limbs[1] += c0;
        limbs[2] += c1;
        limbs[3] += c2;
        limbs[4] += c3;

        FieldElement(limbs)
    }

    /// Parse 32 little-endian bytes; bit 255 is ignored, and the value is
    /// taken mod p lazily (full reduction happens on encode).
    pub fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        fn load8(input: &[u8]) -> u64 {
            (input[0] as u64)
                | ((input[1] as u64) << 8)
                | ((input[2] as u64) << 16)
                | ((input[3] as u64) << 24)
                | ((input[4] as u64) << 32)
                | ((input[5] as u64) << 40)
                | ((input[6] as u64) << 48)
                | ((input[7] as u64) << 56)
        }

        FieldElement([
            load8(&bytes[0..8]) & LOW_51_BIT_MASK,
            (load8(&bytes[6..14]) >> 3) & LOW_51_BIT_MASK,
            (load8(&bytes[12..20]) >> 6) & LOW_51_BIT_MASK,
            (load8(&bytes[19..27]) >> 1) & LOW_51_BIT_MASK,
            (load8(&bytes[24..32]) >> 12) & LOW_51_BIT_MASK,
        ])
    }

    /// Canonical little-endian encoding, fully reduced into [0, p).
    pub fn to_bytes(self) -> [u8; 32] {
        let mut limbs = FieldElement::reduce(self.0).0;

        // Compute q = floor(value / p) in {0, 1, 2} without branching:
        // q = 1 exactly when value + 19 carries past bit 255.
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        let mut s = [0u8; 32];
        s[0] = limbs[0] as u8;
        s[1] = (limbs[0] >> 8) as u8;
        s[2] = (limbs[0] >> 16) as u8;
        s[3] = (limbs[0] >> 24) as u8;
        s[4] = (limbs[0] >> 32) as u8;
        s[5] = (limbs[0] >> 40) as u8;
        s[6] = ((limbs[0] >> 48) | (limbs[1] << 3)) as u8;
        s[7] = (limbs[1] >> 5) as u8;
        s[8] = (limbs[1] >> 13) as u8;
        s[9] = (limbs[1] >> 21) as u8;
        s[10] = (limbs[1] >> 29) as u8;
        s[11] = (limbs[1] >> 37) as u8;
        s[12] = ((limbs[1] >> 45) | (limbs[2] << 6)) as u8;
        s[13] = (limbs[2] >> 2) as u8;
        s[14] = (limbs[2] >> 10) as u8;
        s[15] = (limbs[2] >> 18) as u8;
        s[16] = (limbs[2] >> 26) as u8;
        s[17] = (limbs[2] >> 34) as u8;
        s[18] = (limbs[2] >> 42) as u8;
        s[19] = ((limbs[2] >> 50) | (limbs[3] << 1)) as u8;
        s[20] = (limbs[3] >> 7) as u8;
        s[21] = (limbs[3] >> 15) as u8;
        s[22] = (limbs[3] >> 23) as u8;
        s[23] = (limbs[3] >> 31) as u8;
        s[24] = (limbs[3] >> 39) as u8;
        s[25] = ((limbs[3] >> 47) | (limbs[4] << 4)) as u8;
        s[26] = (limbs[4] >> 4) as u8;
        s[27] = (limbs[4] >> 12) as u8;
        s[28] = (limbs[4] >> 20) as u8;
        s[29] = (limbs[4] >> 28) as u8;
        s[30] = (limbs[4] >> 36) as u8;
        s[31] = (limbs[4] >> 44) as u8;
        s
    }

    #[inline]
    pub fn square(&self) -> FieldElement {
        *self * *self
    }

    /// Compute `self^(2^k)` by repeated squaring.
    pub fn pow2k(&self, k: u32) -> FieldElement {
        debug_assert!(k > 0);
        let mut out = *self;
        for _ in 0..k {
            out = out.square();
        }
        out
    }

    /// Shared tail of the inversion and square-root exponent chains:
    /// returns (self^(2^250 - 1), self^11).
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        let t0 = self.square(); // 2
        let t1 = t0.square().square(); // 8
        let t2 = *self * t1; // 9
        let t3 = t0 * t2; // 11
        let t4 = t3.square(); // 22
        let t5 = t2 * t4; // 2^5 - 1
        let t6 = t5.pow2k(5); // 2^10 - 2^5
        let t7 = t6 * t5; // 2^10 - 1
        let t8 = t7.pow2k(10) * t7; // 2^20 - 1
        let t9 = t8.pow2k(20) * t8; // 2^40 - 1
        let t10 = t9.pow2k(10) * t7; // 2^50 - 1
        let t11 = t10.pow2k(50) * t10; // 2^100 - 1
        let t12 = t11.pow2k(100) * t11; // 2^200 - 1
        let t13 = t12.pow2k(50) * t10; // 2^250 - 1
        (t13, t3)
    }

    /// Multiplicative inverse by Fermat: self^(p - 2). Returns zero for
    /// zero, which suits the Ristretto formulas.
    pub fn invert(&self) -> FieldElement {
        let (t19, t3) = self.pow22501();
        t19.pow2k(5) * t3 // 2^255 - 21
    }

    /// self^((p - 5) / 8) = self^(2^252 - 3).
    fn pow_p58(&self) -> FieldElement {
        let (t19, _) = self.pow22501();
        t19.pow2k(2) * *self
    }

    /// The Ristretto square-root gadget: attempt to compute
    /// `sqrt(u/v)`, falling back to `sqrt(i*u/v)` when `u/v` is not
    /// square. The returned `Choice` is set when `u/v` was square; the
    /// returned element is always the non-negative root.
    pub fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        let v3 = v.square() * *v;
        let v7 = v3.square() * *v;
        let mut r = (*u * v3) * (*u * v7).pow_p58();
        let check = *v * r.square();

        let i = super::constants::SQRT_M1;

        let correct_sign_sqrt = check.ct_eq(u);
        let flipped_sign_sqrt = check.ct_eq(&(-*u));
        let flipped_sign_sqrt_i = check.ct_eq(&(-*u * i));

        let r_prime = r * i;
        r.conditional_assign(&r_prime, flipped_sign_sqrt | flipped_sign_sqrt_i);

        // Normalize to the non-negative root.
        let r_is_negative = r.is_negative();
        let r_neg = -r;
        r.conditional_assign(&r_neg, r_is_negative);

        (correct_sign_sqrt | flipped_sign_sqrt, r)
    }

    /// An element is "negative" when its canonical encoding is odd.
    pub fn is_negative(&self) -> Choice {
        Choice::from(self.to_bytes()[0] & 1)
    }

    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&FieldElement::ZERO)
    }

    pub(crate) fn conditional_negate(&mut self, negate: Choice) {
        let negated = -*self;
        self.conditional_assign(&negated, negate);
    }
}

impl Add for FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: FieldElement) -> FieldElement {
        let mut out = self.0;
        for i in 0..5 {
            out[i] += rhs.0[i];
        }
        FieldElement(out)
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: FieldElement) -> FieldElement {
        // Bias by 16p so the limb subtraction cannot underflow.
        FieldElement::reduce([
            (self.0[0] + 36028797018963664u64) - rhs.0[0],
            (self.0[1] + 36028797018963952u64) - rhs.0[1],
            (self.0[2] + 36028797018963952u64) - rhs.0[2],
            (self.0[3] + 36028797018963952u64) - rhs.0[3],
            (self.0[4] + 36028797018963952u64) - rhs.0[4],
        ])
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        FieldElement::reduce([
            36028797018963664u64 - self.0[0],
            36028797018963952u64 - self.0[1],
            36028797018963952u64 - self.0[2],
            36028797018963952u64 - self.0[3],
            36028797018963952u64 - self.0[4],
        ])
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: FieldElement) -> FieldElement {
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let a = &self.0;
        let b = &rhs.0;

        // Precompute b[i] * 19 for the wraparound columns.
        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        let c0: u128 =
            m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let mut c1: u128 =
            m(a[1], b[0]) + m(a[0], b[1]) + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let mut c2: u128 =
            m(a[2], b[0]) + m(a[1], b[1]) + m(a[0], b[2]) + m(a[4], b3_19) + m(a[3], b4_19);
        let mut c3: u128 =
            m(a[3], b[0]) + m(a[2], b[1]) + m(a[1], b[2]) + m(a[0], b[3]) + m(a[4], b4_19);
        let mut c4: u128 =
            m(a[4], b[0]) + m(a[3], b[1]) + m(a[2], b[2]) + m(a[1], b[3]) + m(a[0], b[4]);

        let mut out = [0u64; 5];

        c1 += ((c0 >> 51) as u64) as u128;
        out[0] = (c0 as u64) & LOW_51_BIT_MASK;
        c2 += ((c1 >> 51) as u64) as u128;
        out[1] = (c1 as u64) & LOW_51_BIT_MASK;
        c3 += ((c2 >> 51) as u64) as u128;
        out[2] = (c2 as u64) & LOW_51_BIT_MASK;
        c4 += ((c3 >> 51) as u64) as u128;
        out[3] = (c3 as u64) & LOW_51_BIT_MASK;
        let carry = (c4 >> 51) as u64;
        out[4] = (c4 as u64) & LOW_51_BIT_MASK;

        out[0] += carry * 19;
        out[1] += out[0] >> 51;
        out[0] &= LOW_51_BIT_MASK;

        FieldElement(out)
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -*self
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(hex_le: &str) -> FieldElement {
        let bytes: [u8; 32] = hex::decode(hex_le).unwrap().try_into().unwrap();
        FieldElement::from_bytes(&bytes)
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let a = fe("4c0f13fbe1a50246abda96307f1f568b4b75d4d3ede0845a689888eadb82220e");
        assert_eq!(FieldElement::from_bytes(&a.to_bytes()), a);
    }

    #[test]
    fn test_high_bit_is_ignored() {
        let mut bytes = [0x5au8; 32];
        bytes[31] = 0x7f;
        let low = FieldElement::from_bytes(&bytes);
        bytes[31] = 0xff;
        let high = FieldElement::from_bytes(&bytes);
        assert_eq!(low, high);
    }

    #[test]
    fn test_encoding_is_canonical() {
        // 2^255 - 19 + 1 must encode the same as 1.
        let mut almost_p = [0xffu8; 32];
        almost_p[0] = 0xee;
        almost_p[31] = 0x7f;
        let a = FieldElement::from_bytes(&almost_p);
        assert_eq!(a.to_bytes(), FieldElement::ONE.to_bytes());
    }

    #[test]
    fn test_mul_vs_square() {
        let a = fe("214c854c2edfc64e27f8eca85b64630efb6f74538b54ca4e8310e620d5521203");
        assert_eq!(a * a, a.square());
    }

    #[test]
    fn test_invert() {
        let a = fe("b35a4659af59867d3fee418ea8f6ea4232a2effccdd2511caf271ab14940960f");
        assert_eq!(a * a.invert(), FieldElement::ONE);
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);
    }

    #[test]
    fn test_sqrt_ratio_of_square() {
        let a = fe("214c854c2edfc64e27f8eca85b64630efb6f74538b54ca4e8310e620d5521203");
        let sq = a.square();
        let (was_square, r) = FieldElement::sqrt_ratio_i(&sq, &FieldElement::ONE);
        assert!(bool::from(was_square));
        assert_eq!(r.square(), sq);
        assert!(!bool::from(r.is_negative()));
    }

    #[test]
    fn test_sqrt_ratio_of_nonsquare() {
        // p = 5 (mod 8), so 2 is not a quadratic residue.
        let (was_square, _) = FieldElement::sqrt_ratio_i(
            &(FieldElement::ONE + FieldElement::ONE),
            &FieldElement::ONE,
        );
        assert!(!bool::from(was_square));
    }

    #[test]
    fn test_negate() {
        let a = fe("214c854c2edfc64e27f8eca85b64630efb6f74538b54ca4e8310e620d5521203");
        assert_eq!(a + (-a), FieldElement::ZERO);
    }
}
