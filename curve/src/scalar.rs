//! Scalar field of the curve: integers modulo the group order
//! L = 2^252 + 27742317777372353535851937790883648493.
//!
//! Scalars are held as five 52-bit limbs, always reduced mod L, with
//! Montgomery multiplication (R = 2^260). Addition and subtraction are
//! branchless; the conditional corrections are applied through masks so
//! no operation's timing depends on the secret value.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use rand::Rng;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

const MASK_52: u64 = (1u64 << 52) - 1;

// The group order L as 52-bit limbs.
const L: [u64; 5] = [
    0x0002631a5cf5d3ed,
    0x000dea2f79cd6581,
    0x000000000014def9,
    0x0000000000000000,
    0x0000100000000000,
];

// -L^{-1} mod 2^52 (Montgomery parameter).
const LFACTOR: u64 = 0x51da312547e1b;

// R = 2^260 mod L.
const R: [u64; 5] = [
    0x000f48bd6721e6ed,
    0x0003bab5ac67e45a,
    0x000fffffeb35e51b,
    0x000fffffffffffff,
    0x00000fffffffffff,
];

// R^2 = 2^520 mod L (for Montgomery conversion).
const RR: [u64; 5] = [
    0x0009d265e952d13b,
    0x000d63c715bea69f,
    0x0005be65cb687604,
    0x0003dceec73d217f,
    0x000009411b7c309a,
];

/// A scalar modulo the group order, as five 52-bit limbs in little-endian
/// order. Every constructor reduces mod L, so an unreduced value never
/// escapes this module.
#[derive(Copy, Clone)]
pub struct Scalar(pub(crate) [u64; 5]);

impl Scalar {
    pub const ZERO: Scalar = Scalar([0, 0, 0, 0, 0]);
    pub const ONE: Scalar = Scalar([1, 0, 0, 0, 0]);

    /// Interpret 32 little-endian bytes as an integer and reduce mod L.
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        let unpacked = Scalar::unpack(&bytes);
        // x * R / R = x mod L.
        Scalar::montgomery_reduce(&Scalar::mul_internal(&unpacked, &Scalar(R)))
    }

    /// Reduce a 64-byte little-endian integer mod L. Used on the 64 bytes
    /// squeezed from the transcript, which keeps the modulo bias
    /// negligible.
    pub fn from_bytes_mod_order_wide(bytes: &[u8; 64]) -> Scalar {
        let mut words = [0u64; 8];
        for (i, word) in words.iter_mut().enumerate() {
            for j in 0..8 {
                *word |= (bytes[i * 8 + j] as u64) << (j * 8);
            }
        }

        let lo = Scalar([
            words[0] & MASK_52,
            ((words[0] >> 52) | (words[1] << 12)) & MASK_52,
            ((words[1] >> 40) | (words[2] << 24)) & MASK_52,
            ((words[2] >> 28) | (words[3] << 36)) & MASK_52,
            ((words[3] >> 16) | (words[4] << 48)) & MASK_52,
        ]);
        let hi = Scalar([
            (words[4] >> 4) & MASK_52,
            ((words[4] >> 56) | (words[5] << 8)) & MASK_52,
            ((words[5] >> 44) | (words[6] << 20)) & MASK_52,
            ((words[6] >> 32) | (words[7] << 32)) & MASK_52,
            words[7] >> 20,
        ]);

        // lo * R / R = lo, hi * R^2 / R = hi * 2^260.
        let lo = Scalar::montgomery_reduce(&Scalar::mul_internal(&lo, &Scalar(R)));
        let hi = Scalar::montgomery_reduce(&Scalar::mul_internal(&hi, &Scalar(RR)));
        lo + hi
    }

    /// Canonical little-endian encoding of a value in [0, L).
    pub fn to_bytes(self) -> [u8; 32] {
        let mut s = [0u8; 32];

        s[0] = self.0[0] as u8;
        s[1] = (self.0[0] >> 8) as u8;
        s[2] = (self.0[0] >> 16) as u8;
        s[3] = (self.0[0] >> 24) as u8;
        s[4] = (self.0[0] >> 32) as u8;
        s[5] = (self.0[0] >> 40) as u8;
        s[6] = ((self.0[0] >> 48) | (self.0[1] << 4)) as u8;
        s[7] = (self.0[1] >> 4) as u8;
        s[8] = (self.0[1] >> 12) as u8;
        s[9] = (self.0[1] >> 20) as u8;
        s[10] = (self.0[1] >> 28) as u8;
        s[11] = (self.0[1] >> 36) as u8;
        s[12] = (self.0[1] >> 44) as u8;
        s[13] = self.0[2] as u8;
        s[14] = (self.0[2] >> 8) as u8;
        s[15] = (self.0[2] >> 16) as u8;
        s[16] = (self.0[2] >> 24) as u8;
        s[17] = (self.0[2] >> 32) as u8;
        s[18] = (self.0[2] >> 40) as u8;
        s[19] = ((self.0[2] >> 48) | (self.0[3] << 4)) as u8;
        s[20] = (self.0[3] >> 4) as u8;
        s[21] = (self.0[3] >> 12) as u8;
        s[22] = (self.0[3] >> 20) as u8;
        s[23] = (self.0[3] >> 28) as u8;
        s[24] = (self.0[3] >> 36) as u8;
        s[25] = (self.0[3] >> 44) as u8;
        s[26] = self.0[4] as u8;
        s[27] = (self.0[4] >> 8) as u8;
        s[28] = (self.0[4] >> 16) as u8;
        s[29] = (self.0[4] >> 24) as u8;
        s[30] = (self.0[4] >> 32) as u8;
        s[31] = (self.0[4] >> 40) as u8;

        s
    }

    /// Sample a uniform scalar by wide reduction of 64 random bytes.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Scalar {
        let mut bytes = [0u8; 64];
        rng.fill_bytes(&mut bytes);
        Scalar::from_bytes_mod_order_wide(&bytes)
    }

    /// Unpack 32 bytes into 52-bit limbs without reducing.
    fn unpack(bytes: &[u8; 32]) -> Scalar {
        let mut words = [0u64; 4];
        for (i, word) in words.iter_mut().enumerate() {
            for j in 0..8 {
                *word |= (bytes[i * 8 + j] as u64) << (j * 8);
            }
        }

        Scalar([
            words[0] & MASK_52,
            ((words[0] >> 52) | (words[1] << 12)) & MASK_52,
            ((words[1] >> 40) | (words[2] << 24)) & MASK_52,
            ((words[2] >> 28) | (words[3] << 36)) & MASK_52,
            words[3] >> 16,
        ])
    }

    /// a + b mod L for inputs already in [0, L).
    fn add_internal(a: &Scalar, b: &Scalar) -> Scalar {
        let mut sum = [0u64; 5];
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = a.0[i] + b.0[i] + (carry >> 52);
            sum[i] = carry & MASK_52;
        }
        // The sum is below 2L, so one masked subtraction suffices.
        Scalar::sub_internal(&Scalar(sum), &Scalar(L))
    }

    /// a - b mod L, adding back L under a mask when the subtraction
    /// borrows.
    fn sub_internal(a: &Scalar, b: &Scalar) -> Scalar {
        let mut difference = [0u64; 5];
        let mut borrow: u64 = 0;
        for i in 0..5 {
            borrow = a.0[i].wrapping_sub(b.0[i] + (borrow >> 63));
            difference[i] = borrow & MASK_52;
        }

        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = (carry >> 52) + difference[i] + (L[i] & underflow_mask);
            difference[i] = carry & MASK_52;
        }

        Scalar(difference)
    }

    /// Schoolbook 5x5 limb product, as nine 128-bit columns.
    fn mul_internal(a: &Scalar, b: &Scalar) -> [u128; 9] {
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let a = &a.0;
        let b = &b.0;

        [
            m(a[0], b[0]),
            m(a[0], b[1]) + m(a[1], b[0]),
            m(a[0], b[2]) + m(a[1], b[1]) + m(a[2], b[0]),
            m(a[0], b[3]) + m(a[1], b[2]) + m(a[2], b[1]) + m(a[3], b[0]),
            m(a[0], b[4]) + m(a[1], b[3]) + m(a[2], b[2]) + m(a[3], b[1]) + m(a[4], b[0]),
            m(a[1], b[4]) + m(a[2], b[3]) + m(a[3], b[2]) + m(a[4], b[1]),
            m(a[2], b[4]) + m(a[3], b[3]) + m(a[4], b[2]),
            m(a[3], b[4]) + m(a[4], b[3]),
            m(a[4], b[4]),
        ]
    }

    /// Montgomery reduction: divide a 9-column product by R = 2^260 and
    /// reduce mod L. Note L[3] = 0, so those columns drop out.
    fn montgomery_reduce(limbs: &[u128; 9]) -> Scalar {
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        #[inline(always)]
        fn part1(sum: u128) -> (u128, u64) {
            let p = (sum as u64).wrapping_mul(LFACTOR) & MASK_52;
            ((sum + m(p, L[0])) >> 52, p)
        }

        #[inline(always)]
        fn part2(sum: u128) -> (u128, u64) {
            let w = (sum as u64) & MASK_52;
            (sum >> 52, w)
        }

        // Eliminate the low 260 bits.
        let (carry, n0) = part1(limbs[0]);
        let (carry, n1) = part1(carry + limbs[1] + m(n0, L[1]));
        let (carry, n2) = part1(carry + limbs[2] + m(n0, L[2]) + m(n1, L[1]));
        let (carry, n3) = part1(carry + limbs[3] + m(n1, L[2]) + m(n2, L[1]));
        let (carry, n4) = part1(carry + limbs[4] + m(n0, L[4]) + m(n2, L[2]) + m(n3, L[1]));

        // Collect the high half.
        let (carry, r0) = part2(carry + limbs[5] + m(n1, L[4]) + m(n3, L[2]) + m(n4, L[1]));
        let (carry, r1) = part2(carry + limbs[6] + m(n2, L[4]) + m(n4, L[2]));
        let (carry, r2) = part2(carry + limbs[7] + m(n3, L[4]));
        let (carry, r3) = part2(carry + limbs[8] + m(n4, L[4]));
        let r4 = carry as u64;

        // The result is below 2L.
        Scalar::sub_internal(&Scalar([r0, r1, r2, r3, r4]), &Scalar(L))
    }

    fn mul_mod(a: &Scalar, b: &Scalar) -> Scalar {
        // (ab/R) * (R^2/R) = ab.
        let ab = Scalar::montgomery_reduce(&Scalar::mul_internal(a, b));
        Scalar::montgomery_reduce(&Scalar::mul_internal(&ab, &Scalar(RR)))
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        Scalar::add_internal(&self, &rhs)
    }
}

impl AddAssign for Scalar {
    fn add_assign(&mut self, rhs: Scalar) {
        *self = *self + rhs;
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar::sub_internal(&self, &rhs)
    }
}

impl SubAssign for Scalar {
    fn sub_assign(&mut self, rhs: Scalar) {
        *self = *self - rhs;
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar::mul_mod(&self, &rhs)
    }
}

impl MulAssign for Scalar {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = *self * rhs;
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", {
            let bytes = self.to_bytes();
            let mut s = String::with_capacity(64);
            for b in bytes.iter().rev() {
                s.push_str(&format!("{:02x}", b));
            }
            s
        })
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Scalar, D::Error> {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "32 little-endian scalar bytes")
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Scalar, E> {
                let bytes: [u8; 32] = v
                    .try_into()
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(Scalar::from_bytes_mod_order(bytes))
            }
        }

        deserializer.deserialize_bytes(ScalarVisitor)
    }
}
