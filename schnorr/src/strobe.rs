//! A minimal STROBE-128 duplex construction over Keccak-f[1600].
//!
//! This implements just the subset of STROBE v1.0.2 that the signing
//! transcript needs: metadata absorption (`meta_ad`), data absorption
//! (`ad`), and pseudorandom output (`prf`). Operations are framed the
//! way STROBE specifies, with the previous frame start and the
//! operation's flag byte absorbed before the payload, so every output
//! depends on the complete, unambiguous operation history.

use crate::constants::STROBE_R;

const FLAG_I: u8 = 1;
const FLAG_A: u8 = 1 << 1;
const FLAG_C: u8 = 1 << 2;
const FLAG_T: u8 = 1 << 3;
const FLAG_M: u8 = 1 << 4;
const FLAG_K: u8 = 1 << 5;

/// STROBE-128 duplex state at 128-bit security.
///
/// Cloning captures the full sponge state, which the transcript layer
/// uses to derive nonces on a fork without disturbing the main session.
#[derive(Clone)]
pub(crate) struct Strobe128 {
    state: [u64; 25],
    pos: u8,
    pos_begin: u8,
    cur_flags: u8,
}

impl Strobe128 {
    /// Creates a fresh duplex keyed to a protocol label.
    pub fn new(protocol_label: &[u8]) -> Strobe128 {
        let mut strobe = Strobe128 {
            state: [0u64; 25],
            pos: 0,
            pos_begin: 0,
            cur_flags: 0,
        };

        // F([1, R+2, 1, 0, 1, 96] || "STROBEv1.0.2"), per the STROBE
        // specification's initialization.
        let domain = [1, STROBE_R + 2, 1, 0, 1, 96];
        for (i, &byte) in domain.iter().chain(b"STROBEv1.0.2").enumerate() {
            strobe.xor_byte(i, byte);
        }
        keccak::f1600(&mut strobe.state);

        strobe.meta_ad(protocol_label, false);
        strobe
    }

    /// Absorbs framing metadata.
    pub fn meta_ad(&mut self, data: &[u8], more: bool) {
        self.begin_op(FLAG_M | FLAG_A, more);
        self.absorb(data);
    }

    /// Absorbs message data.
    pub fn ad(&mut self, data: &[u8], more: bool) {
        self.begin_op(FLAG_A, more);
        self.absorb(data);
    }

    /// Squeezes pseudorandom output into `data`.
    pub fn prf(&mut self, data: &mut [u8], more: bool) {
        self.begin_op(FLAG_I | FLAG_A | FLAG_C, more);
        self.squeeze(data);
    }

    fn byte_at(&self, i: usize) -> u8 {
        (self.state[i / 8] >> (8 * (i % 8))) as u8
    }

    fn xor_byte(&mut self, i: usize, byte: u8) {
        self.state[i / 8] ^= u64::from(byte) << (8 * (i % 8));
    }

    fn clear_byte(&mut self, i: usize) {
        self.state[i / 8] &= !(0xffu64 << (8 * (i % 8)));
    }

    fn run_f(&mut self) {
        self.xor_byte(usize::from(self.pos), self.pos_begin);
        self.xor_byte(usize::from(self.pos) + 1, 0x04);
        self.xor_byte(usize::from(STROBE_R) + 1, 0x80);
        keccak::f1600(&mut self.state);
        self.pos = 0;
        self.pos_begin = 0;
    }

    fn absorb(&mut self, data: &[u8]) {
        for &byte in data {
            self.xor_byte(usize::from(self.pos), byte);
            self.pos += 1;
            if self.pos == STROBE_R {
                self.run_f();
            }
        }
    }

    fn squeeze(&mut self, data: &mut [u8]) {
        for byte in data {
            *byte = self.byte_at(usize::from(self.pos));
            self.clear_byte(usize::from(self.pos));
            self.pos += 1;
            if self.pos == STROBE_R {
                self.run_f();
            }
        }
    }

    /// Starts a new operation frame: absorbs the previous frame start
    /// and the flag byte, then runs the permutation early for cipher
    /// operations so output never shares a block with prior input.
    fn begin_op(&mut self, flags: u8, more: bool) {
        if more {
            debug_assert_eq!(
                self.cur_flags, flags,
                "continued operation changed flags"
            );
            return;
        }

        debug_assert_eq!(flags & FLAG_T, 0, "transport operations are not used");

        let old_begin = self.pos_begin;
        self.pos_begin = self.pos + 1;
        self.cur_flags = flags;

        self.absorb(&[old_begin, flags]);

        if flags & (FLAG_C | FLAG_K) != 0 && self.pos != 0 {
            self.run_f();
        }
    }
}
