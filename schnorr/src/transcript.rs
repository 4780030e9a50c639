//! The signing transcript: a domain-separated record of everything the
//! challenge depends on.
//!
//! Each appended item is framed through the STROBE duplex with a
//! metadata label (and a little-endian length for variable-length
//! data), so distinct transcripts can never collide by reassociating
//! bytes across items. Challenge scalars are squeezed from the duplex
//! as 64-byte strings and wide-reduced mod ℓ.

use curve::{CompressedRistretto, Scalar};

use crate::strobe::Strobe128;

/// A running transcript over a STROBE-128 duplex.
#[derive(Clone)]
pub(crate) struct Transcript {
    strobe: Strobe128,
}

impl Transcript {
    /// Starts a transcript under a protocol label.
    pub fn new(protocol_label: &'static [u8]) -> Transcript {
        Transcript {
            strobe: Strobe128::new(protocol_label),
        }
    }

    /// Binds the signing-context label, length-prefixed, as metadata.
    pub fn append_context_label(&mut self, label: &[u8]) {
        let len = label.len() as u32;
        self.strobe.meta_ad(&len.to_le_bytes(), false);
        self.strobe.meta_ad(label, true);
    }

    /// Appends variable-length message data, length-prefixed.
    pub fn append_message(&mut self, message: &[u8]) {
        let len = message.len() as u32;
        self.strobe.meta_ad(&len.to_le_bytes(), false);
        self.strobe.ad(message, false);
    }

    /// Commits the scheme name as metadata.
    pub fn proto_name(&mut self, name: &'static [u8]) {
        self.strobe.meta_ad(name, false);
    }

    /// Commits a compressed point under a label.
    pub fn commit_point(&mut self, label: &'static [u8], point: &CompressedRistretto) {
        self.strobe.meta_ad(label, false);
        self.strobe.ad(point.as_bytes(), false);
    }

    /// Squeezes a challenge scalar under a label, advancing the
    /// transcript.
    pub fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        self.strobe.meta_ad(label, false);
        let mut buf = [0u8; 64];
        self.strobe.prf(&mut buf, false);
        Scalar::from_bytes_mod_order_wide(&buf)
    }

    /// Derives the deterministic witness scalar from the transcript so
    /// far and the secret nonce seed.
    ///
    /// Runs on a fork of the duplex: the main transcript is left
    /// untouched, since verifiers reconstruct the transcript without
    /// ever seeing the witness derivation.
    pub fn witness_scalar(&self, label: &'static [u8], nonce_seed: &[u8]) -> Scalar {
        let mut fork = self.strobe.clone();
        fork.meta_ad(label, false);
        fork.ad(nonce_seed, false);
        let mut buf = [0u8; 64];
        fork.prf(&mut buf, false);
        Scalar::from_bytes_mod_order_wide(&buf)
    }
}
