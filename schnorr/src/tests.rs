use super::*;

use crate::constants::SIGNING_CONTEXT;
use crate::signatures::signing_transcript;

fn decode32(s: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hex::decode(s).unwrap());
    out
}

fn decode64(s: &str) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&hex::decode(s).unwrap());
    out
}

const SEED1: [u8; 32] = {
    let mut seed = [0u8; 32];
    seed[0] = 1;
    seed
};

// keypair_from_seed(SEED1), computed with an independent model of the
// scheme.
const KEYPAIR1_HEX: &str = "99c1c48b59b09bd1ddcdca9988bcebf51ab4b8ae219f42762a745f4fd1be6d0b99763607f0a85d0bd43669194a3a40577a528af395f4f17e06f1defcc6deb2a5800528c955873e4c78b7df24f71db8f581aa99e3493bf496edf151abc1d72023";
const PUBLIC1_HEX: &str = "800528c955873e4c78b7df24f71db8f581aa99e3493bf496edf151abc1d72023";
const SIG1_HEX: &str = "00cb17562d95ffa6fbf194f373c8c2dfb80eaa705190ce15b81c7a7ccaed2b0af1bbb573af4a2e4869daa6f8561aba910a8a471d6f70038e998bf12811f9c78a";

#[test]
fn test_sign_verify() {
    let keypair = Keypair::from_seed(&[42u8; 32]);
    let msg = b"an important message";

    let sig = keypair.sign(msg);
    assert!(keypair.public.verify(msg, &sig));
}

#[test]
fn test_verify_rejects_wrong_message() {
    let keypair = Keypair::from_seed(&[42u8; 32]);
    let sig = keypair.sign(b"an important message");

    assert!(!keypair.public.verify(b"an important messagE", &sig));
    assert!(!keypair.public.verify(b"", &sig));
}

#[test]
fn test_verify_rejects_wrong_key() {
    let keypair = Keypair::from_seed(&[42u8; 32]);
    let other = Keypair::from_seed(&[43u8; 32]);
    let msg = b"an important message";
    let sig = keypair.sign(msg);

    assert!(!other.public.verify(msg, &sig));
}

#[test]
fn test_signing_is_deterministic() {
    let keypair = Keypair::from_seed(&[42u8; 32]);
    let msg = b"same input, same output";

    assert_eq!(keypair.sign(msg).to_bytes(), keypair.sign(msg).to_bytes());
}

#[test]
fn test_keypair_from_seed_vector() {
    let keypair = keypair_from_seed(&SEED1).expect("seed");
    assert_eq!(hex::encode(keypair), KEYPAIR1_HEX);

    let public = public_key_from_keypair(&keypair).expect("keypair");
    assert_eq!(hex::encode(public), PUBLIC1_HEX);
}

#[test]
fn test_signature_vector() {
    let keypair = Keypair::from_seed(&SEED1);
    let sig = keypair.sign(b"transfer");
    assert_eq!(hex::encode(sig.to_bytes()), SIG1_HEX);

    assert!(keypair.public.verify(b"transfer", &sig));
    assert!(!keypair.public.verify(b"transfer!", &sig));
}

#[test]
fn test_signature_vector_second_seed() {
    let mut seed = [0u8; 32];
    for (i, byte) in seed.iter_mut().enumerate() {
        *byte = i as u8;
    }
    let keypair = keypair_from_seed(&seed).expect("seed");
    assert_eq!(
        hex::encode(keypair),
        "87d29d94134be13d30adc66e053ca9aab38d02c8db5bc23cb4249ef0e3dff10d\
         a9d71862a3e5746b571be3d187b0041046f52ebd850c7cbd5fde8ee38473b649\
         e2111779981618705ecacea1af6ff9350bce2b2dccd03e0c3e01eb0c823d2666"
    );

    let public = public_key_from_keypair(&keypair).expect("keypair");
    let secret = secret_key_from_keypair(&keypair).expect("keypair");
    let msg = b"bizinikiwi transaction payload";
    let sig = sign(&public, &secret, msg).expect("sign");
    assert_eq!(
        hex::encode(sig),
        "ae80c59302052dc87f65baaff8b575ea81483f277d524117013efd9783bb9a50\
         cd61445411a32c1de48b8ad5746923137d9a49c2e9be93b6b68d18dacabaae89"
    );
    assert!(verify(&sig, msg, &public));
}

#[test]
fn test_byte_api_matches_typed_api() {
    let keypair_bytes = keypair_from_seed(&SEED1).expect("seed");
    let public = public_key_from_keypair(&keypair_bytes).expect("keypair");
    let secret = secret_key_from_keypair(&keypair_bytes).expect("keypair");

    let byte_sig = sign(&public, &secret, b"transfer").expect("sign");
    let typed_sig = Keypair::from_seed(&SEED1).sign(b"transfer");
    assert_eq!(byte_sig, typed_sig.to_bytes());
}

#[test]
fn test_signature_carries_scheme_marker() {
    let keypair = Keypair::from_seed(&SEED1);
    let bytes = keypair.sign(b"transfer").to_bytes();
    assert_ne!(bytes[63] & 0x80, 0);
}

#[test]
fn test_unmarked_signature_rejected() {
    let keypair = Keypair::from_seed(&SEED1);
    let mut bytes = keypair.sign(b"transfer").to_bytes();
    bytes[63] &= 0x7f;

    assert_eq!(
        Signature::from_bytes(&bytes).unwrap_err(),
        SchnorrError::PointDecode
    );
    assert!(!verify(&bytes, b"transfer", &keypair.public.to_bytes()));
}

#[test]
fn test_corrupted_signature_rejected() {
    let keypair = Keypair::from_seed(&SEED1);
    let public = keypair.public.to_bytes();
    let good = keypair.sign(b"transfer").to_bytes();

    // One flip in the commitment, one in the scalar.
    for index in [0usize, 40] {
        let mut bad = good;
        bad[index] ^= 0x01;
        assert!(!verify(&bad, b"transfer", &public));
    }
}

#[test]
fn test_context_label_separates_domains() {
    // A signature built over an otherwise identical transcript with a
    // different context label must not verify.
    let keypair = Keypair::from_seed(&SEED1);
    let foreign_sig = decode64(
        "a2d1245ca91a2aeed832412799a17099f227d07ec54092eaa3e54b60323a4f26\
         d930576d559c44a443eca37f89bf4a4d219950e23fb8dcfa7cc0bac9dd21ec84",
    );
    assert!(!verify(&foreign_sig, b"transfer", &keypair.public.to_bytes()));

    let mut ours = signing_transcript(SIGNING_CONTEXT, b"transfer");
    let mut foreign = signing_transcript(b"substrate", b"transfer");
    assert_ne!(
        ours.challenge_scalar(b"sign:c"),
        foreign.challenge_scalar(b"sign:c")
    );
}

#[test]
fn test_identity_public_key_rejected() {
    let keypair = Keypair::from_seed(&SEED1);
    let sig = keypair.sign(b"transfer").to_bytes();

    // The identity encodes as all zeroes; it decodes but must never
    // verify anything.
    assert!(!verify(&sig, b"transfer", &[0u8; 32]));
}

#[test]
fn test_undecodable_public_key_rejected() {
    let keypair = Keypair::from_seed(&SEED1);
    let sig = keypair.sign(b"transfer").to_bytes();

    let mut bad_public = keypair.public.to_bytes();
    bad_public[0] ^= 0x01;
    match PublicKey::from_bytes(&bad_public) {
        // Flipping a bit may land on another valid encoding of a
        // different point; either way verification must fail.
        Ok(public) => assert!(!public.verify(b"transfer", &keypair.sign(b"transfer"))),
        Err(e) => assert_eq!(e, SchnorrError::PointDecode),
    }
    assert!(!verify(&sig, b"transfer", &[0xff; 32]));
}

#[test]
fn test_length_errors() {
    assert_eq!(
        keypair_from_seed(&[0u8; 31]).unwrap_err(),
        SchnorrError::InvalidLength
    );
    assert_eq!(
        secret_key_from_keypair(&[0u8; 95]).unwrap_err(),
        SchnorrError::InvalidLength
    );
    assert_eq!(
        public_key_from_keypair(&[0u8; 97]).unwrap_err(),
        SchnorrError::InvalidLength
    );
    assert_eq!(
        sign(&[0u8; 32], &[0u8; 63], b"msg").unwrap_err(),
        SchnorrError::InvalidLength
    );
    assert_eq!(
        Signature::from_bytes(&[0u8; 65]).unwrap_err(),
        SchnorrError::InvalidLength
    );
    assert!(!verify(&[0u8; 63], b"msg", &decode32(PUBLIC1_HEX)));
    assert!(!verify(&decode64(SIG1_HEX), b"transfer", &[0u8; 33]));
}

#[test]
fn test_secret_key_round_trip() {
    let secret = SecretKey::from_seed(&SEED1);
    let restored = SecretKey::from_bytes(&secret.to_bytes()).expect("round trip");
    assert_eq!(secret.to_bytes(), restored.to_bytes());
    assert_eq!(secret.public_key(), restored.public_key());
}

#[test]
fn test_keypair_round_trip() {
    let keypair = Keypair::from_seed(&SEED1);
    let restored = Keypair::from_bytes(&keypair.to_bytes()).expect("round trip");
    assert_eq!(keypair.to_bytes(), restored.to_bytes());

    let sig = restored.sign(b"transfer");
    assert!(keypair.public.verify(b"transfer", &sig));
}

#[test]
fn test_bincode_round_trip() {
    let keypair = Keypair::from_seed(&SEED1);
    let sig = keypair.sign(b"transfer");

    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");
    let public_bytes = bincode::serialize(&keypair.public).expect("serialize pk");
    let secret_bytes = bincode::serialize(&keypair.secret).expect("serialize sk");

    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");
    let public2: PublicKey = bincode::deserialize(&public_bytes).expect("deserialize pk");
    let secret2: SecretKey = bincode::deserialize(&secret_bytes).expect("deserialize sk");

    assert_eq!(sig2, sig);
    assert_eq!(public2, keypair.public);
    assert_eq!(secret2.to_bytes(), keypair.secret.to_bytes());
    assert!(public2.verify(b"transfer", &sig2));
}

#[test]
fn test_public_key_derived_from_secret_matches_keypair() {
    let keypair = Keypair::from_seed(&SEED1);
    assert_eq!(PublicKey::from(&keypair.secret), keypair.public);
    assert_eq!(keypair.secret.public_key().to_bytes(), decode32(PUBLIC1_HEX));
}

#[test]
fn test_empty_message_signs_and_verifies() {
    let keypair = Keypair::from_seed(&[42u8; 32]);
    let sig = keypair.sign(b"");
    assert!(keypair.public.verify(b"", &sig));
    assert!(!keypair.public.verify(b"x", &sig));
}
