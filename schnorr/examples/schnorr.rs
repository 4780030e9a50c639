use rand::rngs::StdRng;
use rand::SeedableRng;
use schnorr::{Keypair, PublicKey, Signature};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let keypair = Keypair::generate(&mut rng);

    let pk_bytes = bincode::serialize(&keypair.public).expect("serialize pk");

    let msg = b"hello schnorr";
    let sig = keypair.sign(msg);
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");

    let pk2: PublicKey = bincode::deserialize(&pk_bytes).expect("deserialize pk");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    assert!(pk2.verify(msg, &sig2));

    // The raw byte API round-trips through plain slices.
    let keypair_bytes = schnorr::keypair_from_seed(&[7u8; 32]).expect("seed");
    let public = schnorr::public_key_from_keypair(&keypair_bytes).expect("keypair");
    let secret = schnorr::secret_key_from_keypair(&keypair_bytes).expect("keypair");
    let raw_sig = schnorr::sign(&public, &secret, msg).expect("sign");
    assert!(schnorr::verify(&raw_sig, msg, &public));

    println!("signature: {}", hex_string(&raw_sig));
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
