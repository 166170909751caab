use hypericum::{Error, HashDrbg, Hypericum, Signature};
use tracing_subscriber::EnvFilter;

fn main() {
    // Run with `RUST_LOG=hypericum=debug` to see the search iterations.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let hyp: Hypericum = Hypericum::new();

    // The hash-DRBG reseeds from the operating system on every request.
    // Use `HashDrbg::from_seed` for a reproducible run.
    let mut rng: HashDrbg = HashDrbg::new();

    let (pk, sk) = hyp.keygen(&mut rng).unwrap();

    let message = b"Hypericum";
    let signature = hyp.sign(message, &sk, &mut rng).unwrap();
    println!(
        "signed {:?} with a {}-byte signature",
        String::from_utf8_lossy(message),
        signature.as_ref().len()
    );

    assert_eq!(hyp.verify(&signature, message, &pk), Ok(()));
    println!("signature is valid");

    // Any modification of the signature is detected.
    let mut bytes: Vec<u8> = signature.into();
    bytes[0] ^= 0x01;
    let tampered = Signature::try_from(bytes).unwrap();
    assert_eq!(
        hyp.verify(&tampered, message, &pk),
        Err(Error::VerificationFailed)
    );
    println!("tampered signature is rejected");

    // Attached form: the message travels after the signature.
    let signed = hyp.sign_attached(message, &sk, &mut rng).unwrap();
    assert_eq!(hyp.open(&signed, &pk).unwrap(), message);
}
