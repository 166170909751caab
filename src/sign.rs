//! # Hypericum keys, signatures and the signing driver
//!
//! [`Hypericum`] ties the building blocks together:
//!
//! 1. the randomizer `R = PRF_msg(SK.prf, PK.seed, M)`;
//! 2. a search over 4-byte salts `s` until `H_msg(R, PK.seed, PK.root, s, M)` has a zero
//!    FORS+C suffix;
//! 3. a FORS+C signature of the digest, under the FORS+C key selected by the digest;
//! 4. a hypertree signature of the FORS+C public key.
//!
//! A signature is laid out as `R || s || SIG_FORS || SIG_HT`. All sizes are fixed by the
//! parameter set `P`.
//!
//! ## Example
//!
//! ```rust
//! use hypericum::{HashDrbg, Hypericum};
//!
//! let hyp: Hypericum = Hypericum::new();
//! let mut rng: HashDrbg = HashDrbg::new();
//! let (pk, sk) = hyp.keygen(&mut rng).expect("Key generation failed");
//!
//! let message = b"Hypericum";
//! let signature = hyp.sign(message, &sk, &mut rng).expect("Signing failed");
//! assert!(hyp.verify(&signature, message, &pk).is_ok());
//! ```

use crate::adrs::{Adrs, AdrsType};
use crate::drbg::EntropySource;
use crate::error::{Error, Result};
use crate::fors::ForsC;
use crate::hash::{DefaultHash, HashAlgo, HypHasher};
use crate::hypertree::Hypertree;
use crate::params::{
    DefaultParams, ParameterSet, HYP_DIGEST_BYTES, HYP_N, HYP_NONCE_BYTES, HYP_PUBLIC_KEY_BYTES,
    HYP_SECRET_KEY_BYTES, HYP_SIGN_MAX_ITERATIONS,
};
use crate::utils::{array_struct, bytes_to_u32, bytes_to_u64};
use core::fmt;
use core::marker::PhantomData;
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serialization")]
use serde_big_array::BigArray;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

array_struct!(
    /// Hypericum public key: `PK.seed || PK.root`.
    PublicKey,
    HYP_PUBLIC_KEY_BYTES
);

impl PublicKey {
    pub fn seed(&self) -> &[u8] {
        &self.0[..HYP_N]
    }

    pub fn root(&self) -> &[u8] {
        &self.0[HYP_N..]
    }
}

array_struct!(
    /// Hypericum secret key: `SK.seed || SK.prf || PK.seed || PK.root`.
    SecretKey,
    HYP_SECRET_KEY_BYTES
);

impl SecretKey {
    pub fn seed(&self) -> &[u8] {
        &self.0[..HYP_N]
    }

    pub fn prf(&self) -> &[u8] {
        &self.0[HYP_N..2 * HYP_N]
    }

    /// The public key embedded in the secret key.
    pub fn public_key(&self) -> PublicKey {
        let mut pk = [0u8; HYP_PUBLIC_KEY_BYTES];
        pk.copy_from_slice(&self.0[2 * HYP_N..]);
        PublicKey(pk)
    }

    fn pk_seed(&self) -> &[u8] {
        &self.0[2 * HYP_N..3 * HYP_N]
    }

    fn pk_root(&self) -> &[u8] {
        &self.0[3 * HYP_N..]
    }
}

/// A detached Hypericum signature of exactly `P::SIGNATURE_BYTES` bytes.
#[derive(Clone)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serialization",
    serde(try_from = "Vec<u8>", into = "Vec<u8>", bound = "")
)]
pub struct Signature<P: ParameterSet = DefaultParams> {
    bytes: Vec<u8>,
    _params: PhantomData<P>,
}

impl<P: ParameterSet> Signature<P> {
    const FORS_OFFSET: usize = HYP_N + HYP_NONCE_BYTES;
    const HT_OFFSET: usize = Self::FORS_OFFSET + P::FORS_BYTES;

    /// The message randomizer `R`.
    pub fn randomizer(&self) -> &[u8] {
        &self.bytes[..HYP_N]
    }

    /// The salt `s` accepted by the digest search.
    pub fn salt(&self) -> &[u8] {
        &self.bytes[HYP_N..Self::FORS_OFFSET]
    }

    pub fn fors(&self) -> &[u8] {
        &self.bytes[Self::FORS_OFFSET..Self::HT_OFFSET]
    }

    pub fn hypertree(&self) -> &[u8] {
        &self.bytes[Self::HT_OFFSET..]
    }

    /// XMSS signature of hypertree layer `layer`, or `None` if `layer >= P::D`.
    pub fn xmss_layer(&self, layer: usize) -> Option<&[u8]> {
        self.hypertree().chunks_exact(P::XMSS_BYTES).nth(layer)
    }

    fn salt_array(&self) -> [u8; HYP_NONCE_BYTES] {
        let mut salt = [0u8; HYP_NONCE_BYTES];
        salt.copy_from_slice(self.salt());
        salt
    }
}

impl<P: ParameterSet> fmt::Debug for Signature<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("params", &P::NAME)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl<P: ParameterSet> PartialEq for Signature<P> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<P: ParameterSet> Eq for Signature<P> {}

impl<P: ParameterSet> AsRef<[u8]> for Signature<P> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<P: ParameterSet> TryFrom<Vec<u8>> for Signature<P> {
    type Error = Error;
    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != P::SIGNATURE_BYTES {
            return Err(Error::BadLength(P::SIGNATURE_BYTES, bytes.len()));
        }
        Ok(Self {
            bytes,
            _params: PhantomData,
        })
    }
}

impl<P: ParameterSet> TryFrom<&[u8]> for Signature<P> {
    type Error = Error;
    fn try_from(data: &[u8]) -> Result<Self> {
        Self::try_from(data.to_vec())
    }
}

impl<P: ParameterSet> From<Signature<P>> for Vec<u8> {
    fn from(signature: Signature<P>) -> Self {
        signature.bytes
    }
}

/// The Hypericum signature scheme over the parameter set `P` and the hash primitive `D`.
///
/// The struct is stateless. Randomness comes from the [`EntropySource`] passed to
/// [`keygen`](Self::keygen) and [`sign`](Self::sign).
pub struct Hypericum<P: ParameterSet = DefaultParams, D: HashAlgo = DefaultHash> {
    _params: PhantomData<(P, D)>,
}

impl<P: ParameterSet, D: HashAlgo> Default for Hypericum<P, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ParameterSet, D: HashAlgo> Hypericum<P, D> {
    pub fn new() -> Self {
        Self {
            _params: PhantomData,
        }
    }

    /// Generates a keypair. `SK.seed`, `SK.prf` and `PK.seed` are drawn from `rng` in this
    /// order, then `PK.root` is the root of the hypertree.
    pub fn keygen<E: EntropySource>(&self, rng: &mut E) -> Result<(PublicKey, SecretKey)> {
        let mut sk = Zeroizing::new([0u8; HYP_SECRET_KEY_BYTES]);
        for seed in sk[..3 * HYP_N].chunks_exact_mut(HYP_N) {
            rng.get_random(seed)?;
        }

        let (seeds, pk_root) = sk.split_at_mut(3 * HYP_N);
        let hasher = HypHasher::<D>::new(&seeds[2 * HYP_N..]);
        Hypertree::<P, D>::new(&hasher).gen_pk(pk_root, &seeds[..HYP_N])?;
        debug!(params = P::NAME, "generated keypair");

        let sk = SecretKey(*sk);
        Ok((sk.public_key(), sk))
    }

    /// Signs `message` with `sk`.
    ///
    /// Fails with [`Error::SignRetriesExhausted`] when no salt within
    /// [`HYP_SIGN_MAX_ITERATIONS`] gives a digest with a zero suffix.
    pub fn sign<E: EntropySource>(
        &self,
        message: &[u8],
        sk: &SecretKey,
        rng: &mut E,
    ) -> Result<Signature<P>> {
        let hasher = HypHasher::<D>::new(sk.pk_seed());
        let mut sig = vec![0u8; P::SIGNATURE_BYTES];
        let (randomizer, rest) = sig.split_at_mut(HYP_N);
        let (salt, rest) = rest.split_at_mut(HYP_NONCE_BYTES);
        let (fors_sig, ht_sig) = rest.split_at_mut(P::FORS_BYTES);

        HypHasher::<D>::prf_msg(randomizer, sk.prf(), hasher.pk_seed(), message);

        let mut digest = Zeroizing::new([0u8; HYP_DIGEST_BYTES]);
        let mut s = [0u8; HYP_NONCE_BYTES];
        let mut accepted = None;
        for iteration in 1..=HYP_SIGN_MAX_ITERATIONS {
            rng.get_random(&mut s)?;
            HypHasher::<D>::h_msg(&mut digest, randomizer, sk.pk_seed(), sk.pk_root(), &s, message);
            if !P::md_suffix_nonzero(&digest) {
                accepted = Some(iteration);
                break;
            }
        }
        let Some(iterations) = accepted else {
            warn!(
                max = HYP_SIGN_MAX_ITERATIONS,
                "no message digest with a zero suffix found"
            );
            return Err(Error::SignRetriesExhausted);
        };
        debug!(iterations, "accepted message digest");
        salt.copy_from_slice(&s);

        let (idx_tree, idx_leaf) = Self::digest_indices(&digest);
        let mut adrs = Self::fors_adrs(idx_tree, idx_leaf);

        let fors = ForsC::<P, D>::new(&hasher);
        fors.sign(fors_sig, &digest[..], sk.seed(), &adrs)?;

        let mut pk_fors = Zeroizing::new([0u8; HYP_N]);
        fors.pk_from_sig(&mut pk_fors[..], fors_sig, &digest[..], &mut adrs);

        Hypertree::<P, D>::new(&hasher).sign(
            ht_sig,
            &pk_fors[..],
            sk.seed(),
            idx_tree,
            idx_leaf,
            rng,
        )?;

        Signature::try_from(sig)
    }

    /// Verifies `signature` on `message` under `pk`.
    ///
    /// Returns `Err(Error::VerificationFailed)` if the signature is invalid.
    pub fn verify(&self, signature: &Signature<P>, message: &[u8], pk: &PublicKey) -> Result<()> {
        let mut digest = Zeroizing::new([0u8; HYP_DIGEST_BYTES]);
        HypHasher::<D>::h_msg(
            &mut digest,
            signature.randomizer(),
            pk.seed(),
            pk.root(),
            &signature.salt_array(),
            message,
        );
        if P::md_suffix_nonzero(&digest) {
            warn!("message digest suffix is not zero");
            return Err(Error::VerificationFailed);
        }

        let (idx_tree, idx_leaf) = Self::digest_indices(&digest);
        let mut adrs = Self::fors_adrs(idx_tree, idx_leaf);

        let hasher = HypHasher::<D>::new(pk.seed());
        let mut pk_fors = [0u8; HYP_N];
        ForsC::<P, D>::new(&hasher).pk_from_sig(
            &mut pk_fors,
            signature.fors(),
            &digest[..],
            &mut adrs,
        );

        let result = Hypertree::<P, D>::new(&hasher).verify(
            signature.hypertree(),
            &pk_fors,
            idx_tree,
            idx_leaf,
            pk.root(),
        );
        if result.is_err() {
            warn!(idx_tree, idx_leaf, "hypertree verification failed");
        }
        result
    }

    /// Signs `message` and returns `signature || message`.
    pub fn sign_attached<E: EntropySource>(
        &self,
        message: &[u8],
        sk: &SecretKey,
        rng: &mut E,
    ) -> Result<Vec<u8>> {
        let mut signed: Vec<u8> = self.sign(message, sk, rng)?.into();
        signed.extend_from_slice(message);
        Ok(signed)
    }

    /// Verifies a `signature || message` buffer and returns the message.
    pub fn open(&self, signed: &[u8], pk: &PublicKey) -> Result<Vec<u8>> {
        if signed.len() < P::SIGNATURE_BYTES {
            return Err(Error::BadLength(P::SIGNATURE_BYTES, signed.len()));
        }
        let (sig, message) = signed.split_at(P::SIGNATURE_BYTES);
        self.verify(&Signature::try_from(sig)?, message, pk)?;
        Ok(message.to_vec())
    }

    /// Tree and leaf index of the FORS+C key, read big-endian right after the FORS+C bits.
    fn digest_indices(digest: &[u8; HYP_DIGEST_BYTES]) -> (u64, u32) {
        let tree_start = P::FORS_MSG_BYTES;
        let leaf_start = tree_start + P::TREE_BYTES;
        let leaf_bytes = (P::LEAF_BITS + 7) / 8;

        let idx_tree = bytes_to_u64(&digest[tree_start..leaf_start])
            >> (P::TREE_BYTES * 8 - P::TREE_BITS);
        let idx_leaf = bytes_to_u32(&digest[leaf_start..leaf_start + leaf_bytes])
            >> (leaf_bytes * 8 - P::LEAF_BITS);
        (idx_tree, idx_leaf)
    }

    fn fors_adrs(idx_tree: u64, idx_leaf: u32) -> Adrs {
        let mut adrs = Adrs::default();
        adrs.set_layer_addr(0);
        adrs.set_tree_addr(idx_tree);
        adrs.set_type(AdrsType::ForsTree);
        adrs.set_keypair_addr(idx_leaf);
        adrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drbg::{HashDrbg, RngEntropy};
    use crate::params::{FastSign, FastVerify, SmallSign};
    use rand::rngs::OsRng;
    use rand::{Rng, RngCore};

    type Hyp = Hypericum<FastSign, DefaultHash>;

    const SCENARIO_SEED: [u8; 32] = [
        0x48, 0x79, 0x70, 0x65, 0x72, 0x69, 0x63, 0x75, 0x6d, 0x2d, 0x73, 0x65, 0x65, 0x64, 0x2d,
        0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x61, 0x62, 0x63, 0x64, 0x65,
        0x66, 0x21,
    ];

    fn flip_bit<P: ParameterSet>(sig: &Signature<P>, bit: usize) -> Signature<P> {
        let mut bytes: Vec<u8> = sig.clone().into();
        bytes[bit / 8] ^= 1 << (bit % 8);
        Signature::try_from(bytes).unwrap()
    }

    fn sign_and_verify<P: ParameterSet>() {
        let hyp = Hypericum::<P, DefaultHash>::new();
        let mut rng = RngEntropy(OsRng);

        let kg = hyp.keygen(&mut rng);
        assert!(kg.is_ok());
        let (pk, sk) = kg.unwrap();
        assert_eq!(sk.public_key(), pk);

        let mut long_message = vec![0u8; 3 * 64 + 17];
        OsRng.fill_bytes(&mut long_message);

        for message in [&b""[..], &b"Hypericum"[..], &long_message[..]] {
            let sig = hyp.sign(message, &sk, &mut rng).unwrap();
            assert_eq!(sig.as_ref().len(), P::SIGNATURE_BYTES, "{}", P::NAME);
            assert!(hyp.verify(&sig, message, &pk).is_ok(), "{}", P::NAME);
        }
    }

    fn tampering_is_rejected<P: ParameterSet>() {
        let hyp = Hypericum::<P, DefaultHash>::new();
        let mut rng = RngEntropy(OsRng);
        let (pk, sk) = hyp.keygen(&mut rng).unwrap();

        let message: [u8; 32] = OsRng.gen();
        let sig = hyp.sign(&message, &sk, &mut rng).unwrap();

        let total_bits = P::SIGNATURE_BYTES * 8;
        let mut bits = vec![
            0,
            HYP_N * 8 + 3,
            Signature::<P>::FORS_OFFSET * 8 + 1,
            Signature::<P>::HT_OFFSET * 8 + 7,
            100 * 8,
            total_bits - 1,
        ];
        bits.extend((0..16).map(|_| OsRng.gen_range(0..total_bits)));
        for bit in bits {
            assert_eq!(
                hyp.verify(&flip_bit(&sig, bit), &message, &pk),
                Err(Error::VerificationFailed),
                "{}: bit {}",
                P::NAME,
                bit
            );
        }

        for _ in 0..8 {
            let mut other = message;
            let bit = OsRng.gen_range(0..message.len() * 8);
            other[bit / 8] ^= 1 << (bit % 8);
            assert!(hyp.verify(&sig, &other, &pk).is_err());
        }

        let (other_pk, _) = hyp.keygen(&mut rng).unwrap();
        assert!(hyp.verify(&sig, &message, &other_pk).is_err());
    }

    #[test]
    fn test_hypericum() {
        sign_and_verify::<FastSign>();
        sign_and_verify::<FastVerify>();
    }

    #[test]
    fn test_tampering_is_rejected() {
        tampering_is_rejected::<FastSign>();
        tampering_is_rejected::<FastVerify>();
    }

    #[test]
    #[ignore = "small-sign keygen and signing take minutes in debug builds"]
    fn test_hypericum_small_sign() {
        sign_and_verify::<SmallSign>();
        tampering_is_rejected::<SmallSign>();
    }

    #[test]
    fn test_fixed_seed_fast_verify() {
        let hyp = Hypericum::<FastVerify, DefaultHash>::new();
        let mut rng = HashDrbg::<DefaultHash>::from_seed(SCENARIO_SEED);
        let (pk, sk) = hyp.keygen(&mut rng).unwrap();

        for message in [&b""[..], &b"Hypericum"[..]] {
            let sig = hyp.sign(message, &sk, &mut rng).unwrap();
            assert_eq!(sig.as_ref().len(), FastVerify::SIGNATURE_BYTES);
            assert!(hyp.verify(&sig, message, &pk).is_ok());

            let tampered = flip_bit(&sig, 100 * 8);
            assert_eq!(
                hyp.verify(&tampered, message, &pk),
                Err(Error::VerificationFailed)
            );
        }
    }

    #[test]
    fn test_fixed_seed_scenario() {
        let hyp = Hyp::new();
        let mut rng = HashDrbg::<DefaultHash>::from_seed(SCENARIO_SEED);
        assert!(!rng.is_hardware_based());

        let (pk, sk) = hyp.keygen(&mut rng).unwrap();
        let message = b"Hypericum";
        let sig = hyp.sign(message, &sk, &mut rng).unwrap();
        assert!(hyp.verify(&sig, message, &pk).is_ok());

        let tampered = flip_bit(&sig, 0);
        assert_eq!(tampered.as_ref()[0], sig.as_ref()[0] ^ 0x01);
        assert!(hyp.verify(&tampered, message, &pk).is_err());
    }

    #[test]
    fn test_fixed_entropy_is_reproducible() {
        let hyp = Hyp::new();
        let mut rng_a = HashDrbg::<DefaultHash>::from_seed(SCENARIO_SEED);
        let mut rng_b = HashDrbg::<DefaultHash>::from_seed(SCENARIO_SEED);

        let (pk_a, sk_a) = hyp.keygen(&mut rng_a).unwrap();
        let (pk_b, sk_b) = hyp.keygen(&mut rng_b).unwrap();
        assert_eq!(pk_a.as_ref(), pk_b.as_ref());
        assert_eq!(sk_a.as_ref(), sk_b.as_ref());

        let sig_a = hyp.sign(b"Hypericum", &sk_a, &mut rng_a).unwrap();
        let sig_b = hyp.sign(b"Hypericum", &sk_b, &mut rng_b).unwrap();
        assert_eq!(sig_a, sig_b);

        let mut seed = SCENARIO_SEED;
        seed[31] ^= 0x01;
        let (pk_c, _) = hyp.keygen(&mut HashDrbg::<DefaultHash>::from_seed(seed)).unwrap();
        assert_ne!(pk_a, pk_c);
    }

    #[test]
    fn test_key_layout() {
        let hyp = Hyp::new();
        let (pk, sk) = hyp.keygen(&mut RngEntropy(OsRng)).unwrap();

        assert_eq!(sk.as_ref().len(), HYP_SECRET_KEY_BYTES);
        assert_eq!(pk.as_ref().len(), HYP_PUBLIC_KEY_BYTES);
        assert_eq!(&sk.as_ref()[2 * HYP_N..], pk.as_ref());
        assert_eq!(sk.pk_seed(), pk.seed());
        assert_eq!(sk.pk_root(), pk.root());
        assert_ne!(sk.seed(), sk.prf());

        // the root is recomputable from the seeds
        let hasher = HypHasher::<DefaultHash>::new(pk.seed());
        let mut root = [0u8; HYP_N];
        Hypertree::<FastSign, DefaultHash>::new(&hasher)
            .gen_pk(&mut root, sk.seed())
            .unwrap();
        assert_eq!(&root[..], pk.root());

        assert_eq!(
            PublicKey::try_from(&pk.as_ref()[1..]),
            Err(Error::BadLength(HYP_PUBLIC_KEY_BYTES, HYP_PUBLIC_KEY_BYTES - 1))
        );
        assert_eq!(
            SecretKey::try_from(sk.as_ref()).map(|k| k.public_key()),
            Ok(pk)
        );
    }

    #[test]
    fn test_digest_indices() {
        // fast-sign: 41 FORS+C bytes, 63 tree bits in 8 bytes, 3 leaf bits in 1 byte
        let mut digest = [0u8; HYP_DIGEST_BYTES];
        digest[41..49].copy_from_slice(&[0xff, 0, 0, 0, 0, 0, 0, 0x03]);
        digest[49] = 0b1010_0000;
        assert_eq!(
            Hyp::digest_indices(&digest),
            (0x7f80_0000_0000_0001, 0b101)
        );

        // small-sign: 30 FORS+C bytes, 60 tree bits, 10 leaf bits in 2 bytes
        let mut digest = [0xffu8; HYP_DIGEST_BYTES];
        digest[38] = 0x80;
        digest[39] = 0x7f;
        assert_eq!(
            Hypericum::<SmallSign, DefaultHash>::digest_indices(&digest),
            ((1u64 << 60) - 1, 0b10_0000_0001)
        );
    }

    #[test]
    fn test_signature_views() {
        fn check<P: ParameterSet>() {
            let mut bytes = vec![0u8; P::SIGNATURE_BYTES];
            OsRng.fill_bytes(&mut bytes);
            let sig = Signature::<P>::try_from(bytes.clone()).unwrap();

            assert_eq!(sig.randomizer(), &bytes[..HYP_N]);
            assert_eq!(sig.salt(), &bytes[HYP_N..HYP_N + HYP_NONCE_BYTES]);
            assert_eq!(sig.fors().len(), P::FORS_BYTES);
            assert_eq!(sig.hypertree().len(), P::XMSSMT_BYTES);
            assert_eq!(sig.xmss_layer(P::D - 1).map(|l| l.len()), Some(P::XMSS_BYTES));
            assert!(sig.xmss_layer(P::D).is_none());
            assert_eq!(
                HYP_N + HYP_NONCE_BYTES + sig.fors().len() + sig.hypertree().len(),
                P::SIGNATURE_BYTES
            );

            assert_eq!(
                Signature::<P>::try_from(&bytes[1..]),
                Err(Error::BadLength(P::SIGNATURE_BYTES, P::SIGNATURE_BYTES - 1))
            );

            // correct length garbage is rejected without panicking
            let pk = PublicKey::from([7u8; HYP_PUBLIC_KEY_BYTES]);
            assert!(Hypericum::<P, DefaultHash>::new()
                .verify(&sig, b"Hypericum", &pk)
                .is_err());
        }

        check::<FastSign>();
        check::<FastVerify>();
        check::<SmallSign>();
    }

    #[test]
    fn test_attached() {
        let hyp = Hyp::new();
        let mut rng = RngEntropy(OsRng);
        let (pk, sk) = hyp.keygen(&mut rng).unwrap();

        let message = b"attached Hypericum message";
        let signed = hyp.sign_attached(message, &sk, &mut rng).unwrap();
        assert_eq!(signed.len(), FastSign::SIGNATURE_BYTES + message.len());
        assert_eq!(hyp.open(&signed, &pk).unwrap(), message);

        let mut forged = signed.clone();
        let last = forged.len() - 1;
        forged[last] ^= 0x01;
        assert_eq!(hyp.open(&forged, &pk), Err(Error::VerificationFailed));

        assert_eq!(
            hyp.open(&signed[..FastSign::SIGNATURE_BYTES - 1], &pk),
            Err(Error::BadLength(
                FastSign::SIGNATURE_BYTES,
                FastSign::SIGNATURE_BYTES - 1
            ))
        );
        // an empty message is still a valid attachment
        let signed = hyp.sign_attached(b"", &sk, &mut rng).unwrap();
        assert_eq!(hyp.open(&signed, &pk).unwrap(), Vec::<u8>::new());
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_serialization() {
        let hyp = Hyp::new();
        let mut rng = RngEntropy(OsRng);
        let (pk, sk) = hyp.keygen(&mut rng).unwrap();
        let sig = hyp.sign(b"serde", &sk, &mut rng).unwrap();

        let pk_json = serde_json::to_string(&pk).unwrap();
        let sk_json = serde_json::to_string(&sk).unwrap();
        let sig_json = serde_json::to_string(&sig).unwrap();

        let pk_back: PublicKey = serde_json::from_str(&pk_json).unwrap();
        let sk_back: SecretKey = serde_json::from_str(&sk_json).unwrap();
        let sig_back: Signature<FastSign> = serde_json::from_str(&sig_json).unwrap();
        assert_eq!(pk_back, pk);
        assert_eq!(sk_back, sk);
        assert_eq!(sig_back, sig);
        assert!(hyp.verify(&sig_back, b"serde", &pk_back).is_ok());

        assert!(serde_json::from_str::<Signature<FastSign>>("[1,2,3]").is_err());
    }
}
