//! Hash-domain functions of Hypericum.
//!
//! Every tweakable hash hashes `PK.seed || 0^32 || ADRS || M1 || M2` with the underlying
//! primitive. [`HypHasher`] absorbs the `PK.seed || 0^32` prefix once and clones that state for
//! each call. The WOTS+C encoding hash [`HypHasher::h_select`] has no zero block.

pub(crate) mod prf;

use crate::adrs::Adrs;
use crate::params::{HYP_DIGEST_BYTES, HYP_N, HYP_NONCE_BYTES, HYP_PRF_MSG_NONCE};
use digest::core_api::BlockSizeUser;
use digest::typenum::U32;
use digest::{Digest, OutputSizeUser};
use zeroize::Zeroizing;

/// A hash primitive usable by Hypericum: any `digest` hash with a 32-byte output.
pub trait HashAlgo:
    Digest + BlockSizeUser + OutputSizeUser<OutputSize = U32> + Clone + Default + Send + Sync
{
}

impl<T> HashAlgo for T where
    T: Digest + BlockSizeUser + OutputSizeUser<OutputSize = U32> + Clone + Default + Send + Sync
{
}

#[cfg(feature = "streebog")]
pub type DefaultHash = streebog::Streebog256;
#[cfg(all(feature = "sha2", not(feature = "streebog")))]
pub type DefaultHash = sha2::Sha256;
#[cfg(all(feature = "sha3", not(feature = "streebog"), not(feature = "sha2")))]
pub type DefaultHash = sha3::Sha3_256;

#[cfg(not(any(feature = "streebog", feature = "sha2", feature = "sha3")))]
compile_error!("one of the features `streebog`, `sha2` or `sha3` must be enabled");

/// Single-shot hash of the concatenation of `parts`.
pub(crate) fn hash<D: HashAlgo>(output: &mut [u8], parts: &[&[u8]]) {
    let mut hasher = D::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    output[..HYP_N].copy_from_slice(&hasher.finalize()[..HYP_N]);
}

#[derive(Clone)]
pub(crate) struct HypHasher<D: HashAlgo> {
    seeded: D,
    pk_seed: [u8; HYP_N],
}

impl<D: HashAlgo> HypHasher<D> {
    /// Absorbs the first `HYP_N` bytes of `pk_seed` followed by a zero block.
    pub(crate) fn new(pk_seed: &[u8]) -> Self {
        let mut seed = [0u8; HYP_N];
        seed.copy_from_slice(&pk_seed[..HYP_N]);

        let mut seeded = D::new();
        Digest::update(&mut seeded, seed);
        Digest::update(&mut seeded, [0u8; 32]);

        Self {
            seeded,
            pk_seed: seed,
        }
    }

    pub(crate) fn pk_seed(&self) -> &[u8; HYP_N] {
        &self.pk_seed
    }

    fn th(&self, output: &mut [u8], adrs: &Adrs, msg1: &[u8], msg2: &[u8]) {
        let mut hasher = self.seeded.clone();
        Digest::update(&mut hasher, adrs.to_bytes());
        Digest::update(&mut hasher, msg1);
        Digest::update(&mut hasher, msg2);
        output[..HYP_N].copy_from_slice(&hasher.finalize()[..HYP_N]);
    }

    /// F(PK.seed, ADRS, M) on a single `HYP_N`-byte block.
    pub(crate) fn f(&self, output: &mut [u8], input: &[u8], adrs: &Adrs) {
        self.th(output, adrs, &input[..HYP_N], &[]);
    }

    /// Applies [`Self::f`], but modifies the given input in place.
    pub(crate) fn f_inplace(&self, inout: &mut [u8], adrs: &Adrs) {
        let mut hasher = self.seeded.clone();
        Digest::update(&mut hasher, adrs.to_bytes());
        Digest::update(&mut hasher, &inout[..HYP_N]);
        inout[..HYP_N].copy_from_slice(&hasher.finalize()[..HYP_N]);
    }

    /// H(PK.seed, ADRS, left || right), merging two tree nodes.
    pub(crate) fn h_node(&self, output: &mut [u8], left: &[u8], right: &[u8], adrs: &Adrs) {
        self.th(output, adrs, &left[..HYP_N], &right[..HYP_N]);
    }

    /// T_l, compressing the `L` chain ends of a WOTS+C public key.
    pub(crate) fn t_l(&self, output: &mut [u8], input: &[u8], adrs: &Adrs) {
        debug_assert_eq!(input.len() % HYP_N, 0);
        self.th(output, adrs, input, &[]);
    }

    /// T_k, compressing the `K - 1` FORS+C roots.
    pub(crate) fn t_k(&self, output: &mut [u8], input: &[u8], adrs: &Adrs) {
        debug_assert_eq!(input.len() % HYP_N, 0);
        self.th(output, adrs, input, &[]);
    }

    /// Hashes `PK.seed || ADRS || salt || M`, used to search the WOTS+C encoding.
    pub(crate) fn h_select(
        &self,
        output: &mut [u8],
        salt: &[u8; HYP_NONCE_BYTES],
        input: &[u8],
        adrs: &Adrs,
    ) {
        hash::<D>(
            output,
            &[&self.pk_seed, &adrs.to_bytes(), salt, &input[..HYP_N]],
        );
    }

    /// PRF(SK.seed, PK.seed, ADRS) = PRF_TLS(SK.seed, ADRS, PK.seed), one block.
    pub(crate) fn prf(&self, output: &mut [u8], sk_seed: &[u8], adrs: &Adrs) {
        prf::prf_tls::<D>(
            &mut output[..HYP_N],
            &sk_seed[..HYP_N],
            &adrs.to_bytes(),
            &self.pk_seed,
        );
    }

    /// H_msg(R, PK.seed, PK.root, s, M) = PRF_TLS(R, hash(R || PK.seed || PK.root || s || M),
    /// PK.seed), two blocks.
    pub(crate) fn h_msg(
        output: &mut [u8; HYP_DIGEST_BYTES],
        rnd: &[u8],
        pk_seed: &[u8],
        pk_root: &[u8],
        salt: &[u8; HYP_NONCE_BYTES],
        message: &[u8],
    ) {
        let mut label = Zeroizing::new([0u8; HYP_N]);
        hash::<D>(
            &mut label[..],
            &[&rnd[..HYP_N], &pk_seed[..HYP_N], &pk_root[..HYP_N], salt, message],
        );
        prf::prf_tls::<D>(output, &rnd[..HYP_N], &label[..], &pk_seed[..HYP_N]);
    }

    /// PRF_msg(SK.prf, PK.seed, M) = HMAC(SK.prf, PK.seed || nonce || M), the randomizer `R`.
    pub(crate) fn prf_msg(output: &mut [u8], sk_prf: &[u8], pk_seed: &[u8], message: &[u8]) {
        prf::hmac::<D>(
            output,
            &sk_prf[..HYP_N],
            &[&pk_seed[..HYP_N], HYP_PRF_MSG_NONCE, message],
        );
    }
}
