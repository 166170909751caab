//! # Hypericum parameter sets
//!
//! A parameter set fixes five constants: the hypertree height `H`, the number of hypertree
//! layers `D`, the FORS+C tree height `B`, the FORS+C tree count `K` (including the forced-zero
//! tree) and the Winternitz parameter `W`. Every other size used by the scheme is derived from
//! them by the provided associated constants of [`ParameterSet`].
//!
//! Three published sets are shipped, one per module. The set used by
//! [`Hypericum`](crate::Hypericum) by default is chosen at compile time with the `fast-sign`
//! (default), `fast-verify` or `small-sign` feature.

mod fast_sign;
mod fast_verify;
mod small_sign;

pub use fast_sign::FastSign;
pub use fast_verify::FastVerify;
pub use small_sign::SmallSign;

/// Hash output length in bytes.
pub const HYP_N: usize = 32;

/// Hash output length in bits.
pub const HYP_N_BITS: usize = HYP_N * 8;

/// Length in bytes of the salts used by WOTS+C and by the message digest.
pub const HYP_NONCE_BYTES: usize = 4;

/// Length in bytes of an encoded address.
pub const HYP_ADRS_BYTES: usize = 28;

/// Length in bytes of the randomized message digest.
pub const HYP_DIGEST_BYTES: usize = 64;

/// Upper bound on the salts tried by WOTS+C while searching for the target checksum.
pub const HYP_MAX_ITERATIONS: u32 = 186_731;

/// Upper bound on the salts tried while searching for a message digest with a zero suffix.
pub const HYP_SIGN_MAX_ITERATIONS: u32 = 23_258_071;

/// Domain constant mixed into the message randomizer `R`.
pub const HYP_PRF_MSG_NONCE: &[u8; HYP_N] = b"5475726368656e6b6f7c4b5544494e4f";

/// Public-key byte size: `PK.seed || PK.root`.
pub const HYP_PUBLIC_KEY_BYTES: usize = 2 * HYP_N;

/// Secret-key byte size: `SK.seed || SK.prf || PK`.
pub const HYP_SECRET_KEY_BYTES: usize = 2 * HYP_N + HYP_PUBLIC_KEY_BYTES;

/// Constants of a Hypericum parameter set.
///
/// Implementors only provide `NAME`, `H`, `D`, `B`, `K`, `W` and
/// [`md_suffix_nonzero`](ParameterSet::md_suffix_nonzero); the derived sizes must not be
/// overridden.
pub trait ParameterSet: Copy + Clone + core::fmt::Debug + Default + Send + Sync + 'static {
    /// Human readable name of the set.
    const NAME: &'static str;

    /// Height of the hypertree.
    const H: usize;
    /// Number of hypertree layers.
    const D: usize;
    /// FORS+C tree height.
    const B: usize;
    /// FORS+C tree count, including the tree forced to zero by the digest suffix.
    const K: usize;
    /// Winternitz parameter, one of 4, 16 or 256.
    const W: usize;

    /// Bits per base-`w` digit.
    const LOG_W: usize = Self::W.trailing_zeros() as usize;
    /// Number of WOTS+C chains.
    const L: usize = HYP_N_BITS / Self::LOG_W;
    /// Target checksum of a WOTS+C encoding.
    const S_WN: usize = ((Self::W - 1) * Self::L) >> 1;
    /// Number of FORS+C trees that are actually signed.
    const K_HATCH: usize = Self::K - 1;
    /// Height of a single XMSS layer.
    const H_PRIME: usize = Self::H / Self::D;

    /// WOTS+C signature bytes: `L` chain values followed by the salt.
    const WOTS_BYTES: usize = Self::L * HYP_N + HYP_NONCE_BYTES;
    /// XMSS signature bytes: WOTS+C signature followed by the authentication path.
    const XMSS_BYTES: usize = Self::WOTS_BYTES + Self::H_PRIME * HYP_N;
    /// Hypertree signature bytes.
    const XMSSMT_BYTES: usize = Self::D * Self::XMSS_BYTES;
    /// FORS+C signature bytes.
    const FORS_BYTES: usize = (Self::B + 1) * Self::K_HATCH * HYP_N;
    /// Signature bytes: `R || s || SIG_FORS || SIG_HT`.
    const SIGNATURE_BYTES: usize =
        HYP_N + HYP_NONCE_BYTES + Self::FORS_BYTES + Self::XMSSMT_BYTES;

    /// Digest bytes covering all `K` FORS+C indices.
    const FORS_MSG_BYTES: usize = (Self::K * Self::B + 7) / 8;
    /// Bits of the tree index.
    const TREE_BITS: usize = Self::H - Self::H_PRIME;
    /// Digest bytes holding the tree index.
    const TREE_BYTES: usize = (Self::TREE_BITS + 7) / 8;
    /// Bits of the leaf index.
    const LEAF_BITS: usize = Self::H_PRIME;

    /// Returns `true` when the bits of the last FORS+C index in `digest` are not all zero.
    ///
    /// The byte positions and masks are fixed per parameter set.
    fn md_suffix_nonzero(digest: &[u8; HYP_DIGEST_BYTES]) -> bool;
}

/// Compile-time sanity checks shared by all parameter sets.
pub(crate) const fn check_params<P: ParameterSet>() -> bool {
    P::H % P::D == 0
        && (P::W == 4 || P::W == 16 || P::W == 256)
        && P::H_PRIME <= 32
        && P::TREE_BITS < 64
        && P::B <= 31
        && P::K >= 2
        && P::FORS_MSG_BYTES + P::TREE_BYTES + 4 <= HYP_DIGEST_BYTES
}

#[cfg(feature = "fast-sign")]
pub type DefaultParams = FastSign;
#[cfg(all(feature = "fast-verify", not(feature = "fast-sign")))]
pub type DefaultParams = FastVerify;
#[cfg(all(
    feature = "small-sign",
    not(feature = "fast-sign"),
    not(feature = "fast-verify")
))]
pub type DefaultParams = SmallSign;
#[cfg(not(any(feature = "fast-sign", feature = "fast-verify", feature = "small-sign")))]
pub type DefaultParams = FastSign;
