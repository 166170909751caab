//! # eXtended Merkle Signature Scheme (XMSS)
//!
//! A single hypertree layer: a Merkle tree of height `H'` over `2^H'` WOTS+C public keys.
//! The hypertree addresses a tree by the layer and tree fields of [`Adrs`] and a leaf by its
//! keypair field.

use crate::adrs::{Adrs, AdrsType};
use crate::drbg::EntropySource;
use crate::error::Result;
use crate::hash::{HashAlgo, HypHasher};
use crate::params::{ParameterSet, HYP_N};
use crate::tree_hash::tree_hash;
use crate::wotsc::WotsC;
use core::marker::PhantomData;

/// One XMSS layer of height `H' = H / D` with WOTS+C leaves.
///
/// A signature is the WOTS+C signature of the leaf followed by `H'` authentication nodes,
/// `P::XMSS_BYTES` bytes in total.
pub(crate) struct Xmss<'a, P: ParameterSet, D: HashAlgo> {
    hasher: &'a HypHasher<D>,
    wots: WotsC<'a, P, D>,
    _params: PhantomData<P>,
}

impl<'a, P: ParameterSet, D: HashAlgo> Xmss<'a, P, D> {
    pub(crate) fn new(hasher: &'a HypHasher<D>) -> Self {
        Self {
            hasher,
            wots: WotsC::new(hasher),
            _params: PhantomData,
        }
    }

    /// Root of the subtree of height `target_height` whose leftmost leaf is `start_index`.
    pub(crate) fn tree_hash(
        &self,
        output: &mut [u8],
        sk_seed: &[u8],
        start_index: u32,
        target_height: u32,
        adrs: &mut Adrs,
    ) -> Result<()> {
        tree_hash(
            self.hasher,
            output,
            start_index,
            target_height,
            adrs,
            AdrsType::Tree,
            |leaf, index, adrs| {
                adrs.set_keypair_addr(index);
                self.wots.gen_pk(leaf, sk_seed, adrs)
            },
        )
    }

    /// Computes the root of the tree addressed by the layer and tree fields of `adrs`.
    ///
    /// # Arguments
    ///
    /// * `output` - Output for the `HYP_N`-byte root.
    /// * `sk_seed` - The `HYP_N`-byte secret seed.
    /// * `adrs` - Address with the layer and tree fields set.
    pub(crate) fn gen_pk(&self, output: &mut [u8], sk_seed: &[u8], adrs: &mut Adrs) -> Result<()> {
        self.tree_hash(output, sk_seed, 0, P::H_PRIME as u32, adrs)
    }

    /// Signs the `HYP_N`-byte `msg` with leaf `idx`.
    ///
    /// # Arguments
    ///
    /// * `sig` - Output for the `P::XMSS_BYTES`-byte signature: the WOTS+C signature, then
    ///   the `H'` authentication nodes from the leaf upwards.
    /// * `msg` - The `HYP_N`-byte message.
    /// * `sk_seed` - The `HYP_N`-byte secret seed.
    /// * `idx` - Leaf index, below `2^H'`.
    /// * `adrs` - Address with the layer and tree fields set.
    /// * `rng` - Source of the WOTS+C salts.
    ///
    /// # Returns
    ///
    /// [`crate::Error::ChecksumNotFound`] if the WOTS+C salt search fails.
    pub(crate) fn sign<E: EntropySource>(
        &self,
        sig: &mut [u8],
        msg: &[u8],
        sk_seed: &[u8],
        idx: u32,
        adrs: &mut Adrs,
        rng: &mut E,
    ) -> Result<()> {
        let (wots_sig, auth) = sig[..P::XMSS_BYTES].split_at_mut(P::WOTS_BYTES);

        for (j, node) in auth.chunks_exact_mut(HYP_N).enumerate() {
            let k = (idx >> j) ^ 1;
            self.tree_hash(node, sk_seed, k << j, j as u32, adrs)?;
        }

        adrs.set_type(AdrsType::WotsHash);
        adrs.set_keypair_addr(idx);
        self.wots.sign(wots_sig, msg, sk_seed, adrs, rng)
    }

    /// Recomputes the root of the tree from a signature by leaf `idx` on `msg`.
    ///
    /// # Arguments
    ///
    /// * `output` - Output for the `HYP_N`-byte root.
    /// * `sig` - A `P::XMSS_BYTES`-byte signature.
    /// * `msg` - The signed `HYP_N`-byte message.
    /// * `idx` - Leaf index claimed for `sig`.
    /// * `adrs` - Address with the layer and tree fields set.
    ///
    /// # Returns
    ///
    /// [`crate::Error::VerificationFailed`] if the WOTS+C checksum of `sig` does not hold.
    /// A wrong signature otherwise yields a different root, which the caller compares.
    pub(crate) fn pk_from_sig(
        &self,
        output: &mut [u8],
        sig: &[u8],
        msg: &[u8],
        idx: u32,
        adrs: &mut Adrs,
    ) -> Result<()> {
        let (wots_sig, auth) = sig[..P::XMSS_BYTES].split_at(P::WOTS_BYTES);
        let mut node = [0u8; HYP_N];
        let mut parent = [0u8; HYP_N];

        adrs.set_keypair_addr(idx);
        self.wots.pk_from_sig(&mut node, wots_sig, msg, adrs)?;

        adrs.set_type(AdrsType::Tree);
        adrs.set_tree_index(idx);
        for (k, auth_k) in auth.chunks_exact(HYP_N).enumerate() {
            adrs.set_tree_height(k as u32 + 1);
            if (idx >> k) & 1 == 0 {
                adrs.set_tree_index(adrs.get_tree_index() >> 1);
                self.hasher.h_node(&mut parent, &node, auth_k, adrs);
            } else {
                adrs.set_tree_index((adrs.get_tree_index() - 1) >> 1);
                self.hasher.h_node(&mut parent, auth_k, &node, adrs);
            }
            node = parent;
        }

        output[..HYP_N].copy_from_slice(&node);
        Ok(())
    }
}
