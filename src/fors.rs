//! # Forest Of Random Subsets with Checksum (FORS+C)
//!
//! The message digest selects one leaf in each of `K` trees of height `B`. Signing requires the
//! last index to be zero (the digest suffix check in [`crate::sign`]), so only the first
//! `K - 1` trees are signed and the last one is never revealed.
//!
//! Leaves of tree `i` use the global indices `i * 2^B .. (i + 1) * 2^B`. The trees of a
//! signature are independent and are computed in parallel with `rayon`.

use crate::adrs::{Adrs, AdrsType};
use crate::error::Result;
use crate::hash::{HashAlgo, HypHasher};
use crate::params::{ParameterSet, HYP_N};
use crate::tree_hash::tree_hash;
use core::marker::PhantomData;
use rayon::prelude::*;
use zeroize::Zeroizing;

pub(crate) struct ForsC<'a, P: ParameterSet, D: HashAlgo> {
    hasher: &'a HypHasher<D>,
    _params: PhantomData<P>,
}

impl<'a, P: ParameterSet, D: HashAlgo> ForsC<'a, P, D> {
    pub(crate) fn new(hasher: &'a HypHasher<D>) -> Self {
        Self {
            hasher,
            _params: PhantomData,
        }
    }

    /// Interprets `msg` as `K - 1` big-endian `B`-bit unsigned integers, most significant bit
    /// of every byte first.
    pub(crate) fn message_to_indices(indices: &mut [u32], msg: &[u8]) {
        let mut offset = 0usize;
        for index in indices.iter_mut().take(P::K_HATCH) {
            *index = 0;
            for _ in 0..P::B {
                let bit = (msg[offset >> 3] >> (7 - (offset & 0x7))) & 0x1;
                *index = (*index << 1) | bit as u32;
                offset += 1;
            }
        }
    }

    /// Secret value of the leaf with global index `idx`.
    pub(crate) fn gen_sk(&self, output: &mut [u8], sk_seed: &[u8], idx: u32, adrs: &mut Adrs) {
        adrs.set_type(AdrsType::KeygenFors);
        adrs.set_tree_height(0);
        adrs.set_leaf_index(idx);
        self.hasher.prf(output, sk_seed, adrs);
    }

    /// Root of the FORS+C subtree of height `target_height` starting at global leaf
    /// `start_index`.
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
            AdrsType::ForsTree,
            |leaf, index, adrs| {
                let mut sk = Zeroizing::new([0u8; HYP_N]);
                self.gen_sk(&mut sk[..], sk_seed, index, adrs);

                adrs.set_type(AdrsType::ForsTree);
                adrs.set_tree_height(0);
                adrs.set_tree_index(index);
                self.hasher.f(leaf, &sk[..], adrs);
                Ok(())
            },
        )
    }

    /// Writes the `P::FORS_BYTES`-byte signature of the digest `msg`: for each of the `K - 1`
    /// trees, the selected secret value followed by its `B` authentication nodes.
    pub(crate) fn sign(
        &self,
        sig: &mut [u8],
        msg: &[u8],
        sk_seed: &[u8],
        adrs: &Adrs,
    ) -> Result<()> {
        let t = 1u32 << P::B;
        let mut indices = Zeroizing::new(vec![0u32; P::K_HATCH]);
        Self::message_to_indices(&mut indices, msg);

        sig[..P::FORS_BYTES]
            .par_chunks_mut((P::B + 1) * HYP_N)
            .zip(indices.par_iter())
            .enumerate()
            .try_for_each(|(i, (tree_sig, &idx))| {
                let mut adrs = *adrs;
                let tree_offset = i as u32 * t;
                let (sk, auth) = tree_sig.split_at_mut(HYP_N);

                self.gen_sk(sk, sk_seed, tree_offset + idx, &mut adrs);

                for (j, node) in auth.chunks_exact_mut(HYP_N).enumerate() {
                    let s = (idx >> j) ^ 1;
                    self.tree_hash(
                        node,
                        sk_seed,
                        tree_offset + (s << j),
                        j as u32,
                        &mut adrs,
                    )?;
                }
                Ok(())
            })
    }

    /// Recomputes the FORS+C public key from a signature and the digest `msg`.
    pub(crate) fn pk_from_sig(&self, output: &mut [u8], sig: &[u8], msg: &[u8], adrs: &mut Adrs) {
        let t = 1u32 << P::B;
        let mut indices = vec![0u32; P::K_HATCH];
        Self::message_to_indices(&mut indices, msg);
        let mut roots = vec![0u8; P::K_HATCH * HYP_N];
        let mut parent = [0u8; HYP_N];

        adrs.set_type(AdrsType::ForsTree);
        for (i, (root, tree_sig)) in roots
            .chunks_exact_mut(HYP_N)
            .zip(sig[..P::FORS_BYTES].chunks_exact((P::B + 1) * HYP_N))
            .enumerate()
        {
            let idx = indices[i];
            let (sk, auth) = tree_sig.split_at(HYP_N);

            adrs.set_tree_height(0);
            adrs.set_tree_index(i as u32 * t + idx);
            self.hasher.f(root, sk, adrs);

            for (j, auth_j) in auth.chunks_exact(HYP_N).enumerate() {
                adrs.set_tree_height(j as u32 + 1);
                if (idx >> j) & 1 == 0 {
                    adrs.set_tree_index(adrs.get_tree_index() / 2);
                    self.hasher.h_node(&mut parent, root, auth_j, adrs);
                } else {
                    adrs.set_tree_index((adrs.get_tree_index() - 1) / 2);
                    self.hasher.h_node(&mut parent, auth_j, root, adrs);
                }
                root.copy_from_slice(&parent);
            }
        }

        adrs.set_type(AdrsType::ForsRoots);
        self.hasher.t_k(output, &roots, adrs);
    }
}
