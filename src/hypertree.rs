//! # Hypertree (XMSS^MT)
//!
//! `D` layers of XMSS trees. Layer 0 signs the FORS+C public key, every upper layer signs the
//! root of the tree below it, and the single tree of layer `D - 1` carries the public root.
//! The leaf used in layer `j + 1` is the low `H'` bits of the tree index of layer `j`.

use crate::adrs::Adrs;
use crate::drbg::EntropySource;
use crate::error::{Error, Result};
use crate::hash::{HashAlgo, HypHasher};
use crate::params::{ParameterSet, HYP_N};
use crate::xmss::Xmss;
use subtle::ConstantTimeEq;
use tracing::trace;
use zeroize::Zeroizing;

pub(crate) struct Hypertree<'a, P: ParameterSet, D: HashAlgo> {
    xmss: Xmss<'a, P, D>,
}

impl<'a, P: ParameterSet, D: HashAlgo> Hypertree<'a, P, D> {
    pub(crate) fn new(hasher: &'a HypHasher<D>) -> Self {
        Self {
            xmss: Xmss::new(hasher),
        }
    }

    /// Leaf of the next layer and tree index of the next layer.
    fn next_coordinates(idx_tree: u64) -> (u32, u64) {
        let idx_leaf = (idx_tree & ((1u64 << P::H_PRIME) - 1)) as u32;
        (idx_leaf, idx_tree >> P::H_PRIME)
    }

    /// Root of the single tree of the top layer.
    pub(crate) fn gen_pk(&self, output: &mut [u8], sk_seed: &[u8]) -> Result<()> {
        let mut adrs = Adrs::default();
        adrs.set_layer_addr((P::D - 1) as u32);
        adrs.set_tree_addr(0);
        self.xmss.gen_pk(output, sk_seed, &mut adrs)
    }

    /// Signs the `HYP_N`-byte `msg` from leaf `idx_leaf` of tree `idx_tree` in layer 0,
    /// writing `P::XMSSMT_BYTES` bytes.
    pub(crate) fn sign<E: EntropySource>(
        &self,
        sig: &mut [u8],
        msg: &[u8],
        sk_seed: &[u8],
        mut idx_tree: u64,
        mut idx_leaf: u32,
        rng: &mut E,
    ) -> Result<()> {
        let mut adrs = Adrs::default();
        adrs.set_layer_addr(0);
        adrs.set_tree_addr(idx_tree);

        // message of the current layer: `msg`, then the root of the layer below
        let mut node = Zeroizing::new([0u8; HYP_N]);
        node.copy_from_slice(&msg[..HYP_N]);

        for (j, layer_sig) in sig[..P::XMSSMT_BYTES]
            .chunks_exact_mut(P::XMSS_BYTES)
            .enumerate()
        {
            if j > 0 {
                (idx_leaf, idx_tree) = Self::next_coordinates(idx_tree);
                adrs.set_layer_addr(j as u32);
                adrs.set_tree_addr(idx_tree);
            }
            trace!(layer = j, idx_tree, idx_leaf, "signing hypertree layer");

            let layer_msg = Zeroizing::new(*node);
            self.xmss
                .sign(layer_sig, &layer_msg[..], sk_seed, idx_leaf, &mut adrs, rng)?;

            if j + 1 < P::D {
                self.xmss.pk_from_sig(
                    &mut node[..],
                    layer_sig,
                    &layer_msg[..],
                    idx_leaf,
                    &mut adrs,
                )?;
            }
        }
        Ok(())
    }

    /// Checks a hypertree signature on `msg` against the public root `pk_root`.
    pub(crate) fn verify(
        &self,
        sig: &[u8],
        msg: &[u8],
        mut idx_tree: u64,
        mut idx_leaf: u32,
        pk_root: &[u8],
    ) -> Result<()> {
        let mut adrs = Adrs::default();
        adrs.set_layer_addr(0);
        adrs.set_tree_addr(idx_tree);

        let mut node = [0u8; HYP_N];
        let mut layers = sig[..P::XMSSMT_BYTES].chunks_exact(P::XMSS_BYTES);

        if let Some(layer_sig) = layers.next() {
            self.xmss
                .pk_from_sig(&mut node, layer_sig, &msg[..HYP_N], idx_leaf, &mut adrs)?;
        }

        for (j, layer_sig) in layers.enumerate().map(|(j, s)| (j + 1, s)) {
            (idx_leaf, idx_tree) = Self::next_coordinates(idx_tree);
            adrs.set_layer_addr(j as u32);
            adrs.set_tree_addr(idx_tree);

            let child = node;
            self.xmss
                .pk_from_sig(&mut node, layer_sig, &child, idx_leaf, &mut adrs)?;
            trace!(layer = j, idx_tree, idx_leaf, "recovered hypertree layer root");
        }

        if bool::from(node[..].ct_eq(&pk_root[..HYP_N])) {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }
}
