//! # Tree hash
//!
//! Stack-based computation of a Merkle subtree root, shared by the XMSS layers and the FORS+C
//! trees. Leaves come from a closure, so one engine serves both leaf types.

use crate::adrs::{Adrs, AdrsType};
use crate::error::Result;
use crate::hash::{HashAlgo, HypHasher};
use crate::params::HYP_N;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A tree node waiting on the stack for its sibling.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct Node {
    pub(crate) digest: [u8; HYP_N],
    pub(crate) height: u32,
}

impl Node {
    fn leaf() -> Self {
        Self {
            digest: [0u8; HYP_N],
            height: 0,
        }
    }
}

/// Node stack of the tree-hash algorithm, preallocated for `target_height + 1` entries.
pub(crate) struct NodeStack {
    nodes: Vec<Node>,
    high_water: usize,
}

impl NodeStack {
    pub(crate) fn with_height(target_height: u32) -> Self {
        Self {
            nodes: Vec::with_capacity(target_height as usize + 1),
            high_water: 0,
        }
    }

    fn push(&mut self, node: Node) {
        debug_assert!(self.nodes.len() < self.nodes.capacity());
        self.nodes.push(node);
        self.high_water = self.high_water.max(self.nodes.len());
    }

    fn pop(&mut self) -> Option<Node> {
        self.nodes.pop()
    }

    fn top_height(&self) -> Option<u32> {
        self.nodes.last().map(|node| node.height)
    }

    pub(crate) fn high_water(&self) -> usize {
        self.high_water
    }
}

/// Computes the root of the subtree of height `target_height` whose leftmost leaf is
/// `start_index`, writing it into `output`.
///
/// `leaf(digest, index, adrs)` writes the leaf at global `index`; it may change the type of
/// `adrs`. Internal nodes are merged with `H_node` under an address of type `node_type`.
pub(crate) fn tree_hash<D, L>(
    hasher: &HypHasher<D>,
    output: &mut [u8],
    start_index: u32,
    target_height: u32,
    adrs: &mut Adrs,
    node_type: AdrsType,
    leaf: L,
) -> Result<()>
where
    D: HashAlgo,
    L: FnMut(&mut [u8], u32, &mut Adrs) -> Result<()>,
{
    let mut stack = NodeStack::with_height(target_height);
    tree_hash_with_stack(
        hasher,
        output,
        start_index,
        target_height,
        adrs,
        node_type,
        leaf,
        &mut stack,
    )
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn tree_hash_with_stack<D, L>(
    hasher: &HypHasher<D>,
    output: &mut [u8],
    start_index: u32,
    target_height: u32,
    adrs: &mut Adrs,
    node_type: AdrsType,
    mut leaf: L,
    stack: &mut NodeStack,
) -> Result<()>
where
    D: HashAlgo,
    L: FnMut(&mut [u8], u32, &mut Adrs) -> Result<()>,
{
    let leaves = 1u32 << target_height;
    let mut parent = [0u8; HYP_N];

    for i in 0..leaves {
        let index = start_index + i;
        let mut node = Node::leaf();
        leaf(&mut node.digest, index, adrs)?;

        adrs.set_type(node_type);
        adrs.set_tree_height(1);
        adrs.set_tree_index(index);

        while stack.top_height() == Some(node.height) {
            adrs.set_tree_index((adrs.get_tree_index() - 1) >> 1);

            if let Some(top) = stack.pop() {
                hasher.h_node(&mut parent, &top.digest, &node.digest, adrs);
                node.digest = parent;
            }

            node.height = adrs.get_tree_height();
            adrs.set_tree_height(node.height + 1);
        }

        if i + 1 == leaves {
            debug_assert!(stack.top_height().is_none());
            output[..HYP_N].copy_from_slice(&node.digest);
        } else {
            stack.push(node);
        }
    }

    debug_assert!(stack.high_water() <= target_height as usize);
    parent.zeroize();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::DefaultHash;
    use rand::rngs::OsRng;
    use rand::RngCore;

    fn test_leaf(
        hasher: &HypHasher<DefaultHash>,
    ) -> impl FnMut(&mut [u8], u32, &mut Adrs) -> Result<()> + '_ {
        move |out, index, adrs| {
            adrs.set_type(AdrsType::WotsPk);
            adrs.set_keypair_addr(index);
            let mut m = [0u8; HYP_N];
            m[..4].copy_from_slice(&index.to_be_bytes());
            hasher.f(out, &m, adrs);
            Ok(())
        }
    }

    fn root(hasher: &HypHasher<DefaultHash>, start: u32, height: u32) -> [u8; HYP_N] {
        let mut adrs = Adrs::default();
        adrs.set_layer_addr(2);
        adrs.set_tree_addr(5);
        let mut out = [0u8; HYP_N];
        tree_hash(
            hasher,
            &mut out,
            start,
            height,
            &mut adrs,
            AdrsType::Tree,
            test_leaf(hasher),
        )
        .unwrap();
        out
    }

    #[test]
    fn test_single_leaf_is_its_own_root() {
        let hasher = HypHasher::<DefaultHash>::new(&[8u8; HYP_N]);
        let mut expected = [0u8; HYP_N];
        let mut adrs = Adrs::default();
        adrs.set_layer_addr(2);
        adrs.set_tree_addr(5);
        test_leaf(&hasher)(&mut expected, 6, &mut adrs).unwrap();
        assert_eq!(root(&hasher, 6, 0), expected);
    }

    #[test]
    fn test_root_merges_two_halves() {
        let mut pk_seed = [0u8; HYP_N];
        OsRng.fill_bytes(&mut pk_seed);
        let hasher = HypHasher::<DefaultHash>::new(&pk_seed);

        for height in 1..=4u32 {
            for start in [0u32, 1 << height, 3 << height] {
                let half = 1 << (height - 1);
                let left = root(&hasher, start, height - 1);
                let right = root(&hasher, start + half, height - 1);

                let mut adrs = Adrs::from(AdrsType::Tree);
                adrs.set_layer_addr(2);
                adrs.set_tree_addr(5);
                adrs.set_tree_height(height);
                adrs.set_tree_index(start >> height);
                let mut expected = [0u8; HYP_N];
                hasher.h_node(&mut expected, &left, &right, &adrs);

                assert_eq!(root(&hasher, start, height), expected, "h={height} start={start}");
            }
        }
    }

    #[test]
    fn test_stack_depth_is_bounded() {
        let hasher = HypHasher::<DefaultHash>::new(&[1u8; HYP_N]);
        for height in 0..=6u32 {
            let mut stack = NodeStack::with_height(height);
            let mut adrs = Adrs::default();
            let mut out = [0u8; HYP_N];
            tree_hash_with_stack(
                &hasher,
                &mut out,
                0,
                height,
                &mut adrs,
                AdrsType::ForsTree,
                test_leaf(&hasher),
                &mut stack,
            )
            .unwrap();
            assert!(stack.high_water() <= height as usize + 1);
            assert_eq!(stack.high_water(), height as usize);
        }
    }
}
