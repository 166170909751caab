use crate::params::HYP_ADRS_BYTES;
use crate::utils::set_u32_at;

const OFFSET_LAYER: usize = 0;
const OFFSET_TREE: usize = 4;
const OFFSET_TYPE: usize = 12;
const OFFSET_KP_ADDR: usize = 16;
const OFFSET_PAYLOAD: usize = 20;

/// All 8 types of ADRS used by Hypericum.
/// The 4-byte big-endian encoding of the value is written as the `type` word of an ADRS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum AdrsType {
    /// 0, used for hashing through a WOTS+C chain.
    WotsHash = 0,
    /// 1, used for compression of a WOTS+C public key.
    WotsPk = 1,
    /// 2, used for the nodes of an XMSS tree.
    Tree = 2,
    /// 3, used for the leaves and nodes of a FORS+C tree.
    ForsTree = 3,
    /// 4, used for compression of the FORS+C roots.
    ForsRoots = 4,
    /// 5, used while searching the WOTS+C checksum salt.
    SignMsgWots = 5,
    /// 6, used for WOTS+C secret key generation (start of each chain).
    KeygenWots = 6,
    /// 7, used for FORS+C secret key generation.
    KeygenFors = 7,
}

/// The type-specific last 8 bytes of an address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdrsPayload {
    WotsHash { chain_address: u32, hash_address: u32 },
    WotsPk,
    Tree { tree_height: u32, tree_index: u32 },
    ForsTree { tree_height: u32, tree_index: u32 },
    ForsRoots,
    SignMsgWots,
    KeygenWots { chain_address: u32 },
    KeygenFors { tree_height: u32, leaf_index: u32 },
}

impl AdrsPayload {
    fn empty(adrs_type: AdrsType) -> Self {
        match adrs_type {
            AdrsType::WotsHash => Self::WotsHash {
                chain_address: 0,
                hash_address: 0,
            },
            AdrsType::WotsPk => Self::WotsPk,
            AdrsType::Tree => Self::Tree {
                tree_height: 0,
                tree_index: 0,
            },
            AdrsType::ForsTree => Self::ForsTree {
                tree_height: 0,
                tree_index: 0,
            },
            AdrsType::ForsRoots => Self::ForsRoots,
            AdrsType::SignMsgWots => Self::SignMsgWots,
            AdrsType::KeygenWots => Self::KeygenWots { chain_address: 0 },
            AdrsType::KeygenFors => Self::KeygenFors {
                tree_height: 0,
                leaf_index: 0,
            },
        }
    }

    fn adrs_type(&self) -> AdrsType {
        match self {
            Self::WotsHash { .. } => AdrsType::WotsHash,
            Self::WotsPk => AdrsType::WotsPk,
            Self::Tree { .. } => AdrsType::Tree,
            Self::ForsTree { .. } => AdrsType::ForsTree,
            Self::ForsRoots => AdrsType::ForsRoots,
            Self::SignMsgWots => AdrsType::SignMsgWots,
            Self::KeygenWots { .. } => AdrsType::KeygenWots,
            Self::KeygenFors { .. } => AdrsType::KeygenFors,
        }
    }

    fn words(&self) -> [u32; 2] {
        match *self {
            Self::WotsHash {
                chain_address,
                hash_address,
            } => [chain_address, hash_address],
            Self::Tree {
                tree_height,
                tree_index,
            }
            | Self::ForsTree {
                tree_height,
                tree_index,
            } => [tree_height, tree_index],
            Self::KeygenWots { chain_address } => [chain_address, 0],
            Self::KeygenFors {
                tree_height,
                leaf_index,
            } => [tree_height, leaf_index],
            Self::WotsPk | Self::ForsRoots | Self::SignMsgWots => [0, 0],
        }
    }
}

/// The address `Adrs` binds every hash call to its position in the hypertree.
///
/// It is encoded as 28 bytes, seven big-endian 32-bit words:
/// * `layer address`: the hypertree layer, 0 being the layer closest to FORS+C,
/// * `tree address`: two words holding the 64-bit index of the XMSS tree within its layer,
/// * `type`: the [`AdrsType`] value,
/// * `key pair address`: the WOTS+C key pair (XMSS leaf) in use,
/// * two payload words, interpreted according to the type (see [`AdrsPayload`]).
///
/// Changing the type starts from an all-zero payload. Switching to [`AdrsType::Tree`] also
/// resets the key pair address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Adrs {
    layer: u32,
    tree: u64,
    keypair: u32,
    payload: AdrsPayload,
}

impl Default for Adrs {
    fn default() -> Self {
        Self::from(AdrsType::WotsHash)
    }
}

impl From<AdrsType> for Adrs {
    fn from(adrs_type: AdrsType) -> Self {
        Self {
            layer: 0,
            tree: 0,
            keypair: 0,
            payload: AdrsPayload::empty(adrs_type),
        }
    }
}

impl Adrs {
    /// Specify which hypertree layer we're working on.
    pub fn set_layer_addr(&mut self, layer: u32) {
        self.layer = layer;
    }

    /// Specify which XMSS tree within the layer we're working on.
    pub fn set_tree_addr(&mut self, tree: u64) {
        self.tree = tree;
    }

    /// Specify what hash will be computed with this address.
    pub fn set_type(&mut self, adrs_type: AdrsType) {
        self.payload = AdrsPayload::empty(adrs_type);
        if adrs_type == AdrsType::Tree {
            self.keypair = 0;
        }
    }

    pub fn get_type(&self) -> AdrsType {
        self.payload.adrs_type()
    }

    pub fn payload(&self) -> AdrsPayload {
        self.payload
    }

    /// Specify which XMSS leaf, that is which WOTS+C key pair, we're talking about.
    pub fn set_keypair_addr(&mut self, keypair: u32) {
        self.keypair = keypair;
    }

    pub fn get_keypair_addr(&self) -> u32 {
        self.keypair
    }

    /// Specify which chain within the WOTS+C key we're working with.
    pub fn set_chain_addr(&mut self, chain: u32) {
        match &mut self.payload {
            AdrsPayload::WotsHash { chain_address, .. }
            | AdrsPayload::KeygenWots { chain_address } => *chain_address = chain,
            other => debug_assert!(false, "chain address on {:?}", other),
        }
    }

    /// Specify where in the chain we are.
    pub fn set_hash_addr(&mut self, hash: u32) {
        match &mut self.payload {
            AdrsPayload::WotsHash { hash_address, .. } => *hash_address = hash,
            other => debug_assert!(false, "hash address on {:?}", other),
        }
    }

    /// Specify the height of the node in the XMSS/FORS+C tree we are in.
    pub fn set_tree_height(&mut self, height: u32) {
        match &mut self.payload {
            AdrsPayload::Tree { tree_height, .. }
            | AdrsPayload::ForsTree { tree_height, .. }
            | AdrsPayload::KeygenFors { tree_height, .. } => *tree_height = height,
            other => debug_assert!(false, "tree height on {:?}", other),
        }
    }

    pub fn get_tree_height(&self) -> u32 {
        match self.payload {
            AdrsPayload::Tree { tree_height, .. }
            | AdrsPayload::ForsTree { tree_height, .. }
            | AdrsPayload::KeygenFors { tree_height, .. } => tree_height,
            _ => 0,
        }
    }

    /// Specify the distance from the left edge of the node in the XMSS/FORS+C tree.
    pub fn set_tree_index(&mut self, index: u32) {
        match &mut self.payload {
            AdrsPayload::Tree { tree_index, .. } | AdrsPayload::ForsTree { tree_index, .. } => {
                *tree_index = index
            }
            other => debug_assert!(false, "tree index on {:?}", other),
        }
    }

    pub fn get_tree_index(&self) -> u32 {
        match self.payload {
            AdrsPayload::Tree { tree_index, .. } | AdrsPayload::ForsTree { tree_index, .. } => {
                tree_index
            }
            _ => 0,
        }
    }

    /// Specify the global index of a FORS+C secret value.
    pub fn set_leaf_index(&mut self, index: u32) {
        match &mut self.payload {
            AdrsPayload::KeygenFors { leaf_index, .. } => *leaf_index = index,
            other => debug_assert!(false, "leaf index on {:?}", other),
        }
    }

    /// Writes both payload words at once: the high 32 bits of `suffix` go to the first
    /// word and the low 32 bits to the second. Types without a payload ignore it, and the
    /// single chain word of [`AdrsType::KeygenWots`] takes the low 32 bits.
    pub fn set_suffix(&mut self, suffix: u64) {
        let hi = (suffix >> 32) as u32;
        let lo = suffix as u32;
        match &mut self.payload {
            AdrsPayload::WotsHash {
                chain_address,
                hash_address,
            } => {
                *chain_address = hi;
                *hash_address = lo;
            }
            AdrsPayload::Tree {
                tree_height,
                tree_index,
            }
            | AdrsPayload::ForsTree {
                tree_height,
                tree_index,
            } => {
                *tree_height = hi;
                *tree_index = lo;
            }
            AdrsPayload::KeygenWots { chain_address } => *chain_address = lo,
            AdrsPayload::KeygenFors {
                tree_height,
                leaf_index,
            } => {
                *tree_height = hi;
                *leaf_index = lo;
            }
            AdrsPayload::WotsPk | AdrsPayload::ForsRoots | AdrsPayload::SignMsgWots => {}
        }
    }

    /// Returns the 28-byte wire encoding of the address.
    pub fn to_bytes(&self) -> [u8; HYP_ADRS_BYTES] {
        let mut out = [0u8; HYP_ADRS_BYTES];
        set_u32_at(&mut out, self.layer, OFFSET_LAYER);
        set_u32_at(&mut out, (self.tree >> 32) as u32, OFFSET_TREE);
        set_u32_at(&mut out, self.tree as u32, OFFSET_TREE + 4);
        set_u32_at(&mut out, self.get_type() as u32, OFFSET_TYPE);
        set_u32_at(&mut out, self.keypair, OFFSET_KP_ADDR);
        let [w0, w1] = self.payload.words();
        set_u32_at(&mut out, w0, OFFSET_PAYLOAD);
        set_u32_at(&mut out, w1, OFFSET_PAYLOAD + 4);
        out
    }
}
