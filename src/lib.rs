//! # Hypericum
//!
//! A stateless hash-based post-quantum signature scheme of the SPHINCS+ family. Messages are
//! signed with a FORS+C few-time signature whose public key is in turn signed by a hypertree of
//! XMSS layers built from WOTS+C one-time signatures.
//!
//! Sizes are fixed at compile time by a [`ParameterSet`] ([`FastSign`], [`FastVerify`] or
//! [`SmallSign`]) and the hash primitive is any 32-byte [`digest`] hash ([`HashAlgo`]).
//! Randomness is supplied by the caller through an [`EntropySource`].
//!
//! ```rust
//! use hypericum::{HashDrbg, Hypericum};
//!
//! let hyp: Hypericum = Hypericum::new();
//! let mut rng: HashDrbg = HashDrbg::new();
//! let (pk, sk) = hyp.keygen(&mut rng).expect("Key generation failed");
//!
//! let signature = hyp.sign(b"Hypericum", &sk, &mut rng).expect("Signing failed");
//! assert!(hyp.verify(&signature, b"Hypericum", &pk).is_ok());
//! ```

mod error;
mod fors;
mod hypertree;
mod tree_hash;
mod utils;
mod wotsc;
mod xmss;

pub mod adrs;
pub mod drbg;
pub mod hash;
pub mod params;
pub mod sign;

pub use crate::drbg::{EntropySource, HashDrbg, OsEntropy, RngEntropy};
pub use crate::error::{Error, Result};
pub use crate::hash::{DefaultHash, HashAlgo};
pub use crate::params::{DefaultParams, FastSign, FastVerify, ParameterSet, SmallSign};
pub use crate::sign::{Hypericum, PublicKey, SecretKey, Signature};
