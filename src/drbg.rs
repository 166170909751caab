//! Entropy sources for key generation and signing.
//!
//! [`HashDrbg`] is a hash-based deterministic random bit generator in the style of
//! R 1323565.1.006-2017. Each request refreshes its state from an entropy input, either the
//! operating system or a deterministic chain of hashes of a 32-byte seed, and expands it
//! with the hash primitive.

use crate::error::{Error, Result};
use crate::hash::{hash, DefaultHash, HashAlgo};
use crate::params::HYP_N;
use core::marker::PhantomData;
use digest::typenum::Unsigned;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

/// Bytes of fresh entropy input per request.
pub const DRBG_INIT_BYTES: usize = 32;

/// Attempts made on the operating system source before giving up.
pub const SEI_RETRY_COUNT: usize = 3;

/// A source of random bytes for key generation and signing.
///
/// On error the implementation must leave `buf` zeroed.
pub trait EntropySource {
    fn get_random(&mut self, buf: &mut [u8]) -> Result<()>;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn get_random(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).get_random(buf)
    }
}

/// Entropy from the operating system, retried up to [`SEI_RETRY_COUNT`] times.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn get_random(&mut self, buf: &mut [u8]) -> Result<()> {
        for _ in 0..SEI_RETRY_COUNT {
            if OsRng.try_fill_bytes(buf).is_ok() {
                return Ok(());
            }
        }
        buf.zeroize();
        Err(Error::EntropyFailure)
    }
}

/// Adapter turning any cryptographic `rand` generator into an [`EntropySource`].
#[derive(Clone, Debug, Default)]
pub struct RngEntropy<R: RngCore + CryptoRng>(pub R);

impl<R: RngCore + CryptoRng> EntropySource for RngEntropy<R> {
    fn get_random(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.0.try_fill_bytes(buf).is_err() {
            buf.zeroize();
            return Err(Error::EntropyFailure);
        }
        Ok(())
    }
}

enum EntropyInput {
    Hardware(OsEntropy),
    Seed(Zeroizing<[u8; DRBG_INIT_BYTES]>),
}

/// Hash-DRBG over the primitive `D`.
pub struct HashDrbg<D: HashAlgo = DefaultHash> {
    input: EntropyInput,
    _hash: PhantomData<D>,
}

impl<D: HashAlgo> Default for HashDrbg<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: HashAlgo> HashDrbg<D> {
    /// Generator refreshed from the operating system on every request.
    pub fn new() -> Self {
        Self {
            input: EntropyInput::Hardware(OsEntropy),
            _hash: PhantomData,
        }
    }

    /// Deterministic generator: the entropy input of the `i`-th request is `hash^i(seed)`.
    pub fn from_seed(seed: [u8; DRBG_INIT_BYTES]) -> Self {
        Self {
            input: EntropyInput::Seed(Zeroizing::new(seed)),
            _hash: PhantomData,
        }
    }

    pub fn is_hardware_based(&self) -> bool {
        matches!(self.input, EntropyInput::Hardware(_))
    }

    fn get_entropy(&mut self, data: &mut [u8]) -> Result<()> {
        match &mut self.input {
            EntropyInput::Hardware(os) => os.get_random(&mut data[..DRBG_INIT_BYTES]),
            EntropyInput::Seed(seed) => {
                let current = Zeroizing::new(**seed);
                hash::<D>(&mut seed[..], &[&current[..]]);
                data[..DRBG_INIT_BYTES].copy_from_slice(&seed[..]);
                Ok(())
            }
        }
    }

    fn step(u: &mut [u8], output: &mut [u8]) -> Result<()> {
        if increment(u) {
            return Err(Error::EntropyFailure);
        }
        hash::<D>(output, &[&*u]);
        Ok(())
    }

    fn generate(&mut self, x: &mut [u8]) -> Result<()> {
        let mut u = Zeroizing::new(vec![0u8; <D::BlockSize as Unsigned>::USIZE - 1]);
        self.get_entropy(&mut u)?;

        let r = x.len() % HYP_N;
        let (head, blocks) = x.split_at_mut(r);

        // C_1 lands in the last block, C_q in the first full one
        for block in blocks.rchunks_exact_mut(HYP_N) {
            Self::step(&mut u, block)?;
        }

        if r != 0 {
            let mut tmp = Zeroizing::new([0u8; HYP_N]);
            Self::step(&mut u, &mut tmp[..])?;
            head.copy_from_slice(&tmp[HYP_N - r..]);
        }
        Ok(())
    }
}

impl<D: HashAlgo> EntropySource for HashDrbg<D> {
    fn get_random(&mut self, buf: &mut [u8]) -> Result<()> {
        let result = self.generate(buf);
        if result.is_err() {
            buf.zeroize();
        }
        result
    }
}

/// Increments a big-endian integer in place, returning `true` on overflow.
fn increment(big_integer: &mut [u8]) -> bool {
    for byte in big_integer.iter_mut().rev() {
        let (sum, overflow) = byte.overflowing_add(1);
        *byte = sum;
        if !overflow {
            return false;
        }
    }
    true
}
