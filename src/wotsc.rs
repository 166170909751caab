//! # Winternitz One-Time Signature Scheme with Checksum (WOTS+C)
//!
//! WOTS+C drops the checksum chains of W-OTS+. Instead, the signer searches a 4-byte salt for
//! which the base-`w` digits of `Hash(PK.seed || ADRS || salt || M)` sum to the fixed target
//! `S_WN = (w - 1) * L / 2`. The verifier recomputes the digits from the salt carried in the
//! signature and rejects any signature whose digits do not hit the target.
//!
//! A signature is `L` chain values followed by the salt, `P::WOTS_BYTES` bytes in total.
//! The message is always a single `HYP_N`-byte digest, a FORS+C public key or an XMSS root.

use crate::adrs::{Adrs, AdrsType};
use crate::drbg::EntropySource;
use crate::error::{Error, Result};
use crate::hash::{HashAlgo, HypHasher};
use crate::params::{ParameterSet, HYP_MAX_ITERATIONS, HYP_N, HYP_NONCE_BYTES};
use core::marker::PhantomData;
use zeroize::{Zeroize, Zeroizing};

/// WOTS+C operations over a hasher already seeded with `PK.seed`.
pub(crate) struct WotsC<'a, P: ParameterSet, D: HashAlgo> {
    hasher: &'a HypHasher<D>,
    _params: PhantomData<P>,
}

impl<'a, P: ParameterSet, D: HashAlgo> WotsC<'a, P, D> {
    pub(crate) fn new(hasher: &'a HypHasher<D>) -> Self {
        Self {
            hasher,
            _params: PhantomData,
        }
    }

    /// Computes the chaining function.
    ///
    /// Interprets `input` as the `start`-th value of the chain and applies `F` `steps` times.
    /// `adrs` has to contain the address of the chain.
    pub(crate) fn gen_chain(
        &self,
        output: &mut [u8],
        input: &[u8],
        start: usize,
        steps: usize,
        adrs: &mut Adrs,
    ) -> Result<()> {
        if start + steps > P::W - 1 {
            return Err(Error::InvalidChainRange { start, steps });
        }

        output[..HYP_N].copy_from_slice(&input[..HYP_N]);
        for i in start..(start + steps) {
            adrs.set_hash_addr(i as u32);
            self.hasher.f_inplace(&mut output[..HYP_N], adrs);
        }
        Ok(())
    }

    /// Splits every byte of `input` into base-`w` digits, most significant first.
    pub(crate) fn base_w(output: &mut [u32], input: &[u8]) {
        let mask = (P::W - 1) as u32;
        let mut out = output.iter_mut();
        for &byte in input {
            let mut acc = P::LOG_W;
            while acc <= 8 {
                if let Some(digit) = out.next() {
                    *digit = ((byte as u32) >> (8 - acc)) & mask;
                }
                acc += P::LOG_W;
            }
        }
    }

    /// Writes the digits of `Hash(PK.seed || ADRS || salt || msg)` and returns their sum.
    ///
    /// `adrs` has to be of type [`AdrsType::SignMsgWots`].
    fn select_digits(
        &self,
        base_w: &mut [u32],
        salt: &[u8; HYP_NONCE_BYTES],
        msg: &[u8],
        adrs: &Adrs,
    ) -> usize {
        let mut d = Zeroizing::new([0u8; HYP_N]);
        self.hasher.h_select(&mut d[..], salt, msg, adrs);
        Self::base_w(base_w, &d[..]);
        base_w.iter().map(|&digit| digit as usize).sum()
    }

    /// Searches a salt whose digits sum to `S_WN`, writing the digits and the salt.
    ///
    /// # Arguments
    ///
    /// * `base_w` - Output for the `P::L` base-`w` digits of the accepted encoding.
    /// * `salt` - Output for the accepted salt.
    /// * `msg` - The `HYP_N`-byte message.
    /// * `adrs` - Address of the key pair. Its type is switched to
    ///   [`AdrsType::SignMsgWots`].
    /// * `rng` - Source of the candidate salts.
    ///
    /// # Returns
    ///
    /// [`Error::ChecksumNotFound`] if no salt within `HYP_MAX_ITERATIONS` draws hits the target.
    /// Both outputs are zeroed in that case.
    pub(crate) fn hash_convert<E: EntropySource>(
        &self,
        base_w: &mut [u32],
        salt: &mut [u8; HYP_NONCE_BYTES],
        msg: &[u8],
        adrs: &mut Adrs,
        rng: &mut E,
    ) -> Result<()> {
        adrs.set_type(AdrsType::SignMsgWots);
        adrs.set_suffix(0);

        for _ in 0..HYP_MAX_ITERATIONS {
            rng.get_random(salt)?;
            if self.select_digits(base_w, salt, msg, adrs) == P::S_WN {
                return Ok(());
            }
        }
        base_w.zeroize();
        salt.zeroize();
        Err(Error::ChecksumNotFound)
    }

    /// Writes the `L` chain starts, `P::L * HYP_N` bytes, of the key pair selected by `adrs`.
    pub(crate) fn gen_sk(&self, sk: &mut [u8], sk_seed: &[u8], adrs: &mut Adrs) {
        adrs.set_type(AdrsType::KeygenWots);
        for (i, sk_i) in sk.chunks_exact_mut(HYP_N).take(P::L).enumerate() {
            adrs.set_chain_addr(i as u32);
            self.hasher.prf(sk_i, sk_seed, adrs);
        }
    }

    /// Computes the compressed public key of the key pair selected by `adrs`.
    ///
    /// # Arguments
    ///
    /// * `output` - Output for the `HYP_N`-byte public key, `T_l` of the `L` chain ends.
    /// * `sk_seed` - The `HYP_N`-byte secret seed.
    /// * `adrs` - Layer, tree and keypair address of the key pair.
    pub(crate) fn gen_pk(&self, output: &mut [u8], sk_seed: &[u8], adrs: &mut Adrs) -> Result<()> {
        let mut sk = Zeroizing::new(vec![0u8; P::L * HYP_N]);
        let mut pk_buf = vec![0u8; P::L * HYP_N];
        self.gen_sk(&mut sk, sk_seed, adrs);

        adrs.set_type(AdrsType::WotsHash);
        for (i, (pk_i, sk_i)) in pk_buf
            .chunks_exact_mut(HYP_N)
            .zip(sk.chunks_exact(HYP_N))
            .enumerate()
        {
            adrs.set_chain_addr(i as u32);
            self.gen_chain(pk_i, sk_i, 0, P::W - 1, adrs)?;
        }

        adrs.set_type(AdrsType::WotsPk);
        self.hasher.t_l(output, &pk_buf, adrs);
        Ok(())
    }

    /// Signs the `HYP_N`-byte `msg`, writing `P::WOTS_BYTES` bytes into `sig`.
    ///
    /// # Arguments
    ///
    /// * `sig` - Output for the `L` chain values followed by the salt.
    /// * `msg` - The `HYP_N`-byte message, a FORS+C public key or an XMSS root.
    /// * `sk_seed` - The `HYP_N`-byte secret seed.
    /// * `adrs` - Layer, tree and keypair address of the signing key pair.
    /// * `rng` - Source of the salts tried by [`Self::hash_convert`].
    ///
    /// # Returns
    ///
    /// [`Error::ChecksumNotFound`] if the salt search fails.
    pub(crate) fn sign<E: EntropySource>(
        &self,
        sig: &mut [u8],
        msg: &[u8],
        sk_seed: &[u8],
        adrs: &mut Adrs,
        rng: &mut E,
    ) -> Result<()> {
        let mut base_w = Zeroizing::new(vec![0u32; P::L]);
        let mut salt = [0u8; HYP_NONCE_BYTES];
        self.hash_convert(&mut base_w, &mut salt, msg, adrs, rng)?;

        let mut sk = Zeroizing::new(vec![0u8; P::L * HYP_N]);
        self.gen_sk(&mut sk, sk_seed, adrs);

        let (chains, salt_out) = sig[..P::WOTS_BYTES].split_at_mut(P::L * HYP_N);
        adrs.set_type(AdrsType::WotsHash);
        for (i, (sig_i, sk_i)) in chains
            .chunks_exact_mut(HYP_N)
            .zip(sk.chunks_exact(HYP_N))
            .enumerate()
        {
            adrs.set_chain_addr(i as u32);
            self.gen_chain(sig_i, sk_i, 0, base_w[i] as usize, adrs)?;
        }
        salt_out.copy_from_slice(&salt);
        Ok(())
    }

    /// Takes a WOTS+C signature and a `HYP_N`-byte message, computes a WOTS+C public key.
    ///
    /// # Arguments
    ///
    /// * `output` - Output for the recovered `HYP_N`-byte public key.
    /// * `sig` - A `P::WOTS_BYTES`-byte signature.
    /// * `msg` - The signed `HYP_N`-byte message.
    /// * `adrs` - Address of the key pair that produced `sig`.
    ///
    /// # Returns
    ///
    /// [`Error::VerificationFailed`] when the salt of `sig` does not yield the target checksum.
    pub(crate) fn pk_from_sig(
        &self,
        output: &mut [u8],
        sig: &[u8],
        msg: &[u8],
        adrs: &mut Adrs,
    ) -> Result<()> {
        let (chains, salt_bytes) = sig[..P::WOTS_BYTES].split_at(P::L * HYP_N);
        let mut salt = [0u8; HYP_NONCE_BYTES];
        salt.copy_from_slice(salt_bytes);

        adrs.set_type(AdrsType::SignMsgWots);
        adrs.set_suffix(0);
        let mut base_w = vec![0u32; P::L];
        if self.select_digits(&mut base_w, &salt, msg, adrs) != P::S_WN {
            return Err(Error::VerificationFailed);
        }

        let mut pk_buf = vec![0u8; P::L * HYP_N];
        adrs.set_type(AdrsType::WotsHash);
        for (i, (pk_i, sig_i)) in pk_buf
            .chunks_exact_mut(HYP_N)
            .zip(chains.chunks_exact(HYP_N))
            .enumerate()
        {
            let digit = base_w[i] as usize;
            adrs.set_chain_addr(i as u32);
            self.gen_chain(pk_i, sig_i, digit, P::W - 1 - digit, adrs)?;
        }

        adrs.set_type(AdrsType::WotsPk);
        self.hasher.t_l(output, &pk_buf, adrs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drbg::RngEntropy;
    use crate::hash::DefaultHash;
    use crate::params::{FastSign, FastVerify, SmallSign};
    use rand::rngs::OsRng;
    use rand::RngCore;

    fn random_n() -> [u8; HYP_N] {
        let mut out = [0u8; HYP_N];
        OsRng.fill_bytes(&mut out);
        out
    }

    fn keypair_adrs() -> Adrs {
        let mut adrs = Adrs::default();
        adrs.set_layer_addr(3);
        adrs.set_tree_addr(0x1234_5678);
        adrs.set_keypair_addr(5);
        adrs
    }

    #[test]
    fn test_base_w_unpacking() {
        let mut w16 = [0u32; 4];
        WotsC::<FastSign, DefaultHash>::base_w(&mut w16, &[0xa5, 0x3c]);
        assert_eq!(w16, [0xa, 0x5, 0x3, 0xc]);

        let mut w4 = [0u32; 4];
        WotsC::<FastVerify, DefaultHash>::base_w(&mut w4, &[0b10_01_11_00]);
        assert_eq!(w4, [2, 1, 3, 0]);

        let mut w256 = [0u32; 2];
        WotsC::<SmallSign, DefaultHash>::base_w(&mut w256, &[0xa5, 0x3c]);
        assert_eq!(w256, [0xa5, 0x3c]);
    }

    #[test]
    fn test_select_digits_layout() {
        let pk_seed = [1u8; HYP_N];
        let msg = [2u8; HYP_N];
        let salt = [0, 0, 0, 7];
        let hasher = HypHasher::<DefaultHash>::new(&pk_seed);
        let wots = WotsC::<FastSign, DefaultHash>::new(&hasher);
        let mut adrs = keypair_adrs();
        adrs.set_type(AdrsType::SignMsgWots);
        adrs.set_suffix(0);

        let mut digits = vec![0u32; FastSign::L];
        let sum = wots.select_digits(&mut digits, &salt, &msg, &adrs);

        let mut d = [0u8; HYP_N];
        crate::hash::hash::<DefaultHash>(&mut d, &[&pk_seed, &adrs.to_bytes(), &salt, &msg]);
        let mut expected = vec![0u32; FastSign::L];
        WotsC::<FastSign, DefaultHash>::base_w(&mut expected, &d);
        assert_eq!(digits, expected);
        assert_eq!(sum, expected.iter().sum::<u32>() as usize);
    }

    #[test]
    fn test_chain_composes() {
        let hasher = HypHasher::<DefaultHash>::new(&random_n());
        let wots = WotsC::<FastSign, DefaultHash>::new(&hasher);
        let x = random_n();
        let mut adrs = Adrs::from(AdrsType::WotsHash);
        adrs.set_chain_addr(7);

        let mut full = [0u8; HYP_N];
        wots.gen_chain(&mut full, &x, 0, FastSign::W - 1, &mut adrs)
            .unwrap();

        for k in 0..FastSign::W {
            let mut mid = [0u8; HYP_N];
            let mut end = [0u8; HYP_N];
            wots.gen_chain(&mut mid, &x, 0, k, &mut adrs).unwrap();
            wots.gen_chain(&mut end, &mid, k, FastSign::W - 1 - k, &mut adrs)
                .unwrap();
            assert_eq!(end, full, "k = {}", k);
        }

        let mut same = [0u8; HYP_N];
        wots.gen_chain(&mut same, &x, 3, 0, &mut adrs).unwrap();
        assert_eq!(same, x);
    }

    #[test]
    fn test_chain_rejects_overlong_range() {
        let hasher = HypHasher::<DefaultHash>::new(&random_n());
        let wots = WotsC::<FastSign, DefaultHash>::new(&hasher);
        let mut adrs = Adrs::from(AdrsType::WotsHash);
        let mut out = [0u8; HYP_N];

        assert_eq!(
            wots.gen_chain(&mut out, &[0u8; HYP_N], 10, 6, &mut adrs),
            Err(Error::InvalidChainRange {
                start: 10,
                steps: 6
            })
        );
        assert!(wots
            .gen_chain(&mut out, &[0u8; HYP_N], 10, 5, &mut adrs)
            .is_ok());
    }

    fn sign_and_recover<P: ParameterSet>() {
        let hasher = HypHasher::<DefaultHash>::new(&random_n());
        let wots = WotsC::<P, DefaultHash>::new(&hasher);
        let sk_seed = random_n();
        let msg = random_n();
        let mut rng = RngEntropy(OsRng);

        let mut pk = [0u8; HYP_N];
        wots.gen_pk(&mut pk, &sk_seed, &mut keypair_adrs()).unwrap();

        let mut sig = vec![0u8; P::WOTS_BYTES];
        wots.sign(&mut sig, &msg, &sk_seed, &mut keypair_adrs(), &mut rng)
            .unwrap();

        let mut recovered = [0u8; HYP_N];
        wots.pk_from_sig(&mut recovered, &sig, &msg, &mut keypair_adrs())
            .unwrap();
        assert_eq!(recovered, pk, "{}", P::NAME);

        let mut other_msg = msg;
        other_msg[0] ^= 1;
        let mut wrong = [0u8; HYP_N];
        let res = wots.pk_from_sig(&mut wrong, &sig, &other_msg, &mut keypair_adrs());
        assert!(res.is_err() || wrong != pk);

        let mut other_keypair = keypair_adrs();
        other_keypair.set_keypair_addr(6);
        let res = wots.pk_from_sig(&mut wrong, &sig, &msg, &mut other_keypair);
        assert!(res.is_err() || wrong != pk);
    }

    #[test]
    fn test_sign_and_recover_pk() {
        sign_and_recover::<FastSign>();
        sign_and_recover::<FastVerify>();
        sign_and_recover::<SmallSign>();
    }

    #[test]
    fn test_signature_digits_hit_target() {
        let hasher = HypHasher::<DefaultHash>::new(&random_n());
        let wots = WotsC::<FastSign, DefaultHash>::new(&hasher);
        let mut rng = RngEntropy(OsRng);
        let msg = random_n();

        for _ in 0..5 {
            let mut base_w = vec![0u32; FastSign::L];
            let mut salt = [0u8; HYP_NONCE_BYTES];
            let mut adrs = keypair_adrs();
            wots.hash_convert(&mut base_w, &mut salt, &msg, &mut adrs, &mut rng)
                .unwrap();
            assert_eq!(adrs.get_type(), AdrsType::SignMsgWots);
            assert_eq!(base_w.iter().sum::<u32>() as usize, FastSign::S_WN);
            assert!(base_w.iter().all(|&d| d < FastSign::W as u32));
        }
    }
}
