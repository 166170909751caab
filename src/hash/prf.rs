use crate::hash::HashAlgo;
use crate::params::HYP_N;
use digest::generic_array::GenericArray;
use digest::typenum::Unsigned;
use hmac::digest::KeyInit;
use hmac::{Mac, SimpleHmac};
use zeroize::{Zeroize, Zeroizing};

/// Computes `HMAC(key, parts[0] || parts[1] || ...)` over the hash `D`, writing `HYP_N` bytes.
///
/// The key is zero-padded to one hash block, which is the HMAC key schedule for keys no
/// longer than a block. The scheme only uses `HYP_N`-byte keys.
pub(crate) fn hmac<D: HashAlgo>(output: &mut [u8], key: &[u8], parts: &[&[u8]]) {
    debug_assert!(key.len() <= <D::BlockSize as Unsigned>::USIZE);

    let mut key_block = GenericArray::<u8, D::BlockSize>::default();
    key_block[..key.len()].copy_from_slice(key);
    let mut mac = <SimpleHmac<D> as KeyInit>::new(&key_block);
    key_block.as_mut_slice().zeroize();

    for part in parts {
        mac.update(part);
    }
    let mut tag = mac.finalize().into_bytes();
    output[..HYP_N].copy_from_slice(&tag[..HYP_N]);
    tag.as_mut_slice().zeroize();
}

/// TLS-style PRF expansion: `A_0 = label || seed`, `A_i = HMAC(key, A_{i-1})` and the output
/// is `HMAC(key, A_1 || label || seed) || HMAC(key, A_2 || label || seed) || ...`.
///
/// One block is produced per `HYP_N` bytes of `output`.
pub(crate) fn prf_tls<D: HashAlgo>(output: &mut [u8], key: &[u8], label: &[u8], seed: &[u8]) {
    debug_assert_eq!(output.len() % HYP_N, 0);

    let mut a_i = Zeroizing::new([0u8; HYP_N]);
    hmac::<D>(&mut a_i[..], key, &[label, seed]);

    for (i, block) in output.chunks_exact_mut(HYP_N).enumerate() {
        if i > 0 {
            let previous = Zeroizing::new(*a_i);
            hmac::<D>(&mut a_i[..], key, &[&previous[..]]);
        }
        hmac::<D>(block, key, &[&a_i[..], label, seed]);
    }
}
