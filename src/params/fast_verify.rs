//! The "fast-verify" parameter set: `w = 4` keeps chain verification short.

use crate::params::{check_params, ParameterSet, HYP_DIGEST_BYTES};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FastVerify;

impl ParameterSet for FastVerify {
    const NAME: &'static str = "hypericum-fast-verify";

    const H: usize = 66;
    const D: usize = 11;
    const B: usize = 9;
    const K: usize = 38;
    const W: usize = 4;

    fn md_suffix_nonzero(digest: &[u8; HYP_DIGEST_BYTES]) -> bool {
        (digest[41] & 0b0000_0111) | (digest[42] & 0b1111_1100) != 0
    }
}

const _: () = assert!(check_params::<FastVerify>());
