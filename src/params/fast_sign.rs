//! The "fast-sign" parameter set: many shallow layers, `w = 16`.

use crate::params::{check_params, ParameterSet, HYP_DIGEST_BYTES};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FastSign;

impl ParameterSet for FastSign {
    const NAME: &'static str = "hypericum-fast-sign";

    const H: usize = 66;
    const D: usize = 22;
    const B: usize = 9;
    const K: usize = 36;
    const W: usize = 16;

    fn md_suffix_nonzero(digest: &[u8; HYP_DIGEST_BYTES]) -> bool {
        (digest[39] & 0b0001_1111) | (digest[40] & 0b1111_0000) != 0
    }
}

const _: () = assert!(check_params::<FastSign>());
