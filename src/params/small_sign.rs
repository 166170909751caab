//! The "small-sign" parameter set: few deep layers and `w = 256` for short signatures.

use crate::params::{check_params, ParameterSet, HYP_DIGEST_BYTES};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SmallSign;

impl ParameterSet for SmallSign {
    const NAME: &'static str = "hypericum-small-sign";

    const H: usize = 70;
    const D: usize = 7;
    const B: usize = 17;
    const K: usize = 14;
    const W: usize = 256;

    fn md_suffix_nonzero(digest: &[u8; HYP_DIGEST_BYTES]) -> bool {
        (digest[27] & 0b0000_0111) | digest[28] | (digest[29] & 0b1111_1100) != 0
    }
}

const _: () = assert!(check_params::<SmallSign>());
