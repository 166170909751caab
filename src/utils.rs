pub(crate) fn u32_to_bytes(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

pub(crate) fn set_u32_at(array: &mut [u8], value: u32, start_index: usize) {
    array[start_index..start_index + 4].copy_from_slice(&u32_to_bytes(value));
}

/// Reads up to 8 bytes as a big-endian unsigned integer.
pub(crate) fn bytes_to_u64(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

/// Reads up to 4 bytes as a big-endian unsigned integer.
pub(crate) fn bytes_to_u32(bytes: &[u8]) -> u32 {
    debug_assert!(bytes.len() <= 4);
    bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32)
}

macro_rules! array_struct {
    ($(#[$meta:meta])* $type: ident, $size: expr) => {
        $(#[$meta])*
        ///
        /// The bytes are wiped from memory when dropped. Cloning duplicates them, so clone
        /// cautiously. Serialization is provided via the `serialization` feature.
        #[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
        #[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
        pub struct $type(
            #[cfg_attr(feature = "serialization", serde(with = "BigArray"))] [u8; $size],
        );

        impl AsRef<[u8]> for $type {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $size]> for $type {
            fn from(value: [u8; $size]) -> Self {
                Self(value)
            }
        }

        impl TryFrom<&[u8]> for $type {
            type Error = Error;
            fn try_from(data: &[u8]) -> core::result::Result<Self, Error> {
                if data.len() != $size {
                    Err(Error::BadLength($size, data.len()))
                } else {
                    let mut array = [0u8; $size];
                    array.copy_from_slice(data);
                    Ok($type(array))
                }
            }
        }

        impl PartialEq for $type {
            fn eq(&self, other: &Self) -> bool {
                self.0.ct_eq(&other.0).into()
            }
        }

        impl Eq for $type {}
    };
}

pub(crate) use array_struct;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_reads() {
        assert_eq!(bytes_to_u64(&[0x01, 0x02, 0x03]), 0x0001_0203);
        assert_eq!(
            bytes_to_u64(&[0xff, 0, 0, 0, 0, 0, 0, 0x01]),
            0xff00_0000_0000_0001
        );
        assert_eq!(bytes_to_u32(&[0xde, 0xad, 0xbe, 0xef]), 0xdead_beef);
        assert_eq!(bytes_to_u32(&[]), 0);

        let mut buf = [0u8; 6];
        set_u32_at(&mut buf, 0x0102_0304, 1);
        assert_eq!(buf, [0, 1, 2, 3, 4, 0]);
    }
}
