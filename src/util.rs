extern crate faster_hex;

use crate::parse::error::ConvError;

use faster_hex::hex_decode;

/// Renders a byte-slice as its lowercase hexadecimal representation.
pub fn hex_of_bytes(bytes: &[u8]) -> String {
    faster_hex::hex_string(bytes)
}

/// Wrapper around [`hex_decode`] from `faster-hex`
///
/// Interprets `src` as a hexadecimal string and returns the byte-buffer
/// it encodes, or a [`ConvError`] describing why it could not be
/// interpreted as one.
pub fn bytes_of_hex<T: AsRef<[u8]> + ?Sized>(src: &T) -> Result<Vec<u8>, ConvError<()>> {
    let src = src.as_ref();
    if src.is_empty() {
        return Ok(Vec::new());
    }

    if src.len() & 1 != 0 {
        return Err(ConvError::ParityError(()));
    }

    let mut dst = vec![0u8; src.len() >> 1];

    match hex_decode(src, &mut dst) {
        Ok(()) => Ok(dst),
        Err(_) => Err(ConvError::HexError(())),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        assert_eq!(hex_of_bytes(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
        assert_eq!(
            bytes_of_hex("deadbeef").unwrap(),
            vec![0xde, 0xad, 0xbe, 0xef]
        );
        assert_eq!(bytes_of_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn odd_parity_rejected() {
        assert_eq!(bytes_of_hex("abc"), Err(ConvError::ParityError(())));
    }

    #[test]
    fn non_hex_rejected() {
        assert_eq!(bytes_of_hex("zz"), Err(ConvError::HexError(())));
    }
}
