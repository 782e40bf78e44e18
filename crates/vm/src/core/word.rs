use alloy::primitives::U256;

use crate::error::Error;

/// The machine word: an unsigned 256-bit integer with arithmetic modulo 2^256.
pub type Word = U256;

/// The width of a [`Word`] in bytes.
pub const WORD_SIZE: usize = 32;

/// The width of a [`Word`] in bits.
pub const WORD_BITS: usize = 256;

/// Byte-order and shift helpers on top of [`U256`].
pub trait WordExt: Sized {
    /// Builds a word from at most 32 big-endian bytes, zero-padding on the most-significant side.
    ///
    /// ```
    /// use evmi_vm::core::word::{Word, WordExt};
    ///
    /// assert_eq!(Word::try_from_be_padded(&[0x01, 0x02]).unwrap(), Word::from(258u64));
    /// assert!(Word::try_from_be_padded(&[0u8; 33]).is_err());
    /// ```
    fn try_from_be_padded(bytes: &[u8]) -> Result<Self, Error>;

    /// Encodes the word as exactly 32 big-endian bytes.
    fn to_be_word_bytes(&self) -> [u8; WORD_SIZE];

    /// `self << shift`, truncated to 256 bits. Shifts of 256 or more yield zero.
    ///
    /// ```
    /// use evmi_vm::core::word::{Word, WordExt};
    ///
    /// assert_eq!(Word::from(1u64).wrapping_shl_word(Word::from(4u64)), Word::from(16u64));
    /// assert_eq!(Word::MAX.wrapping_shl_word(Word::from(256u64)), Word::ZERO);
    /// ```
    fn wrapping_shl_word(&self, shift: Word) -> Self;

    /// `self >> shift`. Shifts of 256 or more yield zero.
    fn wrapping_shr_word(&self, shift: Word) -> Self;

    /// Interprets the word as a machine offset, or `None` if it does not fit in a `usize`.
    fn to_offset(&self) -> Option<usize>;
}

impl WordExt for Word {
    fn try_from_be_padded(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() > WORD_SIZE {
            return Err(Error::WordOverflow(bytes.len()));
        }

        let mut buffer = [0u8; WORD_SIZE];
        buffer[WORD_SIZE - bytes.len()..].copy_from_slice(bytes);
        Ok(U256::from_be_bytes(buffer))
    }

    fn to_be_word_bytes(&self) -> [u8; WORD_SIZE] {
        self.to_be_bytes::<WORD_SIZE>()
    }

    fn wrapping_shl_word(&self, shift: Word) -> Self {
        match shift.to_offset() {
            Some(bits) if bits < WORD_BITS => *self << bits,
            _ => U256::ZERO,
        }
    }

    fn wrapping_shr_word(&self, shift: Word) -> Self {
        match shift.to_offset() {
            Some(bits) if bits < WORD_BITS => *self >> bits,
            _ => U256::ZERO,
        }
    }

    fn to_offset(&self) -> Option<usize> {
        usize::try_from(*self).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_be_padded_is_big_endian() {
        let word = Word::try_from_be_padded(&[0x01, 0x02]).expect("fits");
        assert_eq!(word, Word::from(0x0102u64));
    }

    #[test]
    fn test_from_be_padded_empty_is_zero() {
        assert_eq!(Word::try_from_be_padded(&[]).expect("fits"), Word::ZERO);
    }

    #[test]
    fn test_from_be_padded_full_width() {
        let word = Word::try_from_be_padded(&[0xff; 32]).expect("fits");
        assert_eq!(word, Word::MAX);
    }

    #[test]
    fn test_from_be_padded_rejects_oversized_input() {
        assert!(matches!(Word::try_from_be_padded(&[0u8; 33]), Err(Error::WordOverflow(33))));
    }

    #[test]
    fn test_to_be_word_bytes() {
        let bytes = Word::from(0xffu64).to_be_word_bytes();
        assert_eq!(bytes[31], 0xff);
        assert!(bytes[..31].iter().all(|b| *b == 0));
        assert_eq!(Word::try_from_be_padded(&bytes).expect("fits"), Word::from(0xffu64));
    }

    #[test]
    fn test_shl_identity_and_overflow() {
        let value = Word::from(0x1234u64);
        assert_eq!(value.wrapping_shl_word(Word::ZERO), value);
        assert_eq!(value.wrapping_shl_word(Word::from(256u64)), Word::ZERO);
        assert_eq!(value.wrapping_shl_word(Word::MAX), Word::ZERO);
    }

    #[test]
    fn test_shl_wraps_modulo_word() {
        let top_bit = Word::from(1u64).wrapping_shl_word(Word::from(255u64));
        assert_eq!(top_bit.to_be_word_bytes()[0], 0x80);
        assert_eq!(top_bit.wrapping_shl_word(Word::from(1u64)), Word::ZERO);
        assert_eq!(Word::MAX.wrapping_shl_word(Word::from(4u64)), Word::MAX - Word::from(0xfu64));
    }

    #[test]
    fn test_shr() {
        assert_eq!(Word::from(0x100u64).wrapping_shr_word(Word::from(8u64)), Word::from(1u64));
        assert_eq!(Word::MAX.wrapping_shr_word(Word::from(300u64)), Word::ZERO);
    }

    #[test]
    fn test_to_offset() {
        assert_eq!(Word::from(42u64).to_offset(), Some(42));
        assert_eq!(Word::MAX.to_offset(), None);
    }
}
