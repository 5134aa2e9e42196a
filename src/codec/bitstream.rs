//! Bitstream packing for encoded text
//!
//! Payload layout:
//!
//! ```text
//! byte 0       padding count P (0..=8), absent when the payload is empty
//! bytes 1..N   code bits packed MSB-first, the last P bits are zero padding
//! ```
//!
//! A nonempty text always gets 1..=8 padding bits. A bit length that is
//! already a multiple of 8 gets a whole extra byte of padding.

use crate::codec::code_table::{BitString, CodeTable};
use crate::error::{HuffError, Result};
use byteorder::{ReadBytesExt, WriteBytesExt};
use log::debug;
use std::io::Cursor;

pub const MAX_PADDING: u8 = 8;

/// Packed output of [`encode`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedPayload {
    bytes: Vec<u8>,
    code_bits: usize,
    padding: u8,
}

impl EncodedPayload {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of code bits, excluding header and padding
    pub fn code_bit_len(&self) -> usize {
        self.code_bits
    }

    /// Padding bits appended after the code bits (0 for an empty payload)
    pub fn padding(&self) -> u8 {
        self.padding
    }
}

/// MSB-first bit accumulator
#[derive(Debug, Default)]
struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    filled: u8,
    bit_len: usize,
}

impl BitWriter {
    fn push(&mut self, bit: bool) {
        if bit {
            self.current |= 1 << (7 - self.filled);
        }
        self.filled += 1;
        self.bit_len += 1;
        if self.filled == 8 {
            self.bytes.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
    }

    fn push_code(&mut self, code: &BitString) {
        for &bit in code.bits() {
            self.push(bit);
        }
    }

    fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Completed bytes. Any partial byte is dropped, so callers pad to a
    /// byte boundary first.
    fn into_bytes(self) -> Vec<u8> {
        debug_assert_eq!(self.filled, 0, "bit writer finished mid-byte");
        self.bytes
    }
}

fn bits_msb_first(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
}

/// Padding needed to byte-align `bit_len` code bits. Always 1..=8.
pub fn padding_for(bit_len: usize) -> u8 {
    MAX_PADDING - (bit_len % 8) as u8
}

/// Encode `text` with `table`.
///
/// Fails with [`HuffError::UnknownSymbol`] on the first symbol the table
/// does not know. An empty text produces an empty payload.
pub fn encode(text: &str, table: &CodeTable) -> Result<EncodedPayload> {
    if text.is_empty() {
        return Ok(EncodedPayload::empty());
    }

    let mut writer = BitWriter::default();
    for symbol in text.chars() {
        let code = table.code(symbol).ok_or(HuffError::UnknownSymbol(symbol))?;
        writer.push_code(code);
    }

    let code_bits = writer.bit_len();
    let padding = padding_for(code_bits);
    for _ in 0..padding {
        writer.push(false);
    }
    let packed = writer.into_bytes();

    let mut bytes = Vec::with_capacity(1 + packed.len());
    bytes.write_u8(padding)?;
    bytes.extend_from_slice(&packed);

    debug!(
        "encoded {} code bits + {} padding into {} bytes",
        code_bits,
        padding,
        bytes.len()
    );
    Ok(EncodedPayload {
        bytes,
        code_bits,
        padding,
    })
}

/// Decode a payload produced by [`encode`] with the same table.
///
/// An empty payload decodes to an empty string. A padding header above 8,
/// padding longer than the bitstream, or trailing bits that match no code
/// are reported as [`HuffError::CorruptPayload`].
pub fn decode(payload: &[u8], table: &CodeTable) -> Result<String> {
    if payload.is_empty() {
        return Ok(String::new());
    }

    let mut cursor = Cursor::new(payload);
    let padding = cursor.read_u8()?;
    if padding > MAX_PADDING {
        return Err(HuffError::CorruptPayload(format!(
            "padding header {} exceeds {}",
            padding, MAX_PADDING
        )));
    }

    let body = &payload[1..];
    let available = body.len() * 8;
    let padding = padding as usize;
    if padding > available {
        return Err(HuffError::CorruptPayload(format!(
            "padding of {} bits exceeds the {} available",
            padding, available
        )));
    }
    let bit_len = available - padding;

    let max_code_len = table.max_code_len();
    let mut text = String::new();
    let mut candidate = BitString::new();
    for (position, bit) in bits_msb_first(body).take(bit_len).enumerate() {
        candidate.push(bit);
        if let Some(symbol) = table.symbol(&candidate) {
            text.push(symbol);
            candidate.clear();
        } else if candidate.len() >= max_code_len {
            return Err(HuffError::CorruptPayload(format!(
                "bits {} ending at position {} match no code",
                candidate, position
            )));
        }
    }

    if !candidate.is_empty() {
        return Err(HuffError::CorruptPayload(format!(
            "{} trailing bits ({}) match no code",
            candidate.len(),
            candidate
        )));
    }

    debug!("decoded {} bits into {} symbols", bit_len, text.chars().count());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::frequency::analyze;
    use crate::codec::{code_table, tree};

    fn table_for(text: &str) -> CodeTable {
        tree::build(&analyze(text))
            .map(|root| code_table::generate(&root).unwrap())
            .unwrap_or_default()
    }

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    fn abc_table() -> CodeTable {
        CodeTable::from_codes(vec![('a', bits("0")), ('b', bits("10")), ('c', bits("11"))]).unwrap()
    }

    #[test]
    fn test_padding_for() {
        assert_eq!(padding_for(1), 7);
        assert_eq!(padding_for(7), 1);
        assert_eq!(padding_for(8), 8);
        assert_eq!(padding_for(16), 8);
        assert_eq!(padding_for(13), 3);
    }

    #[test]
    fn test_empty_text_and_payload() {
        let table = table_for("");
        let payload = encode("", &table).unwrap();
        assert!(payload.is_empty());
        assert_eq!(decode(payload.as_bytes(), &table).unwrap(), "");
    }

    #[test]
    fn test_known_layout() {
        // a b c a -> 0 10 11 0 = 6 bits, 2 padding
        let payload = encode("abca", &abc_table()).unwrap();
        assert_eq!(payload.as_bytes(), &[2, 0b0101_1000]);
        assert_eq!(payload.code_bit_len(), 6);
        assert_eq!(payload.padding(), 2);
        assert_eq!(decode(payload.as_bytes(), &abc_table()).unwrap(), "abca");
    }

    #[test]
    fn test_byte_aligned_gets_full_padding_byte() {
        // 8 x 'a' -> exactly 8 bits
        let payload = encode("aaaaaaaa", &abc_table()).unwrap();
        assert_eq!(payload.as_bytes(), &[8, 0x00, 0x00]);
        assert_eq!(decode(payload.as_bytes(), &abc_table()).unwrap(), "aaaaaaaa");
    }

    #[test]
    fn test_single_symbol_round_trip() {
        let table = table_for("aaaa");
        let payload = encode("aaaa", &table).unwrap();
        assert_eq!(payload.code_bit_len(), 4);
        assert_eq!(decode(payload.as_bytes(), &table).unwrap(), "aaaa");
    }

    #[test]
    fn test_abracadabra() {
        let text = "abracadabra";
        let table = table_for(text);
        let payload = encode(text, &table).unwrap();

        let expected_bits: usize = text.chars().map(|c| table.code(c).unwrap().len()).sum();
        assert_eq!(payload.code_bit_len(), expected_bits);
        assert_eq!((payload.code_bit_len() + payload.padding() as usize) % 8, 0);
        assert_eq!(payload.as_bytes()[0], payload.padding());
        assert_eq!(decode(payload.as_bytes(), &table).unwrap(), text);
    }

    #[test]
    fn test_unknown_symbol() {
        let result = encode("abz", &abc_table());
        assert!(matches!(result, Err(HuffError::UnknownSymbol('z'))));
    }

    #[test]
    fn test_trailing_bits_are_corrupt() {
        // 0 then a lone 1 with 6 padding bits: "1" is only a prefix of b/c.
        let result = decode(&[6, 0b0100_0000], &abc_table());
        assert!(matches!(result, Err(HuffError::CorruptPayload(_))));
    }

    #[test]
    fn test_unmatched_bits_for_single_symbol_table() {
        let table = table_for("aaaa");
        let result = decode(&[7, 0b1000_0000], &table);
        assert!(matches!(result, Err(HuffError::CorruptPayload(_))));
    }

    #[test]
    fn test_padding_exceeding_stream() {
        assert!(matches!(decode(&[1], &abc_table()), Err(HuffError::CorruptPayload(_))));
        assert!(matches!(decode(&[9, 0xFF, 0xFF], &abc_table()), Err(HuffError::CorruptPayload(_))));
    }

    #[test]
    fn test_zero_padding_header_accepted() {
        // 0 10 11 0 11 = 8 bits, header 0, no padding
        assert_eq!(decode(&[0, 0b0101_1011], &abc_table()).unwrap(), "abcac");
        assert_eq!(decode(&[0], &abc_table()).unwrap(), "");
    }

    #[test]
    fn test_padding_bits_are_ignored() {
        assert_eq!(decode(&[2, 0b0101_1011], &abc_table()).unwrap(), "abca");
    }

    #[test]
    fn test_empty_table_rejects_bits() {
        let result = decode(&[7, 0x80], &CodeTable::default());
        assert!(matches!(result, Err(HuffError::CorruptPayload(_))));
    }
}
