//! Huffman coding stages
//!
//! Compression runs text through [`frequency::analyze`], [`tree::build`],
//! [`code_table::generate`] and finally [`bitstream::encode`]. Decompression
//! only needs the code table and [`bitstream::decode`].

pub mod bitstream;
pub mod code_table;
pub mod frequency;
pub mod tree;

pub use bitstream::{decode, encode, padding_for, EncodedPayload, MAX_PADDING};
pub use code_table::{generate, BitString, CodeTable};
pub use frequency::{analyze, FrequencyTable};
pub use tree::{build, TreeNode};

use crate::error::Result;
use log::debug;

/// A code table built for one text, able to encode that text and decode
/// the payloads produced from it.
///
/// The payload format does not carry the table, so the same codec has to be
/// used on both sides of a round trip.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(table: CodeTable) -> Self {
        Self { table }
    }

    /// Analyze `text` and build the optimal code table for it
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_frequencies(&analyze(text))
    }

    pub fn from_frequencies(freq: &FrequencyTable) -> Result<Self> {
        let table = match build(freq) {
            Some(root) => generate(&root)?,
            None => CodeTable::default(),
        };
        debug!("codec ready: {} symbols", table.len());
        Ok(Self { table })
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn encode(&self, text: &str) -> Result<EncodedPayload> {
        encode(text, &self.table)
    }

    pub fn decode(&self, payload: &[u8]) -> Result<String> {
        decode(payload, &self.table)
    }
}
