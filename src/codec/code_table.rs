//! Code table generation
//!
//! Walks a Huffman tree and records the path to every leaf as that symbol's
//! code. Descending left appends a `1`, descending right appends a `0`.

use crate::codec::frequency::FrequencyTable;
use crate::codec::tree::TreeNode;
use crate::error::{HuffError, Result};
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of bits
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitString(Vec<bool>);

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub fn pop(&mut self) -> Option<bool> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &BitString) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        BitString(bits)
    }
}

impl FromStr for BitString {
    type Err = HuffError;
    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(HuffError::InvalidCodeTable(format!(
                    "invalid bit {:?} in code {:?}",
                    other, s
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .map(BitString)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Bidirectional symbol/code mapping.
///
/// Both directions are filled in lockstep, so `inverse[forward[s]] == s`
/// holds for every symbol. Codes are never empty and never a prefix of
/// another code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    forward: BTreeMap<char, BitString>,
    inverse: HashMap<BitString, char>,
}

impl CodeTable {
    /// Build a table from explicit `(symbol, code)` pairs, rejecting anything
    /// that would not decode unambiguously.
    pub fn from_codes<I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, BitString)>,
    {
        let mut table = CodeTable::default();
        for (symbol, code) in codes {
            table.insert(symbol, code)?;
        }
        table.check_prefix_free()?;
        Ok(table)
    }

    fn insert(&mut self, symbol: char, code: BitString) -> Result<()> {
        if code.is_empty() {
            return Err(HuffError::InvalidCodeTable(format!(
                "empty code for symbol {:?}",
                symbol
            )));
        }
        if self.forward.contains_key(&symbol) {
            return Err(HuffError::InvalidCodeTable(format!(
                "symbol {:?} has more than one code",
                symbol
            )));
        }
        if let Some(existing) = self.inverse.get(&code) {
            return Err(HuffError::InvalidCodeTable(format!(
                "code {} assigned to both {:?} and {:?}",
                code, existing, symbol
            )));
        }
        self.inverse.insert(code.clone(), symbol);
        self.forward.insert(symbol, code);
        Ok(())
    }

    fn check_prefix_free(&self) -> Result<()> {
        // In lexicographic order a prefix sorts directly before its extensions.
        let mut codes: Vec<&BitString> = self.inverse.keys().collect();
        codes.sort();
        for pair in codes.windows(2) {
            if pair[1].starts_with(pair[0]) {
                return Err(HuffError::InvalidCodeTable(format!(
                    "code {} is a prefix of {}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(())
    }

    pub fn code(&self, symbol: char) -> Option<&BitString> {
        self.forward.get(&symbol)
    }

    pub fn symbol(&self, code: &BitString) -> Option<char> {
        self.inverse.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Length of the longest code, 0 for an empty table
    pub fn max_code_len(&self) -> usize {
        self.forward.values().map(BitString::len).max().unwrap_or(0)
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (char, &BitString)> + '_ {
        self.forward.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Exact number of code bits needed to encode a text with these
    /// frequencies, before padding.
    pub fn encoded_bit_len(&self, freq: &FrequencyTable) -> Result<u64> {
        freq.iter().try_fold(0u64, |acc, (symbol, count)| {
            let code = self.code(symbol).ok_or(HuffError::UnknownSymbol(symbol))?;
            Ok(acc + code.len() as u64 * count)
        })
    }
}

/// Derive the code table for a tree.
///
/// A root that is itself a leaf gets the one-bit code `0`. Fails with
/// [`HuffError::InvalidCodeTable`] if the tree holds the same symbol in two
/// leaves.
pub fn generate(root: &TreeNode) -> Result<CodeTable> {
    let mut table = CodeTable::default();
    if let TreeNode::Leaf { symbol, .. } = root {
        table.insert(*symbol, BitString::from(vec![false]))?;
        return Ok(table);
    }

    let mut path = BitString::new();
    walk(root, &mut path, &mut table)?;
    debug!(
        "generated {} codes, longest {} bits",
        table.len(),
        table.max_code_len()
    );
    Ok(table)
}

fn walk(node: &TreeNode, path: &mut BitString, table: &mut CodeTable) -> Result<()> {
    match node {
        TreeNode::Leaf { symbol, .. } => table.insert(*symbol, path.clone()),
        TreeNode::Internal { left, right, .. } => {
            path.push(true);
            walk(left, path, table)?;
            path.pop();

            path.push(false);
            walk(right, path, table)?;
            path.pop();
            Ok(())
        }
    }
}
