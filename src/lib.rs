//! prefix-codec: Huffman prefix-code codec.
//!
//! Builds a minimum-expected-length binary prefix code from a frequency
//! distribution over symbols, then:
//! - encodes symbol sequences to bit sequences via a derived lookup table
//! - decodes bit sequences back by walking the tree bit-by-bit
//!
//! The codec is immutable once built, so a single instance can serve
//! concurrent encode/decode callers without coordination.

pub mod bits;
pub mod code;
pub mod config;
pub mod error;
pub mod tree;

pub use bits::BitSeq;
pub use config::{CodecConfig, DegeneratePolicy};
pub use error::CodecError;
pub use tree::HuffNode;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A Huffman codec over symbol type `S`.
///
/// The code table drives `encode`; the tree drives `decode`. Both are built
/// once at construction and never mutated.
pub struct HuffmanCodec<S> {
    root: HuffNode<S>,
    table: HashMap<S, BitSeq>,
    config: CodecConfig,
}

impl<S> HuffmanCodec<S>
where
    S: Clone + Eq + Hash + Ord + Debug,
{
    /// Build a codec for the given frequency distribution.
    ///
    /// Weights need not be normalized; only relative magnitude matters.
    /// Fails with `InvalidInput` on an empty map, a non-finite or negative
    /// weight, or an all-zero total.
    pub fn new(freq_map: &HashMap<S, f64>) -> Result<Self, CodecError> {
        Self::with_config(freq_map, CodecConfig::default())
    }

    pub fn with_config(freq_map: &HashMap<S, f64>, config: CodecConfig) -> Result<Self, CodecError> {
        if freq_map.len() > config.max_alphabet_size {
            return Err(CodecError::InvalidInput(format!(
                "alphabet size {} exceeds configured maximum {}",
                freq_map.len(),
                config.max_alphabet_size
            )));
        }
        let root = tree::build(freq_map)?;
        let table = code::derive(&root);
        tracing::debug!(
            symbols = table.len(),
            depth = root.depth(),
            "huffman codec ready"
        );
        Ok(Self {
            root,
            table,
            config,
        })
    }

    /// Build a codec by counting symbol occurrences in a sample corpus.
    pub fn from_sample(sample: &[S]) -> Result<Self, CodecError> {
        let mut freq_map: HashMap<S, f64> = HashMap::new();
        for symbol in sample {
            *freq_map.entry(symbol.clone()).or_insert(0.0) += 1.0;
        }
        Self::new(&freq_map)
    }

    /// Encode a symbol sequence into a bit sequence.
    ///
    /// Fails with `UnsupportedSymbol` on the first symbol absent from the
    /// code table; no partial output is returned.
    pub fn encode(&self, source: &[S]) -> Result<BitSeq, CodecError> {
        let mut out = BitSeq::with_capacity(source.len());
        for symbol in source {
            let code = self
                .table
                .get(symbol)
                .ok_or_else(|| CodecError::UnsupportedSymbol(format!("{symbol:?}")))?;
            out.extend(code);
        }
        Ok(out)
    }

    /// Decode a bit sequence back into the original symbol sequence.
    ///
    /// Fails with `MalformedStream` if the input ends mid-codeword; the
    /// returned offset is where decoding stopped. An empty input decodes to
    /// an empty sequence.
    pub fn decode(&self, bits: &BitSeq) -> Result<Vec<S>, CodecError> {
        if let HuffNode::Leaf { symbol, .. } = &self.root {
            return self.decode_degenerate(symbol, bits);
        }

        let mut out = Vec::new();
        let mut cursor = &self.root;
        for bit in bits.iter() {
            let next = match cursor {
                HuffNode::Internal { left, right, .. } => {
                    if bit {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    }
                }
                HuffNode::Leaf { .. } => unreachable!("cursor resets to the internal root on every leaf"),
            };
            if let HuffNode::Leaf { symbol, .. } = next {
                out.push(symbol.clone());
                cursor = &self.root;
            } else {
                cursor = next;
            }
        }

        if !std::ptr::eq(cursor, &self.root) {
            return Err(CodecError::MalformedStream {
                bit_offset: bits.len(),
            });
        }
        Ok(out)
    }

    /// Single-leaf tree: every bit yields the sole symbol. Under the
    /// `Strict` policy a bit that is not the fixed codeword `0` is rejected.
    fn decode_degenerate(&self, symbol: &S, bits: &BitSeq) -> Result<Vec<S>, CodecError> {
        if self.config.degenerate_policy == DegeneratePolicy::Strict {
            if let Some(bit_offset) = bits.iter().position(|bit| bit) {
                return Err(CodecError::MalformedStream { bit_offset });
            }
        }
        Ok(vec![symbol.clone(); bits.len()])
    }

    /// The derived symbol-to-codeword table.
    pub fn code_table(&self) -> &HashMap<S, BitSeq> {
        &self.table
    }

    /// The codeword for one symbol, if it is in the alphabet.
    pub fn codeword(&self, symbol: &S) -> Option<&BitSeq> {
        self.table.get(symbol)
    }

    /// Expected codeword length in bits per symbol, weighted by the input
    /// frequencies. Lower-bounded by the distribution's Shannon entropy.
    pub fn mean_codeword_len(&self) -> f64 {
        let mut weighted_bits = 0.0;
        let mut total_weight = 0.0;
        self.root.each_leaf(&mut |symbol, weight| {
            if let Some(code) = self.table.get(symbol) {
                weighted_bits += weight * code.len() as f64;
            }
            total_weight += weight;
        });
        if total_weight > 0.0 {
            weighted_bits / total_weight
        } else {
            0.0
        }
    }
}

impl HuffmanCodec<char> {
    /// Encode a string over the source alphabet.
    pub fn encode_str(&self, source: &str) -> Result<BitSeq, CodecError> {
        let symbols: Vec<char> = source.chars().collect();
        self.encode(&symbols)
    }

    /// Decode a bit sequence back into a string.
    pub fn decode_string(&self, bits: &BitSeq) -> Result<String, CodecError> {
        Ok(self.decode(bits)?.into_iter().collect())
    }
}

/// Shannon entropy of a frequency distribution in bits per symbol.
///
/// The theoretical lower bound on mean codeword length for any prefix code
/// over the same distribution.
pub fn shannon_entropy<S>(freq_map: &HashMap<S, f64>) -> f64 {
    let total: f64 = freq_map.values().sum();
    if total <= 0.0 {
        return 0.0;
    }
    freq_map
        .values()
        .filter(|&&w| w > 0.0)
        .map(|&w| {
            let p = w / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook_codec() -> HuffmanCodec<char> {
        let map: HashMap<char, f64> = [
            ('a', 5.0),
            ('b', 9.0),
            ('c', 12.0),
            ('d', 13.0),
            ('e', 16.0),
            ('f', 45.0),
        ]
        .into_iter()
        .collect();
        HuffmanCodec::new(&map).unwrap()
    }

    #[test]
    fn test_textbook_code_lengths() {
        let codec = textbook_codec();
        let len = |c: char| codec.codeword(&c).unwrap().len();
        assert!(len('f') <= len('e'));
        assert!(len('e') <= len('d'));
        assert!(len('d') <= len('c'));
        assert!(len('c') <= len('b'));
        assert!(len('b') <= len('a'));
        assert_eq!(len('f'), 1);
    }

    #[test]
    fn test_roundtrip_abcdef() {
        let codec = textbook_codec();
        let bits = codec.encode_str("abcdef").unwrap();
        assert_eq!(codec.decode_string(&bits).unwrap(), "abcdef");
    }

    #[test]
    fn test_empty_sequence_roundtrip() {
        let codec = textbook_codec();
        let bits = codec.encode(&[]).unwrap();
        assert!(bits.is_empty());
        assert_eq!(codec.decode(&bits).unwrap(), Vec::<char>::new());
    }

    #[test]
    fn test_unsupported_symbol_named() {
        let codec = textbook_codec();
        match codec.encode_str("abcz") {
            Err(CodecError::UnsupportedSymbol(s)) => assert!(s.contains('z')),
            other => panic!("expected UnsupportedSymbol, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_bit_is_malformed() {
        let codec = textbook_codec();
        let mut bits = codec.encode_str("abcdef").unwrap();
        bits.push(true);
        assert!(matches!(
            codec.decode(&bits),
            Err(CodecError::MalformedStream { .. })
        ));
    }

    #[test]
    fn test_from_sample() {
        let text = "David Huffman invented Huffman coding at MIT in 1952.";
        let symbols: Vec<char> = text.chars().collect();
        let codec = HuffmanCodec::from_sample(&symbols).unwrap();
        let bits = codec.encode_str(text).unwrap();
        assert_eq!(codec.decode_string(&bits).unwrap(), text);
        // the reference string needs 424 bits in ASCII
        assert!(bits.len() < 424);
    }

    #[test]
    fn test_degenerate_consume_any() {
        let map: HashMap<char, f64> = [('x', 1.0)].into_iter().collect();
        let codec = HuffmanCodec::new(&map).unwrap();
        let bits = codec.encode_str("xxxx").unwrap();
        assert_eq!(bits.len(), 4);
        assert_eq!(codec.decode_string(&bits).unwrap(), "xxxx");

        // default policy: any bit yields the symbol
        let stray: BitSeq = "101".parse().unwrap();
        assert_eq!(codec.decode_string(&stray).unwrap(), "xxx");
    }

    #[test]
    fn test_degenerate_strict_rejects_one_bits() {
        let map: HashMap<char, f64> = [('x', 1.0)].into_iter().collect();
        let config = CodecConfig {
            degenerate_policy: DegeneratePolicy::Strict,
            ..CodecConfig::default()
        };
        let codec = HuffmanCodec::with_config(&map, config).unwrap();
        let bits = codec.encode_str("xxx").unwrap();
        assert_eq!(codec.decode_string(&bits).unwrap(), "xxx");

        let stray: BitSeq = "001".parse().unwrap();
        match codec.decode(&stray) {
            Err(CodecError::MalformedStream { bit_offset }) => assert_eq!(bit_offset, 2),
            other => panic!("expected MalformedStream, got {other:?}"),
        }
    }

    #[test]
    fn test_determinism() {
        let map: HashMap<char, f64> = "mississippi river".chars().map(|c| (c, 1.0)).collect();
        let a = HuffmanCodec::new(&map).unwrap();
        let b = HuffmanCodec::new(&map).unwrap();
        assert_eq!(a.code_table(), b.code_table());
    }

    #[test]
    fn test_mean_len_bounded_by_entropy() {
        let map: HashMap<char, f64> = [
            ('a', 5.0),
            ('b', 9.0),
            ('c', 12.0),
            ('d', 13.0),
            ('e', 16.0),
            ('f', 45.0),
        ]
        .into_iter()
        .collect();
        let codec = HuffmanCodec::new(&map).unwrap();
        let mean = codec.mean_codeword_len();
        let entropy = shannon_entropy(&map);
        assert!(mean >= entropy, "mean {mean} below entropy {entropy}");
        assert!(mean < entropy + 1.0, "huffman is within one bit of entropy");
    }

    #[test]
    fn test_generic_symbol_type() {
        let map: HashMap<String, f64> = [
            ("the".to_string(), 10.0),
            ("quick".to_string(), 2.0),
            ("fox".to_string(), 5.0),
        ]
        .into_iter()
        .collect();
        let codec = HuffmanCodec::new(&map).unwrap();
        let words: Vec<String> = ["the", "fox", "the", "quick"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let bits = codec.encode(&words).unwrap();
        assert_eq!(codec.decode(&bits).unwrap(), words);
    }

    #[test]
    fn test_alphabet_size_cap() {
        let map: HashMap<char, f64> = [('a', 1.0), ('b', 1.0)].into_iter().collect();
        let config = CodecConfig {
            max_alphabet_size: 1,
            ..CodecConfig::default()
        };
        assert!(matches!(
            HuffmanCodec::with_config(&map, config),
            Err(CodecError::InvalidInput(_))
        ));
    }
}
