//! Packed bit sequences
//!
//! `BitSeq` stores an ordered sequence of bits MSB-first in a byte vector
//! with an explicit bit length, so codewords and encoded streams never pay
//! for padding ambiguity.

use crate::error::CodecError;
use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::fmt;
use std::io;
use std::str::FromStr;

/// An ordered sequence of bits, packed MSB-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BitSeq {
    bytes: Vec<u8>,
    len: usize,
}

impl BitSeq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity((bits + 7) / 8),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a single bit.
    pub fn push(&mut self, bit: bool) {
        let slot = self.len % 8;
        if slot == 0 {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[self.len / 8] |= 1 << (7 - slot);
        }
        self.len += 1;
    }

    /// Append all bits of `other`, preserving order.
    pub fn extend(&mut self, other: &BitSeq) {
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// The bit at `idx`, or `None` past the end.
    pub fn get(&self, idx: usize) -> Option<bool> {
        if idx >= self.len {
            return None;
        }
        Some((self.bytes[idx / 8] >> (7 - idx % 8)) & 1 == 1)
    }

    pub fn iter(&self) -> Bits<'_> {
        Bits { seq: self, idx: 0 }
    }

    /// The packed byte representation; the final byte is zero-padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Write the bits into `writer`, zero-padding to a byte boundary.
    pub fn write_into<W: io::Write>(&self, writer: W) -> io::Result<()> {
        let mut w = BitWriter::endian(writer, BigEndian);
        for bit in self.iter() {
            w.write_bit(bit)?;
        }
        w.byte_align()
    }

    /// Read `bit_len` bits from `reader`.
    pub fn read_from<R: io::Read>(reader: R, bit_len: usize) -> Result<Self, CodecError> {
        let mut r = BitReader::endian(reader, BigEndian);
        let mut seq = Self::with_capacity(bit_len);
        for _ in 0..bit_len {
            seq.push(r.read_bit()?);
        }
        Ok(seq)
    }

    /// Reconstruct a sequence from packed bytes and its exact bit length.
    pub fn from_bytes(data: &[u8], bit_len: usize) -> Result<Self, CodecError> {
        if bit_len > data.len() * 8 {
            return Err(CodecError::InvalidInput(format!(
                "bit length {} exceeds {} available bits",
                bit_len,
                data.len() * 8
            )));
        }
        Self::read_from(data, bit_len)
    }
}

pub struct Bits<'a> {
    seq: &'a BitSeq,
    idx: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = self.seq.get(self.idx)?;
        self.idx += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.seq.len - self.idx;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl<'a> IntoIterator for &'a BitSeq {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Bits<'a> {
        self.iter()
    }
}

impl FromIterator<bool> for BitSeq {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut seq = BitSeq::new();
        for bit in iter {
            seq.push(bit);
        }
        seq
    }
}

impl fmt::Display for BitSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl FromStr for BitSeq {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, CodecError> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(CodecError::InvalidInput(format!(
                    "invalid bit character {other:?}"
                ))),
            })
            .collect()
    }
}
