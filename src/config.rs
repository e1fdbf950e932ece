//! Configuration for prefix-codec

use serde::{Deserialize, Serialize};

/// How a degenerate single-leaf tree treats incoming bits during decode.
///
/// A one-symbol alphabet has no root-to-leaf path, so the sole symbol is
/// assigned the fixed codeword `0`. `ConsumeAny` lets every incoming bit
/// yield one occurrence of that symbol; `Strict` rejects a `1` bit as a
/// malformed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegeneratePolicy {
    ConsumeAny,
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecConfig {
    pub degenerate_policy: DegeneratePolicy,
    pub max_alphabet_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            degenerate_policy: DegeneratePolicy::ConsumeAny,
            max_alphabet_size: 1 << 20,
        }
    }
}
