//! Huffman tree construction
//!
//! Builds the prefix-code tree by greedily merging the two lowest-weight
//! candidates until one root remains. Ties on weight are broken by the
//! smallest leaf symbol contained in each candidate, so the tree shape is
//! fully deterministic for a given frequency map.

use crate::error::CodecError;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub enum HuffNode<S> {
    Leaf {
        weight: f64,
        symbol: S,
    },
    Internal {
        weight: f64,
        left: Box<HuffNode<S>>,
        right: Box<HuffNode<S>>,
    },
}

impl<S> HuffNode<S> {
    pub fn weight(&self) -> f64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Longest root-to-leaf path; 0 for a lone leaf.
    pub fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Visit every leaf with its symbol and weight.
    pub fn each_leaf(&self, f: &mut impl FnMut(&S, f64)) {
        match self {
            HuffNode::Leaf { symbol, weight } => f(symbol, *weight),
            HuffNode::Internal { left, right, .. } => {
                left.each_leaf(f);
                right.each_leaf(f);
            }
        }
    }
}

/// A heap entry: a partially-built subtree plus its smallest contained leaf
/// symbol, which serves as the weight tie-breaker.
struct Candidate<S> {
    node: HuffNode<S>,
    rep: S,
}

impl<S: Ord> PartialEq for Candidate<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S: Ord> Eq for Candidate<S> {}

impl<S: Ord> PartialOrd for Candidate<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Ord> Ord for Candidate<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on (weight, representative symbol); weights are validated
        // finite before any Candidate exists, so total_cmp never sees NaN
        other
            .node
            .weight()
            .total_cmp(&self.node.weight())
            .then_with(|| other.rep.cmp(&self.rep))
    }
}

/// Build the Huffman tree for `freq_map` and return its root.
///
/// Every symbol in the map receives a leaf, including zero-weight ones, so
/// encoding any mapped symbol always succeeds. A single-symbol map yields a
/// root that is itself a leaf.
pub fn build<S>(freq_map: &HashMap<S, f64>) -> Result<HuffNode<S>, CodecError>
where
    S: Clone + Eq + Hash + Ord + Debug,
{
    validate(freq_map)?;
    tracing::debug!(symbols = freq_map.len(), "building huffman tree");

    // Representative symbols are distinct across live candidates (each leaf
    // symbol is unique and a merge keeps the smaller of the two), so the heap
    // order is strict and independent of HashMap iteration order.
    let mut heap: BinaryHeap<Candidate<S>> = freq_map
        .iter()
        .map(|(symbol, &weight)| Candidate {
            node: HuffNode::Leaf {
                weight,
                symbol: symbol.clone(),
            },
            rep: symbol.clone(),
        })
        .collect();

    while heap.len() > 1 {
        let first = heap.pop().ok_or_else(underflow)?;
        let second = heap.pop().ok_or_else(underflow)?;

        // the candidate with the smaller (weight, rep) key goes left
        let rep = if first.rep <= second.rep {
            first.rep.clone()
        } else {
            second.rep.clone()
        };
        heap.push(Candidate {
            node: HuffNode::Internal {
                weight: first.node.weight() + second.node.weight(),
                left: Box::new(first.node),
                right: Box::new(second.node),
            },
            rep,
        });
    }

    heap.pop().map(|c| c.node).ok_or_else(underflow)
}

fn underflow() -> CodecError {
    CodecError::InvalidInput("candidate heap underflow".into())
}

fn validate<S: Debug>(freq_map: &HashMap<S, f64>) -> Result<(), CodecError> {
    if freq_map.is_empty() {
        return Err(CodecError::InvalidInput("empty frequency map".into()));
    }
    let mut total = 0.0;
    for (symbol, &weight) in freq_map {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CodecError::InvalidInput(format!(
                "weight {weight} for symbol {symbol:?} is not a finite non-negative number"
            )));
        }
        total += weight;
    }
    if total <= 0.0 {
        return Err(CodecError::InvalidInput(
            "all symbol weights are zero".into(),
        ));
    }
    Ok(())
}
