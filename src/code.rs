//! Code-table derivation
//!
//! One depth-first traversal of a built tree yields the symbol-to-codeword
//! table: `0` for a left descent, `1` for a right descent. The table is
//! prefix-free by construction because symbols only sit on leaves.

use crate::bits::BitSeq;
use crate::tree::HuffNode;
use std::collections::HashMap;
use std::hash::Hash;

/// Derive the codeword table for the tree rooted at `root`.
///
/// A root that is itself a leaf (single-symbol alphabet) has no root-to-leaf
/// path, so its sole symbol gets the fixed one-bit codeword `0`.
pub fn derive<S: Clone + Eq + Hash>(root: &HuffNode<S>) -> HashMap<S, BitSeq> {
    let mut table = HashMap::new();
    match root {
        HuffNode::Leaf { symbol, .. } => {
            let mut code = BitSeq::new();
            code.push(false);
            table.insert(symbol.clone(), code);
        }
        HuffNode::Internal { .. } => walk(root, BitSeq::new(), &mut table),
    }
    table
}

fn walk<S: Clone + Eq + Hash>(node: &HuffNode<S>, prefix: BitSeq, table: &mut HashMap<S, BitSeq>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            table.insert(symbol.clone(), prefix);
        }
        HuffNode::Internal { left, right, .. } => {
            let mut down_left = prefix.clone();
            down_left.push(false);
            walk(left, down_left, table);

            let mut down_right = prefix;
            down_right.push(true);
            walk(right, down_right, table);
        }
    }
}
