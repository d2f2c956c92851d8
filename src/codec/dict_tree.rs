use bitvec::slice::BitSlice;

use crate::codec::{DICT_START, REF_ONE, REF_ZERO};
use crate::font::DictEntry;

/// Binary prefix tree over the dictionary's replacement patterns, used to
/// greedily segment a bitstring into dictionary references.
///
/// Nodes live in a flat arena and address each other by index. The tree is
/// rebuilt from scratch for every encode pass, so a compact table beats
/// boxed nodes here.
pub struct DictTree {
    nodes: Vec<Node>,
}

#[derive(Default)]
struct Node {
    /// Arena slots of the children reached by a `0` and a `1` bit. Zero
    /// means no child; slot zero holds the root, which is never a child.
    children: [u32; 2],

    /// Reference code this node terminates, if any.
    code: Option<u8>,

    /// Mirrors the ref-encode flag of the terminating entry.
    ref_encode: bool,
}

impl DictTree {
    /// Builds the lookup tree from a dictionary already sorted for emission.
    ///
    /// The two single-bit codes are inserted first, so a lookup can always
    /// make progress. Every non-empty entry then gets the code matching its
    /// emission position; when two entries share a pattern, the code of the
    /// first one stands and later duplicates are never referenced.
    pub fn build(sorted_dict: &[DictEntry]) -> Self {
        let mut tree = Self {
            nodes: vec![Node::default()],
        };

        let zero = tree.add_child(0, false);
        tree.nodes[zero].code = Some(REF_ZERO);
        let one = tree.add_child(0, true);
        tree.nodes[one].code = Some(REF_ONE);

        let entries = sorted_dict.iter().filter(|d| !d.replacement.is_empty());
        for (position, entry) in entries.enumerate() {
            let mut node = 0;
            for bit in entry.replacement.iter().by_vals() {
                node = tree.child_or_insert(node, bit);
            }

            if tree.nodes[node].code.is_none() {
                tree.nodes[node].code = Some(DICT_START + position as u8);
                tree.nodes[node].ref_encode = entry.ref_encode;
            }
        }

        tree
    }

    /// Greedy longest match at the head of `bits`: the code of the longest
    /// dictionary pattern prefixing the input, and how many bits it covers.
    ///
    /// While encoding dictionary entries (`is_glyph == false`), ref-coded
    /// entries are not eligible matches. That restriction is what keeps the
    /// reference graph acyclic: a ref entry can only point at RLE entries
    /// and the single-bit codes that precede it.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches, which would mean the single-bit codes are
    /// missing from the tree.
    pub fn walk(&self, bits: &BitSlice, is_glyph: bool) -> (u8, usize) {
        let mut best = None;
        let mut node = 0;
        let mut length = 0;

        for bit in bits.iter().by_vals() {
            let child = self.nodes[node].children[bit as usize];
            if child == 0 {
                break;
            }
            node = child as usize;
            length += 1;

            let reached = &self.nodes[node];
            if is_glyph || !reached.ref_encode {
                if let Some(code) = reached.code {
                    best = Some((code, length));
                }
            }
        }

        best.expect("no dictionary code matches the input bits")
    }

    fn child_or_insert(&mut self, node: usize, bit: bool) -> usize {
        let existing = self.nodes[node].children[bit as usize];
        match existing {
            0 => self.add_child(node, bit),
            _ => existing as usize,
        }
    }

    fn add_child(&mut self, node: usize, bit: bool) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node::default());
        self.nodes[node].children[bit as usize] = index as u32;
        index
    }
}
