use bitvec::slice::BitSlice;
use itertools::Itertools;

use crate::codec::dict_tree::DictTree;
use crate::codec::rle::encode_rle;
use crate::codec::{EncodedFont, RefString, REF_FILL_ZEROS};
use crate::font::{DataFile, DictEntry};

/// Reference-encodes one bitstring against the dictionary tree.
///
/// Glyphs get their trailing `0` bits stripped up front; the decoder grows
/// them back from the blank-fill opcode. A greedy match may still run past
/// the stripped end, so the opcode is emitted whenever segmentation stops
/// short of the full input length.
pub fn encode_ref(bits: &BitSlice, tree: &DictTree, is_glyph: bool) -> RefString {
    let mut result = RefString::new();

    let end = match is_glyph {
        true => bits.last_one().map_or(0, |last| last + 1),
        false => bits.len(),
    };

    let mut pos = 0;
    while pos < end {
        let (code, length) = tree.walk(&bits[pos..], is_glyph);
        result.push(code);
        pos += length;
    }

    if pos < bits.len() {
        result.push(REF_FILL_ZEROS);
    }

    result
}

/// Encodes the whole datafile into its logical output sections.
///
/// The dictionary is stable-sorted so that RLE-coded entries come first and
/// empty slots last; reference codes follow this emission order, which is
/// how the decoder tells the two dictionary sections apart by index alone.
pub fn encode_font(datafile: &DataFile) -> EncodedFont {
    let sorted_dict: Vec<DictEntry> = datafile
        .dictionary()
        .iter()
        .cloned()
        .sorted_by_key(|entry| (entry.replacement.is_empty(), entry.ref_encode))
        .collect();

    let tree = DictTree::build(&sorted_dict);

    let mut result = EncodedFont::default();
    for entry in &sorted_dict {
        if entry.replacement.is_empty() {
            continue;
        } else if entry.ref_encode {
            result
                .ref_dictionary
                .push(encode_ref(&entry.replacement, &tree, false));
        } else {
            result.rle_dictionary.push(encode_rle(&entry.replacement));
        }
    }

    for index in 0..datafile.glyph_count() {
        let glyph = datafile.glyph_entry(index);
        result.glyphs.push(encode_ref(&glyph.data, &tree, true));
    }

    result
}
