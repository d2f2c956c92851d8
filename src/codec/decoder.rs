use anyhow::{bail, Result};

use crate::codec::rle::decode_rle;
use crate::codec::{EncodedFont, DICT_START, REF_FILL_ZEROS, REF_ONE, REF_RESERVED, REF_ZERO};
use crate::font::FontInfo;
use crate::BitString;

/// Expands a reference string back into pixels.
///
/// Dictionary references resolve against the RLE section first and fall
/// through into the ref section, whose entries are expanded recursively.
/// The recursion terminates because ref entries only ever reference RLE
/// entries and the single-bit codes.
pub fn decode_refstring(
    encoded: &EncodedFont,
    refstring: &[u8],
    font_info: &FontInfo,
) -> Result<BitString> {
    let mut result = BitString::new();

    for &code in refstring {
        match code {
            REF_ZERO => result.push(false),
            REF_ONE => result.push(true),
            REF_FILL_ZEROS => result.resize(font_info.glyph_bits(), false),
            REF_RESERVED => {}
            _ => {
                let index = (code - DICT_START) as usize;
                if index < encoded.rle_dictionary.len() {
                    result.extend_from_bitslice(&decode_rle(&encoded.rle_dictionary[index]));
                } else {
                    match encoded.ref_dictionary.get(index - encoded.rle_dictionary.len()) {
                        Some(entry) => {
                            let part = decode_refstring(encoded, entry, font_info)?;
                            result.extend_from_bitslice(&part);
                        }
                        None => bail!(
                            "reference {} points past the dictionaries ({} RLE + {} ref entries)",
                            code,
                            encoded.rle_dictionary.len(),
                            encoded.ref_dictionary.len()
                        ),
                    }
                }
            }
        }
    }

    Ok(result)
}

/// Decodes glyph `index` of an encoded font.
pub fn decode_glyph(encoded: &EncodedFont, index: usize, font_info: &FontInfo) -> Result<BitString> {
    match encoded.glyphs.get(index) {
        Some(refstring) => decode_refstring(encoded, refstring, font_info),
        None => bail!(
            "glyph {} out of range, font has {} glyphs",
            index,
            encoded.glyphs.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;

    #[test]
    fn single_bit_codes_append_one_pixel() {
        let encoded = EncodedFont::default();
        let decoded = decode_refstring(&encoded, &[1, 0, 1, 0, 1], &FontInfo::new(5, 1)).unwrap();

        assert_eq!(decoded, bitvec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn blank_fill_pads_to_the_glyph_grid() {
        let encoded = EncodedFont::default();
        let decoded = decode_refstring(&encoded, &[1, 2], &FontInfo::new(3, 2)).unwrap();

        assert_eq!(decoded, bitvec![1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn reserved_code_is_ignored() {
        let encoded = EncodedFont::default();
        let decoded = decode_refstring(&encoded, &[3, 1, 3], &FontInfo::new(1, 1)).unwrap();

        assert_eq!(decoded, bitvec![1]);
    }

    #[test]
    fn ref_entries_expand_recursively() {
        let encoded = EncodedFont {
            rle_dictionary: vec![vec![0x81, 0x01]], // code 4: [1, 0]
            ref_dictionary: vec![vec![0, 4]],       // code 5: [0, 1, 0]
            glyphs: vec![vec![5, 5]],
        };
        let decoded = decode_glyph(&encoded, 0, &FontInfo::new(3, 2)).unwrap();

        assert_eq!(decoded, bitvec![0, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn out_of_range_references_are_rejected() {
        let encoded = EncodedFont {
            rle_dictionary: vec![vec![0x81]],
            ref_dictionary: Vec::new(),
            glyphs: Vec::new(),
        };

        assert!(decode_refstring(&encoded, &[200], &FontInfo::new(1, 1)).is_err());
        assert!(decode_glyph(&encoded, 0, &FontInfo::new(1, 1)).is_err());
    }
}
