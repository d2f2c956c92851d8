/*
 * Shared helpers for building small synthetic fonts in the tests.
 */

use glyph_dict_codec::font::{DataFile, DictEntry, FontInfo, GlyphEntry};
use glyph_dict_codec::BitString;
use rand::distributions::Distribution;
use rand::prelude::SmallRng;
use rand::SeedableRng;
use rand_distr::Bernoulli;

/// Probability of an inked pixel in the random glyphs.
const INK_PROBABILITY: f64 = 0.3;

/// Builds a font of `glyph_count` random glyphs on a `width` x `height`
/// grid, deterministically from `seed`. The same seed also primes the
/// datafile for the optimizer.
pub fn random_font(glyph_count: usize, width: usize, height: usize, seed: u64) -> DataFile {
    let mut rng = SmallRng::seed_from_u64(seed);
    let pixel = Bernoulli::new(INK_PROBABILITY).unwrap();

    let mut glyphs = Vec::with_capacity(glyph_count);
    for _ in 0..glyph_count {
        let mut data = BitString::with_capacity(width * height);
        for _ in 0..width * height {
            data.push(pixel.sample(&mut rng));
        }
        glyphs.push(GlyphEntry { data, width });
    }

    let mut datafile = DataFile::new(glyphs, Vec::new(), FontInfo::new(width, height));
    datafile.set_seed(seed as u32);
    datafile
}

/// A one-glyph font with a caller-supplied dictionary, for byte-exact
/// encoding scenarios.
pub fn font_with_dictionary(
    glyph: BitString,
    width: usize,
    height: usize,
    dictionary: Vec<DictEntry>,
) -> DataFile {
    let glyphs = vec![GlyphEntry { data: glyph, width }];
    DataFile::new(glyphs, dictionary, FontInfo::new(width, height))
}

pub fn rle_entry(bits: BitString) -> DictEntry {
    DictEntry {
        replacement: bits,
        ref_encode: false,
        score: 0,
    }
}

pub fn ref_entry(bits: BitString) -> DictEntry {
    DictEntry {
        replacement: bits,
        ref_encode: true,
        score: 0,
    }
}
