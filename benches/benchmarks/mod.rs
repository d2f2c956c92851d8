use glyph_dict_codec::font::{DataFile, FontInfo, GlyphEntry};
use glyph_dict_codec::BitString;
use rand::distributions::Distribution;
use rand::prelude::SmallRng;
use rand::SeedableRng;
use rand_distr::Bernoulli;

pub mod encoder;
pub mod optimizer;

/// Number of glyphs in the benched font.
const GLYPH_COUNT: usize = 96;

/// Glyph grid used by the benched font.
const GRID_WIDTH: usize = 8;
const GRID_HEIGHT: usize = 12;

/// Probability of an inked pixel.
const INK_PROBABILITY: f64 = 0.3;

/// Builds the synthetic font every benchmark runs against.
fn get_font() -> DataFile {
    let mut rng = SmallRng::seed_from_u64(0);
    let pixel = Bernoulli::new(INK_PROBABILITY).unwrap();

    let mut glyphs = Vec::with_capacity(GLYPH_COUNT);
    for _ in 0..GLYPH_COUNT {
        let mut data = BitString::with_capacity(GRID_WIDTH * GRID_HEIGHT);
        for _ in 0..GRID_WIDTH * GRID_HEIGHT {
            data.push(pixel.sample(&mut rng));
        }
        glyphs.push(GlyphEntry {
            data,
            width: GRID_WIDTH,
        });
    }

    DataFile::new(glyphs, Vec::new(), FontInfo::new(GRID_WIDTH, GRID_HEIGHT))
}
