use crate::BitString;

/// A single dictionary slot: a learned bit pattern that glyphs (and other
/// dictionary entries) can reference with one byte.
///
/// An empty `replacement` marks the slot as unused.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictEntry {
    /// The bits this entry expands to.
    pub replacement: BitString,
    /// When true, the entry is emitted as references into earlier entries
    /// instead of run-length bytes.
    pub ref_encode: bool,
    /// Bytes this entry saved the last time it was scored. Used to pick the
    /// replacement victim for the next mutation.
    pub score: usize,
}

/// One glyph of the font. Glyph data is read-only while the dictionary is
/// being optimized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphEntry {
    /// `max_width * max_height` pixels in row-major order.
    pub data: BitString,
    /// Advance width in pixels.
    pub width: usize,
}

/// Font-wide metadata. The decoder needs the glyph grid dimensions to expand
/// the blank-fill opcode back into trailing background pixels.
#[readonly::make]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontInfo {
    pub max_width: usize,
    pub max_height: usize,
}

impl FontInfo {
    pub fn new(max_width: usize, max_height: usize) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Number of bits in a full glyph grid.
    pub fn glyph_bits(&self) -> usize {
        self.max_width * self.max_height
    }
}

/// The working state of a font being compressed: the glyph table, the
/// dictionary slots the optimizer rewrites, and the RNG seed persisted
/// between optimization runs.
///
/// Trial copies taken during optimization are plain value clones; only the
/// dictionary and the seed ever change after construction.
#[derive(Clone, Debug)]
pub struct DataFile {
    glyphs: Vec<GlyphEntry>,
    dictionary: Vec<DictEntry>,
    font_info: FontInfo,
    seed: u32,
}

impl DataFile {
    /// Number of dictionary slots. Together with the four reserved opcodes,
    /// every reference fits in a single byte.
    pub const DICT_SIZE: usize = 252;

    /// Builds a datafile from a glyph table and an initial dictionary. The
    /// dictionary is padded with empty slots (or truncated) to exactly
    /// [`DataFile::DICT_SIZE`] entries.
    pub fn new(glyphs: Vec<GlyphEntry>, dictionary: Vec<DictEntry>, font_info: FontInfo) -> Self {
        let mut dictionary = dictionary;
        dictionary.resize(Self::DICT_SIZE, DictEntry::default());

        Self {
            glyphs,
            dictionary,
            font_info,
            seed: 0x1234abcd,
        }
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyph_entry(&self, index: usize) -> &GlyphEntry {
        &self.glyphs[index]
    }

    pub fn font_info(&self) -> &FontInfo {
        &self.font_info
    }

    pub fn dictionary(&self) -> &[DictEntry] {
        &self.dictionary
    }

    pub fn dictionary_entry(&self, index: usize) -> &DictEntry {
        &self.dictionary[index]
    }

    pub fn set_dictionary_entry(&mut self, index: usize, entry: DictEntry) {
        self.dictionary[index] = entry;
    }

    /// The slot the optimizer should overwrite next: the lowest-scoring one,
    /// with empty slots counting as score zero so they are picked first.
    pub fn low_score_index(&self) -> usize {
        let mut best_index = 0;
        let mut best_score = usize::MAX;

        for (index, entry) in self.dictionary.iter().enumerate() {
            let score = match entry.replacement.is_empty() {
                true => 0,
                false => entry.score,
            };

            if score < best_score {
                best_score = score;
                best_index = index;
            }
        }
        best_index
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }
}
