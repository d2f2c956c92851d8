use std::collections::HashSet;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::codec::encoder::encode_font;
use crate::font::{DataFile, DictEntry};
use crate::BitString;

/// Picks a random substring among all the glyphs in the datafile: a random
/// glyph, a random length in `2..=len`, and a random start position.
///
/// # Panics
///
/// Panics if the datafile has no glyphs, or a glyph holds fewer than two
/// bits. Both would make the whole optimization pointless.
pub fn random_substring(datafile: &DataFile, rng: &mut SmallRng) -> BitString {
    let index = rng.gen_range(0..datafile.glyph_count());
    let bits = &datafile.glyph_entry(index).data;

    let length = rng.gen_range(2..=bits.len());
    let start = rng.gen_range(0..=bits.len() - length);

    bits[start..start + length].to_bitvec()
}

/// Applies `mutate` to slot `index` of a trial copy, re-encodes, and commits
/// the mutation when the output shrinks. Returns the bytes saved, which are
/// also recorded as the slot's new score.
///
/// Every operator funnels through here, so the acceptance rule lives in one
/// place: strictly smaller wins, ties and regressions leave the datafile
/// untouched.
fn try_mutation(
    datafile: &mut DataFile,
    size: &mut usize,
    index: usize,
    mutate: impl FnOnce(&mut DictEntry),
) -> Option<usize> {
    let mut entry = datafile.dictionary_entry(index).clone();
    mutate(&mut entry);

    let mut trial = datafile.clone();
    trial.set_dictionary_entry(index, entry.clone());

    let newsize = encode_font(&trial).encoded_size();
    if newsize >= *size {
        return None;
    }

    let saved = *size - newsize;
    entry.score = saved;
    datafile.set_dictionary_entry(index, entry);
    *size = newsize;
    Some(saved)
}

/// Tries to replace the worst dictionary entry with a random substring.
pub fn optimize_worst(datafile: &mut DataFile, size: &mut usize, rng: &mut SmallRng) {
    let worst = datafile.low_score_index();
    let substring = random_substring(datafile, rng);

    if let Some(saved) = try_mutation(datafile, size, worst, |entry| {
        entry.replacement = substring;
    }) {
        debug!("worst: replaced slot {}, saved {} bytes", worst, saved);
    }
}

/// Tries to replace a random dictionary entry with a random substring.
pub fn optimize_any(datafile: &mut DataFile, size: &mut usize, rng: &mut SmallRng) {
    let index = rng.gen_range(0..DataFile::DICT_SIZE);
    let substring = random_substring(datafile, rng);

    if let Some(saved) = try_mutation(datafile, size, index, |entry| {
        entry.replacement = substring;
    }) {
        debug!("any: replaced slot {}, saved {} bytes", index, saved);
    }
}

/// Tries to grow a random dictionary entry by a few random bits, prepended
/// or appended one at a time.
pub fn optimize_expand(datafile: &mut DataFile, size: &mut usize, rng: &mut SmallRng) {
    let index = rng.gen_range(0..DataFile::DICT_SIZE);
    let count = rng.gen_range(1..=10);

    let mut grown = datafile.dictionary_entry(index).replacement.clone();
    for _ in 0..count {
        let bit = rng.gen_range(0..2) == 1;
        let prepend = rng.gen_range(0..2) == 1;

        match prepend {
            true => grown.insert(0, bit),
            false => grown.push(bit),
        }
    }

    if let Some(saved) = try_mutation(datafile, size, index, |entry| {
        entry.replacement = grown;
    }) {
        debug!(
            "expand: slot {} grew by {} bits, saved {} bytes",
            index, count, saved
        );
    }
}

/// Tries to shave bits off both ends of a random dictionary entry. The tail
/// erase always spares the entry's final bit.
pub fn optimize_trim(datafile: &mut DataFile, size: &mut usize, rng: &mut SmallRng) {
    let index = rng.gen_range(0..DataFile::DICT_SIZE);
    let length = datafile.dictionary_entry(index).replacement.len();
    if length <= 2 {
        return;
    }

    let bound = (length / 2).min(5);
    let start = rng.gen_range(0..=bound);
    let end = rng.gen_range(0..=bound);

    if let Some(saved) = try_mutation(datafile, size, index, |entry| {
        if start > 0 {
            entry.replacement.drain(..start);
        }
        if end > 0 {
            let len = entry.replacement.len();
            entry.replacement.drain(len - end..len - 1);
        }
    }) {
        debug!(
            "trim: slot {} trimmed by {} head / {} tail, saved {} bytes",
            index, start, end, saved
        );
    }
}

/// Tries to flip a random dictionary entry between RLE and ref coding.
pub fn optimize_refdict(datafile: &mut DataFile, size: &mut usize, rng: &mut SmallRng) {
    let index = rng.gen_range(0..DataFile::DICT_SIZE);

    if let Some(saved) = try_mutation(datafile, size, index, |entry| {
        entry.ref_encode = !entry.ref_encode;
    }) {
        debug!("refdict: toggled slot {}, saved {} bytes", index, saved);
    }
}

/// Tries to overwrite the worst slot with the concatenation of two random
/// entries, coded as a reference into both halves.
pub fn optimize_combine(datafile: &mut DataFile, size: &mut usize, rng: &mut SmallRng) {
    let worst = datafile.low_score_index();
    let first = rng.gen_range(0..DataFile::DICT_SIZE);
    let second = rng.gen_range(0..DataFile::DICT_SIZE);

    let mut combined = datafile.dictionary_entry(first).replacement.clone();
    combined.extend_from_bitslice(&datafile.dictionary_entry(second).replacement);

    if let Some(saved) = try_mutation(datafile, size, worst, |entry| {
        *entry = DictEntry {
            replacement: combined,
            ref_encode: true,
            score: 0,
        };
    }) {
        debug!(
            "combine: slots {} + {} replaced {}, saved {} bytes",
            first, second, worst, saved
        );
    }
}

/// Drops a handful of random entries, then tries to refill the dictionary
/// with 25 rounds of the cheaper operators. Commits all-or-nothing, so a
/// failed jump costs nothing but time.
pub fn optimize_bigjump(datafile: &mut DataFile, size: &mut usize, rng: &mut SmallRng) {
    let mut trial = datafile.clone();
    let dropcount = rng.gen_range(1..=20);

    for _ in 0..dropcount {
        let index = rng.gen_range(0..DataFile::DICT_SIZE);
        let mut entry = trial.dictionary_entry(index).clone();
        entry.replacement.clear();
        entry.score = 0;
        trial.set_dictionary_entry(index, entry);
    }

    let mut newsize = encode_font(&trial).encoded_size();

    for _ in 0..25 {
        optimize_worst(&mut trial, &mut newsize, rng);
        optimize_any(&mut trial, &mut newsize, rng);
        optimize_expand(&mut trial, &mut newsize, rng);
        optimize_refdict(&mut trial, &mut newsize, rng);
        optimize_combine(&mut trial, &mut newsize, rng);
    }

    if newsize < *size {
        debug!(
            "bigjump: dropped {} entries, saved {} bytes",
            dropcount,
            *size - newsize
        );
        *datafile = trial;
        *size = newsize;
    }
}

/// Re-scores every slot by measuring what removing it would cost, against a
/// baseline taken once at the start of the sweep. Entries whose removal
/// would not grow the output are not earning their keep and are cleared.
pub fn update_scores(datafile: &mut DataFile) {
    let oldsize = encode_font(datafile).encoded_size();

    for index in 0..DataFile::DICT_SIZE {
        let mut trial = datafile.clone();
        trial.set_dictionary_entry(index, DictEntry::default());
        let newsize = encode_font(&trial).encoded_size();

        if newsize > oldsize {
            let mut entry = datafile.dictionary_entry(index).clone();
            entry.score = newsize - oldsize;
            datafile.set_dictionary_entry(index, entry);
        } else {
            if !datafile.dictionary_entry(index).replacement.is_empty() {
                debug!(
                    "scores: dropped slot {}, was costing {} bytes",
                    index,
                    oldsize - newsize
                );
            }
            datafile.set_dictionary_entry(index, DictEntry::default());
        }
    }
}

/// Seeds every dictionary slot with a substring sampled from the glyphs.
///
/// A substring is only added once it has been drawn a second time, which
/// cheaply biases the initial dictionary towards patterns that actually
/// recur in the font.
pub fn init_dictionary(datafile: &mut DataFile) {
    let mut rng = SmallRng::seed_from_u64(datafile.seed() as u64);

    let mut seen_substrings: HashSet<BitString> = HashSet::new();
    let mut added_substrings: HashSet<BitString> = HashSet::new();

    let mut index = 0;
    while index < DataFile::DICT_SIZE {
        let substring = random_substring(datafile, &mut rng);

        if !seen_substrings.contains(&substring) {
            seen_substrings.insert(substring);
        } else if !added_substrings.contains(&substring) {
            datafile.set_dictionary_entry(
                index,
                DictEntry {
                    replacement: substring.clone(),
                    ref_encode: false,
                    score: 0,
                },
            );
            added_substrings.insert(substring);
            index += 1;
        }
    }
}

/// Runs `iterations` rounds of the mutation operators over the dictionary,
/// keeping every mutation that strictly shrinks the encoded output.
///
/// Scores are refreshed once on entry. After the loop the RNG's next draw
/// is stored back as the datafile's seed, so consecutive runs continue the
/// same deterministic sequence instead of replaying it.
pub fn optimize(datafile: &mut DataFile, iterations: usize) {
    let mut rng = SmallRng::seed_from_u64(datafile.seed() as u64);

    update_scores(datafile);

    let mut size = encode_font(datafile).encoded_size();

    for _ in 0..iterations {
        optimize_worst(datafile, &mut size, &mut rng);
        optimize_any(datafile, &mut size, &mut rng);
        optimize_expand(datafile, &mut size, &mut rng);
        optimize_trim(datafile, &mut size, &mut rng);
        optimize_refdict(datafile, &mut size, &mut rng);
        optimize_combine(datafile, &mut size, &mut rng);
    }

    datafile.set_seed(rng.gen());
}
