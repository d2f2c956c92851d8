use anyhow::Result;
use clap::Parser;
use dsi_progress_logger::*;
use glyph_dict_codec::codec::encoder::encode_font;
use glyph_dict_codec::font::{DataFile, FontInfo, GlyphEntry};
use glyph_dict_codec::optimizer::{init_dictionary, optimize};
use glyph_dict_codec::BitString;
use log::info;
use rand::distributions::Distribution;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::Bernoulli;

#[derive(Parser, Debug)]
#[command(about = "Measures dictionary compression on a synthetic bitmap font", long_about = None)]
struct Args {
    /// Number of glyphs in the synthetic font.
    #[clap(short, long, default_value_t = 96)]
    glyphs: usize,

    /// Glyph grid width in pixels.
    #[clap(long, default_value_t = 8)]
    width: usize,

    /// Glyph grid height in pixels.
    #[clap(long, default_value_t = 12)]
    height: usize,

    /// Probability of an inked pixel in the synthetic glyphs.
    #[clap(long, default_value_t = 0.3)]
    ink: f64,

    /// Optimization rounds to run.
    #[clap(short, long, default_value_t = 10)]
    rounds: usize,

    /// Optimizer iterations per round.
    #[clap(short, long, default_value_t = 50)]
    iterations: usize,

    /// Seed for the glyph generator and the optimizer.
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
}

pub fn main() -> Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()
        .unwrap();

    let mut datafile = synthetic_font(&args);
    let raw_bytes = (args.glyphs * args.width * args.height).div_ceil(8);

    info!("Seeding the dictionary...");
    init_dictionary(&mut datafile);

    let size = encode_font(&datafile).encoded_size();
    info!("Seeded size: {} bytes ({} bytes of raw glyph data)", size, raw_bytes);

    let mut pl = ProgressLogger::default();
    pl.item_name("round").expected_updates(Some(args.rounds));
    pl.start("Optimizing...");
    for _ in 0..args.rounds {
        optimize(&mut datafile, args.iterations);
        pl.update();
    }
    pl.done();

    let size = encode_font(&datafile).encoded_size();
    info!(
        "Final size: {} bytes ({:.1}% of raw)",
        size,
        size as f64 * 100.0 / raw_bytes as f64
    );

    Ok(())
}

/// Builds a font of random glyphs with Bernoulli-distributed pixels. Not a
/// stand-in for a real typeface, but repetitive enough for the dictionary
/// to have something to learn.
fn synthetic_font(args: &Args) -> DataFile {
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let pixel = Bernoulli::new(args.ink).unwrap();

    let mut glyphs = Vec::with_capacity(args.glyphs);
    for _ in 0..args.glyphs {
        let mut data = BitString::with_capacity(args.width * args.height);
        for _ in 0..args.width * args.height {
            data.push(pixel.sample(&mut rng));
        }
        glyphs.push(GlyphEntry {
            data,
            width: args.width,
        });
    }

    let mut datafile = DataFile::new(glyphs, Vec::new(), FontInfo::new(args.width, args.height));
    datafile.set_seed(args.seed as u32);
    datafile
}
