//! Command line front end for the BCH codec: designs codes, encodes messages
//! through a simulated noisy channel, and decodes them back.

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use rand::Rng;

use bch::bits::{self, BitPoly};
use bch::coding::bch::{BchCode, CodeParams};

#[derive(Parser)]
#[command(name = "bch", about = "Bose-Chaudhuri-Hocquenghem codes", version)]
struct Args {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Generate a BCH code with the given parameters.
    Generate {
        /// Desired maximum length of a message block transmitted through the
        /// communication channel.
        #[arg(short)]
        n: usize,
        /// Probability of a bit error in the communication channel.
        #[arg(short)]
        p: f64,
        /// File to write the code descriptor to.
        #[arg(short, default_value = "code.data")]
        out: PathBuf,
    },
    /// Encode a message from stdin, with channel errors injected.
    Encode {
        /// File with the code descriptor.
        #[arg(short)]
        input: PathBuf,
        /// File to write the encoded blocks to.
        #[arg(short, default_value = "encoded.data")]
        out: PathBuf,
    },
    /// Find errors in an encoded stream and decode the message.
    Decode {
        /// File with the code descriptor.
        #[arg(short)]
        input: PathBuf,
        /// File with the encoded '0'/'1' stream.
        #[arg(short)]
        message: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Args::parse().mode {
        Mode::Generate { n, p, out } => generate(n, p, &out),
        Mode::Encode { input, out } => encode(&input, &out),
        Mode::Decode { input, message } => decode(&input, &message),
    }
}

/// Load a code descriptor from the given file.
fn load_code(path: &Path) -> Result<BchCode> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading descriptor {}", path.display()))?;
    let params: CodeParams = serde_json::from_str(&text)
        .with_context(|| format!("parsing descriptor {}", path.display()))?;

    Ok(BchCode::from_params(&params)?)
}

fn generate(n: usize, p: f64, out: &Path) -> Result<()> {
    let code = BchCode::design(n, p)?;

    let json = serde_json::to_string_pretty(&code.params())?;
    fs::write(out, json).with_context(|| format!("writing descriptor {}", out.display()))?;

    println!(
        "({}, {}) code with t = {} written to {}",
        code.n(),
        code.k(),
        code.t(),
        out.display()
    );

    Ok(())
}

fn encode(input: &Path, out: &Path) -> Result<()> {
    let code = load_code(input)?;

    println!("Input the message for encoding:");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let mut message = bits::bits_of_bytes(line.trim_end_matches(&['\r', '\n'][..]).as_bytes());

    // Pad with zeros up to a whole number of blocks.
    while message.len() % code.k() != 0 {
        message.push(false);
    }

    let mut rng = rand::thread_rng();
    let mut stream = String::with_capacity(message.len() / code.k() * code.n());

    for block in message.chunks(code.k()) {
        let word = code.encode_block(&BitPoly::from_msb_bits(block))?;
        let noisy = channel(&word, code.n(), code.p(), &mut rng);

        debug!("encoded {} -> {}", BitPoly::from_msb_bits(block), noisy);

        stream.extend(noisy.iter_msb(code.n()).map(|bit| if bit { '1' } else { '0' }));
    }

    fs::write(out, stream).with_context(|| format!("writing stream {}", out.display()))?;

    Ok(())
}

/// Flip each bit of the codeword independently with probability p.
fn channel(word: &BitPoly, n: usize, p: f64, rng: &mut impl Rng) -> BitPoly {
    let mut noisy = word.clone();

    for i in 0..n {
        if rng.gen_bool(p) {
            noisy.flip_bit(i);
        }
    }

    noisy
}

fn decode(input: &Path, message: &Path) -> Result<()> {
    let code = load_code(input)?;

    let stream = fs::read_to_string(message)
        .with_context(|| format!("reading stream {}", message.display()))?;
    let stream = stream.trim();

    if stream.len() % code.n() != 0 {
        warn!(
            "stream length {} is not a multiple of n = {}, ignoring the tail",
            stream.len(),
            code.n()
        );
    }

    let mut decoded = Vec::with_capacity(stream.len() / code.n() * code.k());

    for chunk in stream.as_bytes().chunks_exact(code.n()) {
        let word = BitPoly::from_binary_str(std::str::from_utf8(chunk)?)?;
        let block = code.decode_block(&word)?;

        if !block.ok {
            warn!("block decode failed, passing it through uncorrected");
        }

        debug!("decoded {} -> {}", word, block.data);

        decoded.extend(block.data.iter_msb(code.k()));
    }

    let text = bits::bytes_of_bits(&decoded);
    println!("{}", String::from_utf8_lossy(&text));

    Ok(())
}
