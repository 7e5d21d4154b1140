//! Design, encoding, and decoding of binary BCH codes with runtime-chosen
//! parameters.
//!
//! These algorithms are derived from *Coding Theory and Cryptography: The
//! Essentials*, Hankerson, Hoffman, et al, 2000.
//!
//! A code is designed from a desired block length and a channel bit-error
//! probability: the field power m and block length n = 2<sup>m</sup> - 1 are
//! shrunk until the expected number of errors per block fits the code, then
//! the generator polynomial g(x) is built as the least common multiple of the
//! minimal polynomials of α, α<sup>2</sup>, ..., α<sup>2t</sup>. Encoding is
//! systematic polynomial division; decoding runs syndrome computation,
//! Berlekamp-Massey, and Chien Search.

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::bits::BitPoly;
use crate::coding::bmcf::{ErrorLocator, PolynomialRoots};
use crate::coding::galois::{GaloisField, MAX_POWER, MIN_POWER};
use crate::error::{BchError, Result};

/// Persisted form of a code descriptor.
///
/// Round-trips the six fields needed to reconstruct a `BchCode`, with the
/// generator polynomial written as a bit string, most significant coefficient
/// first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeParams {
    /// Codeword length in bits.
    pub n: usize,
    /// Maximum number of correctable errors per block.
    pub t: usize,
    /// Message length in bits.
    pub k: usize,
    /// Channel bit-error probability the code was designed for.
    pub p: f64,
    /// Field power m.
    pub power: usize,
    /// Generator polynomial bits.
    pub generator: String,
}

/// Result of decoding a single received block.
#[derive(Debug)]
pub struct Decoded {
    /// Recovered k-bit message. When `ok` is false this is a best-effort
    /// extraction from the received word.
    pub data: BitPoly,
    /// Whether the decode can be trusted.
    pub ok: bool,
    /// Number of bit errors corrected.
    pub corrected: usize,
}

/// A binary (n, k) BCH code over GF(2<sup>m</sup>) correcting up to t errors
/// per block.
///
/// Immutable once constructed, and safe to share across threads for
/// concurrent per-block encoding and decoding.
pub struct BchCode {
    /// Codeword length: n = 2<sup>m</sup> - 1.
    n: usize,
    /// Message length: k = n - deg(g).
    k: usize,
    /// Error correction capacity.
    t: usize,
    /// Channel bit-error probability, kept for diagnostics and the channel
    /// simulation only.
    p: f64,
    /// Field the code operates over.
    field: GaloisField,
    /// Generator polynomial g(x).
    generator: BitPoly,
    /// Minimal polynomial of the coset containing i, for i in [1, 2t].
    syn_polys: Vec<BitPoly>,
}

impl BchCode {
    /// Design a code for the given desired block length and channel bit-error
    /// probability p ∈ (0, 1).
    ///
    /// The resulting block length is the largest n = 2<sup>m</sup> - 1 that
    /// both fits the desired length and leaves room for at least one message
    /// bit after t = ⌈np⌉ errors worth of parity.
    pub fn design(n_target: usize, p: f64) -> Result<BchCode> {
        if !(p > 0.0 && p < 1.0) {
            return Err(BchError::InvalidParams(format!(
                "error probability {} outside (0, 1)",
                p
            )));
        }

        if n_target < 3 {
            return Err(BchError::InvalidParams(format!(
                "block length {} shorter than minimum 3",
                n_target
            )));
        }

        let mut power = (n_target + 1).ilog2() as usize;

        if power > MAX_POWER {
            return Err(BchError::InvalidParams(format!(
                "block length {} exceeds maximum {}",
                n_target,
                (1usize << MAX_POWER) - 1
            )));
        }

        let mut n = (1 << power) - 1;

        // Shrink until the expected error count leaves room for the parity
        // bits of t errors plus at least one message bit.
        while n as f64 * p > (power - 1) as f64 {
            power -= 1;

            if power < MIN_POWER {
                return Err(BchError::InvalidParams(format!(
                    "no block length can carry error probability {}",
                    p
                )));
            }

            n = (1 << power) - 1;
        }

        let t = (n as f64 * p).ceil() as usize;
        let field = GaloisField::new(power)?;
        let (generator, syn_polys) = build_generator(&field, t);
        let k = n - generator.degree().expect("generator is zero");

        info!("designed ({}, {}) code with t = {} over GF(2^{})", n, k, t, power);

        Ok(BchCode {
            n,
            k,
            t,
            p,
            field,
            generator,
            syn_polys,
        })
    }

    /// Reconstruct a code from a persisted descriptor, validating its
    /// consistency.
    pub fn from_params(params: &CodeParams) -> Result<BchCode> {
        let field = GaloisField::new(params.power)
            .map_err(|e| BchError::BadDescriptor(e.to_string()))?;

        let n = field.size();

        if params.n != n {
            return Err(BchError::BadDescriptor(format!(
                "block length {} does not match GF(2^{})",
                params.n, params.power
            )));
        }

        if params.t < 1 || 2 * params.t >= n {
            return Err(BchError::BadDescriptor(format!(
                "t = {} outside [1, {}]",
                params.t,
                (n - 1) / 2
            )));
        }

        if !(params.p > 0.0 && params.p < 1.0) {
            return Err(BchError::BadDescriptor(format!(
                "error probability {} outside (0, 1)",
                params.p
            )));
        }

        let generator = BitPoly::from_binary_str(&params.generator)
            .map_err(|e| BchError::BadDescriptor(e.to_string()))?;

        let deg = match generator.degree() {
            Some(deg) if deg < n => deg,
            _ => {
                return Err(BchError::BadDescriptor(
                    "generator degree out of range".to_string(),
                ))
            }
        };

        if params.k != n - deg {
            return Err(BchError::BadDescriptor(format!(
                "k = {} inconsistent with generator degree {}",
                params.k, deg
            )));
        }

        let (_, syn_polys) = build_generator(&field, params.t);

        Ok(BchCode {
            n,
            k: params.k,
            t: params.t,
            p: params.p,
            field,
            generator,
            syn_polys,
        })
    }

    /// Produce the persisted form of this code.
    pub fn params(&self) -> CodeParams {
        CodeParams {
            n: self.n,
            t: self.t,
            k: self.k,
            p: self.p,
            power: self.field.power(),
            generator: self.generator.to_string(),
        }
    }

    /// Codeword length in bits.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Message length in bits.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Maximum number of correctable errors per block.
    pub fn t(&self) -> usize {
        self.t
    }

    /// Channel bit-error probability the code was designed for.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Systematically encode the given k-bit message into an n-bit codeword.
    ///
    /// The top k bits of the codeword reproduce the message and the low
    /// n - k bits hold the parity, making the whole word divisible by g(x).
    pub fn encode_block(&self, data: &BitPoly) -> Result<BitPoly> {
        if let Some(deg) = data.degree() {
            if deg >= self.k {
                return Err(BchError::BlockLength {
                    expected: self.k,
                    found: deg + 1,
                });
            }
        }

        let mut word = data << (self.n - self.k);
        let parity = &word % &self.generator;
        word += &parity;

        debug_assert!((&word % &self.generator).is_zero());

        Ok(word)
    }

    /// Try to decode the given n-bit received word to the nearest codeword,
    /// correcting up to t bit errors.
    ///
    /// The k-bit message is always returned; the `ok` flag is false when the
    /// word cannot be trusted, either because the error locator polynomial
    /// names more errors than the code can carry, because its roots are
    /// incomplete, or because the corrected word still fails the generator
    /// divisibility check.
    pub fn decode_block(&self, word: &BitPoly) -> Result<Decoded> {
        if let Some(deg) = word.degree() {
            if deg >= self.n {
                return Err(BchError::BlockLength {
                    expected: self.n,
                    found: deg + 1,
                });
            }
        }

        let syndromes = self.syndromes(word);

        if syndromes.iter().all(|&s| s == 0) {
            return Ok(Decoded {
                data: word >> (self.n - self.k),
                ok: true,
                corrected: 0,
            });
        }

        let sigma = ErrorLocator::new(&self.field, syndromes.len()).build(&syndromes);
        let errors = sigma.len() - 1;

        // A locator of degree beyond t names more errors than the code can
        // correct.
        if errors > self.t {
            debug!("locator degree {} exceeds t = {}", errors, self.t);
            return Ok(self.give_up(word));
        }

        // If fewer roots are found than deg(σ), the roots are invalid and the
        // codeword is unrecoverable.
        let roots: Vec<usize> = PolynomialRoots::new(&self.field, &sigma).collect();

        if roots.len() != errors {
            debug!("found {} roots for locator degree {}", roots.len(), errors);
            return Ok(self.give_up(word));
        }

        // A root α^e locates the error at the x^{(q - e) mod q} coefficient.
        let mut fixed = word.clone();
        let q = self.field.size();

        for &e in &roots {
            fixed.flip_bit((q - e) % q);
        }

        let ok = (&fixed % &self.generator).is_zero();

        Ok(Decoded {
            data: &fixed >> (self.n - self.k),
            ok,
            corrected: errors,
        })
    }

    /// Give up on a received word, returning its message bits unchanged.
    fn give_up(&self, word: &BitPoly) -> Decoded {
        Decoded {
            data: word >> (self.n - self.k),
            ok: false,
            corrected: 0,
        }
    }

    /// Compute the syndromes s<sub>i</sub> = r(α<sup>i</sup>), i in [1, 2t],
    /// of the given received word.
    ///
    /// Each syndrome reduces r(x) modulo the minimal polynomial of α<sup>i</sup>,
    /// carries the remainder through x → x<sup>i</sup>, and reduces modulo
    /// the field's primitive polynomial to an m-bit pattern.
    fn syndromes(&self, word: &BitPoly) -> Vec<u32> {
        self.syn_polys
            .iter()
            .enumerate()
            .map(|(i, min_poly)| {
                let reduced = word % min_poly;
                let raised = reduced.raise(i + 1);

                (&raised % self.field.primitive()).low64() as u32
            })
            .collect()
    }
}

/// Build the generator polynomial g(x) as the lcm of the minimal polynomials
/// of α, α<sup>2</sup>, ..., α<sup>2t</sup>: each distinct coset contributes
/// its minimal polynomial exactly once. Also returns the per-syndrome minimal
/// polynomials for i in [1, 2t].
fn build_generator(field: &GaloisField, t: usize) -> (BitPoly, Vec<BitPoly>) {
    let mut by_coset: HashMap<usize, BitPoly> = HashMap::new();
    let mut generator = BitPoly::one();
    let mut syn_polys = Vec::with_capacity(2 * t);

    for i in 1..=2 * t {
        let idx = field.coset_index(i);

        if !by_coset.contains_key(&idx) {
            let poly = field.minimal_polynomial(field.coset_containing(i));
            generator = &generator * &poly;
            by_coset.insert(idx, poly);
        }

        syn_polys.push(by_coset[&idx].clone());
    }

    (generator, syn_polys)
}
