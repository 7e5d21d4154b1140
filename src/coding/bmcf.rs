//! Locates the errors in a received BCH codeword using the Berlekamp-Massey
//! and Chien Search algorithms.
//!
//! # Berlekamp-Massey Algorithm
//!
//! The key observation from Massey's generalization is to view the error
//! locator polynomial σ(x) as the "connection polynomial" of a linear
//! feedback shift register (LFSR) that generates the sequence of syndromes
//! s<sub>1</sub>, ..., s<sub>2t</sub>. The algorithm synthesizes σ(x) when
//! constructing the corresponding unique shortest LFSR that generates those
//! syndromes: at each iteration the current guess is checked against the next
//! syndrome, and on a discrepancy it is corrected with a scaled copy of the
//! guess saved at the previous length change.
//!
//! # Chien Search
//!
//! With σ(x) = σ<sub>0</sub> + σ<sub>1</sub>x + ··· + σ<sub>e</sub>
//! x<sup>e</sup>, let T<sub>i</sub> = [t<sub>0</sub>, ..., t<sub>e</sub>]
//! such that σ(α<sup>i</sup>) = sum(T<sub>i</sub>).
//!
//! Starting with the base case i = 0, let T<sub>0</sub>[k] = σ<sub>k</sub>,
//! and for i > 0, let T<sub>i</sub>[k] = T<sub>i-1</sub>[k]⋅α<sup>k</sup>.
//! Then every candidate root is checked with one field multiply per term.

use crate::coding::galois::GaloisField;

/// Finds the error locator polynomial σ(x) from a sequence of syndromes.
///
/// Coefficients are bit patterns in the decoder's field, degree-0 term first.
pub struct ErrorLocator<'f> {
    field: &'f GaloisField,
    /// Current connection polynomial guess: σ(x).
    sigma: Vec<u32>,
    /// Previous guess, scaled by x at the start of every iteration: B(x).
    saved: Vec<u32>,
    /// Current LFSR length: L.
    len: usize,
}

impl<'f> ErrorLocator<'f> {
    /// Construct a new `ErrorLocator` over the given field, sized for a
    /// sequence of `syndromes` syndromes.
    pub fn new(field: &'f GaloisField, syndromes: usize) -> ErrorLocator<'f> {
        // Initialize σ(x) = 1 and B(x) = 1.
        let mut sigma = vec![0; syndromes + 2];
        sigma[0] = 1;
        let saved = sigma.clone();

        ErrorLocator {
            field,
            sigma,
            saved,
            len: 0,
        }
    }

    /// Construct the error locator polynomial from the given syndromes
    /// s<sub>1</sub>, ..., s<sub>2t</sub>, returning its coefficients up to
    /// the degree term.
    pub fn build(mut self, syndromes: &[u32]) -> Vec<u32> {
        for j in 0..syndromes.len() {
            self.step(j, syndromes);
        }

        let deg = self.sigma.iter().rposition(|&c| c != 0).unwrap_or(0);
        self.sigma.truncate(deg + 1);
        self.sigma
    }

    /// Perform the iterative step for syndrome s<sub>j+1</sub>.
    fn step(&mut self, j: usize, syndromes: &[u32]) {
        let b = self.discrepancy(j, syndromes);

        // B(x) ← x·B(x).
        self.saved.rotate_right(1);
        self.saved[0] = 0;

        if b == 0 {
            return;
        }

        // T(x) = σ(x) + b·B(x).
        let sigma: Vec<u32> = self
            .sigma
            .iter()
            .zip(&self.saved)
            .map(|(&s, &p)| s ^ self.field.mul(b, p))
            .collect();

        if 2 * self.len <= j {
            // The LFSR is too short to generate the sequence so far: save the
            // current guess, normalized by the discrepancy, and lengthen.
            self.saved = self
                .sigma
                .iter()
                .map(|&s| self.field.div(s, b))
                .collect();
            self.len = j + 1 - self.len;
        }

        self.sigma = sigma;
    }

    /// Compute the discrepancy b = s<sub>j+1</sub> + Σ σ<sub>i</sub>
    /// s<sub>j+1-i</sub> between the syndromes and the sequence the current
    /// LFSR generates.
    fn discrepancy(&self, j: usize, syndromes: &[u32]) -> u32 {
        (1..=self.len).fold(syndromes[j], |b, i| {
            b ^ self.field.mul(self.sigma[i], syndromes[j - i])
        })
    }
}

/// Finds the roots of an error locator polynomial σ(x).
///
/// This performs the standard brute force method, evaluating σ(α<sup>i</sup>)
/// for every 0 ≤ i < 2<sup>m</sup> - 1, with the Chien Search optimization.
pub struct PolynomialRoots<'f> {
    field: &'f GaloisField,
    /// Term coefficients [σ<sub>0</sub>, ..., σ<sub>e</sub>], updated so that
    /// σ(α<sup>i</sup>) = sum(terms) for the current power i.
    terms: Vec<u32>,
    /// Current candidate power.
    pow: std::ops::Range<usize>,
}

impl<'f> PolynomialRoots<'f> {
    /// Construct a new `PolynomialRoots` from the given locator coefficients,
    /// degree-0 term first.
    pub fn new(field: &'f GaloisField, sigma: &[u32]) -> PolynomialRoots<'f> {
        PolynomialRoots {
            field,
            terms: sigma.to_vec(),
            pow: 0..field.size(),
        }
    }

    /// Compute σ(α<sup>i</sup>) for the current power i.
    fn eval(&self) -> u32 {
        self.terms.iter().fold(0, |sum, &term| sum ^ term)
    }

    /// Update each term's coefficient to its value at the next power.
    fn update_terms(&mut self) {
        let field = self.field;

        for (pow, term) in self.terms.iter_mut().enumerate() {
            *term = field.mul(*term, field.alpha_pow(pow));
        }
    }
}

/// Iterate over the powers e of all roots α<sup>e</sup> of σ(x).
impl<'f> Iterator for PolynomialRoots<'f> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pow = self.pow.next()?;

            let eval = self.eval();
            self.update_terms();

            if eval == 0 {
                return Some(pow);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Multiply polynomials with coefficients in the given field.
    fn poly_mul(field: &GaloisField, a: &[u32], b: &[u32]) -> Vec<u32> {
        let mut out = vec![0; a.len() + b.len() - 1];

        for (i, &x) in a.iter().enumerate() {
            for (j, &y) in b.iter().enumerate() {
                out[i + j] ^= field.mul(x, y);
            }
        }

        out
    }

    #[test]
    fn test_roots() {
        let f = GaloisField::new(6).unwrap();

        // σ(x) = (1 + α^42 x)(1 + α^13 x)(1 + α^57 x), with roots α^{-42},
        // α^{-13}, and α^{-57}.
        let sigma = poly_mul(
            &f,
            &poly_mul(&f, &[1, f.alpha_pow(42)], &[1, f.alpha_pow(13)]),
            &[1, f.alpha_pow(57)],
        );

        let mut roots: Vec<usize> = PolynomialRoots::new(&f, &sigma).collect();
        roots.sort();
        assert_eq!(roots, vec![6, 21, 50]);

        // A constant polynomial has no roots.
        let roots: Vec<usize> = PolynomialRoots::new(&f, &[1]).collect();
        assert!(roots.is_empty());
    }

    #[test]
    fn test_single_error() {
        let f = GaloisField::new(4).unwrap();

        // Syndromes of a single error at power 3: s_i = α^{3i}.
        let syn: Vec<u32> = (1..=4).map(|i| f.alpha_pow(3 * i)).collect();
        let sigma = ErrorLocator::new(&f, syn.len()).build(&syn);

        assert_eq!(sigma, vec![1, f.alpha_pow(3)]);

        let roots: Vec<usize> = PolynomialRoots::new(&f, &sigma).collect();
        assert_eq!(roots, vec![12]);
    }

    #[test]
    fn test_double_error() {
        let f = GaloisField::new(4).unwrap();

        // Syndromes of errors at powers 0 and 7.
        let syn: Vec<u32> = (1..=4)
            .map(|i| f.alpha_pow(0) ^ f.alpha_pow(7 * i))
            .collect();
        assert_eq!(syn, vec![10, 8, 13, 12]);

        let sigma = ErrorLocator::new(&f, syn.len()).build(&syn);
        assert_eq!(sigma, vec![1, f.alpha_pow(9), f.alpha_pow(7)]);

        let mut roots: Vec<usize> = PolynomialRoots::new(&f, &sigma).collect();
        roots.sort();
        assert_eq!(roots, vec![0, 8]);
    }

    #[test]
    fn test_no_errors() {
        let f = GaloisField::new(4).unwrap();

        let sigma = ErrorLocator::new(&f, 4).build(&[0, 0, 0, 0]);
        assert_eq!(sigma, vec![1]);
    }
}
