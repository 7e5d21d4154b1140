//! Galois field arithmetic over GF(2<sup>m</sup>) with a runtime-selected
//! power m.
//!
//! A field is characterized by a fixed primitive polynomial for each
//! supported m. Construction builds the exponent table mapping each power i
//! to the bit pattern of α<sup>i</sup> reduced modulo the primitive
//! polynomial, its inverse logarithm table, and the cyclotomic cosets of 2
//! modulo 2<sup>m</sup> - 1. Elements are passed around as their m-bit
//! patterns, with the zero element (which has no logarithm) carried as the
//! pattern 0 and surfaced as `None` wherever a logarithm is taken.

use itertools::Itertools;

use crate::bits::BitPoly;
use crate::error::{BchError, Result};

/// Smallest supported field power.
pub const MIN_POWER: usize = 2;
/// Largest field power with an entry in the primitive polynomial table.
pub const MAX_POWER: usize = 20;

/// Primitive polynomial used to construct GF(2<sup>m</sup>), with bit i
/// holding the coefficient of x<sup>i</sup>.
fn primitive_polynomial(power: usize) -> Option<u32> {
    Some(match power {
        2 => 0b111,
        3 => 0b1011,
        4 => 0b10011,
        5 => 0b100101,
        6 => 0b1000011,
        7 => 0b10001001,
        8 => 0b100011101,
        9 => 0b1000010001,
        10 => 0b10000001001,
        11 => 0b100000000101,
        12 => 0b1000001010011,
        13 => 0b10000000011011,
        14 => 0b100010001000011,
        15 => 0b1000000000000011,
        16 => 0b10001000000001011,
        17 => 0b100000000000001001,
        18 => 0b1000000000010000001,
        19 => 0b10000000000000100111,
        20 => 0b100000000000000001001,
        _ => return None,
    })
}

/// A GF(2<sup>m</sup>) Galois field, immutable once constructed.
pub struct GaloisField {
    /// Field power m.
    power: usize,
    /// Order of the multiplicative group: q = 2<sup>m</sup> - 1.
    size: usize,
    /// Primitive polynomial the field is reduced by.
    prim: BitPoly,
    /// Bit pattern of α<sup>i</sup> for each i in [0, q).
    exp: Vec<u32>,
    /// Power i for each nonzero pattern; index 0 is unused.
    log: Vec<u32>,
    /// Cyclotomic cosets of 2 mod q, in discovery order starting with {0}.
    cosets: Vec<Vec<usize>>,
    /// Index into `cosets` of the coset containing each residue.
    coset_map: Vec<usize>,
}

impl GaloisField {
    /// Construct the field GF(2<sup>power</sup>) for a power in
    /// [`MIN_POWER`, `MAX_POWER`].
    pub fn new(power: usize) -> Result<GaloisField> {
        let prim_bits = primitive_polynomial(power).ok_or_else(|| {
            BchError::InvalidParams(format!(
                "field power {} outside [{}, {}]",
                power, MIN_POWER, MAX_POWER
            ))
        })?;

        let size = (1 << power) - 1;

        // Build α^i by repeatedly multiplying by x and reducing: shift up,
        // and if bit m became set, XOR the primitive polynomial back in.
        let mut exp = vec![0; size];
        let mut log = vec![0; size + 1];
        let mut pattern: u32 = 1;

        for (i, slot) in exp.iter_mut().enumerate() {
            *slot = pattern;
            log[pattern as usize] = i as u32;

            pattern <<= 1;

            if pattern >> power & 1 == 1 {
                pattern ^= prim_bits;
            }
        }

        // α^q must wrap back around to α^0 = 1.
        debug_assert_eq!(pattern, 1, "exponent table failed to close");

        let mut cosets: Vec<Vec<usize>> = Vec::new();
        let mut coset_map = vec![usize::MAX; size];

        for i in 0..size {
            if coset_map[i] != usize::MAX {
                continue;
            }

            let idx = cosets.len();
            let mut coset = vec![i];
            coset_map[i] = idx;

            let mut next = i * 2 % size;

            while next != i {
                coset_map[next] = idx;
                coset.push(next);
                next = next * 2 % size;
            }

            cosets.push(coset);
        }

        Ok(GaloisField {
            power,
            size,
            prim: BitPoly::from_int(prim_bits as u64),
            exp,
            log,
            cosets,
            coset_map,
        })
    }

    /// Field power m.
    pub fn power(&self) -> usize {
        self.power
    }

    /// Number of nonzero elements: q = 2<sup>m</sup> - 1.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The primitive polynomial the field is reduced by.
    pub fn primitive(&self) -> &BitPoly {
        &self.prim
    }

    /// Bit pattern of α<sup>i</sup>, with the power taken modulo q.
    pub fn alpha_pow(&self, pow: usize) -> u32 {
        self.exp[pow % self.size]
    }

    /// Power i of the given pattern α<sup>i</sup>, or `None` for the zero
    /// element.
    pub fn log(&self, pattern: u32) -> Option<usize> {
        if pattern == 0 {
            None
        } else {
            Some(self.log[pattern as usize] as usize)
        }
    }

    /// Multiply two elements.
    pub fn mul(&self, a: u32, b: u32) -> u32 {
        match (self.log(a), self.log(b)) {
            (Some(i), Some(j)) => self.exp[(i + j) % self.size],
            _ => 0,
        }
    }

    /// Divide two elements. Panic if the divisor is zero.
    pub fn div(&self, a: u32, b: u32) -> u32 {
        match (self.log(a), self.log(b)) {
            // Ensure a non-negative power.
            (Some(i), Some(j)) => self.exp[(self.size + i - j) % self.size],
            (None, Some(_)) => 0,
            (_, None) => panic!("divide by zero"),
        }
    }

    /// The cyclotomic cosets of 2 mod q, in discovery order.
    pub fn cosets(&self) -> &[Vec<usize>] {
        &self.cosets
    }

    /// Index of the coset containing the given residue.
    pub fn coset_index(&self, i: usize) -> usize {
        self.coset_map[i % self.size]
    }

    /// The coset containing the given residue.
    pub fn coset_containing(&self, i: usize) -> &[usize] {
        &self.cosets[self.coset_index(i)]
    }

    /// Evaluate a polynomial over GF(2) at α<sup>e</sup>.
    pub fn eval_at_alpha(&self, poly: &BitPoly, e: usize) -> u32 {
        poly.ones().fold(0, |sum, i| sum ^ self.alpha_pow(i * e))
    }

    /// Compute the minimal polynomial over GF(2) of the given coset -- the
    /// monic polynomial whose roots are exactly { α<sup>c</sup> : c ∈ C }.
    ///
    /// The coefficients follow from Vieta's formulas: the coefficient of
    /// x<sup>|C|-k</sup> is the sum over all k-subsets S of C of
    /// α<sup>ΣS</sup>. Each such sum lands on 0 or 1 because the coset is
    /// closed under squaring.
    pub fn minimal_polynomial(&self, coset: &[usize]) -> BitPoly {
        let deg = coset.len();
        let mut poly = BitPoly::unit(deg);

        for k in 1..=deg {
            let mut coef = 0;

            for combo in coset.iter().copied().combinations(k) {
                let sum: usize = combo.iter().sum();
                coef ^= self.exp[sum % self.size];
            }

            debug_assert!(coef <= 1, "coset not closed under squaring");

            if coef == 1 {
                poly.set_bit(deg - k);
            }
        }

        poly
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exp_log_inversion() {
        for power in MIN_POWER..=10 {
            let f = GaloisField::new(power).unwrap();

            for i in 0..f.size() {
                assert_eq!(f.log(f.alpha_pow(i)), Some(i));
            }

            for pattern in 1..1u32 << power {
                assert_eq!(f.alpha_pow(f.log(pattern).unwrap()), pattern);
            }

            assert_eq!(f.log(0), None);
            assert_eq!(f.alpha_pow(f.size()), 1);
        }
    }

    #[test]
    fn test_bad_power() {
        assert!(GaloisField::new(1).is_err());
        assert!(GaloisField::new(21).is_err());
    }

    #[test]
    fn test_exp_table() {
        let f = GaloisField::new(4).unwrap();
        let expect = [1, 2, 4, 8, 3, 6, 12, 11, 5, 10, 7, 14, 15, 13, 9];

        for (i, &pattern) in expect.iter().enumerate() {
            assert_eq!(f.alpha_pow(i), pattern);
        }
    }

    #[test]
    fn test_arith() {
        let f = GaloisField::new(4).unwrap();

        assert_eq!(f.mul(f.alpha_pow(3), f.alpha_pow(5)), f.alpha_pow(8));
        assert_eq!(f.mul(f.alpha_pow(10), f.alpha_pow(10)), f.alpha_pow(5));
        assert_eq!(f.mul(0, f.alpha_pow(7)), 0);
        assert_eq!(f.mul(f.alpha_pow(7), 0), 0);

        assert_eq!(f.div(f.alpha_pow(8), f.alpha_pow(5)), f.alpha_pow(3));
        assert_eq!(f.div(f.alpha_pow(2), f.alpha_pow(9)), f.alpha_pow(8));
        assert_eq!(f.div(0, f.alpha_pow(4)), 0);
    }

    #[test]
    #[should_panic]
    fn test_div_zero() {
        let f = GaloisField::new(4).unwrap();
        f.div(f.alpha_pow(2), 0);
    }

    #[test]
    fn test_primitive_root() {
        // α is a root of the primitive polynomial in every supported field.
        for power in MIN_POWER..=MAX_POWER {
            let f = GaloisField::new(power).unwrap();
            assert_eq!(f.eval_at_alpha(f.primitive(), 1), 0);
        }
    }

    #[test]
    fn test_cosets() {
        let f = GaloisField::new(4).unwrap();

        let expect: &[&[usize]] = &[
            &[0],
            &[1, 2, 4, 8],
            &[3, 6, 12, 9],
            &[5, 10],
            &[7, 14, 13, 11],
        ];
        assert_eq!(f.cosets().len(), expect.len());

        for (coset, &want) in f.cosets().iter().zip(expect) {
            assert_eq!(&coset[..], want);
        }

        assert_eq!(f.coset_index(6), 2);
        assert_eq!(f.coset_containing(10), &[5, 10]);
    }

    #[test]
    fn test_coset_partition() {
        for power in [5, 6, 8] {
            let f = GaloisField::new(power).unwrap();
            let mut seen = vec![false; f.size()];

            for coset in f.cosets() {
                for &i in coset {
                    // Disjointness and closure under doubling.
                    assert!(!seen[i]);
                    seen[i] = true;
                    assert_eq!(f.coset_index(i * 2 % f.size()), f.coset_index(i));
                }
            }

            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn test_minimal_polynomial() {
        let f = GaloisField::new(4).unwrap();

        assert_eq!(
            f.minimal_polynomial(f.coset_containing(1)),
            BitPoly::from_int(0b10011)
        );
        assert_eq!(
            f.minimal_polynomial(f.coset_containing(3)),
            BitPoly::from_int(0b11111)
        );
        assert_eq!(
            f.minimal_polynomial(f.coset_containing(5)),
            BitPoly::from_int(0b111)
        );
        assert_eq!(
            f.minimal_polynomial(f.coset_containing(7)),
            BitPoly::from_int(0b11001)
        );
        assert_eq!(
            f.minimal_polynomial(f.coset_containing(0)),
            BitPoly::from_int(0b11)
        );

        // The minimal polynomial of the coset of 1 is the primitive
        // polynomial itself.
        let f = GaloisField::new(6).unwrap();
        assert_eq!(f.minimal_polynomial(f.coset_containing(1)), f.prim);
    }

    #[test]
    fn test_minimal_polynomial_roots() {
        for power in [4, 5, 6] {
            let f = GaloisField::new(power).unwrap();

            for coset in f.cosets() {
                let poly = f.minimal_polynomial(coset);
                assert_eq!(poly.degree(), Some(coset.len()));

                for &c in coset {
                    assert_eq!(f.eval_at_alpha(&poly, c), 0);
                }
            }
        }
    }
}
