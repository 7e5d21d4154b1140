//! Encoding and decoding of binary BCH (Bose-Chaudhuri-Hocquenghem)
//! error-correcting codes.
//!
//! A code is designed from a desired block length and a channel bit-error
//! probability, producing an (n, k) code over GF(2<sup>m</sup>) that corrects
//! up to t bit errors per block:
//!
//! ```text
//! (length, probability) → BchCode → g(x)
//! message → encode_block → codeword → (channel) → decode_block → message
//! ```
//!
//! The [`coding::bch`] module holds the code designer, encoder, and decoder;
//! [`coding::galois`] the underlying finite field construction; and
//! [`coding::bmcf`] the Berlekamp-Massey and Chien Search steps of the
//! decoder. Codes round-trip through a serialized descriptor so the encode
//! and decode sides can share parameters.

pub mod bits;
pub mod coding;
pub mod error;
