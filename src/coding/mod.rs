//! Code design, encoding, and decoding of binary BCH codes.

pub mod bch;
pub mod bmcf;
pub mod galois;
