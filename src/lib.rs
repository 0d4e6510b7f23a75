//! Reed-Solomon error correction over GF(2<sup>8</sup>) for the 2-D barcode
//! symbologies (QR Code, Data Matrix, Aztec.)

pub mod error;
pub mod euclid;
pub mod galois;
pub mod reed_solomon;
