//! Encoding and decoding of the Reed Solomon codes that protect the codeword blocks
//! of the 2-D barcode symbologies (QR Code, Data Matrix, Aztec.)
//!
//! These algorithms are sourced from *Coding Theory and Cryptography: The Essentials*,
//! Hankerson, Hoffman, et al, 2000.

use collect_slice::CollectSlice;
use log::{debug, trace};

use crate::error::{ReedSolomonError, Result};
use crate::euclid::{error_locators, error_magnitudes, KeyEquation};
use crate::galois::{Codeword, GaloisField, Polynomial};

/// Try to correct any errors in the given received word, where the final `two_s`
/// symbols are parity.
///
/// The word is interpreted with its first symbol as the highest-order coefficient of
/// the received polynomial. Up to `two_s / 2` erroneous symbols can be corrected.
///
/// On success, return `Ok(n)`, where `n` is the number of corrected symbols, with the
/// corrections applied in place. Otherwise, return an error to indicate an
/// unrecoverable word, leaving the word untouched.
///
/// Words longer than 255 symbols exceed the capacity of the field, and decoding them
/// gives meaningless results.
pub fn decode<F: GaloisField>(word: &mut [u8], two_s: usize) -> Result<usize> {
    if two_s > word.len() {
        return Err(ReedSolomonError::TooManyParitySymbols);
    }

    // In a received word, the first symbol maps to the highest degree.
    let poly = Polynomial::<F>::new(word.iter().rev().map(|&bits| Codeword::new(bits)));

    let syndromes = Polynomial::new(
        (0..two_s).map(|pow| poly.eval(Codeword::for_power(pow)))
    );

    if syndromes.is_zero() {
        trace!("syndromes clean, nothing to correct");
        return Ok(0);
    }

    let (sigma, omega) = KeyEquation::new(syndromes, two_s).solve()?;

    let locators = error_locators(&sigma)?;
    let magnitudes = error_magnitudes(&omega, &locators);

    // Defer the writes until every location is validated, so a failed decode leaves
    // the word untouched.
    let mut fixes = Vec::with_capacity(locators.len());

    for (&loc, &mag) in locators.iter().zip(magnitudes.iter()) {
        // Locators are inverted roots of σ, which are never zero.
        let pow = loc.power().expect("invalid error locator");

        if pow >= word.len() {
            return Err(ReedSolomonError::BadErrorLocation);
        }

        fixes.push((word.len() - 1 - pow, mag));
    }

    for (pos, mag) in fixes {
        word[pos] ^= mag.bits();
    }

    debug!("corrected {} symbols", locators.len());

    Ok(locators.len())
}

/// Calculate the `two_s` parity symbols for the leading data symbols in the given
/// buffer, placing the parity symbols at the end of the buffer.
///
/// Panic if the buffer holds fewer than `two_s` symbols.
pub fn encode<F: GaloisField>(word: &mut [u8], two_s: usize) {
    assert!(two_s <= word.len(), "more parity symbols than codewords");

    if two_s == 0 {
        return;
    }

    let data_len = word.len() - two_s;

    // g(x) = (x + α^0)(x + α^1) ··· (x + α^{2s-1}), whose roots are the syndrome
    // evaluation points.
    let gen = (0..two_s).fold(Polynomial::<F>::one(), |gen, pow| {
        &gen * &Polynomial::new([Codeword::for_power(pow), Codeword::for_power(0)])
    });

    let info = Polynomial::<F>::new(word[..data_len].iter().rev().map(|&bits| Codeword::new(bits)))
        .mul_monomial(two_s, Codeword::for_power(0));

    let (_, remainder) = info.div_rem(&gen);

    (0..two_s)
        .map(|i| remainder.coef(two_s - 1 - i).bits())
        .collect_slice_checked(&mut word[data_len..]);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::galois::{DataMatrixField, QrCodeField};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_decode_clean() {
        let mut word = [0; 5];

        assert_eq!(decode::<QrCodeField>(&mut word, 4), Ok(0));
        assert_eq!(word, [0; 5]);

        let mut word = [0x12, 0x34, 0x56, 0x78, 0, 0, 0, 0];
        encode::<QrCodeField>(&mut word, 4);
        let clean = word;

        assert_eq!(decode::<QrCodeField>(&mut word, 4), Ok(0));
        assert_eq!(word, clean);
    }

    #[test]
    fn test_decode_single_error() {
        let mut word = [0; 5];
        word[3] = 0x07;

        assert_eq!(decode::<QrCodeField>(&mut word, 4), Ok(1));
        assert_eq!(word, [0; 5]);

        let mut word = [0x12, 0x34, 0x56, 0, 0, 0, 0];
        encode::<QrCodeField>(&mut word, 4);
        let clean = word;
        word[1] ^= 0x55;

        assert_eq!(decode::<QrCodeField>(&mut word, 4), Ok(1));
        assert_eq!(word, clean);
    }

    #[test]
    fn test_decode_two_errors() {
        let mut word = [0; 5];
        word[2] = 0x0A;
        word[4] = 0x33;

        assert_eq!(decode::<QrCodeField>(&mut word, 4), Ok(2));
        assert_eq!(word, [0; 5]);
    }

    #[test]
    fn test_decode_beyond_capacity() {
        let mut word = [0; 7];
        word[0] = 1;
        word[1] = 2;
        word[2] = 3;

        // Three errors exceed the correction capacity of two parity pairs: the decoder
        // either reports an unrecoverable word or settles on some other valid word.
        match decode::<QrCodeField>(&mut word, 4) {
            Err(_) => {
                assert_eq!(word, [1, 2, 3, 0, 0, 0, 0]);
            }
            Ok(_) => {
                assert_ne!(word, [0; 7]);

                let mut again = word;
                assert_eq!(decode::<QrCodeField>(&mut again, 4), Ok(0));
                assert_eq!(again, word);
            }
        }
    }

    #[test]
    fn test_decode_determinism() {
        let orig = [0xDE, 0xAD, 0xBE, 0xEF, 0, 0, 0, 0, 0];

        let mut first = orig;
        let mut second = orig;

        assert_eq!(
            decode::<QrCodeField>(&mut first, 4),
            decode::<QrCodeField>(&mut second, 4)
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_trivial() {
        let mut word: [u8; 0] = [];

        assert_eq!(decode::<QrCodeField>(&mut word, 0), Ok(0));

        let mut word = [5, 6];

        assert_eq!(decode::<QrCodeField>(&mut word, 0), Ok(0));
        assert_eq!(word, [5, 6]);
    }

    #[test]
    fn test_decode_parity_overflow() {
        let mut word = [0; 3];

        assert_eq!(
            decode::<QrCodeField>(&mut word, 4),
            Err(ReedSolomonError::TooManyParitySymbols)
        );
    }

    #[test]
    fn test_encode() {
        // m(x) = 1 against g(x) = x + 1.
        let mut word = [1, 0];
        encode::<QrCodeField>(&mut word, 1);

        assert_eq!(word, [1, 1]);

        // m(x) = 2 against g(x) = (x + 1)(x + 2) = x^2 + 3x + 2.
        let mut word = [2, 0, 0];
        encode::<QrCodeField>(&mut word, 2);

        assert_eq!(word, [2, 6, 4]);

        let mut word = [0; 26];
        word[..4].copy_from_slice(&[0x40, 0xD2, 0x75, 0x47]);
        encode::<QrCodeField>(&mut word, 22);
        let clean = word;

        assert_eq!(decode::<QrCodeField>(&mut word, 22), Ok(0));
        assert_eq!(word, clean);
    }

    #[test]
    fn test_data_matrix_field() {
        let mut word = [0; 12];
        word[..7].copy_from_slice(&[142, 164, 186, 114, 25, 5, 88]);
        encode::<DataMatrixField>(&mut word, 5);
        let clean = word;

        word[0] ^= 0xFF;
        word[9] ^= 0x10;

        assert_eq!(decode::<DataMatrixField>(&mut word, 5), Ok(2));
        assert_eq!(word, clean);
    }

    #[test]
    fn test_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x5EED);

        for _ in 0..1000 {
            let mut word = [0; 255];
            rng.fill(&mut word[..223]);
            encode::<QrCodeField>(&mut word, 32);
            let clean = word;

            let errors = rng.gen_range(0..=16);
            let mut positions: Vec<usize> = Vec::with_capacity(errors);

            while positions.len() < errors {
                let pos = rng.gen_range(0..word.len());

                if !positions.contains(&pos) {
                    positions.push(pos);
                }
            }

            for &pos in &positions {
                word[pos] ^= rng.gen_range(1..=255u8);
            }

            assert_eq!(decode::<QrCodeField>(&mut word, 32), Ok(errors));
            assert_eq!(word[..], clean[..]);
        }
    }
}
