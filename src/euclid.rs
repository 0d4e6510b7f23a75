//! Decodes Reed Solomon codewords using the extended Euclidean algorithm, Chien
//! Search, and Forney's formula.
//!
//! # Decoding Procedure
//!
//! The standard procedure for syndrome-based Reed Solomon error correction has the
//! following steps:
//!
//! 1. Generate the syndrome polynomial s(x) = s<sub>0</sub> + s<sub>1</sub>x + ··· +
//!    s<sub>2t-1</sub>x<sup>2t-1</sup>, where s<sub>i</sub> = r(α<sup>i</sup>) using
//!    the received word polynomial r(x).
//! 2. Use s(x) to build the error locator polynomial σ(x) = (1 + X<sub>1</sub>x) ···
//!    (1 + X<sub>e</sub>x) and error evaluator polynomial ω(x), where deg(σ(x)) = e ≤
//!    t is the number of detected errors.
//! 3. Find the roots X<sub>1</sub><sup>-1</sup>, ..., X<sub>E</sub><sup>-1</sup> of
//!    σ(x). Then for each, if X<sub>i</sub> = α<sup>m<sub>i</sub></sup>, the error
//!    location within the received word is derived from the power m<sub>i</sub>.
//! 4. Verify that e = E.
//! 5. Compute each error pattern Y<sub>i</sub> = ω(X<sub>i</sub><sup>-1</sup>) /
//!    Π<sub>j≠i</sub>(1 + X<sub>j</sub>X<sub>i</sub><sup>-1</sup>).
//! 6. For each (m<sub>i</sub>, Y<sub>i</sub>) pair, correct the symbol at location
//!    m<sub>i</sub> using the bit pattern Y<sub>i</sub>.
//!
//! This module implements steps 2 through 5.
//!
//! # Extended Euclidean Algorithm
//!
//! Solutions of the key equation σ(x)s(x) ≡ ω(x) (mod x<sup>2t</sup>), with deg(ω) <
//! deg(σ) ≤ t, are exactly the polynomial pairs produced by running the extended
//! Euclidean algorithm on x<sup>2t</sup> and s(x) and stopping at the first remainder
//! with degree less than t: the remainder is ω(x) up to a scalar, and its auxiliary
//! multiplier is σ(x) up to the same scalar. Both are normalized by σ̃(0)<sup>-1</sup>
//! so that σ(0) = 1.
//!
//! # Chien Search
//!
//! With σ(x) = σ<sub>0</sub> + σ<sub>1</sub>x + σ<sub>2</sub>x<sup>2</sup> + ··· +
//! σ<sub>e</sub>x<sup>e</sup>, let P<sub>i</sub> = [p<sub>0</sub>, ..., p<sub>e</sub>]
//! with P<sub>0</sub>[k] = σ<sub>k</sub>, so that σ(α<sup>0</sup>) = sum(P<sub>0</sub>).
//! Then for i > 0, let P<sub>i</sub>[k] = P<sub>i-1</sub>[k]⋅α<sup>k</sup>, so that
//! σ(α<sup>i</sup>) = sum(P<sub>i</sub>), and every nonzero field element is tried as a
//! root with only e multiplications per candidate.
//!
//! # Forney's Formula
//!
//! With the evaluator ω(x) in hand, the error pattern at each located error reduces to
//! the closed form in step 5 above: two polynomial evaluations, a running product over
//! the other locators, and one codeword division per error.

use std::mem;

use crate::error::{ReedSolomonError, Result};
use crate::galois::{Codeword, GaloisField, Polynomial};

/// Solves the key equation σ(x)s(x) ≡ ω(x) (mod x<sup>2t</sup>) for the error locator
/// polynomial σ(x) and error evaluator polynomial ω(x), given the syndrome polynomial
/// s(x).
pub struct KeyEquation<F: GaloisField> {
    /// Remainder from the previous iteration: r<sub>i-1</sub>.
    r_last: Polynomial<F>,
    /// Current remainder: r<sub>i</sub>.
    r: Polynomial<F>,
    /// Auxiliary multiplier from the previous iteration: t<sub>i-1</sub>. Only the
    /// multiplier of s(x) is tracked, since only it feeds σ(x).
    t_last: Polynomial<F>,
    /// Current auxiliary multiplier: t<sub>i</sub>.
    t: Polynomial<F>,
    /// Remainder degree below which the recursion stops: t.
    target: usize,
}

impl<F: GaloisField> KeyEquation<F> {
    /// Construct a new `KeyEquation` from the given syndrome polynomial s(x) and number
    /// of parity symbols 2t.
    pub fn new(syndromes: Polynomial<F>, two_t: usize) -> KeyEquation<F> {
        KeyEquation {
            // Since deg(s(x)) < 2t, x^{2t} starts as the higher-degree remainder.
            r_last: Polynomial::monomial(two_t, Codeword::for_power(0)),
            r: syndromes,
            t_last: Polynomial::zero(),
            t: Polynomial::one(),
            target: two_t / 2,
        }
    }

    /// Run the recursion to completion, producing the normalized (σ(x), ω(x)) pair.
    pub fn solve(mut self) -> Result<(Polynomial<F>, Polynomial<F>)> {
        while self.r.degree() >= self.target {
            self.step()?;
        }

        let sigma_tilde_zero = self.t.constant();

        if sigma_tilde_zero.zero() {
            return Err(ReedSolomonError::SigmaTildeZero);
        }

        // Scale both polynomials so that σ(0) = 1.
        let inv = sigma_tilde_zero.invert();

        Ok((&self.t * inv, &self.r * inv))
    }

    /// Perform one division step of the recursion, updating the remainder and auxiliary
    /// polynomials.
    fn step(&mut self) -> Result<()> {
        mem::swap(&mut self.r_last, &mut self.r);
        mem::swap(&mut self.t_last, &mut self.t);

        // The previous iteration's remainder divides the one before it.
        if self.r_last.is_zero() {
            return Err(ReedSolomonError::RemainderDegenerate);
        }

        let (quotient, remainder) = self.r.div_rem(&self.r_last);

        self.r = remainder;
        self.t = &(&quotient * &self.t_last) + &self.t;

        Ok(())
    }
}

/// Finds the roots of the given error locator polynomial σ(x).
///
/// This performs the standard brute force method, evaluating σ(α<sup>i</sup>) for each
/// power 1 ≤ i ≤ 2<sup>8</sup> - 1, with the Chien Search optimization.
pub struct ChienSearch<F: GaloisField> {
    /// Terms σ<sub>k</sub>α<sup>ki</sup> of the locator polynomial evaluated at the
    /// current power i.
    terms: Vec<Codeword<F>>,
    /// Powers left to try.
    pows: std::ops::RangeInclusive<usize>,
}

impl<F: GaloisField> ChienSearch<F> {
    /// Construct a new `ChienSearch` over the roots of the given polynomial.
    pub fn new(poly: &Polynomial<F>) -> ChienSearch<F> {
        ChienSearch {
            terms: poly.to_vec(),
            pows: 1..=F::size(),
        }
    }

    /// Update each term's coefficient to its value when evaluated for the next power.
    fn update_terms(&mut self) {
        for (pow, term) in self.terms.iter_mut().enumerate() {
            *term = *term * Codeword::for_power(pow);
        }
    }

    /// Compute σ(α<sup>i</sup>), where i is the current power.
    fn eval(&self) -> Codeword<F> {
        self.terms.iter().fold(Codeword::default(), |sum, &term| sum + term)
    }
}

/// Iterate over all roots α<sup>i</sup> of σ(x).
impl<F: GaloisField> Iterator for ChienSearch<F> {
    type Item = Codeword<F>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pow = self.pows.next()?;

            // Step the terms from σ(α^{i-1}) to σ(α^i).
            self.update_terms();

            if self.eval().zero() {
                return Some(Codeword::for_power(pow));
            }
        }
    }
}

/// Find the error locators X<sub>k</sub> = α<sup>m<sub>k</sub></sup>, where
/// m<sub>k</sub> is the position of the k-th error, as the inverted roots of the given
/// error locator polynomial σ(x).
pub fn error_locators<F: GaloisField>(sigma: &Polynomial<F>) -> Result<Vec<Codeword<F>>> {
    let errors = sigma.degree();

    // With σ(x) = 1 + X_0 x, the single locator can be read off directly.
    if errors == 1 {
        return Ok(vec![sigma.coef(1)]);
    }

    let locators = ChienSearch::new(sigma)
        .take(errors)
        .map(|root| root.invert())
        .collect::<Vec<_>>();

    // If fewer roots exist than deg(σ), the codeword is unrecoverable.
    if locators.len() != errors {
        return Err(ReedSolomonError::RootCountMismatch);
    }

    Ok(locators)
}

/// Compute the error pattern Y<sub>k</sub> at each located error from the given error
/// evaluator polynomial ω(x) and error locators, using Forney's formula.
pub fn error_magnitudes<F: GaloisField>(
    omega: &Polynomial<F>,
    locators: &[Codeword<F>],
) -> Vec<Codeword<F>> {
    // With a single error the product term is empty and ω(x) is a constant.
    if locators.len() == 1 {
        return vec![omega.constant()];
    }

    locators.iter().map(|&loc| {
        let loc_inv = loc.invert();

        let denom = locators.iter()
            .filter(|&&other| other != loc)
            .fold(Codeword::for_power(0), |product, &other| {
                product * (Codeword::for_power(0) + other * loc_inv)
            });

        omega.eval(loc_inv) / denom
    }).collect()
}
