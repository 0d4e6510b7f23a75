//! Galois field arithmetic for codewords and polynomials.

use std::marker::PhantomData;

/// Generate the antilog table for the field with the given primitive polynomial.
///
/// Each codeword α<sup>i</sup> represents the polynomial x<sup>i</sup> mod h(x), so the
/// table is built by repeated multiplication by x, reducing by h(x) whenever the result
/// overflows 8 bits.
const fn gen_codewords(poly: u16) -> [u8; 256] {
    let mut codewords = [0; 256];
    let mut x: u16 = 1;
    let mut i = 0;

    while i < 256 {
        codewords[i] = x as u8;

        x <<= 1;

        if x & 0x100 != 0 {
            x ^= poly;
        }

        i += 1;
    }

    codewords
}

/// Generate the log table for the field with the given primitive polynomial, the
/// inverse map of `gen_codewords`.
///
/// The zero codeword has no logarithm, and its entry must never be read.
const fn gen_powers(poly: u16) -> [u8; 256] {
    let mut powers = [0; 256];
    let mut x: u16 = 1;
    let mut i = 0;

    while i < 255 {
        powers[x as usize] = i as u8;

        x <<= 1;

        if x & 0x100 != 0 {
            x ^= poly;
        }

        i += 1;
    }

    powers
}

/// A GF(2<sup>8</sup>) Galois field characterized by its primitive polynomial.
pub trait GaloisField: Copy + 'static {
    /// Primitive polynomial h(x) of the field, as a 9-bit coefficient pattern.
    const POLY: u16;

    /// Antilog table, mapping each power i to the codeword α<sup>i</sup>.
    const CODEWORDS: [u8; 256] = gen_codewords(Self::POLY);
    /// Log table, mapping each nonzero codeword α<sup>i</sup> to its power i.
    const POWERS: [u8; 256] = gen_powers(Self::POLY);

    /// Number of unique nonzero codewords in the field: 2<sup>8</sup> - 1.
    fn size() -> usize { 255 }

    /// Map the given power i to codeword α<sup>i</sup>.
    fn codeword(pow: usize) -> u8 { Self::CODEWORDS[pow] }

    /// Map the given nonzero codeword α<sup>i</sup> to its power i.
    fn power(codeword: usize) -> usize { Self::POWERS[codeword] as usize }

    /// Map the given power i to codeword α<sup>m</sup> ≡ α<sup>i</sup> (modulo the size
    /// of the field.)
    fn codeword_modded(pow: usize) -> u8 {
        Self::codeword(pow % Self::size())
    }
}

/// GF(2<sup>8</sup>) field characterized by h(x) = x<sup>8</sup>+x<sup>4</sup>+
/// x<sup>3</sup>+x<sup>2</sup>+1, as used by QR Code and Aztec.
#[derive(Copy, Clone, Debug)]
pub struct QrCodeField;

impl GaloisField for QrCodeField {
    const POLY: u16 = 0x011D;
}

/// GF(2<sup>8</sup>) field characterized by h(x) = x<sup>8</sup>+x<sup>5</sup>+
/// x<sup>3</sup>+x<sup>2</sup>+1, as used by Data Matrix.
#[derive(Copy, Clone, Debug)]
pub struct DataMatrixField;

impl GaloisField for DataMatrixField {
    const POLY: u16 = 0x012D;
}

/// Codeword in the QR Code Galois field.
pub type QrCodeword = Codeword<QrCodeField>;

/// Codeword in a Galois field.
#[derive(Copy, Clone)]
pub struct Codeword<F: GaloisField> {
    field: PhantomData<F>,
    bits: u8,
}

impl<F: GaloisField> Codeword<F> {
    /// Construct a new `Codeword` from the given bit pattern.
    pub fn new(bits: u8) -> Codeword<F> {
        Codeword {
            field: PhantomData,
            bits,
        }
    }

    /// Construct a new `Codeword` α<sup>m</sup> ≡ α<sup>i</sup> (modulo the field) for
    /// the given power i.
    pub fn for_power(power: usize) -> Codeword<F> {
        Codeword::new(F::codeword_modded(power))
    }

    /// Retrieve the bit pattern of the codeword.
    pub fn bits(&self) -> u8 { self.bits }

    /// Check if the codeword is zero.
    pub fn zero(&self) -> bool { self.bits == 0 }

    /// Retrieve the power i of the current codeword α<sup>i</sup>. Return `Some(i)` if
    /// the power is defined and `None` if the codeword is zero.
    pub fn power(&self) -> Option<usize> {
        if self.zero() {
            None
        } else {
            Some(F::power(self.bits as usize))
        }
    }

    /// Find 1/α<sup>i</sup> for the current codeword α<sup>i</sup>. Panic if the codeword
    /// is zero.
    pub fn invert(self) -> Codeword<F> {
        match self.power() {
            Some(p) => Codeword::for_power(F::size() - p),
            None => panic!("invert zero"),
        }
    }

    /// Compute (α<sup>i</sup>)<sup>p</sup> for the current codeword α<sup>i</sup> and
    /// given power p.
    pub fn pow(&self, pow: usize) -> Codeword<F> {
        match self.power() {
            Some(p) => Codeword::for_power(p * pow),
            None => Codeword::default(),
        }
    }
}

impl<F: GaloisField> Default for Codeword<F> {
    /// Construct the zero codeword.
    fn default() -> Self {
        Codeword::new(0)
    }
}

/// Add codewords using Galois addition.
impl<F: GaloisField> std::ops::Add for Codeword<F> {
    type Output = Codeword<F>;

    fn add(self, rhs: Codeword<F>) -> Self::Output {
        Codeword::new(self.bits ^ rhs.bits)
    }
}

/// "Subtract" codewords, which is equivalent to addition.
impl<F: GaloisField> std::ops::Sub for Codeword<F> {
    type Output = Codeword<F>;

    fn sub(self, rhs: Codeword<F>) -> Self::Output {
        self + rhs
    }
}

/// Multiply codewords using Galois multiplication.
impl<F: GaloisField> std::ops::Mul for Codeword<F> {
    type Output = Codeword<F>;

    fn mul(self, rhs: Codeword<F>) -> Self::Output {
        match (self.power(), rhs.power()) {
            (Some(p), Some(q)) => Codeword::for_power(p + q),
            _ => Codeword::default(),
        }
    }
}

/// Divide codewords using Galois division. Panic if the divisor is zero.
impl<F: GaloisField> std::ops::Div for Codeword<F> {
    type Output = Codeword<F>;

    fn div(self, rhs: Codeword<F>) -> Self::Output {
        match (self.power(), rhs.power()) {
            // Ensure non-negative power.
            (Some(p), Some(q)) => Codeword::for_power(F::size() + p - q),
            (None, Some(_)) => Codeword::default(),
            (_, None) => panic!("divide by zero"),
        }
    }
}

/// Check equality of two codewords.
impl<F: GaloisField> std::cmp::PartialEq for Codeword<F> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<F: GaloisField> std::cmp::Eq for Codeword<F> {}

/// Check equality of the codeword's bit pattern with raw bits.
impl<F: GaloisField> std::cmp::PartialEq<u8> for Codeword<F> {
    fn eq(&self, other: &u8) -> bool {
        self.bits == *other
    }
}

impl<F: GaloisField> std::fmt::Debug for Codeword<F> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self.power() {
            Some(p) => write!(fmt, "Codeword::for_power({})", p),
            None => write!(fmt, "Codeword::default()"),
        }
    }
}

/// Polynomial with GF(2<sup>8</sup>) codewords as coefficients.
///
/// Coefficients are stored in ascending-degree order: `coefs[0]` is the degree-0
/// term. The stored coefficients never have trailing zeros past the highest nonzero
/// term, except for the zero polynomial, which is canonically the single coefficient
/// zero. Polynomials are immutable values, and every operation creates a fresh one.
#[derive(Clone)]
pub struct Polynomial<F: GaloisField> {
    /// Coefficients c<sub>0</sub>, ..., c<sub>deg</sub> of the polynomial.
    coefs: Vec<Codeword<F>>,
}

impl<F: GaloisField> Polynomial<F> {
    /// Construct a new `Polynomial` from the given coefficients c<sub>0</sub>, ...,
    /// c<sub>k</sub>.
    ///
    /// The resulting polynomial has the form p(x) = c<sub>0</sub> + c<sub>1</sub>x + ···
    /// + c<sub>k</sub>x<sup>k</sup>.
    pub fn new<T: IntoIterator<Item = Codeword<F>>>(init: T) -> Self {
        Self::normalize(init.into_iter().collect())
    }

    /// Construct the zero polynomial, p(x) = 0.
    pub fn zero() -> Self {
        Polynomial {
            coefs: vec![Codeword::default()],
        }
    }

    /// Construct the unit polynomial, p(x) = 1.
    pub fn one() -> Self {
        Polynomial {
            coefs: vec![Codeword::for_power(0)],
        }
    }

    /// Construct the monomial p(x) = cx<sup>n</sup> for the given coefficient c and
    /// degree n.
    ///
    /// A zero coefficient yields the zero polynomial, whatever the degree.
    pub fn monomial(degree: usize, coefficient: Codeword<F>) -> Self {
        if coefficient.zero() {
            return Polynomial::zero();
        }

        let mut coefs = vec![Codeword::default(); degree + 1];
        coefs[degree] = coefficient;

        Polynomial { coefs }
    }

    /// Strip trailing zero coefficients so the highest-order term is nonzero, leaving
    /// the canonical zero polynomial when no nonzero term remains.
    fn normalize(mut coefs: Vec<Codeword<F>>) -> Self {
        while coefs.len() > 1 && coefs.last().map_or(false, |c| c.zero()) {
            coefs.pop();
        }

        if coefs.is_empty() {
            coefs.push(Codeword::default());
        }

        Polynomial { coefs }
    }

    /// Retrieve the degree-0 coefficient, c<sub>0</sub>.
    pub fn constant(&self) -> Codeword<F> {
        self.coefs[0]
    }

    /// Compute deg(p(x)).
    ///
    /// The zero polynomial reports degree 0; use `is_zero` to distinguish it from a
    /// nonzero constant.
    pub fn degree(&self) -> usize {
        self.coefs.len() - 1
    }

    /// Check if the polynomial is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coefs.len() == 1 && self.coefs[0].zero()
    }

    /// Retrieve the coefficient c<sub>i</sub> associated with the x<sup>i</sup> term.
    ///
    /// If i > deg(p(x)), 0 is returned.
    pub fn coef(&self, i: usize) -> Codeword<F> {
        match self.coefs.get(i) {
            Some(&c) => c,
            None => Codeword::default(),
        }
    }

    /// Evaluate p(x), substituting in the given x.
    pub fn eval(&self, x: Codeword<F>) -> Codeword<F> {
        // This uses Horner's method which, unlike the naive method, doesn't require a
        // call to `pow()` at each term.
        self.coefs.iter().rev().fold(Codeword::default(), |s, &coef| s * x + coef)
    }

    /// Compute p(x) · cx<sup>n</sup> for the given degree n and coefficient c.
    pub fn mul_monomial(&self, degree: usize, coefficient: Codeword<F>) -> Self {
        if self.is_zero() || coefficient.zero() {
            return Polynomial::zero();
        }

        let mut coefs = vec![Codeword::default(); degree + self.coefs.len()];

        for (i, &c) in self.coefs.iter().enumerate() {
            coefs[degree + i] = c * coefficient;
        }

        Polynomial { coefs }
    }

    /// Compute the quotient and remainder of p(x) divided by the given polynomial.
    /// Panic if the divisor is the zero polynomial.
    pub fn div_rem(&self, div: &Self) -> (Self, Self) {
        assert!(!div.is_zero(), "divide by zero polynomial");

        let lead_inv = div.coef(div.degree()).invert();

        let mut quotient = Polynomial::zero();
        let mut remainder = self.clone();

        while !remainder.is_zero() && remainder.degree() >= div.degree() {
            let degree_diff = remainder.degree() - div.degree();
            let scale = remainder.coef(remainder.degree()) * lead_inv;

            quotient = &quotient + &Polynomial::monomial(degree_diff, scale);
            remainder = &remainder + &div.mul_monomial(degree_diff, scale);
        }

        (quotient, remainder)
    }
}

/// Provides a slice of coefficients starting at the degree-0 term, [c<sub>0</sub>,
/// c<sub>1</sub>, ...].
impl<F: GaloisField> std::ops::Deref for Polynomial<F> {
    type Target = [Codeword<F>];
    fn deref(&self) -> &Self::Target { &self.coefs[..] }
}

/// Add polynomials using Galois addition for coefficients, aligned at the degree-0
/// term.
impl<F: GaloisField> std::ops::Add for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, rhs: &Polynomial<F>) -> Self::Output {
        if self.is_zero() {
            return rhs.clone();
        }

        if rhs.is_zero() {
            return self.clone();
        }

        let deg = std::cmp::max(self.degree(), rhs.degree());

        Polynomial::new((0..=deg).map(|i| self.coef(i) + rhs.coef(i)))
    }
}

/// "Subtract" polynomials, which is equivalent to addition.
impl<F: GaloisField> std::ops::Sub for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, rhs: &Polynomial<F>) -> Self::Output {
        self + rhs
    }
}

/// Scale polynomial by a codeword.
impl<F: GaloisField> std::ops::Mul<Codeword<F>> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, rhs: Codeword<F>) -> Self::Output {
        if rhs.zero() {
            return Polynomial::zero();
        }

        Polynomial::new(self.coefs.iter().map(|&coef| coef * rhs))
    }
}

/// Multiply polynomials using Galois multiplication for coefficients.
impl<F: GaloisField> std::ops::Mul for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, rhs: &Polynomial<F>) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }

        let mut coefs = vec![Codeword::default(); self.coefs.len() + rhs.coefs.len() - 1];

        for (i, &a) in self.coefs.iter().enumerate() {
            for (j, &b) in rhs.coefs.iter().enumerate() {
                coefs[i + j] = coefs[i + j] + a * b;
            }
        }

        Polynomial { coefs }
    }
}

/// Check structural equality of two polynomials.
impl<F: GaloisField> std::cmp::PartialEq for Polynomial<F> {
    fn eq(&self, other: &Self) -> bool {
        self.coefs == other.coefs
    }
}

impl<F: GaloisField> std::cmp::Eq for Polynomial<F> {}

impl<F: GaloisField> std::fmt::Debug for Polynomial<F> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(fmt, "Polynomial({:?})", &self.coefs[..])
    }
}
