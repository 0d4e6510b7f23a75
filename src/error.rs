//! Standard errors that may occur when decoding a Reed-Solomon codeword.

#[cfg(feature = "ser")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reed-Solomon runtime errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub enum ReedSolomonError {
    /// The remainder sequence of the Euclidean recursion collapsed to zero before the
    /// target degree was reached.
    #[error("r_{{i-1}} was zero")]
    RemainderDegenerate,
    /// The key equation produced an error locator polynomial with a zero constant
    /// term, which no valid locator has.
    #[error("sigmaTilde(0) was zero")]
    SigmaTildeZero,
    /// Chien search found fewer roots than the degree of the error locator
    /// polynomial, meaning more errors occurred than can be corrected.
    #[error("Error locator degree does not match number of roots")]
    RootCountMismatch,
    /// A computed error position fell outside the received word.
    #[error("Bad error location")]
    BadErrorLocation,
    /// More parity symbols were requested than the received word contains.
    #[error("too many parity symbols for received word")]
    TooManyParitySymbols,
}

/// Standard result using `ReedSolomonError`.
pub type Result<T> = std::result::Result<T, ReedSolomonError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reason_strings() {
        assert_eq!(ReedSolomonError::RemainderDegenerate.to_string(), "r_{i-1} was zero");
        assert_eq!(ReedSolomonError::SigmaTildeZero.to_string(), "sigmaTilde(0) was zero");
        assert_eq!(
            ReedSolomonError::RootCountMismatch.to_string(),
            "Error locator degree does not match number of roots"
        );
        assert_eq!(ReedSolomonError::BadErrorLocation.to_string(), "Bad error location");
    }
}
