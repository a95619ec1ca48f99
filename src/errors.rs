pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Integer message outside `[1, n)`, or an input too long for the
    /// selected padding scheme.
    InvalidMessage,
    /// Key constructor preconditions cannot be satisfied: equal primes,
    /// an exponent below 3, or an exponent that is not invertible
    /// modulo the totient.
    InvalidKey,
    /// Unsatisfiable generation arguments, such as a modulus below 10
    /// bits or a public exponent that is even, composite, or as wide as
    /// the requested modulus.
    InvalidArguments,
    /// An internal consistency check failed; the result of a
    /// private-key operation did not survive re-encryption.
    Internal,
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Error::InvalidMessage => write!(f, "invalid message"),
            Error::InvalidKey => write!(f, "invalid key"),
            Error::InvalidArguments => write!(f, "invalid arguments"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}
