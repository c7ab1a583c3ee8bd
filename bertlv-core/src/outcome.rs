//! Best-effort results
//!
//! Decoding never throws away structure that was already rebuilt. Instead of
//! `Result<T, E>`, the parser returns a [`ParseOutcome`] holding both the
//! (possibly partial) result and the error that stopped it, if any.

use crate::error::ParseError;

/// A result paired with the error that cut it short
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome<T, E = ParseError> {
    pub result: T,
    pub error: Option<E>,
}

impl<T, E> ParseOutcome<T, E> {
    /// Complete result, no error
    pub fn ok(result: T) -> Self {
        Self {
            result,
            error: None,
        }
    }

    /// Partial result together with the error that stopped decoding
    pub fn partial(result: T, error: E) -> Self {
        Self {
            result,
            error: Some(error),
        }
    }

    /// Whether decoding ran to the end without error
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Map the result, keeping the error
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseOutcome<U, E> {
        ParseOutcome {
            result: f(self.result),
            error: self.error,
        }
    }

    /// Map the error, keeping the result
    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> ParseOutcome<T, F> {
        ParseOutcome {
            result: self.result,
            error: self.error.map(f),
        }
    }

    /// Convert into a `Result`, handing the partial result to `on_error`
    pub fn into_result<F>(self, on_error: impl FnOnce(E, T) -> F) -> Result<T, F> {
        match self.error {
            None => Ok(self.result),
            Some(error) => Err(on_error(error, self.result)),
        }
    }

    pub fn into_parts(self) -> (T, Option<E>) {
        (self.result, self.error)
    }
}

impl<T: Default, E> ParseOutcome<T, E> {
    /// No result at all, only the error
    pub fn failed(error: E) -> Self {
        Self::partial(T::default(), error)
    }
}

impl<T: Default, E> Default for ParseOutcome<T, E> {
    fn default() -> Self {
        Self::ok(T::default())
    }
}
