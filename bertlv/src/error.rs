use bertlv_core::{TlvError, TlvNode};
use thiserror::Error;

/// A failed parse, together with every item decoded before the failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct PartialParseError {
    #[source]
    pub error: TlvError,
    pub partial: Vec<TlvNode>,
}

impl PartialParseError {
    pub fn into_parts(self) -> (Vec<TlvNode>, TlvError) {
        (self.partial, self.error)
    }
}
