//! Parser configuration

/// Settings for [`crate::TlvDecoder`]
///
/// The default places no limit on nesting. Callers decoding untrusted input
/// can bound recursion with [`ParserConfig::max_depth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    max_depth: Option<usize>,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how many constructed items may be nested inside each other
    ///
    /// Top-level items sit at depth 0; a limit of 0 therefore still decodes
    /// top-level constructed items but none of their children.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Remove the nesting limit
    pub fn unlimited_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    pub fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }
}
