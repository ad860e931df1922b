//! Parse options.

use crate::consts::DEFAULT_MAX_DEPTH;

/// Options for `Parser`.
///
/// ```rs
/// let options = ParseOptions::default()
///     .with_max_depth(16)
///     .with_unknown_as_container(false);
/// let atoms = Parser::with_options(file, options).parse_sequence()?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub(crate) max_depth: usize,
    pub(crate) unknown_as_container: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unknown_as_container: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum nesting depth. Top-level atoms are at depth 0.
    /// Atoms nested deeper fail with `QtError::DepthExceeded`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether atoms with a FourCC missing from the registry
    /// are walked as containers (default) or skipped as opaque leaves.
    pub fn with_unknown_as_container(mut self, unknown_as_container: bool) -> Self {
        self.unknown_as_container = unknown_as_container;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn unknown_as_container(&self) -> bool {
        self.unknown_as_container
    }
}
