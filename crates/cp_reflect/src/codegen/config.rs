/// Limits applied while encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Maximum nesting of values. Every value on the path from the root
    /// counts one level: the root, each set, map or object around the
    /// value, and the value itself. An object and its attribute mapping
    /// share a level. Deeper graphs, and cyclic ones, fail with
    /// [`EncodeError::RecursionLimit`](crate::codegen::EncodeError::RecursionLimit).
    pub max_depth: usize,
}

impl EncodeConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    #[inline]
    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for EncodeConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
