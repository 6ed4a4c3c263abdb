/// Limits applied while executing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecConfig {
    /// Maximum nesting of function calls.
    pub max_call_depth: usize,
}

impl ExecConfig {
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

    #[inline]
    pub const fn new() -> Self {
        Self {
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
        }
    }

    #[inline]
    pub const fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}

impl Default for ExecConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
