use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::codegen::{EncodeConfig, FunctionDef};

// -----------------------------------------------------------------------------
// Session

/// The state of one top-level encoding.
///
/// A session is created per call, threaded through every nested encoding and
/// hook, then consumed by [`assemble`](Session::assemble). Nothing is shared
/// between sessions, so encodings on different threads never interfere.
///
/// Names synthesized by a session are unique within it: the counter behind
/// them only grows.
#[derive(Debug)]
pub struct Session {
    pub(super) counter: u64,
    pub(super) imports: BTreeSet<String>,
    pub(super) definitions: Vec<FunctionDef>,
    pub(super) depth: usize,
    pub(super) config: EncodeConfig,
}

impl Session {
    #[inline]
    pub fn new() -> Self {
        Self::with_config(EncodeConfig::default())
    }

    #[inline]
    pub const fn with_config(config: EncodeConfig) -> Self {
        Self {
            counter: 0,
            imports: BTreeSet::new(),
            definitions: Vec::new(),
            depth: 0,
            config,
        }
    }

    /// Returns a fresh name, `<prefix>_<8 hex digits>`.
    ///
    /// ```
    /// let mut session = cp_reflect::codegen::Session::new();
    ///
    /// assert_eq!(session.unique_name("obj"), "obj_00000001");
    /// assert_eq!(session.unique_name("func"), "func_00000002");
    /// ```
    pub fn unique_name(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}_{:08x}", self.counter)
    }

    /// Records a module the program must import. Idempotent.
    pub fn add_import(&mut self, module: &str) {
        if !self.imports.contains(module) {
            log::trace!("import `{module}`");
            self.imports.insert(String::from(module));
        }
    }

    /// Imports recorded so far, sorted.
    #[inline]
    pub fn imports(&self) -> impl ExactSizeIterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    /// Definitions created so far, in creation order.
    #[inline]
    pub fn definitions(&self) -> &[FunctionDef] {
        &self.definitions
    }

    #[inline]
    pub const fn config(&self) -> &EncodeConfig {
        &self.config
    }

    /// Current nesting level of the encoder.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for Session {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;

    use super::Session;

    #[test]
    fn names_never_repeat() {
        let mut session = Session::new();
        let names: BTreeSet<_> = (0..1000)
            .map(|index| session.unique_name(if index % 2 == 0 { "func" } else { "obj" }))
            .collect();
        assert_eq!(names.len(), 1000);
    }

    #[test]
    fn imports_are_idempotent() {
        let mut session = Session::new();
        session.add_import("zoo::birds");
        session.add_import("zoo");
        session.add_import("zoo::birds");

        assert!(session.imports().eq(["zoo", "zoo::birds"]));
    }
}
