use cp_reflect::codegen::EncodeConfig;
use cp_vm::ExecConfig;

/// Limits for both directions of a [`Pickler`](crate::Pickler).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub encode: EncodeConfig,
    pub exec: ExecConfig,
}

impl Config {
    #[inline]
    pub const fn new() -> Self {
        Self {
            encode: EncodeConfig::new(),
            exec: ExecConfig::new(),
        }
    }

    #[inline]
    pub const fn with_encode(mut self, encode: EncodeConfig) -> Self {
        self.encode = encode;
        self
    }

    #[inline]
    pub const fn with_exec(mut self, exec: ExecConfig) -> Self {
        self.exec = exec;
        self
    }
}
