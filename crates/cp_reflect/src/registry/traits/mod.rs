mod allocate;
mod construct;

pub use allocate::TypeTraitAllocate;
pub use construct::TypeTraitConstruct;
