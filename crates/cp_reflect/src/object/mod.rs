//! User types that can take part in an object graph.
//!
//! ## Menu
//!
//! - [`Object`]: the object-safe trait every graph node implements.
//! - [`Construction`]: how the fallback encoder rebuilds an object.
//! - [`Construct`], [`Arguments`]: building an object from call arguments.
//! - [`ObjectError`]: attribute and argument binding failures.

// -----------------------------------------------------------------------------
// Modules

mod construct;
mod error;
mod object;

// -----------------------------------------------------------------------------
// Exports

pub use construct::{Arguments, Construct, Construction};
pub use error::ObjectError;
pub use object::Object;
