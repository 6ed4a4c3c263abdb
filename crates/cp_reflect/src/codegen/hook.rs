use alloc::vec::Vec;

use crate::codegen::{EncodeError, Fragment, Session, Stmt};

// -----------------------------------------------------------------------------
// Encode

/// An encoding hook: the object decides how it is rebuilt.
///
/// Exposed through [`Object::as_encode`](crate::Object::as_encode); with
/// `#[derive(Object)]` add `#[object(encode)]` and implement this trait.
///
/// The [`Session`] provides the helpers a hook needs:
/// [`type_reference`](Session::type_reference),
/// [`constructor_call`](Session::constructor_call),
/// [`unique_name`](Session::unique_name) and [`encode`](Session::encode)
/// for nested values.
///
/// # Examples
///
/// ```
/// use cp_reflect::codegen::{Encode, EncodeError, HookOutput, Session};
/// use cp_reflect::derive::Object;
/// use cp_reflect::value::Value;
///
/// /// Stored as a total, rebuilt through the constructor.
/// #[derive(Object, Clone)]
/// #[object(type_path = "bank::Account", construct, encode)]
/// struct Account {
///     cents: i64,
/// }
///
/// impl Encode for Account {
///     fn encode(&self, session: &mut Session) -> Result<HookOutput, EncodeError> {
///         let fragment = session.constructor_call(self, &[Value::Int(self.cents)], &[])?;
///         Ok(HookOutput::Fragment(fragment))
///     }
/// }
/// ```
pub trait Encode {
    fn encode(&self, session: &mut Session) -> Result<HookOutput, EncodeError>;
}

/// What an encoding hook produced.
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutput {
    /// Used as the encoding as is.
    Fragment(Fragment),
    /// A function body ending with [`Stmt::Return`], passed to
    /// [`Session::wrap`]. `preamble` runs before the call.
    Body {
        preamble: Vec<Stmt>,
        body: Vec<Stmt>,
    },
}

impl HookOutput {
    /// A function body without preamble.
    #[inline]
    pub const fn body(body: Vec<Stmt>) -> Self {
        Self::Body {
            preamble: Vec::new(),
            body,
        }
    }
}

impl From<Fragment> for HookOutput {
    #[inline]
    fn from(fragment: Fragment) -> Self {
        Self::Fragment(fragment)
    }
}
