use alloc::boxed::Box;

use crate::Object;
use crate::info::TypePath;
use crate::object::{Arguments, Construct, ObjectError};
use crate::registry::FromType;

/// A container providing [`Construct`] for registered types.
///
/// A generated program uses it whenever it calls a type, e.g.
/// `shapes::Point(x = 1, y = 2)`.
///
/// # Examples
///
/// ```
/// use cp_reflect::derive::Object;
/// use cp_reflect::object::Arguments;
/// use cp_reflect::registry::{GetTypeMeta, TypeTraitConstruct};
///
/// #[derive(Object, Clone, PartialEq, Debug)]
/// #[object(construct)]
/// struct Pair {
///     left: i64,
///     right: i64,
/// }
///
/// let meta = Pair::get_type_meta();
/// let construct = meta.get_trait::<TypeTraitConstruct>().unwrap();
///
/// let pair = construct.construct(Arguments::new().arg(1).keyword("right", 2)).unwrap();
/// assert_eq!(pair.take::<Pair>().unwrap(), Pair { left: 1, right: 2 });
/// ```
#[derive(Clone)]
pub struct TypeTraitConstruct {
    func: fn(Arguments) -> Result<Box<dyn Object>, ObjectError>,
}

impl TypeTraitConstruct {
    /// Call `T`'s [`Construct`].
    #[inline(always)]
    pub fn construct(&self, arguments: Arguments) -> Result<Box<dyn Object>, ObjectError> {
        (self.func)(arguments)
    }
}

impl<T: Construct + TypePath + Object> FromType<T> for TypeTraitConstruct {
    fn from_type() -> Self {
        Self {
            func: |arguments| {
                let object: Box<dyn Object> = Box::new(T::construct(arguments)?);
                Ok(object)
            },
        }
    }
}
