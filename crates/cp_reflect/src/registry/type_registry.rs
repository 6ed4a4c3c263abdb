use core::any::TypeId;

use cp_utils::TypeIdMap;
use cp_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::info::TypePath;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reconstructible types.
///
/// This struct is the central store for type information while a program
/// runs. [Registering] a type generates a new [`TypeMeta`] entry in this store
/// using the type's [`GetTypeMeta`] implementation (which is automatically
/// implemented when using [`#[derive(Object)]`](crate::derive::Object)).
///
/// Besides type paths, the registry indexes every prefix of every registered
/// module path, so that `a`, `a::b` and `a::b::c` are all known modules once
/// a type in `a::b::c` was registered.
///
/// # Example
///
/// ```
/// use cp_reflect::derive::Object;
/// use cp_reflect::registry::{TypeRegistry, TypeTraitAllocate};
///
/// #[derive(Object, Default, Clone)]
/// #[object(type_path = "shop::items::Apple")]
/// struct Apple;
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Apple>();
///
/// assert!(registry.contains_module("shop"));
/// assert!(registry.contains_module("shop::items"));
///
/// let meta = registry.get_with_type_path("shop::items::Apple").unwrap();
/// assert!(meta.has_trait::<TypeTraitAllocate>());
/// ```
///
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    modules: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            modules: HashSet::with_hasher(FixedHashState),
        }
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        modules: &mut HashSet<&'static str>,
    ) {
        // For new type, assuming that the full path cannot be duplicated.
        let type_path = type_meta.type_path();
        if let Some(previous) = type_path_to_id.insert(type_path, type_meta.type_id()) {
            log::warn!("type path `{type_path}` is shared by two types, {previous:?} is shadowed");
        }

        if let Some(module) = type_meta.module_path() {
            for (index, _) in module.match_indices("::") {
                modules.insert(&module[..index]);
            }
            modules.insert(module);
        }
    }

    /// Try add or do nothing.
    ///
    /// - If key [`TypeId`] has already exist, the function will do nothing and return `false`.
    /// - If the key [`TypeId`] does not exist, the function will insert value and return `true`.
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.type_meta_table.try_insert(type_meta.type_id(), || {
            Self::add_new_type_indices(&type_meta, &mut self.type_path_to_id, &mut self.modules);
            type_meta
        })
    }

    /// Insert or **Overwrite** the meta of a type.
    ///
    /// Overwriting keeps the path and module indices untouched.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains(&type_meta.type_id()) {
            Self::add_new_type_indices(&type_meta, &mut self.type_path_to_id, &mut self.modules);
        }
        self.type_meta_table.insert(type_meta.type_id(), type_meta);
    }

    /// Attempts to register the type `T` if it has not yet been registered already.
    ///
    /// If the meta for type `T` already exists, it will not be registered again.
    /// To register the type, overwriting any existing meta, use
    /// [`insert_type_meta`](Self::insert_type_meta) instead.
    pub fn register<T: GetTypeMeta>(&mut self) {
        self.type_meta_table.try_insert(TypeId::of::<T>(), || {
            let meta = T::get_type_meta();
            Self::add_new_type_indices(&meta, &mut self.type_path_to_id, &mut self.modules);
            meta
        });
    }

    /// Automatically registers all non-generic types annotated with
    /// `#[object(auto_register)]`.
    ///
    /// This method is equivalent to calling [`register`](Self::register) for each qualifying type.
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration succeeded on the current platform; otherwise, `false`.
    ///
    /// ## Feature Dependency
    ///
    /// This method requires the `auto_register` feature. When disabled, it always does nothing and
    /// returns `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cp_reflect::derive::Object;
    /// use cp_reflect::registry::TypeRegistry;
    ///
    /// #[derive(Object, Default, Clone)]
    /// #[object(type_path = "demo::Auto", auto_register)]
    /// struct Auto;
    ///
    /// let mut registry = TypeRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.get_with_type_path("demo::Auto").is_some());
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            // Reduce the cost of duplicate registrations.
            if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
                return true;
            }
            auto_register::__register_types(self);
            let available = self.contains(TypeId::of::<auto_register::__AvailFlag>());
            if !available {
                log::warn!("automatic type registration is not supported on this platform");
            }
            available
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Registers the type trait `D` for type `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` has not been registered.
    pub fn register_type_trait<T: TypePath, D: TypeTrait + FromType<T>>(&mut self) {
        match self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            Some(type_meta) => type_meta.insert_trait(D::from_type()),
            None => panic!(
                "Called `TypeRegistry::register_type_trait`, but the type `{}` of type_trait `{}` without registering",
                T::type_path(),
                core::any::type_name::<D>(),
            ),
        }
    }

    /// Whether the type with given [`TypeId`] has been registered in this registry.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    /// Whether `module` is the module path, or a prefix of the module path,
    /// of a registered type.
    #[inline]
    pub fn contains_module(&self, module: &str) -> bool {
        self.modules.contains(module)
    }

    /// Returns a reference to the [`TypeMeta`] of the type with
    /// the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns a reference to the [`TypeMeta`] of the type with
    /// the given [type path].
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        // Manual inline
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns a reference to the [`TypeTrait`] of type `T` associated with the given [`TypeId`].
    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        // Manual inline
        match self.get(type_id) {
            Some(type_meta) => type_meta.get_trait::<T>(),
            None => None,
        }
    }

    /// Returns an iterator over the [`TypeMeta`]s of the registered types.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }

    /// The number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A shared [`TypeRegistry`].
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Wraps an existing registry.
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.read().type_path_to_id.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::derive::Object;
    use crate::registry::{TypeTraitAllocate, TypeTraitConstruct};

    #[derive(Object, Default, Clone)]
    #[object(type_path = "zoo::birds::Owl")]
    struct Owl {
        age: u32,
    }

    #[derive(Object, Clone)]
    #[object(type_path = "zoo::Keeper", construct)]
    struct Keeper {
        name: alloc::string::String,
    }

    #[test]
    fn module_prefixes_are_indexed() {
        let mut registry = TypeRegistry::new();
        registry.register::<Owl>();

        assert!(registry.contains_module("zoo"));
        assert!(registry.contains_module("zoo::birds"));
        assert!(!registry.contains_module("zoo::bird"));
        assert!(!registry.contains_module("zoo::birds::Owl"));
    }

    #[test]
    fn construction_selects_type_traits() {
        let mut registry = TypeRegistry::new();
        registry.register::<Owl>();
        registry.register::<Keeper>();
        registry.register::<Keeper>();

        assert_eq!(registry.len(), 2);
        assert!(
            registry
                .get_type_trait::<TypeTraitAllocate>(TypeId::of::<Owl>())
                .is_some()
        );
        let keeper = registry.get_with_type_path("zoo::Keeper").unwrap();
        assert!(keeper.has_trait::<TypeTraitConstruct>());
        assert!(!keeper.has_trait::<TypeTraitAllocate>());
    }
}
