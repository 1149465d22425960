//! Service key type used for registration and lookup.

use std::any::TypeId;

/// Key a factory is registered under and callers resolve by.
///
/// A `ServiceKey` pairs a `TypeId` with the type's human-readable name.
/// The `TypeId` drives equality and hashing; the name exists for error
/// messages, contracts and diagnostics. One constructor covers concrete
/// types and trait objects alike:
///
/// ```rust
/// use mvvm_conventions::ServiceKey;
///
/// trait Renderer: Send + Sync {}
/// struct Frame;
///
/// let concrete = ServiceKey::of::<Frame>();
/// let erased = ServiceKey::of::<dyn Renderer>();
///
/// assert_ne!(concrete, erased);
/// assert!(concrete.type_name().ends_with("Frame"));
/// assert!(erased.type_name().contains("Renderer"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ServiceKey {
    id: TypeId,
    name: &'static str,
}

impl ServiceKey {
    /// Builds the key for `T`, which may be a concrete type or a trait object.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The fully qualified type name, as reported by `std::any::type_name`.
    ///
    /// This is also the string used as the contract for a view-model's
    /// registration under the base capability.
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// The underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

// TypeId-only comparison; the name is diagnostic payload.
impl PartialEq for ServiceKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceKey {}

impl std::hash::Hash for ServiceKey {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
