//! Typed keys for the operation context.

use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::error::{ContextError, ContextResult};

/// A key into an [`OperationContext`](super::OperationContext) that carries
/// the type of the value it indexes.
///
/// Two keys are equal only when both the identifier and the value type match,
/// so reusing an identifier with a different type yields a distinct key
/// instead of aliasing an unrelated value.
///
/// Keys are usually declared once as constants:
///
/// ```rust
/// use distribution_core::ContextKey;
///
/// const RETRIES: ContextKey<u32> = ContextKey::new("retries");
/// ```
pub struct ContextKey<T> {
    identifier: Cow<'static, str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    /// Creates a key from a static identifier.
    ///
    /// # Panics
    ///
    /// Panics if `identifier` is empty or whitespace only. In a `const` item
    /// the panic surfaces as a compile error.
    pub const fn new(identifier: &'static str) -> Self {
        assert!(
            !is_blank(identifier),
            "context key identifier cannot be blank"
        );
        Self {
            identifier: Cow::Borrowed(identifier),
            _marker: PhantomData,
        }
    }

    /// Creates a key from a runtime identifier.
    ///
    /// Returns [`ContextError::InvalidKey`] if the identifier is blank.
    pub fn of(identifier: impl Into<String>) -> ContextResult<Self> {
        let identifier = identifier.into();
        if is_blank(&identifier) {
            return Err(ContextError::InvalidKey {
                reason: "identifier cannot be blank",
            });
        }
        Ok(Self {
            identifier: Cow::Owned(identifier),
            _marker: PhantomData,
        })
    }

    /// Returns the identifier of this key.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl<T: 'static> ContextKey<T> {
    /// Returns the [`TypeId`] of the value type.
    pub fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    /// Returns the name of the value type.
    pub fn value_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    /// Returns the type-erased form of this key.
    pub fn erased(&self) -> AnyContextKey {
        AnyContextKey {
            identifier: self.identifier.clone(),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }
}

/// Empty or ASCII whitespace only.
const fn is_blank(identifier: &str) -> bool {
    let bytes = identifier.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            return false;
        }
        i += 1;
    }
    true
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: 'static, U: 'static> PartialEq<ContextKey<U>> for ContextKey<T> {
    fn eq(&self, other: &ContextKey<U>) -> bool {
        TypeId::of::<T>() == TypeId::of::<U>() && self.identifier == other.identifier
    }
}

impl<T: 'static> Eq for ContextKey<T> {}

impl<T: 'static> Hash for ContextKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
        TypeId::of::<T>().hash(state);
    }
}

impl<T: 'static> fmt::Display for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_key(f, &self.identifier, type_name::<T>())
    }
}

impl<T: 'static> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextKey")
            .field("identifier", &self.identifier)
            .field("type", &type_name::<T>())
            .finish()
    }
}

impl<T: 'static> From<&ContextKey<T>> for AnyContextKey {
    fn from(key: &ContextKey<T>) -> Self {
        key.erased()
    }
}

// =============================================================================
// AnyContextKey
// =============================================================================

/// The type-erased form of a [`ContextKey`].
///
/// Carries the identifier together with the runtime type witness, and is what
/// the operation context actually stores.
#[derive(Clone, Debug)]
pub struct AnyContextKey {
    identifier: Cow<'static, str>,
    type_id: TypeId,
    type_name: &'static str,
}

impl AnyContextKey {
    /// Returns the identifier of this key.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the [`TypeId`] declared by this key.
    pub fn value_type(&self) -> TypeId {
        self.type_id
    }

    /// Returns the name of the declared value type.
    pub fn value_type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for AnyContextKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.identifier == other.identifier
    }
}

impl Eq for AnyContextKey {}

impl Hash for AnyContextKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
        self.type_id.hash(state);
    }
}

impl fmt::Display for AnyContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_key(f, &self.identifier, self.type_name)
    }
}

fn write_key(f: &mut fmt::Formatter<'_>, identifier: &str, type_name: &str) -> fmt::Result {
    write!(f, "ContextKey{{identifier={identifier}, type={type_name}}}")
}
