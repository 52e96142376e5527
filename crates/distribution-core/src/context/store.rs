//! The per-operation context store.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use super::key::{AnyContextKey, ContextKey};
use crate::error::{ContextError, ContextResult};

/// Values that can live in an [`OperationContext`].
///
/// Implemented for every `Send + Sync + Debug + 'static` type.
pub trait ContextValue: Any + Send + Sync + fmt::Debug {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the name of the concrete type.
    fn concrete_type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync + fmt::Debug> ContextValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn concrete_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// An [`OperationContext`] shared across threads behind a lock.
pub type SharedContext = Arc<RwLock<OperationContext>>;

/// A type-safe heterogeneous container scoped to one distribution operation.
///
/// Values are stored under [`ContextKey`]s; the key's type parameter decides
/// what `get` returns, so callers never cast.
///
/// Absent values are modelled with `Option`: storing `None` under a
/// `ContextKey<Option<T>>` makes [`contains_key`](Self::contains_key) return
/// `true` while [`get`](Self::get) yields `Some(&None)`.
///
/// # Thread Safety
///
/// A context is meant to be filled and read by one operation at a time. Use
/// [`into_shared`](Self::into_shared) when it has to cross threads.
///
/// # Example
///
/// ```rust
/// use distribution_core::{ContextKey, OperationContext};
///
/// const AGENT: ContextKey<String> = ContextKey::new("agent");
///
/// let mut ctx = OperationContext::new();
/// ctx.put(&AGENT, "publish".to_string());
/// assert_eq!(ctx.get(&AGENT).map(String::as_str), Some("publish"));
/// ```
#[derive(Default)]
pub struct OperationContext {
    values: HashMap<AnyContextKey, Box<dyn ContextValue>>,
}

impl OperationContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Stores `value` under `key`, replacing any previous value for that key.
    pub fn put<T: ContextValue>(&mut self, key: &ContextKey<T>, value: T) {
        trace!(key = %key, "Storing context value");
        self.values.insert(key.erased(), Box::new(value));
    }

    /// Stores a value (builder pattern).
    pub fn with<T: ContextValue>(mut self, key: &ContextKey<T>, value: T) -> Self {
        self.put(key, value);
        self
    }

    /// Stores an already boxed value under an erased key.
    ///
    /// Fails with [`ContextError::TypeMismatch`] when the value's type differs
    /// from the type declared by `key`; nothing is stored in that case.
    pub fn put_erased(
        &mut self,
        key: AnyContextKey,
        value: Box<dyn ContextValue>,
    ) -> ContextResult<()> {
        let value_ref: &dyn ContextValue = &*value;
        if value_ref.as_any().type_id() != key.value_type() {
            return Err(ContextError::TypeMismatch {
                identifier: key.identifier().to_string(),
                expected: key.value_type_name(),
                found: value_ref.concrete_type_name(),
            });
        }
        trace!(key = %key, "Storing erased context value");
        self.values.insert(key, value);
        Ok(())
    }

    /// Returns the value stored under `key`, or `None` if nothing was stored.
    pub fn get<T: 'static>(&self, key: &ContextKey<T>) -> Option<&T> {
        // Every slot holds the type its key declares, see `put_erased`.
        self.values
            .get(&key.erased())
            .and_then(|value| (**value).as_any().downcast_ref::<T>())
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<T: 'static>(&mut self, key: &ContextKey<T>) -> Option<&mut T> {
        self.values
            .get_mut(&key.erased())
            .and_then(|value| (**value).as_any_mut().downcast_mut::<T>())
    }

    /// Returns `true` if a value was stored under exactly this key.
    pub fn contains_key<T: 'static>(&self, key: &ContextKey<T>) -> bool {
        self.values.contains_key(&key.erased())
    }

    /// Returns `true` if a value was stored under the erased key.
    pub fn contains_any_key(&self, key: &AnyContextKey) -> bool {
        self.values.contains_key(key)
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over the stored keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &AnyContextKey> {
        self.values.keys()
    }

    /// Wraps the context for sharing across threads.
    pub fn into_shared(self) -> SharedContext {
        Arc::new(RwLock::new(self))
    }

    /// Entries ordered by identifier, then by declared value type.
    fn sorted_entries(&self) -> Vec<(&AnyContextKey, &dyn ContextValue)> {
        let mut entries: Vec<(&AnyContextKey, &dyn ContextValue)> =
            Vec::with_capacity(self.values.len());
        for (key, value) in &self.values {
            entries.push((key, &**value));
        }
        entries.sort_by(|(a, _), (b, _)| {
            AnyContextKey::identifier(a)
                .cmp(AnyContextKey::identifier(b))
                .then_with(|| {
                    AnyContextKey::value_type_name(a).cmp(AnyContextKey::value_type_name(b))
                })
        });
        entries
    }
}

impl fmt::Display for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OperationContext{")?;
        for (i, (key, value)) in self.sorted_entries().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value:?}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.sorted_entries()
                    .into_iter()
                    .map(|(key, value)| (key.identifier(), value)),
            )
            .finish()
    }
}
