//! Typed operation context.
//!
//! An [`OperationContext`] carries ancillary data between the collaborators
//! of one distribution operation without widening their signatures. Every
//! entry is addressed by a [`ContextKey<T>`], whose type parameter is the
//! type of the stored value:
//!
//! ```rust
//! use distribution_core::{ContextKey, OperationContext};
//!
//! const BATCH_SIZE: ContextKey<usize> = ContextKey::new("batchSize");
//!
//! let ctx = OperationContext::new().with(&BATCH_SIZE, 64);
//! let size: Option<&usize> = ctx.get(&BATCH_SIZE);
//! assert_eq!(size, Some(&64));
//! ```
//!
//! Internally the context is a single map from [`AnyContextKey`] (identifier
//! plus runtime type witness) to a boxed [`ContextValue`]; the typed accessors
//! downcast with the witness carried by the key.

pub mod key;
pub mod store;

pub use key::{AnyContextKey, ContextKey};
pub use store::{ContextValue, OperationContext, SharedContext};
